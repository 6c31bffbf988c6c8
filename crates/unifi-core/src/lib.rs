// unifi-core: Client records, the WHERE-clause filter engine, and the
// controller façade consumed by the CLI.

pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod filter;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ControllerConfig, TlsVerification};
pub use controller::Controller;
pub use error::CoreError;
pub use filter::{
    ClientFlags, Field, FieldKind, FilterError, Predicate, filter_clients,
    retain_matching,
};
pub use model::{ClientRecord, Site};
pub use unifi_api::ControllerPlatform;
