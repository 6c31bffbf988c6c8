// unifi-api: Async Rust client for the UniFi controller's legacy API

pub mod error;
pub mod legacy;
pub mod platform;
pub mod transport;

pub use error::Error;
pub use legacy::LegacyClient;
pub use platform::ControllerPlatform;
pub use transport::{TlsMode, TransportConfig};
