// ── Domain model ──
//
// Canonical types consumed by the filter engine and the CLI renderers.

pub mod client;
pub mod format;
pub mod site;

pub use client::ClientRecord;
pub use format::{fmt_bytes, fmt_uptime};
pub use site::Site;
