// Legacy API client modules
//
// Hand-written client for the UniFi controller's legacy (non-OpenAPI) endpoints,
// wrapped in the standard `{ meta: { rc, msg }, data: [...] }` envelope.

pub mod client;
pub mod clients;
pub mod models;
pub mod sites;

pub use client::LegacyClient;
