pub mod client;
pub mod error;
pub mod hetzner;
pub mod models;

pub use client::DnsApiClient;
pub use error::DnsError;
pub use hetzner::HetznerClient;
