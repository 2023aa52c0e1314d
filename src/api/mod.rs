pub mod client;
pub mod models;
pub mod pihole;

pub use client::DnsConfigApi;
pub use models::{CnameEntry, HostEntry};
pub use pihole::PiholeClient;
