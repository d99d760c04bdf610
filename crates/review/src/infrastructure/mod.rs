//! Infrastructure adapters for the review client.

pub mod config;
pub mod correlation;
pub mod http_client;
pub mod session;
pub mod telemetry;

#[cfg(test)]
pub mod testing;
