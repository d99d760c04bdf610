//! Tradeassoc review client.
//!
//! Loads pending change requests for memberships, bills, and invoices,
//! derives human-readable change lists, and records approve/decline
//! decisions against the association's REST backend.

pub mod app;
pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod presentation;
pub mod state;

#[cfg(test)]
mod e2e_tests;

pub use app::ReviewApp;
pub use application::{DecisionOutcome, ListOutcome, ReviewError, ReviewService};
pub use infrastructure::config::{ConfigError, ReviewConfig};
