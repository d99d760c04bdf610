//! Application layer - review use cases over the outbound ports.

pub mod error;
pub mod services;

pub use error::ReviewError;
pub use services::{DecisionOutcome, ListOutcome, ReviewService};
