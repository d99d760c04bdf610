//! Application services.

mod review_service;

pub use review_service::{DecisionOutcome, ListOutcome, ReviewService};
