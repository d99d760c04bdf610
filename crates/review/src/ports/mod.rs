//! Port definitions for the review client.

pub mod outbound;
