//! Common utility functions shared across the review crates.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **Minimal dependencies** - only chrono for datetime utilities

pub mod datetime;
pub mod string;

// Re-export commonly used functions at crate root for convenience
pub use datetime::{format_calendar_date, parse_calendar_date, parse_datetime, CALENDAR_DATE_FORMAT};
pub use string::{display_name, is_blank, none_if_blank};
