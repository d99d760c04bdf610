//! End-to-end tests of the HTTP adapter and the review services against an
//! in-process fake backend.
//!
//! ```bash
//! cargo test -p tradeassoc-review --lib e2e_tests
//! ```

mod fake_backend;
mod http_review_tests;
mod review_flow_tests;

pub use fake_backend::*;
