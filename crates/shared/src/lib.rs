//! Tradeassoc Shared - wire types exchanged with the review backend
//!
//! This crate contains the REST vocabulary the review client speaks:
//! - Endpoint paths and decision identifiers per review domain
//! - Decision request bodies
//! - Change request records and error bodies as the backend sends them
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - serde, serde_json, thiserror, and tracing
//! 2. **No business logic** - Pure data types and their conversions
//! 3. **Lenient reads** - backend key spellings vary by domain and are
//!    accepted through serde aliases

pub mod endpoints;
pub mod requests;
pub mod responses;

pub use endpoints::{IdentifierField, ReviewEndpoints};
pub use requests::{DecisionBody, DecisionTarget};
pub use responses::{parse_change_requests, ChangeRequestRecord, ErrorBody, WireError};
