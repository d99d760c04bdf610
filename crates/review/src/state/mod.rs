//! Client-held review state.
//!
//! Everything here is synchronous and I/O free; the service layer owns the
//! lock around it and the network calls between mutations.

pub mod notices;
pub mod review_session;

pub use notices::{Notice, NoticeLevel};
pub use review_session::{DeclineDraft, ReviewSession};
