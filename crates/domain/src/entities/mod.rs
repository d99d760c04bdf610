//! Domain entities

mod change_request;
mod change_set;

pub use change_request::{ApprovalStatus, ChangeRequest};
pub use change_set::ChangeSet;
