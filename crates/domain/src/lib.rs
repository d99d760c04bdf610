//! Tradeassoc domain crate.
//!
//! Core vocabulary for reviewing change requests proposed against
//! memberships, bills, and invoices:
//!
//! - `entities` - change requests and the change sets they carry
//! - `value_objects` - decisions, decline notes, change descriptors
//! - `review` - domain profiles, the change extractor, and the per-request
//!   review phase machine
//! - `common` - string and date helpers shared by the formatters

extern crate self as tradeassoc_domain;

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod review;
pub mod value_objects;

pub use entities::{ApprovalStatus, ChangeRequest, ChangeSet};
pub use error::DomainError;
pub use ids::RecordId;
pub use review::{
    extract_changes, DomainProfile, FailureMessages, FieldRule, ResolutionPolicy, ReviewDomain,
    ReviewPhase, ValueFormat,
};
pub use value_objects::{ChangeDescriptor, ChangeKind, Decision, DeclineNote, Verdict};
