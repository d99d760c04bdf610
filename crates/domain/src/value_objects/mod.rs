//! Value objects

mod change_descriptor;
mod decision;

pub use change_descriptor::{ChangeDescriptor, ChangeKind};
pub use decision::{Decision, DeclineNote, Verdict};
