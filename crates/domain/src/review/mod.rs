//! Review engine core: profiles, extraction, and phases.

mod extractor;
mod format;
mod phase;
mod profile;

pub use extractor::extract_changes;
pub use format::render_value;
pub use phase::ReviewPhase;
pub use profile::{
    DomainProfile, FailureMessages, FieldRule, ResolutionPolicy, ReviewDomain, ValueFormat,
    DEFAULT_CURRENCY_SYMBOL,
};
