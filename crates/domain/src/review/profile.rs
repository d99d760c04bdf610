//! Domain profiles - the data that specializes the review engine per domain.
//!
//! Membership, bill, and invoice reviews share one extractor and one
//! session model. Everything that differs between them lives here:
//!
//! - the ordered field rules the extractor walks
//! - how a decided request leaves the list (`ResolutionPolicy`)
//! - the currency symbol used for money fields
//! - fallback messages shown when the backend sends none

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The record families whose edits go through review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDomain {
    Membership,
    Bill,
    Invoice,
}

impl ReviewDomain {
    pub const ALL: [ReviewDomain; 3] = [Self::Membership, Self::Bill, Self::Invoice];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Membership => "membership",
            Self::Bill => "bill",
            Self::Invoice => "invoice",
        }
    }
}

impl fmt::Display for ReviewDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewDomain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "membership" | "memberships" => Ok(Self::Membership),
            "bill" | "bills" | "billing" => Ok(Self::Bill),
            "invoice" | "invoices" => Ok(Self::Invoice),
            other => Err(DomainError::parse(format!("Unknown review domain: {}", other))),
        }
    }
}

/// What happens to a request in the held list once it is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// Pending queue: decided requests drop out of view.
    Queue,
    /// Full history: decided requests stay, with their status updated.
    History,
}

impl FromStr for ResolutionPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "queue" => Ok(Self::Queue),
            "history" => Ok(Self::History),
            other => Err(DomainError::parse(format!("Unknown resolution policy: {}", other))),
        }
    }
}

/// How a scalar value is rendered in a change description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    Text,
    Number,
    Currency,
    Date,
    Percent,
    Flag,
}

/// One step of the extractor's walk over a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// A single value; one `updated` descriptor.
    Scalar { key: String, format: ValueFormat },
    /// Two date keys reported as one period when both are present.
    DateRange {
        from_key: String,
        to_key: String,
        label: String,
    },
    /// A reference to another party, e.g. the proposing member.
    Reference { key: String },
    /// A list-valued sub-resource split into new/update/delete buckets.
    SubResource {
        key: String,
        new_bucket: String,
        update_bucket: String,
        delete_bucket: String,
        /// Pluralizable noun used in summaries, e.g. `branch(es)`
        noun: String,
    },
    /// A nested object collapsed into one summary line.
    Composite {
        key: String,
        parts: Vec<(String, ValueFormat)>,
    },
}

impl FieldRule {
    pub fn scalar(key: &str, format: ValueFormat) -> Self {
        Self::Scalar {
            key: key.to_string(),
            format,
        }
    }

    pub fn date_range(from_key: &str, to_key: &str, label: &str) -> Self {
        Self::DateRange {
            from_key: from_key.to_string(),
            to_key: to_key.to_string(),
            label: label.to_string(),
        }
    }

    pub fn reference(key: &str) -> Self {
        Self::Reference {
            key: key.to_string(),
        }
    }

    /// Sub-resource whose buckets follow the `new{Item}Schema`,
    /// `update{Item}Schema`, `delete{Item}Schema` naming.
    pub fn sub_resource(key: &str, item: &str, noun: &str) -> Self {
        Self::SubResource {
            key: key.to_string(),
            new_bucket: format!("new{}Schema", item),
            update_bucket: format!("update{}Schema", item),
            delete_bucket: format!("delete{}Schema", item),
            noun: noun.to_string(),
        }
    }

    pub fn composite(key: &str, parts: &[(&str, ValueFormat)]) -> Self {
        Self::Composite {
            key: key.to_string(),
            parts: parts
                .iter()
                .map(|(part, format)| (part.to_string(), *format))
                .collect(),
        }
    }
}

/// Messages shown when a failed call carries no server message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureMessages {
    pub load: String,
    pub approve: String,
    pub decline: String,
}

impl Default for FailureMessages {
    fn default() -> Self {
        Self {
            load: "Failed to load pending requests".to_string(),
            approve: "Failed to approve changes".to_string(),
            decline: "Failed to decline changes".to_string(),
        }
    }
}

/// Default currency symbol for money fields.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Data-driven description of one review domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainProfile {
    domain: ReviewDomain,
    rules: Vec<FieldRule>,
    resolution: ResolutionPolicy,
    currency_symbol: String,
    messages: FailureMessages,
}

impl DomainProfile {
    pub fn new(domain: ReviewDomain, rules: Vec<FieldRule>, resolution: ResolutionPolicy) -> Self {
        Self {
            domain,
            rules,
            resolution,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            messages: FailureMessages::default(),
        }
    }

    /// The built-in profile for a domain.
    pub fn for_domain(domain: ReviewDomain) -> Self {
        match domain {
            ReviewDomain::Membership => Self::membership(),
            ReviewDomain::Bill => Self::bill(),
            ReviewDomain::Invoice => Self::invoice(),
        }
    }

    /// Membership edits: firm scalars first, then proposers, then the
    /// branch/partner/machinery lists, then the inquiry summary.
    pub fn membership() -> Self {
        use ValueFormat::*;

        let rules = vec![
            FieldRule::scalar("firmName", Text),
            FieldRule::scalar("proprietorName", Text),
            FieldRule::scalar("firmAddress", Text),
            FieldRule::scalar("contactNumber", Text),
            FieldRule::scalar("email", Text),
            FieldRule::scalar("gstNumber", Text),
            FieldRule::scalar("panNumber", Text),
            FieldRule::scalar("membershipType", Text),
            FieldRule::scalar("establishedOn", Date),
            FieldRule::scalar("membershipFee", Currency),
            FieldRule::reference("proposer"),
            FieldRule::reference("executiveProposer"),
            FieldRule::sub_resource("branchDetails", "Branch", "branch(es)"),
            FieldRule::sub_resource("partnerDetails", "Partner", "partner(s)"),
            FieldRule::sub_resource("machineryInformations", "Machine", "machine(s)"),
            FieldRule::composite(
                "membershipInquiry",
                &[
                    ("isMemberOfOrg", Flag),
                    ("orgDetails", Text),
                    ("hasAppliedEarlier", Flag),
                    ("previousApplicationDetails", Text),
                    ("isValidMember", Flag),
                    ("isExecutiveMember", Flag),
                ],
            ),
        ];

        Self::new(ReviewDomain::Membership, rules, ResolutionPolicy::Queue)
    }

    /// Bill edits: the paid amount, then the billing period.
    pub fn bill() -> Self {
        use ValueFormat::*;

        let rules = vec![
            FieldRule::scalar("paidAmount", Currency),
            FieldRule::date_range("fromDate", "toDate", "Billing Period"),
            FieldRule::scalar("paymentDate", Date),
            FieldRule::scalar("paymentMode", Text),
            FieldRule::scalar("remarks", Text),
        ];

        Self::new(ReviewDomain::Bill, rules, ResolutionPolicy::Queue)
    }

    /// Invoice edits. Invoices keep their full history in view.
    pub fn invoice() -> Self {
        use ValueFormat::*;

        let rules = vec![
            FieldRule::scalar("taxableAmount", Currency),
            FieldRule::scalar("gstRate", Percent),
            FieldRule::scalar("totalAmount", Currency),
            FieldRule::scalar("invoiceDate", Date),
            FieldRule::scalar("dueDate", Date),
            FieldRule::scalar("customerName", Text),
            FieldRule::sub_resource("lineItems", "Item", "line item(s)"),
            FieldRule::scalar("remarks", Text),
        ];

        Self::new(ReviewDomain::Invoice, rules, ResolutionPolicy::History)
    }

    pub fn with_resolution(mut self, resolution: ResolutionPolicy) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn domain(&self) -> ReviewDomain {
        self.domain
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn resolution(&self) -> ResolutionPolicy {
        self.resolution
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn messages(&self) -> &FailureMessages {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_resolution_policies() {
        assert_eq!(DomainProfile::membership().resolution(), ResolutionPolicy::Queue);
        assert_eq!(DomainProfile::bill().resolution(), ResolutionPolicy::Queue);
        assert_eq!(DomainProfile::invoice().resolution(), ResolutionPolicy::History);
    }

    #[test]
    fn overrides_replace_policy_and_symbol() {
        let profile = DomainProfile::bill()
            .with_resolution("History".parse().unwrap())
            .with_currency_symbol("Rs.");
        assert_eq!(profile.resolution(), ResolutionPolicy::History);
        assert_eq!(profile.currency_symbol(), "Rs.");
        assert!("archive".parse::<ResolutionPolicy>().is_err());
    }

    #[test]
    fn bill_rules_start_with_amount_then_period() {
        let profile = DomainProfile::bill();
        assert_eq!(
            profile.rules()[0],
            FieldRule::scalar("paidAmount", ValueFormat::Currency)
        );
        assert!(matches!(profile.rules()[1], FieldRule::DateRange { .. }));
    }

    #[test]
    fn sub_resource_bucket_names() {
        let rule = FieldRule::sub_resource("branchDetails", "Branch", "branch(es)");
        let FieldRule::SubResource {
            new_bucket,
            update_bucket,
            delete_bucket,
            ..
        } = rule
        else {
            panic!("expected sub-resource rule");
        };
        assert_eq!(new_bucket, "newBranchSchema");
        assert_eq!(update_bucket, "updateBranchSchema");
        assert_eq!(delete_bucket, "deleteBranchSchema");
    }

    #[test]
    fn domain_parses_aliases() {
        assert_eq!("Billing".parse::<ReviewDomain>().unwrap(), ReviewDomain::Bill);
        assert_eq!(
            "memberships".parse::<ReviewDomain>().unwrap(),
            ReviewDomain::Membership
        );
        assert!("gst".parse::<ReviewDomain>().is_err());
    }

    #[test]
    fn for_domain_matches_constructor() {
        for domain in ReviewDomain::ALL {
            assert_eq!(DomainProfile::for_domain(domain).domain(), domain);
        }
    }
}
