use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What kind of change a descriptor reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Updated,
    Deleted,
}

/// One reviewer-facing line of a change request's diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeDescriptor {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// Display name of the changed field
    pub field: String,
    pub new_value: Value,
    pub description: String,
}

impl ChangeDescriptor {
    pub fn new(
        kind: ChangeKind,
        field: impl Into<String>,
        new_value: Value,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            new_value,
            description: description.into(),
        }
    }

    pub fn updated(
        field: impl Into<String>,
        new_value: Value,
        description: impl Into<String>,
    ) -> Self {
        Self::new(ChangeKind::Updated, field, new_value, description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_type_tag() {
        let descriptor =
            ChangeDescriptor::updated("Paid Amount", json!(4500), "Paid Amount changed to ₹4500");
        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({
                "type": "updated",
                "field": "Paid Amount",
                "newValue": 4500,
                "description": "Paid Amount changed to ₹4500",
            })
        );
    }
}
