//! Change extractor - turns a proposed patch into an ordered diff.
//!
//! The walk follows the profile's rule list, so reviewers always see
//! amounts and dates before bulk structural changes. Absent keys produce
//! nothing; odd shapes are skipped rather than reported as errors.

use serde_json::{Map, Value};

use super::format::render_value;
use super::profile::{DomainProfile, FieldRule, ValueFormat};
use crate::common::display_name;
use crate::entities::ChangeSet;
use crate::value_objects::{ChangeDescriptor, ChangeKind};

/// Keys tried, in order, when naming a referenced party.
const REFERENCE_NAME_KEYS: [&str; 4] = ["name", "firmName", "membershipId", "id"];

/// Derives the reviewer-facing diff for one patch.
///
/// Pure: the same profile and patch always yield the same descriptors.
pub fn extract_changes(profile: &DomainProfile, patch: &ChangeSet) -> Vec<ChangeDescriptor> {
    let mut changes = Vec::new();
    let currency = profile.currency_symbol();

    for rule in profile.rules() {
        match rule {
            FieldRule::Scalar { key, format } => {
                changes.extend(scalar_change(patch, key, *format, currency));
            }
            FieldRule::DateRange {
                from_key,
                to_key,
                label,
            } => {
                changes.extend(date_range_changes(patch, from_key, to_key, label, currency));
            }
            FieldRule::Reference { key } => {
                changes.extend(reference_change(patch, key));
            }
            FieldRule::SubResource {
                key,
                new_bucket,
                update_bucket,
                delete_bucket,
                noun,
            } => {
                if let Some(Value::Object(buckets)) = patch.get(key) {
                    let field = display_name(key);
                    let summaries = [
                        (new_bucket, ChangeKind::Added, "new ", "added"),
                        (update_bucket, ChangeKind::Updated, "", "updated"),
                        (delete_bucket, ChangeKind::Deleted, "", "deleted"),
                    ];
                    for (bucket, kind, prefix, verb) in summaries {
                        let Some(Value::Array(items)) = buckets.get(bucket.as_str()) else {
                            continue;
                        };
                        if items.is_empty() {
                            continue;
                        }
                        changes.push(ChangeDescriptor::new(
                            kind,
                            field.clone(),
                            Value::Array(items.clone()),
                            format!("{} {}{} {}", items.len(), prefix, noun, verb),
                        ));
                    }
                }
            }
            FieldRule::Composite { key, parts } => {
                if let Some(Value::Object(object)) = patch.get(key) {
                    changes.extend(composite_change(key, object, parts, currency));
                }
            }
        }
    }

    changes
}

fn scalar_change(
    patch: &ChangeSet,
    key: &str,
    format: ValueFormat,
    currency: &str,
) -> Option<ChangeDescriptor> {
    let value = patch.get(key)?;
    let rendered = render_value(value, format, currency)?;
    let field = display_name(key);
    let description = format!("{} changed to {}", field, rendered);
    Some(ChangeDescriptor::updated(field, value.clone(), description))
}

fn date_range_changes(
    patch: &ChangeSet,
    from_key: &str,
    to_key: &str,
    label: &str,
    currency: &str,
) -> Vec<ChangeDescriptor> {
    let from = patch
        .get(from_key)
        .and_then(|v| render_value(v, ValueFormat::Date, currency).map(|text| (v, text)));
    let to = patch
        .get(to_key)
        .and_then(|v| render_value(v, ValueFormat::Date, currency).map(|text| (v, text)));

    match (from, to) {
        (Some((from_value, from_text)), Some((to_value, to_text))) => {
            let mut range = Map::new();
            range.insert(from_key.to_string(), from_value.clone());
            range.insert(to_key.to_string(), to_value.clone());
            vec![ChangeDescriptor::updated(
                label,
                Value::Object(range),
                format!("{} changed to {} - {}", label, from_text, to_text),
            )]
        }
        (Some(_), None) => scalar_change(patch, from_key, ValueFormat::Date, currency)
            .into_iter()
            .collect(),
        (None, Some(_)) => scalar_change(patch, to_key, ValueFormat::Date, currency)
            .into_iter()
            .collect(),
        (None, None) => Vec::new(),
    }
}

fn reference_change(patch: &ChangeSet, key: &str) -> Option<ChangeDescriptor> {
    let value = patch.get(key)?;
    let name = match value {
        Value::Object(object) => REFERENCE_NAME_KEYS
            .iter()
            .filter_map(|name_key| object.get(*name_key))
            .find_map(|candidate| render_value(candidate, ValueFormat::Text, ""))
            .or_else(|| render_value(value, ValueFormat::Text, ""))?,
        other => render_value(other, ValueFormat::Text, "")?,
    };
    let field = display_name(key);
    let description = format!("{} changed to {}", field, name);
    Some(ChangeDescriptor::updated(field, value.clone(), description))
}

fn composite_change(
    key: &str,
    object: &Map<String, Value>,
    parts: &[(String, ValueFormat)],
    currency: &str,
) -> Option<ChangeDescriptor> {
    let present: Vec<String> = parts
        .iter()
        .filter_map(|(part, format)| {
            let value = object.get(part)?;
            let rendered = render_value(value, *format, currency)?;
            Some(format!("{}: {}", display_name(part), rendered))
        })
        .collect();

    if present.is_empty() {
        return None;
    }

    Some(ChangeDescriptor::updated(
        display_name(key),
        Value::Object(object.clone()),
        present.join(", "),
    ))
}
