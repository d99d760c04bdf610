//! String conversion utilities.

/// True when the string is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Trims the string, returning `None` when nothing is left.
///
/// # Examples
///
/// ```
/// use tradeassoc_domain::common::none_if_blank;
///
/// assert_eq!(none_if_blank("  Missing documents "), Some("Missing documents"));
/// assert_eq!(none_if_blank("   "), None);
/// ```
pub fn none_if_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Derives a reviewer-facing label from a camelCase field key.
///
/// A space is inserted before every capital letter and the first letter is
/// upper-cased.
///
/// # Examples
///
/// ```
/// use tradeassoc_domain::common::display_name;
///
/// assert_eq!(display_name("paidAmount"), "Paid Amount");
/// assert_eq!(display_name("isMemberOfOrg"), "Is Member Of Org");
/// ```
pub fn display_name(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
            continue;
        }
        if ch.is_uppercase() {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
