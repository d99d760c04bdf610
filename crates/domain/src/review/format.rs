//! Rendering of patch values inside change descriptions.

use serde_json::{Number, Value};

use super::profile::ValueFormat;
use crate::common::{format_calendar_date, none_if_blank};

/// Renders a patch value for display.
///
/// Returns `None` when there is nothing worth showing: `null`, blank
/// strings, and empty arrays or objects. Strings that do not parse under a
/// numeric or date format are shown as given.
pub fn render_value(value: &Value, format: ValueFormat, currency_symbol: &str) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(yes_no(*flag).to_string()),
        Value::Number(number) => Some(render_number(number, format, currency_symbol)),
        Value::String(raw) => {
            let text = none_if_blank(raw)?;
            Some(render_text(text, format, currency_symbol))
        }
        Value::Array(items) => {
            let rendered: Vec<String> = items
                .iter()
                .filter_map(|item| render_value(item, ValueFormat::Text, currency_symbol))
                .collect();
            if rendered.is_empty() {
                None
            } else {
                Some(rendered.join(", "))
            }
        }
        Value::Object(map) if map.is_empty() => None,
        Value::Object(_) => Some(value.to_string()),
    }
}

fn render_number(number: &Number, format: ValueFormat, currency_symbol: &str) -> String {
    let Some(amount) = number.as_f64() else {
        return number.to_string();
    };

    match format {
        ValueFormat::Currency => format!("{}{}", currency_symbol, currency_amount(amount)),
        ValueFormat::Percent => format!("{}%", plain_number(number)),
        ValueFormat::Flag => yes_no(amount != 0.0).to_string(),
        ValueFormat::Text | ValueFormat::Number | ValueFormat::Date => plain_number(number),
    }
}

fn render_text(text: &str, format: ValueFormat, currency_symbol: &str) -> String {
    match format {
        ValueFormat::Text => text.to_string(),
        ValueFormat::Date => format_calendar_date(text),
        ValueFormat::Currency => match text.parse::<f64>() {
            Ok(amount) if amount.is_finite() => {
                format!("{}{}", currency_symbol, currency_amount(amount))
            }
            _ => text.to_string(),
        },
        ValueFormat::Percent => match text.parse::<f64>() {
            Ok(rate) if rate.is_finite() => format!("{}%", float_text(rate)),
            _ => text.to_string(),
        },
        ValueFormat::Number => match text.parse::<f64>() {
            Ok(value) if value.is_finite() => float_text(value),
            _ => text.to_string(),
        },
        ValueFormat::Flag => match text.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" => "Yes".to_string(),
            "false" | "no" | "n" => "No".to_string(),
            _ => text.to_string(),
        },
    }
}

/// Money amounts: whole numbers without decimals, everything else with two.
fn currency_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

fn plain_number(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(uint) = number.as_u64() {
        return uint.to_string();
    }
    number.as_f64().map(float_text).unwrap_or_else(|| number.to_string())
}

fn float_text(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: Value, format: ValueFormat) -> Option<String> {
        render_value(&value, format, "₹")
    }

    #[test]
    fn currency_prefixes_symbol_without_grouping() {
        assert_eq!(render(json!(4500), ValueFormat::Currency).unwrap(), "₹4500");
        assert_eq!(render(json!(4500.5), ValueFormat::Currency).unwrap(), "₹4500.50");
        assert_eq!(render(json!("1200"), ValueFormat::Currency).unwrap(), "₹1200");
        assert_eq!(render(json!(0), ValueFormat::Currency).unwrap(), "₹0");
    }

    #[test]
    fn currency_keeps_unparseable_strings() {
        assert_eq!(render(json!("waived"), ValueFormat::Currency).unwrap(), "waived");
    }

    #[test]
    fn percent_appends_suffix() {
        assert_eq!(render(json!(18), ValueFormat::Percent).unwrap(), "18%");
        assert_eq!(render(json!("12.5"), ValueFormat::Percent).unwrap(), "12.5%");
    }

    #[test]
    fn dates_fall_back_to_raw_text() {
        assert_eq!(render(json!("2024-01-01"), ValueFormat::Date).unwrap(), "01/01/2024");
        assert_eq!(render(json!("someday"), ValueFormat::Date).unwrap(), "someday");
    }

    #[test]
    fn flags_render_yes_no() {
        assert_eq!(render(json!(true), ValueFormat::Flag).unwrap(), "Yes");
        assert_eq!(render(json!(false), ValueFormat::Flag).unwrap(), "No");
        assert_eq!(render(json!("false"), ValueFormat::Flag).unwrap(), "No");
    }

    #[test]
    fn blank_values_render_nothing() {
        assert!(render(Value::Null, ValueFormat::Text).is_none());
        assert!(render(json!("   "), ValueFormat::Text).is_none());
        assert!(render(json!([]), ValueFormat::Text).is_none());
        assert!(render(json!({}), ValueFormat::Text).is_none());
    }

    #[test]
    fn arrays_join_rendered_items() {
        assert_eq!(
            render(json!(["Lathe", "", "Press"]), ValueFormat::Text).unwrap(),
            "Lathe, Press"
        );
    }
}
