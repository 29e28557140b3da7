//! Stock filters installed by `FilterRegistry::with_builtins`.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

use super::FilterRegistry;
use crate::error::FilterError;
use crate::model::Value;

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;
const TB: f64 = GB * 1024.0;

pub(super) fn install(registry: &mut FilterRegistry) {
    registry
        .register("yesno", yesno)
        .register("noValue", no_value)
        .register("noName", no_name)
        .register("noUnderscore", no_underscore)
        .register("title", title)
        .register("gb", |v| with_unit(v, "GB"))
        .register("mb", |v| with_unit(v, "MB"))
        .register("bytes", bytes)
        .register("itemCount", item_count)
        .register_fallible("simpleDate", |v| {
            format_date(v, "simpleDate", "%-m/%-d/%y %-I:%M %p")
        })
        .register_fallible("mediumDate", |v| {
            format_date(v, "mediumDate", "%b %-d, %Y %-I:%M:%S %p")
        })
        .register_fallible("toIsoDate", to_iso_date);
}

fn yesno(value: Value) -> Value {
    Value::from(if value.is_truthy() { "Yes" } else { "No" })
}

fn no_value(value: Value) -> Value {
    if value.is_blank() {
        Value::from("-")
    } else {
        value
    }
}

fn no_name(value: Value) -> Value {
    match &value {
        Value::Null => Value::from("None"),
        Value::String(s) if s.is_empty() => Value::from("None"),
        _ => value,
    }
}

fn no_underscore(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.replace('_', " ")),
        other => other,
    }
}

fn title(value: Value) -> Value {
    let Value::String(s) = value else {
        return value;
    };

    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for c in s.chars() {
        if word_start && !c.is_whitespace() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        word_start = c.is_whitespace();
    }
    Value::String(out)
}

/// Numeric view of a value; numeric strings count.
fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    };
    n.filter(|n| !n.is_nan())
}

fn with_unit(value: Value, unit: &str) -> Value {
    if numeric(&value).is_none() {
        return Value::from("");
    }
    Value::from(format!("{} {}", value.to_string().trim(), unit))
}

fn bytes(value: Value) -> Value {
    let Some(n) = numeric(&value) else {
        return Value::from("");
    };

    let text = if n >= TB {
        format!("{:.2} TB", n / TB)
    } else if n >= GB {
        format!("{:.2} GB", n / GB)
    } else if n >= MB {
        format!("{:.2} MB", n / MB)
    } else if n >= KB {
        format!("{:.2} KB", n / KB)
    } else {
        format!("{} bytes", n.floor())
    };
    Value::from(text)
}

fn item_count(value: Value) -> Value {
    let count = match &value {
        Value::List(items) => items.len() as f64,
        other => numeric(other).unwrap_or(0.0),
    };
    let noun = if count == 1.0 { "item" } else { "items" };
    Value::from(format!("Displaying {} {}", count, noun))
}

fn parse_date(value: &Value, filter: &str) -> Result<DateTime<FixedOffset>, FilterError> {
    let s = value.as_str().ok_or_else(|| {
        FilterError::failed(filter, format!("expected a date string, got {}", value.type_name()))
    })?;
    DateTime::parse_from_rfc3339(s.trim())
        .map_err(|e| FilterError::failed(filter, format!("'{}': {}", s, e)))
}

fn format_date(value: Value, filter: &str, pattern: &str) -> Result<Value, FilterError> {
    if value.is_null() {
        return Ok(value);
    }
    let date = parse_date(&value, filter)?;
    Ok(Value::from(date.format(pattern).to_string()))
}

fn to_iso_date(value: Value) -> Result<Value, FilterError> {
    if value.is_null() {
        return Ok(value);
    }
    let date = parse_date(&value, "toIsoDate")?;
    Ok(Value::from(
        date.with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Secs, true),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_capitalizes_each_word() {
        assert_eq!(title(Value::from("big red dog")), Value::from("Big Red Dog"));
        assert_eq!(title(Value::from(3i64)), Value::from(3i64));
    }

    #[test]
    fn test_bytes_scales_units() {
        assert_eq!(bytes(Value::from(512i64)), Value::from("512 bytes"));
        assert_eq!(bytes(Value::from(1536i64)), Value::from("1.50 KB"));
        assert_eq!(bytes(Value::from(3.0 * GB)), Value::from("3.00 GB"));
        assert_eq!(bytes(Value::from("n/a")), Value::from(""));
    }

    #[test]
    fn test_units_accept_numeric_strings() {
        assert_eq!(with_unit(Value::from(5i64), "GB"), Value::from("5 GB"));
        assert_eq!(with_unit(Value::from("20"), "MB"), Value::from("20 MB"));
        assert_eq!(with_unit(Value::Null, "MB"), Value::from(""));
    }

    #[test]
    fn test_item_count_pluralizes() {
        assert_eq!(item_count(Value::from(1i64)), Value::from("Displaying 1 item"));
        assert_eq!(
            item_count(Value::List(vec![Value::Null, Value::Null])),
            Value::from("Displaying 2 items")
        );
    }

    #[test]
    fn test_dates() {
        let raw = Value::from("2016-03-04T17:05:09Z");
        assert_eq!(
            format_date(raw.clone(), "simpleDate", "%-m/%-d/%y %-I:%M %p").unwrap(),
            Value::from("3/4/16 5:05 PM")
        );
        assert_eq!(
            format_date(raw, "mediumDate", "%b %-d, %Y %-I:%M:%S %p").unwrap(),
            Value::from("Mar 4, 2016 5:05:09 PM")
        );
        assert_eq!(
            to_iso_date(Value::from("2016-03-04T19:05:09+02:00")).unwrap(),
            Value::from("2016-03-04T17:05:09Z")
        );
    }

    #[test]
    fn test_bad_date_is_an_error() {
        let err = to_iso_date(Value::from("yesterday")).unwrap_err();
        assert_eq!(err.filter(), "toIsoDate");
    }
}
