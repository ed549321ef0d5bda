use std::{fmt, sync::LazyLock};

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::metadata::FieldType;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d+(?:\.\d+)?$").expect("number pattern"));
static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern"));
static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}(?::\d{2})?$").expect("datetime pattern")
});
static CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2}):(\d{2})(?::(\d{2}))?$").expect("clock pattern")
});
static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(\d+)h)?(?: ?(\d+)m)?(?: ?(\d+)s)?$").expect("duration pattern")
});

/// A casted operand.
///
/// Value tokens and operator expressions hold the native form of the text
/// the user typed, decided by the declared [`FieldType`] of the field:
///
/// - string → quotes stripped
/// - number → `f64`
/// - boolean → `bool`
/// - date / datetime → `chrono` naive values
/// - time → whole seconds, from either `HH:MM[:SS]` or a duration like `1h 15m`
///
/// # Examples
///
/// ```
/// use sift_lang::{metadata::FieldType, Value};
///
/// assert_eq!(Value::cast(FieldType::Number, "2.5"), Some(Value::Number(2.5)));
/// assert_eq!(Value::cast(FieldType::Time, "1h15m"), Value::cast(FieldType::Time, "01:15:00"));
/// assert_eq!(Value::cast(FieldType::Boolean, "maybe"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),

    /// Seconds
    Time(i64),

    /// Operand list for multi-value operators
    List(Vec<Value>),
}

impl Value {
    /// Check `text` against `field_type` and convert it. `None` when the
    /// text is not a valid literal of that type. Array types check and cast
    /// a single element.
    pub fn cast(field_type: FieldType, text: &str) -> Option<Value> {
        match field_type.element() {
            FieldType::String => Some(Value::String(strip_quotes(text).to_string())),
            FieldType::Number => {
                if !NUMBER.is_match(text) {
                    return None;
                }
                text.parse::<f64>().ok().map(Value::Number)
            }
            FieldType::Boolean => {
                if text.eq_ignore_ascii_case("true") {
                    Some(Value::Boolean(true))
                } else if text.eq_ignore_ascii_case("false") {
                    Some(Value::Boolean(false))
                } else {
                    None
                }
            }
            FieldType::Date => {
                if !DATE.is_match(text) {
                    return None;
                }
                NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().map(Value::Date)
            }
            FieldType::DateTime => {
                if !DATE_TIME.is_match(text) {
                    return None;
                }
                NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                    .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M"))
                    .ok()
                    .map(Value::DateTime)
            }
            FieldType::Time => clock_seconds(text)
                .or_else(|| duration_seconds(text))
                .map(Value::Time),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Trim one quote character from each end, independently.
pub fn strip_quotes(text: &str) -> &str {
    let text = text.strip_prefix(['"', '\'']).unwrap_or(text);
    text.strip_suffix(['"', '\'']).unwrap_or(text)
}

fn clock_seconds(text: &str) -> Option<i64> {
    let captures = CLOCK.captures(text)?;
    let hours: i64 = captures[1].parse().ok()?;
    let minutes: i64 = captures[2].parse().ok()?;
    let seconds: i64 = match captures.get(3) {
        Some(s) => s.as_str().parse().ok()?,
        None => 0,
    };
    if minutes >= 60 || seconds >= 60 {
        return None;
    }
    hours.checked_mul(3600)?.checked_add(minutes * 60 + seconds)
}

fn duration_seconds(text: &str) -> Option<i64> {
    if text.is_empty() {
        return None;
    }
    let captures = DURATION.captures(text)?;
    let part = |index: usize| -> Option<i64> {
        match captures.get(index) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };
    // Digit runs are unbounded, so the sum may not fit.
    part(1)?
        .checked_mul(3600)?
        .checked_add(part(2)?.checked_mul(60)?)?
        .checked_add(part(3)?)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Time(seconds) => {
                let (h, m, s) = (seconds / 3600, seconds % 3600 / 60, seconds % 60);
                if h < 100 {
                    write!(f, "{:02}:{:02}:{:02}", h, m, s)
                } else {
                    write!(f, "{}h {}m {}s", h, m, s)
                }
            }
            Value::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_quotes_is_naive() {
        assert_eq!(strip_quotes("\"Test\""), "Test");
        assert_eq!(strip_quotes("'Test'"), "Test");
        assert_eq!(strip_quotes("\"Test'"), "Test");
        assert_eq!(strip_quotes("\"Test"), "Test");
        assert_eq!(strip_quotes("Test"), "Test");
        assert_eq!(strip_quotes("\"\"a\"\""), "\"a\"");
    }

    #[test]
    fn test_cast_number() {
        assert_eq!(Value::cast(FieldType::Number, "42"), Some(Value::Number(42.0)));
        assert_eq!(Value::cast(FieldType::NumberArray, "-1.5"), Some(Value::Number(-1.5)));
        assert_eq!(Value::cast(FieldType::Number, "inf"), None);
        assert_eq!(Value::cast(FieldType::Number, "12abc"), None);
    }

    #[test]
    fn test_cast_boolean() {
        assert_eq!(Value::cast(FieldType::Boolean, "TRUE"), Some(Value::Boolean(true)));
        assert_eq!(Value::cast(FieldType::Boolean, "False"), Some(Value::Boolean(false)));
        assert_eq!(Value::cast(FieldType::Boolean, "yes"), None);
    }

    #[test]
    fn test_cast_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(Value::cast(FieldType::Date, "2024-02-29"), Some(Value::Date(date)));
        assert_eq!(Value::cast(FieldType::Date, "2023-02-29"), None);
        assert_eq!(Value::cast(FieldType::Date, "2024-2-29"), None);

        let with_seconds = date.and_hms_opt(10, 30, 15).unwrap();
        let without_seconds = date.and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(
            Value::cast(FieldType::DateTime, "2024-02-29 10:30:15"),
            Some(Value::DateTime(with_seconds))
        );
        assert_eq!(
            Value::cast(FieldType::DateTimeArray, "2024-02-29 10:30"),
            Some(Value::DateTime(without_seconds))
        );
        assert_eq!(Value::cast(FieldType::DateTime, "2024-02-29"), None);
    }

    #[test]
    fn test_cast_time_accepts_clock_and_duration() {
        assert_eq!(Value::cast(FieldType::Time, "01:15:00"), Some(Value::Time(4500)));
        assert_eq!(Value::cast(FieldType::Time, "01:15"), Some(Value::Time(4500)));
        assert_eq!(Value::cast(FieldType::Time, "1h15m"), Some(Value::Time(4500)));
        assert_eq!(Value::cast(FieldType::Time, "1h 15m"), Some(Value::Time(4500)));
        assert_eq!(Value::cast(FieldType::Time, "90s"), Some(Value::Time(90)));
        assert_eq!(Value::cast(FieldType::Time, "10:61"), None);
        assert_eq!(Value::cast(FieldType::Time, ""), None);
        assert_eq!(Value::cast(FieldType::Time, "soon"), None);
    }

    #[test]
    fn test_cast_time_rejects_overflow() {
        assert_eq!(Value::cast(FieldType::Time, "9999999999999999h"), None);
        assert_eq!(Value::cast(FieldType::Time, "1h 9223372036854775807s"), None);
        assert_eq!(Value::cast(FieldType::Time, "99999999999999999999m"), None);
        assert_eq!(
            Value::cast(FieldType::Time, "2562047788015215h"),
            Some(Value::Time(2_562_047_788_015_215 * 3600))
        );
    }

    #[test]
    fn test_display_reparses() {
        let cases = [
            (FieldType::Number, "2.5"),
            (FieldType::Number, "7"),
            (FieldType::Date, "2024-01-02"),
            (FieldType::DateTime, "2024-01-02 03:04:05"),
            (FieldType::Time, "01:15:00"),
            (FieldType::Time, "150h"),
            (FieldType::Boolean, "true"),
        ];

        for (field_type, text) in cases {
            let value = Value::cast(field_type, text).unwrap();
            assert_eq!(
                Value::cast(field_type, &value.to_string()),
                Some(value.clone()),
                "Failed for input: {}",
                text
            );
        }
    }

    #[test]
    fn test_display_list() {
        let list = Value::List(vec![Value::Number(1.0), Value::String("a".into())]);
        assert_eq!(list.to_string(), "1, a");
    }
}
