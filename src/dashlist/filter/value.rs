//! Filter operands and time windows.

use crate::error::ValidationError;
use chrono::TimeDelta;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The expected value of an equality-style criterion.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl FilterValue {
    /// Parse a literal typed by a user.
    ///
    /// JSON literals keep their type (`true`, `42`, `"0801"`); anything else
    /// is taken as raw text.
    pub fn parse_literal(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw.trim()) {
            Ok(Value::Bool(b)) => FilterValue::Bool(b),
            Ok(Value::Number(n)) => n
                .as_f64()
                .map(FilterValue::Number)
                .unwrap_or_else(|| FilterValue::Text(raw.to_string())),
            Ok(Value::String(s)) => FilterValue::Text(s),
            _ => FilterValue::Text(raw.trim().to_string()),
        }
    }

    /// Strict comparison against a stored value.
    ///
    /// Types must line up; strings ignore case.
    pub fn equals(&self, stored: &Value) -> bool {
        match (self, stored) {
            (FilterValue::Text(expected), Value::String(actual)) => {
                expected.to_lowercase() == actual.to_lowercase()
            }
            (FilterValue::Number(expected), Value::Number(actual)) => {
                actual.as_f64().is_some_and(|a| a == *expected)
            }
            (FilterValue::Bool(expected), Value::Bool(actual)) => expected == actual,
            _ => false,
        }
    }

    /// Whether `stored` has the JSON type this literal compares against.
    pub fn same_type(&self, stored: &Value) -> bool {
        matches!(
            (self, stored),
            (FilterValue::Text(_), Value::String(_))
                | (FilterValue::Number(_), Value::Number(_))
                | (FilterValue::Bool(_), Value::Bool(_))
        )
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => write!(f, "{}", s),
            FilterValue::Number(n) => write!(f, "{}", n),
            FilterValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// How far back a recency predicate reaches.
///
/// Parses the dashboard's preset codes (`1d`, `1w`, `1m`, `2m`, `3m`, `6m`)
/// and in general `<n>h|d|w|m|y`. A month is 30 days, a year 365.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyWindow {
    amount: i64,
    unit: char,
}

impl RecencyWindow {
    pub fn days(days: i64) -> Self {
        Self {
            amount: days,
            unit: 'd',
        }
    }

    pub fn duration(&self) -> TimeDelta {
        let delta = match self.unit {
            'h' => TimeDelta::try_hours(self.amount),
            'w' => TimeDelta::try_weeks(self.amount),
            'm' => TimeDelta::try_days(self.amount.saturating_mul(30)),
            'y' => TimeDelta::try_days(self.amount.saturating_mul(365)),
            _ => TimeDelta::try_days(self.amount),
        };
        delta.unwrap_or(TimeDelta::MAX)
    }
}

impl FromStr for RecencyWindow {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(unit) = s.chars().last() else {
            return Err(ValidationError::Window(s.to_string()));
        };
        let unit = unit.to_ascii_lowercase();
        if !matches!(unit, 'h' | 'd' | 'w' | 'm' | 'y') {
            return Err(ValidationError::Window(s.to_string()));
        }
        let amount: i64 = s[..s.len() - 1]
            .parse()
            .map_err(|_| ValidationError::Window(s.to_string()))?;
        if amount <= 0 {
            return Err(ValidationError::Window(s.to_string()));
        }
        Ok(Self { amount, unit })
    }
}

impl fmt::Display for RecencyWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literal_parsing_keeps_json_types() {
        assert_eq!(FilterValue::parse_literal("true"), FilterValue::Bool(true));
        assert_eq!(FilterValue::parse_literal("42"), FilterValue::Number(42.0));
        assert_eq!(
            FilterValue::parse_literal("\"0801\""),
            FilterValue::Text("0801".into())
        );
        assert_eq!(
            FilterValue::parse_literal("admin"),
            FilterValue::Text("admin".into())
        );
    }

    #[test]
    fn text_equality_ignores_case() {
        assert!(FilterValue::from("Admin").equals(&json!("admin")));
        assert!(!FilterValue::from("admin").equals(&json!("administrator")));
    }

    #[test]
    fn equality_is_strict_about_types() {
        assert!(!FilterValue::from("1").equals(&json!(1)));
        assert!(!FilterValue::Bool(true).equals(&json!("true")));
        assert!(FilterValue::Number(3.0).equals(&json!(3)));
    }

    #[test]
    fn same_type_follows_json_types() {
        assert!(FilterValue::Number(3.0).same_type(&json!(4)));
        assert!(!FilterValue::Number(3.0).same_type(&json!("3")));
        assert!(FilterValue::from("x").same_type(&json!("y")));
        assert!(!FilterValue::Bool(true).same_type(&json!(null)));
    }

    #[test]
    fn window_codes() {
        let w: RecencyWindow = "1w".parse().unwrap();
        assert_eq!(w.duration(), TimeDelta::days(7));
        let m: RecencyWindow = "6m".parse().unwrap();
        assert_eq!(m.duration(), TimeDelta::days(180));
        assert_eq!(RecencyWindow::days(30).duration(), TimeDelta::days(30));
        assert_eq!(m.to_string(), "6m");
    }

    #[test]
    fn bad_windows_are_rejected() {
        for raw in ["", "d", "0d", "-3d", "3x", "abc"] {
            assert!(raw.parse::<RecencyWindow>().is_err(), "accepted {:?}", raw);
        }
    }
}
