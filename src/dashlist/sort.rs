//! Record ordering.

use crate::error::ValidationError;
use crate::model::{parse_datetime, value_to_datetime, Record};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Compare two records. Absent values go last regardless of direction.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        self.order_of(a).cmp(&self.order_of(b))
    }

    fn order_of(&self, record: &Record) -> RecordOrder {
        RecordOrder {
            value: lookup(record, &self.field),
            descending: self.descending,
        }
    }
}

/// Stable sort; records that compare equal keep their fetch order.
pub fn sort_records(records: &mut [Record], key: &SortKey) {
    records.sort_by_cached_key(|r| key.order_of(r));
}

fn lookup(record: &Record, field: &str) -> Option<SortValue> {
    if field == "id" {
        return Some(SortValue::Text(record.id.to_lowercase()));
    }
    record.get_path(field).map(SortValue::from_value)
}

/// A field value reduced to a single totally ordered key.
///
/// Timestamps share the number line with plain numbers as epoch
/// milliseconds, so `{seconds, nanoseconds}` objects, RFC 3339 strings and
/// epoch-ms numbers interleave correctly. Across kinds the order is
/// bools, numbers, text, then everything else.
#[derive(Debug, Clone)]
enum SortValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Other(u8),
}

impl SortValue {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Bool(b) => SortValue::Bool(*b),
            Value::Number(n) => SortValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => match parse_datetime(s) {
                Some(t) => SortValue::Number(epoch_millis(t)),
                None => SortValue::Text(s.to_lowercase()),
            },
            Value::Object(_) => match value_to_datetime(value) {
                Some(t) => SortValue::Number(epoch_millis(t)),
                None => SortValue::Other(1),
            },
            Value::Array(_) => SortValue::Other(0),
            Value::Null => SortValue::Other(2),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Bool(_) => 0,
            SortValue::Number(_) => 1,
            SortValue::Text(_) => 2,
            SortValue::Other(r) => 3 + r,
        }
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank()).then_with(|| match (self, other) {
            (SortValue::Bool(l), SortValue::Bool(r)) => l.cmp(r),
            (SortValue::Number(l), SortValue::Number(r)) => l.total_cmp(r),
            (SortValue::Text(l), SortValue::Text(r)) => l.cmp(r),
            _ => Ordering::Equal,
        })
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortValue {}

fn epoch_millis(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 + f64::from(t.timestamp_subsec_nanos() % 1_000_000) / 1e6
}

/// Per-record sort key: direction applies to present values only.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RecordOrder {
    value: Option<SortValue>,
    descending: bool,
}

impl Ord for RecordOrder {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.value, &other.value) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(l), Some(r)) if self.descending => r.cmp(l),
            (Some(l), Some(r)) => l.cmp(r),
        }
    }
}

impl PartialOrd for RecordOrder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    /// `field`, `-field`, `field:asc` or `field:desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (field, descending) = if let Some(field) = s.strip_prefix('-') {
            (field, true)
        } else if let Some((field, dir)) = s.split_once(':') {
            match dir.to_lowercase().as_str() {
                "asc" => (field, false),
                "desc" => (field, true),
                _ => return Err(ValidationError::Sort(s.to_string())),
            }
        } else {
            (s, false)
        };
        let field = field.trim();
        if field.is_empty() {
            return Err(ValidationError::Sort(s.to_string()));
        }
        Ok(Self {
            field: field.to_string(),
            descending,
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            write!(f, "{}", self.field)
        }
    }
}
