//! Free-text search over a declared set of record fields.
//!
//! A record matches when ANY of the fields contains the query as a
//! case-insensitive substring. Numbers and booleans are compared through
//! their string form, array fields match if any scalar element does, and
//! absent, null or object values simply do not match.
//!
//! A blank query is inert: it matches every record.

use crate::model::{scalar_text, Record};
use serde_json::Value;

/// Normalized search text: trimmed and lowercased once per derivation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches<S: AsRef<str>>(&self, record: &Record, fields: &[S]) -> bool {
        if self.is_blank() {
            return true;
        }
        fields
            .iter()
            .any(|field| field_contains(record, field.as_ref(), &self.needle))
    }
}

/// One-shot form of [`SearchQuery::matches`].
pub fn matches_search<S: AsRef<str>>(record: &Record, query: &str, fields: &[S]) -> bool {
    SearchQuery::new(query).matches(record, fields)
}

fn field_contains(record: &Record, field: &str, needle: &str) -> bool {
    if field == "id" {
        return record.id.to_lowercase().contains(needle);
    }
    match record.get_path(field) {
        Some(Value::Array(items)) => items.iter().any(|item| scalar_contains(item, needle)),
        Some(value) => scalar_contains(value, needle),
        None => false,
    }
}

fn scalar_contains(value: &Value, needle: &str) -> bool {
    scalar_text(value).is_some_and(|text| text.to_lowercase().contains(needle))
}
