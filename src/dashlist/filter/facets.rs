//! Distinct field values, used to populate filter choices.

use crate::model::{scalar_text, Record};
use serde_json::Value;
use std::collections::BTreeSet;

/// Sorted, de-duplicated, non-empty values of `field` across `records`.
///
/// Array fields contribute each scalar element.
pub fn facet_values(records: &[Record], field: &str) -> Vec<String> {
    let mut values = BTreeSet::new();
    for record in records {
        match record.get_path(field) {
            Some(Value::Array(items)) => {
                values.extend(items.iter().filter_map(scalar_text));
            }
            Some(value) => {
                if let Some(text) = scalar_text(value) {
                    values.insert(text);
                }
            }
            None if field == "id" => {
                values.insert(record.id.clone());
            }
            None => {}
        }
    }
    values.retain(|v| !v.trim().is_empty());
    values.into_iter().collect()
}
