use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::facet_values;
use crate::model::EntityKind;
use crate::store::DataStore;

/// Distinct values of a field across a collection, for filter dropdowns.
pub fn run<S: DataStore>(store: &S, kind: EntityKind, field: &str) -> Result<CmdResult> {
    let records = store.fetch_all(kind)?;
    let values = facet_values(&records, field);
    let mut result = CmdResult::default();
    if values.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No values for '{}' in {}",
            field, kind
        )));
    }
    Ok(result.with_facets(values))
}
