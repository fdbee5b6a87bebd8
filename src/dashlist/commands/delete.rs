use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::EntityKind;
use crate::store::DataStore;
use tracing::info;

/// Delete records by id. All ids are checked before anything is removed.
pub fn run<S: DataStore, I: AsRef<str>>(
    store: &mut S,
    kind: EntityKind,
    ids: &[I],
) -> Result<CmdResult> {
    let records = ids
        .iter()
        .map(|id| store.get(kind, id.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let mut result = CmdResult::default();
    for record in &records {
        store.delete(kind, &record.id)?;
        info!(%kind, id = %record.id, "deleted record");
        result.add_message(CmdMessage::success(format!(
            "Deleted {} record {}",
            kind, record.id
        )));
    }
    Ok(result.with_records(records))
}
