use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{EntityKind, Fields};
use crate::store::DataStore;
use tracing::info;

pub fn run<S: DataStore>(
    store: &mut S,
    kind: EntityKind,
    id: &str,
    patch: Fields,
) -> Result<CmdResult> {
    let changed: Vec<String> = patch.keys().filter(|k| *k != "id").cloned().collect();
    let record = store.update(kind, id, patch)?;
    info!(%kind, id, fields = ?changed, "updated record");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Updated {} record {} ({})",
        kind,
        id,
        changed.join(", ")
    )));
    Ok(result.with_records(vec![record]))
}
