use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{EntityKind, Fields};
use crate::store::DataStore;
use tracing::info;

pub fn run<S: DataStore>(store: &mut S, kind: EntityKind, fields: Fields) -> Result<CmdResult> {
    let record = store.create(kind, fields)?;
    info!(%kind, id = %record.id, "created record");
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Created {} record {}",
        kind, record.id
    )));
    Ok(result.with_records(vec![record]))
}
