use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::EntityKind;
use crate::store::DataStore;

pub fn run<S: DataStore, I: AsRef<str>>(
    store: &S,
    kind: EntityKind,
    ids: &[I],
) -> Result<CmdResult> {
    let records = ids
        .iter()
        .map(|id| store.get(kind, id.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_records(records))
}
