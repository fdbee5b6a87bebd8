use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DashError, Result};
use crate::store::DataStore;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn run<S: DataStore>(store: &mut S, path: &Path) -> Result<CmdResult> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| DashError::Api(format!("Not a file: {}", path.display())))?;
    let bytes = fs::read(path)?;
    let location = store.upload_file(name, &bytes)?;
    info!(file = %path.display(), %location, size = bytes.len(), "uploaded file");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Uploaded {}", name)));
    Ok(result.with_locations(vec![location]))
}
