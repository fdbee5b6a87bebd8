//! # Storage Layer
//!
//! The dashboard's backend is a document store plus object storage. This module
//! reduces it to the [`DataStore`] port: fetch a whole collection, read, create,
//! update and delete single records, and upload a file.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON files on disk
//!   - one `<collection>.json` array per [`EntityKind`]
//!   - uploads copied into `uploads/`
//!
//! - [`memory::InMemoryStore`]: in-memory storage for testing
//!   - can simulate fetch failures
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <data-dir>/
//! ├── users.json          # [{"id": "...", "name": "...", ...}, ...]
//! ├── blogs.json
//! ├── content.json
//! ├── employees.json
//! ├── uploads/            # uploaded files: <uuid>-<name>
//! └── config.json         # DashConfig
//! ```
//!
//! The view engine never talks to a store directly; it only consumes the
//! records a store returned.

use crate::error::{DashError, Result};
use crate::model::{EntityKind, Fields, Record};

pub mod fs;
pub mod memory;

/// Abstract interface to the record backend.
pub trait DataStore {
    /// Complete current record set of a collection, in stored order.
    fn fetch_all(&self, kind: EntityKind) -> Result<Vec<Record>>;

    /// A single record by id.
    fn get(&self, kind: EntityKind, id: &str) -> Result<Record> {
        self.fetch_all(kind)?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| DashError::NotFound {
                kind,
                id: id.to_string(),
            })
    }

    /// Insert a new record; the store assigns id and timestamps.
    fn create(&mut self, kind: EntityKind, fields: Fields) -> Result<Record>;

    /// Merge `patch` into an existing record.
    fn update(&mut self, kind: EntityKind, id: &str, patch: Fields) -> Result<Record>;

    /// Remove a record permanently.
    fn delete(&mut self, kind: EntityKind, id: &str) -> Result<()>;

    /// Store a file and return where it can be found.
    fn upload_file(&mut self, name: &str, bytes: &[u8]) -> Result<String>;
}

/// Keep only the final path component of an upload name.
pub(crate) fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
    if base.is_empty() || base == "." || base == ".." {
        "upload".to_string()
    } else {
        base.to_string()
    }
}
