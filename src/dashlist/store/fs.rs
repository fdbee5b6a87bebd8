use super::{sanitize_file_name, DataStore};
use crate::error::{DashError, Result};
use crate::model::{EntityKind, Fields, Record};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

const UPLOADS_DIR: &str = "uploads";

/// JSON-file backed store: one array file per collection.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, kind: EntityKind) -> PathBuf {
        self.root.join(format!("{}.json", kind.collection()))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    fn load(&self, kind: EntityKind) -> Result<Vec<Record>> {
        let path = self.collection_path(kind);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records: Vec<Record> = serde_json::from_str(&content)?;
        debug!(path = %path.display(), count = records.len(), "loaded collection");
        Ok(records)
    }

    fn save(&self, kind: EntityKind, records: &[Record]) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let path = self.collection_path(kind);
        let content = serde_json::to_string_pretty(records)?;
        // Must be atomic: write a sibling, then rename over the original.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl DataStore for FileStore {
    fn fetch_all(&self, kind: EntityKind) -> Result<Vec<Record>> {
        self.load(kind)
            .map_err(|e| DashError::Fetch(format!("{}: {}", kind, e)))
    }

    fn create(&mut self, kind: EntityKind, fields: Fields) -> Result<Record> {
        let mut records = self.load(kind)?;
        let record = Record::new(fields);
        records.push(record.clone());
        self.save(kind, &records)?;
        Ok(record)
    }

    fn update(&mut self, kind: EntityKind, id: &str, patch: Fields) -> Result<Record> {
        let mut records = self.load(kind)?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DashError::NotFound {
                kind,
                id: id.to_string(),
            })?;
        record.apply_patch(patch);
        let updated = record.clone();
        self.save(kind, &records)?;
        Ok(updated)
    }

    fn delete(&mut self, kind: EntityKind, id: &str) -> Result<()> {
        let mut records = self.load(kind)?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(DashError::NotFound {
                kind,
                id: id.to_string(),
            });
        }
        self.save(kind, &records)
    }

    fn upload_file(&mut self, name: &str, bytes: &[u8]) -> Result<String> {
        let dir = self.root.join(UPLOADS_DIR);
        self.ensure_dir(&dir)?;
        let path = dir.join(format!("{}-{}", Uuid::new_v4(), sanitize_file_name(name)));
        fs::write(&path, bytes)?;
        Ok(path.display().to_string())
    }
}
