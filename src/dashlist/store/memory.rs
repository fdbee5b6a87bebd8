use super::{sanitize_file_name, DataStore};
use crate::error::{DashError, Result};
use crate::model::{EntityKind, Fields, Record};
use std::cell::RefCell;
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory storage for testing.
///
/// Uses `RefCell` for interior mutability since the engine is single-threaded;
/// this lets the fetch-error switch be flipped through `&self`.
#[derive(Default)]
pub struct InMemoryStore {
    collections: HashMap<EntityKind, Vec<Record>>,
    uploads: HashMap<String, Vec<u8>>,
    simulate_fetch_error: RefCell<bool>,
    fetch_count: RefCell<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a whole collection, keeping the given order.
    pub fn with_records(mut self, kind: EntityKind, records: Vec<Record>) -> Self {
        self.collections.insert(kind, records);
        self
    }

    /// Make every subsequent `fetch_all` fail.
    pub fn set_simulate_fetch_error(&self, simulate: bool) {
        *self.simulate_fetch_error.borrow_mut() = simulate;
    }

    /// Number of `fetch_all` calls served so far.
    pub fn fetch_count(&self) -> usize {
        *self.fetch_count.borrow()
    }

    pub fn uploaded(&self, location: &str) -> Option<&[u8]> {
        self.uploads.get(location).map(Vec::as_slice)
    }

    fn collection_mut(&mut self, kind: EntityKind) -> &mut Vec<Record> {
        self.collections.entry(kind).or_default()
    }

    fn not_found(kind: EntityKind, id: &str) -> DashError {
        DashError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl DataStore for InMemoryStore {
    fn fetch_all(&self, kind: EntityKind) -> Result<Vec<Record>> {
        *self.fetch_count.borrow_mut() += 1;
        if *self.simulate_fetch_error.borrow() {
            return Err(DashError::Fetch(format!(
                "simulated failure fetching {}",
                kind
            )));
        }
        Ok(self.collections.get(&kind).cloned().unwrap_or_default())
    }

    fn create(&mut self, kind: EntityKind, fields: Fields) -> Result<Record> {
        let record = Record::new(fields);
        self.collection_mut(kind).push(record.clone());
        Ok(record)
    }

    fn update(&mut self, kind: EntityKind, id: &str, patch: Fields) -> Result<Record> {
        let record = self
            .collection_mut(kind)
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Self::not_found(kind, id))?;
        record.apply_patch(patch);
        Ok(record.clone())
    }

    fn delete(&mut self, kind: EntityKind, id: &str) -> Result<()> {
        let records = self.collection_mut(kind);
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(Self::not_found(kind, id));
        }
        Ok(())
    }

    fn upload_file(&mut self, name: &str, bytes: &[u8]) -> Result<String> {
        let location = format!(
            "memory://uploads/{}-{}",
            Uuid::new_v4(),
            sanitize_file_name(name)
        );
        self.uploads.insert(location.clone(), bytes.to_vec());
        Ok(location)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::{TimeDelta, Utc};
    use serde_json::json;

    /// Builds a store populated with dashboard-shaped records.
    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// `count` users; every user whose number is in `admins` gets the admin role.
        /// User `n` logged in `n` days ago.
        pub fn with_users(mut self, count: usize, admins: &[usize]) -> Self {
            let users = (1..=count)
                .map(|n| {
                    let role = if admins.contains(&n) { "admin" } else { "user" };
                    user(n, role, Some(n as i64))
                })
                .collect();
            self.store = self.store.with_records(EntityKind::User, users);
            self
        }

        pub fn with_record(mut self, kind: EntityKind, record: Record) -> Self {
            self.store.collection_mut(kind).push(record);
            self
        }
    }

    /// A user record in the shape the dashboard stores them.
    pub fn user(n: usize, role: &str, last_login_days_ago: Option<i64>) -> Record {
        let mut fields = Fields::new();
        fields.insert("name".into(), json!(format!("User {}", n)));
        fields.insert("displayName".into(), json!(format!("user{}", n)));
        fields.insert("email".into(), json!(format!("user{}@example.com", n)));
        fields.insert("role".into(), json!(role));
        fields.insert("packageSub".into(), json!(if n % 2 == 0 { "premium" } else { "free" }));
        let created = Utc::now() - TimeDelta::days(1000 - n as i64);
        fields.insert("createdAt".into(), json!(created.to_rfc3339()));
        if let Some(days) = last_login_days_ago {
            let seconds = (Utc::now() - TimeDelta::days(days)).timestamp();
            fields.insert(
                "lastLogin".into(),
                json!({"seconds": seconds, "nanoseconds": 0}),
            );
        }
        Record::with_id(format!("user-{:03}", n), fields)
    }
}
