//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every dashlist operation, whatever the UI.
//!
//! It dispatches to `commands/*.rs`, loads configuration where a command
//! needs it, and returns structured `Result<CmdResult>` values. It never
//! prints and never formats.
//!
//! ## Generic Over DataStore
//!
//! `DashApi<S: DataStore>` is generic over the storage backend:
//! - Production: `DashApi<FileStore>`
//! - Testing: `DashApi<InMemoryStore>`
//!
//! ## Interactive views
//!
//! [`DashApi::controller`] hands out a [`ViewController`] configured the same
//! way `list` configures its own, for UIs that keep a view alive across
//! keystrokes instead of issuing one `list` call per interaction.

use crate::commands;
use crate::config::DashConfig;
use crate::error::Result;
use crate::model::{EntityKind, Fields};
use crate::store::DataStore;
use crate::view::ViewController;
use std::path::{Path, PathBuf};

/// The main API facade for dashlist operations.
pub struct DashApi<S: DataStore> {
    store: S,
    config_dir: PathBuf,
}

impl<S: DataStore> DashApi<S> {
    pub fn new(store: S, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            config_dir: config_dir.into(),
        }
    }

    pub fn list(&self, kind: EntityKind, query: ListQuery) -> Result<commands::CmdResult> {
        let config = self.load_config()?;
        commands::list::run(&self.store, &config, kind, query)
    }

    pub fn view<I: AsRef<str>>(&self, kind: EntityKind, ids: &[I]) -> Result<commands::CmdResult> {
        commands::view::run(&self.store, kind, ids)
    }

    pub fn create(&mut self, kind: EntityKind, fields: Fields) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, kind, fields)
    }

    pub fn update(
        &mut self,
        kind: EntityKind,
        id: &str,
        patch: Fields,
    ) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, kind, id, patch)
    }

    pub fn delete<I: AsRef<str>>(
        &mut self,
        kind: EntityKind,
        ids: &[I],
    ) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, kind, ids)
    }

    pub fn upload(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::upload::run(&mut self.store, path)
    }

    pub fn facets(&self, kind: EntityKind, field: &str) -> Result<commands::CmdResult> {
        commands::facets::run(&self.store, kind, field)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    /// A loaded view over `kind`, ready for interactive state changes.
    pub fn controller(&self, kind: EntityKind) -> Result<ViewController> {
        let config = self.load_config()?;
        let mut view = commands::helpers::build_controller(&config, kind)?;
        view.refresh(&self.store)?;
        Ok(view)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load_config(&self) -> Result<DashConfig> {
        DashConfig::load(&self.config_dir)
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::list::{Activity, ListQuery};
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashError;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;
    use tempfile::TempDir;

    fn api_with_users(count: usize) -> (DashApi<InMemoryStore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = StoreFixture::new().with_users(count, &[1]).store;
        (DashApi::new(store, dir.path()), dir)
    }

    #[test]
    fn list_reads_page_size_from_config() {
        let (api, _dir) = api_with_users(60);
        api.config(ConfigAction::Set("page-size".into(), "50".into()))
            .unwrap();
        let page = api.list(EntityKind::User, ListQuery::default()).unwrap().page.unwrap();
        assert_eq!(page.page_size, 50);
        assert_eq!(page.items.len(), 50);
    }

    #[test]
    fn list_survives_hand_edited_config() {
        let (api, dir) = api_with_users(5);
        std::fs::write(
            dir.path().join("config.json"),
            r#"{"default_page_size": 7, "page_sizes": []}"#,
        )
        .unwrap();
        let page = api.list(EntityKind::User, ListQuery::default()).unwrap().page.unwrap();
        assert_eq!(page.page_size, 20);
        assert_eq!(page.total_count, 5);
    }

    #[test]
    fn mutations_dispatch_to_store() {
        let (mut api, _dir) = api_with_users(1);
        let mut fields = Fields::new();
        fields.insert("name".into(), json!("Second"));
        let created = api.create(EntityKind::User, fields).unwrap().records.remove(0);

        let mut patch = Fields::new();
        patch.insert("role".into(), json!("admin"));
        api.update(EntityKind::User, &created.id, patch).unwrap();
        assert_eq!(
            api.view(EntityKind::User, &[created.id.as_str()]).unwrap().records[0]
                .text("role")
                .as_deref(),
            Some("admin")
        );

        api.delete(EntityKind::User, &[created.id.as_str()]).unwrap();
        assert!(matches!(
            api.view(EntityKind::User, &[created.id.as_str()]),
            Err(DashError::NotFound { .. })
        ));
    }

    #[test]
    fn facets_dispatch() {
        let (api, _dir) = api_with_users(3);
        let result = api.facets(EntityKind::User, "role").unwrap();
        assert_eq!(result.facets, vec!["admin", "user"]);
    }

    #[test]
    fn controller_is_loaded() {
        let (api, _dir) = api_with_users(30);
        let mut view = api.controller(EntityKind::User).unwrap();
        assert_eq!(view.get_view().unwrap().total_count, 30);
        view.set_page(2).unwrap();
        assert_eq!(view.get_view().unwrap().items.len(), 10);
        assert_eq!(api.store().fetch_count(), 1);
    }
}
