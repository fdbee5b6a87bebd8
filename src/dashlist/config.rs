use crate::error::{DashError, Result};
use crate::model::EntityKind;
use crate::pager::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::warn;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_ACTIVE_WINDOW_DAYS: i64 = 30;

/// Configuration for dashlist, stored in `<data-dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashConfig {
    /// Page size a fresh view starts with
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// The only page sizes a view accepts
    #[serde(default = "default_page_sizes")]
    pub page_sizes: Vec<usize>,

    /// Days of inactivity after which a user no longer counts as active
    #[serde(default = "default_active_window_days")]
    pub active_window_days: i64,

    /// Per-collection replacement for the built-in search fields
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub search_fields: BTreeMap<String, Vec<String>>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_page_sizes() -> Vec<usize> {
    vec![20, 50, 100]
}

fn default_active_window_days() -> i64 {
    DEFAULT_ACTIVE_WINDOW_DAYS
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            page_sizes: default_page_sizes(),
            active_window_days: DEFAULT_ACTIVE_WINDOW_DAYS,
            search_fields: BTreeMap::new(),
        }
    }
}

impl DashConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: DashConfig = serde_json::from_str(&content)?;
        Ok(config.repaired())
    }

    /// Replace hand-edited values that would make every view unusable.
    fn repaired(mut self) -> Self {
        self.page_sizes.retain(|&size| size > 0);
        self.page_sizes.sort_unstable();
        self.page_sizes.dedup();
        if self.page_sizes.is_empty() {
            warn!("config: page-sizes is empty, using defaults");
            self.page_sizes = default_page_sizes();
        }
        if !self.page_sizes.contains(&self.default_page_size) {
            let fallback = if self.page_sizes.contains(&DEFAULT_PAGE_SIZE) {
                DEFAULT_PAGE_SIZE
            } else {
                self.page_sizes[0]
            };
            warn!(
                page_size = self.default_page_size,
                fallback, "config: page-size is not one of page-sizes"
            );
            self.default_page_size = fallback;
        }
        if self.active_window_days <= 0 {
            warn!(
                days = self.active_window_days,
                "config: active-window must be positive, using default"
            );
            self.active_window_days = DEFAULT_ACTIVE_WINDOW_DAYS;
        }
        self
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Search fields configured for a collection, if overridden.
    pub fn search_fields_for(&self, kind: EntityKind) -> Option<&[String]> {
        self.search_fields
            .get(kind.collection())
            .map(Vec::as_slice)
            .filter(|fields| !fields.is_empty())
    }

    pub fn keys() -> &'static [&'static str] {
        &["page-size", "page-sizes", "active-window"]
    }

    /// Formatted value of a kebab-case key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "page-size" => Some(self.default_page_size.to_string()),
            "page-sizes" => Some(
                self.page_sizes
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            "active-window" => Some(format!("{}d", self.active_window_days)),
            _ => None,
        }
    }

    /// Set a kebab-case key from user input, keeping the config consistent.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "page-size" => {
                let size = parse_positive(key, value)?;
                if !self.page_sizes.contains(&size) {
                    return Err(DashError::Api(format!(
                        "page-size {} is not one of page-sizes ({})",
                        size,
                        self.get("page-sizes").unwrap_or_default()
                    )));
                }
                self.default_page_size = size;
            }
            "page-sizes" => {
                let mut sizes = value
                    .split(',')
                    .map(|s| parse_positive(key, s))
                    .collect::<Result<Vec<_>>>()?;
                sizes.sort_unstable();
                sizes.dedup();
                if sizes.is_empty() {
                    return Err(DashError::Api("page-sizes cannot be empty".into()));
                }
                if !sizes.contains(&self.default_page_size) {
                    self.default_page_size = sizes[0];
                }
                self.page_sizes = sizes;
            }
            "active-window" => {
                let days = value.trim().trim_end_matches('d');
                self.active_window_days = i64::try_from(parse_positive(key, days)?)
                    .map_err(|_| DashError::Api(format!("{} is out of range: '{}'", key, days)))?;
            }
            other => {
                return Err(DashError::Api(format!("Unknown config key: {}", other)));
            }
        }
        Ok(())
    }
}

fn parse_positive(key: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(DashError::Api(format!(
            "{} expects a positive number, got '{}'",
            key,
            value.trim()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = DashConfig::default();
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.page_sizes, vec![20, 50, 100]);
        assert_eq!(config.active_window_days, 30);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = DashConfig::load(dir.path().join("nope")).unwrap();
        assert_eq!(config, DashConfig::default());
    }

    #[test]
    fn test_load_repairs_inconsistent_page_sizes() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"default_page_size": 30, "page_sizes": [], "active_window_days": -5}"#,
        )
        .unwrap();
        let config = DashConfig::load(dir.path()).unwrap();
        assert_eq!(config.page_sizes, vec![20, 50, 100]);
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.active_window_days, 30);

        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"default_page_size": 30, "page_sizes": [50, 0, 10, 50]}"#,
        )
        .unwrap();
        let config = DashConfig::load(dir.path()).unwrap();
        assert_eq!(config.page_sizes, vec![10, 50]);
        assert_eq!(config.default_page_size, 10);
    }

    #[test]
    fn test_active_window_out_of_range() {
        let mut config = DashConfig::default();
        let huge = usize::MAX.to_string();
        assert!(config.set("active-window", &huge).is_err());
        assert_eq!(config.active_window_days, 30);
        config.set("active-window", "90d").unwrap();
        assert_eq!(config.active_window_days, 90);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut config = DashConfig::default();
        config.set("page-size", "50").unwrap();
        config
            .search_fields
            .insert("users".into(), vec!["email".into()]);
        config.save(dir.path()).unwrap();

        let loaded = DashConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.search_fields_for(EntityKind::User),
            Some(&["email".to_string()][..])
        );
        assert_eq!(loaded.search_fields_for(EntityKind::Blog), None);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"active_window_days": 7}"#).unwrap();
        let config = DashConfig::load(dir.path()).unwrap();
        assert_eq!(config.active_window_days, 7);
        assert_eq!(config.default_page_size, 20);
    }

    #[test]
    fn test_page_size_must_be_allowed() {
        let mut config = DashConfig::default();
        assert!(config.set("page-size", "30").is_err());
        assert!(config.set("page-size", "0").is_err());
        assert_eq!(config.default_page_size, 20);
    }

    #[test]
    fn test_page_sizes_reset_default_when_needed() {
        let mut config = DashConfig::default();
        config.set("page-sizes", "100, 10,10").unwrap();
        assert_eq!(config.page_sizes, vec![10, 100]);
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.get("page-sizes").as_deref(), Some("10,100"));
    }

    #[test]
    fn test_active_window_accepts_day_suffix() {
        let mut config = DashConfig::default();
        config.set("active-window", "14d").unwrap();
        assert_eq!(config.active_window_days, 14);
        assert_eq!(config.get("active-window").as_deref(), Some("14d"));
    }

    #[test]
    fn test_unknown_key() {
        let mut config = DashConfig::default();
        assert!(config.get("file-ext").is_none());
        assert!(config.set("file-ext", ".md").is_err());
    }
}
