use crate::core::{ColumnDescriptor, KeyValueStore};
use crate::utils::error::{Result, TableError};
use serde_json::{Map, Value};

pub const DEFAULT_COLUMNS_KEY: &str = "visibleColumns";

/// Ordered column list with per-column visibility.
///
/// Every mutation is written through to the key-value store as a JSON
/// object (`{"name": true, "age": false, ...}`) in registry order.
pub struct ColumnRegistry<K: KeyValueStore> {
    columns: Vec<ColumnDescriptor>,
    store: K,
    key: String,
}

impl<K: KeyValueStore> ColumnRegistry<K> {
    /// Restores the registry from `store`, or derives it from `fallback_names`
    /// (all visible) when nothing usable is stored.
    pub fn load(store: K, key: impl Into<String>, fallback_names: &[String]) -> Self {
        let key = key.into();
        let restored = match store.load(&key) {
            Ok(Some(raw)) => match decode_columns(&raw) {
                Ok(columns) => {
                    tracing::debug!("Restored {} column settings from '{}'", columns.len(), key);
                    Some(columns)
                }
                Err(e) => {
                    tracing::warn!("Ignoring stored column settings under '{}': {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Could not read column settings: {}", e);
                None
            }
        };

        let columns = restored.unwrap_or_else(|| {
            fallback_names
                .iter()
                .map(|name| ColumnDescriptor::new(name.clone(), true))
                .collect()
        });

        Self {
            columns,
            store,
            key,
        }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn visible_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.visible)
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name && c.visible)
    }

    /// The flag only changes once the new list has been saved.
    pub fn set_visibility(&mut self, name: &str, visible: bool) -> Result<()> {
        if !self.contains(name) {
            return Err(TableError::UnknownColumn {
                name: name.to_string(),
            });
        }

        let candidate: Vec<ColumnDescriptor> = self
            .columns
            .iter()
            .map(|c| {
                if c.name == name {
                    ColumnDescriptor::new(c.name.clone(), visible)
                } else {
                    c.clone()
                }
            })
            .collect();
        self.commit(candidate)?;
        tracing::debug!("Column '{}' visible = {}", name, visible);
        Ok(())
    }

    /// Flips visibility and returns the new flag.
    pub fn toggle(&mut self, name: &str) -> Result<bool> {
        let visible = !self.is_visible(name);
        self.set_visibility(name, visible)?;
        Ok(visible)
    }

    /// Rebuilds the list from `names`; known columns keep their flag, new
    /// ones start visible, names no longer present are dropped.
    pub fn resync(&mut self, names: &[String]) -> Result<()> {
        let columns = names
            .iter()
            .map(|name| {
                let visible = self
                    .columns
                    .iter()
                    .find(|c| &c.name == name)
                    .map(|c| c.visible)
                    .unwrap_or(true);
                ColumnDescriptor::new(name.clone(), visible)
            })
            .collect();
        self.commit(columns)?;
        tracing::info!("Column registry resynchronized to {} columns", self.columns.len());
        Ok(())
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    /// 先寫入 store，成功後才替換記憶體中的欄位
    fn commit(&mut self, candidate: Vec<ColumnDescriptor>) -> Result<()> {
        let encoded = encode_columns(&candidate)?;
        self.store.save(&self.key, &encoded)?;
        self.columns = candidate;
        Ok(())
    }
}

pub fn encode_columns(columns: &[ColumnDescriptor]) -> Result<String> {
    let mut map = Map::new();
    for column in columns {
        map.insert(column.name.clone(), Value::Bool(column.visible));
    }
    Ok(serde_json::to_string(&map)?)
}

pub fn decode_columns(raw: &str) -> Result<Vec<ColumnDescriptor>> {
    let map: Map<String, Value> = serde_json::from_str(raw)?;
    map.into_iter()
        .map(|(name, value)| match value {
            Value::Bool(visible) => Ok(ColumnDescriptor::new(name, visible)),
            other => Err(TableError::StoreError {
                message: format!("column '{}' has non-boolean visibility {}", name, other),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::kv_store::MemoryStore;
    use crate::domain::seed::SEED_COLUMNS;

    fn seed_names() -> Vec<String> {
        SEED_COLUMNS.iter().map(|s| s.to_string()).collect()
    }

    /// 讀取正常、寫入一律失敗的 store
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn load(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn save(&self, _key: &str, _value: &str) -> Result<()> {
            Err(TableError::StoreError {
                message: "disk full".to_string(),
            })
        }
    }

    #[test]
    fn test_derives_all_visible_when_store_empty() {
        let registry = ColumnRegistry::load(MemoryStore::new(), DEFAULT_COLUMNS_KEY, &seed_names());
        assert_eq!(registry.visible_names(), seed_names());
        assert!(registry.columns().iter().all(|c| c.visible));
    }

    #[test]
    fn test_toggle_writes_through() {
        let store = MemoryStore::new();
        let mut registry = ColumnRegistry::load(store.clone(), DEFAULT_COLUMNS_KEY, &seed_names());

        assert!(!registry.toggle("age").unwrap());
        assert!(!registry.is_visible("age"));
        assert_eq!(
            store.load(DEFAULT_COLUMNS_KEY).unwrap().unwrap(),
            r#"{"name":true,"email":true,"age":false,"role":true,"department":true,"location":true}"#
        );

        assert!(registry.toggle("age").unwrap());
        assert!(registry.is_visible("age"));
    }

    #[test]
    fn test_restores_order_and_flags() {
        let store = MemoryStore::new();
        store
            .save(DEFAULT_COLUMNS_KEY, r#"{"location":true,"name":false,"age":true}"#)
            .unwrap();

        let registry = ColumnRegistry::load(store, DEFAULT_COLUMNS_KEY, &seed_names());
        assert_eq!(registry.names(), vec!["location", "name", "age"]);
        assert_eq!(registry.visible_names(), vec!["location", "age"]);
    }

    #[test]
    fn test_unknown_column_is_rejected_without_change() {
        let store = MemoryStore::new();
        let mut registry = ColumnRegistry::load(store.clone(), DEFAULT_COLUMNS_KEY, &seed_names());

        let err = registry.set_visibility("salary", false).unwrap_err();
        assert!(matches!(err, TableError::UnknownColumn { ref name } if name == "salary"));
        assert_eq!(registry.visible_names(), seed_names());
        assert!(store.load(DEFAULT_COLUMNS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_entry_falls_back_to_fallback_names() {
        let store = MemoryStore::new();
        store.save(DEFAULT_COLUMNS_KEY, "not json").unwrap();
        let registry = ColumnRegistry::load(store.clone(), DEFAULT_COLUMNS_KEY, &seed_names());
        assert_eq!(registry.names(), seed_names());

        store.save(DEFAULT_COLUMNS_KEY, r#"{"name":"yes"}"#).unwrap();
        let registry = ColumnRegistry::load(store, DEFAULT_COLUMNS_KEY, &seed_names());
        assert_eq!(registry.names(), seed_names());
    }

    #[test]
    fn test_resync_keeps_known_flags() {
        let store = MemoryStore::new();
        let mut registry = ColumnRegistry::load(store.clone(), DEFAULT_COLUMNS_KEY, &seed_names());
        registry.set_visibility("email", false).unwrap();

        let imported = vec!["name".to_string(), "email".to_string(), "team".to_string()];
        registry.resync(&imported).unwrap();

        assert_eq!(registry.names(), imported);
        assert_eq!(registry.visible_names(), vec!["name", "team"]);
        assert_eq!(
            store.load(DEFAULT_COLUMNS_KEY).unwrap().unwrap(),
            r#"{"name":true,"email":false,"team":true}"#
        );
    }

    #[test]
    fn test_failed_save_leaves_visibility_unchanged() {
        let mut registry = ColumnRegistry::load(FailingStore, DEFAULT_COLUMNS_KEY, &seed_names());

        let err = registry.toggle("age").unwrap_err();
        assert!(matches!(err, TableError::StoreError { .. }));
        assert!(registry.is_visible("age"));

        assert!(registry.set_visibility("email", false).is_err());
        assert_eq!(registry.visible_names(), seed_names());
    }

    #[test]
    fn test_failed_save_leaves_resync_unapplied() {
        let mut registry = ColumnRegistry::load(FailingStore, DEFAULT_COLUMNS_KEY, &seed_names());

        let imported = vec!["name".to_string(), "team".to_string()];
        assert!(registry.resync(&imported).is_err());
        assert_eq!(registry.names(), seed_names());
    }
}
