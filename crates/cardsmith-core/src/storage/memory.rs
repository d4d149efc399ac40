//! In-memory template store.

use super::{BoxFuture, StorageError, StorageResult, TemplateStore};
use crate::template::PersistedTemplate;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    templates: RwLock<HashMap<String, PersistedTemplate>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl TemplateStore for MemoryStore {
    fn save(&self, id: &str, template: &PersistedTemplate) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let template = template.clone();
        Box::pin(async move {
            let mut templates = self.templates.write().map_err(lock_error)?;
            templates.insert(id, template);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<PersistedTemplate>> {
        let id = id.to_string();
        Box::pin(async move {
            let templates = self.templates.read().map_err(lock_error)?;
            templates.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut templates = self.templates.write().map_err(lock_error)?;
            templates.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let templates = self.templates.read().map_err(lock_error)?;
            let mut ids: Vec<String> = templates.keys().cloned().collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move {
            let templates = self.templates.read().map_err(lock_error)?;
            Ok(templates.contains_key(&id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::{Side, Zone, ZoneKind};
    use pollster::block_on;

    fn template() -> PersistedTemplate {
        PersistedTemplate {
            zones: vec![Zone::new(ZoneKind::StudentName, Side::Front)],
            ..Default::default()
        }
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        let saved = template();

        block_on(store.save("card", &saved)).unwrap();
        let loaded = block_on(store.load("card")).unwrap();
        assert_eq!(saved, loaded);
    }

    #[test]
    fn test_not_found() {
        let store = MemoryStore::new();
        let result = block_on(store.load("missing"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_delete_and_exists() {
        let store = MemoryStore::new();
        assert!(!block_on(store.exists("card")).unwrap());
        block_on(store.save("card", &template())).unwrap();
        assert!(block_on(store.exists("card")).unwrap());
        block_on(store.delete("card")).unwrap();
        assert!(!block_on(store.exists("card")).unwrap());
    }

    #[test]
    fn test_list_sorted() {
        let store = MemoryStore::new();
        block_on(store.save("b", &template())).unwrap();
        block_on(store.save("a", &template())).unwrap();
        assert_eq!(block_on(store.list()).unwrap(), vec!["a", "b"]);
    }
}
