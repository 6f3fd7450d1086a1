use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::PersistenceResult;

/// String key/value store abstraction the snapshot repository sits on.
///
/// Values are whole JSON documents; implementations never need partial
/// updates.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> PersistenceResult<()>;
    fn remove(&self, key: &str) -> PersistenceResult<()>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> PersistenceResult<()> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> PersistenceResult<()> {
        (**self).remove(key)
    }
}

/// In-memory store for tests/dev.
#[derive(Debug)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return Ok(None),
        };
        Ok(map.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> PersistenceResult<()> {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> PersistenceResult<()> {
        if let Ok(mut map) = self.inner.write() {
            map.remove(key);
        }
        Ok(())
    }
}
