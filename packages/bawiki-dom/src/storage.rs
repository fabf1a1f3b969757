use std::collections::HashMap;

/// In-memory stand-in for the browser's local storage.
///
/// The preparation scripts force a handful of page settings (locale,
/// dismissed dialogs) through here; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    map: HashMap<String, String>,
}

impl LocalStorage {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.map.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.map.remove(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
