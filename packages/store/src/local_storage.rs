//! # Browser local storage backend
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the web platform. It
//! wraps `window.localStorage` through `web-sys`. Private browsing modes may
//! deny access; reads then return `None` and writes report
//! [`StoreError::Unavailable`].

use web_sys::Storage;

use crate::prefs::{KeyValueStore, StoreError};

/// `window.localStorage`-backed KeyValueStore.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|_| StoreError::Unavailable("localStorage access denied".to_string()))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorageStore {
    async fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok()?
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, &value)
            .map_err(|_| StoreError::Unavailable("localStorage quota exceeded".to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|_| StoreError::Unavailable("localStorage write denied".to_string()))
    }
}
