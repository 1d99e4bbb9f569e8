//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`] that keeps one file per key under a
//! base directory. It is used on native targets so preferences survive
//! restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── <key>.json
//! ```
//!
//! Key characters outside `[A-Za-z0-9-]` are written as `_` plus the hex of
//! each UTF-8 byte, so distinct keys never share a file.
//!
//! Use [`FileStore::default_dir`] for a platform data directory
//! (`~/.local/share/deal-dashboard/` on Linux).

use std::path::{Path, PathBuf};

use crate::prefs::{KeyValueStore, StoreError};

/// Filesystem-backed KeyValueStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// `<data_dir>/deal-dashboard`, or `./deal-dashboard` when the platform
    /// has no data directory.
    pub fn default_dir(data_dir: Option<&Path>) -> PathBuf {
        data_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("deal-dashboard")
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        let mut buf = [0u8; 4];
        for c in key.chars() {
            if c.is_ascii_alphanumeric() || c == '-' {
                name.push(c);
                continue;
            }
            for byte in c.encode_utf8(&mut buf).bytes() {
                name.push('_');
                name.push_str(&hex::encode([byte]));
            }
        }
        self.base.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.entry_path(key)).ok()
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(self.entry_path(key), value)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.entry_path(key)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{PreferencesRepo, ViewMode};

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("deal_dashboard_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let repo = PreferencesRepo::for_user(FileStore::new(dir.clone()), Some("u/1"));
        repo.set_view_mode(ViewMode::Kanban).await;

        // Re-open from same directory
        let reopened = PreferencesRepo::for_user(FileStore::new(dir.clone()), Some("u/1"));
        assert_eq!(reopened.load().await.view_mode, ViewMode::Kanban);
        assert!(dir.join("vobb-dashboard-preferences-u_2f1.json").exists());

        reopened.reset().await;
        reopened.reset().await;
        assert_eq!(reopened.load().await.view_mode, ViewMode::Table);

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_entry_names_do_not_collide() {
        let store = FileStore::new(PathBuf::from("/prefs"));
        let slash = store.entry_path("u/1");
        let underscore = store.entry_path("u_1");
        assert_ne!(slash, underscore);
        assert_eq!(slash, PathBuf::from("/prefs/u_2f1.json"));
        assert_eq!(underscore, PathBuf::from("/prefs/u_5f1.json"));
        assert_eq!(store.entry_path("é"), PathBuf::from("/prefs/_c3_a9.json"));
        assert_eq!(store.entry_path("plain-key"), PathBuf::from("/prefs/plain-key.json"));
    }

    #[test]
    fn test_default_dir() {
        let dir = FileStore::default_dir(Some(Path::new("/data")));
        assert_eq!(dir, PathBuf::from("/data/deal-dashboard"));
        assert_eq!(FileStore::default_dir(None), PathBuf::from("./deal-dashboard"));
    }
}
