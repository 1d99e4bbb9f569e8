//! Platform key-value store for dashboard preferences.
//!
//! - **Web** (WASM + `web` feature): browser `localStorage`
//! - **Native**: one JSON file per key under `<data_dir>/deal-dashboard/`

use store::PreferencesRepo;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStorageStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStore = store::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = store::FileStore;

pub fn platform_store() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new()
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        store::FileStore::new(store::FileStore::default_dir(dirs::data_dir().as_deref()))
    }
}

/// Preferences repository scoped to an optional user id.
pub fn preferences_for(user_id: Option<&str>) -> PreferencesRepo<PlatformStore> {
    PreferencesRepo::for_user(platform_store(), user_id)
}
