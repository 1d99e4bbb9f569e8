pub mod board;
pub mod config;
pub mod format;
pub mod models;
pub mod prefs;
pub mod sample;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use board::{DealBoard, PipelineStats, SortKey, SortOrder, SortState, StageMove};
pub use config::DashboardConfig;
pub use models::{Client, Deal, DealStage, DealUpdate, NewDeal, Product, StageInfo};
pub use prefs::{
    DashboardPreferences, KanbanField, KanbanFields, KeyValueStore, PreferencesRepo, StoreError,
    TableColumn, TableColumns, Theme, ViewMode,
};
