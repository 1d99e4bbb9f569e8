//! # Dashboard preferences and their persistence
//!
//! [`DashboardPreferences`] is the per-user view state that survives reloads:
//! table vs. Kanban, which table columns and card fields are visible, and the
//! colour theme. [`PreferencesRepo`] reads and writes it as JSON through any
//! [`KeyValueStore`]:
//!
//! | Backend | Platform |
//! |---------|----------|
//! | [`crate::MemoryStore`] | tests, native fallback |
//! | [`crate::FileStore`] | desktop / server-side rendering |
//! | `LocalStorageStore` | browser (`web` feature on wasm32) |
//!
//! ## Loading
//!
//! Stored JSON is decoded over the defaults: any field the stored document
//! lacks takes its default value, so older documents keep working after new
//! flags are added. A document that does not parse at all is ignored and the
//! defaults are returned.
//!
//! ## Saving
//!
//! Write failures are logged and swallowed. Preferences are a convenience; a
//! full or disabled local storage must never break the dashboard.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Base key under which preferences are stored.
pub const PREFERENCES_KEY: &str = "vobb-dashboard-preferences";

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Async string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Option<String>>;
    fn set(
        &self,
        key: &str,
        value: String,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = Result<(), StoreError>>;
}

/// How the deals pipeline is displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Table,
    Kanban,
}

/// Colour theme. `System` follows the OS preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    /// Value for the document's `data-theme` attribute, if any.
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            Theme::System => None,
            Theme::Light => Some("light"),
            Theme::Dark => Some("dark"),
        }
    }
}

/// A toggleable table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableColumn {
    ClientName,
    ProductName,
    DealStage,
    CreatedDate,
    Actions,
}

impl TableColumn {
    pub const ALL: [TableColumn; 5] = [
        TableColumn::ClientName,
        TableColumn::ProductName,
        TableColumn::DealStage,
        TableColumn::CreatedDate,
        TableColumn::Actions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TableColumn::ClientName => "Client Name",
            TableColumn::ProductName => "Product Name",
            TableColumn::DealStage => "Deal Stage",
            TableColumn::CreatedDate => "Created Date",
            TableColumn::Actions => "Actions",
        }
    }
}

impl fmt::Display for TableColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A toggleable field on a Kanban card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KanbanField {
    ClientName,
    ProductName,
    CreatedDate,
}

impl KanbanField {
    pub const ALL: [KanbanField; 3] = [
        KanbanField::ClientName,
        KanbanField::ProductName,
        KanbanField::CreatedDate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            KanbanField::ClientName => "Client Name",
            KanbanField::ProductName => "Product Name",
            KanbanField::CreatedDate => "Created Date",
        }
    }
}

fn visible() -> bool {
    true
}

/// Visibility of each table column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumns {
    #[serde(default = "visible")]
    pub client_name: bool,
    #[serde(default = "visible")]
    pub product_name: bool,
    #[serde(default = "visible")]
    pub deal_stage: bool,
    #[serde(default = "visible")]
    pub created_date: bool,
    #[serde(default = "visible")]
    pub actions: bool,
}

impl Default for TableColumns {
    fn default() -> Self {
        Self {
            client_name: true,
            product_name: true,
            deal_stage: true,
            created_date: true,
            actions: true,
        }
    }
}

impl TableColumns {
    pub fn is_visible(&self, column: TableColumn) -> bool {
        match column {
            TableColumn::ClientName => self.client_name,
            TableColumn::ProductName => self.product_name,
            TableColumn::DealStage => self.deal_stage,
            TableColumn::CreatedDate => self.created_date,
            TableColumn::Actions => self.actions,
        }
    }

    pub fn toggle(&mut self, column: TableColumn) {
        let flag = match column {
            TableColumn::ClientName => &mut self.client_name,
            TableColumn::ProductName => &mut self.product_name,
            TableColumn::DealStage => &mut self.deal_stage,
            TableColumn::CreatedDate => &mut self.created_date,
            TableColumn::Actions => &mut self.actions,
        };
        *flag = !*flag;
    }
}

/// Visibility of each Kanban card field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanFields {
    #[serde(default = "visible")]
    pub show_client_name: bool,
    #[serde(default = "visible")]
    pub show_product_name: bool,
    #[serde(default = "visible")]
    pub show_created_date: bool,
}

impl Default for KanbanFields {
    fn default() -> Self {
        Self {
            show_client_name: true,
            show_product_name: true,
            show_created_date: true,
        }
    }
}

impl KanbanFields {
    pub fn is_visible(&self, field: KanbanField) -> bool {
        match field {
            KanbanField::ClientName => self.show_client_name,
            KanbanField::ProductName => self.show_product_name,
            KanbanField::CreatedDate => self.show_created_date,
        }
    }

    pub fn toggle(&mut self, field: KanbanField) {
        let flag = match field {
            KanbanField::ClientName => &mut self.show_client_name,
            KanbanField::ProductName => &mut self.show_product_name,
            KanbanField::CreatedDate => &mut self.show_created_date,
        };
        *flag = !*flag;
    }
}

/// Everything the dashboard remembers about how a user likes to see deals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPreferences {
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default)]
    pub table_columns: TableColumns,
    #[serde(default, rename = "kanbanMetadata")]
    pub kanban_fields: KanbanFields,
    #[serde(default)]
    pub theme: Theme,
}

/// Storage key for an optional user scope.
///
/// - `Some("user-uuid")` → `"vobb-dashboard-preferences-user-uuid"`
/// - `None` → `"vobb-dashboard-preferences"`
pub fn preferences_key(user_id: Option<&str>) -> String {
    match user_id {
        Some(id) => format!("{PREFERENCES_KEY}-{id}"),
        None => PREFERENCES_KEY.to_string(),
    }
}

/// Reads and writes [`DashboardPreferences`] through a [`KeyValueStore`].
pub struct PreferencesRepo<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PreferencesRepo<S> {
    /// Repository for the unscoped (anonymous) preferences.
    pub fn new(store: S) -> Self {
        Self::for_user(store, None)
    }

    /// Repository scoped to `user_id`, so each user keeps their own view.
    pub fn for_user(store: S, user_id: Option<&str>) -> Self {
        Self {
            store,
            key: preferences_key(user_id),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored preferences merged over the defaults.
    pub async fn load(&self) -> DashboardPreferences {
        let Some(raw) = self.store.get(&self.key).await else {
            return DashboardPreferences::default();
        };
        match serde_json::from_str(&raw) {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!(key = %self.key, "ignoring unreadable preferences: {e}");
                DashboardPreferences::default()
            }
        }
    }

    pub async fn save(&self, prefs: &DashboardPreferences) {
        let json = match serde_json::to_string(prefs) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("failed to encode preferences: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, json).await {
            tracing::warn!(key = %self.key, "failed to save preferences: {e}");
        }
    }

    /// Load, apply `change`, save, and return the result.
    pub async fn update(&self, change: impl FnOnce(&mut DashboardPreferences)) -> DashboardPreferences {
        let mut prefs = self.load().await;
        change(&mut prefs);
        self.save(&prefs).await;
        prefs
    }

    pub async fn set_view_mode(&self, mode: ViewMode) -> DashboardPreferences {
        self.update(|prefs| prefs.view_mode = mode).await
    }

    pub async fn toggle_table_column(&self, column: TableColumn) -> DashboardPreferences {
        self.update(|prefs| prefs.table_columns.toggle(column)).await
    }

    pub async fn toggle_kanban_field(&self, field: KanbanField) -> DashboardPreferences {
        self.update(|prefs| prefs.kanban_fields.toggle(field)).await
    }

    pub async fn set_theme(&self, theme: Theme) -> DashboardPreferences {
        self.update(|prefs| prefs.theme = theme).await
    }

    /// Forget everything stored and return the defaults.
    pub async fn reset(&self) -> DashboardPreferences {
        if let Err(e) = self.store.remove(&self.key).await {
            tracing::warn!(key = %self.key, "failed to clear preferences: {e}");
        }
        DashboardPreferences::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[tokio::test]
    async fn test_defaults_when_nothing_stored() {
        let repo = PreferencesRepo::new(MemoryStore::new());
        let prefs = repo.load().await;
        assert_eq!(prefs, DashboardPreferences::default());
        assert_eq!(prefs.view_mode, ViewMode::Table);
        assert!(TableColumn::ALL.iter().all(|c| prefs.table_columns.is_visible(*c)));
        assert!(KanbanField::ALL.iter().all(|f| prefs.kanban_fields.is_visible(*f)));
    }

    #[tokio::test]
    async fn test_partial_document_merges_over_defaults() {
        let store = MemoryStore::new();
        store
            .set(
                PREFERENCES_KEY,
                r#"{"viewMode":"kanban","tableColumns":{"actions":false}}"#.to_string(),
            )
            .await
            .unwrap();
        let prefs = PreferencesRepo::new(store).load().await;
        assert_eq!(prefs.view_mode, ViewMode::Kanban);
        assert!(!prefs.table_columns.actions);
        assert!(prefs.table_columns.client_name);
        assert_eq!(prefs.kanban_fields, KanbanFields::default());
        assert_eq!(prefs.theme, Theme::System);
    }

    #[tokio::test]
    async fn test_corrupt_document_falls_back_to_defaults() {
        let store = MemoryStore::new();
        store.set(PREFERENCES_KEY, "{not json".to_string()).await.unwrap();
        let prefs = PreferencesRepo::new(store).load().await;
        assert_eq!(prefs, DashboardPreferences::default());
    }

    #[tokio::test]
    async fn test_toggles_persist() {
        let store = MemoryStore::new();
        let repo = PreferencesRepo::new(store.clone());

        repo.set_view_mode(ViewMode::Kanban).await;
        repo.toggle_table_column(TableColumn::CreatedDate).await;
        repo.toggle_kanban_field(KanbanField::ProductName).await;
        repo.set_theme(Theme::Dark).await;

        let reopened = PreferencesRepo::new(store.clone()).load().await;
        assert_eq!(reopened.view_mode, ViewMode::Kanban);
        assert!(!reopened.table_columns.created_date);
        assert!(!reopened.kanban_fields.show_product_name);
        assert_eq!(reopened.theme, Theme::Dark);

        let raw = store.get(PREFERENCES_KEY).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["viewMode"], "kanban");
        assert_eq!(json["kanbanMetadata"]["showProductName"], false);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores() {
        let repo = PreferencesRepo::new(MemoryStore::new());
        repo.toggle_table_column(TableColumn::Actions).await;
        let prefs = repo.toggle_table_column(TableColumn::Actions).await;
        assert!(prefs.table_columns.actions);
    }

    #[tokio::test]
    async fn test_user_scoping() {
        let store = MemoryStore::new();
        let alice = PreferencesRepo::for_user(store.clone(), Some("alice"));
        let bob = PreferencesRepo::for_user(store.clone(), Some("bob"));
        assert_eq!(alice.key(), "vobb-dashboard-preferences-alice");

        alice.set_view_mode(ViewMode::Kanban).await;
        assert_eq!(bob.load().await.view_mode, ViewMode::Table);
        assert_eq!(PreferencesRepo::new(store).load().await.view_mode, ViewMode::Table);
    }

    #[tokio::test]
    async fn test_reset_clears_storage() {
        let store = MemoryStore::new();
        let repo = PreferencesRepo::new(store.clone());
        repo.set_theme(Theme::Light).await;
        let prefs = repo.reset().await;
        assert_eq!(prefs, DashboardPreferences::default());
        assert!(store.get(PREFERENCES_KEY).await.is_none());
    }

    #[test]
    fn test_theme_attribute() {
        assert_eq!(Theme::System.attribute(), None);
        assert_eq!(Theme::Dark.attribute(), Some("dark"));
    }
}
