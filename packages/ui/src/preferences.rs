//! Per-user dashboard preferences held in a signal and mirrored to storage.
//!
//! The signal changes first so the view reacts immediately; persisting runs
//! in a spawned task and only logs on failure.

use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use store::{DashboardPreferences, KanbanField, TableColumn, Theme, ViewMode};

use crate::storage::preferences_for;
use crate::theme::apply_theme;
use crate::use_auth;

#[derive(Clone, Copy, PartialEq)]
pub struct Preferences {
    prefs: Signal<DashboardPreferences>,
    user_id: Memo<Option<String>>,
}

impl Preferences {
    pub fn get(&self) -> DashboardPreferences {
        (self.prefs)()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.prefs.read().view_mode
    }

    fn change(&self, edit: impl FnOnce(&mut DashboardPreferences)) {
        let mut prefs = self.prefs;
        edit(&mut *prefs.write());
        let snapshot = prefs.peek().clone();
        let user_id = self.user_id.peek().clone();
        spawn_forever(async move {
            preferences_for(user_id.as_deref()).save(&snapshot).await;
        });
    }

    pub fn set_view_mode(&self, mode: ViewMode) {
        self.change(|p| p.view_mode = mode);
    }

    pub fn toggle_table_column(&self, column: TableColumn) {
        self.change(|p| p.table_columns.toggle(column));
    }

    pub fn toggle_kanban_field(&self, field: KanbanField) {
        self.change(|p| p.kanban_fields.toggle(field));
    }

    pub fn set_theme(&self, theme: Theme) {
        apply_theme(theme);
        self.change(|p| p.theme = theme);
    }

    /// Drop everything stored for this user and go back to the defaults.
    pub fn reset(&self) {
        let mut prefs = self.prefs;
        prefs.set(DashboardPreferences::default());
        apply_theme(Theme::default());
        let user_id = self.user_id.peek().clone();
        spawn_forever(async move {
            preferences_for(user_id.as_deref()).reset().await;
        });
    }
}

pub fn use_preferences() -> Preferences {
    use_context::<Preferences>()
}

/// Loads the signed-in user's preferences (or the anonymous ones) and
/// reloads them whenever the user changes.
#[component]
pub fn PreferencesProvider(children: Element) -> Element {
    let auth = use_auth();
    let user_id = use_memo(move || auth().user_id());
    let mut prefs = use_signal(DashboardPreferences::default);

    let _ = use_resource(move || async move {
        let id = user_id();
        let loaded = preferences_for(id.as_deref()).load().await;
        apply_theme(loaded.theme);
        prefs.set(loaded);
    });

    use_context_provider(|| Preferences { prefs, user_id });

    rsx! {
        {children}
    }
}
