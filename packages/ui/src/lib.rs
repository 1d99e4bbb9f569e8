//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub mod components;
pub use components::{use_toast, ToastProvider, Toasts};

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod storage;
pub use storage::{platform_store, preferences_for, PlatformStore};

mod theme;
pub use theme::apply_theme;

mod time;

mod hooks;
pub use hooks::use_debounced;

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton, RequireAuth};

mod preferences;
pub use preferences::{use_preferences, Preferences, PreferencesProvider};

pub mod deals;
pub use deals::{use_deals, DealsContext, DealsProvider};

mod navbar;
pub use navbar::{NavTab, Navbar};

pub mod views;

pub const DASHBOARD_CSS: Asset = asset!("/assets/dashboard.css");
