use api::validation::MIN_PASSWORD_LEN;
use dioxus::prelude::*;
use store::{Theme, ViewMode};

use crate::components::{Button, ButtonVariant, Input, Label};
use crate::deals::BackButton;
use crate::icons::{FaCircleHalfStroke, FaList, FaMoon, FaSun, FaTableColumns};
use crate::{use_auth, use_preferences, use_toast, Icon, LogoutButton};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Appearance, default view, stored preferences and account settings.
#[component]
pub fn SettingsView(on_back: EventHandler<()>, on_logged_out: EventHandler<()>) -> Element {
    let prefs = use_preferences();
    let auth = use_auth();
    let toast = use_toast();
    let mut confirm_reset = use_signal(|| false);

    let email = auth()
        .user
        .map(|u| u.email)
        .unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page narrow",
            BackButton { label: "Back to dashboard", onclick: on_back }
            h1 { class: "view-title", "Settings" }

            section {
                class: "card settings-section",
                h2 { class: "view-section-title", "Theme" }
                ThemeSelector {}
            }

            section {
                class: "card settings-section",
                h2 { class: "view-section-title", "Default view" }
                DefaultViewSelector {}
            }

            section {
                class: "card settings-section",
                h2 { class: "view-section-title", "Preferences" }
                p {
                    class: "view-muted",
                    "Column visibility, card details, view mode and theme are saved on this device for your account."
                }
                if confirm_reset() {
                    div {
                        class: "confirm-banner",
                        p { "Reset all dashboard preferences to their defaults?" }
                        div {
                            class: "confirm-actions",
                            Button {
                                variant: ButtonVariant::Outline,
                                onclick: move |_| confirm_reset.set(false),
                                "Cancel"
                            }
                            Button {
                                variant: ButtonVariant::Destructive,
                                onclick: move |_| {
                                    prefs.reset();
                                    confirm_reset.set(false);
                                    toast.success("Preferences cleared");
                                },
                                "Clear Preferences"
                            }
                        }
                    }
                } else {
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| confirm_reset.set(true),
                        "Clear Preferences"
                    }
                }
            }

            section {
                class: "card settings-section",
                h2 { class: "view-section-title", "Account" }
                p { class: "view-muted", "Signed in as {email}" }
                ChangePasswordForm {}
                div {
                    class: "settings-logout",
                    LogoutButton { label: "Log out", on_logged_out }
                }
            }
        }
    }
}

#[component]
fn ThemeSelector() -> Element {
    let prefs = use_preferences();
    let current = prefs.get().theme;

    let card_class = |theme: Theme| {
        if theme == current {
            "theme-card theme-card-active"
        } else {
            "theme-card"
        }
    };

    rsx! {
        div {
            class: "option-row",
            label {
                class: card_class(Theme::System),
                onclick: move |_| prefs.set_theme(Theme::System),
                Icon { icon: FaCircleHalfStroke, width: 14, height: 14 }
                span { "System" }
            }
            label {
                class: card_class(Theme::Light),
                onclick: move |_| prefs.set_theme(Theme::Light),
                Icon { icon: FaSun, width: 14, height: 14 }
                span { "Light" }
            }
            label {
                class: card_class(Theme::Dark),
                onclick: move |_| prefs.set_theme(Theme::Dark),
                Icon { icon: FaMoon, width: 14, height: 14 }
                span { "Dark" }
            }
        }
        p {
            class: "view-muted",
            "Choose how the dashboard appears. System follows your OS preference."
        }
    }
}

#[component]
fn DefaultViewSelector() -> Element {
    let prefs = use_preferences();
    let current = prefs.view_mode();

    let card_class = |mode: ViewMode| {
        if mode == current {
            "theme-card theme-card-active"
        } else {
            "theme-card"
        }
    };

    rsx! {
        div {
            class: "option-row",
            label {
                class: card_class(ViewMode::Table),
                onclick: move |_| prefs.set_view_mode(ViewMode::Table),
                Icon { icon: FaList, width: 14, height: 14 }
                span { "Table" }
            }
            label {
                class: card_class(ViewMode::Kanban),
                onclick: move |_| prefs.set_view_mode(ViewMode::Kanban),
                Icon { icon: FaTableColumns, width: 14, height: 14 }
                span { "Kanban" }
            }
        }
    }
}

#[component]
fn ChangePasswordForm() -> Element {
    let toast = use_toast();
    let mut current = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            if current().is_empty() {
                error.set(Some("Current password is required".to_string()));
                return;
            }
            if new_password().chars().count() < MIN_PASSWORD_LEN {
                error.set(Some(format!(
                    "Password must be at least {MIN_PASSWORD_LEN} characters"
                )));
                return;
            }
            if new_password() != confirm() {
                error.set(Some("Passwords must match".to_string()));
                return;
            }

            saving.set(true);
            match api::change_password(current(), new_password()).await {
                Ok(()) => {
                    current.set(String::new());
                    new_password.set(String::new());
                    confirm.set(String::new());
                    toast.success("Password updated");
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    rsx! {
        form {
            class: "password-form",
            onsubmit,
            div {
                class: "form-field",
                Label { html_for: "current-password", "Current password" }
                Input {
                    id: "current-password",
                    r#type: "password",
                    autocomplete: "current-password",
                    value: current(),
                    oninput: move |evt: FormEvent| current.set(evt.value()),
                }
            }
            div {
                class: "form-field",
                Label { html_for: "new-password", "New password" }
                Input {
                    id: "new-password",
                    r#type: "password",
                    autocomplete: "new-password",
                    value: new_password(),
                    oninput: move |evt: FormEvent| new_password.set(evt.value()),
                }
            }
            div {
                class: "form-field",
                Label { html_for: "confirm-new-password", "Confirm new password" }
                Input {
                    id: "confirm-new-password",
                    r#type: "password",
                    autocomplete: "new-password",
                    value: confirm(),
                    oninput: move |evt: FormEvent| confirm.set(evt.value()),
                }
            }
            if let Some(message) = error() {
                p { class: "field-error", "{message}" }
            }
            Button {
                r#type: "submit",
                disabled: saving(),
                if saving() { "Updating..." } else { "Change Password" }
            }
        }
    }
}
