//! Authentication context and hooks for the UI.

use api::UserInfo;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};

/// Who is signed in, once the session check has finished.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn signed_in(user: UserInfo) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    pub fn user_id(&self) -> Option<String> {
        self.user.as_ref().map(|u| u.id.clone())
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    let _ = use_resource(move || async move {
        match api::get_current_user().await {
            Ok(user) => auth_state.set(AuthState {
                user,
                loading: false,
            }),
            Err(e) => {
                tracing::warn!("session check failed: {e}");
                auth_state.set(AuthState::signed_out());
            }
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Renders `children` only for a signed-in user. Anonymous visitors trigger
/// `on_unauthenticated` once the session check completes.
#[component]
pub fn RequireAuth(on_unauthenticated: EventHandler<()>, children: Element) -> Element {
    let auth = use_auth();

    use_effect(move || {
        let state = auth();
        if !state.loading && state.user.is_none() {
            on_unauthenticated.call(());
        }
    });

    let state = auth();
    if state.loading {
        return rsx! {
            div { class: "page-loading", "Loading..." }
        };
    }
    if state.user.is_none() {
        return rsx! {};
    }

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default)] class: String,
    on_logged_out: EventHandler<()>,
) -> Element {
    let mut auth_state = use_auth();
    let toast = crate::use_toast();

    let onclick = move |_| async move {
        match api::logout().await {
            Ok(()) => {
                auth_state.set(AuthState::signed_out());
                toast.success("Logged out");
                on_logged_out.call(());
            }
            Err(e) => toast.error_with("Logout failed", e),
        }
    };

    rsx! {
        Button {
            variant: ButtonVariant::Ghost,
            class,
            onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo {
            id: "42".to_string(),
            email: "jane@example.com".to_string(),
            name: Some("Jane Doe".to_string()),
            member_since: None,
        }
    }

    #[test]
    fn starts_loading_without_user() {
        let state = AuthState::default();
        assert!(state.loading);
        assert_eq!(state.user_id(), None);
    }

    #[test]
    fn signed_in_exposes_user_id() {
        let state = AuthState::signed_in(user());
        assert!(!state.loading);
        assert_eq!(state.user_id().as_deref(), Some("42"));
    }

    #[test]
    fn signed_out_is_settled() {
        assert_eq!(
            AuthState::signed_out(),
            AuthState {
                user: None,
                loading: false
            }
        );
    }
}
