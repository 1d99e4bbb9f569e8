//! Sign-in and sign-up pages.

use dioxus::prelude::*;
use ui::use_auth;
use ui::views::{LoginView, RegisterView};

use crate::Route;

/// Send an already signed-in visitor to the dashboard.
fn use_redirect_signed_in() {
    let auth = use_auth();
    let nav = use_navigator();
    use_effect(move || {
        let state = auth();
        if !state.loading && state.user.is_some() {
            nav.replace(Route::Deals {});
        }
    });
}

#[component]
pub fn Login() -> Element {
    use_redirect_signed_in();
    let nav = use_navigator();

    rsx! {
        LoginView {
            on_success: move |_| {
                nav.replace(Route::Deals {});
            },
            on_register: move |_| {
                nav.push(Route::Signup {});
            },
        }
    }
}

#[component]
pub fn Signup() -> Element {
    use_redirect_signed_in();
    let nav = use_navigator();

    rsx! {
        RegisterView {
            on_success: move |_| {
                nav.replace(Route::Deals {});
            },
            on_login: move |_| {
                nav.push(Route::Login {});
            },
        }
    }
}
