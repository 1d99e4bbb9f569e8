use dioxus::prelude::*;
use ui::views::{ProfileView, SettingsView};

use crate::Route;

#[component]
pub fn Profile() -> Element {
    let nav = use_navigator();

    rsx! {
        ProfileView {
            on_back: move |_| {
                nav.push(Route::Deals {});
            },
        }
    }
}

#[component]
pub fn Settings() -> Element {
    let nav = use_navigator();

    rsx! {
        SettingsView {
            on_back: move |_| {
                nav.push(Route::Deals {});
            },
            on_logged_out: move |_| {
                nav.replace(Route::Login {});
            },
        }
    }
}
