use dioxus::prelude::*;
use store::format::initials;

use crate::icons::{FaChartLine, FaGear, FaUser};
use crate::{use_auth, Icon, LogoutButton};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Top-level destinations reachable from the navbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavTab {
    Dashboard,
    Profile,
    Settings,
}

#[component]
pub fn Navbar(
    active: Option<NavTab>,
    on_navigate: EventHandler<NavTab>,
    on_logged_out: EventHandler<()>,
) -> Element {
    let auth = use_auth();
    let name = auth()
        .user
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();
    let avatar = initials(&name);

    let tab_class = move |tab: NavTab| {
        if active == Some(tab) {
            "nav-link nav-link-active"
        } else {
            "nav-link"
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        nav {
            class: "navbar",
            button {
                class: "navbar-brand",
                onclick: move |_| on_navigate.call(NavTab::Dashboard),
                Icon { icon: FaChartLine, width: 16, height: 16 }
                span { "Deal Pipeline" }
            }
            div {
                class: "navbar-links",
                button {
                    class: tab_class(NavTab::Dashboard),
                    onclick: move |_| on_navigate.call(NavTab::Dashboard),
                    "Dashboard"
                }
                button {
                    class: tab_class(NavTab::Profile),
                    onclick: move |_| on_navigate.call(NavTab::Profile),
                    Icon { icon: FaUser, width: 12, height: 12 }
                    span { "Profile" }
                }
                button {
                    class: tab_class(NavTab::Settings),
                    onclick: move |_| on_navigate.call(NavTab::Settings),
                    Icon { icon: FaGear, width: 12, height: 12 }
                    span { "Settings" }
                }
            }
            div {
                class: "navbar-user",
                span { class: "avatar", title: "{name}", "{avatar}" }
                LogoutButton { on_logged_out }
            }
        }
    }
}
