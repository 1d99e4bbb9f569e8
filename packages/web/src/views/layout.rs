use dioxus::prelude::*;
use ui::{DealsProvider, NavTab, Navbar, RequireAuth};

use crate::Route;

fn tab_route(tab: NavTab) -> Route {
    match tab {
        NavTab::Dashboard => Route::Deals {},
        NavTab::Profile => Route::Profile {},
        NavTab::Settings => Route::Settings {},
    }
}

/// Layout for every signed-in page: auth gate, deal state and the navbar.
#[component]
pub fn Protected() -> Element {
    let nav = use_navigator();
    let active = match use_route::<Route>() {
        Route::Profile {} => Some(NavTab::Profile),
        Route::Settings {} => Some(NavTab::Settings),
        Route::Home {} | Route::Deals {} => Some(NavTab::Dashboard),
        _ => None,
    };

    rsx! {
        RequireAuth {
            on_unauthenticated: move |_| {
                nav.replace(Route::Login {});
            },
            DealsProvider {
                Navbar {
                    active,
                    on_navigate: move |tab| {
                        nav.push(tab_route(tab));
                    },
                    on_logged_out: move |_| {
                        nav.replace(Route::Login {});
                    },
                }
                main { Outlet::<Route> {} }
            }
        }
    }
}
