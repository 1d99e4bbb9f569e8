use dioxus::prelude::*;
use store::{Deal, ViewMode};

use crate::components::{Button, ButtonVariant, Input};
use crate::deals::{use_deals, DealsTable, KanbanBoard};
use crate::icons::{FaArrowsRotate, FaList, FaMagnifyingGlass, FaPlus, FaTableColumns};
use crate::{use_auth, use_debounced, use_preferences, Icon};

/// Landing page: greeting, search, and the deals as a table or Kanban board.
#[component]
pub fn DashboardView(
    on_new_deal: EventHandler<()>,
    on_view: EventHandler<String>,
    on_edit: EventHandler<String>,
) -> Element {
    let auth = use_auth();
    let ctx = use_deals();
    let prefs = use_preferences();

    let query = use_signal(String::new);
    let delay = ctx.config.read().search.debounce_ms;
    let debounced = use_debounced(query, delay);

    let first_name = auth()
        .user
        .as_ref()
        .map(|u| u.first_name().to_string())
        .unwrap_or_else(|| "User".to_string());

    let view_mode = prefs.view_mode();
    let loading = (ctx.loading)();
    let error = (ctx.error)();

    let deals: Vec<Deal> = ctx
        .board
        .read()
        .search(&debounced())
        .into_iter()
        .cloned()
        .collect();

    rsx! {
        div {
            class: "view-page",

            div {
                class: "dashboard-header",
                div {
                    h1 { class: "view-title", "Welcome back, {first_name}!" }
                    p { class: "view-muted", "Here's what's happening with your deals today." }
                }
                Button {
                    onclick: move |_| on_new_deal.call(()),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    span { "New Deal" }
                }
            }

            div {
                class: "dashboard-toolbar",
                SearchBox { query }
                div {
                    class: "toolbar-actions",
                    ViewModeToggle { mode: view_mode }
                    Button {
                        variant: ButtonVariant::Outline,
                        title: "Refresh",
                        disabled: loading,
                        onclick: move |_| ctx.refresh(),
                        Icon { icon: FaArrowsRotate, width: 12, height: 12 }
                    }
                }
            }

            if loading && deals.is_empty() {
                div { class: "page-loading", "Loading deals..." }
            } else if let Some(message) = error {
                div {
                    class: "error-banner",
                    p { "Failed to load deals: {message}" }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| ctx.refresh(),
                        "Try again"
                    }
                }
            } else {
                match view_mode {
                    ViewMode::Table => rsx! {
                        DealsTable { deals, on_view, on_edit }
                    },
                    ViewMode::Kanban => rsx! {
                        KanbanBoard { deals, on_view, on_edit }
                    },
                }
            }
        }
    }
}

#[component]
fn SearchBox(mut query: Signal<String>) -> Element {
    rsx! {
        div {
            class: "search-box",
            span { class: "search-icon", Icon { icon: FaMagnifyingGlass, width: 12, height: 12 } }
            Input {
                r#type: "search",
                placeholder: "Search deals by client, product or stage...",
                value: query(),
                oninput: move |evt: FormEvent| query.set(evt.value()),
            }
        }
    }
}

#[component]
fn ViewModeToggle(mode: ViewMode) -> Element {
    let prefs = use_preferences();
    let class = |active: bool| {
        if active {
            "segment segment-active"
        } else {
            "segment"
        }
    };

    rsx! {
        div {
            class: "segmented",
            button {
                class: class(mode == ViewMode::Table),
                title: "Table view",
                onclick: move |_| prefs.set_view_mode(ViewMode::Table),
                Icon { icon: FaList, width: 12, height: 12 }
                span { "Table" }
            }
            button {
                class: class(mode == ViewMode::Kanban),
                title: "Kanban view",
                onclick: move |_| prefs.set_view_mode(ViewMode::Kanban),
                Icon { icon: FaTableColumns, width: 12, height: 12 }
                span { "Kanban" }
            }
        }
    }
}
