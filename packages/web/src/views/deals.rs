use dioxus::prelude::*;
use ui::views::{CreateDealView, DashboardView, DealDetailView, DealEditView};

use crate::Route;

#[component]
pub fn Home() -> Element {
    rsx! { Deals {} }
}

#[component]
pub fn Deals() -> Element {
    let nav = use_navigator();

    rsx! {
        DashboardView {
            on_new_deal: move |_| {
                nav.push(Route::CreateDeal {});
            },
            on_view: move |id: String| {
                nav.push(Route::DealDetail { id });
            },
            on_edit: move |id: String| {
                nav.push(Route::EditDeal { id });
            },
        }
    }
}

#[component]
pub fn CreateDeal() -> Element {
    let nav = use_navigator();

    rsx! {
        CreateDealView {
            on_done: move |_| {
                nav.push(Route::Deals {});
            },
            on_cancel: move |_| {
                nav.push(Route::Deals {});
            },
        }
    }
}

#[component]
pub fn DealDetail(id: String) -> Element {
    let nav = use_navigator();

    rsx! {
        DealDetailView {
            id,
            on_back: move |_| {
                nav.push(Route::Deals {});
            },
            on_edit: move |id: String| {
                nav.push(Route::EditDeal { id });
            },
        }
    }
}

#[component]
pub fn EditDeal(id: String) -> Element {
    let nav = use_navigator();

    rsx! {
        DealEditView {
            id,
            on_done: move |id: String| {
                nav.push(Route::DealDetail { id });
            },
            on_cancel: move |_| {
                nav.go_back();
            },
        }
    }
}
