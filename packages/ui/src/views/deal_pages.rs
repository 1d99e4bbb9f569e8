use api::validation::DealForm;
use api::ApiError;
use dioxus::prelude::*;
use store::format::{format_currency, format_date};
use store::Deal;

use crate::components::{Button, ButtonVariant};
use crate::deals::{use_deals, BackButton, DealFormView, StageBadge};
use crate::icons::{FaPenToSquare, FaTrash};
use crate::Icon;

#[component]
pub fn CreateDealView(on_done: EventHandler<()>, on_cancel: EventHandler<()>) -> Element {
    let ctx = use_deals();
    let mut busy = use_signal(|| false);

    let on_submit = move |form: DealForm| async move {
        let Ok(new_deal) = form.to_new_deal() else {
            return;
        };
        busy.set(true);
        let created = ctx.create(new_deal).await;
        busy.set(false);
        if created.is_ok() {
            on_done.call(());
        }
    };

    rsx! {
        div {
            class: "view-page narrow",
            BackButton { label: "Back to dashboard", onclick: on_cancel }
            h1 { class: "view-title", "Create New Deal" }
            div {
                class: "card",
                DealFormView {
                    initial: DealForm::default(),
                    submit_label: "Create Deal",
                    busy: busy(),
                    on_submit,
                    on_cancel,
                }
            }
        }
    }
}

/// Loads one deal for the detail and edit pages. `None` while loading,
/// `Some(Err(NotFound))` for an unknown id.
fn use_deal(id: ReadSignal<String>) -> Resource<Result<Deal, ApiError>> {
    let ctx = use_deals();
    use_resource(move || async move {
        let id = id();
        ctx.fetch_deal(&id).await
    })
}

#[component]
fn DealMissing(error: ApiError, on_back: EventHandler<()>) -> Element {
    let message = match error {
        ApiError::NotFound(_) => "Deal not found.".to_string(),
        other => format!("Failed to load deal: {other}"),
    };
    rsx! {
        div {
            class: "view-page narrow",
            BackButton { label: "Back to dashboard", onclick: on_back }
            div { class: "empty-state", p { "{message}" } }
        }
    }
}

#[component]
pub fn DealDetailView(
    id: ReadSignal<String>,
    on_back: EventHandler<()>,
    on_edit: EventHandler<String>,
) -> Element {
    let ctx = use_deals();
    let deal = use_deal(id);
    let mut confirming = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    let deal = match &*deal.read() {
        None => return rsx! { div { class: "page-loading", "Loading deal..." } },
        Some(Err(e)) => return rsx! { DealMissing { error: e.clone(), on_back } },
        Some(Ok(deal)) => deal.clone(),
    };

    let (client, product) = {
        let board = ctx.board.read();
        (
            board.client_by_id(&deal.client_id).cloned(),
            board.product_by_id(&deal.product_id).cloned(),
        )
    };
    let client_name = client
        .as_ref()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "Unknown Client".to_string());
    let product_name = product
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Unknown Product".to_string());

    let edit_id = deal.id.clone();
    let delete_id = deal.id.clone();

    rsx! {
        div {
            class: "view-page narrow",
            BackButton { label: "Back to dashboard", onclick: on_back }

            div {
                class: "detail-header",
                div {
                    h1 { class: "view-title", "{client_name}" }
                    p { class: "view-muted", "{product_name}" }
                }
                div {
                    class: "detail-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_edit.call(edit_id.clone()),
                        Icon { icon: FaPenToSquare, width: 12, height: 12 }
                        span { "Edit" }
                    }
                    Button {
                        variant: ButtonVariant::Destructive,
                        onclick: move |_| confirming.set(true),
                        Icon { icon: FaTrash, width: 12, height: 12 }
                        span { "Delete" }
                    }
                }
            }

            if confirming() {
                div {
                    class: "confirm-banner",
                    p { "Are you sure you want to delete this deal? This cannot be undone." }
                    div {
                        class: "confirm-actions",
                        Button {
                            variant: ButtonVariant::Outline,
                            disabled: deleting(),
                            onclick: move |_| confirming.set(false),
                            "Cancel"
                        }
                        Button {
                            variant: ButtonVariant::Destructive,
                            disabled: deleting(),
                            onclick: move |_| {
                                let id = delete_id.clone();
                                async move {
                                    deleting.set(true);
                                    let deleted = ctx.delete(&id).await;
                                    deleting.set(false);
                                    if deleted.is_ok() {
                                        on_back.call(());
                                    }
                                }
                            },
                            if deleting() { "Deleting..." } else { "Delete" }
                        }
                    }
                }
            }

            div {
                class: "card detail-grid",
                DetailRow { label: "Stage", StageBadge { stage: deal.stage } }
                DetailRow {
                    label: "Value",
                    {deal.value.map(format_currency).unwrap_or_else(|| "N/A".to_string())}
                }
                DetailRow { label: "Created", {format_date(Some(deal.created_date.as_str()))} }
                DetailRow { label: "Last updated", {format_date(deal.updated_date.as_deref())} }
                if let Some(client) = client {
                    DetailRow { label: "Client email", "{client.email}" }
                    if let Some(company) = client.company {
                        DetailRow { label: "Company", "{company}" }
                    }
                    if let Some(phone) = client.phone {
                        DetailRow { label: "Phone", "{phone}" }
                    }
                }
                if let Some(description) = product.and_then(|p| p.description) {
                    DetailRow { label: "Product", "{description}" }
                }
            }

            if let Some(notes) = deal.notes {
                div {
                    class: "card",
                    h2 { class: "view-section-title", "Notes" }
                    p { class: "deal-notes", "{notes}" }
                }
            }
        }
    }
}

#[component]
fn DetailRow(label: String, children: Element) -> Element {
    rsx! {
        div {
            class: "detail-row",
            span { class: "detail-label", "{label}" }
            div { class: "detail-value", {children} }
        }
    }
}

#[component]
pub fn DealEditView(
    id: ReadSignal<String>,
    on_done: EventHandler<String>,
    on_cancel: EventHandler<()>,
) -> Element {
    let ctx = use_deals();
    let deal = use_deal(id);
    let mut busy = use_signal(|| false);

    let original = match &*deal.read() {
        None => return rsx! { div { class: "page-loading", "Loading deal..." } },
        Some(Err(e)) => return rsx! { DealMissing { error: e.clone(), on_back: on_cancel } },
        Some(Ok(deal)) => deal.clone(),
    };

    let initial = DealForm::from_deal(&original);
    let on_submit = move |form: DealForm| {
        let original = original.clone();
        async move {
            let Ok(update) = form.to_update(&original) else {
                return;
            };
            if update.is_empty() {
                on_done.call(original.id.clone());
                return;
            }
            busy.set(true);
            let updated = ctx.update(&original.id, update).await;
            busy.set(false);
            if updated.is_ok() {
                on_done.call(original.id.clone());
            }
        }
    };

    rsx! {
        div {
            class: "view-page narrow",
            BackButton { label: "Back", onclick: on_cancel }
            h1 { class: "view-title", "Edit Deal" }
            div {
                class: "card",
                DealFormView {
                    initial,
                    submit_label: "Save Changes",
                    busy: busy(),
                    on_submit,
                    on_cancel,
                }
            }
        }
    }
}
