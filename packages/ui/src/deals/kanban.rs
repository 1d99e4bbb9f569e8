use dioxus::prelude::*;
use store::format::{format_currency, format_date, stage_column_class};
use store::{Deal, DealStage, KanbanField, KanbanFields};

use super::{use_deals, DealActions, VisibilityPopover};
use crate::use_preferences;

/// One column per pipeline stage. Cards are dragged between columns with
/// native HTML5 drag and drop; a drop moves the deal through
/// [`super::DealsContext::move_stage`].
#[component]
pub fn KanbanBoard(
    deals: Vec<Deal>,
    on_view: EventHandler<String>,
    on_edit: EventHandler<String>,
) -> Element {
    let ctx = use_deals();
    let prefs = use_preferences();
    let mut dragged = use_signal(|| Option::<String>::None);
    let mut hovered = use_signal(|| Option::<DealStage>::None);

    let fields = prefs.get().kanban_fields;
    let toggles: Vec<(String, bool)> = KanbanField::ALL
        .iter()
        .map(|f| (f.label().to_string(), fields.is_visible(*f)))
        .collect();

    let columns: Vec<(DealStage, Vec<(Deal, String, String)>)> = {
        let board = ctx.board.read();
        DealStage::ALL
            .into_iter()
            .map(|stage| {
                let cards = deals
                    .iter()
                    .filter(|d| d.stage == stage)
                    .map(|d| {
                        (
                            d.clone(),
                            board.client_name(d).to_string(),
                            board.product_name(d).to_string(),
                        )
                    })
                    .collect();
                (stage, cards)
            })
            .collect()
    };

    rsx! {
        div {
            class: "kanban-wrapper",
            div {
                class: "section-header",
                h3 { class: "section-title", "Pipeline Overview" }
                VisibilityPopover {
                    button_label: "Card Details",
                    title: "Show on Cards",
                    items: toggles,
                    on_toggle: move |index: usize| prefs.toggle_kanban_field(KanbanField::ALL[index]),
                }
            }

            div {
                class: "kanban",
                for (stage, cards) in columns {
                    div {
                        key: "{stage}",
                        class: "kanban-column {stage_column_class(stage)}",
                        class: if hovered() == Some(stage) { "drop-target" },
                        ondragover: move |evt| {
                            evt.prevent_default();
                            if hovered() != Some(stage) {
                                hovered.set(Some(stage));
                            }
                        },
                        ondragleave: move |_| {
                            if hovered() == Some(stage) {
                                hovered.set(None);
                            }
                        },
                        ondrop: move |evt| {
                            evt.prevent_default();
                            hovered.set(None);
                            let dropped = dragged.write().take();
                            async move {
                                if let Some(id) = dropped {
                                    ctx.move_stage(&id, stage).await;
                                }
                            }
                        },

                        div {
                            class: "kanban-column-header",
                            h4 { "{stage}" }
                            span { class: "count-badge", "{cards.len()}" }
                        }

                        div {
                            class: "kanban-cards",
                            for (deal, client_name, product_name) in cards.iter().cloned() {
                                KanbanCard {
                                    key: "{deal.id}",
                                    deal: deal.clone(),
                                    client_name,
                                    product_name,
                                    fields: fields.clone(),
                                    on_drag_start: move |id: String| dragged.set(Some(id)),
                                    on_view,
                                    on_edit,
                                }
                            }
                            if cards.is_empty() {
                                p { class: "kanban-empty", "No deals" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn KanbanCard(
    deal: Deal,
    client_name: String,
    product_name: String,
    fields: KanbanFields,
    on_drag_start: EventHandler<String>,
    on_view: EventHandler<String>,
    on_edit: EventHandler<String>,
) -> Element {
    let drag_id = deal.id.clone();
    let view_id = deal.id.clone();

    rsx! {
        div {
            class: "kanban-card",
            draggable: true,
            ondragstart: move |_| on_drag_start.call(drag_id.clone()),
            ondoubleclick: move |_| on_view.call(view_id.clone()),

            div {
                class: "kanban-card-header",
                if fields.show_client_name {
                    span { class: "font-medium", "{client_name}" }
                }
                DealActions { deal_id: deal.id.clone(), on_view, on_edit }
            }
            if fields.show_product_name {
                p { class: "muted", "{product_name}" }
            }
            if let Some(value) = deal.value {
                p { class: "kanban-card-value", {format_currency(value)} }
            }
            if fields.show_created_date {
                p { class: "muted small", {format_date(Some(deal.created_date.as_str()))} }
            }
        }
    }
}
