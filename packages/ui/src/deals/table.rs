use dioxus::prelude::*;
use store::format::format_date;
use store::{Deal, SortKey, SortOrder, SortState, TableColumn};

use super::{use_deals, DealActions, StageBadge, VisibilityPopover};
use crate::icons::{FaSort, FaSortDown, FaSortUp};
use crate::{use_preferences, Icon};

fn sort_key(column: TableColumn) -> Option<SortKey> {
    match column {
        TableColumn::ClientName => Some(SortKey::ClientName),
        TableColumn::ProductName => Some(SortKey::ProductName),
        TableColumn::DealStage => Some(SortKey::Stage),
        TableColumn::CreatedDate => Some(SortKey::CreatedDate),
        TableColumn::Actions => None,
    }
}

/// Sortable deals table with per-user column visibility.
#[component]
pub fn DealsTable(
    deals: Vec<Deal>,
    on_view: EventHandler<String>,
    on_edit: EventHandler<String>,
) -> Element {
    let board = use_deals().board;
    let prefs = use_preferences();
    let mut sort = use_signal(SortState::default);

    let columns = prefs.get().table_columns;
    let visible: Vec<TableColumn> = TableColumn::ALL
        .into_iter()
        .filter(|c| columns.is_visible(*c))
        .collect();
    let toggles: Vec<(String, bool)> = TableColumn::ALL
        .iter()
        .map(|c| (c.label().to_string(), columns.is_visible(*c)))
        .collect();

    let rows: Vec<(Deal, String, String)> = {
        let board = board.read();
        board
            .sorted(deals.iter().collect(), sort())
            .into_iter()
            .map(|d| {
                (
                    d.clone(),
                    board.client_name(d).to_string(),
                    board.product_name(d).to_string(),
                )
            })
            .collect()
    };

    rsx! {
        div {
            class: "deals-table-wrapper",
            div {
                class: "section-header",
                h3 { class: "section-title", "Deals Overview" }
                VisibilityPopover {
                    button_label: "Columns",
                    title: "Toggle Columns",
                    items: toggles,
                    on_toggle: move |index: usize| prefs.toggle_table_column(TableColumn::ALL[index]),
                }
            }

            div {
                class: "table-card",
                table {
                    class: "deals-table",
                    thead {
                        tr {
                            for column in visible.iter().copied() {
                                match sort_key(column) {
                                    Some(key) => rsx! {
                                        th {
                                            key: "{column.label()}",
                                            class: "sortable",
                                            onclick: move |_| sort.set(sort().toggle(key)),
                                            span { "{column.label()}" }
                                            SortIcon { active: sort().key == key, order: sort().order }
                                        }
                                    },
                                    None => rsx! {
                                        th { key: "{column.label()}", class: "actions-column", "{column.label()}" }
                                    },
                                }
                            }
                        }
                    }
                    tbody {
                        for (deal, client_name, product_name) in rows.iter().cloned() {
                            tr {
                                key: "{deal.id}",
                                for column in visible.iter().copied() {
                                    match column {
                                        TableColumn::ClientName => rsx! {
                                            td { class: "font-medium", "{client_name}" }
                                        },
                                        TableColumn::ProductName => rsx! {
                                            td { "{product_name}" }
                                        },
                                        TableColumn::DealStage => rsx! {
                                            td { StageBadge { stage: deal.stage } }
                                        },
                                        TableColumn::CreatedDate => rsx! {
                                            td { class: "muted", {format_date(Some(deal.created_date.as_str()))} }
                                        },
                                        TableColumn::Actions => rsx! {
                                            td {
                                                DealActions {
                                                    deal_id: deal.id.clone(),
                                                    on_view,
                                                    on_edit,
                                                }
                                            }
                                        },
                                    }
                                }
                            }
                        }
                    }
                }

                if rows.is_empty() {
                    div {
                        class: "empty-state",
                        p { "No deals found" }
                        p { class: "muted", "Create your first deal to get started" }
                    }
                }
            }
        }
    }
}

#[component]
fn SortIcon(active: bool, order: SortOrder) -> Element {
    if !active {
        return rsx! {
            span { class: "sort-icon muted", Icon { icon: FaSort, width: 10, height: 10 } }
        };
    }
    rsx! {
        span {
            class: "sort-icon",
            match order {
                SortOrder::Asc => rsx! { Icon { icon: FaSortUp, width: 10, height: 10 } },
                SortOrder::Desc => rsx! { Icon { icon: FaSortDown, width: 10, height: 10 } },
            }
        }
    }
}
