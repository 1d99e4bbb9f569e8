use dioxus::prelude::*;
use store::format::{format_currency, format_date, initials};
use store::DealStage;

use crate::deals::{use_deals, BackButton, StageBadge};
use crate::use_auth;

/// Account summary and pipeline numbers computed from the loaded deals.
#[component]
pub fn ProfileView(on_back: EventHandler<()>) -> Element {
    let auth = use_auth();
    let ctx = use_deals();

    let Some(user) = auth().user else {
        return rsx! {};
    };
    let stats = ctx.board.read().stats();
    let name = user.display_name().to_string();
    let avatar = initials(&name);
    let member_since = format_date(user.member_since.as_deref());

    rsx! {
        div {
            class: "view-page narrow",
            BackButton { label: "Back to dashboard", onclick: on_back }

            div {
                class: "card profile-header",
                div { class: "avatar avatar-large", "{avatar}" }
                div {
                    h1 { class: "view-title", "{name}" }
                    p { class: "view-muted", "{user.email}" }
                    p { class: "view-muted small", "Member since {member_since}" }
                }
            }

            div {
                class: "stats-grid",
                StatCard { label: "Total deals", value: stats.total_deals.to_string() }
                StatCard { label: "Completed", value: stats.completed_deals.to_string() }
                StatCard { label: "Lost", value: stats.lost_deals.to_string() }
                StatCard { label: "Win rate", value: format!("{:.0}%", stats.win_rate) }
                StatCard { label: "Total value", value: format_currency(stats.total_value) }
                StatCard { label: "Open pipeline", value: format_currency(stats.open_value) }
            }

            div {
                class: "card",
                h2 { class: "view-section-title", "Deals by stage" }
                ul {
                    class: "stage-counts",
                    for stage in DealStage::ALL {
                        li {
                            key: "{stage}",
                            StageBadge { stage }
                            span { class: "count-badge", "{stats.per_stage.get(&stage).copied().unwrap_or(0)}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StatCard(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "card stat-card",
            p { class: "view-muted small", "{label}" }
            p { class: "stat-value", "{value}" }
        }
    }
}
