use dioxus::prelude::*;
use store::format::stage_badge_class;
use store::DealStage;

use crate::icons::FaArrowLeft;
use crate::Icon;

#[component]
pub fn StageBadge(stage: DealStage) -> Element {
    let colours = stage_badge_class(stage);
    rsx! {
        span { class: "stage-badge {colours}", "{stage}" }
    }
}

#[component]
pub fn BackButton(
    #[props(default = "Back".to_string())] label: String,
    onclick: EventHandler<()>,
) -> Element {
    rsx! {
        button {
            class: "back-button",
            onclick: move |_| onclick.call(()),
            Icon { icon: FaArrowLeft, width: 12, height: 12 }
            span { "{label}" }
        }
    }
}
