use dioxus::prelude::*;

use crate::components::Button;

#[component]
pub fn NotFoundView(path: String, on_home: EventHandler<()>) -> Element {
    tracing::debug!(path = %path, "no route matched");

    rsx! {
        div {
            class: "view-page not-found",
            h1 { class: "not-found-code", "404" }
            p { class: "view-muted", "Oops! Page not found" }
            Button {
                onclick: move |_| on_home.call(()),
                "Return to Home"
            }
        }
    }
}
