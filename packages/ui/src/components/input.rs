use dioxus::prelude::*;

#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default)] disabled: bool,
    #[props(default)] autocomplete: String,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    let input_type = r#type;

    rsx! {
        input {
            id,
            class: "input {class}",
            r#type: input_type,
            placeholder,
            value,
            disabled,
            autocomplete,
            oninput: move |evt| {
                if let Some(handler) = oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

#[component]
pub fn Textarea(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default = 3)] rows: u32,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        textarea {
            id,
            class: "input textarea {class}",
            placeholder,
            rows: "{rows}",
            value,
            oninput: move |evt| {
                if let Some(handler) = oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

/// A `<select>` over `(value, label)` pairs with an optional empty first entry.
#[component]
pub fn Select(
    #[props(default)] id: String,
    #[props(default)] class: String,
    options: Vec<(String, String)>,
    #[props(default)] value: String,
    /// Label of a leading "nothing selected" option; omitted when empty.
    #[props(default)] placeholder: String,
    #[props(default)] disabled: bool,
    onchange: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        select {
            id,
            class: "input select {class}",
            disabled,
            onchange: move |evt| {
                if let Some(handler) = onchange {
                    handler.call(evt);
                }
            },
            if !placeholder.is_empty() {
                option { value: "", selected: value.is_empty(), "{placeholder}" }
            }
            for (option_value, option_label) in options {
                option {
                    key: "{option_value}",
                    value: "{option_value}",
                    selected: option_value == value,
                    "{option_label}"
                }
            }
        }
    }
}
