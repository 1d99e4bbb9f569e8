use api::validation::{error_for, DealForm, Field, ValidationError};
use dioxus::prelude::*;

use super::use_deals;
use crate::components::{Button, ButtonVariant, Input, Label, Select, Textarea};

/// The create/edit deal form. Validation runs on submit; nothing is sent
/// while any field is invalid.
#[component]
pub fn DealFormView(
    initial: DealForm,
    #[props(default = "Save".to_string())] submit_label: String,
    #[props(default)] busy: bool,
    on_submit: EventHandler<DealForm>,
    on_cancel: EventHandler<()>,
) -> Element {
    let ctx = use_deals();
    let mut form = use_signal(|| initial.clone());
    let mut errors = use_signal(Vec::<ValidationError>::new);

    let (clients, products) = {
        let board = ctx.board.read();
        let clients: Vec<(String, String)> = board
            .clients
            .iter()
            .map(|c| (c.id.clone(), c.name.clone()))
            .collect();
        let products: Vec<(String, String)> = board
            .products
            .iter()
            .map(|p| (p.id.clone(), p.name.clone()))
            .collect();
        (clients, products)
    };
    let stages: Vec<(String, String)> = ctx
        .stages
        .read()
        .iter()
        .map(|s| (s.to_string(), s.to_string()))
        .collect();

    let field_error = move |field: Field| -> Option<String> {
        error_for(&errors.read(), field).map(|e| e.to_string())
    };

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let current = form();
        let found = current.errors();
        if found.is_empty() {
            errors.set(Vec::new());
            on_submit.call(current);
        } else {
            errors.set(found);
        }
    };

    rsx! {
        form {
            class: "deal-form",
            onsubmit,

            div {
                class: "form-field",
                Label { html_for: "client", "Client" }
                Select {
                    id: "client",
                    options: clients,
                    value: form.read().client_id.clone(),
                    placeholder: "Select a client",
                    disabled: busy,
                    onchange: move |evt: FormEvent| form.write().client_id = evt.value(),
                }
                if let Some(message) = field_error(Field::Client) {
                    p { class: "field-error", "{message}" }
                }
            }

            div {
                class: "form-field",
                Label { html_for: "product", "Product" }
                Select {
                    id: "product",
                    options: products,
                    value: form.read().product_id.clone(),
                    placeholder: "Select a product",
                    disabled: busy,
                    onchange: move |evt: FormEvent| form.write().product_id = evt.value(),
                }
                if let Some(message) = field_error(Field::Product) {
                    p { class: "field-error", "{message}" }
                }
            }

            div {
                class: "form-field",
                Label { html_for: "stage", "Stage" }
                Select {
                    id: "stage",
                    options: stages,
                    value: form.read().stage.clone(),
                    placeholder: "Select a stage",
                    disabled: busy,
                    onchange: move |evt: FormEvent| form.write().stage = evt.value(),
                }
                if let Some(message) = field_error(Field::Stage) {
                    p { class: "field-error", "{message}" }
                }
            }

            div {
                class: "form-field",
                Label { html_for: "amount", "Amount" }
                Input {
                    id: "amount",
                    r#type: "text",
                    placeholder: "0.00",
                    value: form.read().amount.clone(),
                    disabled: busy,
                    oninput: move |evt: FormEvent| form.write().amount = evt.value(),
                }
                if let Some(message) = field_error(Field::Amount) {
                    p { class: "field-error", "{message}" }
                }
            }

            div {
                class: "form-field",
                Label { html_for: "notes", "Notes" }
                Textarea {
                    id: "notes",
                    rows: 4,
                    placeholder: "Anything worth remembering about this deal",
                    value: form.read().notes.clone(),
                    oninput: move |evt: FormEvent| form.write().notes = evt.value(),
                }
            }

            div {
                class: "form-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                Button {
                    r#type: "submit",
                    disabled: busy,
                    if busy { "Saving..." } else { "{submit_label}" }
                }
            }
        }
    }
}
