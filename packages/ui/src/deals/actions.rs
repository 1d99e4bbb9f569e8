use dioxus::prelude::*;

use super::use_deals;
use crate::icons::{FaEllipsis, FaEye, FaPenToSquare, FaSliders, FaTrash};
use crate::Icon;

/// Where the row menu is: closed, showing actions, or asking to confirm a
/// delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuState {
    Closed,
    Actions,
    Confirming,
}

impl MenuState {
    fn toggled(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Actions,
            _ => MenuState::Closed,
        }
    }

    /// A failed delete keeps the confirmation up so it can be retried.
    fn after_delete(self, deleted: bool) -> Self {
        if deleted {
            MenuState::Closed
        } else {
            self
        }
    }
}

/// The "..." menu on a deal row or card: view, edit, delete with a
/// confirmation step.
#[component]
pub fn DealActions(
    deal_id: String,
    on_view: EventHandler<String>,
    on_edit: EventHandler<String>,
) -> Element {
    let deals = use_deals();
    let mut menu = use_signal(|| MenuState::Closed);
    let mut deleting = use_signal(|| false);

    let view_id = deal_id.clone();
    let edit_id = deal_id.clone();
    let delete_id = deal_id.clone();

    rsx! {
        div {
            class: "menu",
            button {
                class: "menu-trigger",
                title: "Actions",
                draggable: false,
                onclick: move |evt| {
                    evt.stop_propagation();
                    menu.set(menu().toggled());
                },
                Icon { icon: FaEllipsis, width: 14, height: 14 }
            }
            match menu() {
                MenuState::Closed => rsx! {},
                MenuState::Confirming => rsx! {
                    div {
                        class: "menu-content",
                        p { class: "menu-confirm", "Are you sure you want to delete this deal?" }
                        div {
                            class: "menu-confirm-actions",
                            button {
                                class: "menu-item menu-item-danger",
                                disabled: deleting(),
                                onclick: move |_| {
                                    let id = delete_id.clone();
                                    async move {
                                        deleting.set(true);
                                        let deleted = deals.delete(&id).await.is_ok();
                                        deleting.set(false);
                                        menu.set(menu().after_delete(deleted));
                                    }
                                },
                                if deleting() { "Deleting..." } else { "Delete" }
                            }
                            button {
                                class: "menu-item",
                                onclick: move |_| menu.set(MenuState::Actions),
                                "Cancel"
                            }
                        }
                    }
                },
                MenuState::Actions => rsx! {
                    div {
                        class: "menu-content",
                        button {
                            class: "menu-item",
                            onclick: move |_| {
                                menu.set(MenuState::Closed);
                                on_view.call(view_id.clone());
                            },
                            Icon { icon: FaEye, width: 12, height: 12 }
                            span { "View" }
                        }
                        button {
                            class: "menu-item",
                            onclick: move |_| {
                                menu.set(MenuState::Closed);
                                on_edit.call(edit_id.clone());
                            },
                            Icon { icon: FaPenToSquare, width: 12, height: 12 }
                            span { "Edit" }
                        }
                        button {
                            class: "menu-item menu-item-danger",
                            onclick: move |_| menu.set(MenuState::Confirming),
                            Icon { icon: FaTrash, width: 12, height: 12 }
                            span { "Delete" }
                        }
                    }
                },
            }
        }
    }
}

/// A button that opens a list of checkboxes.
#[component]
pub fn VisibilityPopover(
    button_label: String,
    title: String,
    /// `(label, checked)` per entry.
    items: Vec<(String, bool)>,
    on_toggle: EventHandler<usize>,
) -> Element {
    let mut open = use_signal(|| false);

    rsx! {
        div {
            class: "popover",
            button {
                class: "button button-outline button-sm",
                onclick: move |_| open.set(!open()),
                Icon { icon: FaSliders, width: 12, height: 12 }
                span { "{button_label}" }
            }
            if open() {
                div {
                    class: "popover-content",
                    h4 { class: "popover-title", "{title}" }
                    for (index, (label, checked)) in items.into_iter().enumerate() {
                        label {
                            key: "{index}",
                            class: "popover-option",
                            input {
                                r#type: "checkbox",
                                checked,
                                onchange: move |_| on_toggle.call(index),
                            }
                            span { "{label}" }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_toggles_menu() {
        assert_eq!(MenuState::Closed.toggled(), MenuState::Actions);
        assert_eq!(MenuState::Actions.toggled(), MenuState::Closed);
        assert_eq!(MenuState::Confirming.toggled(), MenuState::Closed);
    }

    #[test]
    fn test_failed_delete_keeps_confirmation_open() {
        assert_eq!(MenuState::Confirming.after_delete(false), MenuState::Confirming);
        assert_eq!(MenuState::Confirming.after_delete(true), MenuState::Closed);
    }
}
