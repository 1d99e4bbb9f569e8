//! Transient notifications.
//!
//! [`ToastProvider`] owns the list and renders it in a corner of the screen;
//! anything below it calls [`use_toast`] and pushes messages. Toasts dismiss
//! themselves after [`TOAST_TIMEOUT_MS`] or on click.

use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::icons::{FaCircleCheck, FaCircleExclamation, FaCircleInfo, FaXmark};
use crate::time::sleep_ms;
use crate::Icon;

pub const TOAST_TIMEOUT_MS: u32 = 4000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

/// Handle for pushing toasts.
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    items: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn push(&self, kind: ToastKind, title: impl Into<String>, description: Option<String>) {
        let mut items = self.items;
        let mut next_id = self.next_id;
        let id = *next_id.peek();
        next_id.set(id + 1);

        let title = title.into();
        match kind {
            ToastKind::Error => tracing::warn!("{title}"),
            _ => tracing::debug!("{title}"),
        }
        items.write().push(Toast {
            id,
            kind,
            title,
            description,
        });

        let handle = *self;
        spawn_forever(async move {
            sleep_ms(TOAST_TIMEOUT_MS).await;
            handle.dismiss(id);
        });
    }

    pub fn success(&self, title: impl Into<String>) {
        self.push(ToastKind::Success, title, None);
    }

    pub fn error(&self, title: impl Into<String>) {
        self.push(ToastKind::Error, title, None);
    }

    /// Error toast with the underlying message as its description.
    pub fn error_with(&self, title: impl Into<String>, detail: impl ToString) {
        self.push(ToastKind::Error, title, Some(detail.to_string()));
    }

    pub fn info(&self, title: impl Into<String>, description: impl Into<String>) {
        self.push(ToastKind::Info, title, Some(description.into()));
    }

    pub fn dismiss(&self, id: u64) {
        let mut items = self.items;
        items.write().retain(|t| t.id != id);
    }
}

pub fn use_toast() -> Toasts {
    use_context::<Toasts>()
}

#[component]
pub fn ToastProvider(children: Element) -> Element {
    let toasts = use_context_provider(|| Toasts {
        items: Signal::new(Vec::new()),
        next_id: Signal::new(0),
    });
    let items = toasts.items.read().clone();

    rsx! {
        {children}
        div {
            class: "toast-viewport",
            role: "status",
            for toast in items {
                ToastItem { key: "{toast.id}", toast, on_dismiss: move |id| toasts.dismiss(id) }
            }
        }
    }
}

#[component]
fn ToastItem(toast: Toast, on_dismiss: EventHandler<u64>) -> Element {
    let (kind_class, icon) = match toast.kind {
        ToastKind::Success => ("toast-success", rsx! { Icon { icon: FaCircleCheck, width: 16, height: 16 } }),
        ToastKind::Error => ("toast-error", rsx! { Icon { icon: FaCircleExclamation, width: 16, height: 16 } }),
        ToastKind::Info => ("toast-info", rsx! { Icon { icon: FaCircleInfo, width: 16, height: 16 } }),
    };
    let id = toast.id;

    rsx! {
        div {
            class: "toast {kind_class}",
            span { class: "toast-icon", {icon} }
            div {
                class: "toast-body",
                p { class: "toast-title", "{toast.title}" }
                if let Some(description) = toast.description {
                    p { class: "toast-description", "{description}" }
                }
            }
            button {
                class: "toast-close",
                title: "Dismiss",
                onclick: move |_| on_dismiss.call(id),
                Icon { icon: FaXmark, width: 12, height: 12 }
            }
        }
    }
}
