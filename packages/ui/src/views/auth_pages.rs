//! Sign-in and sign-up forms.

use api::validation::{error_for, validate_sign_in, validate_sign_up, Field, ValidationError};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label};
use crate::{use_auth, use_toast, AuthState};

#[component]
fn FieldError(errors: Vec<ValidationError>, field: Field) -> Element {
    match error_for(&errors, field) {
        Some(e) => rsx! { p { class: "field-error", "{e}" } },
        None => rsx! {},
    }
}

/// Email and password sign-in. `on_success` runs after the session is set.
#[component]
pub fn LoginView(on_success: EventHandler<()>, on_register: EventHandler<()>) -> Element {
    let mut auth = use_auth();
    let toast = use_toast();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut errors = use_signal(Vec::<ValidationError>::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();
            let found = validate_sign_in(&e, &p);
            if !found.is_empty() {
                errors.set(found);
                return;
            }
            errors.set(Vec::new());

            loading.set(true);
            match api::login_password(e, p).await {
                Ok(user) => {
                    toast.info("Login Successful", format!("Welcome back {}!", user.display_name()));
                    auth.set(AuthState::signed_in(user));
                    on_success.call(());
                }
                Err(e) => {
                    tracing::debug!("sign-in failed: {e}");
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "card auth-card",
                h1 { class: "view-title", "Sign in" }
                p { class: "view-muted", "Welcome back to your deal pipeline." }

                form {
                    class: "auth-form",
                    onsubmit: handle_login,

                    if let Some(err) = error() {
                        div { class: "error-banner", "{err}" }
                    }

                    div {
                        class: "form-field",
                        Label { html_for: "email", "Email" }
                        Input {
                            id: "email",
                            r#type: "email",
                            placeholder: "you@company.com",
                            autocomplete: "email",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                        FieldError { errors: errors(), field: Field::Email }
                    }

                    div {
                        class: "form-field",
                        Label { html_for: "password", "Password" }
                        Input {
                            id: "password",
                            r#type: "password",
                            autocomplete: "current-password",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                        FieldError { errors: errors(), field: Field::Password }
                    }

                    Button {
                        class: "full-width",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Signing in..." } else { "Sign in" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Don't have an account? "
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| on_register.call(()),
                        "Sign up"
                    }
                }
            }
        }
    }
}

/// Account creation. Signs the new user in on success.
#[component]
pub fn RegisterView(on_success: EventHandler<()>, on_login: EventHandler<()>) -> Element {
    let mut auth = use_auth();
    let toast = use_toast();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut errors = use_signal(Vec::<ValidationError>::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let n = name().trim().to_string();
            let e = email().trim().to_string();
            let p = password();
            let found = validate_sign_up(&n, &e, &p, &confirm_password());
            if !found.is_empty() {
                errors.set(found);
                return;
            }
            errors.set(Vec::new());

            loading.set(true);
            match api::register(e, p, n).await {
                Ok(user) => {
                    toast.info(
                        "Account Created Successfully!",
                        format!("Welcome, {}!", user.display_name()),
                    );
                    auth.set(AuthState::signed_in(user));
                    on_success.call(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "card auth-card",
                h1 { class: "view-title", "Create Account" }
                p { class: "view-muted", "Start tracking your deals." }

                form {
                    class: "auth-form",
                    onsubmit: handle_register,

                    if let Some(err) = error() {
                        div { class: "error-banner", "{err}" }
                    }

                    div {
                        class: "form-field",
                        Label { html_for: "name", "Name" }
                        Input {
                            id: "name",
                            placeholder: "Jane Doe",
                            autocomplete: "name",
                            value: name(),
                            oninput: move |evt: FormEvent| name.set(evt.value()),
                        }
                        FieldError { errors: errors(), field: Field::Name }
                    }

                    div {
                        class: "form-field",
                        Label { html_for: "email", "Email" }
                        Input {
                            id: "email",
                            r#type: "email",
                            placeholder: "you@company.com",
                            autocomplete: "email",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                        FieldError { errors: errors(), field: Field::Email }
                    }

                    div {
                        class: "form-field",
                        Label { html_for: "password", "Password" }
                        Input {
                            id: "password",
                            r#type: "password",
                            placeholder: "At least 8 characters",
                            autocomplete: "new-password",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                        FieldError { errors: errors(), field: Field::Password }
                    }

                    div {
                        class: "form-field",
                        Label { html_for: "confirm-password", "Confirm password" }
                        Input {
                            id: "confirm-password",
                            r#type: "password",
                            autocomplete: "new-password",
                            value: confirm_password(),
                            oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                        }
                        FieldError { errors: errors(), field: Field::ConfirmPassword }
                    }

                    Button {
                        class: "full-width",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Sign up" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Already have an account? "
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| on_login.call(()),
                        "Sign in"
                    }
                }
            }
        }
    }
}
