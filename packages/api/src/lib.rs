//! # API crate: data access and server functions for the deals dashboard
//!
//! Two halves live here. The remote data layer talks to the external deals
//! REST service from the browser; the auth server functions run on the
//! dashboard's own server and manage user accounts.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`remote`] | none | Deals REST client, in-memory backend, query cache, [`DealsService`] |
//! | [`validation`] | none | Sign-in, sign-up and deal form rules shared by client and server |
//! | [`config`] | none | Loads [`DashboardConfig`] from `dashboard.toml` and the environment |
//! | [`auth`] | `server` | Argon2 password hashing and session helpers |
//! | [`db`] | `server` | PostgreSQL connection pool for user accounts |
//! | [`models`] | none | `User` row and the client-safe [`UserInfo`] |
//!
//! ## Server functions
//!
//! Each public `async fn` below is a Dioxus server function compiled twice:
//! with the real logic behind `#[cfg(feature = "server")]`, and as a client
//! stub that forwards the call over HTTP.
//!
//! `get_current_user`, `register`, `login_password`, `logout`,
//! `change_password`.

use dioxus::prelude::*;

pub mod auth;
pub mod config;
pub mod db;
pub mod models;
pub mod remote;
pub mod validation;

pub use config::load_config;
pub use models::UserInfo;
pub use remote::{AnyBackend, ApiError, DealsBackend, DealsService, MemoryBackend, RestBackend};
pub use store::DashboardConfig;

/// The service the dashboard uses, with its backend chosen by configuration.
pub type Deals = DealsService<AnyBackend>;

/// Build the dashboard's deals service from `config`.
pub fn deals_service(config: &DashboardConfig) -> Deals {
    DealsService::new(AnyBackend::from_config(config))
}

/// Turn the first validation error into a server error.
#[cfg(feature = "server")]
fn reject(errors: Vec<validation::ValidationError>) -> Result<(), ServerFnError> {
    match errors.into_iter().next() {
        Some(e) => Err(ServerFnError::new(e.to_string())),
        None => Ok(()),
    }
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let Some(user_id) = auth::session_user_id(&session).await? else {
        return Ok(None);
    };

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.map(|u| u.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Create an account and sign it in.
#[cfg(feature = "server")]
#[post("/api/auth/register", session: tower_sessions::Session)]
pub async fn register(
    email: String,
    password: String,
    name: String,
) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let email = email.trim().to_lowercase();
    let name = name.trim().to_string();
    reject(validation::validate_sign_up(&name, &email, &password, &password))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let existing: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if existing.is_some() {
        return Err(ServerFnError::new(
            "An account with this email already exists",
        ));
    }

    let password_hash = auth::hash_password(&password).map_err(ServerFnError::new)?;

    let user: models::User = sqlx::query_as(
        "INSERT INTO users (email, name, password_hash) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&email)
    .bind(&name)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(user = %user.id, "registered account");
    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(
    email: String,
    password: String,
    name: String,
) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login-password", session: tower_sessions::Session)]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let email = email.trim().to_lowercase();
    reject(validation::validate_sign_in(&email, &password))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<models::User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user) = user else {
        return Err(ServerFnError::new("Invalid email or password"));
    };

    let valid = auth::verify_password(&password, &user.password_hash).map_err(ServerFnError::new)?;
    if !valid {
        tracing::info!(user = %user.id, "rejected sign-in");
        return Err(ServerFnError::new("Invalid email or password"));
    }

    // New session id on sign-in so a pre-login session cannot be reused.
    session
        .cycle_id()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login-password")]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Replace the signed-in user's password after checking the current one.
#[cfg(feature = "server")]
#[post("/api/auth/change-password", session: tower_sessions::Session)]
pub async fn change_password(
    current_password: String,
    new_password: String,
) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let user_id = auth::require_user_id(&session).await?;
    if new_password.chars().count() < validation::MIN_PASSWORD_LEN {
        return Err(ServerFnError::new(
            validation::ValidationError::PasswordTooShort.to_string(),
        ));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: models::User = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?
        .ok_or_else(|| ServerFnError::new("Not authenticated"))?;

    let valid =
        auth::verify_password(&current_password, &user.password_hash).map_err(ServerFnError::new)?;
    if !valid {
        return Err(ServerFnError::new("Current password is incorrect"));
    }

    let password_hash = auth::hash_password(&new_password).map_err(ServerFnError::new)?;
    sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
        .bind(&password_hash)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(user = %user_id, "changed password");
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/change-password")]
pub async fn change_password(
    current_password: String,
    new_password: String,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
