//! Session helpers.

use dioxus::prelude::ServerFnError;
use tower_sessions::Session;
use uuid::Uuid;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// The signed-in user's id, if any.
pub async fn session_user_id(session: &Session) -> Result<Option<Uuid>, ServerFnError> {
    let user_id: Option<String> = session
        .get(SESSION_USER_ID_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    match Uuid::parse_str(&user_id) {
        Ok(id) => Ok(Some(id)),
        Err(e) => {
            tracing::warn!("discarding malformed session user id: {e}");
            Ok(None)
        }
    }
}

/// The signed-in user's id, or an error for anonymous sessions.
pub async fn require_user_id(session: &Session) -> Result<Uuid, ServerFnError> {
    session_user_id(session)
        .await?
        .ok_or_else(|| ServerFnError::new("Not authenticated"))
}
