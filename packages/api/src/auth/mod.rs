//! Email and password authentication for the dashboard.

#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use password::{hash_password, verify_password};
#[cfg(feature = "server")]
pub use session::{require_user_id, session_user_id, SESSION_USER_ID_KEY};
