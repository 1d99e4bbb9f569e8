//! # Dashboard user accounts
//!
//! [`User`] is a row of the `users` table and only exists on the server.
//! [`UserInfo`] is what crosses the server-function boundary: no password
//! hash, the id as a string, and the sign-up date pre-rendered as RFC 3339 so
//! the browser build needs neither `sqlx` nor `uuid` parsing.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full user record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl User {
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            email: self.email.clone(),
            name: self.name.clone(),
            member_since: Some(self.created_at.to_rfc3339()),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    #[serde(default)]
    pub member_since: Option<String>,
}

impl UserInfo {
    /// Name, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }

    /// First name for greetings ("Welcome back, Ada").
    pub fn first_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.split_whitespace().next().unwrap_or(name),
            _ => "User",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: Option<&str>) -> UserInfo {
        UserInfo {
            id: "u1".into(),
            email: "ada@example.com".into(),
            name: name.map(String::from),
            member_since: None,
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(info(Some("Ada Lovelace")).display_name(), "Ada Lovelace");
        assert_eq!(info(None).display_name(), "ada@example.com");
        assert_eq!(info(Some("  ")).display_name(), "ada@example.com");
    }

    #[test]
    fn test_first_name() {
        assert_eq!(info(Some("Ada Lovelace")).first_name(), "Ada");
        assert_eq!(info(None).first_name(), "User");
    }

    #[test]
    fn test_member_since_is_optional_on_the_wire() {
        let user: UserInfo =
            serde_json::from_str(r#"{"id":"u1","email":"a@b.co","name":null}"#).unwrap();
        assert!(user.member_since.is_none());
    }
}
