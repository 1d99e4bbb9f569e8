//! # User database
//!
//! Accounts live in PostgreSQL. The pool is a lazy, process-wide singleton
//! opened on first use from `DATABASE_URL`; migrations in `api/migrations`
//! are applied by the web server at startup. Server builds only.

#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use pool::{database_url, get_pool};
