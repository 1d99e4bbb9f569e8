//! # Remote data layer: the deals REST service
//!
//! Everything the dashboard reads or writes about deals goes through a
//! [`DealsBackend`]:
//!
//! | Backend | Used for |
//! |---------|----------|
//! | [`RestBackend`] | the real service at the configured base URL (reqwest) |
//! | [`MemoryBackend`] | sample-data mode and tests |
//! | [`AnyBackend`] | picks one of the above from [`DashboardConfig`] at runtime |
//!
//! [`DealsService`] wraps a backend with a [`QueryCache`]: reads go through
//! the cache, writes invalidate the keys they touch.
//!
//! ## Endpoints
//!
//! | Method | Path | Body / response |
//! |--------|------|-----------------|
//! | GET | `/deals` | list of [`Deal`] |
//! | POST | `/deals` | [`NewDeal`] → [`Deal`] |
//! | GET / PATCH / DELETE | `/deals/{id}` | [`DealUpdate`] → [`Deal`] |
//! | GET | `/clients`, `/products`, `/stages` | lists |
//!
//! List responses may be a bare array or a `{ "data": [...] }` envelope, and a
//! null `data` means an empty list. Error responses carry `{ "error": "..." }`.

mod cache;
mod memory;
mod rest;
mod service;

pub use cache::{QueryCache, QueryKey};
pub use memory::MemoryBackend;
pub use rest::RestBackend;
pub use service::DealsService;

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use store::{Client, DashboardConfig, Deal, DealUpdate, NewDeal, Product, StageInfo};

/// Errors from talking to the deals service.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Http(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("deal not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// Build a status error from a non-2xx response body, preferring the
    /// service's own `error` message over `fallback`.
    pub fn from_status(status: u16, body: &str, fallback: &str) -> Self {
        let message = error_message(body).unwrap_or_else(|| fallback.to_string());
        ApiError::Status { status, message }
    }

    /// Turn a 404 into [`ApiError::NotFound`] for `id`.
    pub fn or_not_found(self, id: &str) -> Self {
        match self {
            ApiError::Status { status: 404, .. } => ApiError::NotFound(id.to_string()),
            other => other,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Http(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Async access to deals and their reference data.
pub trait DealsBackend {
    fn list_deals(&self) -> impl Future<Output = Result<Vec<Deal>, ApiError>>;
    fn get_deal(&self, id: &str) -> impl Future<Output = Result<Deal, ApiError>>;
    fn create_deal(&self, deal: &NewDeal) -> impl Future<Output = Result<Deal, ApiError>>;
    fn update_deal(
        &self,
        id: &str,
        update: &DealUpdate,
    ) -> impl Future<Output = Result<Deal, ApiError>>;
    fn delete_deal(&self, id: &str) -> impl Future<Output = Result<(), ApiError>>;
    fn list_clients(&self) -> impl Future<Output = Result<Vec<Client>, ApiError>>;
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>>;
    fn list_stages(&self) -> impl Future<Output = Result<Vec<StageInfo>, ApiError>>;
}

/// Backend chosen at runtime.
#[derive(Clone, Debug)]
pub enum AnyBackend {
    Rest(RestBackend),
    Memory(MemoryBackend),
}

impl AnyBackend {
    pub fn from_config(config: &DashboardConfig) -> Self {
        if config.api.use_sample_data {
            tracing::info!("serving sample deals from memory");
            AnyBackend::Memory(MemoryBackend::with_sample_data())
        } else {
            tracing::info!(base_url = %config.base_url(), "using deals service");
            AnyBackend::Rest(RestBackend::from_config(config))
        }
    }
}

impl DealsBackend for AnyBackend {
    async fn list_deals(&self) -> Result<Vec<Deal>, ApiError> {
        match self {
            AnyBackend::Rest(b) => b.list_deals().await,
            AnyBackend::Memory(b) => b.list_deals().await,
        }
    }

    async fn get_deal(&self, id: &str) -> Result<Deal, ApiError> {
        match self {
            AnyBackend::Rest(b) => b.get_deal(id).await,
            AnyBackend::Memory(b) => b.get_deal(id).await,
        }
    }

    async fn create_deal(&self, deal: &NewDeal) -> Result<Deal, ApiError> {
        match self {
            AnyBackend::Rest(b) => b.create_deal(deal).await,
            AnyBackend::Memory(b) => b.create_deal(deal).await,
        }
    }

    async fn update_deal(&self, id: &str, update: &DealUpdate) -> Result<Deal, ApiError> {
        match self {
            AnyBackend::Rest(b) => b.update_deal(id, update).await,
            AnyBackend::Memory(b) => b.update_deal(id, update).await,
        }
    }

    async fn delete_deal(&self, id: &str) -> Result<(), ApiError> {
        match self {
            AnyBackend::Rest(b) => b.delete_deal(id).await,
            AnyBackend::Memory(b) => b.delete_deal(id).await,
        }
    }

    async fn list_clients(&self) -> Result<Vec<Client>, ApiError> {
        match self {
            AnyBackend::Rest(b) => b.list_clients().await,
            AnyBackend::Memory(b) => b.list_clients().await,
        }
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        match self {
            AnyBackend::Rest(b) => b.list_products().await,
            AnyBackend::Memory(b) => b.list_products().await,
        }
    }

    async fn list_stages(&self) -> Result<Vec<StageInfo>, ApiError> {
        match self {
            AnyBackend::Rest(b) => b.list_stages().await,
            AnyBackend::Memory(b) => b.list_stages().await,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Envelope { data: Option<Vec<T>> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemBody<T> {
    Bare(T),
    Envelope { data: T },
}

/// Decode a list response, bare or enveloped.
pub fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ApiError> {
    let body = body.trim();
    if body.is_empty() || body == "null" {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<ListBody<T>>(body) {
        Ok(ListBody::Bare(items)) => Ok(items),
        Ok(ListBody::Envelope { data }) => Ok(data.unwrap_or_default()),
        // Re-decode as a bare list so the error names the offending field.
        Err(_) => Ok(serde_json::from_str::<Vec<T>>(body)?),
    }
}

/// Decode a single-record response, bare or enveloped.
pub fn decode_item<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    match serde_json::from_str::<ItemBody<T>>(body) {
        Ok(ItemBody::Bare(item)) | Ok(ItemBody::Envelope { data: item }) => Ok(item),
        Err(_) => Ok(serde_json::from_str::<T>(body)?),
    }
}

/// The `error` field of an error body, if there is one.
pub fn error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::DealStage;

    #[test]
    fn test_decode_bare_list() {
        let body = r#"[{"id": 1, "clientId": 2, "productId": "p", "stage": "Contacted", "createdAt": "2024-01-15T10:00:00Z"}]"#;
        let deals: Vec<Deal> = decode_list(body).unwrap();
        assert_eq!(deals.len(), 1);
        assert_eq!(deals[0].id, "1");
        assert_eq!(deals[0].client_id, "2");
        assert_eq!(deals[0].stage, DealStage::Contacted);
        assert_eq!(deals[0].created_date, "2024-01-15T10:00:00Z");
    }

    #[test]
    fn test_decode_envelope_and_null_data() {
        let clients: Vec<Client> =
            decode_list(r#"{"data": [{"id": "c1", "name": "Acme", "email": "a@acme.com"}]}"#).unwrap();
        assert_eq!(clients[0].name, "Acme");

        let empty: Vec<Client> = decode_list(r#"{"data": null}"#).unwrap();
        assert!(empty.is_empty());
        let missing: Vec<Product> = decode_list(r#"{}"#).unwrap();
        assert!(missing.is_empty());
        let blank: Vec<Product> = decode_list("").unwrap();
        assert!(blank.is_empty());
    }

    #[test]
    fn test_decode_list_rejects_unknown_stage() {
        let body = r#"[{"id": 1, "clientId": 2, "productId": 3, "stage": "Negotiation"}]"#;
        let err = decode_list::<Deal>(body).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_decode_item_bare_and_enveloped() {
        let bare = r#"{"id": "d1", "clientId": "c", "productId": "p", "stage": "Lost"}"#;
        let deal: Deal = decode_item(bare).unwrap();
        assert_eq!(deal.stage, DealStage::Lost);

        let wrapped = r#"{"data": {"id": 9, "clientId": "c", "productId": "p", "stage": "Completed"}}"#;
        let deal: Deal = decode_item(wrapped).unwrap();
        assert_eq!(deal.id, "9");
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#"{"error": "Deal not found"}"#).as_deref(), Some("Deal not found"));
        assert_eq!(error_message(r#"{"error": ""}"#), None);
        assert_eq!(error_message("<html>oops</html>"), None);

        let err = ApiError::from_status(500, "", "Failed to create deal");
        assert_eq!(err.to_string(), "Failed to create deal");
        let err = ApiError::from_status(404, r#"{"error": "gone"}"#, "x").or_not_found("d1");
        assert_eq!(err, ApiError::NotFound("d1".to_string()));
    }
}
