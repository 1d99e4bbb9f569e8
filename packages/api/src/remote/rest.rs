use reqwest::{Client as HttpClient, RequestBuilder};
use store::{Client, DashboardConfig, Deal, DealUpdate, NewDeal, Product, StageInfo};

use super::{decode_item, decode_list, ApiError, DealsBackend};

/// [`DealsBackend`] over HTTP.
#[derive(Clone, Debug)]
pub struct RestBackend {
    http: HttpClient,
    base_url: String,
}

impl RestBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn deal_url(&self, id: &str) -> String {
        self.url(&format!("/deals/{id}"))
    }

    /// Send `request` and return the body of a 2xx response.
    async fn send(&self, request: RequestBuilder, failure: &str) -> Result<String, ApiError> {
        let response = request
            .header("Content-Type", "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "{failure}");
            return Err(ApiError::from_status(status.as_u16(), &body, failure));
        }
        Ok(body)
    }
}

impl DealsBackend for RestBackend {
    async fn list_deals(&self) -> Result<Vec<Deal>, ApiError> {
        let body = self
            .send(self.http.get(self.url("/deals")), "Failed to fetch deals")
            .await?;
        decode_list(&body)
    }

    async fn get_deal(&self, id: &str) -> Result<Deal, ApiError> {
        let body = self
            .send(self.http.get(self.deal_url(id)), "Failed to fetch deal")
            .await
            .map_err(|e| e.or_not_found(id))?;
        decode_item(&body)
    }

    async fn create_deal(&self, deal: &NewDeal) -> Result<Deal, ApiError> {
        let payload = serde_json::to_string(deal)?;
        let body = self
            .send(
                self.http.post(self.url("/deals")).body(payload),
                "Failed to create deal",
            )
            .await?;
        decode_item(&body)
    }

    async fn update_deal(&self, id: &str, update: &DealUpdate) -> Result<Deal, ApiError> {
        let payload = serde_json::to_string(update)?;
        let body = self
            .send(
                self.http.patch(self.deal_url(id)).body(payload),
                "Failed to update deal",
            )
            .await
            .map_err(|e| e.or_not_found(id))?;
        decode_item(&body)
    }

    async fn delete_deal(&self, id: &str) -> Result<(), ApiError> {
        let failure = format!("Failed to delete deal with ID {id}");
        self.send(self.http.delete(self.deal_url(id)), &failure)
            .await
            .map_err(|e| e.or_not_found(id))?;
        Ok(())
    }

    async fn list_clients(&self) -> Result<Vec<Client>, ApiError> {
        let body = self
            .send(self.http.get(self.url("/clients")), "Failed to fetch clients")
            .await?;
        decode_list(&body)
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let body = self
            .send(self.http.get(self.url("/products")), "Failed to fetch products")
            .await?;
        decode_list(&body)
    }

    async fn list_stages(&self) -> Result<Vec<StageInfo>, ApiError> {
        let body = self
            .send(self.http.get(self.url("/stages")), "Failed to fetch stages")
            .await?;
        decode_list(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let backend = RestBackend::new("http://localhost:5000/");
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(backend.url("/deals"), "http://localhost:5000/deals");
        assert_eq!(backend.deal_url("42"), "http://localhost:5000/deals/42");

        let config = DashboardConfig::new("https://deals.example.com/api");
        let backend = RestBackend::from_config(&config);
        assert_eq!(backend.url("/stages"), "https://deals.example.com/api/stages");
    }
}
