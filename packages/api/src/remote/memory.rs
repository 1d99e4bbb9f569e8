use std::sync::{Arc, Mutex, MutexGuard};

use store::board::current_timestamp;
use store::{sample, Client, Deal, DealStage, DealUpdate, NewDeal, Product, StageInfo};

use super::{ApiError, DealsBackend};

#[derive(Debug, Default)]
struct Tables {
    deals: Vec<Deal>,
    clients: Vec<Client>,
    products: Vec<Product>,
}

/// [`DealsBackend`] held in memory with the same semantics as the service:
/// new deals are prepended, unknown ids are [`ApiError::NotFound`].
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryBackend {
    /// Empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend seeded with the sample clients, products and deals.
    pub fn with_sample_data() -> Self {
        Self::with_data(sample::deals(), sample::clients(), sample::products())
    }

    pub fn with_data(deals: Vec<Deal>, clients: Vec<Client>, products: Vec<Product>) -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables {
                deals,
                clients,
                products,
            })),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, ApiError> {
        self.tables
            .lock()
            .map_err(|_| ApiError::Http("memory backend poisoned".to_string()))
    }
}

impl DealsBackend for MemoryBackend {
    async fn list_deals(&self) -> Result<Vec<Deal>, ApiError> {
        Ok(self.lock()?.deals.clone())
    }

    async fn get_deal(&self, id: &str) -> Result<Deal, ApiError> {
        self.lock()?
            .deals
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    async fn create_deal(&self, deal: &NewDeal) -> Result<Deal, ApiError> {
        let deal = deal
            .clone()
            .into_deal(uuid::Uuid::new_v4().to_string(), &current_timestamp());
        self.lock()?.deals.insert(0, deal.clone());
        Ok(deal)
    }

    async fn update_deal(&self, id: &str, update: &DealUpdate) -> Result<Deal, ApiError> {
        let mut tables = self.lock()?;
        let deal = tables
            .deals
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        deal.apply(update, &current_timestamp());
        Ok(deal.clone())
    }

    async fn delete_deal(&self, id: &str) -> Result<(), ApiError> {
        let mut tables = self.lock()?;
        let before = tables.deals.len();
        tables.deals.retain(|d| d.id != id);
        if tables.deals.len() == before {
            return Err(ApiError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn list_clients(&self) -> Result<Vec<Client>, ApiError> {
        Ok(self.lock()?.clients.clone())
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.lock()?.products.clone())
    }

    async fn list_stages(&self) -> Result<Vec<StageInfo>, ApiError> {
        Ok(DealStage::ALL
            .iter()
            .enumerate()
            .map(|(i, stage)| StageInfo {
                id: (i + 1).to_string(),
                name: *stage,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_data() {
        let backend = MemoryBackend::with_sample_data();
        assert_eq!(backend.list_deals().await.unwrap().len(), 8);
        assert_eq!(backend.list_clients().await.unwrap().len(), 5);
        assert_eq!(backend.list_products().await.unwrap().len(), 5);

        let stages = backend.list_stages().await.unwrap();
        assert_eq!(stages.len(), 8);
        assert_eq!(stages[0].name, DealStage::LeadGenerated);
        assert_eq!(stages[7].name, DealStage::Lost);
    }

    #[tokio::test]
    async fn test_create_prepends() {
        let backend = MemoryBackend::with_sample_data();
        let created = backend
            .create_deal(&NewDeal::new("client-2", "product-3", DealStage::Contacted).with_amount(10.0))
            .await
            .unwrap();

        let deals = backend.list_deals().await.unwrap();
        assert_eq!(deals.len(), 9);
        assert_eq!(deals[0].id, created.id);
        assert_eq!(created.value, Some(10.0));
        assert!(!created.created_date.is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let backend = MemoryBackend::with_sample_data();

        let updated = backend
            .update_deal("deal-1", &DealUpdate::stage(DealStage::Completed))
            .await
            .unwrap();
        assert_eq!(updated.stage, DealStage::Completed);
        assert_ne!(updated.updated_date.as_deref(), Some("2024-03-13T10:00:00.000Z"));
        assert_eq!(backend.get_deal("deal-1").await.unwrap().stage, DealStage::Completed);

        backend.delete_deal("deal-1").await.unwrap();
        assert_eq!(
            backend.get_deal("deal-1").await.unwrap_err(),
            ApiError::NotFound("deal-1".to_string())
        );
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let backend = MemoryBackend::new();
        assert!(matches!(backend.get_deal("x").await, Err(ApiError::NotFound(_))));
        assert!(matches!(
            backend.update_deal("x", &DealUpdate::default()).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(backend.delete_deal("x").await, Err(ApiError::NotFound(_))));
    }
}
