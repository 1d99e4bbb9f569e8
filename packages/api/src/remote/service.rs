use std::future::Future;
use std::ops::DerefMut;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use store::board::current_timestamp;
use store::{
    Client, Deal, DealBoard, DealStage, DealUpdate, NewDeal, Product, StageInfo, StageMove,
};

use super::{ApiError, DealsBackend, QueryCache, QueryKey};

/// A [`DealsBackend`] behind a shared [`QueryCache`].
///
/// Clones share the cache, so a service can be handed to every component
/// that needs it.
#[derive(Clone, Debug)]
pub struct DealsService<B> {
    backend: B,
    cache: Arc<Mutex<QueryCache>>,
}

impl<B: DealsBackend> DealsService<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cache: Arc::new(Mutex::new(QueryCache::new())),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn cache(&self) -> MutexGuard<'_, QueryCache> {
        // A panic while holding the lock leaves at worst a stale entry.
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return the cached value for `key`, or fetch and cache it.
    async fn read_through<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(hit) = self.cache().get(&key) {
            return Ok(hit);
        }
        let value = fetch().await?;
        self.cache().insert(key, &value);
        Ok(value)
    }

    pub fn is_cached(&self, key: &QueryKey) -> bool {
        self.cache().contains(key)
    }

    pub fn invalidate(&self, key: &QueryKey) {
        self.cache().invalidate(key);
    }

    /// Forget every cached read, so the next reads hit the service.
    pub fn refresh(&self) {
        self.cache().clear();
    }

    pub async fn deals(&self) -> Result<Vec<Deal>, ApiError> {
        self.read_through(QueryKey::AllDeals, || self.backend.list_deals())
            .await
    }

    pub async fn deal(&self, id: &str) -> Result<Deal, ApiError> {
        self.read_through(QueryKey::SingleDeal(id.to_string()), || {
            self.backend.get_deal(id)
        })
        .await
    }

    pub async fn clients(&self) -> Result<Vec<Client>, ApiError> {
        self.read_through(QueryKey::AllClients, || self.backend.list_clients())
            .await
    }

    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.read_through(QueryKey::AllProducts, || self.backend.list_products())
            .await
    }

    pub async fn stages(&self) -> Result<Vec<StageInfo>, ApiError> {
        self.read_through(QueryKey::AllStages, || self.backend.list_stages())
            .await
    }

    /// Stages offered by forms: the service's list, or every stage when the
    /// service has none or cannot be reached.
    pub async fn stage_options(&self) -> Vec<DealStage> {
        match self.stages().await {
            Ok(stages) if !stages.is_empty() => stages.into_iter().map(|s| s.name).collect(),
            Ok(_) => DealStage::ALL.to_vec(),
            Err(e) => {
                tracing::warn!("falling back to built-in stages: {e}");
                DealStage::ALL.to_vec()
            }
        }
    }

    /// Deals, clients and products in one board.
    pub async fn load_board(&self) -> Result<DealBoard, ApiError> {
        let mut board = DealBoard::new();
        board.set_deals(self.deals().await?);
        board.set_clients(self.clients().await?);
        board.set_products(self.products().await?);
        Ok(board)
    }

    /// Create a deal, stamping `createdAt` with the current time when unset.
    pub async fn create_deal(&self, mut new_deal: NewDeal) -> Result<Deal, ApiError> {
        if new_deal.created_at.is_none() {
            new_deal.created_at = Some(current_timestamp());
        }
        let deal = self.backend.create_deal(&new_deal).await?;
        tracing::info!(deal = %deal.id, "created deal");
        self.cache().invalidate_deals(None);
        Ok(deal)
    }

    pub async fn update_deal(&self, id: &str, update: &DealUpdate) -> Result<Deal, ApiError> {
        let deal = self.backend.update_deal(id, update).await?;
        tracing::info!(deal = %id, "updated deal");
        self.cache().invalidate_deals(Some(id));
        Ok(deal)
    }

    pub async fn delete_deal(&self, id: &str) -> Result<(), ApiError> {
        self.backend.delete_deal(id).await?;
        tracing::info!(deal = %id, "deleted deal");
        self.cache().invalidate_deals(Some(id));
        Ok(())
    }

    /// Send a locally applied stage move to the service.
    async fn commit_move(&self, stage_move: &StageMove) -> Result<Deal, ApiError> {
        self.update_deal(&stage_move.deal_id, &DealUpdate::stage(stage_move.to))
            .await
    }

    /// Move a deal on the board right away, then persist the move. When the
    /// service rejects it the board is put back and the error returned.
    ///
    /// `board` hands out short-lived write access; it is never held across
    /// the request, so other moves can land while this one is in flight.
    /// `Ok(None)` means nothing moved: unknown deal or same stage.
    pub async fn move_deal_stage<F, G>(
        &self,
        mut board: F,
        id: &str,
        stage: DealStage,
    ) -> Result<Option<StageMove>, ApiError>
    where
        F: FnMut() -> G,
        G: DerefMut<Target = DealBoard>,
    {
        let Some(stage_move) = board().move_deal(id, stage) else {
            return Ok(None);
        };
        match self.commit_move(&stage_move).await {
            Ok(deal) => {
                if !board().confirm_move(&stage_move, deal) {
                    tracing::debug!(deal = %id, "deal moved again, keeping newer stage");
                }
                Ok(Some(stage_move))
            }
            Err(e) => {
                tracing::warn!(deal = %id, "stage change rejected, reverting: {e}");
                board().revert(&stage_move);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;
    use crate::remote::MemoryBackend;

    /// Counts list calls and can be told to reject writes.
    #[derive(Clone, Default)]
    struct ProbeBackend {
        inner: MemoryBackend,
        list_calls: Arc<AtomicUsize>,
        reject_writes: bool,
        stall_next_update: Arc<AtomicBool>,
    }

    impl ProbeBackend {
        fn sample() -> Self {
            Self {
                inner: MemoryBackend::with_sample_data(),
                ..Self::default()
            }
        }

        fn rejecting() -> Self {
            Self {
                reject_writes: true,
                ..Self::sample()
            }
        }

        fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        fn rejection() -> ApiError {
            ApiError::Status {
                status: 500,
                message: "Failed to update deal".to_string(),
            }
        }
    }

    impl DealsBackend for ProbeBackend {
        async fn list_deals(&self) -> Result<Vec<Deal>, ApiError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.list_deals().await
        }

        async fn get_deal(&self, id: &str) -> Result<Deal, ApiError> {
            self.inner.get_deal(id).await
        }

        async fn create_deal(&self, deal: &NewDeal) -> Result<Deal, ApiError> {
            if self.reject_writes {
                return Err(Self::rejection());
            }
            self.inner.create_deal(deal).await
        }

        async fn update_deal(&self, id: &str, update: &DealUpdate) -> Result<Deal, ApiError> {
            if self.reject_writes {
                return Err(Self::rejection());
            }
            if self.stall_next_update.swap(false, Ordering::SeqCst) {
                for _ in 0..4 {
                    tokio::task::yield_now().await;
                }
            }
            self.inner.update_deal(id, update).await
        }

        async fn delete_deal(&self, id: &str) -> Result<(), ApiError> {
            if self.reject_writes {
                return Err(Self::rejection());
            }
            self.inner.delete_deal(id).await
        }

        async fn list_clients(&self) -> Result<Vec<Client>, ApiError> {
            self.inner.list_clients().await
        }

        async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
            self.inner.list_products().await
        }

        async fn list_stages(&self) -> Result<Vec<StageInfo>, ApiError> {
            if self.reject_writes {
                return Err(Self::rejection());
            }
            self.inner.list_stages().await
        }
    }

    fn sample_board() -> DealBoard {
        let mut board = DealBoard::new();
        board.set_deals(store::sample::deals());
        board
    }

    #[tokio::test]
    async fn test_reads_are_cached() {
        let backend = ProbeBackend::sample();
        let service = DealsService::new(backend.clone());

        assert_eq!(service.deals().await.unwrap().len(), 8);
        assert_eq!(service.deals().await.unwrap().len(), 8);
        assert_eq!(backend.list_calls(), 1);
        assert!(service.is_cached(&QueryKey::AllDeals));

        service.refresh();
        service.deals().await.unwrap();
        assert_eq!(backend.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_mutations_invalidate() {
        let backend = ProbeBackend::sample();
        let service = DealsService::new(backend.clone());

        service.deals().await.unwrap();
        service.deal("deal-2").await.unwrap();
        service.clients().await.unwrap();

        let created = service
            .create_deal(NewDeal::new("client-1", "product-1", DealStage::Contacted))
            .await
            .unwrap();
        assert!(created.created_date.starts_with("20"));
        assert!(!service.is_cached(&QueryKey::AllDeals));
        assert!(service.is_cached(&QueryKey::AllClients));

        let deals = service.deals().await.unwrap();
        assert_eq!(deals.len(), 9);
        assert_eq!(deals[0].id, created.id);
        assert_eq!(backend.list_calls(), 2);

        service
            .update_deal("deal-2", &DealUpdate::stage(DealStage::Lost))
            .await
            .unwrap();
        assert!(!service.is_cached(&QueryKey::SingleDeal("deal-2".into())));
        assert_eq!(service.deal("deal-2").await.unwrap().stage, DealStage::Lost);

        service.delete_deal("deal-2").await.unwrap();
        assert!(matches!(service.deal("deal-2").await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_move_deal_stage_persists() {
        let service = DealsService::new(ProbeBackend::sample());
        let board = RefCell::new(service.load_board().await.unwrap());

        let moved = service
            .move_deal_stage(|| board.borrow_mut(), "deal-1", DealStage::Contacted)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.from, DealStage::LeadGenerated);
        let board = board.into_inner();
        let deal = board.deal_by_id("deal-1").unwrap();
        assert_eq!(deal.stage, DealStage::Contacted);
        assert!(deal.updated_date.is_some());
        assert_eq!(service.deal("deal-1").await.unwrap().stage, DealStage::Contacted);
    }

    #[tokio::test]
    async fn test_move_to_same_stage_sends_nothing() {
        let service = DealsService::new(ProbeBackend::rejecting());
        let board = RefCell::new(sample_board());

        let result = service
            .move_deal_stage(|| board.borrow_mut(), "deal-1", DealStage::LeadGenerated)
            .await;
        assert_eq!(result, Ok(None));
        let result = service
            .move_deal_stage(|| board.borrow_mut(), "missing", DealStage::Lost)
            .await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_rejected_move_is_reverted() {
        let service = DealsService::new(ProbeBackend::rejecting());
        let board = RefCell::new(sample_board());

        let err = service
            .move_deal_stage(|| board.borrow_mut(), "deal-3", DealStage::Completed)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to update deal");
        assert_eq!(
            board.borrow().deal_by_id("deal-3").unwrap().stage,
            DealStage::ApplicationSubmitted
        );
    }

    #[tokio::test]
    async fn test_late_response_keeps_newer_move() {
        let backend = ProbeBackend::sample();
        let service = DealsService::new(backend.clone());
        let board = RefCell::new(sample_board());

        // The first PATCH is answered after the second one.
        backend.stall_next_update.store(true, Ordering::SeqCst);
        let (first, second) = tokio::join!(
            service.move_deal_stage(|| board.borrow_mut(), "deal-1", DealStage::Contacted),
            service.move_deal_stage(|| board.borrow_mut(), "deal-1", DealStage::Lost),
        );
        assert_eq!(first.unwrap().unwrap().to, DealStage::Contacted);
        assert_eq!(second.unwrap().unwrap().from, DealStage::Contacted);

        assert_eq!(board.borrow().deal_by_id("deal-1").unwrap().stage, DealStage::Lost);
    }

    #[tokio::test]
    async fn test_stage_options_fall_back() {
        let service = DealsService::new(ProbeBackend::rejecting());
        assert_eq!(service.stage_options().await, DealStage::ALL.to_vec());

        let service = DealsService::new(ProbeBackend::sample());
        assert_eq!(service.stage_options().await.len(), 8);

        let service = DealsService::new(MemoryBackend::new());
        assert_eq!(service.stage_options().await, DealStage::ALL.to_vec());
    }
}
