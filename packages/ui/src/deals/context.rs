//! Shared deal state for every deals view.
//!
//! [`DealsProvider`] builds the [`api::Deals`] service from the dashboard
//! configuration, loads the board once, and hands out a [`DealsContext`].
//! Every action reports its outcome with a toast; failed loads also leave a
//! message in [`DealsContext::error`] for the page to show.

use api::{ApiError, DashboardConfig, Deals};
use dioxus::prelude::*;
use store::{Deal, DealBoard, DealStage, DealUpdate, NewDeal};

use crate::components::Toasts;
use crate::use_toast;

#[derive(Clone, Copy)]
pub struct DealsContext {
    pub board: Signal<DealBoard>,
    pub stages: Signal<Vec<DealStage>>,
    pub loading: Signal<bool>,
    pub error: Signal<Option<String>>,
    pub config: Signal<DashboardConfig>,
    service: Signal<Deals>,
    toasts: Toasts,
}

impl DealsContext {
    fn service(&self) -> Deals {
        self.service.peek().clone()
    }

    /// Fetch deals, clients, products and stages. With `force` the query
    /// cache is dropped first.
    pub async fn load(self, force: bool) {
        let service = self.service();
        if force {
            service.refresh();
        }
        let (mut board, mut stages, mut loading, mut error) =
            (self.board, self.stages, self.loading, self.error);
        loading.set(true);
        error.set(None);

        match service.deals().await {
            Ok(deals) => board.write().set_deals(deals),
            Err(e) => {
                self.toasts.error_with("Failed to fetch Deals", &e);
                error.set(Some(e.to_string()));
            }
        }
        match service.clients().await {
            Ok(clients) => board.write().set_clients(clients),
            Err(e) => self.toasts.error_with("Failed to fetch clients", e),
        }
        match service.products().await {
            Ok(products) => board.write().set_products(products),
            Err(e) => self.toasts.error_with("Failed to fetch products", e),
        }
        stages.set(service.stage_options().await);

        loading.set(false);
    }

    pub fn refresh(&self) {
        let ctx = *self;
        spawn(async move { ctx.load(true).await });
    }

    /// One deal, from the board when present, else from the service.
    pub async fn fetch_deal(&self, id: &str) -> Result<Deal, ApiError> {
        if let Some(deal) = self.board.peek().deal_by_id(id) {
            return Ok(deal.clone());
        }
        self.service().deal(id).await
    }

    pub async fn create(&self, new_deal: NewDeal) -> Result<Deal, ApiError> {
        let mut board = self.board;
        match self.service().create_deal(new_deal).await {
            Ok(deal) => {
                board.write().upsert_deal(deal.clone());
                self.toasts.success("Deal created successfully!");
                Ok(deal)
            }
            Err(e) => {
                self.toasts.error_with("Error creating deal", &e);
                Err(e)
            }
        }
    }

    pub async fn update(&self, id: &str, update: DealUpdate) -> Result<Deal, ApiError> {
        let mut board = self.board;
        match self.service().update_deal(id, &update).await {
            Ok(deal) => {
                board.write().upsert_deal(deal.clone());
                self.toasts.success("Deal updated successfully!");
                Ok(deal)
            }
            Err(e) => {
                self.toasts.error_with("Failed to update deal", &e);
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let mut board = self.board;
        match self.service().delete_deal(id).await {
            Ok(()) => {
                board.write().delete_deal(id);
                self.toasts.success("Deal deleted successfully!");
                Ok(())
            }
            Err(e) => {
                self.toasts.error_with("Failed to delete deal", &e);
                Err(e)
            }
        }
    }

    /// Move a deal on the board immediately, then persist it. A rejected
    /// move is put back.
    pub async fn move_stage(&self, id: &str, stage: DealStage) {
        let board = self.board;
        match self
            .service()
            .move_deal_stage(move || board.write_unchecked(), id, stage)
            .await
        {
            Ok(Some(_)) => self.toasts.success(format!("Deal moved to {stage}")),
            Ok(None) => {}
            Err(e) => self.toasts.error_with("Failed to move deal", e),
        }
    }
}

pub fn use_deals() -> DealsContext {
    use_context::<DealsContext>()
}

#[component]
pub fn DealsProvider(children: Element) -> Element {
    let toasts = use_toast();
    let config = use_signal(api::load_config);
    let service = use_signal(|| api::deals_service(&config.peek()));
    let board = use_signal(DealBoard::new);
    let stages = use_signal(|| DealStage::ALL.to_vec());
    let loading = use_signal(|| true);
    let error = use_signal(|| Option::<String>::None);

    let ctx = use_context_provider(|| DealsContext {
        board,
        stages,
        loading,
        error,
        config,
        service,
        toasts,
    });

    use_hook(move || {
        spawn(async move { ctx.load(false).await });
    });

    rsx! {
        {children}
    }
}
