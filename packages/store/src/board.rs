//! # DealBoard: the in-memory deal pipeline
//!
//! [`DealBoard`] holds the deals, clients and products the dashboard is
//! currently showing. Table and Kanban views both read from it; drag-and-drop
//! writes to it before the remote update resolves.
//!
//! ## Optimistic stage moves
//!
//! [`move_deal`](DealBoard::move_deal) reassigns a deal's stage locally and
//! returns a [`StageMove`] describing what changed. The caller sends the patch
//! to the service and, if that fails, hands the move back to
//! [`revert`](DealBoard::revert). A revert only applies while the deal still
//! sits in the stage the move put it in, so a later move is never clobbered.
//!
//! ## Views over the board
//!
//! | Method | Used by |
//! |--------|---------|
//! | [`deals_by_stage`](DealBoard::deals_by_stage) | Kanban columns |
//! | [`search`](DealBoard::search) | Dashboard search box |
//! | [`sorted`](DealBoard::sorted) | Table header sorting |
//! | [`stats`](DealBoard::stats) | Profile page |

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::format::parse_date;
use crate::models::{Client, Deal, DealStage, DealUpdate, NewDeal, Product};

/// Current time as an RFC 3339 string with millisecond precision.
pub fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// A stage change applied locally, pending confirmation by the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageMove {
    pub deal_id: String,
    pub from: DealStage,
    pub to: DealStage,
}

/// Table columns a deal list can be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    ClientName,
    ProductName,
    Stage,
    CreatedDate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Which column the table is sorted by, and in which direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::CreatedDate,
            order: SortOrder::Desc,
        }
    }
}

impl SortState {
    /// Header click: same column flips direction, another column sorts ascending.
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key {
            let order = match self.order {
                SortOrder::Asc => SortOrder::Desc,
                SortOrder::Desc => SortOrder::Asc,
            };
            Self { key, order }
        } else {
            Self {
                key,
                order: SortOrder::Asc,
            }
        }
    }
}

/// Summary numbers for the profile page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PipelineStats {
    pub total_deals: usize,
    pub completed_deals: usize,
    pub lost_deals: usize,
    /// Completed as a percentage of closed (completed + lost) deals.
    pub win_rate: f64,
    pub total_value: f64,
    /// Value of deals that are not yet completed or lost.
    pub open_value: f64,
    pub per_stage: BTreeMap<DealStage, usize>,
}

/// Deals plus the reference data needed to render them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DealBoard {
    pub deals: Vec<Deal>,
    pub clients: Vec<Client>,
    pub products: Vec<Product>,
}

impl DealBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_deals(&mut self, deals: Vec<Deal>) {
        self.deals = deals;
    }

    pub fn set_clients(&mut self, clients: Vec<Client>) {
        self.clients = clients;
    }

    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    /// Add a locally created deal at the top of the list and return it.
    pub fn add_deal(&mut self, new_deal: NewDeal) -> Deal {
        let now = current_timestamp();
        let deal = new_deal.into_deal(uuid::Uuid::new_v4().to_string(), &now);
        self.deals.insert(0, deal.clone());
        deal
    }

    /// Insert or replace a deal confirmed by the service.
    pub fn upsert_deal(&mut self, deal: Deal) {
        match self.deals.iter_mut().find(|d| d.id == deal.id) {
            Some(existing) => *existing = deal,
            None => self.deals.insert(0, deal),
        }
    }

    /// Merge `update` into the deal with `id`. Returns whether a deal matched.
    pub fn update_deal(&mut self, id: &str, update: &DealUpdate) -> bool {
        let now = current_timestamp();
        match self.deals.iter_mut().find(|d| d.id == id) {
            Some(deal) => {
                deal.apply(update, &now);
                true
            }
            None => false,
        }
    }

    pub fn delete_deal(&mut self, id: &str) -> Option<Deal> {
        let index = self.deals.iter().position(|d| d.id == id)?;
        Some(self.deals.remove(index))
    }

    pub fn deal_by_id(&self, id: &str) -> Option<&Deal> {
        self.deals.iter().find(|d| d.id == id)
    }

    pub fn deals_by_stage(&self, stage: DealStage) -> Vec<&Deal> {
        self.deals.iter().filter(|d| d.stage == stage).collect()
    }

    pub fn client_by_id(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn product_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn client_name(&self, deal: &Deal) -> &str {
        self.client_by_id(&deal.client_id)
            .map(|c| c.name.as_str())
            .unwrap_or("Unknown Client")
    }

    pub fn product_name(&self, deal: &Deal) -> &str {
        self.product_by_id(&deal.product_id)
            .map(|p| p.name.as_str())
            .unwrap_or("Unknown Product")
    }

    /// Optimistically move a deal to `stage`.
    ///
    /// Returns `None` when the deal is unknown or already in `stage`; nothing
    /// needs to be sent to the service in that case.
    pub fn move_deal(&mut self, id: &str, stage: DealStage) -> Option<StageMove> {
        let deal = self.deals.iter_mut().find(|d| d.id == id)?;
        if deal.stage == stage {
            return None;
        }
        let from = deal.stage;
        deal.stage = stage;
        deal.updated_date = Some(current_timestamp());
        tracing::debug!(deal = %id, %from, to = %stage, "moved deal");
        Some(StageMove {
            deal_id: id.to_string(),
            from,
            to: stage,
        })
    }

    /// Undo a [`StageMove`] the service rejected. Returns whether it applied.
    pub fn revert(&mut self, stage_move: &StageMove) -> bool {
        match self.deals.iter_mut().find(|d| d.id == stage_move.deal_id) {
            Some(deal) if deal.stage == stage_move.to => {
                deal.stage = stage_move.from;
                tracing::debug!(deal = %stage_move.deal_id, stage = %stage_move.from, "reverted deal move");
                true
            }
            _ => false,
        }
    }

    /// Take the service's copy of a moved deal. Skipped when the deal has
    /// been moved again since, so a late response cannot undo a newer move.
    pub fn confirm_move(&mut self, stage_move: &StageMove, deal: Deal) -> bool {
        match self.deals.iter_mut().find(|d| d.id == stage_move.deal_id) {
            Some(current) if current.stage == stage_move.to => {
                *current = deal;
                true
            }
            _ => false,
        }
    }

    /// Deals whose client name, product name or stage contains `query`,
    /// ignoring case. An empty query matches every deal.
    pub fn search(&self, query: &str) -> Vec<&Deal> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.deals.iter().collect();
        }
        self.deals
            .iter()
            .filter(|deal| {
                let client = self.client_by_id(&deal.client_id);
                let product = self.product_by_id(&deal.product_id);
                client.is_some_and(|c| c.name.to_lowercase().contains(&needle))
                    || product.is_some_and(|p| p.name.to_lowercase().contains(&needle))
                    || deal.stage.as_str().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Sort `deals` for the table.
    pub fn sorted<'a>(&self, mut deals: Vec<&'a Deal>, sort: SortState) -> Vec<&'a Deal> {
        deals.sort_by(|a, b| {
            let ordering = match sort.key {
                SortKey::ClientName => self
                    .client_name(a)
                    .to_lowercase()
                    .cmp(&self.client_name(b).to_lowercase()),
                SortKey::ProductName => self
                    .product_name(a)
                    .to_lowercase()
                    .cmp(&self.product_name(b).to_lowercase()),
                SortKey::Stage => a.stage.cmp(&b.stage),
                SortKey::CreatedDate => compare_dates(&a.created_date, &b.created_date),
            };
            match sort.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        deals
    }

    pub fn stats(&self) -> PipelineStats {
        let mut stats = PipelineStats {
            total_deals: self.deals.len(),
            ..PipelineStats::default()
        };
        for deal in &self.deals {
            *stats.per_stage.entry(deal.stage).or_default() += 1;
            let value = deal.value.unwrap_or_default();
            stats.total_value += value;
            match deal.stage {
                DealStage::Completed => stats.completed_deals += 1,
                DealStage::Lost => stats.lost_deals += 1,
                _ => stats.open_value += value,
            }
        }
        let closed = stats.completed_deals + stats.lost_deals;
        if closed > 0 {
            stats.win_rate = stats.completed_deals as f64 * 100.0 / closed as f64;
        }
        stats
    }
}

/// Order RFC 3339 dates chronologically; unparsable dates sort first.
fn compare_dates(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    fn board() -> DealBoard {
        DealBoard {
            deals: sample::deals(),
            clients: sample::clients(),
            products: sample::products(),
        }
    }

    #[test]
    fn test_add_deal_prepends_with_fresh_id() {
        let mut board = board();
        let before = board.deals.len();
        let deal = board.add_deal(NewDeal::new("client-2", "product-3", DealStage::Contacted));
        assert_eq!(board.deals.len(), before + 1);
        assert_eq!(board.deals[0], deal);
        assert!(!deal.id.is_empty());
        assert!(!deal.created_date.is_empty());
        assert_eq!(deal.updated_date.as_deref(), Some(deal.created_date.as_str()));
    }

    #[test]
    fn test_update_and_delete() {
        let mut board = board();
        assert!(board.update_deal("deal-1", &DealUpdate::stage(DealStage::Contacted)));
        let deal = board.deal_by_id("deal-1").unwrap();
        assert_eq!(deal.stage, DealStage::Contacted);
        assert!(deal.updated_date.is_some());

        assert!(!board.update_deal("missing", &DealUpdate::stage(DealStage::Lost)));

        let removed = board.delete_deal("deal-1").unwrap();
        assert_eq!(removed.id, "deal-1");
        assert!(board.deal_by_id("deal-1").is_none());
        assert!(board.delete_deal("deal-1").is_none());
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let mut board = board();
        let mut deal = board.deal_by_id("deal-2").unwrap().clone();
        deal.notes = Some("Updated by server".to_string());
        let count = board.deals.len();
        board.upsert_deal(deal);
        assert_eq!(board.deals.len(), count);
        assert_eq!(
            board.deal_by_id("deal-2").unwrap().notes.as_deref(),
            Some("Updated by server")
        );
    }

    #[test]
    fn test_deals_by_stage_groups_every_deal_once() {
        let board = board();
        let total: usize = DealStage::ALL
            .iter()
            .map(|stage| board.deals_by_stage(*stage).len())
            .sum();
        assert_eq!(total, board.deals.len());
        assert_eq!(board.deals_by_stage(DealStage::Lost)[0].id, "deal-8");
    }

    #[test]
    fn test_move_deal_and_revert() {
        let mut board = board();
        let stage_move = board.move_deal("deal-1", DealStage::Completed).unwrap();
        assert_eq!(stage_move.from, DealStage::LeadGenerated);
        assert_eq!(stage_move.to, DealStage::Completed);
        assert_eq!(board.deal_by_id("deal-1").unwrap().stage, DealStage::Completed);

        assert!(board.revert(&stage_move));
        assert_eq!(board.deal_by_id("deal-1").unwrap().stage, DealStage::LeadGenerated);
        // Already reverted: nothing left to undo.
        assert!(!board.revert(&stage_move));
    }

    #[test]
    fn test_move_to_same_stage_is_noop() {
        let mut board = board();
        assert!(board.move_deal("deal-1", DealStage::LeadGenerated).is_none());
        assert!(board.move_deal("missing", DealStage::Lost).is_none());
    }

    #[test]
    fn test_revert_skips_deal_moved_again() {
        let mut board = board();
        let first = board.move_deal("deal-1", DealStage::Contacted).unwrap();
        board.move_deal("deal-1", DealStage::Lost).unwrap();
        assert!(!board.revert(&first));
        assert_eq!(board.deal_by_id("deal-1").unwrap().stage, DealStage::Lost);
    }

    #[test]
    fn test_confirm_skips_deal_moved_again() {
        let mut board = board();
        let first = board.move_deal("deal-1", DealStage::Contacted).unwrap();
        let mut echoed = board.deal_by_id("deal-1").unwrap().clone();
        echoed.notes = Some("from server".to_string());

        let second = board.move_deal("deal-1", DealStage::Lost).unwrap();
        assert!(!board.confirm_move(&first, echoed.clone()));
        assert_eq!(board.deal_by_id("deal-1").unwrap().stage, DealStage::Lost);

        echoed.stage = DealStage::Lost;
        assert!(board.confirm_move(&second, echoed));
        let deal = board.deal_by_id("deal-1").unwrap();
        assert_eq!(deal.notes.as_deref(), Some("from server"));
    }

    #[test]
    fn test_search_matches_client_product_and_stage() {
        let board = board();
        assert_eq!(board.search("").len(), board.deals.len());

        let acme: Vec<_> = board.search("ACME").iter().map(|d| d.id.clone()).collect();
        assert_eq!(acme, vec!["deal-1", "deal-6"]);

        let analytics = board.search("analytics");
        assert!(analytics.iter().all(|d| d.product_id == "product-2"));
        assert_eq!(analytics.len(), 2);

        let lost = board.search("lost");
        assert_eq!(lost.len(), 1);
        assert_eq!(lost[0].stage, DealStage::Lost);

        assert!(board.search("no such thing").is_empty());
    }

    #[test]
    fn test_search_unknown_reference_still_matches_stage() {
        let mut board = board();
        board.clients.clear();
        board.products.clear();
        assert_eq!(board.search("contacted").len(), 1);
        assert!(board.search("acme").is_empty());
    }

    #[test]
    fn test_sort_toggle() {
        let sort = SortState::default();
        assert_eq!(sort.key, SortKey::CreatedDate);
        assert_eq!(sort.order, SortOrder::Desc);

        let flipped = sort.toggle(SortKey::CreatedDate);
        assert_eq!(flipped.order, SortOrder::Asc);

        let by_client = flipped.toggle(SortKey::ClientName);
        assert_eq!(by_client.key, SortKey::ClientName);
        assert_eq!(by_client.order, SortOrder::Asc);
    }

    #[test]
    fn test_sorted_by_date_and_stage() {
        let board = board();
        let newest_first = board.sorted(board.deals.iter().collect(), SortState::default());
        assert_eq!(newest_first[0].id, "deal-1");
        assert_eq!(newest_first.last().unwrap().id, "deal-8");

        let by_stage = board.sorted(
            board.deals.iter().collect(),
            SortState {
                key: SortKey::Stage,
                order: SortOrder::Desc,
            },
        );
        assert_eq!(by_stage[0].stage, DealStage::Lost);

        let by_client = board.sorted(
            board.deals.iter().collect(),
            SortState {
                key: SortKey::ClientName,
                order: SortOrder::Asc,
            },
        );
        assert_eq!(board.client_name(by_client[0]), "Acme Corporation");
    }

    #[test]
    fn test_sorted_by_date_mixes_formats() {
        let mut board = board();
        board.deals = vec![
            NewDeal::new("client-1", "product-1", DealStage::Contacted)
                .into_deal("old".to_string(), "2020-01-01T00:00:00Z"),
            NewDeal::new("client-1", "product-1", DealStage::Contacted)
                .into_deal("new".to_string(), "2025-06-01"),
            NewDeal::new("client-1", "product-1", DealStage::Contacted)
                .into_deal("junk".to_string(), "someday"),
        ];
        let ids: Vec<&str> = board
            .sorted(board.deals.iter().collect(), SortState::default())
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, ["new", "old", "junk"]);
    }

    #[test]
    fn test_stats() {
        let board = board();
        let stats = board.stats();
        assert_eq!(stats.total_deals, 8);
        assert_eq!(stats.completed_deals, 1);
        assert_eq!(stats.lost_deals, 1);
        assert!((stats.win_rate - 50.0).abs() < f64::EPSILON);
        assert_eq!(stats.per_stage.get(&DealStage::Contacted), Some(&1));
        assert!(stats.open_value < stats.total_value);

        assert_eq!(DealBoard::new().stats().win_rate, 0.0);
    }
}
