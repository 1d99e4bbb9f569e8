use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Identifies one cached remote read.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    AllDeals,
    SingleDeal(String),
    AllClients,
    AllProducts,
    AllStages,
}

/// Results of remote reads, keyed by [`QueryKey`].
///
/// Entries are stored as JSON values so one map can hold every response type.
#[derive(Clone, Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, serde_json::Value>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let value = self.entries.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(?key, "dropping unreadable cache entry: {e}");
                None
            }
        }
    }

    pub fn insert<T: Serialize>(&mut self, key: QueryKey, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.entries.insert(key, v);
            }
            Err(e) => tracing::warn!(?key, "not caching response: {e}"),
        }
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn invalidate(&mut self, key: &QueryKey) {
        self.entries.remove(key);
    }

    /// Drop the deal list and, when given, one deal's entry.
    pub fn invalidate_deals(&mut self, id: Option<&str>) {
        self.invalidate(&QueryKey::AllDeals);
        if let Some(id) = id {
            self.invalidate(&QueryKey::SingleDeal(id.to_string()));
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::sample;

    #[test]
    fn test_insert_get() {
        let mut cache = QueryCache::new();
        assert!(cache.get::<Vec<store::Deal>>(&QueryKey::AllDeals).is_none());

        cache.insert(QueryKey::AllDeals, &sample::deals());
        let deals: Vec<store::Deal> = cache.get(&QueryKey::AllDeals).unwrap();
        assert_eq!(deals, sample::deals());
        assert!(cache.contains(&QueryKey::AllDeals));
    }

    #[test]
    fn test_invalidate_deals_keeps_reference_data() {
        let mut cache = QueryCache::new();
        cache.insert(QueryKey::AllDeals, &sample::deals());
        cache.insert(QueryKey::SingleDeal("deal-1".into()), &sample::deals()[0]);
        cache.insert(QueryKey::SingleDeal("deal-2".into()), &sample::deals()[1]);
        cache.insert(QueryKey::AllClients, &sample::clients());

        cache.invalidate_deals(Some("deal-1"));

        assert!(!cache.contains(&QueryKey::AllDeals));
        assert!(!cache.contains(&QueryKey::SingleDeal("deal-1".into())));
        assert!(cache.contains(&QueryKey::SingleDeal("deal-2".into())));
        assert!(cache.contains(&QueryKey::AllClients));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_wrong_type_is_a_miss() {
        let mut cache = QueryCache::new();
        cache.insert(QueryKey::AllStages, &"not a list");
        assert!(cache.get::<Vec<store::StageInfo>>(&QueryKey::AllStages).is_none());
    }
}
