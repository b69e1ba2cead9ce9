//! Market identifiers and the label ↔ id mapping

use std::collections::HashMap;

/// Exchange-internal integer naming a trading pair
pub type MarketId = u32;

/// Order identifier
pub type OrderId = u64;

/// Trade identifier
pub type TradeId = u64;

/// Bidirectional map between pair labels (e.g. `"LTC/BTC"`) and market ids
///
/// Built once from the market list and read-only afterwards. A market added
/// on the exchange later is not visible until the map is rebuilt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketMap {
    by_label: HashMap<String, MarketId>,
    by_id: HashMap<MarketId, String>,
}

impl MarketMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Market id for a pair label
    pub fn id(&self, label: &str) -> Option<MarketId> {
        self.by_label.get(label).copied()
    }

    /// Pair label for a market id
    pub fn label(&self, id: MarketId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// Returns true if the label is known
    pub fn contains_label(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    /// All known pair labels, sorted
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.by_label.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    /// Label → id view
    pub fn by_label(&self) -> &HashMap<String, MarketId> {
        &self.by_label
    }

    /// Id → label view
    pub fn by_id(&self) -> &HashMap<MarketId, String> {
        &self.by_id
    }

    /// Number of markets
    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    /// Returns true if no markets are known
    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }

    fn insert(&mut self, label: String, id: MarketId) {
        if let Some(old_id) = self.by_label.insert(label.clone(), id) {
            self.by_id.remove(&old_id);
        }
        if let Some(old_label) = self.by_id.insert(id, label) {
            if self.by_label.get(&old_label) == Some(&id) {
                self.by_label.remove(&old_label);
            }
        }
    }
}

impl<L: Into<String>> FromIterator<(L, MarketId)> for MarketMap {
    fn from_iter<I: IntoIterator<Item = (L, MarketId)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (label, id) in iter {
            map.insert(label.into(), id);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_directions() {
        let map: MarketMap = [("LTC/BTC", 3), ("DOGE/BTC", 132)].into_iter().collect();
        assert_eq!(map.id("LTC/BTC"), Some(3));
        assert_eq!(map.label(132), Some("DOGE/BTC"));
        assert_eq!(map.id("XPM/BTC"), None);
        assert_eq!(map.labels(), vec!["DOGE/BTC", "LTC/BTC"]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_directions_stay_consistent_on_relabel() {
        let map: MarketMap = [("OLD/BTC", 7), ("NEW/BTC", 7)].into_iter().collect();
        assert_eq!(map.label(7), Some("NEW/BTC"));
        assert_eq!(map.id("OLD/BTC"), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.by_id().len(), 1);
    }
}
