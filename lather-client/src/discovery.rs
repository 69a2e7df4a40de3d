//! Store discovery
//!
//! Distance ordering for the store list and the favorites collection.
//! Stores without a location fix keep their positions; everything with a
//! resolvable distance is ordered among itself.

use serde::{Deserialize, Serialize};
use shared::models::{GeoPoint, SortDirection, Store};

/// Order `stores` by distance from `from`, in place.
///
/// Stores whose distance cannot be resolved (no location fix) are left at
/// their original indices; the rest are sorted into the remaining indices.
/// Ties keep their relative input order.
pub fn sort_by_distance(stores: &mut [Store], from: &GeoPoint, direction: SortDirection) {
    let mut known: Vec<(usize, f64)> = stores
        .iter()
        .enumerate()
        .filter_map(|(idx, store)| store.distance_from(from).map(|d| (idx, d)))
        .collect();

    if known.len() < 2 {
        return;
    }

    let slots: Vec<usize> = known.iter().map(|(idx, _)| *idx).collect();
    known.sort_by(|a, b| a.1.total_cmp(&b.1));
    if direction == SortDirection::Descending {
        known.reverse();
    }

    let ordered: Vec<Store> = known
        .iter()
        .map(|(idx, _)| stores[*idx].clone())
        .collect();
    for (slot, store) in slots.into_iter().zip(ordered) {
        stores[slot] = store;
    }
}

/// Distance from `from` for display, `None` when unresolvable
pub fn distance_km(store: &Store, from: &GeoPoint) -> Option<f64> {
    store.distance_from(from)
}

/// Favorited store ids: ordered, countable, contains-by-id
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Favorites {
    ids: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a store id; duplicates are ignored. Returns whether it was added.
    pub fn add(&mut self, store_id: impl Into<String>) -> bool {
        let store_id = store_id.into();
        if self.ids.contains(&store_id) {
            return false;
        }
        self.ids.push(store_id);
        true
    }

    /// Remove a store id; returns whether it was present
    pub fn remove(&mut self, store_id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| id != store_id);
        self.ids.len() != before
    }

    pub fn contains(&self, store_id: &str) -> bool {
        self.ids.iter().any(|id| id == store_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_at(id: &str, lat: f64) -> Store {
        Store::new(id, id, "somewhere").with_location(lat, 0.0)
    }

    fn ids(stores: &[Store]) -> Vec<&str> {
        stores.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_sort_ascending_by_distance() {
        let here = GeoPoint::new(0.0, 0.0);
        let mut stores = vec![store_at("far", 3.0), store_at("near", 1.0), store_at("mid", 2.0)];
        sort_by_distance(&mut stores, &here, SortDirection::Ascending);
        assert_eq!(ids(&stores), ["near", "mid", "far"]);
    }

    #[test]
    fn test_sort_descending_by_distance() {
        let here = GeoPoint::new(0.0, 0.0);
        let mut stores = vec![store_at("near", 1.0), store_at("far", 3.0)];
        sort_by_distance(&mut stores, &here, SortDirection::Descending);
        assert_eq!(ids(&stores), ["far", "near"]);
    }

    #[test]
    fn test_unknown_distance_keeps_position() {
        let here = GeoPoint::new(0.0, 0.0);
        let mut stores = vec![
            store_at("far", 3.0),
            Store::new("nofix", "nofix", "unknown"),
            store_at("near", 1.0),
        ];
        sort_by_distance(&mut stores, &here, SortDirection::Ascending);
        // "nofix" stays at index 1; the others order around it
        assert_eq!(ids(&stores), ["near", "nofix", "far"]);
    }

    #[test]
    fn test_all_unknown_is_untouched() {
        let here = GeoPoint::new(0.0, 0.0);
        let mut stores = vec![
            Store::new("a", "a", "x"),
            Store::new("b", "b", "y"),
        ];
        sort_by_distance(&mut stores, &here, SortDirection::Ascending);
        assert_eq!(ids(&stores), ["a", "b"]);
    }

    #[test]
    fn test_favorites_membership() {
        let mut favorites = Favorites::new();
        assert!(favorites.add("s1"));
        assert!(favorites.add("s2"));
        assert!(!favorites.add("s1"));

        assert_eq!(favorites.len(), 2);
        assert!(favorites.contains("s1"));
        assert_eq!(favorites.get(1), Some("s2"));

        assert!(favorites.remove("s1"));
        assert!(!favorites.remove("s1"));
        assert_eq!(favorites.len(), 1);
    }
}
