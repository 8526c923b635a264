//! Transposition table shared by all nodes reaching the same position.

use std::collections::HashMap;
use std::hash::Hash;

use crate::stats::{Statistics, Totals};

/// Accumulated statistics for one canonical position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transposition {
    pub visit_count: u32,
    pub reward_sum: f64,
}

impl Transposition {
    /// Mean reward, or `None` if never visited.
    pub fn mean_reward(&self) -> Option<f64> {
        Totals::from(*self).mean()
    }
}

impl From<Transposition> for Totals {
    fn from(t: Transposition) -> Self {
        Totals {
            visits: t.visit_count,
            reward_sum: t.reward_sum,
        }
    }
}

/// Map from canonical position key to merged statistics.
///
/// Owned by the caller and threaded through consecutive searches of one
/// draft; entries are never evicted.
#[derive(Clone, Debug)]
pub struct TranspositionTable<K> {
    entries: HashMap<K, Transposition>,
}

impl<K: Eq + Hash> TranspositionTable<K> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Statistics for `key`, if it has been seen.
    pub fn get(&self, key: &K) -> Option<&Transposition> {
        self.entries.get(key)
    }

    /// Number of distinct positions recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every position.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over all recorded positions.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Transposition)> {
        self.entries.iter()
    }
}

impl<K: Eq + Hash> Default for TranspositionTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> Statistics<K> for TranspositionTable<K> {
    // Nodes keep nothing beyond their own visit count
    type Slot = ();

    fn seed_root(&mut self, key: &K) {
        if !self.entries.contains_key(key) {
            self.entries.insert(key.clone(), Transposition::default());
        }
    }

    fn record(&mut self, _slot: &mut (), key: &K, reward: f64) {
        // Only clone the key the first time a position is seen
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.visit_count += 1;
                entry.reward_sum += reward;
            }
            None => {
                self.entries.insert(
                    key.clone(),
                    Transposition {
                        visit_count: 1,
                        reward_sum: reward,
                    },
                );
            }
        }
    }

    fn totals(&self, _slot: &(), key: &K, _visits: u32) -> Option<Totals> {
        self.get(key).map(|t| Totals::from(*t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_root_does_not_reset() {
        let mut table: TranspositionTable<u32> = TranspositionTable::new();
        table.record(&mut (), &7, 1.0);
        table.seed_root(&7);
        assert_eq!(table.get(&7).unwrap().visit_count, 1);

        table.seed_root(&8);
        assert_eq!(table.get(&8), Some(&Transposition::default()));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_records_merge_per_key() {
        let mut table: TranspositionTable<&str> = TranspositionTable::default();
        table.record(&mut (), &"a", 0.9);
        table.record(&mut (), &"a", 0.1);
        table.record(&mut (), &"b", 0.3);

        let a = table.get(&"a").unwrap();
        assert_eq!(a.visit_count, 2);
        assert!((a.mean_reward().unwrap() - 0.5).abs() < 1e-12);

        // Node visit count is ignored in favour of the table's own count
        let totals = table.totals(&(), &"b", 99).unwrap();
        assert_eq!(totals.visits, 1);
        assert!(table.totals(&(), &"c", 1).is_none());
    }

    #[test]
    fn test_clear() {
        let mut table: TranspositionTable<u8> = TranspositionTable::new();
        table.record(&mut (), &1, 0.5);
        assert!(!table.is_empty());
        table.clear();
        assert!(table.is_empty());
    }
}
