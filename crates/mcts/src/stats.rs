//! Statistics-access strategies.
//!
//! Every search node keeps its own visit count (the UCB1 exploration term
//! needs it). Where the reward total for the value term lives is decided by
//! a [`Statistics`] strategy: directly on the node ([`LocalStatistics`]) or
//! in a table keyed by canonical position
//! ([`TranspositionTable`](crate::TranspositionTable)).

/// Visit count and accumulated reward read back for the UCB1 value term.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    pub visits: u32,
    pub reward_sum: f64,
}

impl Totals {
    /// Mean reward, or `None` if never visited.
    pub fn mean(&self) -> Option<f64> {
        if self.visits == 0 {
            None
        } else {
            Some(self.reward_sum / self.visits as f64)
        }
    }
}

/// Where reward statistics are stored and read.
///
/// `K` is the game's canonical position key.
pub trait Statistics<K> {
    /// Per-node payload owned by the tree.
    type Slot: Default;

    /// Called once per search with the root's key before iterating.
    fn seed_root(&mut self, _key: &K) {}

    /// Add one backed-up reward for a node. The node's own visit count has
    /// already been incremented by the caller.
    fn record(&mut self, slot: &mut Self::Slot, key: &K, reward: f64);

    /// Totals for the value term of a node with `visits` own visits.
    ///
    /// `None` means no statistics exist for this node.
    fn totals(&self, slot: &Self::Slot, key: &K, visits: u32) -> Option<Totals>;
}

/// Statistics kept on the node itself: the slot is the reward sum.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStatistics;

impl<K> Statistics<K> for LocalStatistics {
    type Slot = f64;

    fn record(&mut self, slot: &mut f64, _key: &K, reward: f64) {
        *slot += reward;
    }

    fn totals(&self, slot: &f64, _key: &K, visits: u32) -> Option<Totals> {
        Some(Totals {
            visits,
            reward_sum: *slot,
        })
    }
}
