//! Hero identifiers and draft actions.

use std::fmt;
use std::str::FromStr;

use drafter_core::DraftError;
use serde::{Deserialize, Serialize};

/// Opaque hero identifier.
///
/// Name resolution lives outside this crate; the draft only needs ids to be
/// distinct and totally ordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(pub u16);

impl HeroId {
    /// Get the raw id.
    pub fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for HeroId {
    fn from(id: u16) -> Self {
        HeroId(id)
    }
}

/// An unordered group of heroes picked or banned in one schedule step.
///
/// Heroes are kept sorted so that two actions naming the same heroes in a
/// different order compare equal. Duplicates are preserved on purpose so
/// that rule checking can reject them instead of silently collapsing them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action(Vec<HeroId>);

impl Action {
    /// Create an action from any collection of heroes.
    pub fn new(heroes: impl IntoIterator<Item = HeroId>) -> Self {
        let mut heroes: Vec<HeroId> = heroes.into_iter().collect();
        heroes.sort_unstable();
        Self(heroes)
    }

    /// Create a single-hero action.
    pub fn single(hero: HeroId) -> Self {
        Self(vec![hero])
    }

    /// Heroes in ascending id order.
    pub fn heroes(&self) -> &[HeroId] {
        &self.0
    }

    /// Number of heroes in the action.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the action names no heroes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `hero` is part of this action.
    pub fn contains(&self, hero: HeroId) -> bool {
        self.0.binary_search(&hero).is_ok()
    }

    /// True if some hero is named more than once.
    pub fn has_duplicates(&self) -> bool {
        self.0.windows(2).any(|w| w[0] == w[1])
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, hero) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", hero)?;
        }
        Ok(())
    }
}

impl FromStr for Action {
    type Err = DraftError;

    /// Parse a comma-separated list of hero ids, e.g. `"12,40"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let heroes = s
            .split(',')
            .map(|token| {
                token.trim().parse::<u16>().map(HeroId).map_err(|_| {
                    DraftError::InvalidAction(format!("'{}' is not a hero id", token.trim()))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Action::new(heroes))
    }
}

impl From<HeroId> for Action {
    fn from(hero: HeroId) -> Self {
        Action::single(hero)
    }
}

/// All size-`k` subsets of `pool`, in lexicographic order of positions.
///
/// `pool` must be sorted so every produced action is already normalized.
pub(crate) fn combinations(pool: &[HeroId], k: usize) -> Vec<Action> {
    let n = pool.len();
    if k == 0 || k > n {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut indices: Vec<usize> = (0..k).collect();

    loop {
        result.push(Action(indices.iter().map(|&i| pool[i]).collect()));

        // Find the rightmost index that can still move right
        let mut i = k;
        while i > 0 && indices[i - 1] == n - k + (i - 1) {
            i -= 1;
        }
        if i == 0 {
            break;
        }
        indices[i - 1] += 1;
        for j in i..k {
            indices[j] = indices[j - 1] + 1;
        }
    }

    result
}
