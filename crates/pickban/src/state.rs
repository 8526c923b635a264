//! Draft positions and states.

use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::fmt;

use drafter_core::Side;
use serde::{Deserialize, Serialize};

use crate::{Action, HeroId};

/// The three hero sets of a draft: Radiant picks, Dire picks, bans.
///
/// This is the canonical transposition key. It deliberately leaves out whose
/// turn it is and the schedule step, so different move orders reaching the
/// same three sets share one statistics record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    radiant: BTreeSet<HeroId>,
    dire: BTreeSet<HeroId>,
    banned: BTreeSet<HeroId>,
}

impl Position {
    /// Heroes picked by Radiant.
    pub fn radiant(&self) -> &BTreeSet<HeroId> {
        &self.radiant
    }

    /// Heroes picked by Dire.
    pub fn dire(&self) -> &BTreeSet<HeroId> {
        &self.dire
    }

    /// Heroes removed from play.
    pub fn banned(&self) -> &BTreeSet<HeroId> {
        &self.banned
    }

    /// Heroes picked by `side`.
    pub fn team(&self, side: Side) -> &BTreeSet<HeroId> {
        match side {
            Side::Radiant => &self.radiant,
            Side::Dire => &self.dire,
        }
    }

    /// True if `hero` is already picked or banned.
    pub fn contains(&self, hero: HeroId) -> bool {
        self.radiant.contains(&hero) || self.dire.contains(&hero) || self.banned.contains(&hero)
    }

    /// Number of heroes no longer available.
    pub fn len(&self) -> usize {
        self.radiant.len() + self.dire.len() + self.banned.len()
    }

    /// True if nothing has been picked or banned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn with_picks(&self, side: Side, action: &Action) -> Self {
        let mut next = self.clone();
        let team = match side {
            Side::Radiant => &mut next.radiant,
            Side::Dire => &mut next.dire,
        };
        team.extend(action.heroes().iter().copied());
        next
    }

    pub(crate) fn with_bans(&self, action: &Action) -> Self {
        let mut next = self.clone();
        next.banned.extend(action.heroes().iter().copied());
        next
    }
}

/// An immutable draft state.
///
/// Created by [`DraftRules::initial_state`](crate::DraftRules) and by
/// applying actions. The legal-action list is generated on first request
/// and cached for the lifetime of this instance.
#[derive(Clone)]
pub struct DraftState {
    position: Position,
    to_move: Side,
    step: usize,
    pub(crate) actions: OnceCell<Vec<Action>>,
}

impl DraftState {
    pub(crate) fn new(position: Position, to_move: Side, step: usize) -> Self {
        Self {
            position,
            to_move,
            step,
            actions: OnceCell::new(),
        }
    }

    /// The three hero sets.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Heroes picked by Radiant.
    pub fn radiant(&self) -> &BTreeSet<HeroId> {
        self.position.radiant()
    }

    /// Heroes picked by Dire.
    pub fn dire(&self) -> &BTreeSet<HeroId> {
        self.position.dire()
    }

    /// Heroes removed from play.
    pub fn banned(&self) -> &BTreeSet<HeroId> {
        self.position.banned()
    }

    /// Side acting at the current step.
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Side whose move produced this state.
    pub fn last_mover(&self) -> Side {
        self.to_move.opposite()
    }

    /// Index into the schedule of the next step.
    pub fn step(&self) -> usize {
        self.step
    }

    /// True if `hero` can still be picked or banned.
    pub fn is_available(&self, hero: HeroId) -> bool {
        !self.position.contains(hero)
    }
}

impl PartialEq for DraftState {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.to_move == other.to_move && self.step == other.step
    }
}

impl Eq for DraftState {}

impl fmt::Debug for DraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftState")
            .field("position", &self.position)
            .field("to_move", &self.to_move)
            .field("step", &self.step)
            .finish()
    }
}

impl fmt::Display for DraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, heroes: &BTreeSet<HeroId>) -> fmt::Result {
            write!(f, "[")?;
            for (i, hero) in heroes.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", hero)?;
            }
            write!(f, "]")
        }

        write!(f, "Banned: ")?;
        list(f, self.banned())?;
        write!(f, " Radiant: ")?;
        list(f, self.radiant())?;
        write!(f, " Dire: ")?;
        list(f, self.dire())?;
        write!(f, " Next: {} (step {})", self.to_move, self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_updates_are_persistent() {
        let empty = Position::default();
        let picked = empty.with_picks(Side::Dire, &Action::new([HeroId(4), HeroId(2)]));
        let banned = picked.with_bans(&Action::single(HeroId(9)));

        assert!(empty.is_empty());
        assert_eq!(picked.dire().len(), 2);
        assert!(picked.banned().is_empty());
        assert_eq!(banned.len(), 3);
        assert!(banned.contains(HeroId(9)));
        assert!(!banned.contains(HeroId(1)));
        assert_eq!(banned.team(Side::Dire), picked.dire());
    }

    #[test]
    fn test_state_equality_ignores_cache() {
        let a = DraftState::new(Position::default(), Side::Radiant, 0);
        let b = a.clone();
        let _ = a.actions.set(Vec::new());
        assert_eq!(a, b);
        assert_eq!(a.last_mover(), Side::Dire);
    }

    #[test]
    fn test_display() {
        let position = Position::default().with_bans(&Action::single(HeroId(3)));
        let state = DraftState::new(position, Side::Dire, 1);
        assert_eq!(
            state.to_string(),
            "Banned: [3] Radiant: [] Dire: [] Next: Dire (step 1)"
        );
    }
}
