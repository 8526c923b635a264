//! Per-session draft configuration.

use drafter_core::{DraftError, Game, Result, Side};

use crate::hero::combinations;
use crate::{Action, DraftState, HeroId, Phase, Position, Schedule, Step};

/// Immutable configuration for one drafting session.
///
/// Holds the hero pool, the pick/ban schedule, the team size and the side
/// that opens the draft. Constructed once and passed by reference to
/// everything that needs it; there is no global draft mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftRules {
    heroes: Vec<HeroId>,
    schedule: Schedule,
    team_size: usize,
    first: Side,
}

impl DraftRules {
    /// Standard team size.
    pub const TEAM_SIZE: usize = 5;

    /// Create validated rules.
    ///
    /// # Errors
    /// Returns `DraftError::InvalidRules` if:
    /// - the hero pool or the schedule is empty, or the team size is zero
    /// - a step chooses zero heroes
    /// - either side's picks do not add up to exactly `team_size`
    /// - the schedule ends with a ban, which would follow the final pick
    /// - the schedule consumes more heroes than the pool holds
    pub fn new(
        heroes: impl IntoIterator<Item = HeroId>,
        schedule: Schedule,
        team_size: usize,
        first: Side,
    ) -> Result<Self> {
        let mut heroes: Vec<HeroId> = heroes.into_iter().collect();
        heroes.sort_unstable();
        heroes.dedup();

        if heroes.is_empty() {
            return Err(DraftError::InvalidRules("hero pool is empty".to_string()));
        }
        if team_size == 0 {
            return Err(DraftError::InvalidRules(
                "team size must be at least 1".to_string(),
            ));
        }
        if schedule.is_empty() {
            return Err(DraftError::InvalidRules("schedule is empty".to_string()));
        }
        if let Some(index) = schedule.steps().iter().position(|step| step.count == 0) {
            return Err(DraftError::InvalidRules(format!(
                "schedule step {} chooses zero heroes",
                index
            )));
        }
        for parity in 0..2 {
            let picks = schedule.picks_for_parity(parity);
            if picks != team_size {
                let side = if parity == 0 { first } else { first.opposite() };
                return Err(DraftError::InvalidRules(format!(
                    "{} picks {} heroes but team size is {}",
                    side, picks, team_size
                )));
            }
        }
        if let Some(Step {
            phase: Phase::Ban, ..
        }) = schedule.steps().last()
        {
            return Err(DraftError::InvalidRules(
                "schedule must end with a pick; trailing bans are never reached".to_string(),
            ));
        }
        let consumed = schedule.heroes_consumed();
        if consumed > heroes.len() {
            return Err(DraftError::InvalidRules(format!(
                "schedule consumes {} heroes but the pool has {}",
                consumed,
                heroes.len()
            )));
        }

        Ok(Self {
            heroes,
            schedule,
            team_size,
            first,
        })
    }

    /// Captains mode over `hero_count` heroes with ids `0..hero_count`.
    pub fn captains_mode(hero_count: u16) -> Result<Self> {
        Self::new(
            (0..hero_count).map(HeroId),
            Schedule::captains_mode(),
            Self::TEAM_SIZE,
            Side::Radiant,
        )
    }

    /// All pick over `hero_count` heroes with ids `0..hero_count`.
    pub fn all_pick(hero_count: u16) -> Result<Self> {
        Self::new(
            (0..hero_count).map(HeroId),
            Schedule::all_pick(),
            Self::TEAM_SIZE,
            Side::Radiant,
        )
    }

    /// Same rules with a different opening side.
    pub fn with_first(mut self, first: Side) -> Self {
        self.first = first;
        self
    }

    /// The hero pool, sorted ascending.
    pub fn heroes(&self) -> &[HeroId] {
        &self.heroes
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn team_size(&self) -> usize {
        self.team_size
    }

    /// Side acting at step 0.
    pub fn first(&self) -> Side {
        self.first
    }

    /// Rank of `hero` in the sorted pool (its feature index).
    pub fn hero_index(&self, hero: HeroId) -> Option<usize> {
        self.heroes.binary_search(&hero).ok()
    }

    /// The schedule step `state` is waiting on, if any.
    pub fn current_step(&self, state: &DraftState) -> Option<Step> {
        if self.is_terminal(state) {
            return None;
        }
        self.schedule.get(state.step())
    }

    /// Rebuild a state by applying `history` from the initial state.
    ///
    /// # Errors
    /// Returns `DraftError::InvalidAction` naming the first illegal action.
    pub fn replay<'a>(&self, history: impl IntoIterator<Item = &'a Action>) -> Result<DraftState> {
        history
            .into_iter()
            .try_fold(self.initial_state(), |state, action| self.apply(&state, action))
    }

    /// Enumerate every legal action of `state` (uncached).
    pub(crate) fn generate_actions(&self, state: &DraftState) -> Vec<Action> {
        let Some(step) = self.current_step(state) else {
            return Vec::new();
        };
        let pool: Vec<HeroId> = self
            .heroes
            .iter()
            .copied()
            .filter(|&hero| state.is_available(hero))
            .collect();
        combinations(&pool, step.count as usize)
    }

    /// Check `action` against `state` without enumerating the legal set.
    ///
    /// Accepts exactly the members of `generate_actions(state)`.
    pub(crate) fn check_action(&self, state: &DraftState, action: &Action) -> Result<Step> {
        let step = self.current_step(state).ok_or_else(|| {
            DraftError::InvalidAction("the draft is already complete".to_string())
        })?;

        if action.len() != step.count as usize {
            return Err(DraftError::InvalidAction(format!(
                "step {} is a {} of {} heroes but {} were given",
                state.step(),
                step.phase,
                step.count,
                action.len()
            )));
        }
        if action.has_duplicates() {
            return Err(DraftError::InvalidAction(format!(
                "action {} names a hero twice",
                action
            )));
        }
        for &hero in action.heroes() {
            if self.hero_index(hero).is_none() {
                return Err(DraftError::InvalidAction(format!(
                    "hero {} is not in the pool",
                    hero
                )));
            }
            if !state.is_available(hero) {
                return Err(DraftError::InvalidAction(format!(
                    "hero {} is already picked or banned",
                    hero
                )));
            }
        }
        Ok(step)
    }

    /// Successor of `state` after a checked action.
    pub(crate) fn successor(&self, state: &DraftState, step: Step, action: &Action) -> DraftState {
        let mover = state.to_move();
        let position: Position = match step.phase {
            Phase::Pick => state.position().with_picks(mover, action),
            Phase::Ban => state.position().with_bans(action),
        };
        DraftState::new(position, mover.opposite(), state.step() + 1)
    }
}
