//! Drafter Pick/Ban - the 5-vs-5 hero draft as a sequential game
//!
//! Two sides alternate through a fixed schedule of pick and ban steps.
//! Each step chooses a group of heroes at once; picks join the acting
//! side's team and bans remove heroes from play. The draft ends when both
//! teams are full.
//!
//! # Example
//!
//! ```
//! use drafter_core::Game;
//! use drafter_pickban::{Action, DraftRules, HeroId};
//!
//! let rules = DraftRules::all_pick(20).unwrap();
//! let state = rules.initial_state();
//! assert_eq!(rules.legal_actions(&state).len(), 20);
//!
//! let next = rules.apply(&state, &Action::single(HeroId(7))).unwrap();
//! assert!(next.radiant().contains(&HeroId(7)));
//! ```

mod game_impl;
mod hero;
mod rules;
mod schedule;
mod state;

pub use hero::{Action, HeroId};
pub use rules::DraftRules;
pub use schedule::{Phase, Schedule, Step};
pub use state::{DraftState, Position};
