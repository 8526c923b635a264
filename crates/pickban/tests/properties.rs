//! Property-based tests for the draft model.
//!
//! - Legal actions have the step's arity and only use available heroes
//! - Random playouts always end with full, disjoint teams
//! - The transposition key depends only on the three hero sets

use std::collections::BTreeSet;

use drafter_core::{Game, Side};
use drafter_pickban::{Action, DraftRules, DraftState, HeroId, Phase};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

fn arb_rules() -> impl Strategy<Value = DraftRules> {
    prop_oneof![
        Just(DraftRules::captains_mode(24).unwrap()),
        Just(DraftRules::all_pick(14).unwrap()),
        Just(DraftRules::all_pick(14).unwrap().with_first(Side::Dire)),
        Just(
            DraftRules::new((0..10).map(HeroId), "b2,b1,p2,p1,p1,p2".parse().unwrap(), 3, Side::Radiant)
                .unwrap()
        ),
    ]
}

/// Random reachable state: rules, seed, and number of steps to play.
fn arb_reachable() -> impl Strategy<Value = (DraftRules, u64, usize)> {
    (arb_rules(), any::<u64>(), 0usize..20)
}

fn play_random(game: &DraftRules, seed: u64, steps: usize) -> DraftState {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = game.initial_state();
    for _ in 0..steps {
        let Some(action) = game.legal_actions(&state).choose(&mut rng).cloned() else {
            break;
        };
        state = game.apply(&state, &action).unwrap();
    }
    state
}

proptest! {
    /// Every legal action matches the step's arity and uses distinct,
    /// available heroes; the list itself has no duplicates.
    #[test]
    fn prop_legal_actions_well_formed((game, seed, steps) in arb_reachable()) {
        let state = play_random(&game, seed, steps);
        let actions = game.legal_actions(&state);

        match game.current_step(&state) {
            None => prop_assert!(actions.is_empty()),
            Some(step) => {
                prop_assert!(!actions.is_empty());
                let unique: BTreeSet<&Action> = actions.iter().collect();
                prop_assert_eq!(unique.len(), actions.len());
                for action in actions {
                    prop_assert_eq!(action.len(), step.count as usize);
                    prop_assert!(!action.has_duplicates());
                    for &hero in action.heroes() {
                        prop_assert!(state.is_available(hero));
                    }
                }
            }
        }
    }

    /// Applying any legal action advances the step and flips the side.
    #[test]
    fn prop_apply_advances((game, seed, steps) in arb_reachable()) {
        let state = play_random(&game, seed, steps);
        if let Some(step) = game.current_step(&state) {
            let action = game.legal_actions(&state)[0].clone();
            let next = game.apply(&state, &action).unwrap();
            prop_assert_eq!(next.step(), state.step() + 1);
            prop_assert_eq!(next.to_move(), state.to_move().opposite());
            prop_assert_eq!(game.last_mover(&next), state.to_move());
            let gained = match step.phase {
                Phase::Pick => next.position().team(state.to_move()).len()
                    - state.position().team(state.to_move()).len(),
                Phase::Ban => next.banned().len() - state.banned().len(),
            };
            prop_assert_eq!(gained, step.count as usize);
        }
    }

    /// Playing to the end fills both teams and touches no hero twice.
    #[test]
    fn prop_playout_ends_with_full_teams(game in arb_rules(), seed in any::<u64>()) {
        let state = play_random(&game, seed, usize::MAX);
        prop_assert!(game.is_terminal(&state));
        prop_assert_eq!(state.radiant().len(), game.team_size());
        prop_assert_eq!(state.dire().len(), game.team_size());
        prop_assert!(state.radiant().is_disjoint(state.dire()));
        prop_assert!(state.radiant().is_disjoint(state.banned()));
        prop_assert!(state.dire().is_disjoint(state.banned()));
        prop_assert_eq!(state.step(), game.schedule().len());

        let features = game.observe(&state);
        let ones = features.iter().filter(|&&f| f == 1.0).count();
        prop_assert_eq!(ones, 2 * game.team_size());
    }

    /// Replaying a history gives the state the history was recorded from.
    #[test]
    fn prop_replay_matches_play((game, seed, steps) in arb_reachable()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = game.initial_state();
        let mut history = Vec::new();
        for _ in 0..steps {
            let Some(action) = game.legal_actions(&state).choose(&mut rng).cloned() else {
                break;
            };
            state = game.apply(&state, &action).unwrap();
            history.push(action);
        }
        let replayed = game.replay(&history).unwrap();
        prop_assert_eq!(&replayed, &state);
        prop_assert_eq!(game.position_key(&replayed), game.position_key(&state));
    }
}

#[test]
fn test_swapped_bans_reach_the_same_state() {
    let game = DraftRules::new(
        (0..6).map(HeroId),
        "b1,b1,p1,p1".parse().unwrap(),
        1,
        Side::Radiant,
    )
    .unwrap();
    // Radiant bans 4 then Dire bans 5, against the reverse
    let a = game
        .replay(&[Action::single(HeroId(4)), Action::single(HeroId(5))])
        .unwrap();
    let b = game
        .replay(&[Action::single(HeroId(5)), Action::single(HeroId(4))])
        .unwrap();
    assert_eq!(game.position_key(&a), game.position_key(&b));
    assert_eq!(a, b);
    assert_eq!(game.legal_actions(&a), game.legal_actions(&b));
}
