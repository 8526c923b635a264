//! Implementation of the drafter Game trait for pick/ban drafts.

use drafter_core::{Game, Result, Side};

use crate::{Action, DraftRules, DraftState, Position};

impl Game for DraftRules {
    type State = DraftState;
    type Action = Action;
    type Key = Position;
    // One-hot Radiant picks followed by one-hot Dire picks
    type Observation = Vec<f32>;

    fn initial_state(&self) -> DraftState {
        DraftState::new(Position::default(), self.first(), 0)
    }

    fn legal_actions<'s>(&self, state: &'s DraftState) -> &'s [Action] {
        state.actions.get_or_init(|| self.generate_actions(state))
    }

    fn apply(&self, state: &DraftState, action: &Action) -> Result<DraftState> {
        let step = self.check_action(state, action)?;
        Ok(self.successor(state, step, action))
    }

    fn is_terminal(&self, state: &DraftState) -> bool {
        state.radiant().len() == self.team_size() && state.dire().len() == self.team_size()
    }

    fn last_mover(&self, state: &DraftState) -> Side {
        state.last_mover()
    }

    fn position_key<'s>(&self, state: &'s DraftState) -> &'s Position {
        state.position()
    }

    fn observe(&self, state: &DraftState) -> Vec<f32> {
        let width = self.heroes().len();
        let mut features = vec![0.0; 2 * width];
        for &hero in state.radiant() {
            if let Some(i) = self.hero_index(hero) {
                features[i] = 1.0;
            }
        }
        for &hero in state.dire() {
            if let Some(i) = self.hero_index(hero) {
                features[width + i] = 1.0;
            }
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeroId, Schedule};
    use drafter_core::DraftError;

    fn tiny() -> DraftRules {
        // Radiant picks one, Dire picks one, from three heroes
        DraftRules::new(
            [HeroId(0), HeroId(1), HeroId(2)],
            "p1,p1".parse().unwrap(),
            1,
            Side::Radiant,
        )
        .unwrap()
    }

    #[test]
    fn test_game_trait_basic() {
        let game = tiny();
        let state = game.initial_state();

        assert!(!game.is_terminal(&state));
        assert_eq!(state.to_move(), Side::Radiant);
        assert_eq!(game.last_mover(&state), Side::Dire);
        assert_eq!(game.legal_actions(&state).len(), 3);
    }

    #[test]
    fn test_game_apply_pick() {
        let game = tiny();
        let state = game.initial_state();
        let next = game.apply(&state, &Action::single(HeroId(1))).unwrap();

        // The receiver is untouched
        assert!(state.radiant().is_empty());
        assert_eq!(state.step(), 0);

        assert!(next.radiant().contains(&HeroId(1)));
        assert_eq!(next.to_move(), Side::Dire);
        assert_eq!(game.last_mover(&next), Side::Radiant);
        assert_eq!(next.step(), 1);
        assert_eq!(game.legal_actions(&next).len(), 2);
    }

    #[test]
    fn test_game_terminal() {
        let game = tiny();
        let state = game.initial_state();
        let state = game.apply(&state, &Action::single(HeroId(0))).unwrap();
        let state = game.apply(&state, &Action::single(HeroId(2))).unwrap();

        assert!(game.is_terminal(&state));
        assert!(game.legal_actions(&state).is_empty());
        assert!(matches!(
            game.apply(&state, &Action::single(HeroId(1))),
            Err(DraftError::InvalidAction(_))
        ));
    }

    #[test]
    fn test_game_rejects_illegal_actions() {
        let game = tiny();
        let state = game.initial_state();
        let taken = game.apply(&state, &Action::single(HeroId(0))).unwrap();

        // Already picked
        assert!(game.apply(&taken, &Action::single(HeroId(0))).is_err());
        // Not in the pool
        assert!(game.apply(&state, &Action::single(HeroId(7))).is_err());
        // Wrong arity
        assert!(game
            .apply(&state, &Action::new([HeroId(1), HeroId(2)]))
            .is_err());
    }

    #[test]
    fn test_game_double_pick_and_ban() {
        let game = DraftRules::new(
            (0..6).map(HeroId),
            "b1,p2,p2".parse::<Schedule>().unwrap(),
            2,
            Side::Dire,
        );
        // Dire opens: bans at step 0 and picks 2 at step 2, Radiant picks 2 at step 1
        let game = game.unwrap();
        let state = game.initial_state();
        assert_eq!(state.to_move(), Side::Dire);

        let state = game.apply(&state, &Action::single(HeroId(5))).unwrap();
        assert!(state.banned().contains(&HeroId(5)));
        assert_eq!(game.legal_actions(&state).len(), 10); // C(5, 2)

        let state = game
            .apply(&state, &Action::new([HeroId(3), HeroId(0)]))
            .unwrap();
        assert_eq!(state.radiant().len(), 2);
        assert!(game
            .apply(&state, &Action::new([HeroId(1), HeroId(1)]))
            .is_err());
    }

    #[test]
    fn test_observe_one_hot() {
        let game = tiny();
        let state = game.initial_state();
        let state = game.apply(&state, &Action::single(HeroId(2))).unwrap();
        let state = game.apply(&state, &Action::single(HeroId(0))).unwrap();

        let features = game.observe(&state);
        assert_eq!(features, vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_legal_actions_are_cached() {
        let game = tiny();
        let state = game.initial_state();
        let first = game.legal_actions(&state).as_ptr();
        let second = game.legal_actions(&state).as_ptr();
        assert_eq!(first, second);
    }
}
