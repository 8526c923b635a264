//! Default policy: uniformly random playout to the end of the draft.

use drafter_core::{Game, Probability};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::oracle::{Oracle, OracleError};
use crate::{Result, SearchError};

/// Play random legal actions from `state` until the draft is complete, then
/// ask `oracle` for the outcome.
///
/// The reward is expressed for the side that moved into `state`, fixed
/// before the playout starts. If `state` is already terminal the oracle is
/// consulted directly.
///
/// # Errors
/// Propagates oracle failures, and rejects probabilities outside [0, 1]
/// with `OracleError::OutOfRange`.
pub fn rollout<G, O, R>(game: &G, state: &G::State, oracle: &O, rng: &mut R) -> Result<f64>
where
    G: Game,
    O: Oracle<G::Observation> + ?Sized,
    R: Rng + ?Sized,
{
    let perspective = game.last_mover(state);
    let mut current = state.clone();

    while !game.is_terminal(&current) {
        let action = game.legal_actions(&current).choose(rng).ok_or_else(|| {
            SearchError::InternalInvariant(
                "non-terminal state has no legal actions".to_string(),
            )
        })?;
        current = game.apply(&current, action)?;
    }

    let features = game.observe(&current);
    let radiant_win = oracle.evaluate(&features)?;
    let probability =
        Probability::new(radiant_win).map_err(|_| OracleError::OutOfRange(radiant_win))?;
    Ok(probability.for_side(perspective).get())
}
