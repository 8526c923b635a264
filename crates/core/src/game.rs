use std::fmt::Debug;
use std::hash::Hash;

use crate::{Result, Side};

/// A sequential two-player game abstraction for tree search.
///
/// The implementing type is the immutable per-session rule set (for a draft:
/// hero universe, pick/ban schedule, team size). States are value objects:
/// `apply` never mutates its input, it returns a successor.
pub trait Game {
    /// The game state (e.g., a draft position)
    type State: Clone;

    /// A game action (e.g., a group of heroes picked or banned together)
    type Action: Clone + Eq + Hash + Debug;

    /// Canonical position key used to merge transpositions.
    ///
    /// Two states reached through different move orders that compare equal
    /// under this key share search statistics.
    type Key: Clone + Eq + Hash + Debug;

    /// The feature representation handed to the win-probability oracle
    type Observation;

    /// Returns the initial game state
    fn initial_state(&self) -> Self::State;

    /// Returns all legal actions from the given state.
    ///
    /// Empty for terminal states. Implementations compute the list once per
    /// state instance and hand out the cached slice afterwards.
    fn legal_actions<'s>(&self, state: &'s Self::State) -> &'s [Self::Action];

    /// Applies an action, returning a new state (immutable operation).
    ///
    /// # Errors
    /// Returns `DraftError::InvalidAction` if `action` is not legal in `state`.
    fn apply(&self, state: &Self::State, action: &Self::Action) -> Result<Self::State>;

    /// Returns true if the game has ended
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// The side whose move produced this state (the opposite of the side to move)
    fn last_mover(&self, state: &Self::State) -> Side;

    /// Canonical key of the position, borrowed from the state
    fn position_key<'s>(&self, state: &'s Self::State) -> &'s Self::Key;

    /// Converts a state to the oracle's input format
    fn observe(&self, state: &Self::State) -> Self::Observation;
}
