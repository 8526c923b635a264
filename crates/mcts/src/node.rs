//! MCTS node types for tree storage.
//!
//! Uses arena allocation with indices for cache locality and simpler memory management.

use std::fmt;

use drafter_core::Game;

/// Index into the node arena.
///
/// A lightweight handle to a node in one [`SearchTree`](crate::SearchTree).
/// Ids are invalidated when the tree is re-rooted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Position in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the search tree.
///
/// Owns its state and the list of actions not yet expanded. `slot` is the
/// statistics payload chosen by the [`Statistics`](crate::Statistics)
/// strategy: the reward sum for local statistics, nothing when a
/// transposition table holds the totals.
pub struct SearchNode<G: Game, T> {
    pub(crate) state: G::State,
    /// Back-reference only; the arena owns every node.
    pub(crate) parent: Option<NodeId>,
    pub(crate) action: Option<G::Action>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) untried: Vec<G::Action>,
    pub(crate) visit_count: u32,
    pub(crate) slot: T,
}

impl<G: Game, T: Default> SearchNode<G, T> {
    pub(crate) fn new(
        game: &G,
        state: G::State,
        parent: Option<NodeId>,
        action: Option<G::Action>,
    ) -> Self {
        let untried = game.legal_actions(&state).to_vec();
        Self {
            state,
            parent,
            action,
            children: Vec::new(),
            untried,
            visit_count: 0,
            slot: T::default(),
        }
    }
}

impl<G: Game, T> SearchNode<G, T> {
    pub fn state(&self) -> &G::State {
        &self.state
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Action that led here from the parent (`None` for the root).
    pub fn action(&self) -> Option<&G::Action> {
        self.action.as_ref()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Legal actions that have no child yet.
    pub fn untried_actions(&self) -> &[G::Action] {
        &self.untried
    }

    /// Number of backups that passed through this node.
    pub fn visit_count(&self) -> u32 {
        self.visit_count
    }

    /// True once every legal action has a child.
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    pub fn slot(&self) -> &T {
        &self.slot
    }
}

impl<G: Game, T: fmt::Debug> fmt::Debug for SearchNode<G, T>
where
    G::State: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchNode")
            .field("state", &self.state)
            .field("parent", &self.parent)
            .field("action", &self.action)
            .field("children", &self.children.len())
            .field("untried", &self.untried.len())
            .field("visit_count", &self.visit_count)
            .field("slot", &self.slot)
            .finish()
    }
}
