//! UCT search driver.
//!
//! Each iteration runs the tree policy (UCB1 descent, then expansion of one
//! untried action), a random playout scored by the oracle, and a backup that
//! alternates the reward between the two sides.

use std::time::{Duration, Instant};

use drafter_core::Game;
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::oracle::Oracle;
use crate::rollout::rollout;
use crate::stats::{LocalStatistics, Statistics};
use crate::transposition::TranspositionTable;
use crate::tree::SearchTree;
use crate::{Result, SearchError};

/// Where a search starts.
pub enum SearchRoot<G: Game, T> {
    /// A fresh tree rooted at this state.
    Initial(G::State),

    /// A tree kept from an earlier search, usually after
    /// [`SearchTree::advance`].
    Resume(SearchTree<G, T>),
}

/// Counters for one completed search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchSummary {
    /// Root child with the highest mean reward.
    pub best: NodeId,
    pub iterations: u32,
    pub elapsed: Duration,
}

/// Result of [`Mcts::search`]: the chosen child together with its tree.
pub struct SearchResult<G: Game, T> {
    pub best: NodeId,
    pub tree: SearchTree<G, T>,
    pub iterations: u32,
    pub elapsed: Duration,
}

impl<G: Game, T> SearchResult<G, T> {
    /// Action leading from the root to the chosen child.
    pub fn best_action(&self) -> Option<&G::Action> {
        self.tree.get(self.best).action()
    }
}

/// Monte Carlo Tree Search with UCB1 selection and random playouts.
///
/// Generic over:
/// - `O`: the win-probability oracle scoring finished drafts
/// - `R`: the random number generator used for expansion and playouts
pub struct Mcts<O, R: Rng> {
    config: MctsConfig,
    oracle: O,
    rng: R,
}

impl<O, R: Rng> Mcts<O, R> {
    /// Create a new MCTS instance.
    pub fn new(config: MctsConfig, oracle: O, rng: R) -> Self {
        Self {
            config,
            oracle,
            rng,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Search from `root` with the given statistics strategy.
    ///
    /// Returns the exploitation-only best child of the root (`Cp = 0`) and
    /// the tree, ready to be advanced and resumed.
    ///
    /// # Errors
    /// - `Configuration` for a malformed budget or a terminal root
    /// - `Oracle` if a playout could not be scored; the tree is dropped
    /// - `InternalInvariant` if no iteration ran on a fresh root
    pub fn search<G, S>(
        &mut self,
        game: &G,
        root: SearchRoot<G, S::Slot>,
        stats: &mut S,
    ) -> Result<SearchResult<G, S::Slot>>
    where
        G: Game,
        S: Statistics<G::Key>,
        O: Oracle<G::Observation>,
    {
        let mut tree = match root {
            SearchRoot::Initial(state) => SearchTree::new(game, state),
            SearchRoot::Resume(tree) => tree,
        };
        let summary = self.search_tree(game, &mut tree, stats)?;
        Ok(SearchResult {
            best: summary.best,
            tree,
            iterations: summary.iterations,
            elapsed: summary.elapsed,
        })
    }

    /// Search with statistics kept on each node.
    pub fn search_local<G>(
        &mut self,
        game: &G,
        root: SearchRoot<G, f64>,
    ) -> Result<SearchResult<G, f64>>
    where
        G: Game,
        O: Oracle<G::Observation>,
    {
        self.search(game, root, &mut LocalStatistics)
    }

    /// Search with statistics merged across transpositions in `table`.
    ///
    /// The table outlives the search and can be reused for the next move.
    pub fn search_transpositions<G>(
        &mut self,
        game: &G,
        root: SearchRoot<G, ()>,
        table: &mut TranspositionTable<G::Key>,
    ) -> Result<SearchResult<G, ()>>
    where
        G: Game,
        O: Oracle<G::Observation>,
    {
        self.search(game, root, table)
    }

    /// Run iterations on a borrowed tree until the budget is spent.
    ///
    /// On an oracle failure the iteration's expansion is undone before the
    /// error is returned, so `tree` holds only fully backed-up iterations
    /// and can be searched again.
    pub fn search_tree<G, S>(
        &mut self,
        game: &G,
        tree: &mut SearchTree<G, S::Slot>,
        stats: &mut S,
    ) -> Result<SearchSummary>
    where
        G: Game,
        S: Statistics<G::Key>,
        O: Oracle<G::Observation>,
    {
        let budget = self.config.budget()?;
        if game.is_terminal(tree.root().state()) {
            return Err(SearchError::Configuration(
                "cannot search from a terminal state".to_string(),
            ));
        }
        stats.seed_root(game.position_key(tree.root().state()));

        let started = Instant::now();
        let mut iterations = 0u32;
        debug!(?budget, nodes = tree.len(), "Starting search");

        while !budget.exhausted(started, iterations) {
            let (leaf, expanded) = self.tree_policy(game, tree, &*stats)?;
            let reward = match rollout(game, tree.get(leaf).state(), &self.oracle, &mut self.rng) {
                Ok(reward) => reward,
                Err(err) => {
                    if expanded {
                        tree.retract(leaf)?;
                    }
                    warn!(iteration = iterations, error = %err, "Abandoning iteration");
                    return Err(err);
                }
            };
            tree.backup(game, stats, leaf, reward);
            iterations += 1;
            trace!(iteration = iterations, leaf = %leaf, reward, "Iteration complete");
        }

        if tree.root().visit_count() == 0 {
            return Err(SearchError::Configuration(
                "budget allowed no iterations on an unvisited root".to_string(),
            ));
        }
        let best = tree.best_child(game, NodeId::ROOT, 0.0, &*stats)?;
        let elapsed = started.elapsed();
        debug!(
            iterations,
            elapsed_ms = elapsed.as_millis() as u64,
            tree = %tree.stats(),
            best = %best,
            "Search finished"
        );
        Ok(SearchSummary {
            best,
            iterations,
            elapsed,
        })
    }

    /// Descend with UCB1 until a node with untried actions, then expand it.
    ///
    /// Returns the node to simulate from and whether it was just created.
    /// A terminal node is returned as-is.
    fn tree_policy<G, S>(
        &mut self,
        game: &G,
        tree: &mut SearchTree<G, S::Slot>,
        stats: &S,
    ) -> Result<(NodeId, bool)>
    where
        G: Game,
        S: Statistics<G::Key>,
    {
        let mut current = NodeId::ROOT;
        loop {
            let node = tree.get(current);
            if game.is_terminal(node.state()) {
                return Ok((current, false));
            }
            if !node.is_fully_expanded() {
                let child = tree.expand(game, current, &mut self.rng)?;
                return Ok((child, true));
            }
            current = tree.best_child(game, current, self.config.exploration_constant, stats)?;
        }
    }
}
