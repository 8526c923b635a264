//! Monte Carlo Tree Search for pick/ban drafts.
//!
//! This crate provides a UCT search that works with any game implementing
//! the `drafter_core::Game` trait, scored at the leaves by an external
//! win-probability [`Oracle`].
//!
//! # Features
//!
//! - **UCB1 selection** with a configurable exploration constant `Cp`
//! - **Random playouts** to the end of the draft, scored once by the oracle
//! - **Two statistics modes**: counters on each node, or merged across move
//!   orders in a [`TranspositionTable`]
//! - **Tree reuse**: advance the tree along the move actually played and
//!   resume searching from there
//!
//! # Example
//!
//! ```
//! use drafter_core::Game;
//! use drafter_mcts::{ConstantOracle, Mcts, MctsConfig, SearchRoot};
//! use drafter_pickban::DraftRules;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let game = DraftRules::all_pick(20).unwrap();
//! let config = MctsConfig::with_iterations(200);
//! let rng = ChaCha8Rng::seed_from_u64(42);
//! let mut mcts = Mcts::new(config, ConstantOracle(0.5), rng);
//!
//! let result = mcts
//!     .search_local(&game, SearchRoot::Initial(game.initial_state()))
//!     .unwrap();
//! println!("Best action: {:?}", result.best_action());
//! ```

pub mod config;
mod error;
mod node;
pub mod oracle;
mod rollout;
pub mod search;
mod stats;
mod transposition;
mod tree;

pub use config::{
    Budget, MctsConfig, ALL_PICK_EXPLORATION, CAPTAINS_MODE_EXPLORATION, TRANSPOSITION_EXPLORATION,
};
pub use error::{Result, SearchError};
pub use node::{NodeId, SearchNode};
pub use oracle::{ConstantOracle, FnOracle, Oracle, OracleError};
pub use rollout::rollout;
pub use search::{Mcts, SearchResult, SearchRoot, SearchSummary};
pub use stats::{LocalStatistics, Statistics, Totals};
pub use transposition::{Transposition, TranspositionTable};
pub use tree::{Recommendation, SearchTree, TreeStats};
