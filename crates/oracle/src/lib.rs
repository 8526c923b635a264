//! Win-probability oracles backed by a fitted linear classifier.
//!
//! The model is trained elsewhere; this crate only loads its weights and
//! serves predictions to the search through [`drafter_mcts::Oracle`].

mod logistic;
mod model;

pub use logistic::LogisticOracle;
pub use model::LinearModel;
