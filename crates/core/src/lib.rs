//! Drafter Core - Game abstractions and common types
//!
//! This crate provides the core `Game` trait that describes a sequential
//! two-player game to the search engine, together with the small value
//! types shared by every other crate in the workspace.
//!
//! # Types
//!
//! - [`Game`] - Trait for game implementations
//! - [`Side`] - One of the two drafting teams
//! - [`Probability`] - A win probability in [0, 1]

mod error;
mod game;
mod types;

pub use error::{DraftError, Result};
pub use game::Game;
pub use types::{Probability, Side};
