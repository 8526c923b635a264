//! Engine-vs-engine drafts.

use std::collections::HashMap;

use anyhow::{Context, Result};
use drafter_core::{Game, Probability};
use drafter_mcts::{
    LocalStatistics, Mcts, MctsConfig, Oracle, OracleError, Recommendation, SearchTree,
    Statistics, TranspositionTable,
};
use drafter_pickban::{Action, DraftRules, DraftState, HeroId, Position};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of runner-up actions kept per step.
const ALTERNATIVES: usize = 3;

/// One candidate action as ranked by the search.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Candidate {
    pub heroes: Vec<HeroId>,
    pub mean_reward: f64,
    pub visits: u32,
}

impl From<&Recommendation<Action>> for Candidate {
    fn from(rec: &Recommendation<Action>) -> Self {
        Self {
            heroes: rec.action.heroes().to_vec(),
            mean_reward: rec.mean_reward,
            visits: rec.visits,
        }
    }
}

/// A single step of a simulated draft.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DraftStep {
    /// Index into the schedule.
    pub step: usize,

    /// "Radiant" or "Dire".
    pub side: String,

    /// "pick" or "ban".
    pub phase: String,

    /// The action taken (the search's best child).
    pub chosen: Candidate,

    /// Best-ranked children after the chosen one.
    pub alternatives: Vec<Candidate>,

    /// Iterations run for this step.
    pub iterations: u32,
}

/// A complete simulated draft.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DraftRecord {
    pub steps: Vec<DraftStep>,
    pub radiant: Vec<HeroId>,
    pub dire: Vec<HeroId>,
    pub banned: Vec<HeroId>,

    /// Oracle prediction for the finished draft.
    pub radiant_win_probability: f64,

    pub metadata: HashMap<String, serde_json::Value>,
}

/// Play one draft where both sides use the same search settings.
///
/// With `transpositions` both sides share one table for the whole draft,
/// otherwise statistics live on the nodes. The tree is carried from step to
/// step along the actions actually played.
pub fn play_draft<O>(
    game: &DraftRules,
    config: &MctsConfig,
    oracle: &O,
    transpositions: bool,
    seed: u64,
) -> Result<DraftRecord>
where
    O: Oracle<Vec<f32>>,
{
    let mut mcts = Mcts::new(config.clone(), oracle, ChaCha8Rng::seed_from_u64(seed));
    let (state, steps) = if transpositions {
        let mut table = TranspositionTable::new();
        let played = run_draft(game, &mut mcts, &mut table)?;
        debug!(seed, positions = table.len(), "Draft finished");
        played
    } else {
        run_draft(game, &mut mcts, &mut LocalStatistics)?
    };

    let radiant_win_probability = score_final(game, oracle, &state)?;

    let mut metadata = HashMap::new();
    metadata.insert("seed".to_string(), serde_json::json!(seed));
    metadata.insert("transpositions".to_string(), serde_json::json!(transpositions));
    metadata.insert(
        "exploration_constant".to_string(),
        serde_json::json!(config.exploration_constant),
    );
    metadata.insert("heroes".to_string(), serde_json::json!(game.heroes().len()));

    Ok(DraftRecord {
        steps,
        radiant: state.radiant().iter().copied().collect(),
        dire: state.dire().iter().copied().collect(),
        banned: state.banned().iter().copied().collect(),
        radiant_win_probability,
        metadata,
    })
}

/// Radiant win probability of a finished draft, validated like a playout.
fn score_final<O>(game: &DraftRules, oracle: &O, state: &DraftState) -> Result<f64>
where
    O: Oracle<Vec<f32>>,
{
    let radiant_win = oracle
        .evaluate(&game.observe(state))
        .context("Failed to score the finished draft")?;
    let probability = Probability::new(radiant_win)
        .map_err(|_| OracleError::OutOfRange(radiant_win))
        .context("Failed to score the finished draft")?;
    Ok(probability.get())
}

fn run_draft<O, S>(
    game: &DraftRules,
    mcts: &mut Mcts<O, ChaCha8Rng>,
    stats: &mut S,
) -> Result<(DraftState, Vec<DraftStep>)>
where
    O: Oracle<Vec<f32>>,
    S: Statistics<Position>,
{
    let mut tree: SearchTree<DraftRules, S::Slot> = SearchTree::new(game, game.initial_state());
    let mut steps = Vec::new();

    while let Some(step) = game.current_step(tree.root().state()) {
        let index = tree.root().state().step();
        let side = tree.root().state().to_move();
        let summary = mcts.search_tree(game, &mut tree, &mut *stats)?;

        let ranked = tree.recommendations(game, &*stats);
        let chosen = ranked
            .iter()
            .find(|rec| rec.node == summary.best)
            .context("best child missing from recommendations")?;
        let action = chosen.action.clone();
        let alternatives = ranked
            .iter()
            .filter(|rec| rec.node != summary.best)
            .take(ALTERNATIVES)
            .map(Candidate::from)
            .collect();

        debug!(step = index, %side, %action, mean = chosen.mean_reward, "Step decided");
        steps.push(DraftStep {
            step: index,
            side: side.to_string(),
            phase: step.phase.to_string(),
            chosen: Candidate::from(chosen),
            alternatives,
            iterations: summary.iterations,
        });

        tree = tree.advance(game, &action)?;
    }

    Ok((tree.root().state().clone(), steps))
}
