//! Pick/ban draft search from the command line.
//!
//! `simulate` plays engine-vs-engine drafts and saves them in MessagePack
//! format for offline analysis. `recommend` replays a draft history and
//! prints the search's ranked suggestions for the next step.

mod draft;
mod history;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use draft::{play_draft, DraftRecord};
use drafter_core::Game;
use drafter_mcts::{
    LocalStatistics, Mcts, MctsConfig, SearchTree, Statistics, TranspositionTable,
    ALL_PICK_EXPLORATION, CAPTAINS_MODE_EXPLORATION, TRANSPOSITION_EXPLORATION,
};
use drafter_oracle::{LinearModel, LogisticOracle};
use drafter_pickban::{DraftRules, DraftState, Position};
use history::{parse_history, replay_history};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

/// Iterations per search when no budget is given.
const DEFAULT_ITERATIONS: u32 = 1000;

/// Pick/ban draft search tool.
#[derive(Parser)]
#[command(name = "drafter-selfplay")]
#[command(about = "Simulate drafts and recommend picks and bans with MCTS")]
struct Cli {
    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play engine-vs-engine drafts and save them.
    Simulate {
        /// Number of drafts to play.
        #[arg(short, long, default_value = "10")]
        drafts: usize,

        /// Output directory for draft files.
        #[arg(short, long, default_value = "data/drafts")]
        output: PathBuf,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Rank the next actions for a partially played draft.
    Recommend {
        /// Steps played so far, e.g. "b:3;b:7;p:1".
        #[arg(long, default_value = "")]
        history: String,

        /// Number of recommendations to print.
        #[arg(short, long, default_value = "5")]
        top: usize,

        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Captains mode: alternating bans and picks.
    Cm,
    /// All pick: ten single picks.
    Ap,
}

/// Options shared by every command that runs a search.
#[derive(Args, Clone, Debug)]
struct SearchArgs {
    /// Draft format.
    #[arg(long, value_enum, default_value = "cm")]
    mode: Mode,

    /// Size of the hero pool (ids 0..heroes).
    #[arg(long, default_value = "112")]
    heroes: u16,

    /// Iterations per search.
    #[arg(short, long)]
    iterations: Option<u32>,

    /// Seconds per search (instead of an iteration count).
    #[arg(long)]
    time_limit: Option<f64>,

    /// Exploration constant. Defaults depend on mode and transpositions.
    #[arg(long)]
    exploration: Option<f64>,

    /// Merge statistics across move orders with a transposition table.
    #[arg(long)]
    transpositions: bool,

    /// JSON model weights. A seeded synthetic model is used if absent.
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Random seed for reproducibility.
    #[arg(long, default_value = "42")]
    seed: u64,
}

impl SearchArgs {
    fn rules(&self) -> Result<DraftRules> {
        let rules = match self.mode {
            Mode::Cm => DraftRules::captains_mode(self.heroes),
            Mode::Ap => DraftRules::all_pick(self.heroes),
        };
        rules.with_context(|| format!("Cannot draft {:?} with {} heroes", self.mode, self.heroes))
    }

    fn config(&self) -> Result<MctsConfig> {
        let exploration = self.exploration.unwrap_or(match (self.transpositions, self.mode) {
            (true, _) => TRANSPOSITION_EXPLORATION,
            (false, Mode::Cm) => CAPTAINS_MODE_EXPLORATION,
            (false, Mode::Ap) => ALL_PICK_EXPLORATION,
        });
        let time_limit = match self.time_limit {
            Some(seconds) if !(seconds.is_finite() && seconds > 0.0) => {
                bail!("time limit must be a positive number of seconds, got {}", seconds)
            }
            Some(seconds) => Some(Duration::from_secs_f64(seconds)),
            None => None,
        };
        let iteration_limit = match (self.iterations, time_limit) {
            (None, None) => Some(DEFAULT_ITERATIONS),
            (iterations, _) => iterations,
        };
        let config = MctsConfig {
            exploration_constant: exploration,
            time_limit,
            iteration_limit,
        };
        // Surface a malformed budget before any work starts
        config.budget()?;
        Ok(config)
    }

    fn oracle(&self, game: &DraftRules) -> Result<LogisticOracle> {
        let model = match &self.model {
            Some(path) => LinearModel::load(path)?,
            None => LinearModel::synthetic(game.heroes().len(), self.seed),
        };
        let expected = game.observe(&game.initial_state()).len();
        if model.feature_len() != expected {
            bail!(
                "model expects {} features but a {}-hero draft has {}",
                model.feature_len(),
                game.heroes().len(),
                expected
            );
        }
        Ok(LogisticOracle::new(model))
    }
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

/// Run the simulate command.
fn cmd_simulate(drafts: usize, output: &Path, search: &SearchArgs) -> Result<()> {
    let game = search.rules()?;
    let config = search.config()?;
    let oracle = search.oracle(&game)?;

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {:?}", output))?;

    info!(
        drafts,
        mode = ?search.mode,
        heroes = search.heroes,
        transpositions = search.transpositions,
        exploration = config.exploration_constant,
        "Simulating drafts"
    );
    let start = Instant::now();

    // Each draft owns its tree and table; only the oracle is shared
    let records: Vec<DraftRecord> = (0..drafts)
        .into_par_iter()
        .map(|i| {
            let seed = search.seed.wrapping_add(i as u64 * 1000);
            play_draft(&game, &config, &oracle, search.transpositions, seed)
                .with_context(|| format!("Draft {} failed", i))
        })
        .collect::<Result<_>>()?;

    for (i, record) in records.iter().enumerate() {
        let filename = output.join(format!("draft_{:06}.msgpack", i));
        let file = File::create(&filename)
            .with_context(|| format!("Failed to create file: {:?}", filename))?;
        let mut writer = BufWriter::new(file);
        // Use named fields to serialize structs as maps (not arrays)
        rmp_serde::encode::write_named(&mut writer, record)
            .with_context(|| format!("Failed to serialize draft {}", i))?;
    }

    let elapsed = start.elapsed();
    let mean_win = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.radiant_win_probability).sum::<f64>() / records.len() as f64
    };

    println!("Completed in {:.2}s", elapsed.as_secs_f64());
    println!("Drafts played: {}", records.len());
    println!("Mean predicted Radiant win: {:.3}", mean_win);
    println!("Files saved to: {:?}", output);
    Ok(())
}

/// Run the recommend command.
fn cmd_recommend(history: &str, top: usize, search: &SearchArgs) -> Result<()> {
    let game = search.rules()?;
    let config = search.config()?;
    let oracle = search.oracle(&game)?;

    let entries = parse_history(history)?;
    let state = replay_history(&game, &entries)?;
    let Some(step) = game.current_step(&state) else {
        bail!("the draft is already complete: {}", state);
    };
    println!("{}", state);
    println!("{} to {} {} hero(es)", state.to_move(), step.phase, step.count);

    let mut mcts = Mcts::new(config, &oracle, ChaCha8Rng::seed_from_u64(search.seed));
    if search.transpositions {
        let mut table = TranspositionTable::new();
        recommend(&game, &mut mcts, state, &mut table, top)?;
        debug!(positions = table.len(), "Transposition table size");
    } else {
        recommend(&game, &mut mcts, state, &mut LocalStatistics, top)?;
    }
    Ok(())
}

fn recommend<S>(
    game: &DraftRules,
    mcts: &mut Mcts<&LogisticOracle, ChaCha8Rng>,
    state: DraftState,
    stats: &mut S,
    top: usize,
) -> Result<()>
where
    S: Statistics<Position>,
{
    let mut tree: SearchTree<DraftRules, S::Slot> = SearchTree::new(game, state);
    let summary = mcts.search_tree(game, &mut tree, &mut *stats)?;
    info!(
        iterations = summary.iterations,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        tree = %tree.stats(),
        "Search complete"
    );

    for (rank, rec) in tree.recommendations(game, &*stats).iter().take(top).enumerate() {
        println!(
            "{:>3}. {:<12} win {:.3}  visits {}",
            rank + 1,
            rec.action.to_string(),
            rec.mean_reward,
            rec.visits
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Simulate {
            drafts,
            output,
            search,
        } => cmd_simulate(drafts, &output, &search),

        Commands::Recommend {
            history,
            top,
            search,
        } => cmd_recommend(&history, top, &search),
    }
}
