//! Parsing of draft histories given on the command line.
//!
//! A history is a `;`-separated list of steps, each a phase letter and the
//! heroes chosen: `"b:3;b:7;p:1,2"`.

use anyhow::{bail, Context, Result};
use drafter_core::Game;
use drafter_pickban::{Action, DraftRules, DraftState, Phase};

/// One parsed history entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub phase: Phase,
    pub action: Action,
}

/// Split a history string into entries. Empty input is an empty history.
pub fn parse_history(text: &str) -> Result<Vec<HistoryEntry>> {
    text.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (phase, heroes) = entry
                .split_once(':')
                .with_context(|| format!("history entry '{}' must look like 'p:12'", entry))?;
            let phase = match phase.trim() {
                "p" | "P" | "pick" => Phase::Pick,
                "b" | "B" | "ban" => Phase::Ban,
                other => bail!("unknown phase '{}' in history entry '{}'", other, entry),
            };
            let action: Action = heroes.parse()?;
            Ok(HistoryEntry { phase, action })
        })
        .collect()
}

/// Apply `history` from the initial state, checking each phase against the
/// schedule.
pub fn replay_history(game: &DraftRules, history: &[HistoryEntry]) -> Result<DraftState> {
    let mut state = game.initial_state();
    for (index, entry) in history.iter().enumerate() {
        let Some(step) = game.current_step(&state) else {
            bail!("history has {} entries but the draft ends after {}", history.len(), index);
        };
        if step.phase != entry.phase {
            bail!(
                "history entry {} is a {} but step {} of the schedule is a {}",
                index,
                entry.phase,
                index,
                step.phase
            );
        }
        state = game
            .apply(&state, &entry.action)
            .with_context(|| format!("history entry {} ({}) is illegal", index, entry.action))?;
    }
    Ok(state)
}
