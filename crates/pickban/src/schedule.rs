//! Pick/ban schedules.
//!
//! A schedule is the fixed ordered list of steps governing one draft. Turns
//! strictly alternate between the two sides, so a step's index parity tells
//! which side acts (relative to the side that opens the draft).

use std::fmt;
use std::str::FromStr;

use drafter_core::DraftError;
use serde::{Deserialize, Serialize};

/// Whether a step adds heroes to the mover's team or removes them from play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Pick,
    Ban,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Pick => write!(f, "pick"),
            Phase::Ban => write!(f, "ban"),
        }
    }
}

/// One schedule entry: a phase and the number of heroes chosen at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub phase: Phase,
    pub count: u8,
}

impl Step {
    pub const fn pick(count: u8) -> Self {
        Self {
            phase: Phase::Pick,
            count,
        }
    }

    pub const fn ban(count: u8) -> Self {
        Self {
            phase: Phase::Ban,
            count,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.phase {
            Phase::Pick => 'p',
            Phase::Ban => 'b',
        };
        write!(f, "{}{}", tag, self.count)
    }
}

impl FromStr for Step {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let phase = match chars.next() {
            Some('p') | Some('P') => Phase::Pick,
            Some('b') | Some('B') => Phase::Ban,
            _ => {
                return Err(DraftError::InvalidRules(format!(
                    "schedule step '{}' must start with 'p' or 'b'",
                    s
                )))
            }
        };
        let count = chars.as_str().parse::<u8>().map_err(|_| {
            DraftError::InvalidRules(format!("schedule step '{}' has no valid count", s))
        })?;
        Ok(Self { phase, count })
    }
}

/// The ordered sequence of steps for one draft.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    steps: Vec<Step>,
}

impl Schedule {
    /// Create a schedule from explicit steps.
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Captains mode: bans and picks interleaved, one double pick.
    pub fn captains_mode() -> Self {
        use Step as S;
        Self::new(vec![
            S::ban(1),
            S::ban(1),
            S::ban(1),
            S::ban(1),
            S::pick(1),
            S::pick(2),
            S::pick(1),
            S::ban(1),
            S::ban(1),
            S::ban(1),
            S::ban(1),
            S::pick(1),
            S::pick(1),
            S::pick(1),
            S::pick(1),
            S::ban(1),
            S::ban(1),
            S::pick(1),
            S::pick(1),
        ])
    }

    /// All pick: ten alternating single picks, no bans.
    pub fn all_pick() -> Self {
        Self::new(vec![Step::pick(1); 10])
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if the schedule has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<Step> {
        self.steps.get(index).copied()
    }

    /// All steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Heroes picked by the side acting at steps of the given parity
    /// (0 = the opening side, 1 = the other side).
    pub fn picks_for_parity(&self, parity: usize) -> usize {
        self.steps
            .iter()
            .enumerate()
            .filter(|(i, step)| i % 2 == parity && step.phase == Phase::Pick)
            .map(|(_, step)| step.count as usize)
            .sum()
    }

    /// Total heroes removed from the pool over the whole draft.
    pub fn heroes_consumed(&self) -> usize {
        self.steps.iter().map(|step| step.count as usize).sum()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl FromStr for Schedule {
    type Err = DraftError;

    /// Parse a comma-separated step list such as `"b1,b1,p1,p2,p1"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let steps = s
            .split(',')
            .filter(|token| !token.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Step>, _>>()?;
        Ok(Self::new(steps))
    }
}
