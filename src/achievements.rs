//! Achievement unlock engine
//!
//! Two independent sets (normal and hard). Unlocks are monotonic for the
//! lifetime of the process. Hard mode opens once every normal achievement
//! is unlocked.

use serde::{Deserialize, Serialize};

use crate::sim::{Mode, RoundOutcome, Terminal};

/// What a round must achieve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Requirement {
    /// Survive at least this long (either ending counts)
    Survive { secs: f32 },
    /// Clear the round at or above this height
    ClearHeight { height: f32 },
}

impl Requirement {
    pub fn is_met(&self, outcome: &RoundOutcome) -> bool {
        match *self {
            Requirement::Survive { secs } => outcome.survival_secs >= secs,
            Requirement::ClearHeight { height } => {
                outcome.terminal == Terminal::Clear
                    && outcome.final_height.is_some_and(|h| h >= height)
            }
        }
    }
}

/// A single achievement entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub description: String,
    pub requirement: Requirement,
    pub unlocked: bool,
}

impl Achievement {
    fn new(id: &str, description: &str, requirement: Requirement) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            requirement,
            unlocked: false,
        }
    }
}

/// One-shot notification produced by `evaluate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unlock {
    Achievement { id: String, message: String },
    HardMode { message: String },
}

impl Unlock {
    pub fn message(&self) -> &str {
        match self {
            Unlock::Achievement { message, .. } | Unlock::HardMode { message } => message,
        }
    }
}

/// Both achievement sets plus the hard mode gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievements {
    pub normal: Vec<Achievement>,
    pub hard: Vec<Achievement>,
    pub hard_mode_unlocked: bool,
}

impl Default for Achievements {
    fn default() -> Self {
        Self::new()
    }
}

impl Achievements {
    /// The shipped catalogue, everything locked
    pub fn new() -> Self {
        use Requirement::*;
        Self {
            normal: vec![
                Achievement::new("survived_1_min", "Survive 1 minute", Survive { secs: 60.0 }),
                Achievement::new("survived_3_min", "Survive 3 minutes", Survive { secs: 180.0 }),
                Achievement::new("cleared_300m", "Clear at 300m", ClearHeight { height: 300.0 }),
                Achievement::new("cleared_800m", "Clear at 800m", ClearHeight { height: 800.0 }),
            ],
            hard: vec![
                Achievement::new("hm_survived_2_min", "Survive 2 minutes", Survive { secs: 120.0 }),
                Achievement::new("hm_survived_4_min", "Survive 4 minutes", Survive { secs: 240.0 }),
                Achievement::new("hm_cleared_500m", "Clear at 500m", ClearHeight { height: 500.0 }),
                Achievement::new(
                    "hm_cleared_1000m",
                    "Clear at 1000m",
                    ClearHeight { height: 1000.0 },
                ),
            ],
            hard_mode_unlocked: false,
        }
    }

    pub fn set(&self, mode: Mode) -> &[Achievement] {
        match mode {
            Mode::Normal => &self.normal,
            Mode::Hard => &self.hard,
        }
    }

    /// Sets a player may browse; the hard set stays hidden until unlocked
    pub fn visible(&self) -> impl Iterator<Item = (Mode, &[Achievement])> {
        let hard = self.hard_mode_unlocked.then_some((Mode::Hard, self.hard.as_slice()));
        std::iter::once((Mode::Normal, self.normal.as_slice())).chain(hard)
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.normal
            .iter()
            .chain(&self.hard)
            .any(|a| a.id == id && a.unlocked)
    }

    pub fn all_normal_unlocked(&self) -> bool {
        self.normal.iter().all(|a| a.unlocked)
    }

    pub fn unlocked_count(&self, mode: Mode) -> usize {
        self.set(mode).iter().filter(|a| a.unlocked).count()
    }

    /// Apply a finished round. Returns the unlocks it caused, in order.
    pub fn evaluate(&mut self, outcome: &RoundOutcome) -> Vec<Unlock> {
        let (set, prefix) = match outcome.mode {
            Mode::Normal => (&mut self.normal, ""),
            Mode::Hard => (&mut self.hard, "Hard: "),
        };

        let mut unlocks = Vec::new();
        for achievement in set.iter_mut().filter(|a| !a.unlocked) {
            if achievement.requirement.is_met(outcome) {
                achievement.unlocked = true;
                log::info!("Achievement unlocked: {}", achievement.id);
                unlocks.push(Unlock::Achievement {
                    id: achievement.id.clone(),
                    message: format!("Achievement unlocked: {prefix}{}", achievement.description),
                });
            }
        }

        if !self.hard_mode_unlocked && self.all_normal_unlocked() {
            self.hard_mode_unlocked = true;
            log::info!("Hard mode unlocked");
            unlocks.push(Unlock::HardMode {
                message: "Hard mode unlocked!".to_string(),
            });
        }

        unlocks
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
