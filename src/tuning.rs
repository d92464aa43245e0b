//! Data-driven difficulty rules
//!
//! Defaults reproduce the shipped balance; a JSON document can override any
//! subset of fields.

use serde::{Deserialize, Serialize};

use crate::sim::Mode;

/// Per-mode balance knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyRules {
    /// Stamina lost when touching glass
    pub glass_damage: f32,
    /// Delay before a consumed/expired glass shard may respawn
    pub glass_respawn_ms: u64,
    /// Delay for orbs and stairs
    pub other_respawn_ms: u64,
}

impl DifficultyRules {
    pub const NORMAL: Self = Self {
        glass_damage: 30.0,
        glass_respawn_ms: 1000,
        other_respawn_ms: 1667,
    };

    pub const HARD: Self = Self {
        glass_damage: 60.0,
        glass_respawn_ms: 500,
        other_respawn_ms: 5000,
    };
}

impl Default for DifficultyRules {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Rules for both modes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub normal: DifficultyRules,
    pub hard: DifficultyRules,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            normal: DifficultyRules::NORMAL,
            hard: DifficultyRules::HARD,
        }
    }
}

impl Tuning {
    pub fn rules(&self, mode: Mode) -> DifficultyRules {
        match mode {
            Mode::Normal => self.normal,
            Mode::Hard => self.hard,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse overrides, falling back to the defaults when malformed
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring malformed tuning ({e}), using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_select_their_rules() {
        let tuning = Tuning::default();
        assert_eq!(tuning.rules(Mode::Normal).glass_damage, 30.0);
        assert_eq!(tuning.rules(Mode::Hard).glass_damage, 60.0);
        assert_eq!(tuning.rules(Mode::Hard).glass_respawn_ms, 500);
        assert_eq!(tuning.rules(Mode::Normal).other_respawn_ms, 1667);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"normal": {"glass_damage": 45.0}}"#).unwrap();
        assert_eq!(tuning.normal.glass_damage, 45.0);
        assert_eq!(tuning.normal.other_respawn_ms, 1667);
        assert_eq!(tuning.hard, DifficultyRules::HARD);
    }

    #[test]
    fn malformed_json_falls_back() {
        assert!(Tuning::from_json("{not json").is_err());
        assert_eq!(Tuning::from_json_or_default("{not json"), Tuning::default());
    }
}
