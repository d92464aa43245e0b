//! Round state and core simulation types
//!
//! One `RoundState` holds everything a single play session mutates. It is
//! built fresh for every round; nothing carries over.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hazard::Hazard;
use super::player::Player;
use super::world::{ObjectKind, World, WorldObject};
use crate::consts::*;
use crate::tuning::{DifficultyRules, Tuning};

/// Ruleset the round is played under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Normal,
    Hard,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Hard => "hard",
        }
    }
}

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Playing,
    /// Overtaken by the wave
    GameOver,
    /// Reached the target height
    Clear,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminal {
    GameOver,
    Clear,
}

/// Produced once when a round terminates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub mode: Mode,
    pub terminal: Terminal,
    pub survival_secs: f32,
    /// Only reported for `Clear`
    pub final_height: Option<f32>,
}

/// Things that happened during a tick, for sound and HUD feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Touched glass
    Damage { amount: f32 },
    /// Collected an orb or stairs
    ItemPickup { kind: ObjectKind },
    /// Wave sped up
    HazardEscalated { speed: f32 },
    /// Passive climb tick
    HeightGained { height: f32 },
    GameOver,
    Clear,
}

/// Complete state of one round (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Round seed for reproducibility
    pub seed: u64,
    pub mode: Mode,
    pub rules: DifficultyRules,
    /// Session clock in milliseconds since round start
    pub now_ms: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub last_height_gain_ms: u64,
    pub phase: RoundPhase,
    pub player: Player,
    pub hazard: Hazard,
    pub world: World,
    /// Set once when the round terminates
    pub outcome: Option<RoundOutcome>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl RoundState {
    /// Start a new round: fresh player and wave, pools filled to cap
    pub fn new(seed: u64, mode: Mode, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let player = Player::new();
        let target_height = rng.random_range(TARGET_HEIGHT_MIN..=TARGET_HEIGHT_MAX);
        let hazard = Hazard::new(player.base_speed, target_height, 0);

        let mut world = World::new();
        world.populate(player.pos, &mut rng);

        log::info!(
            "New {} round (seed {seed}), target height {target_height}",
            mode.as_str()
        );

        Self {
            seed,
            mode,
            rules: tuning.rules(mode),
            now_ms: 0,
            time_ticks: 0,
            last_height_gain_ms: 0,
            phase: RoundPhase::Playing,
            player,
            hazard,
            world,
            outcome: None,
            events: Vec::new(),
            rng,
        }
    }

    /// Honour due respawn requests at the current session time
    pub fn process_respawns(&mut self) -> Vec<WorldObject> {
        self.world.process_respawns(self.now_ms, &mut self.rng)
    }

    pub fn is_over(&self) -> bool {
        self.phase != RoundPhase::Playing
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.now_ms as f32 / 1000.0
    }

    /// Gap to the wave in metres for the HUD
    pub fn distance_to_hazard(&self) -> f32 {
        self.hazard.distance_from(self.player.pos.y)
    }

    pub fn target_height(&self) -> u32 {
        self.hazard.target_height
    }

    /// Take the events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Respawn delay for an object kind under this round's rules
    pub fn respawn_delay_ms(&self, kind: ObjectKind) -> u64 {
        kind.respawn_delay_ms(&self.rules)
    }
}
