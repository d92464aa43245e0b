//! Tsunami Run - outrun a rising wave across an open 2D world
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, hazard, world objects, collisions)
//! - `achievements`: Unlock engine and hard mode gate
//! - `game`: Screen state machine wrapping one round at a time
//! - `audio`: Sound cues derived from simulation events (no playback)
//! - `settings`: Player preferences (volumes)
//! - `tuning`: Data-driven difficulty rules

pub mod achievements;
pub mod audio;
pub mod game;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use achievements::{Achievement, Achievements, Unlock};
pub use game::{Command, Game, Screen};
pub use settings::Settings;
pub use tuning::{DifficultyRules, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Frame length the per-tick amounts below are tuned for (60 Hz)
    pub const TICK_MS: f32 = 1000.0 / 60.0;
    /// Fixed simulation step used by the driver
    pub const SIM_DT_MS: u64 = 16;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport the player is centred in
    pub const VIEWPORT_WIDTH: f32 = 1280.0;
    pub const VIEWPORT_HEIGHT: f32 = 720.0;
    /// Objects projected further than this outside the viewport expire
    pub const VISIBILITY_MARGIN: f32 = 100.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    pub const MAX_STAMINA: f32 = 100.0;
    /// Stamina spent per tick of movement
    pub const STAMINA_DRAIN: f32 = 0.025;
    /// Stamina recovered per idle tick
    pub const STAMINA_REGEN: f32 = 0.2;

    /// Tsunami defaults
    pub const HAZARD_SPEED_MULTIPLIER: f32 = 1.3;
    pub const HAZARD_SPEEDUP_INTERVAL_MS: u64 = 20_000;
    /// Wave starts half a screen below the player
    pub const HAZARD_START_Y: f32 = VIEWPORT_HEIGHT / 2.0;
    pub const TARGET_HEIGHT_MIN: u32 = 100;
    pub const TARGET_HEIGHT_MAX: u32 = 1000;

    /// Objects spawn within this offset of their anchor on both axes
    pub const SPAWN_RADIUS: i32 = 800;

    /// Pickup effects
    pub const GREEN_ORB_STAMINA: f32 = 20.0;
    pub const STAIRS_HEIGHT_GAIN: f32 = 10.0;

    /// Passive climb: +1 height per interval survived
    pub const HEIGHT_GAIN_INTERVAL_MS: u64 = 10_000;

    /// How long an unlock message stays on screen
    pub const NOTIFICATION_MS: u64 = 3_000;
}

/// Project a world position into viewport coordinates, keeping the
/// player fixed at the centre of the screen.
#[inline]
pub fn world_to_screen(world: Vec2, player: Vec2) -> Vec2 {
    world - player + Vec2::new(consts::VIEWPORT_WIDTH / 2.0, consts::VIEWPORT_HEIGHT / 2.0)
}

/// Whether a projected point lies inside the viewport grown by `margin`
/// on every side (open interval).
#[inline]
pub fn in_view(screen: Vec2, margin: f32) -> bool {
    -margin < screen.x
        && screen.x < consts::VIEWPORT_WIDTH + margin
        && -margin < screen.y
        && screen.y < consts::VIEWPORT_HEIGHT + margin
}
