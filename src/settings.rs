//! Player preferences
//!
//! Kept apart from achievements; parsed from JSON by the host if it keeps
//! them anywhere.

use serde::{Deserialize, Serialize};

/// Step used by the title screen volume buttons
pub const VOLUME_STEP: f32 = 0.1;

/// Which mixer channel a volume command targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeChannel {
    Bgm,
    Sfx,
}

impl VolumeChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeChannel::Bgm => "BGM",
            VolumeChannel::Sfx => "SFX",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Music volume (0.0 - 1.0)
    pub bgm_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bgm_volume: 0.5,
            sfx_volume: 0.5,
        }
    }
}

impl Settings {
    pub fn volume(&self, channel: VolumeChannel) -> f32 {
        match channel {
            VolumeChannel::Bgm => self.bgm_volume,
            VolumeChannel::Sfx => self.sfx_volume,
        }
    }

    /// Nudge a channel by `steps` increments, clamped to [0, 1] and kept on
    /// the 0.1 grid. Returns the new volume.
    pub fn adjust_volume(&mut self, channel: VolumeChannel, steps: i32) -> f32 {
        let slot = match channel {
            VolumeChannel::Bgm => &mut self.bgm_volume,
            VolumeChannel::Sfx => &mut self.sfx_volume,
        };
        let raw = *slot + steps as f32 * VOLUME_STEP;
        *slot = ((raw * 10.0).round() / 10.0).clamp(0.0, 1.0);
        *slot
    }

    /// Volume as a whole percentage for display
    pub fn percent(&self, channel: VolumeChannel) -> u32 {
        (self.volume(channel) * 100.0).round() as u32
    }

    /// Parse settings, falling back to defaults when malformed
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                settings.bgm_volume = settings.bgm_volume.clamp(0.0, 1.0);
                settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
