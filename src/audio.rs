//! Sound cues
//!
//! The simulation never plays audio. It reports events; this module maps
//! them to the cue a presentation layer should play, plus the music track
//! for each screen, at the volume the player chose.

use crate::game::Screen;
use crate::settings::{Settings, VolumeChannel};
use crate::sim::{GameEvent, Mode};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Orb or stairs collected
    GetItem,
    /// Glass touched
    Damage,
    /// Swallowed by the wave
    GameOver,
    /// Target height reached
    Clear,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ItemPickup { .. } => Some(SoundEffect::GetItem),
            GameEvent::Damage { .. } => Some(SoundEffect::Damage),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::Clear => Some(SoundEffect::Clear),
            GameEvent::HazardEscalated { .. } | GameEvent::HeightGained { .. } => None,
        }
    }
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BgmTrack {
    Lobby,
    Normal,
    Hard,
}

impl BgmTrack {
    /// Menus use the lobby track; a round uses its mode's track. End screens
    /// keep whatever the round was playing.
    pub fn for_screen(screen: Screen, mode: Mode) -> Self {
        match screen {
            Screen::Title | Screen::Rules { .. } | Screen::Achievements => BgmTrack::Lobby,
            Screen::Playing | Screen::GameOver | Screen::Clear => match mode {
                Mode::Normal => BgmTrack::Normal,
                Mode::Hard => BgmTrack::Hard,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BgmTrack::Lobby => "lobby",
            BgmTrack::Normal => "normal",
            BgmTrack::Hard => "hard",
        }
    }
}

/// A cue ready for playback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub effect: SoundEffect,
    pub volume: f32,
}

/// Turn a batch of events into cues at the player's SFX volume
pub fn cues(events: &[GameEvent], settings: &Settings) -> Vec<Cue> {
    let volume = settings.volume(VolumeChannel::Sfx);
    events
        .iter()
        .filter_map(SoundEffect::for_event)
        .map(|effect| Cue { effect, volume })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ObjectKind;

    #[test]
    fn events_map_to_cues() {
        let events = [
            GameEvent::Damage { amount: 30.0 },
            GameEvent::HeightGained { height: 3.0 },
            GameEvent::ItemPickup {
                kind: ObjectKind::Stairs,
            },
            GameEvent::GameOver,
        ];
        let settings = Settings {
            sfx_volume: 0.7,
            ..Default::default()
        };
        let cues = cues(&events, &settings);
        let effects: Vec<_> = cues.iter().map(|c| c.effect).collect();
        assert_eq!(
            effects,
            [SoundEffect::Damage, SoundEffect::GetItem, SoundEffect::GameOver]
        );
        assert!(cues.iter().all(|c| c.volume == 0.7));
    }

    #[test]
    fn menus_play_the_lobby_track() {
        assert_eq!(BgmTrack::for_screen(Screen::Title, Mode::Hard), BgmTrack::Lobby);
        assert_eq!(
            BgmTrack::for_screen(Screen::Rules { page: 1 }, Mode::Normal),
            BgmTrack::Lobby
        );
        assert_eq!(BgmTrack::for_screen(Screen::Playing, Mode::Hard), BgmTrack::Hard);
        assert_eq!(BgmTrack::for_screen(Screen::Clear, Mode::Normal), BgmTrack::Normal);
    }
}
