//! Screen state machine
//!
//! Title, Rules and Achievements are menus around the round itself. A round
//! runs on the Playing screen and ends on GameOver or Clear, from where the
//! player retries (same mode) or returns to the title. Leaving Playing early
//! simply drops the round; the next one starts from scratch.

use crate::achievements::Achievements;
use crate::audio::{BgmTrack, Cue, cues};
use crate::consts::NOTIFICATION_MS;
use crate::settings::{Settings, VolumeChannel};
use crate::sim::{self, Mode, RoundOutcome, RoundState, Terminal, TickInput};
use crate::tuning::Tuning;

/// Rules text, one slice per page
pub const RULES_PAGES: [&[&str]; 2] = [
    &[
        "--- Rules (1/2) ---",
        "Run from the tsunami rising behind you.",
        "Move with W, A, S, D or by touching the screen.",
        "You stay centred; the world scrolls around you.",
        "Reach the target height to clear the round.",
        "",
        "--- Stamina ---",
        "Moving drains stamina and slows you down.",
        "Standing still recovers it.",
    ],
    &[
        "--- Items and obstacles (2/2) ---",
        "[Stairs] white: +10 height.",
        "[Green orb]: +20 stamina.",
        "[Blue orb]: slows the tsunami by one step.",
        "[Glass] grey: -30 stamina.",
        "",
        "--- Hard mode ---",
        "Unlock every normal achievement to open it.",
    ],
];

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Rules { page: usize },
    Achievements,
    Playing,
    GameOver,
    Clear,
}

/// Menu-level input from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    PlayHard,
    OpenRules,
    OpenAchievements,
    NextPage,
    PrevPage,
    /// Leave the current screen for the title (also abandons a round)
    ToTitle,
    Retry,
    Volume { channel: VolumeChannel, steps: i32 },
    Quit,
}

/// Time-boxed message shown after an unlock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub emitted_ms: u64,
}

impl Notification {
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        (self.emitted_ms + NOTIFICATION_MS).saturating_sub(now_ms)
    }
}

/// Everything that survives between rounds, plus the round in progress
#[derive(Debug)]
pub struct Game {
    pub screen: Screen,
    /// Mode of the current or most recent round
    pub mode: Mode,
    pub settings: Settings,
    pub tuning: Tuning,
    pub achievements: Achievements,
    round: Option<RoundState>,
    last_outcome: Option<RoundOutcome>,
    notification: Option<Notification>,
    /// Session clock across all screens
    clock_ms: u64,
    seed: u64,
    rounds_started: u64,
    running: bool,
}

impl Game {
    pub fn new(seed: u64, settings: Settings, tuning: Tuning) -> Self {
        Self {
            screen: Screen::Title,
            mode: Mode::Normal,
            settings,
            tuning,
            achievements: Achievements::new(),
            round: None,
            last_outcome: None,
            notification: None,
            clock_ms: 0,
            seed,
            rounds_started: 0,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn round_mut(&mut self) -> Option<&mut RoundState> {
        self.round.as_mut()
    }

    pub fn last_outcome(&self) -> Option<&RoundOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Active notification text and how long it stays up
    pub fn notification(&self) -> Option<(&str, u64)> {
        let n = self.notification.as_ref()?;
        let remaining = n.remaining_ms(self.clock_ms);
        (remaining > 0).then_some((n.text.as_str(), remaining))
    }

    pub fn bgm_track(&self) -> BgmTrack {
        BgmTrack::for_screen(self.screen, self.mode)
    }

    /// Apply a menu command. Returns false when it does nothing on the
    /// current screen.
    pub fn handle(&mut self, command: Command) -> bool {
        use Command::*;

        match (self.screen, command) {
            (_, Quit) => {
                log::info!("Quit requested");
                self.running = false;
            }
            (Screen::Title, Play) => self.start_round(Mode::Normal),
            (Screen::Title, PlayHard) if self.achievements.hard_mode_unlocked => {
                self.start_round(Mode::Hard)
            }
            (Screen::Title, OpenRules) => self.screen = Screen::Rules { page: 0 },
            (Screen::Title, OpenAchievements) => self.screen = Screen::Achievements,
            (Screen::Title, Volume { channel, steps }) => {
                let volume = self.settings.adjust_volume(channel, steps);
                log::debug!("{} volume {volume:.1}", channel.as_str());
            }
            (Screen::Rules { page }, NextPage) if page + 1 < RULES_PAGES.len() => {
                self.screen = Screen::Rules { page: page + 1 }
            }
            (Screen::Rules { page }, PrevPage) if page > 0 => {
                self.screen = Screen::Rules { page: page - 1 }
            }
            (Screen::Rules { .. } | Screen::Achievements, ToTitle) => self.screen = Screen::Title,
            (Screen::Playing, ToTitle) => {
                log::info!("Round abandoned");
                self.round = None;
                self.screen = Screen::Title;
            }
            (Screen::GameOver | Screen::Clear, Retry) => self.start_round(self.mode),
            (Screen::GameOver | Screen::Clear, ToTitle) => {
                self.round = None;
                self.screen = Screen::Title;
            }
            _ => return false,
        }
        true
    }

    fn start_round(&mut self, mode: Mode) {
        let seed = self
            .seed
            .wrapping_add(self.rounds_started.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.rounds_started += 1;
        self.mode = mode;
        self.round = Some(RoundState::new(seed, mode, &self.tuning));
        self.screen = Screen::Playing;
    }

    /// Advance the session clock and, while playing, the round. Returns the
    /// outcome on the tick the round ends, after achievements were applied.
    pub fn tick(&mut self, input: &TickInput, dt_ms: u64) -> Option<RoundOutcome> {
        self.clock_ms += dt_ms;
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.remaining_ms(self.clock_ms) == 0)
        {
            self.notification = None;
        }

        if self.screen != Screen::Playing {
            return None;
        }
        let round = self.round.as_mut()?;
        let outcome = sim::tick(round, input, dt_ms)?;

        for unlock in self.achievements.evaluate(&outcome) {
            self.notify(unlock.message());
        }
        self.last_outcome = Some(outcome);
        self.screen = match outcome.terminal {
            Terminal::GameOver => Screen::GameOver,
            Terminal::Clear => Screen::Clear,
        };
        Some(outcome)
    }

    /// Show a message; a newer one replaces whatever is showing
    pub fn notify(&mut self, text: &str) {
        self.notification = Some(Notification {
            text: text.to_string(),
            emitted_ms: self.clock_ms,
        });
    }

    /// Sound cues for everything the round reported since the last call
    pub fn take_cues(&mut self) -> Vec<Cue> {
        match self.round.as_mut() {
            Some(round) => cues(&round.drain_events(), &self.settings),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::consts::SIM_DT_MS;

    fn game() -> Game {
        Game::new(1234, Settings::default(), Tuning::default())
    }

    /// Let the wave catch an idle player
    fn play_until_over(game: &mut Game) -> RoundOutcome {
        for _ in 0..100_000 {
            if let Some(outcome) = game.tick(&TickInput::default(), SIM_DT_MS) {
                return outcome;
            }
        }
        panic!("round never ended");
    }

    #[test]
    fn menus_navigate_and_return() {
        let mut game = game();
        assert!(game.handle(Command::OpenRules));
        assert_eq!(game.screen, Screen::Rules { page: 0 });
        assert!(!game.handle(Command::PrevPage));
        assert!(game.handle(Command::NextPage));
        assert!(!game.handle(Command::NextPage));
        assert_eq!(game.screen, Screen::Rules { page: 1 });
        assert!(game.handle(Command::ToTitle));
        assert!(game.handle(Command::OpenAchievements));
        assert_eq!(game.achievements.visible().count(), 1);
        assert!(game.handle(Command::ToTitle));
        assert_eq!(game.screen, Screen::Title);
        assert_eq!(game.bgm_track(), BgmTrack::Lobby);
    }

    #[test]
    fn hard_mode_is_gated() {
        let mut game = game();
        assert!(!game.handle(Command::PlayHard));
        assert_eq!(game.screen, Screen::Title);

        game.achievements.normal.iter_mut().for_each(|a| a.unlocked = true);
        game.achievements.hard_mode_unlocked = true;
        assert!(game.handle(Command::PlayHard));
        assert_eq!(game.screen, Screen::Playing);
        assert_eq!(game.mode, Mode::Hard);
        assert_eq!(game.bgm_track(), BgmTrack::Hard);
    }

    #[test]
    fn round_ends_on_game_over_and_retries_fresh() {
        let mut game = game();
        game.handle(Command::Play);
        let outcome = play_until_over(&mut game);
        assert_eq!(outcome.terminal, Terminal::GameOver);
        assert_eq!(game.screen, Screen::GameOver);
        assert_eq!(game.last_outcome(), Some(&outcome));

        let cues = game.take_cues();
        assert!(cues.iter().any(|c| c.effect == SoundEffect::GameOver));

        assert!(game.handle(Command::Retry));
        assert_eq!(game.screen, Screen::Playing);
        let round = game.round().unwrap();
        assert_eq!(round.now_ms, 0);
        assert!(round.outcome.is_none());
    }

    #[test]
    fn quitting_mid_round_abandons_it() {
        let mut game = game();
        game.handle(Command::Play);
        game.tick(&TickInput::default(), SIM_DT_MS);
        assert!(game.handle(Command::ToTitle));
        assert!(game.round().is_none());
        assert_eq!(game.screen, Screen::Title);
        assert!(game.tick(&TickInput::default(), SIM_DT_MS).is_none());
    }

    #[test]
    fn unlock_shows_a_notification_for_three_seconds() {
        let mut game = game();
        game.handle(Command::Play);
        // Park the wave far away for a minute, then let it through
        while game.round().unwrap().now_ms < 61_000 {
            game.round_mut().unwrap().hazard.world_y = 1.0e9;
            game.round_mut().unwrap().hazard.target_height = 1000;
            assert!(game.tick(&TickInput::default(), SIM_DT_MS).is_none());
        }
        let bottom = game.round().unwrap().player.bottom();
        game.round_mut().unwrap().hazard.world_y = bottom;
        let outcome = game.tick(&TickInput::default(), SIM_DT_MS).unwrap();
        assert_eq!(outcome.terminal, Terminal::GameOver);
        assert!(game.achievements.is_unlocked("survived_1_min"));
        assert!(!game.achievements.is_unlocked("survived_3_min"));

        let (text, remaining) = game.notification().unwrap();
        assert!(text.contains("Survive 1 minute"));
        assert_eq!(remaining, NOTIFICATION_MS);

        game.tick(&TickInput::default(), 2_999);
        assert!(game.notification().is_some());
        game.tick(&TickInput::default(), 1);
        assert!(game.notification().is_none());
    }

    #[test]
    fn volume_only_from_title() {
        let mut game = game();
        assert!(game.handle(Command::Volume {
            channel: VolumeChannel::Sfx,
            steps: 1
        }));
        assert_eq!(game.settings.percent(VolumeChannel::Sfx), 60);
        game.handle(Command::Play);
        assert!(!game.handle(Command::Volume {
            channel: VolumeChannel::Sfx,
            steps: 1
        }));
    }

    #[test]
    fn quit_stops_the_session() {
        let mut game = game();
        assert!(game.handle(Command::Quit));
        assert!(!game.is_running());
    }
}
