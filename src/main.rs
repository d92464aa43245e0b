//! Tsunami Run entry point
//!
//! Headless driver: plays rounds on autopilot with a fixed-step
//! accumulator and logs how each one ends.
//!
//! Usage: `tsunami-run [seed] [rounds]`

use tsunami_run::consts::*;
use tsunami_run::sim::{Terminal, TickInput};
use tsunami_run::{Command, Game, Screen, Settings, Tuning};

/// Frame length of the simulated host display
const FRAME_MS: f32 = 1000.0 / 60.0;
/// Safety stop for a single round (ten simulated minutes)
const MAX_ROUND_FRAMES: u32 = 60 * 60 * 10;

/// Host-side loop state
struct Driver {
    game: Game,
    accumulator: f32,
    input: TickInput,
}

impl Driver {
    fn new(seed: u64) -> Self {
        Self {
            game: Game::new(seed, Settings::default(), Tuning::default()),
            accumulator: 0.0,
            input: TickInput {
                autopilot: true,
                ..Default::default()
            },
        }
    }

    /// Run simulation ticks for one host frame
    fn update(&mut self, frame_ms: f32) {
        let frame_ms = frame_ms.min(100.0);
        self.accumulator += frame_ms;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS as f32 && substeps < MAX_SUBSTEPS {
            self.game.tick(&self.input, SIM_DT_MS);
            self.accumulator -= SIM_DT_MS as f32;
            substeps += 1;
        }

        for cue in self.game.take_cues() {
            log::trace!("cue {:?} @ {:.1}", cue.effect, cue.volume);
        }
        if let Some((text, _)) = self.game.notification() {
            log::trace!("notification: {text}");
        }
    }

    /// Play one round from the current menu state
    fn play_round(&mut self) {
        let start = if self.game.achievements.hard_mode_unlocked {
            Command::PlayHard
        } else {
            Command::Play
        };
        self.game.handle(start);
        self.accumulator = 0.0;

        let mut frames = 0;
        while self.game.screen == Screen::Playing && frames < MAX_ROUND_FRAMES {
            self.update(FRAME_MS);
            frames += 1;
        }

        match self.game.last_outcome() {
            Some(outcome) if self.game.screen != Screen::Playing => {
                let verdict = match outcome.terminal {
                    Terminal::GameOver => "GAME OVER",
                    Terminal::Clear => "CLEAR",
                };
                log::info!(
                    "[{}] {verdict}: survived {:.2}s, height {}",
                    outcome.mode.as_str(),
                    outcome.survival_secs,
                    outcome.final_height.map_or("-".to_string(), |h| format!("{h}m")),
                );
            }
            _ => log::warn!("Round still running after {frames} frames, abandoning"),
        }
        self.game.handle(Command::ToTitle);
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x7500_7A31);
    let rounds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(5);

    log::info!("Tsunami Run (headless) starting with seed {seed}, {rounds} rounds");

    let mut driver = Driver::new(seed);
    for _ in 0..rounds {
        if !driver.game.is_running() {
            break;
        }
        driver.play_round();
    }

    let ach = &driver.game.achievements;
    for (mode, set) in ach.visible() {
        for a in set {
            log::info!(
                "{:>6} {:<18} {}",
                mode.as_str(),
                a.id,
                if a.unlocked { "[unlocked]" } else { "[locked]" }
            );
        }
    }
    driver.game.handle(Command::Quit);
}
