//! Fixed timestep simulation tick
//!
//! Advances one round deterministically. Order within a tick is fixed:
//! player, wave, expiry, collisions, respawns, passive climb, then the
//! end-of-round check (overtaken before cleared).

use glam::Vec2;

use super::collision::{Effect, resolve_collisions};
use super::player::MoveIntent;
use super::state::{GameEvent, RoundOutcome, RoundPhase, RoundState, Terminal};
use super::world::ObjectKind;
use crate::consts::*;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directions held this tick (keyboard and pointer already merged)
    pub intent: MoveIntent,
    /// Demo mode - the simulation steers the player itself
    pub autopilot: bool,
}

impl TickInput {
    pub fn moving(intent: MoveIntent) -> Self {
        Self {
            intent,
            ..Default::default()
        }
    }
}

/// Advance the round by `dt_ms` milliseconds. Returns the outcome on the
/// tick the round ends; ticks after that are ignored.
pub fn tick(state: &mut RoundState, input: &TickInput, dt_ms: u64) -> Option<RoundOutcome> {
    if state.is_over() {
        return None;
    }

    state.now_ms += dt_ms;
    state.time_ticks += 1;
    let now = state.now_ms;
    let ratio = dt_ms as f32 / TICK_MS;

    // 1-2. Player
    let intent = if input.autopilot {
        autopilot_intent(state)
    } else {
        input.intent
    };
    state.player.press(intent);
    state.player.update(ratio);

    // 3. Wave
    if state.hazard.update(now, ratio) {
        log::info!(
            "Tsunami speeds up to {:.2} at {:.1}s",
            state.hazard.speed,
            state.elapsed_secs()
        );
        state.events.push(GameEvent::HazardEscalated {
            speed: state.hazard.speed,
        });
    }

    // 4-5. Objects that drifted out of range are recycled around the player
    let anchor = state.player.pos;
    for obj in state.world.take_out_of_view(anchor) {
        let due = now + state.respawn_delay_ms(obj.kind);
        state.world.enqueue_respawn(obj.kind, due, anchor);
    }

    // 6. Contacts
    let contacts = resolve_collisions(
        &mut state.player,
        &mut state.hazard,
        &mut state.world,
        &state.rules,
        now,
    );
    for contact in contacts {
        log::debug!("Touched {} #{}", contact.kind.as_str(), contact.object_id);
        let event = match contact.effect {
            Effect::Damage(amount) => GameEvent::Damage { amount },
            _ => GameEvent::ItemPickup { kind: contact.kind },
        };
        state.events.push(event);
    }

    // 7. Respawns
    state.process_respawns();

    // 8. Passive climb
    if now - state.last_height_gain_ms >= HEIGHT_GAIN_INTERVAL_MS {
        state.player.gain_height(1.0);
        state.last_height_gain_ms = now;
        state.events.push(GameEvent::HeightGained {
            height: state.player.height,
        });
    }

    // 9. End of round
    let terminal = if state.hazard.has_overtaken(state.player.bottom()) {
        Terminal::GameOver
    } else if state.player.height >= state.hazard.target_height as f32 {
        Terminal::Clear
    } else {
        return None;
    };

    Some(finish(state, terminal))
}

fn finish(state: &mut RoundState, terminal: Terminal) -> RoundOutcome {
    let outcome = RoundOutcome {
        mode: state.mode,
        terminal,
        survival_secs: state.elapsed_secs(),
        final_height: match terminal {
            Terminal::Clear => Some(state.player.height),
            Terminal::GameOver => None,
        },
    };

    match terminal {
        Terminal::GameOver => {
            state.phase = RoundPhase::GameOver;
            state.events.push(GameEvent::GameOver);
            log::info!(
                "Swallowed by the tsunami after {:.2}s at height {}",
                outcome.survival_secs,
                state.player.height
            );
        }
        Terminal::Clear => {
            state.phase = RoundPhase::Clear;
            state.events.push(GameEvent::Clear);
            log::info!(
                "Cleared {}m in {:.2}s",
                state.player.height,
                outcome.survival_secs
            );
        }
    }

    state.outcome = Some(outcome);
    outcome
}

/// Wave gap (world units) beyond which the autopilot stops to breathe
const AUTOPILOT_REST_GAP: f32 = 300.0;

/// Demo steering: climb away from the wave, collect what helps, sidestep
/// glass, and rest when the wave is far behind and stamina is low.
pub fn autopilot_intent(state: &RoundState) -> MoveIntent {
    let player = &state.player;
    let gap = state.hazard.world_y - player.bottom();

    if gap > AUTOPILOT_REST_GAP && player.stamina_ratio() < 0.5 {
        return MoveIntent::default();
    }

    let wanted = |kind: ObjectKind| match kind {
        ObjectKind::Stairs => true,
        ObjectKind::GreenOrb => player.stamina_ratio() < 0.7,
        ObjectKind::BlueOrb => state.hazard.speed > state.hazard.base_speed,
        ObjectKind::Glass => false,
    };

    let mut intent = MoveIntent::UP;

    // Nearest useful object that is not behind us
    let target = state
        .world
        .objects()
        .filter(|o| wanted(o.kind) && o.pos.y < player.pos.y + 40.0)
        .min_by(|a, b| {
            let da = a.pos.distance_squared(player.pos);
            let db = b.pos.distance_squared(player.pos);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(target) = target {
        let dx = target.pos.x - player.pos.x;
        if dx > player.base_speed {
            intent.right = true;
        } else if dx < -player.base_speed {
            intent.left = true;
        }
    }

    // Glass straight ahead: step aside
    let ahead = player.pos + Vec2::new(0.0, -PLAYER_HEIGHT);
    if let Some(glass) = state
        .world
        .pool(ObjectKind::Glass)
        .iter()
        .find(|g| (g.pos.x - ahead.x).abs() < PLAYER_WIDTH && (g.pos.y - ahead.y).abs() < PLAYER_HEIGHT)
    {
        let go_left = glass.pos.x >= player.pos.x;
        intent.left = go_left;
        intent.right = !go_left;
    }

    intent
}
