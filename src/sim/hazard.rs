//! The tsunami
//!
//! Closes in from below by decreasing its world y every tick. Its speed
//! ramps by a fixed factor on a fixed interval and a blue orb knocks it
//! back down one step, never below the base speed.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    /// Top edge of the wave in world space
    pub world_y: f32,
    /// Distance closed per reference tick
    pub speed: f32,
    pub base_speed: f32,
    /// Height the player must reach to clear the round
    pub target_height: u32,
    /// Session time of the last escalation (or round start)
    pub last_speedup_ms: u64,
}

impl Hazard {
    /// Base speed is a third of the player's peak speed
    pub fn new(player_base_speed: f32, target_height: u32, now_ms: u64) -> Self {
        let base_speed = player_base_speed / 3.0;
        Self {
            world_y: HAZARD_START_Y,
            speed: base_speed,
            base_speed,
            target_height,
            last_speedup_ms: now_ms,
        }
    }

    /// Advance one tick. Returns true when the wave escalated this tick.
    pub fn update(&mut self, now_ms: u64, tick_ratio: f32) -> bool {
        let escalated = now_ms.saturating_sub(self.last_speedup_ms) >= HAZARD_SPEEDUP_INTERVAL_MS;
        if escalated {
            self.speed *= HAZARD_SPEED_MULTIPLIER;
            self.last_speedup_ms = now_ms;
        }
        self.world_y -= self.speed * tick_ratio;
        escalated
    }

    /// Step the speed back down once. Does not touch the escalation timer.
    /// Returns false when already at base speed.
    pub fn slow_down(&mut self) -> bool {
        if self.speed <= self.base_speed {
            return false;
        }
        self.speed = (self.speed / HAZARD_SPEED_MULTIPLIER).max(self.base_speed);
        true
    }

    /// Whether the wave has reached the player's feet
    pub fn has_overtaken(&self, player_bottom: f32) -> bool {
        self.world_y <= player_bottom
    }

    /// Gap between wave and a world y, for the HUD (metres, never negative)
    pub fn distance_from(&self, world_y: f32) -> f32 {
        ((self.world_y - world_y) / 10.0).max(0.0)
    }

    /// Wave top in viewport coordinates
    pub fn screen_y(&self, player_world_y: f32) -> f32 {
        self.world_y - player_world_y + VIEWPORT_HEIGHT / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hazard() -> Hazard {
        Hazard::new(PLAYER_BASE_SPEED, 500, 0)
    }

    #[test]
    fn starts_at_base_speed() {
        let h = hazard();
        assert!((h.speed - PLAYER_BASE_SPEED / 3.0).abs() < 1e-6);
        assert_eq!(h.speed, h.base_speed);
        assert_eq!(h.world_y, HAZARD_START_Y);
    }

    #[test]
    fn escalates_after_interval_then_slows_one_step() {
        let mut h = hazard();
        let mut now = 0;
        while now < HAZARD_SPEEDUP_INTERVAL_MS - 10 {
            now += 10;
            assert!(!h.update(now, 1.0));
        }
        assert_eq!(h.speed, h.base_speed);

        assert!(h.update(HAZARD_SPEEDUP_INTERVAL_MS, 1.0));
        assert!((h.speed - h.base_speed * HAZARD_SPEED_MULTIPLIER).abs() < 1e-5);

        assert!(h.slow_down());
        assert!((h.speed - h.base_speed).abs() < 1e-5);
        assert!(h.speed >= h.base_speed);
        // Escalation timer untouched by the pickup
        assert_eq!(h.last_speedup_ms, HAZARD_SPEEDUP_INTERVAL_MS);
    }

    #[test]
    fn slow_down_floors_at_base() {
        let mut h = hazard();
        assert!(!h.slow_down());
        assert_eq!(h.speed, h.base_speed);

        h.speed = h.base_speed * 1.1;
        assert!(h.slow_down());
        assert_eq!(h.speed, h.base_speed);
    }

    #[test]
    fn closes_in_every_tick() {
        let mut h = hazard();
        h.update(16, 1.0);
        assert!((h.world_y - (HAZARD_START_Y - h.base_speed)).abs() < 1e-4);
    }

    #[test]
    fn overtake_boundary_is_player_feet() {
        let h = hazard();
        assert!(!h.has_overtaken(HAZARD_START_Y - 1.0));
        assert!(h.has_overtaken(HAZARD_START_Y));
        assert!((h.distance_from(0.0) - 36.0).abs() < 1e-4);
        assert_eq!(h.distance_from(1_000.0), 0.0);
    }
}
