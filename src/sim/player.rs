//! The fleeing player
//!
//! Movement is intent driven: the four direction flags are "pressed this
//! tick" and are cleared once consumed. Speed fades with stamina down to a
//! third of peak, never below.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Directional intent for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub const UP: Self = Self { up: true, down: false, left: false, right: false };
    pub const DOWN: Self = Self { up: false, down: true, left: false, right: false };
    pub const LEFT: Self = Self { up: false, down: false, left: true, right: false };
    pub const RIGHT: Self = Self { up: false, down: false, left: false, right: true };

    /// Combine two sources (keyboard and pointer are OR'd)
    pub fn merge(self, other: Self) -> Self {
        Self {
            up: self.up || other.up,
            down: self.down || other.down,
            left: self.left || other.left,
            right: self.right || other.right,
        }
    }

    /// Intent from a held pointer: steer toward the screen quadrant it is in
    pub fn from_pointer(screen: Vec2) -> Self {
        let left = screen.x < VIEWPORT_WIDTH / 2.0;
        let up = screen.y < VIEWPORT_HEIGHT / 2.0;
        Self {
            up,
            down: !up,
            left,
            right: !left,
        }
    }

    /// Net direction per axis; opposite flags cancel. Screen y grows down.
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }

    pub fn is_idle(&self) -> bool {
        self.direction() == Vec2::ZERO
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// World position (moving up decreases y)
    pub pos: Vec2,
    pub stamina: f32,
    pub max_stamina: f32,
    pub base_speed: f32,
    /// Height climbed so far (never decreases)
    pub height: f32,
    /// Intent pressed since the last update
    intent: MoveIntent,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            stamina: MAX_STAMINA,
            max_stamina: MAX_STAMINA,
            base_speed: PLAYER_BASE_SPEED,
            height: 0.0,
            intent: MoveIntent::default(),
        }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert intent for the next update (accumulates until consumed)
    pub fn press(&mut self, intent: MoveIntent) {
        self.intent = self.intent.merge(intent);
    }

    /// Intent waiting to be consumed
    pub fn pending_intent(&self) -> MoveIntent {
        self.intent
    }

    /// Speed after fatigue, in [base_speed / 3, base_speed]
    pub fn effective_speed(&self) -> f32 {
        let ratio = self.stamina_ratio();
        (self.base_speed * ratio).max(self.base_speed / 3.0)
    }

    pub fn stamina_ratio(&self) -> f32 {
        self.stamina / self.max_stamina
    }

    /// Advance one tick. `tick_ratio` scales the per-tick amounts when the
    /// step differs from the reference frame length.
    pub fn update(&mut self, tick_ratio: f32) {
        let intent = std::mem::take(&mut self.intent);
        let dir = intent.direction();

        if dir == Vec2::ZERO {
            self.add_stamina(STAMINA_REGEN * tick_ratio);
            return;
        }

        let speed = self.effective_speed();
        self.pos += dir.normalize() * speed * tick_ratio;
        self.add_stamina(-STAMINA_DRAIN * tick_ratio);
    }

    /// Change stamina, clamped to [0, max_stamina]
    pub fn add_stamina(&mut self, delta: f32) {
        self.stamina = (self.stamina + delta).clamp(0.0, self.max_stamina);
    }

    pub fn gain_height(&mut self, amount: f32) {
        self.height += amount.max(0.0);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    /// Lowest world y the player occupies (feet)
    pub fn bottom(&self) -> f32 {
        self.pos.y + PLAYER_HEIGHT / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn opposite_intents_cancel() {
        let intent = MoveIntent {
            up: true,
            down: true,
            left: true,
            right: false,
        };
        assert_eq!(intent.direction(), Vec2::new(-1.0, 0.0));

        let both = MoveIntent::UP.merge(MoveIntent::DOWN);
        assert!(both.is_idle());
    }

    #[test]
    fn opposite_intents_count_as_idle() {
        let mut player = Player::new();
        player.stamina = 50.0;
        player.press(MoveIntent::LEFT.merge(MoveIntent::RIGHT));
        player.update(1.0);
        assert_eq!(player.pos, Vec2::ZERO);
        assert!((player.stamina - 50.2).abs() < 1e-4);
    }

    #[test]
    fn intent_is_consumed_each_tick() {
        let mut player = Player::new();
        player.press(MoveIntent::UP);
        player.update(1.0);
        assert!((player.pos.y + PLAYER_BASE_SPEED).abs() < 1e-4);
        assert_eq!(player.pending_intent(), MoveIntent::default());

        // No re-assertion: the player stays put
        let y = player.pos.y;
        player.update(1.0);
        assert_eq!(player.pos.y, y);
    }

    #[test]
    fn diagonal_movement_is_normalized() {
        let mut player = Player::new();
        player.press(MoveIntent::UP.merge(MoveIntent::RIGHT));
        player.update(1.0);
        assert!((player.pos.length() - PLAYER_BASE_SPEED).abs() < 1e-4);
    }

    #[test]
    fn fatigue_floors_at_a_third() {
        let mut player = Player::new();
        player.stamina = 0.0;
        assert!((player.effective_speed() - PLAYER_BASE_SPEED / 3.0).abs() < 1e-6);
        player.stamina = 50.0;
        assert!((player.effective_speed() - PLAYER_BASE_SPEED / 2.0).abs() < 1e-6);
    }

    #[test]
    fn stamina_drains_while_moving_and_clamps() {
        let mut player = Player::new();
        player.stamina = 0.01;
        player.press(MoveIntent::DOWN);
        player.update(1.0);
        assert_eq!(player.stamina, 0.0);

        player.stamina = 99.9;
        player.update(1.0);
        assert_eq!(player.stamina, MAX_STAMINA);
    }

    #[test]
    fn pointer_quadrant_maps_to_intent() {
        let intent = MoveIntent::from_pointer(Vec2::new(100.0, 600.0));
        assert!(intent.left && intent.down);
        assert!(!intent.right && !intent.up);
    }

    fn any_intent() -> impl Strategy<Value = MoveIntent> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(up, down, left, right)| MoveIntent {
                up,
                down,
                left,
                right,
            },
        )
    }

    proptest! {
        #[test]
        fn stamina_stays_in_range(
            start in 0.0f32..=MAX_STAMINA,
            intents in proptest::collection::vec(any_intent(), 1..200),
        ) {
            let mut player = Player::new();
            player.stamina = start;
            for intent in intents {
                let before = player.stamina;
                player.press(intent);
                player.update(1.0);
                prop_assert!((0.0..=MAX_STAMINA).contains(&player.stamina));
                if intent.is_idle() {
                    prop_assert!(player.stamina > before || before == MAX_STAMINA);
                } else {
                    prop_assert!(player.stamina < before || before == 0.0);
                }
            }
        }

        #[test]
        fn effective_speed_bounded(stamina in 0.0f32..=MAX_STAMINA) {
            let mut player = Player::new();
            player.stamina = stamina;
            let speed = player.effective_speed();
            prop_assert!(speed >= PLAYER_BASE_SPEED / 3.0);
            prop_assert!(speed <= PLAYER_BASE_SPEED);
        }
    }
}
