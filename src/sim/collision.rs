//! Collision detection and pickup effects
//!
//! Everything is an axis-aligned box in world space. Touching an object
//! consumes it, applies its effect from the per-kind table and queues its
//! respawn.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hazard::Hazard;
use super::player::Player;
use super::world::{ObjectKind, World};
use crate::consts::*;
use crate::tuning::DifficultyRules;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// What touching an object does
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Damage(f32),
    SlowHazard,
    RestoreStamina(f32),
    GainHeight(f32),
}

impl Effect {
    pub fn of(kind: ObjectKind, rules: &DifficultyRules) -> Self {
        match kind {
            ObjectKind::Glass => Effect::Damage(rules.glass_damage),
            ObjectKind::BlueOrb => Effect::SlowHazard,
            ObjectKind::GreenOrb => Effect::RestoreStamina(GREEN_ORB_STAMINA),
            ObjectKind::Stairs => Effect::GainHeight(STAIRS_HEIGHT_GAIN),
        }
    }

    fn apply(self, player: &mut Player, hazard: &mut Hazard) {
        match self {
            Effect::Damage(amount) => player.add_stamina(-amount),
            Effect::SlowHazard => {
                hazard.slow_down();
            }
            Effect::RestoreStamina(amount) => player.add_stamina(amount),
            Effect::GainHeight(amount) => player.gain_height(amount),
        }
    }
}

/// One resolved player/object contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub object_id: u32,
    pub kind: ObjectKind,
    pub effect: Effect,
}

/// Consume every object the player overlaps, kind by kind, applying its
/// effect and queueing exactly one respawn per consumed object.
pub fn resolve_collisions(
    player: &mut Player,
    hazard: &mut Hazard,
    world: &mut World,
    rules: &DifficultyRules,
    now_ms: u64,
) -> Vec<Contact> {
    let player_box = player.bounds();
    let anchor = player.pos;
    let mut contacts = Vec::new();

    for kind in ObjectKind::ALL {
        let hits: Vec<u32> = world
            .pool(kind)
            .iter()
            .filter(|obj| obj.bounds().overlaps(&player_box))
            .map(|obj| obj.id)
            .collect();

        for id in hits {
            if world.remove(kind, id).is_none() {
                continue;
            }
            let effect = Effect::of(kind, rules);
            effect.apply(player, hazard);
            world.enqueue_respawn(kind, now_ms + kind.respawn_delay_ms(rules), anchor);
            contacts.push(Contact {
                object_id: id,
                kind,
                effect,
            });
        }
    }

    contacts
}
