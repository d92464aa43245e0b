//! World objects, their pools and the respawn queue
//!
//! Each object kind lives in its own pool with a fixed population cap.
//! Objects are destroyed only by collision or by drifting out of view, and
//! every destruction queues exactly one respawn request. Requests wait until
//! due and until their pool has headroom; they are never dropped.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::tuning::DifficultyRules;
use crate::{in_view, world_to_screen};

/// World object types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Shards that hurt (stamina damage)
    Glass,
    /// Knocks the wave back one speed step
    BlueOrb,
    /// Restores stamina
    GreenOrb,
    /// Adds height
    Stairs,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 4] = [
        ObjectKind::Glass,
        ObjectKind::BlueOrb,
        ObjectKind::GreenOrb,
        ObjectKind::Stairs,
    ];

    /// Maximum live objects of this kind
    pub fn cap(self) -> usize {
        match self {
            ObjectKind::Glass => 20,
            ObjectKind::BlueOrb => 1,
            ObjectKind::GreenOrb => 3,
            ObjectKind::Stairs => 10,
        }
    }

    /// Side length of the (square) object
    pub fn size(self) -> f32 {
        match self {
            ObjectKind::Glass => 15.0,
            ObjectKind::BlueOrb | ObjectKind::GreenOrb => 25.0,
            ObjectKind::Stairs => 40.0,
        }
    }

    /// Hazards recycle faster than pickups
    pub fn respawn_delay_ms(self, rules: &DifficultyRules) -> u64 {
        match self {
            ObjectKind::Glass => rules.glass_respawn_ms,
            _ => rules.other_respawn_ms,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Glass => "glass",
            ObjectKind::BlueOrb => "blue_orb",
            ObjectKind::GreenOrb => "green_orb",
            ObjectKind::Stairs => "stairs",
        }
    }

    fn index(self) -> usize {
        match self {
            ObjectKind::Glass => 0,
            ObjectKind::BlueOrb => 1,
            ObjectKind::GreenOrb => 2,
            ObjectKind::Stairs => 3,
        }
    }
}

/// A placed object. Immutable once spawned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: u32,
    pub kind: ObjectKind,
    pub pos: Vec2,
}

impl WorldObject {
    /// Position relative to the viewport (derived, never stored)
    pub fn screen_pos(&self, player_pos: Vec2) -> Vec2 {
        world_to_screen(self.pos, player_pos)
    }

    /// True once the object has drifted past the margin around the viewport
    pub fn is_out_of_view(&self, player_pos: Vec2) -> bool {
        !in_view(self.screen_pos(player_pos), VISIBILITY_MARGIN)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.kind.size()))
    }
}

/// Deferred spawn request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RespawnTimer {
    pub due_ms: u64,
    pub kind: ObjectKind,
    /// Spawn around this point (player position when the request was made)
    pub anchor: Vec2,
}

/// Live object pools plus the pending respawn queue
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    /// One pool per kind, indexed by `ObjectKind::index` (sorted by id)
    pools: [Vec<WorldObject>; 4],
    /// Pending respawns in request order
    pending: Vec<RespawnTimer>,
    next_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Fill every pool to its cap around `anchor`
    pub fn populate<R: Rng>(&mut self, anchor: Vec2, rng: &mut R) {
        for kind in ObjectKind::ALL {
            while self.count(kind) < kind.cap() {
                self.spawn(kind, anchor, rng);
            }
        }
    }

    /// Place a new object at `anchor` plus a random offset on each axis.
    /// Callers are responsible for honouring the pool cap.
    pub fn spawn<R: Rng>(&mut self, kind: ObjectKind, anchor: Vec2, rng: &mut R) -> u32 {
        let pos = spawn_position(anchor, rng);
        self.place(kind, pos)
    }

    /// Place a new object at an exact world position
    pub fn place(&mut self, kind: ObjectKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.pools[kind.index()].push(WorldObject { id, kind, pos });
        id
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn pool(&self, kind: ObjectKind) -> &[WorldObject] {
        &self.pools[kind.index()]
    }

    pub fn count(&self, kind: ObjectKind) -> usize {
        self.pools[kind.index()].len()
    }

    pub fn has_headroom(&self, kind: ObjectKind) -> bool {
        self.count(kind) < kind.cap()
    }

    /// Every live object, pool by pool
    pub fn objects(&self) -> impl Iterator<Item = &WorldObject> {
        self.pools.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.pools.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove a specific object
    pub fn remove(&mut self, kind: ObjectKind, id: u32) -> Option<WorldObject> {
        let pool = &mut self.pools[kind.index()];
        let idx = pool.iter().position(|o| o.id == id)?;
        Some(pool.remove(idx))
    }

    /// Remove and return every object that left the visible range
    pub fn take_out_of_view(&mut self, player_pos: Vec2) -> Vec<WorldObject> {
        let mut expired = Vec::new();
        for pool in &mut self.pools {
            pool.retain(|obj| {
                let gone = obj.is_out_of_view(player_pos);
                if gone {
                    expired.push(*obj);
                }
                !gone
            });
        }
        expired
    }

    pub fn enqueue_respawn(&mut self, kind: ObjectKind, due_ms: u64, anchor: Vec2) {
        self.pending.push(RespawnTimer {
            due_ms,
            kind,
            anchor,
        });
    }

    pub fn pending(&self) -> &[RespawnTimer] {
        &self.pending
    }

    /// Spawn every due request whose pool has headroom, in request order.
    /// Due requests for a full pool stay queued for a later tick.
    pub fn process_respawns<R: Rng>(&mut self, now_ms: u64, rng: &mut R) -> Vec<WorldObject> {
        let mut spawned = Vec::new();
        let Self {
            pools,
            pending,
            next_id,
        } = self;

        pending.retain(|timer| {
            if now_ms < timer.due_ms {
                return true;
            }
            let pool = &mut pools[timer.kind.index()];
            if pool.len() >= timer.kind.cap() {
                return true;
            }
            let obj = WorldObject {
                id: *next_id,
                kind: timer.kind,
                pos: spawn_position(timer.anchor, rng),
            };
            *next_id += 1;
            pool.push(obj);
            spawned.push(obj);
            false
        });

        for obj in &spawned {
            log::debug!("Respawned {} #{} at {:?}", obj.kind.as_str(), obj.id, obj.pos);
        }
        spawned
    }
}

fn spawn_position<R: Rng>(anchor: Vec2, rng: &mut R) -> Vec2 {
    let dx = rng.random_range(-SPAWN_RADIUS..=SPAWN_RADIUS);
    let dy = rng.random_range(-SPAWN_RADIUS..=SPAWN_RADIUS);
    anchor + Vec2::new(dx as f32, dy as f32)
}
