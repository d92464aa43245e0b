//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives as a tick delta
//! - Seeded RNG only
//! - Stable iteration order (pool by pool, by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod hazard;
pub mod player;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{Aabb, Contact, Effect, resolve_collisions};
pub use hazard::Hazard;
pub use player::{MoveIntent, Player};
pub use state::{GameEvent, Mode, RoundOutcome, RoundPhase, RoundState, Terminal};
pub use tick::{TickInput, autopilot_intent, tick};
pub use world::{ObjectKind, RespawnTimer, World, WorldObject};
