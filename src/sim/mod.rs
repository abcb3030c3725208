//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Randomness only through the RNG handed to `tick`
//! - Stable iteration order (pool insertion order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapon;

pub use collision::{circle_box_overlap, boxes_overlap, circles_overlap, cull_offscreen};
pub use spawn::{maybe_drop_item, maybe_spawn_enemy, spawn_interval, spawn_particles};
pub use state::{
    BULLET_SIZE, Bullet, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Item, ItemKind,
    Particle, ParticleColor, Player, Viewport,
};
pub use tick::{TickInput, tick};
