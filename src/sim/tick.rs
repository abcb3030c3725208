//! Simulation step
//!
//! One call advances the run by exactly one display frame, in a fixed order:
//! timers, motion, culling, spawning, then the three collision passes.

use glam::Vec2;
use rand::Rng;

use super::collision::{cull_offscreen, resolve_bullet_hits, resolve_enemy_contacts, resolve_pickups};
use super::motion;
use super::spawn::maybe_spawn_enemy;
use super::state::{GameEvent, GamePhase, GameState, Viewport};
use super::weapon;
use crate::tuning::Tuning;

/// Input snapshot for a single frame (read once at the top of the step)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Absolute pointer/touch target; overrides held keys when present
    pub pointer: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Per-axis step direction from held keys (y down)
    pub fn direction(&self) -> Vec2 {
        motion::key_direction(self.up, self.down, self.left, self.right)
    }
}

/// Advance the game state by one frame of `dt_ms` wall-clock milliseconds.
///
/// Outside `Running` nothing in the pools changes. Events for the frame are
/// left in `state.events`.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    dt_ms: f32,
    viewport: Viewport,
    tuning: &Tuning,
    rng: &mut R,
) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                state.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    if state.phase != GamePhase::Running {
        return;
    }

    let dt_ms = dt_ms.max(0.0);
    state.frame += 1;
    state.elapsed_ms += f64::from(dt_ms);

    // Timers
    if weapon::decay(&mut state.player, dt_ms) {
        state.events.push(GameEvent::WeaponExpired);
    }
    state.player.hurt_flash = state.player.hurt_flash.saturating_sub(1);

    // Motion
    motion::move_player(&mut state.player, input, viewport, tuning.player_speed);
    motion::advance_bullets(&mut state.bullets);
    motion::advance_enemies(&mut state.enemies);
    motion::advance_items(&mut state.items, tuning.item_fall_speed);
    motion::advance_particles(&mut state.particles);
    state.particles.retain(|p| p.life > 0);
    cull_offscreen(state, viewport);

    // Spawning
    maybe_spawn_enemy(state, viewport, tuning, rng);
    if weapon::fire_due(&mut state.fire_timer_ms, dt_ms, tuning.fire_period_ms) {
        let bullets = weapon::fire(&state.player, &mut state.bullets, tuning);
        state.events.push(GameEvent::Shot { bullets });
    }

    // Collisions
    resolve_enemy_contacts(state, tuning, rng);
    if state.player.is_dead() {
        state.player.health = 0;
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over: score {} after {} frames",
            state.score,
            state.frame
        );
        return;
    }
    resolve_bullet_hits(state, tuning, rng);
    resolve_pickups(state, tuning);
}
