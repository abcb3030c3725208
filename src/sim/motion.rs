//! Motion integration
//!
//! Moves every pool by one tick. Velocities are per-tick displacements, so
//! nothing here scales by delta time. Removal is left to the collision pass.

use glam::Vec2;

use super::state::{Bullet, Enemy, Item, Particle, Player, Viewport};
use super::tick::TickInput;

/// Move the player by held directions (or snap to the pointer), then clamp
/// the craft inside the viewport.
pub fn move_player(player: &mut Player, input: &TickInput, viewport: Viewport, speed: f32) {
    let target = match input.pointer {
        Some(pointer) => pointer,
        None => player.pos + input.direction() * speed,
    };
    player.pos = viewport.clamp_circle(target, player.radius);
}

pub fn advance_bullets(bullets: &mut [Bullet]) {
    for bullet in bullets {
        bullet.pos += bullet.vel;
    }
}

pub fn advance_enemies(enemies: &mut [Enemy]) {
    for enemy in enemies {
        enemy.pos.y += enemy.speed;
    }
}

pub fn advance_items(items: &mut [Item], fall_speed: f32) {
    for item in items {
        item.pos.y += fall_speed;
    }
}

/// Move particles and burn one frame of life
pub fn advance_particles(particles: &mut [Particle]) {
    for particle in particles {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
}

/// Unit-step direction for held keys (y down). Opposite keys cancel.
pub fn key_direction(up: bool, down: bool, left: bool, right: bool) -> Vec2 {
    let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
    Vec2::new(axis(left, right), axis(up, down))
}
