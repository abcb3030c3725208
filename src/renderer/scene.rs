//! Turns a game state into a flat triangle list
//!
//! Pure CPU work, kept apart from the GPU pipeline so it can be tested
//! without a device. Draw order: player, enemies, bullets, items, particles.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{BULLET_SIZE, EnemyKind, GameState, ItemKind, ParticleColor};

/// Opacity of the craft while the hurt flash is active
pub const HURT_ALPHA: f32 = 0.5;
/// Glyph size for pickups
const ITEM_SIZE: f32 = 24.0;
/// Particle square size
const PARTICLE_SIZE: f32 = 3.0;
const CIRCLE_SEGMENTS: u32 = 20;

/// Presentation switches that never reach the simulation
#[derive(Debug, Clone, Copy)]
pub struct SceneOptions {
    /// Blink the craft after damage (off for reduced motion)
    pub hurt_flash: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self { hurt_flash: true }
    }
}

/// Build the vertices for one frame, in pixel coordinates
pub fn build_scene(state: &GameState, options: &SceneOptions) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        12 + state.enemies.len() * CIRCLE_SEGMENTS as usize * 3
            + (state.bullets.len() + state.items.len() * 2 + state.particles.len()) * 6,
    );

    let player = &state.player;
    let alpha = if options.hurt_flash && player.is_hurt() {
        HURT_ALPHA
    } else {
        1.0
    };
    vertices.extend(
        shapes::arrowhead(player.pos, player.radius, colors::PLAYER)
            .into_iter()
            .map(|v| v.faded(alpha)),
    );

    for enemy in &state.enemies {
        let (p, r) = (enemy.pos, enemy.radius);
        match enemy.kind {
            // Pointing down, toward the player
            EnemyKind::Ship => vertices.extend(shapes::triangle(
                p + Vec2::new(0.0, r),
                p + Vec2::new(-r, -r),
                p + Vec2::new(r, -r),
                colors::SHIP,
            )),
            EnemyKind::Meteor => {
                vertices.extend(shapes::circle(p, r, colors::METEOR, CIRCLE_SEGMENTS))
            }
        }
    }

    for bullet in &state.bullets {
        vertices.extend(shapes::rect(bullet.pos, BULLET_SIZE, colors::BULLET));
    }

    for item in &state.items {
        match item.kind {
            ItemKind::Heal => vertices.extend(shapes::cross(item.pos, ITEM_SIZE, colors::HEAL)),
            ItemKind::WeaponBoost => {
                vertices.extend(shapes::bolt(item.pos, ITEM_SIZE, colors::WEAPON))
            }
        }
    }

    for particle in &state.particles {
        let color = match particle.color {
            ParticleColor::Impact => colors::IMPACT,
            ParticleColor::Debris => colors::DEBRIS,
        };
        vertices.extend(shapes::rect(
            particle.pos,
            Vec2::splat(PARTICLE_SIZE),
            color,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Bullet, Particle, Viewport};
    use crate::tuning::Tuning;

    fn running() -> GameState {
        let tuning = Tuning::default();
        let viewport = Viewport::new(400.0, 600.0);
        let mut state = GameState::new(1, viewport, &tuning);
        state.start(viewport, &tuning);
        state
    }

    #[test]
    fn empty_pools_draw_only_the_player() {
        let v = build_scene(&running(), &SceneOptions::default());
        assert_eq!(v.len(), 6);
        assert!(v.iter().all(|v| v.color == colors::PLAYER));
    }

    #[test]
    fn hurt_flash_halves_player_alpha() {
        let mut state = running();
        state.player.hurt_flash = 3;

        let v = build_scene(&state, &SceneOptions::default());
        assert!(v.iter().all(|v| v.color[3] == HURT_ALPHA));

        let calm = build_scene(&state, &SceneOptions { hurt_flash: false });
        assert!(calm.iter().all(|v| v.color[3] == 1.0));
    }

    #[test]
    fn every_pool_entry_contributes() {
        let mut state = running();
        state.bullets.push(Bullet {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(0.0, -10.0),
        });
        state.particles.push(Particle {
            pos: Vec2::new(50.0, 50.0),
            vel: Vec2::ZERO,
            life: 5,
            color: ParticleColor::Impact,
        });

        let v = build_scene(&state, &SceneOptions::default());
        assert_eq!(v.len(), 6 + 6 + 6);
        assert!(v.iter().any(|v| v.color == colors::BULLET));
        assert!(v.iter().any(|v| v.color == colors::IMPACT));
    }
}
