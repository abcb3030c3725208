//! Spawner: enemies on a score-scaled timer, item drops, particle bursts
//!
//! Pure pool mutation driven by counters, score and an injected RNG.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, GameState, Item, ItemKind, Particle, ParticleColor, Viewport};
use crate::tuning::Tuning;

/// Frames between enemy spawns at a given score.
/// Non-increasing in score and never below the configured minimum.
pub fn spawn_interval(score: u64, tuning: &Tuning) -> u32 {
    let reduction = score / tuning.spawn_interval_score_divisor.max(1);
    let interval = u64::from(tuning.spawn_interval_base).saturating_sub(reduction);
    interval.max(u64::from(tuning.spawn_interval_min)) as u32
}

/// Count one frame; once the counter passes the interval, reset it and add
/// an enemy along the top edge. Returns true when an enemy was added.
pub fn maybe_spawn_enemy<R: Rng + ?Sized>(
    state: &mut GameState,
    viewport: Viewport,
    tuning: &Tuning,
    rng: &mut R,
) -> bool {
    state.spawn_counter += 1;
    if state.spawn_counter <= spawn_interval(state.score, tuning) {
        return false;
    }
    state.spawn_counter = 0;

    let enemy = roll_enemy(state.score, viewport, tuning, rng);
    log::debug!(
        "spawned {:?} at x={:.0} speed={:.2}",
        enemy.kind,
        enemy.pos.x,
        enemy.speed
    );
    state.enemies.push(enemy);
    true
}

/// Build a random enemy just above the top edge
pub fn roll_enemy<R: Rng + ?Sized>(
    score: u64,
    viewport: Viewport,
    tuning: &Tuning,
    rng: &mut R,
) -> Enemy {
    let kind = if rng.random::<f32>() < tuning.ship_chance {
        EnemyKind::Ship
    } else {
        EnemyKind::Meteor
    };
    let stats = tuning.enemy(kind);
    let r = stats.radius;

    let span = viewport.width - 2.0 * r;
    let roll = rng.random::<f32>();
    let x = if span > 0.0 { r + roll * span } else { viewport.width / 2.0 };

    let speed = tuning.enemy_speed_base
        + rng.random::<f32>() * tuning.enemy_speed_range
        + score as f32 / tuning.enemy_speed_score_divisor;

    Enemy {
        pos: Vec2::new(x, -r),
        radius: r,
        kind,
        hp: stats.hp,
        speed,
        points: stats.points,
    }
}

/// With probability `drop_rate`, append an item whose kind is weighted by
/// the enemy that died.
pub fn maybe_drop_item<R: Rng + ?Sized>(
    items: &mut Vec<Item>,
    pos: Vec2,
    enemy: EnemyKind,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<ItemKind> {
    if rng.random::<f32>() >= tuning.drop_rate {
        return None;
    }
    let kind = if rng.random::<f32>() < tuning.drop_weight(enemy, ItemKind::WeaponBoost) {
        ItemKind::WeaponBoost
    } else {
        ItemKind::Heal
    };
    items.push(Item { pos, kind });
    Some(kind)
}

/// Append `count` particles flying out of `pos`. The pool is capped at
/// `max_particles`; the oldest particles go first.
pub fn spawn_particles<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    pos: Vec2,
    color: ParticleColor,
    count: usize,
    tuning: &Tuning,
    rng: &mut R,
) {
    let speed = tuning.particle_speed;
    for _ in 0..count {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * speed,
            (rng.random::<f32>() - 0.5) * speed,
        );
        particles.push(Particle {
            pos,
            vel,
            life: tuning.particle_life,
            color,
        });
    }
    if particles.len() > tuning.max_particles {
        let excess = particles.len() - tuning.max_particles;
        particles.drain(..excess);
    }
}
