//! Collision detection and resolution
//!
//! Overlap primitives plus the three per-frame passes, always run in this
//! order so a frame resolves the same way every time:
//! 1. enemy vs player (contact damage)
//! 2. enemy vs bullet (hit-points, kills, drops)
//! 3. item vs player (pickups)
//!
//! Pools are rebuilt by filtering rather than removed from while iterating,
//! so a removal never skips or double-processes a neighbor.

use glam::Vec2;
use rand::Rng;

use super::spawn::{maybe_drop_item, spawn_particles};
use super::state::{
    Bullet, Enemy, GameEvent, GameState, Item, ItemKind, ParticleColor, Player, Viewport,
};
use super::weapon;
use crate::tuning::{HitboxMode, Tuning};

/// Distance between centers is less than the sum of radii
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Axis-aligned boxes given as center + half extents
#[inline]
pub fn boxes_overlap(a: Vec2, a_half: Vec2, b: Vec2, b_half: Vec2) -> bool {
    let gap = (a - b).abs();
    let reach = a_half + b_half;
    gap.x < reach.x && gap.y < reach.y
}

/// Circle against an axis-aligned box (center + half extents)
#[inline]
pub fn circle_box_overlap(center: Vec2, radius: f32, box_center: Vec2, half: Vec2) -> bool {
    let closest = center.clamp(box_center - half, box_center + half);
    center.distance_squared(closest) < radius * radius
}

/// Player/enemy contact using the configured hitbox variant
pub fn touches_player(player: &Player, enemy: &Enemy, mode: HitboxMode) -> bool {
    match mode {
        HitboxMode::Circle => circles_overlap(player.pos, player.radius, enemy.pos, enemy.radius),
        HitboxMode::Box => boxes_overlap(
            player.pos,
            Vec2::splat(player.radius),
            enemy.pos,
            Vec2::splat(enemy.radius),
        ),
    }
}

pub fn bullet_hits(bullet: &Bullet, enemy: &Enemy) -> bool {
    circle_box_overlap(enemy.pos, enemy.radius, bullet.pos, bullet.half_extents())
}

pub fn bullet_offscreen(bullet: &Bullet) -> bool {
    bullet.pos.y < 0.0
}

pub fn enemy_offscreen(enemy: &Enemy, viewport: Viewport) -> bool {
    enemy.pos.y > viewport.height
}

pub fn item_offscreen(item: &Item, viewport: Viewport) -> bool {
    item.pos.y > viewport.height
}

/// Drop bullets above the top edge and enemies/items below the bottom.
/// No penalty is applied. Returns how many entities were removed.
pub fn cull_offscreen(state: &mut GameState, viewport: Viewport) -> usize {
    let before = state.bullets.len() + state.enemies.len() + state.items.len();
    state.bullets.retain(|b| !bullet_offscreen(b));
    state.enemies.retain(|e| !enemy_offscreen(e, viewport));
    state.items.retain(|i| !item_offscreen(i, viewport));
    before - (state.bullets.len() + state.enemies.len() + state.items.len())
}

/// Pass 1: enemies touching the player deal contact damage and are removed.
/// Returns the number of contacts.
pub fn resolve_enemy_contacts<R: Rng + ?Sized>(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut R,
) -> usize {
    let player = &state.player;
    let mut contacts = Vec::new();
    state.enemies.retain(|enemy| {
        if touches_player(player, enemy, tuning.hitbox) {
            contacts.push((enemy.kind, enemy.pos));
            false
        } else {
            true
        }
    });

    for &(kind, pos) in &contacts {
        let damage = tuning.enemy(kind).damage;
        state.player.damage(damage, tuning.hurt_flash_frames);
        state.events.push(GameEvent::PlayerHit { kind, damage });
        spawn_particles(
            &mut state.particles,
            pos,
            ParticleColor::Impact,
            tuning.particle_count,
            tuning,
            rng,
        );
        log::debug!("player hit by {:?}, health {}", kind, state.player.health);
    }
    contacts.len()
}

/// Pass 2: every live enemy against every live bullet. Each overlapping
/// bullet is spent and costs the enemy one hit-point; a dead enemy stops
/// absorbing bullets, scores once, bursts into particles and may drop an
/// item. Returns the number of kills.
pub fn resolve_bullet_hits<R: Rng + ?Sized>(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut R,
) -> usize {
    let mut spent = vec![false; state.bullets.len()];
    let mut survivors = Vec::with_capacity(state.enemies.len());
    let mut kills = Vec::new();

    for mut enemy in std::mem::take(&mut state.enemies) {
        for (bullet, used) in state.bullets.iter().zip(spent.iter_mut()) {
            if *used || !bullet_hits(bullet, &enemy) {
                continue;
            }
            *used = true;
            enemy.hp = enemy.hp.saturating_sub(1);
            if enemy.hp == 0 {
                break;
            }
        }
        if enemy.hp == 0 {
            kills.push(enemy);
        } else {
            survivors.push(enemy);
        }
    }
    state.enemies = survivors;

    let mut spent = spent.into_iter();
    state.bullets.retain(|_| !spent.next().unwrap_or(false));

    for enemy in &kills {
        state.score += enemy.points;
        state.events.push(GameEvent::EnemyDestroyed {
            kind: enemy.kind,
            points: enemy.points,
            pos: enemy.pos,
        });
        spawn_particles(
            &mut state.particles,
            enemy.pos,
            ParticleColor::Debris,
            tuning.particle_count,
            tuning,
            rng,
        );
        if let Some(kind) = maybe_drop_item(&mut state.items, enemy.pos, enemy.kind, tuning, rng) {
            state.events.push(GameEvent::ItemDropped { kind });
        }
    }
    kills.len()
}

/// Pass 3: items within pickup reach of the player apply their effect and
/// are removed. Returns the number collected.
pub fn resolve_pickups(state: &mut GameState, tuning: &Tuning) -> usize {
    let player = &state.player;
    let mut collected = Vec::new();
    state.items.retain(|item| {
        if circles_overlap(player.pos, player.radius, item.pos, tuning.pickup_radius) {
            collected.push(item.kind);
            false
        } else {
            true
        }
    });

    for &kind in &collected {
        match kind {
            ItemKind::Heal => state.player.heal(tuning.heal_amount),
            ItemKind::WeaponBoost => weapon::boost(&mut state.player, tuning),
        }
        state.events.push(GameEvent::ItemCollected { kind });
    }
    collected.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EnemyKind, GamePhase};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VIEW: Viewport = Viewport::new(800.0, 600.0);

    fn state(tuning: &Tuning) -> GameState {
        let mut state = GameState::new(1, VIEW, tuning);
        state.start(VIEW, tuning);
        state
    }

    fn enemy(kind: EnemyKind, pos: Vec2, tuning: &Tuning) -> Enemy {
        let stats = tuning.enemy(kind);
        Enemy {
            pos,
            radius: stats.radius,
            kind,
            hp: stats.hp,
            speed: 2.0,
            points: stats.points,
        }
    }

    fn bullet(pos: Vec2) -> Bullet {
        Bullet {
            pos,
            vel: Vec2::new(0.0, -10.0),
        }
    }

    #[test]
    fn primitives() {
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(19.0, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(20.0, 0.0), 10.0));

        assert!(boxes_overlap(Vec2::ZERO, Vec2::ONE, Vec2::new(1.5, 1.5), Vec2::ONE));
        assert!(!boxes_overlap(Vec2::ZERO, Vec2::ONE, Vec2::new(2.0, 0.0), Vec2::ONE));

        // Corner case: box corner just outside the circle
        assert!(!circle_box_overlap(Vec2::ZERO, 1.0, Vec2::new(1.5, 1.5), Vec2::splat(0.5)));
        assert!(circle_box_overlap(Vec2::ZERO, 1.0, Vec2::new(0.0, 1.4), Vec2::splat(0.5)));
    }

    #[test]
    fn box_hitbox_catches_corner_contact() {
        let tuning = Tuning::default();
        let player = Player::new(Vec2::new(100.0, 100.0), &tuning);
        let e = enemy(EnemyKind::Ship, Vec2::new(135.0, 135.0), &tuning);
        assert!(!touches_player(&player, &e, HitboxMode::Circle));
        assert!(touches_player(&player, &e, HitboxMode::Box));
    }

    #[test]
    fn ship_contact_damages_and_bursts() {
        let tuning = Tuning::default();
        let mut state = state(&tuning);
        let contact = state.player.pos + Vec2::new(0.0, -30.0);
        state.enemies.push(enemy(EnemyKind::Ship, contact, &tuning));
        let mut rng = Pcg32::seed_from_u64(3);

        assert_eq!(resolve_enemy_contacts(&mut state, &tuning, &mut rng), 1);

        assert_eq!(state.player.health, 100 - tuning.ship.damage);
        assert!(state.enemies.is_empty());
        assert_eq!(state.particles.len(), tuning.particle_count);
        assert!(state.particles.iter().all(|p| p.pos == contact && p.color == ParticleColor::Impact));
        assert_eq!(state.player.hurt_flash, tuning.hurt_flash_frames);
        assert_eq!(
            state.events,
            vec![GameEvent::PlayerHit {
                kind: EnemyKind::Ship,
                damage: tuning.ship.damage
            }]
        );
    }

    #[test]
    fn lethal_contacts_clamp_health_at_zero() {
        let tuning = Tuning::default();
        let mut state = state(&tuning);
        state.player.health = 12;
        let pos = state.player.pos;
        state.enemies.push(enemy(EnemyKind::Ship, pos, &tuning));
        state.enemies.push(enemy(EnemyKind::Meteor, pos, &tuning));
        let mut rng = Pcg32::seed_from_u64(3);

        assert_eq!(resolve_enemy_contacts(&mut state, &tuning, &mut rng), 2);
        assert_eq!(state.player.health, 0);
        // The resolver never changes phase on its own
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn two_bullets_kill_a_two_hp_ship_once() {
        let tuning = Tuning {
            drop_rate: 1.0,
            ..Tuning::default()
        };
        let mut state = state(&tuning);
        let at = Vec2::new(300.0, 200.0);
        state.enemies.push(enemy(EnemyKind::Ship, at, &tuning));
        state.bullets.push(bullet(at));
        state.bullets.push(bullet(at + Vec2::new(3.0, 5.0)));
        state.bullets.push(bullet(Vec2::new(700.0, 50.0)));
        let mut rng = Pcg32::seed_from_u64(9);

        assert_eq!(resolve_bullet_hits(&mut state, &tuning, &mut rng), 1);

        assert!(state.enemies.is_empty());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos, Vec2::new(700.0, 50.0));
        assert_eq!(state.score, tuning.ship.points);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].pos, at);
        assert_eq!(state.particles.len(), tuning.particle_count);
        let kills = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
            .count();
        assert_eq!(kills, 1);
    }

    #[test]
    fn dead_enemy_stops_absorbing_bullets() {
        let tuning = Tuning {
            drop_rate: 0.0,
            ..Tuning::default()
        };
        let mut state = state(&tuning);
        let at = Vec2::new(300.0, 200.0);
        let mut fragile = enemy(EnemyKind::Ship, at, &tuning);
        fragile.hp = 1;
        state.enemies.push(fragile);
        state.enemies.push(enemy(EnemyKind::Meteor, at, &tuning));
        state.bullets.push(bullet(at));
        state.bullets.push(bullet(at));
        let mut rng = Pcg32::seed_from_u64(9);

        assert_eq!(resolve_bullet_hits(&mut state, &tuning, &mut rng), 1);

        // Second bullet carried on into the meteor behind
        assert!(state.bullets.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].hp, tuning.meteor.hp - 1);
        assert_eq!(state.score, tuning.ship.points);
        assert!(state.items.is_empty());
    }

    #[test]
    fn wounded_enemy_survives() {
        let tuning = Tuning::default();
        let mut state = state(&tuning);
        let at = Vec2::new(100.0, 100.0);
        state.enemies.push(enemy(EnemyKind::Meteor, at, &tuning));
        state.bullets.push(bullet(at));
        let mut rng = Pcg32::seed_from_u64(9);

        assert_eq!(resolve_bullet_hits(&mut state, &tuning, &mut rng), 0);
        assert_eq!(state.enemies[0].hp, tuning.meteor.hp - 1);
        assert_eq!(state.score, 0);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn pickups_apply_effects() {
        let tuning = Tuning::default();
        let mut state = state(&tuning);
        state.player.health = 90;
        let pos = state.player.pos;
        state.items.push(Item { pos, kind: ItemKind::Heal });
        state.items.push(Item {
            pos: pos + Vec2::new(20.0, 0.0),
            kind: ItemKind::WeaponBoost,
        });
        state.items.push(Item {
            pos: pos + Vec2::new(0.0, -200.0),
            kind: ItemKind::Heal,
        });

        assert_eq!(resolve_pickups(&mut state, &tuning), 2);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.weapon_tier, 2);
        assert_eq!(state.player.weapon_timer_ms, tuning.weapon_duration_ms);
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn cull_is_idempotent() {
        let tuning = Tuning::default();
        let mut state = state(&tuning);
        state.bullets.push(bullet(Vec2::new(10.0, -1.0)));
        state.bullets.push(bullet(Vec2::new(10.0, 5.0)));
        state.enemies.push(enemy(EnemyKind::Meteor, Vec2::new(50.0, 601.0), &tuning));
        state.enemies.push(enemy(EnemyKind::Meteor, Vec2::new(50.0, 599.0), &tuning));
        state.items.push(Item {
            pos: Vec2::new(5.0, 700.0),
            kind: ItemKind::Heal,
        });

        assert_eq!(cull_offscreen(&mut state, VIEW), 3);
        assert_eq!(cull_offscreen(&mut state, VIEW), 0);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.items.is_empty());
    }
}
