//! Weapon tiers and auto-fire
//!
//! Tier is a small state machine: 1 is the rest state, each boost pickup
//! climbs one tier (capped) and restarts the boost timer, and the timer
//! drops the weapon straight back to tier 1 when it runs out.

use glam::Vec2;

use super::state::{Bullet, Player};
use crate::tuning::{Tuning, WEAPON_TIER_CAP};

/// Horizontal direction components per tier (vertical is always -1)
const FAN_PATTERNS: [&[f32]; WEAPON_TIER_CAP as usize] = [
    &[0.0],
    &[-0.2, 0.2],
    &[-0.3, 0.0, 0.3],
    &[-0.4, -0.15, 0.15, 0.4],
    &[-0.5, -0.25, 0.0, 0.25, 0.5],
];

/// Direction offsets for a tier. Out-of-range tiers fall back to the
/// nearest defined pattern.
pub fn fan(tier: u8) -> &'static [f32] {
    let index = tier.clamp(1, WEAPON_TIER_CAP) as usize - 1;
    FAN_PATTERNS[index]
}

/// Weapon-boost pickup: climb one tier and restart the timer
pub fn boost(player: &mut Player, tuning: &Tuning) {
    let cap = tuning.max_weapon_tier.clamp(1, WEAPON_TIER_CAP);
    player.weapon_tier = (player.weapon_tier.saturating_add(1)).clamp(1, cap);
    player.weapon_timer_ms = tuning.weapon_duration_ms;
}

/// Burn boost time. Returns true on the frame the boost expires.
/// The timer is ignored at tier 1.
pub fn decay(player: &mut Player, dt_ms: f32) -> bool {
    if player.weapon_tier <= 1 {
        player.weapon_tier = 1;
        return false;
    }
    player.weapon_timer_ms -= dt_ms;
    if player.weapon_timer_ms <= 0.0 {
        player.weapon_tier = 1;
        player.weapon_timer_ms = 0.0;
        return true;
    }
    false
}

/// Advance the auto-fire accumulator. Returns true when a cadence boundary
/// was crossed this frame; at most one volley per frame, remainder kept.
pub fn fire_due(fire_timer_ms: &mut f32, dt_ms: f32, period_ms: f32) -> bool {
    *fire_timer_ms += dt_ms.max(0.0);
    if *fire_timer_ms < period_ms {
        return false;
    }
    *fire_timer_ms = (*fire_timer_ms - period_ms) % period_ms;
    true
}

/// Append one full volley for the player's tier. Returns the bullet count.
pub fn fire(player: &Player, bullets: &mut Vec<Bullet>, tuning: &Tuning) -> usize {
    let muzzle = player.pos - Vec2::new(0.0, tuning.muzzle_offset);
    let pattern = fan(player.weapon_tier);
    bullets.extend(pattern.iter().map(|&dx| Bullet {
        pos: muzzle,
        vel: Vec2::new(dx, -1.0) * tuning.bullet_speed,
    }));
    pattern.len()
}
