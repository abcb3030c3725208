//! Data-driven game balance
//!
//! Every number the simulation uses lives here so a run can be rebalanced
//! (or pinned down in tests) without touching gameplay code.

use serde::{Deserialize, Serialize};

use crate::sim::state::{EnemyKind, ItemKind};

/// Highest weapon tier the fan patterns are defined for
pub const WEAPON_TIER_CAP: u8 = 5;

/// Which overlap test is used for player/enemy contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitboxMode {
    /// Distance between centers < sum of radii
    #[default]
    Circle,
    /// Axis-aligned boxes enclosing each circle
    Box,
}

/// Per-enemy-kind numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyTuning {
    pub radius: f32,
    pub hp: u8,
    /// Contact damage dealt to the player
    pub damage: i32,
    /// Score awarded on kill
    pub points: u64,
    /// Probability that a drop from this kind is a weapon boost (else heal)
    pub weapon_drop_weight: f32,
}

/// Balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_speed: f32,
    pub player_radius: f32,
    pub max_health: i32,
    /// Hurt-flash window after taking damage (frames)
    pub hurt_flash_frames: u32,
    /// Touch drags place the craft this far above the finger
    pub touch_offset_y: f32,

    // === Enemies ===
    pub ship: EnemyTuning,
    pub meteor: EnemyTuning,
    /// Probability a spawned enemy is a ship
    pub ship_chance: f32,
    pub spawn_interval_base: u32,
    pub spawn_interval_min: u32,
    pub spawn_interval_score_divisor: u64,
    pub enemy_speed_base: f32,
    pub enemy_speed_range: f32,
    pub enemy_speed_score_divisor: f32,

    // === Items ===
    pub drop_rate: f32,
    pub heal_amount: i32,
    pub item_fall_speed: f32,
    /// Added to the player radius for pickups
    pub pickup_radius: f32,

    // === Weapon ===
    pub max_weapon_tier: u8,
    pub weapon_duration_ms: f32,
    pub fire_period_ms: f32,
    pub bullet_speed: f32,
    /// Bullets spawn this far above the player center
    pub muzzle_offset: f32,

    // === Particles ===
    pub particle_count: usize,
    pub particle_life: u32,
    pub particle_speed: f32,
    pub max_particles: usize,

    // === Collision ===
    pub hitbox: HitboxMode,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 5.0,
            player_radius: 20.0,
            max_health: 100,
            hurt_flash_frames: 10,
            touch_offset_y: 50.0,

            ship: EnemyTuning {
                radius: 20.0,
                hp: 2,
                damage: 15,
                points: 10,
                weapon_drop_weight: 0.8,
            },
            meteor: EnemyTuning {
                radius: 25.0,
                hp: 5,
                damage: 10,
                points: 20,
                weapon_drop_weight: 0.3,
            },
            ship_chance: 0.6,
            spawn_interval_base: 60,
            spawn_interval_min: 20,
            spawn_interval_score_divisor: 500,
            enemy_speed_base: 2.0,
            enemy_speed_range: 2.0,
            enemy_speed_score_divisor: 5000.0,

            drop_rate: 0.3,
            heal_amount: 25,
            item_fall_speed: 2.0,
            pickup_radius: 15.0,

            max_weapon_tier: WEAPON_TIER_CAP,
            weapon_duration_ms: 5000.0,
            fire_period_ms: 200.0,
            bullet_speed: 10.0,
            muzzle_offset: 20.0,

            particle_count: 8,
            particle_life: 20,
            particle_speed: 5.0,
            max_particles: 512,

            hitbox: HitboxMode::Circle,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Clamp values that would break simulation invariants
    pub fn sanitized(mut self) -> Self {
        self.max_weapon_tier = self.max_weapon_tier.clamp(1, WEAPON_TIER_CAP);
        self.max_health = self.max_health.max(1);
        self.ship_chance = self.ship_chance.clamp(0.0, 1.0);
        self.drop_rate = self.drop_rate.clamp(0.0, 1.0);
        for enemy in [&mut self.ship, &mut self.meteor] {
            enemy.weapon_drop_weight = enemy.weapon_drop_weight.clamp(0.0, 1.0);
            enemy.hp = enemy.hp.max(1);
            enemy.radius = enemy.radius.max(1.0);
            enemy.damage = enemy.damage.max(0);
        }
        self.heal_amount = self.heal_amount.max(0);
        self.spawn_interval_min = self.spawn_interval_min.min(self.spawn_interval_base);
        self.spawn_interval_score_divisor = self.spawn_interval_score_divisor.max(1);
        if self.enemy_speed_score_divisor <= 0.0 {
            self.enemy_speed_score_divisor = Self::default().enemy_speed_score_divisor;
        }
        self.enemy_speed_range = self.enemy_speed_range.max(0.0);
        if self.fire_period_ms <= 0.0 {
            self.fire_period_ms = Self::default().fire_period_ms;
        }
        self
    }

    /// Numbers for one enemy kind
    pub fn enemy(&self, kind: EnemyKind) -> &EnemyTuning {
        match kind {
            EnemyKind::Ship => &self.ship,
            EnemyKind::Meteor => &self.meteor,
        }
    }

    /// Weight (0-1) that an item dropped by `kind` is the given item kind
    pub fn drop_weight(&self, enemy: EnemyKind, item: ItemKind) -> f32 {
        let weapon = self.enemy(enemy).weapon_drop_weight;
        match item {
            ItemKind::WeaponBoost => weapon,
            ItemKind::Heal => 1.0 - weapon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "drop_rate": 1.0, "hitbox": "box" }"#).unwrap();
        assert_eq!(tuning.drop_rate, 1.0);
        assert_eq!(tuning.hitbox, HitboxMode::Box);
        assert_eq!(tuning.max_health, 100);
        assert_eq!(tuning.ship.damage, 15);
    }

    #[test]
    fn sanitize_clamps_tier_and_probabilities() {
        let tuning = Tuning::from_json(
            r#"{ "max_weapon_tier": 9, "drop_rate": 3.0, "ship_chance": -1.0 }"#,
        )
        .unwrap();
        assert_eq!(tuning.max_weapon_tier, WEAPON_TIER_CAP);
        assert_eq!(tuning.drop_rate, 1.0);
        assert_eq!(tuning.ship_chance, 0.0);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Tuning::from_json("{ drop_rate: ").is_err());
    }

    #[test]
    fn ships_skew_toward_weapon_boosts() {
        let tuning = Tuning::default();
        assert!(
            tuning.drop_weight(EnemyKind::Ship, ItemKind::WeaponBoost)
                > tuning.drop_weight(EnemyKind::Ship, ItemKind::Heal)
        );
        assert!(
            tuning.drop_weight(EnemyKind::Meteor, ItemKind::Heal)
                > tuning.drop_weight(EnemyKind::Meteor, ItemKind::WeaponBoost)
        );
    }
}
