//! Game state and core simulation types
//!
//! Plain data only. Behavior lives in the sibling modules (motion, spawn,
//! weapon, collision, tick), which dispatch on the `kind` fields here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Size of the drawable surface in pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp a circle's center so the whole circle stays on screen.
    /// A viewport smaller than the circle pins it to the middle.
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            clamp_axis(pos.x, radius, self.width),
            clamp_axis(pos.y, radius, self.height),
        )
    }

    /// Where the player appears at the start of a run
    pub fn player_spawn(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - 100.0)
    }
}

fn clamp_axis(v: f32, radius: f32, extent: f32) -> f32 {
    let hi = extent - radius;
    if hi < radius {
        extent / 2.0
    } else {
        v.clamp(radius, hi)
    }
}

/// Current phase of the simulation clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first run; start screen visible
    Idle,
    /// Active gameplay
    Running,
    /// Suspended by the player; pools frozen
    Paused,
    /// Player health reached zero; frozen until restart
    GameOver,
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub health: i32,
    pub max_health: i32,
    /// 1..=max tier, controls the bullet fan
    pub weapon_tier: u8,
    /// Remaining boost time (ms); only meaningful above tier 1
    pub weapon_timer_ms: f32,
    /// Remaining hurt-flash frames
    pub hurt_flash: u32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            radius: tuning.player_radius,
            health: tuning.max_health,
            max_health: tuning.max_health,
            weapon_tier: 1,
            weapon_timer_ms: 0.0,
            hurt_flash: 0,
        }
    }

    /// Apply contact damage; health never drops below zero
    pub fn damage(&mut self, amount: i32, flash_frames: u32) {
        self.health = (self.health - amount.max(0)).clamp(0, self.max_health);
        self.hurt_flash = flash_frames;
    }

    /// Restore health up to the maximum
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount.max(0)).clamp(0, self.max_health);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn is_hurt(&self) -> bool {
        self.hurt_flash > 0
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            0.0
        } else {
            (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
        }
    }
}

/// Bullet box size (width, height)
pub const BULLET_SIZE: Vec2 = Vec2::new(4.0, 10.0);

/// A player projectile. `vel` is a per-tick displacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Bullet {
    pub fn half_extents(&self) -> Vec2 {
        BULLET_SIZE / 2.0
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fast, fragile, hits harder
    Ship,
    /// Slow, tough, worth more
    Meteor,
}

/// A descending enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: EnemyKind,
    pub hp: u8,
    /// Pixels per tick (downward)
    pub speed: f32,
    pub points: u64,
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Heal,
    WeaponBoost,
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    pub kind: ItemKind,
}

/// Particle color tags (resolved to RGBA by the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    /// Player contact (orange)
    Impact,
    /// Enemy destroyed by bullets (white)
    Debris,
}

/// A cosmetic particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames left
    pub life: u32,
    pub color: ParticleColor,
}

/// Things that happened during a tick, drained by the frontend
/// (audio cues, HUD refresh, logging). Never read back by the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A full bullet pattern was fired
    Shot { bullets: usize },
    /// An enemy touched the player
    PlayerHit { kind: EnemyKind, damage: i32 },
    /// Bullets destroyed an enemy
    EnemyDestroyed { kind: EnemyKind, points: u64, pos: Vec2 },
    /// An enemy death dropped an item
    ItemDropped { kind: ItemKind },
    /// The player picked up an item
    ItemCollected { kind: ItemKind },
    /// Weapon boost ran out
    WeaponExpired,
    Paused,
    Resumed,
    GameOver { score: u64 },
}

/// Complete simulation state (deterministic given the same RNG stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// Simulation steps taken this run
    pub frame: u64,
    /// Wall-clock time simulated this run (ms)
    pub elapsed_ms: f64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub particles: Vec<Particle>,
    /// Frames since the last enemy spawn
    pub spawn_counter: u32,
    /// Time accumulated toward the next auto-fire (ms)
    pub fire_timer_ms: f32,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle state; nothing moves until `start`
    pub fn new(seed: u64, viewport: Viewport, tuning: &Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            frame: 0,
            elapsed_ms: 0.0,
            player: Player::new(viewport.player_spawn(), tuning),
            bullets: Vec::new(),
            enemies: Vec::new(),
            items: Vec::new(),
            particles: Vec::new(),
            spawn_counter: 0,
            fire_timer_ms: 0.0,
            events: Vec::new(),
        }
    }

    /// Begin (or restart) a run: reset score, player and every pool
    pub fn start(&mut self, viewport: Viewport, tuning: &Tuning) {
        let player = Player::new(viewport.player_spawn(), tuning);
        self.player = Player {
            pos: viewport.clamp_circle(player.pos, player.radius),
            ..player
        };
        self.score = 0;
        self.frame = 0;
        self.elapsed_ms = 0.0;
        self.bullets.clear();
        self.enemies.clear();
        self.items.clear();
        self.particles.clear();
        self.spawn_counter = 0;
        self.fire_timer_ms = 0.0;
        self.events.clear();
        self.phase = GamePhase::Running;
    }

    /// True when no pool has any entity
    pub fn pools_empty(&self) -> bool {
        self.bullets.is_empty()
            && self.enemies.is_empty()
            && self.items.is_empty()
            && self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_idle_with_full_health() {
        let tuning = Tuning::default();
        let state = GameState::new(7, Viewport::new(800.0, 600.0), &tuning);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player.health, tuning.max_health);
        assert_eq!(state.player.weapon_tier, 1);
        assert!(state.pools_empty());
    }

    #[test]
    fn start_resets_everything() {
        let tuning = Tuning::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut state = GameState::new(7, viewport, &tuning);
        state.score = 900;
        state.player.health = 3;
        state.player.weapon_tier = 4;
        state.bullets.push(Bullet { pos: Vec2::ZERO, vel: Vec2::NEG_Y });
        state.phase = GamePhase::GameOver;

        state.start(viewport, &tuning);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.health, tuning.max_health);
        assert_eq!(state.player.weapon_tier, 1);
        assert!(state.pools_empty());
        assert_eq!(state.player.pos, Vec2::new(400.0, 500.0));
    }

    #[test]
    fn damage_and_heal_stay_in_bounds() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::ZERO, &tuning);
        player.damage(250, 10);
        assert_eq!(player.health, 0);
        assert!(player.is_dead());
        assert!(player.is_hurt());

        player.heal(1000);
        assert_eq!(player.health, tuning.max_health);

        player.damage(-40, 0);
        assert_eq!(player.health, tuning.max_health);
    }

    #[test]
    fn clamp_circle_handles_tiny_viewport() {
        let viewport = Viewport::new(30.0, 500.0);
        let pos = viewport.clamp_circle(Vec2::new(-100.0, 900.0), 20.0);
        assert_eq!(pos, Vec2::new(15.0, 480.0));
    }
}
