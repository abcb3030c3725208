//! Platform abstraction layer
//!
//! The simulation never talks to the browser directly. Each frame the
//! session reads input from `InputState` and pushes results out through
//! these adapters, which the wasm entry point implements with Web Audio,
//! DOM elements and wgpu. Tests implement them with recorders.

pub mod input;

pub use input::{GameKey, InputState};

use crate::audio::SoundEffect;
use crate::sim::GameState;
use crate::ui::HudSnapshot;

/// Fire-and-forget cues plus the cancellable background loop
pub trait AudioOut {
    fn play(&mut self, effect: SoundEffect);
    /// Start the heartbeat loop (restarts it if already running)
    fn start_bgm(&mut self);
    /// Cancel the heartbeat loop; a no-op when not running
    fn stop_bgm(&mut self);
    fn bgm_active(&self) -> bool;
}

/// On-screen text, bars and overlays
pub trait HudOut {
    fn update(&mut self, hud: &HudSnapshot);
    fn show_game_over(&mut self, score: u64);
    fn show_pause(&mut self, paused: bool);
    /// Hide start/pause/game-over screens
    fn hide_overlays(&mut self);
}

/// Draws the pools; never feeds back into the simulation
pub trait RenderOut {
    fn draw(&mut self, state: &GameState);
}
