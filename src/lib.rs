//! Star Raid - a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, weapons, collisions)
//! - `session`: Frame driver wiring the simulation to audio, HUD and renderer
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Input mapping and output adapter traits
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use session::{Outputs, Session};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use crate::sim::Viewport;

    /// Frame delta assumed for the first frame of a run (60 Hz)
    pub const DEFAULT_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Longest frame delta the simulation will accept
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Play area used when no canvas size is available (headless runs)
    pub const DEFAULT_VIEWPORT: Viewport = Viewport::new(480.0, 800.0);
}
