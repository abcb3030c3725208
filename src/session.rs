//! Frame driver
//!
//! Owns the game state and the seeded RNG, turns display-refresh timestamps
//! into frame deltas, runs one simulation step per frame and fans the
//! results out to the audio/HUD/render adapters. It also owns the heartbeat
//! lifecycle: the loop runs only while the phase is `Running`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::SoundEffect;
use crate::consts::{DEFAULT_FRAME_MS, MAX_FRAME_MS};
use crate::platform::{AudioOut, HudOut, RenderOut};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, Viewport, tick};
use crate::tuning::Tuning;
use crate::ui::HudSnapshot;

/// Adapters a frame writes to
pub struct Outputs<'a, A, H, R> {
    pub audio: &'a mut A,
    pub hud: &'a mut H,
    pub render: &'a mut R,
}

pub struct Session {
    pub state: GameState,
    pub tuning: Tuning,
    rng: Pcg32,
    last_time: Option<f64>,
}

impl Session {
    /// An idle session; call `start` to begin the first run
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(seed, viewport, &tuning),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            last_time: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Begin or restart a run from any phase
    pub fn start<A: AudioOut, H: HudOut>(&mut self, viewport: Viewport, audio: &mut A, hud: &mut H) {
        self.state.start(viewport, &self.tuning);
        self.last_time = None;
        hud.hide_overlays();
        hud.update(&HudSnapshot::from_state(&self.state));
        audio.start_bgm();
        log::info!("Run started (seed {})", self.state.seed);
    }

    /// Delta since the previous frame, clamped so a stalled tab cannot
    /// burn a whole weapon boost in one step
    fn frame_delta(&mut self, time_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => (time_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => DEFAULT_FRAME_MS,
        };
        self.last_time = Some(time_ms);
        dt as f32
    }

    /// One display refresh: simulate (when running), then present
    pub fn frame<A: AudioOut, H: HudOut, R: RenderOut>(
        &mut self,
        time_ms: f64,
        viewport: Viewport,
        input: &TickInput,
        out: &mut Outputs<'_, A, H, R>,
    ) {
        let dt_ms = self.frame_delta(time_ms);
        let before = self.state.phase;

        tick(&mut self.state, input, dt_ms, viewport, &self.tuning, &mut self.rng);

        for event in &self.state.events {
            if let Some(cue) = SoundEffect::for_event(event) {
                out.audio.play(cue);
            }
            if let GameEvent::EnemyDestroyed { kind, points, .. } = event {
                log::debug!("{:?} destroyed (+{})", kind, points);
            }
        }

        let after = self.state.phase;
        if before != after {
            self.on_phase_change(after, out.audio, out.hud);
        }
        if after != GamePhase::Running && out.audio.bgm_active() {
            out.audio.stop_bgm();
        }

        out.hud.update(&HudSnapshot::from_state(&self.state));
        out.render.draw(&self.state);
    }

    fn on_phase_change<A: AudioOut, H: HudOut>(&mut self, phase: GamePhase, audio: &mut A, hud: &mut H) {
        match phase {
            GamePhase::GameOver => {
                audio.stop_bgm();
                hud.show_game_over(self.state.score);
            }
            GamePhase::Paused => {
                audio.stop_bgm();
                hud.show_pause(true);
                log::info!("Paused");
            }
            GamePhase::Running => {
                audio.start_bgm();
                hud.show_pause(false);
                log::info!("Resumed");
            }
            GamePhase::Idle => {}
        }
    }
}
