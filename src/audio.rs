//! Audio cues
//!
//! Procedurally generated sound effects - no external files needed!
//! Cues are fire-and-forget; the only long-lived sound is the heartbeat
//! loop, which must be stopped whenever the game leaves the running phase.

use crate::sim::GameEvent;

/// Interval between heartbeat pulses
pub const HEARTBEAT_PERIOD_MS: i32 = 1000;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Volley fired
    Shoot,
    /// Player struck or enemy destroyed
    Hit,
    /// Item picked up
    Collect,
}

impl SoundEffect {
    /// Cue triggered by a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shot { .. } => Some(SoundEffect::Shoot),
            GameEvent::PlayerHit { .. } | GameEvent::EnemyDestroyed { .. } => {
                Some(SoundEffect::Hit)
            }
            GameEvent::ItemCollected { .. } => Some(SoundEffect::Collect),
            _ => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{HEARTBEAT_PERIOD_MS, SoundEffect};
    use crate::platform::AudioOut;
    use crate::settings::Settings;

    /// A running `setInterval` timer; cleared when dropped
    struct Heartbeat {
        handle: i32,
        _tick: Closure<dyn FnMut()>,
    }

    impl Drop for Heartbeat {
        fn drop(&mut self) {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(self.handle);
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
        heartbeat: Option<Heartbeat>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                muted: false,
                heartbeat: None,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.master_volume = settings.master_volume.clamp(0.0, 1.0);
            self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
            self.muted = settings.muted;
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        fn ready_context(&self) -> Option<&AudioContext> {
            let ctx = self.ctx.as_ref()?;
            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            Some(ctx)
        }
    }

    impl AudioOut for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = self.ready_context() else { return };

            match effect {
                SoundEffect::Shoot => play_tone(ctx, 800.0, OscillatorType::Triangle, 0.1, vol * 0.05),
                SoundEffect::Hit => play_tone(ctx, 100.0, OscillatorType::Sawtooth, 0.2, vol * 0.1),
                SoundEffect::Collect => play_collect(ctx, vol),
            }
        }

        fn start_bgm(&mut self) {
            // Never stack two loops
            self.stop_bgm();

            let Some(ctx) = self.ctx.clone() else { return };
            let Some(window) = web_sys::window() else { return };
            let vol = self.effective_volume() * 0.02;

            let tick = Closure::<dyn FnMut()>::new(move || {
                if vol > 0.0 {
                    play_tone(&ctx, 50.0, OscillatorType::Sine, 0.5, vol);
                }
            });
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                HEARTBEAT_PERIOD_MS,
            ) {
                Ok(handle) => {
                    self.heartbeat = Some(Heartbeat {
                        handle,
                        _tick: tick,
                    });
                    log::debug!("Heartbeat started");
                }
                Err(e) => log::warn!("Failed to start heartbeat: {:?}", e),
            }
        }

        fn stop_bgm(&mut self) {
            if self.heartbeat.take().is_some() {
                log::debug!("Heartbeat stopped");
            }
        }

        fn bgm_active(&self) -> bool {
            self.heartbeat.is_some()
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Single tone with an exponential fade
    fn play_tone(ctx: &AudioContext, freq: f32, osc_type: OscillatorType, duration: f64, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + duration).ok();
    }

    /// Pickup - quick rising chirp
    fn play_collect(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 400.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .linear_ramp_to_value_at_time(1200.0, t + 0.1)
            .ok();
        gain.gain().set_value_at_time(vol * 0.1, t).ok();
        gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.1).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EnemyKind, ItemKind};
    use glam::Vec2;

    #[test]
    fn events_map_to_cues() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Shot { bullets: 3 }),
            Some(SoundEffect::Shoot)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PlayerHit {
                kind: EnemyKind::Meteor,
                damage: 10
            }),
            Some(SoundEffect::Hit)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::EnemyDestroyed {
                kind: EnemyKind::Ship,
                points: 10,
                pos: Vec2::ZERO
            }),
            Some(SoundEffect::Hit)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::ItemCollected {
                kind: ItemKind::Heal
            }),
            Some(SoundEffect::Collect)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::WeaponExpired), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::ItemDropped {
                kind: ItemKind::Heal
            }),
            None
        );
    }
}
