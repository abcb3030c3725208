//! HUD text and bar values
//!
//! Derived from the game state each frame; the DOM side only copies these
//! strings and numbers into elements.

use crate::sim::{GamePhase, GameState};

/// What the HUD shows for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    /// Health bar fill, 0-100
    pub health_percent: f32,
    pub score: u64,
    pub weapon_tier: u8,
    /// Whole seconds of boost left (rounded up), only while boosted
    pub boost_seconds: Option<u32>,
    pub phase: GamePhase,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let player = &state.player;
        let boost_seconds = (player.weapon_tier > 1)
            .then(|| (player.weapon_timer_ms.max(0.0) / 1000.0).ceil() as u32);
        Self {
            health_percent: player.health_fraction() * 100.0,
            score: state.score,
            weapon_tier: player.weapon_tier,
            boost_seconds,
            phase: state.phase,
        }
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// `Lv.N`, plus remaining boost seconds while above tier 1
    pub fn weapon_text(&self) -> String {
        match self.boost_seconds {
            Some(secs) => format!("Weapon: Lv.{} ({}s)", self.weapon_tier, secs),
            None => format!("Weapon: Lv.{}", self.weapon_tier),
        }
    }

    /// Width style for the health bar element
    pub fn health_width(&self) -> String {
        format!("{:.1}%", self.health_percent.clamp(0.0, 100.0))
    }
}

/// Text for the end-of-run overlay
pub fn final_score_text(score: u64) -> String {
    format!("Final score: {}", score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Viewport;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        let tuning = Tuning::default();
        let viewport = Viewport::new(400.0, 400.0);
        let mut state = GameState::new(0, viewport, &tuning);
        state.start(viewport, &tuning);
        state
    }

    #[test]
    fn base_weapon_has_no_timer() {
        let hud = HudSnapshot::from_state(&state());
        assert_eq!(hud.weapon_text(), "Weapon: Lv.1");
        assert_eq!(hud.health_width(), "100.0%");
        assert_eq!(hud.score_text(), "Score: 0");
    }

    #[test]
    fn boosted_weapon_rounds_seconds_up() {
        let mut state = state();
        state.player.weapon_tier = 3;
        state.player.weapon_timer_ms = 4001.0;
        state.player.health = 45;
        state.score = 120;
        let hud = HudSnapshot::from_state(&state);
        assert_eq!(hud.weapon_text(), "Weapon: Lv.3 (5s)");
        assert_eq!(hud.health_width(), "45.0%");
        assert_eq!(hud.score_text(), "Score: 120");
        assert_eq!(final_score_text(hud.score), "Final score: 120");
    }
}
