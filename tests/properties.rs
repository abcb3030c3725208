//! Invariants that must hold for any seed and any input sequence

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use star_raid::Tuning;
use star_raid::sim::{
    GamePhase, GameState, TickInput, Viewport, cull_offscreen, spawn_interval, tick,
};
use star_raid::tuning::WEAPON_TIER_CAP;

const VIEW: Viewport = Viewport::new(480.0, 640.0);
const FRAME_MS: f32 = 1000.0 / 60.0;

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (
        any::<[bool; 4]>(),
        proptest::option::weighted(0.2, (-50.0f32..530.0, -50.0f32..690.0)),
    )
        .prop_map(|([up, down, left, right], pointer)| TickInput {
            up,
            down,
            left,
            right,
            pointer: pointer.map(|(x, y)| Vec2::new(x, y)),
            pause: false,
        })
}

fn run(seed: u64, inputs: &[TickInput], tuning: &Tuning) -> GameState {
    let mut state = GameState::new(seed, VIEW, tuning);
    state.start(VIEW, tuning);
    let mut rng = Pcg32::seed_from_u64(seed);
    for input in inputs {
        tick(&mut state, input, FRAME_MS, VIEW, tuning, &mut rng);
    }
    state
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn bounded_player_through_any_run(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(input_strategy(), 1..600),
    ) {
        let tuning = Tuning::default();
        let mut state = GameState::new(seed, VIEW, &tuning);
        state.start(VIEW, &tuning);
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut last_score = 0;

        for input in &inputs {
            tick(&mut state, input, FRAME_MS, VIEW, &tuning, &mut rng);
            let p = &state.player;

            prop_assert!(p.health >= 0 && p.health <= p.max_health);
            prop_assert!(p.weapon_tier >= 1 && p.weapon_tier <= WEAPON_TIER_CAP);
            prop_assert!(p.pos.x >= p.radius - 1e-3 && p.pos.x <= VIEW.width - p.radius + 1e-3);
            prop_assert!(p.pos.y >= p.radius - 1e-3 && p.pos.y <= VIEW.height - p.radius + 1e-3);
            prop_assert!(state.particles.len() <= tuning.max_particles);
            prop_assert!(state.score >= last_score);
            prop_assert!(state.enemies.iter().all(|e| e.hp > 0));
            last_score = state.score;

            if state.phase == GamePhase::GameOver {
                prop_assert_eq!(p.health, 0);
                break;
            }
        }
    }

    #[test]
    fn same_seed_and_inputs_replay_identically(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(input_strategy(), 1..300),
    ) {
        let tuning = Tuning::default();
        let a = run(seed, &inputs, &tuning);
        let b = run(seed, &inputs, &tuning);

        prop_assert_eq!(a.score, b.score);
        prop_assert_eq!(a.frame, b.frame);
        prop_assert_eq!(a.player.pos, b.player.pos);
        prop_assert_eq!(a.player.health, b.player.health);
        prop_assert_eq!(a.enemies.len(), b.enemies.len());
        prop_assert_eq!(a.bullets.len(), b.bullets.len());
    }

    #[test]
    fn culling_twice_removes_nothing_more(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(input_strategy(), 1..200),
        height in 100.0f32..640.0,
    ) {
        let tuning = Tuning::default();
        let mut state = run(seed, &inputs, &tuning);
        // A shrunken viewport leaves entities below the new bottom edge
        let smaller = Viewport::new(VIEW.width, height);

        cull_offscreen(&mut state, smaller);
        prop_assert_eq!(cull_offscreen(&mut state, smaller), 0);
        prop_assert!(state.enemies.iter().all(|e| e.pos.y <= smaller.height));
        prop_assert!(state.bullets.iter().all(|b| b.pos.y >= 0.0));
    }

    #[test]
    fn spawn_interval_never_grows_with_score(a in 0u64..200_000, b in 0u64..200_000) {
        let tuning = Tuning::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        prop_assert!(spawn_interval(hi, &tuning) <= spawn_interval(lo, &tuning));
        prop_assert!(spawn_interval(hi, &tuning) >= tuning.spawn_interval_min);
    }
}
