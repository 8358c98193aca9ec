//! Property tests for the simulation invariants

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use tower_climb::Tuning;
use tower_climb::consts::*;
use tower_climb::sim::{Camera, GameState, ScoreTracker, TickInput, generate_run, tick};

fn tick_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(move_left, move_right, jump)| {
        TickInput {
            move_left,
            move_right,
            jump,
        }
    })
}

proptest! {
    #[test]
    fn generated_platforms_fit_between_walls(
        seed in any::<u64>(),
        from_y in 0.0f32..5000.0,
        span in 0.0f32..20000.0,
    ) {
        let tuning = Tuning::default();
        let mut platforms = Vec::new();
        let mut rng = Pcg32::seed_from_u64(seed);
        generate_run(&mut platforms, &mut rng, &tuning, from_y, from_y + span);

        for p in &platforms {
            prop_assert!(p.x >= WALL_WIDTH);
            prop_assert!(p.x + p.width <= WINDOW_WIDTH - WALL_WIDTH);
            prop_assert!(p.width >= 100.0 && p.width <= 150.0);
            prop_assert!(p.y < from_y + span);
        }
        for pair in platforms.windows(2) {
            prop_assert!(pair[1].y > pair[0].y);
        }
    }

    #[test]
    fn player_x_stays_between_walls(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(tick_input(), 1..400),
    ) {
        let mut state = GameState::new(seed, Tuning::default());
        for input in &inputs {
            let was_active = state.player.bounce.active;
            let before = state.player.bounce.timer;
            tick(&mut state, input);

            prop_assert!(state.player.pos.x >= PLAYER_MIN_X);
            prop_assert!(state.player.pos.x <= PLAYER_MAX_X);

            // Bounce decays one tick at a time and ends at zero
            if was_active && !state.fell_off_screen {
                prop_assert_eq!(state.player.bounce.timer, before - 1);
                prop_assert_eq!(state.player.bounce.active, state.player.bounce.timer > 0);
            }
        }
    }

    #[test]
    fn wall_contact_arms_full_bounce(
        seed in any::<u64>(),
        right in any::<bool>(),
    ) {
        let mut state = GameState::new(seed, Tuning::default());
        tick(&mut state, &TickInput { jump: true, ..Default::default() });
        state.player.pos.x = if right { PLAYER_MAX_X - 1.0 } else { PLAYER_MIN_X + 1.0 };

        let input = TickInput { move_left: !right, move_right: right, jump: false };
        tick(&mut state, &input);

        prop_assert!(state.player.bounce.active);
        prop_assert_eq!(state.player.bounce.timer, 10);
        prop_assert_eq!(state.player.bounce.direction, if right { -1 } else { 1 });
    }

    #[test]
    fn score_and_speed_follow_landing_count(landings in 0u32..300) {
        let tuning = Tuning::default();
        let mut tracker = ScoreTracker::default();
        let mut camera = Camera::new(tuning.camera_base_speed);
        for _ in 0..landings {
            if tracker.record_landing(tuning.jumps_per_speed_step) {
                camera.speed_up(&tuning);
            }
        }

        prop_assert_eq!(tracker.score, landings);
        prop_assert_eq!(camera.speed, 1.5 + 0.5 * (landings / 10) as f32);
        prop_assert_eq!(camera.speed, tuning.camera_speed_for(landings));
    }

    #[test]
    fn camera_never_moves_down(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(tick_input(), 1..300),
    ) {
        let mut state = GameState::new(seed, Tuning::default());
        let mut last = state.camera.scroll_y;
        let mut last_score = 0;
        for input in &inputs {
            tick(&mut state, input);
            prop_assert!(state.camera.scroll_y >= last);
            prop_assert!(state.score.score >= last_score);
            last = state.camera.scroll_y;
            last_score = state.score.score;
        }
    }
}
