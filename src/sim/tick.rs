//! Per-frame simulation tick
//!
//! One call advances the ball by one step and resolves everything it ran
//! into. Rules run in a fixed order: move, bricks, win check, side walls,
//! ceiling, then the paddle band.

use super::collision::{crosses_ceiling, crosses_paddle_band, crosses_side_wall, over_paddle};
use super::rng::EntropySource;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Advance the game by one frame.
///
/// Does nothing outside `Playing`. Returns what happened, in order.
pub fn tick<R: EntropySource>(state: &mut GameState<R>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;
    state.ball.pos += state.ball.vel;

    // Only the vertical velocity flips on a brick hit, whichever side was struck
    let center = state.ball.pos;
    for brick in state.bricks.iter_mut().filter(|b| b.is_visible()) {
        if brick.rect.contains_strict(center) && brick.smash() {
            state.ball.vel.y = -state.ball.vel.y;
            state.score += BRICK_POINTS;
            events.push(GameEvent::BrickBroken {
                row: brick.row,
                col: brick.col,
            });
        }
    }

    if state.score == GameState::<R>::max_score() {
        state.phase = GamePhase::Win;
        events.push(GameEvent::Won);
        log::info!("All bricks cleared, final score {}", state.score);
        return events;
    }

    let next = state.ball.next_pos();
    if crosses_side_wall(next.x) {
        state.ball.vel.x = -state.ball.vel.x;
        events.push(GameEvent::WallBounce);
    }

    if crosses_ceiling(next.y) {
        state.ball.vel.y = -state.ball.vel.y;
        events.push(GameEvent::WallBounce);
    } else if crosses_paddle_band(next.y) {
        if over_paddle(state.ball.pos.x, state.paddle.x) {
            state.ball.vel.y = -state.ball.vel.y;
            let offset = state.ball.pos.x - state.paddle.center_x();
            state.ball.vel.x = offset * PADDLE_DEFLECTION;
            events.push(GameEvent::PaddleHit);
        } else {
            lose_life(state, &mut events);
        }
    }

    events
}

fn lose_life<R: EntropySource>(state: &mut GameState<R>, events: &mut Vec<GameEvent>) {
    state.lives = state.lives.saturating_sub(1);
    events.push(GameEvent::LifeLost {
        remaining: state.lives,
    });

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver);
        log::info!("Out of lives, final score {}", state.score);
    } else {
        log::debug!("Ball lost, {} lives left", state.lives);
        state.respawn();
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::sim::rng::{Scripted, seeded};
    use crate::sim::state::{Ball, BrickStatus, Emotion};

    fn playing() -> GameState<Scripted> {
        let mut state = GameState::new(Scripted::constant());
        state.reset(GamePhase::Playing);
        state
    }

    /// Put the ball at `pos` moving with `vel`
    fn place(state: &mut GameState<Scripted>, pos: Vec2, vel: Vec2) {
        state.ball = Ball { pos, vel };
    }

    #[test]
    fn test_no_tick_outside_playing() {
        let mut state = GameState::new(Scripted::constant());
        let before = state.ball;
        for phase in [
            GamePhase::Ready,
            GamePhase::Paused,
            GamePhase::GameOver,
            GamePhase::Win,
        ] {
            state.phase = phase;
            assert!(tick(&mut state).is_empty());
            assert_eq!(state.ball, before);
            assert_eq!(state.time_ticks, 0);
        }
    }

    #[test]
    fn test_ball_advances_by_velocity() {
        let mut state = playing();
        place(&mut state, Vec2::new(400.0, 300.0), Vec2::new(3.0, -4.0));
        let events = tick(&mut state);
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, Vec2::new(403.0, 296.0));
        assert_eq!(state.ball.vel, Vec2::new(3.0, -4.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_brick_hit_flips_vertical_only() {
        let mut state = playing();
        // Brick (0,0) spans x 30..105, y 50..70; land inside it
        place(&mut state, Vec2::new(60.0, 65.0), Vec2::new(2.0, -5.0));
        let events = tick(&mut state);

        assert_eq!(events, vec![GameEvent::BrickBroken { row: 0, col: 0 }]);
        assert_eq!(state.ball.vel, Vec2::new(2.0, 5.0));
        assert_eq!(state.score, 10);
        assert_eq!(state.brick(0, 0).unwrap().status, BrickStatus::Broken);
        assert_eq!(state.bricks_remaining(), 44);
    }

    #[test]
    fn test_side_hit_still_flips_vertical() {
        let mut state = playing();
        // Moving purely sideways into brick (1,1): x 115..190, y 80..100
        place(&mut state, Vec2::new(110.0, 90.0), Vec2::new(6.0, 0.5));
        tick(&mut state);
        assert_eq!(state.ball.vel, Vec2::new(6.0, -0.5));
        assert_eq!(state.brick(1, 1).unwrap().status, BrickStatus::Broken);
    }

    #[test]
    fn test_broken_brick_is_passed_through() {
        let mut state = playing();
        state.brick_mut(0, 0).unwrap().smash();
        place(&mut state, Vec2::new(60.0, 65.0), Vec2::new(2.0, -5.0));
        let events = tick(&mut state);
        assert!(events.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.ball.vel, Vec2::new(2.0, -5.0));
    }

    #[test]
    fn test_side_wall_reflects_horizontal() {
        let mut state = playing();
        place(&mut state, Vec2::new(780.0, 300.0), Vec2::new(5.0, 5.0));
        // After moving: x = 785, next = 790 (still inside)
        assert!(tick(&mut state).is_empty());
        assert_eq!(state.ball.vel.x, 5.0);
        // x = 790, next = 795 -> bounce
        assert_eq!(tick(&mut state), vec![GameEvent::WallBounce]);
        assert_eq!(state.ball.vel, Vec2::new(-5.0, 5.0));

        place(&mut state, Vec2::new(18.0, 300.0), Vec2::new(-5.0, 5.0));
        assert_eq!(tick(&mut state), vec![GameEvent::WallBounce]);
        assert_eq!(state.ball.vel.x, 5.0);
    }

    #[test]
    fn test_ceiling_reflects_vertical() {
        let mut state = playing();
        place(&mut state, Vec2::new(400.0, 18.0), Vec2::new(1.0, -5.0));
        assert_eq!(tick(&mut state), vec![GameEvent::WallBounce]);
        assert_eq!(state.ball.vel, Vec2::new(1.0, 5.0));
    }

    #[test]
    fn test_paddle_hit_deflects_by_offset() {
        let mut state = playing();
        state.paddle.x = 300.0; // center at 360
        place(&mut state, Vec2::new(395.0, 532.0), Vec2::new(5.0, 5.0));
        // After moving: (400, 537); next y 542 enters the band
        let events = tick(&mut state);
        assert_eq!(events, vec![GameEvent::PaddleHit]);
        assert_eq!(state.ball.vel.y, -5.0);
        assert!((state.ball.vel.x - 4.0).abs() < 1e-5);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_paddle_center_hit_goes_straight_up() {
        let mut state = playing();
        place(&mut state, Vec2::new(400.0, 535.0), Vec2::new(0.0, 5.0));
        assert_eq!(tick(&mut state), vec![GameEvent::PaddleHit]);
        assert_eq!(state.ball.vel, Vec2::new(0.0, -5.0));
    }

    #[test]
    fn test_miss_with_two_lives_respawns() {
        let mut state = GameState::new(Scripted::new(vec![Emotion::Happy], vec![1.0, 1.0, -1.0]));
        state.reset(GamePhase::Playing);
        state.lives = 2;
        state.paddle.x = 0.0;
        place(&mut state, Vec2::new(700.0, 540.0), Vec2::new(3.0, 5.0));

        let events = tick(&mut state);
        assert_eq!(events, vec![GameEvent::LifeLost { remaining: 1 }]);
        assert_eq!(state.lives, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball.pos, Ball::START);
        // Both earlier resets drew +1; the respawn draws -1
        assert_eq!(state.ball.vel, Vec2::new(-5.0, -5.0));
        assert_eq!(state.paddle.x, 340.0);
    }

    #[test]
    fn test_miss_with_last_life_is_game_over() {
        let mut state = playing();
        state.lives = 1;
        state.paddle.x = 0.0;
        place(&mut state, Vec2::new(700.0, 540.0), Vec2::new(3.0, 5.0));

        let events = tick(&mut state);
        assert_eq!(
            events,
            vec![GameEvent::LifeLost { remaining: 0 }, GameEvent::GameOver]
        );
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        // No respawn: ball and paddle stay put
        assert_eq!(state.ball.pos, Vec2::new(703.0, 545.0));
        assert_eq!(state.paddle.x, 0.0);

        // Terminal: further ticks do nothing, GameOver is not repeated
        assert!(tick(&mut state).is_empty());
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_clearing_grid_wins_at_450() {
        let mut state = playing();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.bricks_remaining(), 45);

        let targets: Vec<Vec2> = state.bricks.iter().map(|b| b.rect.center()).collect();
        for (i, center) in targets.iter().enumerate() {
            place(&mut state, *center, Vec2::ZERO);
            let events = tick(&mut state);
            assert_eq!(state.score, (i as u32 + 1) * 10);
            if i + 1 < targets.len() {
                assert_eq!(state.phase, GamePhase::Playing);
            } else {
                assert_eq!(events.last(), Some(&GameEvent::Won));
            }
        }

        assert_eq!(state.phase, GamePhase::Win);
        assert_eq!(state.score, 450);
        assert!(tick(&mut state).is_empty());
        assert_eq!(state.score, 450);
    }

    #[test]
    fn test_win_ends_tick_before_miss() {
        let mut state = playing();
        for brick in state.bricks.iter_mut().skip(1) {
            brick.smash();
        }
        state.score = 440;
        state.lives = 1;
        // Lands in the last brick moving up; after the flip the next step would
        // drop far past the paddle band, away from the paddle
        let center = state.bricks[0].rect.center();
        let vel = Vec2::new(0.0, -485.0);
        place(&mut state, center - vel, vel);

        let events = tick(&mut state);
        assert_eq!(
            events,
            vec![GameEvent::BrickBroken { row: 0, col: 0 }, GameEvent::Won]
        );
        assert_eq!(state.phase, GamePhase::Win);
        assert_eq!(state.lives, 1);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = GameState::new(seeded(99999));
        let mut b = GameState::new(seeded(99999));
        a.reset(GamePhase::Playing);
        b.reset(GamePhase::Playing);
        for _ in 0..2000 {
            let ea = tick(&mut a);
            let eb = tick(&mut b);
            assert_eq!(ea, eb);
        }
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    fn arb_state() -> impl Strategy<Value = GameState<Scripted>> {
        (
            20.0f32..780.0,
            20.0f32..520.0,
            -8.0f32..8.0,
            -8.0f32..8.0,
            0.0f32..680.0,
            proptest::collection::vec(any::<bool>(), 45),
            1u32..=3,
        )
            .prop_map(|(x, y, dx, dy, paddle_x, broken, lives)| {
                let mut state = playing();
                state.ball = Ball {
                    pos: Vec2::new(x, y),
                    vel: Vec2::new(dx, dy),
                };
                state.paddle.x = paddle_x;
                for (brick, smash) in state.bricks.iter_mut().zip(broken) {
                    if smash {
                        brick.smash();
                        state.score += BRICK_POINTS;
                    }
                }
                // Keep the board unfinished so the tick actually runs
                if state.bricks_remaining() == 0 {
                    state.bricks[0].status = BrickStatus::Visible;
                    state.score -= BRICK_POINTS;
                }
                state.lives = lives;
                state
            })
    }

    proptest! {
        #[test]
        fn prop_position_advances_by_prior_velocity(mut state in arb_state()) {
            let before = state.ball;
            let events = tick(&mut state);
            let respawned = events.iter().any(|e| matches!(e, GameEvent::LifeLost { remaining } if *remaining > 0));
            if !respawned {
                prop_assert_eq!(state.ball.pos, before.pos + before.vel);
            }
        }

        #[test]
        fn prop_bricks_never_come_back(mut state in arb_state(), steps in 1usize..200) {
            for _ in 0..steps {
                let broken: Vec<bool> = state.bricks.iter().map(|b| !b.is_visible()).collect();
                tick(&mut state);
                for (brick, was_broken) in state.bricks.iter().zip(broken) {
                    if was_broken {
                        prop_assert_eq!(brick.status, BrickStatus::Broken);
                    }
                }
            }
        }

        #[test]
        fn prop_score_tracks_broken_bricks(mut state in arb_state(), steps in 1usize..300) {
            for _ in 0..steps {
                tick(&mut state);
                let broken = 45 - state.bricks_remaining() as u32;
                prop_assert_eq!(state.score, broken * BRICK_POINTS);
            }
        }

        #[test]
        fn prop_game_over_fires_once(mut state in arb_state(), steps in 1usize..2000) {
            let mut game_overs = 0;
            for _ in 0..steps {
                let events = tick(&mut state);
                game_overs += events.iter().filter(|e| **e == GameEvent::GameOver).count();
                prop_assert!(state.lives <= INITIAL_LIVES);
                if state.lives == 0 {
                    prop_assert_eq!(state.phase, GamePhase::GameOver);
                }
            }
            prop_assert!(game_overs <= 1);
        }

        #[test]
        fn prop_paddle_deflection_follows_hit_offset(
            paddle_x in 0.0f32..680.0,
            offset in 0.5f32..119.5,
            dx in -6.0f32..6.0,
        ) {
            let mut state = playing();
            state.paddle.x = paddle_x;
            let landing = paddle_x + offset;
            place(&mut state, Vec2::new(landing - dx, 532.0), Vec2::new(dx, 5.0));

            let events = tick(&mut state);
            prop_assert!(events.contains(&GameEvent::PaddleHit));
            prop_assert_eq!(state.ball.vel.y, -5.0);
            let expected = (state.ball.pos.x - state.paddle.center_x()) * PADDLE_DEFLECTION;
            prop_assert!((state.ball.vel.x - expected).abs() < 1e-4);
            prop_assert_eq!(state.lives, INITIAL_LIVES);
        }

        #[test]
        fn prop_horizontal_flip_iff_next_x_leaves_field(mut state in arb_state()) {
            let dx = state.ball.vel.x;
            let next_x = (state.ball.pos.x + dx) + dx;
            let events = tick(&mut state);
            let paddle_hit = events.contains(&GameEvent::PaddleHit);
            let respawned = events.iter().any(|e| matches!(e, GameEvent::LifeLost { .. }));
            if !paddle_hit && !respawned && state.phase == GamePhase::Playing {
                let out = next_x > CANVAS_WIDTH - BALL_RADIUS || next_x < BALL_RADIUS;
                prop_assert_eq!(state.ball.vel.x == -dx && dx != 0.0, out && dx != 0.0);
            }
        }
    }
}
