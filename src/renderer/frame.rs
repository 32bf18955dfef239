//! Frame painter: bricks with faces, the crocodile paddle, the ball, the HUD
//!
//! Reads the game state and never changes it, so it can paint a frozen
//! frame in any phase.

use std::f32::consts::{PI, TAU};

use super::canvas::{Canvas, Color};
use crate::consts::*;
use crate::sim::{Brick, Emotion, GameState};
use crate::{hex, rgba};

/// Playfield background (slate-800)
pub const BACKGROUND: Color = hex(0x1e293b);
/// Face ink: translucent black
pub const FACE_INK: Color = rgba(0x000000, 0.7);
pub const PADDLE_BODY: Color = hex(0x15803d); // green-700
pub const EYE_WHITE: Color = hex(0xffffff);
pub const PUPIL: Color = hex(0x000000);
pub const BALL: Color = hex(0xf472b6); // pink-400
pub const HUD_TEXT: Color = hex(0xf0f9ff);
pub const HUD_FONT_SIZE: f32 = 20.0;

/// Paint one complete frame
pub fn draw_frame<C: Canvas + ?Sized, R>(canvas: &mut C, state: &GameState<R>) {
    canvas.clear(BACKGROUND);

    for brick in state.bricks.iter().filter(|b| b.is_visible()) {
        let r = brick.rect;
        canvas.fill_rect(r.x, r.y, r.w, r.h, brick.color);
        draw_face(canvas, brick);
    }

    draw_paddle(canvas, state.paddle.x);

    canvas.fill_circle(state.ball.pos.x, state.ball.pos.y, BALL_RADIUS, BALL);

    canvas.fill_text(
        &format!("Score: {}", state.score),
        8.0,
        30.0,
        HUD_FONT_SIZE,
        HUD_TEXT,
    );
    canvas.fill_text(
        &format!("Lives: {}", state.lives),
        CANVAS_WIDTH - 85.0,
        30.0,
        HUD_FONT_SIZE,
        HUD_TEXT,
    );

    canvas.present();
}

/// Eyes and mouth for a brick's emotion
pub fn draw_face<C: Canvas + ?Sized>(canvas: &mut C, brick: &Brick) {
    let center = brick.rect.center();
    let (cx, cy) = (center.x, center.y);
    let eye_radius = 3.0;
    let eye_dx = BRICK_WIDTH / 4.5;
    let eye_y = cy - BRICK_HEIGHT / 8.0;
    let line = 2.0;
    let eyes = |canvas: &mut C| {
        canvas.fill_circle(cx - eye_dx, eye_y, eye_radius, FACE_INK);
        canvas.fill_circle(cx + eye_dx, eye_y, eye_radius, FACE_INK);
    };

    match brick.emotion {
        Emotion::Happy => {
            eyes(&mut *canvas);
            canvas.stroke_arc(cx, eye_y + 1.0, BRICK_WIDTH / 6.0, 0.0, PI, line, FACE_INK);
        }
        Emotion::Sad => {
            eyes(&mut *canvas);
            canvas.stroke_arc(cx, eye_y + 9.0, BRICK_WIDTH / 6.0, PI, TAU, line, FACE_INK);
        }
        Emotion::Angry => {
            eyes(&mut *canvas);
            // Brows slant down toward the nose
            canvas.stroke_line(
                cx - eye_dx - 4.0,
                eye_y - 6.0,
                cx - eye_dx + 4.0,
                eye_y - 3.0,
                line,
                FACE_INK,
            );
            canvas.stroke_line(
                cx + eye_dx + 4.0,
                eye_y - 6.0,
                cx + eye_dx - 4.0,
                eye_y - 3.0,
                line,
                FACE_INK,
            );
            canvas.stroke_line(cx - 6.0, cy + 6.0, cx + 6.0, cy + 6.0, line, FACE_INK);
        }
        Emotion::Surprised => {
            canvas.stroke_circle(cx - eye_dx, eye_y, eye_radius + 1.0, 1.5, FACE_INK);
            canvas.stroke_circle(cx + eye_dx, eye_y, eye_radius + 1.0, 1.5, FACE_INK);
            canvas.fill_circle(cx, cy + 5.0, 4.0, FACE_INK);
        }
        Emotion::Neutral => {
            eyes(&mut *canvas);
            canvas.stroke_line(cx - 6.0, cy + 6.0, cx + 6.0, cy + 6.0, line, FACE_INK);
        }
    }
}

/// Green body with two eyes peeking up near the right end
pub fn draw_paddle<C: Canvas + ?Sized>(canvas: &mut C, x: f32) {
    let y = PADDLE_Y;
    canvas.fill_rect(x, y, PADDLE_WIDTH, PADDLE_HEIGHT, PADDLE_BODY);

    let eye_radius = PADDLE_HEIGHT / 2.5;
    let eye_y = y + PADDLE_HEIGHT / 2.0;
    for eye_x in [x + PADDLE_WIDTH - 45.0, x + PADDLE_WIDTH - 20.0] {
        canvas.fill_circle(eye_x, eye_y, eye_radius, EYE_WHITE);
        canvas.fill_circle(eye_x + 1.0, eye_y, eye_radius / 2.0, PUPIL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::canvas::{DisplayList, DrawCommand};
    use crate::sim::GamePhase;
    use crate::sim::rng::Scripted;

    fn state_with(emotion: Emotion) -> GameState<Scripted> {
        GameState::new(Scripted::new(vec![emotion], vec![1.0]))
    }

    fn face_of(emotion: Emotion) -> Vec<DrawCommand> {
        let brick = Brick::new(0, 0, emotion);
        let mut list = DisplayList::new();
        draw_face(&mut list, &brick);
        list.commands
    }

    #[test]
    fn test_full_board_frame() {
        let state = state_with(Emotion::Neutral);
        let mut list = DisplayList::new();
        draw_frame(&mut list, &state);

        assert_eq!(list.commands[0], DrawCommand::Clear(BACKGROUND));
        // 45 bricks + paddle body
        let rects = list.count(|c| matches!(c, DrawCommand::FillRect { .. }));
        assert_eq!(rects, 46);
        assert_eq!(list.texts(), vec!["Score: 0", "Lives: 3"]);
        assert_eq!(list.presented, 1);
    }

    #[test]
    fn test_broken_bricks_are_not_drawn() {
        let mut state = state_with(Emotion::Happy);
        state.brick_mut(2, 3).unwrap().smash();
        state.brick_mut(0, 0).unwrap().smash();
        let mut list = DisplayList::new();
        draw_frame(&mut list, &state);

        let rects = list.count(|c| matches!(c, DrawCommand::FillRect { .. }));
        assert_eq!(rects, 44);
        let gone = state.brick(0, 0).unwrap().rect;
        assert!(!list.commands.iter().any(|c| matches!(
            c,
            DrawCommand::FillRect { x, y, .. } if *x == gone.x && *y == gone.y
        )));
    }

    #[test]
    fn test_bricks_use_row_color() {
        let state = state_with(Emotion::Happy);
        let mut list = DisplayList::new();
        draw_frame(&mut list, &state);
        for cmd in &list.commands {
            if let DrawCommand::FillRect { y, color, .. } = cmd {
                if *y < PADDLE_Y {
                    let row = ((*y - BRICK_OFFSET_TOP) / (BRICK_HEIGHT + BRICK_PADDING)) as usize;
                    assert_eq!(*color, BRICK_COLORS[row]);
                }
            }
        }
    }

    #[test]
    fn test_hud_positions_and_values() {
        let mut state = state_with(Emotion::Happy);
        state.score = 130;
        state.lives = 2;
        let mut list = DisplayList::new();
        draw_frame(&mut list, &state);

        let texts: Vec<_> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, x, y, .. } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                ("Score: 130".to_string(), 8.0, 30.0),
                ("Lives: 2".to_string(), 715.0, 30.0),
            ]
        );
    }

    #[test]
    fn test_ball_drawn_at_position() {
        let state = state_with(Emotion::Happy);
        let mut list = DisplayList::new();
        draw_frame(&mut list, &state);
        assert!(list.commands.contains(&DrawCommand::FillCircle {
            cx: 400.0,
            cy: 540.0,
            radius: BALL_RADIUS,
            color: BALL,
        }));
    }

    #[test]
    fn test_paddle_eyes() {
        let mut list = DisplayList::new();
        draw_paddle(&mut list, 340.0);
        assert_eq!(
            list.commands[0],
            DrawCommand::FillRect {
                x: 340.0,
                y: 550.0,
                w: 120.0,
                h: 20.0,
                color: PADDLE_BODY
            }
        );
        let whites = list.count(|c| matches!(c, DrawCommand::FillCircle { color, radius, .. } if *color == EYE_WHITE && *radius == 8.0));
        let pupils = list.count(|c| matches!(c, DrawCommand::FillCircle { color, radius, .. } if *color == PUPIL && *radius == 4.0));
        assert_eq!((whites, pupils), (2, 2));
        assert!(list.commands.contains(&DrawCommand::FillCircle {
            cx: 415.0,
            cy: 560.0,
            radius: 8.0,
            color: EYE_WHITE
        }));
    }

    #[test]
    fn test_happy_smiles_sad_frowns() {
        let happy = face_of(Emotion::Happy);
        let sad = face_of(Emotion::Sad);
        assert!(matches!(happy[2], DrawCommand::StrokeArc { start, end, .. } if start == 0.0 && end == PI));
        assert!(matches!(sad[2], DrawCommand::StrokeArc { start, end, .. } if start == PI && end == TAU));
    }

    #[test]
    fn test_every_face_is_distinct() {
        let faces: Vec<_> = Emotion::ALL.iter().map(|&e| face_of(e)).collect();
        for i in 0..faces.len() {
            assert!(!faces[i].is_empty());
            for j in (i + 1)..faces.len() {
                assert_ne!(faces[i], faces[j]);
            }
        }
    }

    #[test]
    fn test_angry_has_brows_and_mouth() {
        let angry = face_of(Emotion::Angry);
        let lines = angry
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
            .count();
        assert_eq!(lines, 3);
    }

    #[test]
    fn test_surprised_has_hollow_eyes() {
        let surprised = face_of(Emotion::Surprised);
        let hollow = surprised
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeCircle { width, .. } if *width == 1.5))
            .count();
        assert_eq!(hollow, 2);
    }

    #[test]
    fn test_frozen_frame_in_any_phase() {
        let mut state = state_with(Emotion::Happy);
        for phase in [GamePhase::Ready, GamePhase::GameOver, GamePhase::Win] {
            state.phase = phase;
            let before = state.clone();
            let mut list = DisplayList::new();
            draw_frame(&mut list, &state);
            assert_eq!(state.ball, before.ball);
            assert_eq!(state.bricks, before.bricks);
            assert_eq!(list.presented, 1);
        }
    }
}
