//! Game state and core simulation types
//!
//! Everything a session owns lives in `GameState`: the ball, the paddle, the
//! brick grid, the counters and the randomness source.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::rng::EntropySource;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Board laid out, waiting for the start button
    Ready,
    /// Active gameplay
    Playing,
    /// Frozen mid-game, resumable
    Paused,
    /// Out of lives
    GameOver,
    /// Every brick broken
    Win,
}

impl GamePhase {
    /// Terminal phases only leave through a restart
    pub fn is_finished(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Win)
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickBroken { row: usize, col: usize },
    WallBounce,
    PaddleHit,
    LifeLost { remaining: u32 },
    Won,
    GameOver,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    /// Launch position: centered, resting on the paddle
    pub const START: Vec2 = Vec2::new(CANVAS_WIDTH / 2.0, PADDLE_Y - BALL_RADIUS);

    /// Ball at the launch position heading up, `direction` picks left or right
    pub fn launched(direction: f32) -> Self {
        Self {
            pos: Self::START,
            vel: Vec2::new(INITIAL_BALL_SPEED * direction.signum(), -INITIAL_BALL_SPEED),
        }
    }

    /// Center after one more step at the current velocity
    #[inline]
    pub fn next_pos(&self) -> Vec2 {
        self.pos + self.vel
    }
}

/// The player's paddle (only x moves)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (CANVAS_WIDTH - PADDLE_WIDTH) / 2.0,
        }
    }
}

impl Paddle {
    pub fn center_x(&self) -> f32 {
        self.x + PADDLE_WIDTH / 2.0
    }

    /// Center the paddle under a pointer at canvas-relative `x`.
    ///
    /// Pointers outside the canvas are ignored; the paddle never leaves the
    /// playfield. Returns whether the paddle moved.
    pub fn follow_pointer(&mut self, x: f32) -> bool {
        if !(x > 0.0 && x < CANVAS_WIDTH) {
            return false;
        }
        let target = (x - PADDLE_WIDTH / 2.0).clamp(0.0, CANVAS_WIDTH - PADDLE_WIDTH);
        let moved = target != self.x;
        self.x = target;
        moved
    }
}

/// Decorative face drawn on a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Surprised,
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Surprised,
        Emotion::Neutral,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Visible,
    Broken,
}

/// A brick in the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    pub status: BrickStatus,
    pub color: [f32; 4],
    pub emotion: Emotion,
}

impl Brick {
    pub fn new(row: usize, col: usize, emotion: Emotion) -> Self {
        let x = col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT;
        let y = row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP;
        Self {
            row,
            col,
            rect: Rect::new(x, y, BRICK_WIDTH, BRICK_HEIGHT),
            status: BrickStatus::Visible,
            color: BRICK_COLORS[row % BRICK_COLORS.len()],
            emotion,
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.status == BrickStatus::Visible
    }

    /// Visible -> Broken; breaking twice is a no-op that reports `false`
    pub fn smash(&mut self) -> bool {
        let was_visible = self.is_visible();
        self.status = BrickStatus::Broken;
        was_visible
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState<R = Pcg32> {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    /// Ticks simulated since the last reset
    pub time_ticks: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Column-major: all rows of column 0, then column 1, ...
    pub bricks: Vec<Brick>,
    #[serde(skip)]
    rng: R,
}

impl<R: EntropySource> GameState<R> {
    /// Fresh board in the Ready phase
    pub fn new(rng: R) -> Self {
        let mut state = Self {
            phase: GamePhase::Ready,
            score: 0,
            lives: INITIAL_LIVES,
            time_ticks: 0,
            ball: Ball::launched(1.0),
            paddle: Paddle::default(),
            bricks: Vec::with_capacity(BRICK_ROW_COUNT * BRICK_COLUMN_COUNT),
            rng,
        };
        state.reset(GamePhase::Ready);
        state
    }

    /// Rebuild the board and counters, entering `phase`
    pub fn reset(&mut self, phase: GamePhase) {
        self.score = 0;
        self.lives = INITIAL_LIVES;
        self.time_ticks = 0;
        self.reset_bricks();
        self.respawn();
        self.phase = phase;
    }

    /// Lay out a full grid with freshly rolled faces
    pub fn reset_bricks(&mut self) {
        self.bricks.clear();
        for col in 0..BRICK_COLUMN_COUNT {
            for row in 0..BRICK_ROW_COUNT {
                let emotion = self.rng.emotion();
                self.bricks.push(Brick::new(row, col, emotion));
            }
        }
    }

    /// Ball back to the launch position, paddle back to center
    pub fn respawn(&mut self) {
        let direction = self.rng.launch_direction();
        self.ball = Ball::launched(direction);
        self.paddle = Paddle::default();
    }
}

impl<R> GameState<R> {
    /// Score for clearing the whole grid
    pub const fn max_score() -> u32 {
        (BRICK_ROW_COUNT * BRICK_COLUMN_COUNT) as u32 * BRICK_POINTS
    }

    pub fn bricks_remaining(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_visible()).count()
    }

    pub fn brick(&self, row: usize, col: usize) -> Option<&Brick> {
        if row >= BRICK_ROW_COUNT || col >= BRICK_COLUMN_COUNT {
            return None;
        }
        self.bricks.get(col * BRICK_ROW_COUNT + row)
    }

    pub fn brick_mut(&mut self, row: usize, col: usize) -> Option<&mut Brick> {
        if row >= BRICK_ROW_COUNT || col >= BRICK_COLUMN_COUNT {
            return None;
        }
        self.bricks.get_mut(col * BRICK_ROW_COUNT + row)
    }
}
