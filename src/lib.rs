//! Croc Breakout - bricks with feelings, a crocodile for a paddle
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, game phase)
//! - `renderer`: Frame painting and the WebGPU pipeline
//! - `driver`: Cancellable frame loop tying simulation and rendering together
//! - `ui`: Overlay screens (ready, paused, game over, win)
//! - `audio`: Procedural sound effects

pub mod audio;
pub mod driver;
pub mod renderer;
pub mod sim;
pub mod ui;

pub use driver::{FrameScheduler, Game};
pub use sim::{GamePhase, GameState};

/// Game configuration constants
pub mod consts {
    /// Logical canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Paddle geometry (y is fixed, distance from the bottom edge)
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_Y_OFFSET: f32 = 30.0;
    /// Horizontal speed per unit of hit offset from the paddle center
    pub const PADDLE_DEFLECTION: f32 = 0.1;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const INITIAL_BALL_SPEED: f32 = 5.0;

    /// Brick grid layout
    pub const BRICK_ROW_COUNT: usize = 5;
    pub const BRICK_COLUMN_COUNT: usize = 9;
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 50.0;
    pub const BRICK_OFFSET_LEFT: f32 = 30.0;
    pub const BRICK_POINTS: u32 = 10;
    /// Row color bands, cycling top to bottom
    pub const BRICK_COLORS: [[f32; 4]; 5] = [
        super::hex(0xef4444), // red-500
        super::hex(0xf97316), // orange-500
        super::hex(0xeab308), // yellow-500
        super::hex(0x22c55e), // green-500
        super::hex(0x3b82f6), // blue-500
    ];

    pub const INITIAL_LIVES: u32 = 3;

    /// Top edge of the paddle
    pub const PADDLE_Y: f32 = CANVAS_HEIGHT - PADDLE_Y_OFFSET - PADDLE_HEIGHT;
}

/// Parse a `0xRRGGBB` literal into normalized RGBA components
pub const fn hex(rgb: u32) -> [f32; 4] {
    rgba(rgb, 1.0)
}

/// Parse a `0xRRGGBB` literal with explicit alpha
pub const fn rgba(rgb: u32, alpha: f32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        alpha,
    ]
}
