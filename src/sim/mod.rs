//! Simulation module
//!
//! All gameplay logic lives here. One `tick` call advances exactly one frame:
//! - Randomness only through `EntropySource`
//! - Stable iteration order (bricks are stored column-major)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use rng::EntropySource;
pub use state::{Ball, Brick, BrickStatus, Emotion, GameEvent, GamePhase, GameState, Paddle};
pub use tick::tick;
