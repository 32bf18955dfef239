//! Randomness used by the simulation
//!
//! Only two things are random: the face drawn on each brick and the
//! horizontal direction the ball launches in. Both go through
//! `EntropySource` so tests can script them.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Emotion;

/// Source of the simulation's random choices
pub trait EntropySource {
    /// Face for a freshly built brick
    fn emotion(&mut self) -> Emotion;

    /// Horizontal launch sign: `1.0` (right) or `-1.0` (left)
    fn launch_direction(&mut self) -> f32;
}

impl EntropySource for Pcg32 {
    fn emotion(&mut self) -> Emotion {
        Emotion::ALL[self.random_range(0..Emotion::ALL.len())]
    }

    fn launch_direction(&mut self) -> f32 {
        if self.random_bool(0.5) { 1.0 } else { -1.0 }
    }
}

/// Seeded PCG generator for a run
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays fixed emotion and direction sequences, cycling when exhausted
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct Scripted {
    emotions: Vec<Emotion>,
    directions: Vec<f32>,
    next_emotion: usize,
    next_direction: usize,
}

#[cfg(test)]
impl Scripted {
    pub fn new(emotions: Vec<Emotion>, directions: Vec<f32>) -> Self {
        assert!(!emotions.is_empty() && !directions.is_empty());
        Self {
            emotions,
            directions,
            next_emotion: 0,
            next_direction: 0,
        }
    }

    /// Every brick happy, every launch to the right
    pub fn constant() -> Self {
        Self::new(vec![Emotion::Happy], vec![1.0])
    }
}

#[cfg(test)]
impl EntropySource for Scripted {
    fn emotion(&mut self) -> Emotion {
        let e = self.emotions[self.next_emotion % self.emotions.len()];
        self.next_emotion += 1;
        e
    }

    fn launch_direction(&mut self) -> f32 {
        let d = self.directions[self.next_direction % self.directions.len()];
        self.next_direction += 1;
        d
    }
}
