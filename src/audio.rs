//! Sound effects using the Web Audio API
//!
//! Every effect is a short list of oscillator tones, so no audio files are
//! shipped. The tone plans are plain data; only `AudioManager` touches the
//! browser.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits a wall or the ceiling
    WallHit,
    /// A brick breaks
    BrickBreak,
    /// Ball slipped past the paddle
    LifeLost,
    /// Last brick broken
    Win,
    /// Out of lives
    GameOver,
    /// New game started
    Start,
}

impl SoundEffect {
    /// Effect for a simulation event; running out of lives plays only the
    /// game-over jingle
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleHit => Some(SoundEffect::PaddleHit),
            GameEvent::WallBounce => Some(SoundEffect::WallHit),
            GameEvent::BrickBroken { .. } => Some(SoundEffect::BrickBreak),
            GameEvent::LifeLost { remaining } if *remaining > 0 => Some(SoundEffect::LifeLost),
            GameEvent::LifeLost { .. } => None,
            GameEvent::Won => Some(SoundEffect::Win),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
        }
    }

    /// Oscillator tones that make up this effect
    pub fn tones(self) -> Vec<Tone> {
        match self {
            // Solid thump
            SoundEffect::PaddleHit => vec![Tone::sweep(Wave::Sine, 150.0, 60.0, 0.6, 0.1)],
            // Higher ping
            SoundEffect::WallHit => vec![Tone::new(Wave::Sine, 400.0, 0.3, 0.08)],
            // Bright crack with a low body
            SoundEffect::BrickBreak => vec![
                Tone::sweep(Wave::Triangle, 900.0, 300.0, 0.3, 0.12),
                Tone::new(Wave::Sine, 90.0, 0.25, 0.1),
            ],
            // Long slide down
            SoundEffect::LifeLost => vec![Tone::sweep(Wave::Sine, 300.0, 40.0, 0.4, 0.6)],
            SoundEffect::Win => arpeggio(Wave::Triangle, &[400.0, 500.0, 600.0, 800.0], 0.1, 0.4),
            SoundEffect::GameOver => arpeggio(Wave::Sine, &[400.0, 350.0, 300.0, 200.0], 0.2, 0.3),
            // Whoosh up
            SoundEffect::Start => vec![Tone::sweep(Wave::Triangle, 200.0, 600.0, 0.3, 0.2)],
        }
    }
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Triangle,
}

/// One oscillator note with an exponential fade-out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Wave,
    pub freq: f32,
    /// Pitch at the end of the note (equal to `freq` for a steady tone)
    pub end_freq: f32,
    /// Peak gain before the effect volume is applied
    pub gain: f32,
    /// Seconds after the effect starts
    pub delay: f64,
    /// Seconds until the fade reaches silence
    pub duration: f64,
}

impl Tone {
    pub fn new(wave: Wave, freq: f32, gain: f32, duration: f64) -> Self {
        Self::sweep(wave, freq, freq, gain, duration)
    }

    pub fn sweep(wave: Wave, freq: f32, end_freq: f32, gain: f32, duration: f64) -> Self {
        Self {
            wave,
            freq,
            end_freq,
            gain,
            delay: 0.0,
            duration,
        }
    }

    pub fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

fn arpeggio(wave: Wave, freqs: &[f32], step: f64, duration: f64) -> Vec<Tone> {
    freqs
        .iter()
        .enumerate()
        .map(|(i, &f)| Tone::new(wave, f, 0.3, duration).delayed(i as f64 * step))
        .collect()
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone, Wave};

    /// Peak level applied on top of each tone's own gain
    const MASTER_GAIN: f32 = 0.8;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        pub fn play(&self, effect: SoundEffect) {
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in effect.tones() {
                self.play_tone(ctx, &tone);
            }
        }

        fn create_osc(
            &self,
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

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone) {
            let osc_type = match tone.wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Triangle => OscillatorType::Triangle,
            };
            let Some((osc, gain)) = self.create_osc(ctx, tone.freq, osc_type) else {
                return;
            };
            let t = ctx.current_time() + tone.delay;
            let end = t + tone.duration;

            gain.gain().set_value_at_time(tone.gain * MASTER_GAIN, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            if tone.end_freq != tone.freq {
                osc.frequency().set_value_at_time(tone.freq, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(tone.end_freq, end)
                    .ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(end + 0.05).ok();
        }
    }
}
