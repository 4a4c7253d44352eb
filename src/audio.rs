//! Sound effects
//!
//! Which sound a commit earns and what it is made of are plain data so they can be
//! tested anywhere; only [`AudioManager`] (wasm32) talks to Web Audio.

use crate::sim::CommitResult;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Row placed with losses elsewhere in the block
    Stack,
    /// Nothing fell
    Perfect,
    /// Some cells fell away
    Fall,
    /// Minor prize row reached
    MinorPrize,
    /// Top reached
    MajorPrize,
    /// Nothing landed
    GameOver,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Square,
    Sawtooth,
}

/// One scheduled beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Seconds after the effect starts
    pub delay: f32,
    pub duration: f32,
    pub wave: Waveform,
    pub gain: f32,
}

const fn tone(freq: f32, delay: f32, duration: f32, wave: Waveform, gain: f32) -> Tone {
    Tone {
        freq,
        delay,
        duration,
        wave,
        gain,
    }
}

impl SoundEffect {
    /// Pick the most significant sound for a commit
    pub fn for_commit(result: &CommitResult) -> Self {
        if result.game_over {
            SoundEffect::GameOver
        } else if result.major_prize {
            SoundEffect::MajorPrize
        } else if result.minor_prize {
            SoundEffect::MinorPrize
        } else if result.perfect {
            SoundEffect::Perfect
        } else if !result.fallen.is_empty() {
            SoundEffect::Fall
        } else {
            SoundEffect::Stack
        }
    }

    pub fn tones(self) -> Vec<Tone> {
        use Waveform::*;
        match self {
            SoundEffect::Stack => vec![tone(440.0, 0.0, 0.08, Square, 0.2)],
            SoundEffect::Perfect => vec![
                tone(523.0, 0.0, 0.1, Square, 0.25),
                tone(659.0, 0.05, 0.1, Square, 0.25),
                tone(784.0, 0.1, 0.15, Square, 0.25),
            ],
            SoundEffect::Fall => vec![tone(200.0, 0.0, 0.15, Sawtooth, 0.15)],
            SoundEffect::MinorPrize => [523.0, 659.0, 784.0, 1047.0]
                .iter()
                .enumerate()
                .map(|(i, &f)| tone(f, i as f32 * 0.1, 0.2, Square, 0.2))
                .collect(),
            SoundEffect::MajorPrize => [523.0, 659.0, 784.0, 1047.0, 784.0, 1047.0, 1319.0]
                .iter()
                .enumerate()
                .map(|(i, &f)| tone(f, i as f32 * 0.12, 0.25, Square, 0.25))
                .collect(),
            SoundEffect::GameOver => vec![
                tone(200.0, 0.0, 0.3, Sawtooth, 0.2),
                tone(150.0, 0.2, 0.4, Sawtooth, 0.2),
            ],
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, OscillatorType};

    use super::{SoundEffect, Tone, Waveform};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        /// The context is created lazily on the first user gesture
        pub fn new() -> Self {
            Self {
                ctx: None,
                volume: 0.8,
            }
        }

        /// Create/resume the context (must run inside a user gesture)
        pub fn unlock(&mut self) {
            if self.ctx.is_none() {
                self.ctx = AudioContext::new().ok();
                if self.ctx.is_none() {
                    log::warn!("Failed to create AudioContext - audio disabled");
                }
            }
            if let Some(ctx) = &self.ctx {
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        /// Set output volume (0.0 - 1.0)
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            for tone in effect.tones() {
                self.schedule(ctx, &tone);
            }
        }

        fn schedule(&self, ctx: &AudioContext, tone: &Tone) -> Option<()> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(match tone.wave {
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            });
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let t = ctx.current_time() + tone.delay as f64;
            let end = t + tone.duration as f64;
            osc.frequency().set_value_at_time(tone.freq, t).ok()?;
            gain.gain()
                .set_value_at_time(tone.gain * self.volume, t)
                .ok()?;
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok()?;

            osc.start_with_when(t).ok()?;
            osc.stop_with_when(end).ok()?;
            Some(())
        }
    }
}
