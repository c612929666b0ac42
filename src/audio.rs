//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Each cue is one oscillator with an exponential gain decay and a short
//! frequency envelope.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player attack fired
    Shoot,
    /// Player or pet projectile struck an enemy
    EnemyHit,
    /// Pickup collected
    Pickup,
    /// Form changed
    Transform,
    /// Player took damage
    PlayerHurt,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One point of a frequency envelope; `at` is a fraction of the tone duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FreqStep {
    /// Jump to `mul` x base frequency
    Set { at: f64, mul: f32 },
    /// Exponential glide reaching `mul` x base frequency
    Ramp { at: f64, mul: f32 },
}

/// Synthesis parameters for one cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    /// Base frequency (Hz)
    pub frequency: f32,
    /// Seconds
    pub duration: f64,
    /// Peak gain before master/sfx volume
    pub volume: f32,
    /// Starting frequency as a multiple of `frequency`
    pub start_mul: f32,
    pub sweep: &'static [FreqStep],
}

/// Gain the envelope decays to; exponential ramps cannot reach zero
pub const GAIN_FLOOR: f32 = 0.01;

const SHOOT_SWEEP: &[FreqStep] = &[FreqStep::Ramp { at: 1.0, mul: 0.5 }];
const HIT_SWEEP: &[FreqStep] = &[FreqStep::Ramp { at: 1.0, mul: 0.25 }];
const PICKUP_SWEEP: &[FreqStep] = &[
    FreqStep::Ramp { at: 0.5, mul: 2.0 },
    FreqStep::Ramp { at: 1.0, mul: 1.5 },
];
const TRANSFORM_SWEEP: &[FreqStep] = &[
    FreqStep::Ramp { at: 0.5, mul: 2.0 },
    FreqStep::Set { at: 0.5, mul: 1.0 },
];

impl SoundEffect {
    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::Shoot,
        SoundEffect::EnemyHit,
        SoundEffect::Pickup,
        SoundEffect::Transform,
        SoundEffect::PlayerHurt,
    ];

    pub fn tone(self) -> Tone {
        match self {
            SoundEffect::Shoot => Tone {
                waveform: Waveform::Square,
                frequency: 300.0,
                duration: 0.1,
                volume: 0.2,
                start_mul: 1.0,
                sweep: SHOOT_SWEEP,
            },
            SoundEffect::EnemyHit => Tone {
                waveform: Waveform::Sawtooth,
                frequency: 150.0,
                duration: 0.2,
                volume: 0.3,
                start_mul: 1.0,
                sweep: HIT_SWEEP,
            },
            SoundEffect::Pickup => Tone {
                waveform: Waveform::Sine,
                frequency: 800.0,
                duration: 0.3,
                volume: 0.2,
                start_mul: 1.0,
                sweep: PICKUP_SWEEP,
            },
            SoundEffect::Transform => Tone {
                waveform: Waveform::Triangle,
                frequency: 400.0,
                duration: 0.5,
                volume: 0.3,
                start_mul: 0.5,
                sweep: TRANSFORM_SWEEP,
            },
            // Same voice as the enemy hit, lower and louder
            SoundEffect::PlayerHurt => Tone {
                waveform: Waveform::Sawtooth,
                frequency: 100.0,
                duration: 0.3,
                volume: 0.4,
                start_mul: 1.0,
                sweep: HIT_SWEEP,
            },
        }
    }

    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::AttackFired { .. } => Some(SoundEffect::Shoot),
            GameEvent::EnemyHit { .. } => Some(SoundEffect::EnemyHit),
            GameEvent::PickupCollected { .. } => Some(SoundEffect::Pickup),
            GameEvent::Transformed { .. } => Some(SoundEffect::Transform),
            GameEvent::PlayerHurt { .. } => Some(SoundEffect::PlayerHurt),
            _ => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{FreqStep, GAIN_FLOOR, SoundEffect, Tone, Waveform};
    use crate::settings::Settings;

    impl From<Waveform> for OscillatorType {
        fn from(w: Waveform) -> Self {
            match w {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        /// Gain from the current settings; 0 while muted
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                if ctx.resume().is_err() {
                    log::warn!("AudioContext resume rejected");
                }
            }
        }

        /// Pick up changed mute or volume settings
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            if self.play_tone(ctx, &effect.tone(), vol).is_none() {
                log::warn!("Audio error while playing {:?}", effect);
            }
        }

        /// Create an oscillator routed through a gain node
        fn create_osc(
            &self,
            ctx: &AudioContext,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone, vol: f32) -> Option<()> {
            let (osc, gain) = self.create_osc(ctx, tone.waveform.into())?;
            let t = ctx.current_time();
            let end = t + tone.duration;

            gain.gain().set_value_at_time(tone.volume * vol, t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(GAIN_FLOOR, end)
                .ok()?;

            let freq = osc.frequency();
            freq.set_value_at_time(tone.frequency * tone.start_mul, t).ok()?;
            for step in tone.sweep {
                let scheduled = match *step {
                    FreqStep::Set { at, mul } => {
                        freq.set_value_at_time(tone.frequency * mul, t + tone.duration * at)
                    }
                    FreqStep::Ramp { at, mul } => freq.exponential_ramp_to_value_at_time(
                        tone.frequency * mul,
                        t + tone.duration * at,
                    ),
                };
                scheduled.ok()?;
            }

            osc.start_with_when(t).ok()?;
            osc.stop_with_when(end).ok()?;
            Some(())
        }
    }
}
