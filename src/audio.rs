//! Audio cues using the Web Audio API
//!
//! Procedurally generated sound effects - no external files needed. Each cue is
//! described as a short list of tones so the sound design can be inspected
//! without a browser; only `AudioManager` touches web-sys.

use crate::sim::{GameEvent, Side};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a paddle
    PaddleHit,
    /// Ball hits the top or bottom wall
    WallBounce,
    /// A point was scored
    Score,
    /// Countdown number shown
    CountdownBeep,
    /// Countdown finished, play begins
    CountdownGo,
    /// Player won the match
    Win,
    /// AI won the match
    Lose,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleHit(_) => Some(SoundEffect::PaddleHit),
            GameEvent::WallBounce => Some(SoundEffect::WallBounce),
            GameEvent::Scored(_) => Some(SoundEffect::Score),
            GameEvent::CountdownStep(_) => Some(SoundEffect::CountdownBeep),
            GameEvent::CountdownFinished => Some(SoundEffect::CountdownGo),
            GameEvent::MatchWon(Side::Player) => Some(SoundEffect::Win),
            GameEvent::MatchWon(Side::Ai) => Some(SoundEffect::Lose),
            GameEvent::PhaseChanged { .. } => None,
        }
    }

    /// Tones making up this cue
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::PaddleHit => PADDLE_HIT,
            SoundEffect::WallBounce => WALL_BOUNCE,
            SoundEffect::Score => SCORE,
            SoundEffect::CountdownBeep => COUNTDOWN_BEEP,
            SoundEffect::CountdownGo => COUNTDOWN_GO,
            SoundEffect::Win => WIN,
            SoundEffect::Lose => LOSE,
        }
    }
}

// Solid thump
const PADDLE_HIT: &[Tone] = &[Tone::sweep(Wave::Sine, 150.0, 60.0, 0.6, 0.0, 0.1)];
// Higher ping
const WALL_BOUNCE: &[Tone] = &[Tone::flat(Wave::Sine, 400.0, 0.3, 0.0, 0.08)];
// Descending buzz
const SCORE: &[Tone] = &[Tone::sweep(Wave::Square, 440.0, 110.0, 0.25, 0.0, 0.3)];
const COUNTDOWN_BEEP: &[Tone] = &[Tone::flat(Wave::Triangle, 520.0, 0.3, 0.0, 0.12)];
const COUNTDOWN_GO: &[Tone] = &[Tone::flat(Wave::Triangle, 1040.0, 0.35, 0.0, 0.25)];
// Rising fanfare
const WIN: &[Tone] = &[
    Tone::flat(Wave::Triangle, 400.0, 0.3, 0.0, 0.4),
    Tone::flat(Wave::Triangle, 500.0, 0.3, 0.1, 0.4),
    Tone::flat(Wave::Triangle, 600.0, 0.3, 0.2, 0.4),
    Tone::flat(Wave::Triangle, 800.0, 0.3, 0.3, 0.4),
];
// Ominous descend
const LOSE: &[Tone] = &[Tone::sweep(Wave::Sine, 300.0, 40.0, 0.4, 0.0, 0.8)];

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Triangle,
}

/// One oscillator with an exponential gain decay and optional pitch sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Wave,
    pub start_freq: f32,
    pub end_freq: f32,
    /// Peak gain before master/sfx volume
    pub gain: f32,
    /// Start offset in seconds
    pub delay: f64,
    /// Decay time in seconds
    pub duration: f64,
}

impl Tone {
    pub const fn flat(wave: Wave, freq: f32, gain: f32, delay: f64, duration: f64) -> Self {
        Self::sweep(wave, freq, freq, gain, delay, duration)
    }

    pub const fn sweep(
        wave: Wave,
        start_freq: f32,
        end_freq: f32,
        gain: f32,
        delay: f64,
        duration: f64,
    ) -> Self {
        Self {
            wave,
            start_freq,
            end_freq,
            gain,
            delay,
            duration,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use manager::AudioManager;

#[cfg(target_arch = "wasm32")]
mod manager {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone, Wave};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Pick up volume/mute changes
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in effect.tones() {
                self.play_tone(ctx, tone);
            }
        }

        /// Create an oscillator with gain envelope
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
                Wave::Square => OscillatorType::Square,
                Wave::Triangle => OscillatorType::Triangle,
            };
            let Some((osc, gain)) = self.create_osc(ctx, tone.start_freq, osc_type) else {
                return;
            };
            let t = ctx.current_time() + tone.delay;
            let end = t + tone.duration;

            gain.gain().set_value_at_time(self.volume * tone.gain, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            if tone.end_freq != tone.start_freq {
                osc.frequency().set_value_at_time(tone.start_freq, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(tone.end_freq, end)
                    .ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(end + 0.05).ok();
        }
    }
}
