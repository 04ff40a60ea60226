//! Audio collaborator
//!
//! Procedurally generated sound effects - no external files needed. The
//! mapping from game events to effects and the engine hum parameters are
//! platform independent; synthesis uses the Web Audio API on wasm32.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Collision: noisy crunch and falling growl
    Crash,
    /// Score milestone chirp
    Score,
    /// Start / level-up beep
    Beep { high: bool },
    /// Near-miss swoosh
    Swoosh,
}

impl SoundEffect {
    /// Effect to play for an event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Collision { .. } => Some(SoundEffect::Crash),
            GameEvent::ScoreMilestone { .. } => Some(SoundEffect::Score),
            GameEvent::NearMiss { .. } => Some(SoundEffect::Swoosh),
            GameEvent::GameStart => Some(SoundEffect::Beep { high: true }),
            GameEvent::DifficultyUp { .. } => Some(SoundEffect::Beep { high: false }),
            GameEvent::NewHighScore { .. } => None,
        }
    }
}

/// Engine hum frequency range (Hz)
const ENGINE_MIN_FREQ: f32 = 80.0;
const ENGINE_MAX_FREQ: f32 = 260.0;
/// Engine gain at top speed
const ENGINE_MAX_GAIN: f32 = 0.06;

/// Sawtooth engine hum settings for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineTone {
    pub frequency: f32,
    pub gain: f32,
}

impl EngineTone {
    pub const SILENT: EngineTone = EngineTone {
        frequency: ENGINE_MIN_FREQ,
        gain: 0.0,
    };

    /// Pitch and loudness rise linearly with speed
    pub fn for_speed_ratio(ratio: f32) -> Self {
        let ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            frequency: ENGINE_MIN_FREQ + ratio * (ENGINE_MAX_FREQ - ENGINE_MIN_FREQ),
            gain: ratio * ENGINE_MAX_GAIN,
        }
    }
}

/// Volume and mute settings shared by effects and the engine hum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixer {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Mixer {
    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = clamp_volume(vol);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = clamp_volume(vol);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Gain applied to one-shot effects
    pub fn effect_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Gain applied to the engine hum at `tone`
    pub fn engine_gain(&self, tone: EngineTone) -> f32 {
        if self.muted {
            0.0
        } else {
            tone.gain * self.master_volume
        }
    }
}

fn clamp_volume(vol: f32) -> f32 {
    if vol.is_finite() { vol.clamp(0.0, 1.0) } else { 0.0 }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{EngineTone, Mixer, SoundEffect};
    use crate::game::{Frame, FrameObserver};
    use crate::sim::GamePhase;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        engine: Option<(OscillatorNode, GainNode)>,
        engine_tone: EngineTone,
        mixer: Mixer,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                engine: None,
                engine_tone: EngineTone::SILENT,
                mixer: Mixer::default(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Set master volume (0.0 - 1.0)
        pub fn set_master_volume(&mut self, vol: f32) {
            self.mixer.set_master_volume(vol);
            self.set_engine(self.engine_tone);
        }

        /// Set SFX volume (0.0 - 1.0)
        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.mixer.set_sfx_volume(vol);
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.mixer.set_muted(muted);
            self.set_engine(self.engine_tone);
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.mixer.effect_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Crash => self.play_crash(ctx, vol),
                SoundEffect::Score => self.play_score(ctx, vol),
                SoundEffect::Beep { high } => self.play_beep(ctx, vol, high),
                SoundEffect::Swoosh => self.play_swoosh(ctx, vol),
            }
        }

        /// Glide the engine hum toward `tone`
        pub fn set_engine(&mut self, tone: EngineTone) {
            self.engine_tone = tone;
            let Some(ctx) = self.ctx.clone() else { return };
            if self.engine.is_none() {
                if tone.gain <= 0.0 {
                    return;
                }
                let Some((osc, gain)) = self.create_osc(&ctx, tone.frequency, OscillatorType::Sawtooth)
                else {
                    return;
                };
                gain.gain().set_value(0.0);
                osc.start().ok();
                self.engine = Some((osc, gain));
            }

            let level = self.mixer.engine_gain(tone);
            if let Some((osc, gain)) = &self.engine {
                let t = ctx.current_time();
                osc.frequency()
                    .set_target_at_time(tone.frequency, t, 0.1)
                    .ok();
                gain.gain().set_target_at_time(level, t, 0.05).ok();
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

        /// Short tone with attack/decay envelope and optional pitch glide
        #[allow(clippy::too_many_arguments)]
        fn play_tone(
            &self,
            ctx: &AudioContext,
            osc_type: OscillatorType,
            freq: f32,
            freq_to: Option<f32>,
            duration: f64,
            volume: f32,
            attack: f64,
            decay: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(freq, t).ok();
            if let Some(to) = freq_to {
                osc.frequency()
                    .linear_ramp_to_value_at_time(to, t + duration)
                    .ok();
            }
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(volume, t + attack)
                .ok();
            gain.gain()
                .linear_ramp_to_value_at_time(0.0, t + attack + decay)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + duration).ok();
        }

        /// Crash - jittering square crunch over a falling sawtooth
        fn play_crash(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            // Noise-like crunch from rapid frequency jumps
            if let Some((osc, gain)) = self.create_osc(ctx, 700.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.5, t).ok();
                gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.35).ok();
                for (i, freq) in [700.0, 1900.0, 350.0, 1400.0, 500.0, 1100.0, 260.0, 900.0]
                    .iter()
                    .enumerate()
                {
                    osc.frequency()
                        .set_value_at_time(*freq, t + i as f64 * 0.04)
                        .ok();
                }
                osc.start().ok();
                osc.stop_with_when(t + 0.35).ok();
            }

            self.play_tone(ctx, OscillatorType::Sawtooth, 120.0, Some(40.0), 0.3, vol * 0.3, 0.001, 0.29);
        }

        /// Score milestone - rising triangle chirp
        fn play_score(&self, ctx: &AudioContext, vol: f32) {
            self.play_tone(ctx, OscillatorType::Triangle, 660.0, Some(880.0), 0.12, vol * 0.2, 0.01, 0.1);
        }

        /// Beep - square blip, octave up for `high`
        fn play_beep(&self, ctx: &AudioContext, vol: f32, high: bool) {
            let freq = if high { 880.0 } else { 440.0 };
            self.play_tone(ctx, OscillatorType::Square, freq, None, 0.08, vol * 0.15, 0.005, 0.07);
        }

        /// Near miss - falling sine swoosh
        fn play_swoosh(&self, ctx: &AudioContext, vol: f32) {
            self.play_tone(ctx, OscillatorType::Sine, 300.0, Some(100.0), 0.18, vol * 0.1, 0.005, 0.17);
        }
    }

    /// Shared handle: the session publishes to it while the page keeps
    /// control of volume and mute
    impl FrameObserver for Rc<RefCell<AudioManager>> {
        fn on_frame(&mut self, frame: &Frame<'_>) {
            self.borrow_mut().on_frame(frame);
        }
    }

    impl FrameObserver for AudioManager {
        fn on_frame(&mut self, frame: &Frame<'_>) {
            for event in frame.events {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.play(effect);
                }
            }
            let tone = if frame.snapshot.phase == GamePhase::Playing {
                EngineTone::for_speed_ratio(frame.speed_ratio)
            } else {
                EngineTone::SILENT
            };
            self.set_engine(tone);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Collision { enemy_id: 3 }),
            Some(SoundEffect::Crash)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::NearMiss { enemy_id: 3 }),
            Some(SoundEffect::Swoosh)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameStart),
            Some(SoundEffect::Beep { high: true })
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::ScoreMilestone { score: 100 }),
            Some(SoundEffect::Score)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::NewHighScore { score: 100 }),
            None
        );
    }

    #[test]
    fn test_engine_tone_tracks_speed() {
        assert_eq!(EngineTone::for_speed_ratio(0.0), EngineTone::SILENT);

        let full = EngineTone::for_speed_ratio(1.0);
        assert!((full.frequency - 260.0).abs() < 1e-4);
        assert!((full.gain - 0.06).abs() < 1e-6);

        let half = EngineTone::for_speed_ratio(0.5);
        assert!((half.frequency - 170.0).abs() < 1e-4);

        assert_eq!(EngineTone::for_speed_ratio(7.0), full);
        assert_eq!(EngineTone::for_speed_ratio(f32::NAN), EngineTone::SILENT);
    }

    #[test]
    fn test_mixer_volume_and_mute() {
        let mut mixer = Mixer::default();
        let full = EngineTone::for_speed_ratio(1.0);
        assert!((mixer.effect_volume() - 0.8).abs() < 1e-6);

        mixer.set_sfx_volume(0.5);
        assert!((mixer.effect_volume() - 0.4).abs() < 1e-6);
        // Effects volume leaves the engine alone
        assert!((mixer.engine_gain(full) - 0.06 * 0.8).abs() < 1e-6);

        mixer.set_master_volume(3.0);
        assert!((mixer.effect_volume() - 0.5).abs() < 1e-6);
        mixer.set_master_volume(f32::NAN);
        assert_eq!(mixer.effect_volume(), 0.0);
        mixer.set_master_volume(1.0);

        mixer.set_muted(true);
        assert!(mixer.is_muted());
        assert_eq!(mixer.effect_volume(), 0.0);
        assert_eq!(mixer.engine_gain(full), 0.0);

        mixer.set_muted(false);
        assert!((mixer.engine_gain(full) - 0.06).abs() < 1e-6);
    }
}
