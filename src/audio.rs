//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and ambience - no external files needed!

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A balloon popped
    Pop,
    /// Arrow fell past the bottom
    Loss,
    /// Last balloon popped
    Win,
}

impl SoundEffect {
    /// Cue for a simulation event (one per event)
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::BalloonPopped { .. } => SoundEffect::Pop,
            GameEvent::Lost { .. } => SoundEffect::Loss,
            GameEvent::Won { .. } => SoundEffect::Win,
        }
    }
}

/// Volume state shared by effects and the ambience loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioMix {
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    ambience_paused: bool,
}

impl AudioMix {
    pub fn new(settings: &Settings) -> Self {
        Self {
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            muted: false,
            ambience_paused: false,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip mute; returns the new state
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Returns whether the state changed
    pub fn set_ambience_paused(&mut self, paused: bool) -> bool {
        let changed = self.ambience_paused != paused;
        self.ambience_paused = paused;
        changed
    }

    pub fn sfx_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    pub fn music_volume(&self) -> f32 {
        if self.muted || self.ambience_paused {
            0.0
        } else {
            self.music_volume
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioMix, SoundEffect};
    use crate::settings::Settings;

    /// Looping background drone
    struct Ambience {
        oscillators: Vec<OscillatorNode>,
        gain: GainNode,
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        mix: AudioMix,
        ambience: Option<Ambience>,
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
                mix: AudioMix::new(settings),
                ambience: None,
            }
        }

        /// Resume audio context and start the ambience (required after user gesture)
        pub fn resume(&mut self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
            if self.ambience.is_none() {
                self.start_ambience();
            }
        }

        /// Mute/unmute all audio; returns the new state
        pub fn toggle_muted(&mut self) -> bool {
            let muted = self.mix.toggle_muted();
            log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
            self.apply_ambience_gain();
            muted
        }

        /// Pause or resume the ambience loop (page hidden/visible)
        pub fn set_ambience_paused(&mut self, paused: bool) {
            if self.mix.set_ambience_paused(paused) {
                log::debug!("Ambience {}", if paused { "paused" } else { "resumed" });
            }
            self.apply_ambience_gain();
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.mix.sfx_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Pop => self.play_pop(ctx, vol),
                SoundEffect::Loss => self.play_loss(ctx, vol),
                SoundEffect::Win => self.play_win(ctx, vol),
            }
        }

        // === Sound generators ===

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

        /// Pop - short bright snap with a low thump
        fn play_pop(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.06)
                    .ok();
                osc.frequency().set_value_at_time(900.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(250.0, t + 0.05)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.08).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.4, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.12).ok();
            }
        }

        /// Loss - sad descending
        fn play_loss(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }

        /// Win - rising fanfare
        fn play_win(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
                let delay = i as f64 * 0.1;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.5).ok();
                }
            }
        }

        /// Start the arcade drone: two detuned low oscillators into one gain
        fn start_ambience(&mut self) {
            let Some(ctx) = &self.ctx else { return };
            let Ok(gain) = ctx.create_gain() else {
                log::warn!("Failed to create ambience gain node");
                return;
            };
            if gain.connect_with_audio_node(&ctx.destination()).is_err() {
                log::warn!("Failed to connect ambience");
                return;
            }

            let mut oscillators = Vec::new();
            for (freq, osc_type) in [
                (110.0, OscillatorType::Triangle),
                (110.6, OscillatorType::Sine),
                (164.8, OscillatorType::Sine),
            ] {
                let Ok(osc) = ctx.create_oscillator() else { continue };
                osc.set_type(osc_type);
                osc.frequency().set_value(freq);
                if osc.connect_with_audio_node(&gain).is_ok() {
                    osc.start().ok();
                    oscillators.push(osc);
                }
            }

            log::info!("Ambience started ({} voices)", oscillators.len());
            self.ambience = Some(Ambience { oscillators, gain });
            self.apply_ambience_gain();
        }

        fn apply_ambience_gain(&self) {
            if let Some(ambience) = &self.ambience {
                // Drone sits well under the effects
                ambience
                    .gain
                    .gain()
                    .set_value(self.mix.music_volume() * 0.15);
            }
        }
    }

    impl Drop for AudioManager {
        fn drop(&mut self) {
            if let Some(ambience) = self.ambience.take() {
                for osc in ambience.oscillators {
                    osc.stop().ok();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BalloonColor;
    use glam::Vec2;

    #[test]
    fn test_cue_per_event() {
        let pop = GameEvent::BalloonPopped {
            pos: Vec2::ZERO,
            color: BalloonColor::Violet,
        };
        assert_eq!(SoundEffect::for_event(&pop), SoundEffect::Pop);
        assert_eq!(SoundEffect::for_event(&GameEvent::Lost { score: 0 }), SoundEffect::Loss);
        assert_eq!(SoundEffect::for_event(&GameEvent::Won { score: 100 }), SoundEffect::Win);
    }

    #[test]
    fn test_mute_silences_everything() {
        let mut mix = AudioMix::new(&Settings::default());
        assert!((mix.sfx_volume() - 0.8).abs() < 1e-6);
        assert!((mix.music_volume() - 0.24).abs() < 1e-6);

        assert!(mix.toggle_muted());
        assert_eq!(mix.sfx_volume(), 0.0);
        assert_eq!(mix.music_volume(), 0.0);

        assert!(!mix.toggle_muted());
        assert!(!mix.is_muted());
        assert!(mix.sfx_volume() > 0.0);
    }

    #[test]
    fn test_hidden_page_pauses_only_ambience() {
        let mut mix = AudioMix::new(&Settings::default());
        assert!(mix.set_ambience_paused(true));
        assert!(!mix.set_ambience_paused(true));
        assert_eq!(mix.music_volume(), 0.0);
        assert!(mix.sfx_volume() > 0.0);

        mix.set_ambience_paused(false);
        assert!(mix.music_volume() > 0.0);
    }
}
