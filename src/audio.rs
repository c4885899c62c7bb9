//! Audio cues using Web Audio API
//!
//! Short sine beeps, no sound files. Failures (no AudioContext, blocked
//! autoplay) are swallowed here and never reach the game. Native builds have
//! no output device and only log the cues.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::game::GameEvent;
use crate::settings::Settings;

/// A single sine tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency (Hz)
    pub freq: f32,
    /// Length (seconds)
    pub duration: f64,
    /// Gain before master/sfx volume
    pub gain: f32,
    /// Offset from the cue start (seconds)
    pub delay: f64,
}

impl Tone {
    const fn new(freq: f32, duration: f64, gain: f32, delay: f64) -> Self {
        Self {
            freq,
            duration,
            gain,
            delay,
        }
    }
}

const START_TONES: [Tone; 1] = [Tone::new(880.0, 0.05, 0.04, 0.0)];
const MILESTONE_TONES: [Tone; 1] = [Tone::new(880.0, 0.05, 0.04, 0.0)];
const COLLISION_TONES: [Tone; 1] = [Tone::new(160.0, 0.4, 0.08, 0.0)];
const NEW_RECORD_TONES: [Tone; 3] = [
    Tone::new(660.0, 0.08, 0.04, 0.45),
    Tone::new(880.0, 0.08, 0.04, 0.55),
    Tone::new(1320.0, 0.12, 0.04, 0.65),
];

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// New run started
    Start,
    /// Score crossed a multiple of ten
    Milestone,
    /// Player hit an obstacle
    Collision,
    /// Run beat the high score (plays after the collision thud)
    NewRecord,
}

impl SoundEffect {
    /// Cue for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started => Some(SoundEffect::Start),
            GameEvent::Milestone { .. } => Some(SoundEffect::Milestone),
            GameEvent::Collided { .. } => Some(SoundEffect::Collision),
            GameEvent::NewRecord { .. } => Some(SoundEffect::NewRecord),
            GameEvent::Scored { .. } | GameEvent::Paused | GameEvent::Resumed => None,
        }
    }

    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::Start => &START_TONES,
            SoundEffect::Milestone => &MILESTONE_TONES,
            SoundEffect::Collision => &COLLISION_TONES,
            SoundEffect::NewRecord => &NEW_RECORD_TONES,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Create a manager configured from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play the cues for a batch of game events. Returns how many cues fired.
    pub fn handle_events(&self, events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter_map(SoundEffect::for_event)
            .filter(|effect| self.play(*effect))
            .count()
    }

    /// Play a sound effect. Returns false when nothing was emitted.
    pub fn play(&self, effect: SoundEffect) -> bool {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return false;
        }
        self.emit(effect, vol)
    }

    #[cfg(target_arch = "wasm32")]
    fn emit(&self, effect: SoundEffect, vol: f32) -> bool {
        let Some(ctx) = &self.ctx else { return false };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let mut played = false;
        for tone in effect.tones() {
            played |= self.play_tone(ctx, tone, vol).is_some();
        }
        played
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn emit(&self, effect: SoundEffect, vol: f32) -> bool {
        log::trace!("cue {:?} at volume {:.2}", effect, vol);
        true
    }

    /// Create an oscillator with gain envelope
    #[cfg(target_arch = "wasm32")]
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

    /// Schedule one beep
    #[cfg(target_arch = "wasm32")]
    fn play_tone(&self, ctx: &AudioContext, tone: &Tone, vol: f32) -> Option<()> {
        let (osc, gain) = self.create_osc(ctx, tone.freq, OscillatorType::Sine)?;
        let t = ctx.current_time() + tone.delay;

        gain.gain().set_value_at_time(tone.gain * vol, t).ok()?;
        osc.start_with_when(t).ok()?;
        osc.stop_with_when(t + tone.duration).ok()?;
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_mapping() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Started), Some(SoundEffect::Start));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Milestone { score: 10 }),
            Some(SoundEffect::Milestone)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Collided { score: 3 }),
            Some(SoundEffect::Collision)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::NewRecord { score: 3 }),
            Some(SoundEffect::NewRecord)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::Scored { score: 1 }), None);
        assert_eq!(SoundEffect::for_event(&GameEvent::Paused), None);
    }

    #[test]
    fn test_collision_is_low_and_long() {
        let tone = SoundEffect::Collision.tones()[0];
        assert_eq!(tone.freq, 160.0);
        assert_eq!(tone.duration, 0.4);
        assert!(tone.freq < SoundEffect::Milestone.tones()[0].freq);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new();
        let events = [
            GameEvent::Scored { score: 10 },
            GameEvent::Milestone { score: 10 },
            GameEvent::Collided { score: 10 },
        ];
        assert_eq!(audio.handle_events(&events), 2);

        audio.set_muted(true);
        assert_eq!(audio.handle_events(&events), 0);
        assert!(!audio.play(SoundEffect::Start));
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let audio = AudioManager::from_settings(&settings);
        assert!(audio.is_muted());

        let mut quiet = AudioManager::new();
        quiet.set_master_volume(0.0);
        assert!(!quiet.play(SoundEffect::Milestone));
    }
}
