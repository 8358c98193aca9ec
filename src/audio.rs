//! Audio events
//!
//! The core only names sounds; playback lives behind `AudioSink`. The
//! `AudioManager` applies volume settings and keeps track of whether the
//! gameplay loop is currently playing.

use crate::sim::GameEvent;

/// Sound event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    /// Player left the ground
    Jump,
    /// Start the looping gameplay music
    GameplayLoopStart,
    /// Stop the looping gameplay music
    GameplayLoopStop,
    /// One-shot sting when the player falls out of view
    GameOver,
}

impl SoundEvent {
    /// Mix level of the sound relative to its channel
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEvent::Jump => 0.3,
            SoundEvent::GameplayLoopStart | SoundEvent::GameplayLoopStop => 0.2,
            SoundEvent::GameOver => 0.5,
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, SoundEvent::GameplayLoopStart | SoundEvent::GameplayLoopStop)
    }
}

/// Sounds triggered by a simulation event, in the order they should fire
pub fn sounds_for(event: &GameEvent) -> &'static [SoundEvent] {
    match event {
        GameEvent::SessionCreated => &[SoundEvent::GameplayLoopStart],
        GameEvent::Jumped => &[SoundEvent::Jump],
        GameEvent::GameOver { .. } => &[SoundEvent::GameOver, SoundEvent::GameplayLoopStop],
        GameEvent::Started | GameEvent::Landed { .. } | GameEvent::SpeedUp { .. } => &[],
    }
}

/// Playback backend; fire-and-forget
pub trait AudioSink {
    fn play(&mut self, event: SoundEvent, volume: f32);
}

/// Backend that just logs; used when no audio device is wired up
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, event: SoundEvent, volume: f32) {
        log::debug!("Sound {event:?} at volume {volume:.2}");
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogAudio))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_playing: false,
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

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    fn effective_volume(&self, event: SoundEvent) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if event.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel * event.base_volume()
    }

    /// Play a sound event.
    ///
    /// Loop start/stop are forwarded even when muted so the backend's
    /// music state stays in sync.
    pub fn play(&mut self, event: SoundEvent) {
        match event {
            SoundEvent::GameplayLoopStart => {
                if self.music_playing {
                    return;
                }
                self.music_playing = true;
            }
            SoundEvent::GameplayLoopStop => {
                if !self.music_playing {
                    return;
                }
                self.music_playing = false;
            }
            _ => {}
        }

        let vol = self.effective_volume(event);
        if vol <= 0.0 && !event.is_music() {
            return;
        }
        self.sink.play(event, vol);
    }

    /// Play every sound attached to a simulation event
    pub fn handle(&mut self, event: &GameEvent) {
        for sound in sounds_for(event) {
            self.play(*sound);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Sink that records every forwarded sound
    #[derive(Clone, Default)]
    pub(crate) struct Recorder(pub Rc<RefCell<Vec<(SoundEvent, f32)>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, event: SoundEvent, volume: f32) {
            self.0.borrow_mut().push((event, volume));
        }
    }

    #[test]
    fn test_volumes_multiply() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(1.0);
        audio.play(SoundEvent::Jump);

        let played = recorder.0.borrow();
        assert_eq!(played.len(), 1);
        assert!((played[0].1 - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_muted_skips_effects() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_muted(true);
        audio.play(SoundEvent::Jump);
        audio.play(SoundEvent::GameplayLoopStart);

        let played = recorder.0.borrow();
        assert_eq!(played.as_slice(), &[(SoundEvent::GameplayLoopStart, 0.0)]);
    }

    #[test]
    fn test_loop_start_and_stop_are_idempotent() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.play(SoundEvent::GameplayLoopStart);
        audio.play(SoundEvent::GameplayLoopStart);
        assert!(audio.music_playing());
        audio.play(SoundEvent::GameplayLoopStop);
        audio.play(SoundEvent::GameplayLoopStop);
        assert!(!audio.music_playing());
        assert_eq!(recorder.0.borrow().len(), 2);
    }

    #[test]
    fn test_game_over_stops_music() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.handle(&GameEvent::SessionCreated);
        audio.handle(&GameEvent::GameOver { score: 3 });

        let events: Vec<_> = recorder.0.borrow().iter().map(|(e, _)| *e).collect();
        assert_eq!(
            events,
            vec![
                SoundEvent::GameplayLoopStart,
                SoundEvent::GameOver,
                SoundEvent::GameplayLoopStop
            ]
        );
    }
}
