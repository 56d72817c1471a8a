//! Audio capability used by the game loop.
//!
//! Playback is fire-and-forget: implementations swallow their own failures so
//! that a missing sound device never affects gameplay.

#[cfg(feature = "audio")]
mod rodio_backend;

#[cfg(feature = "audio")]
pub use rodio_backend::RodioAudio;

/// Short sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Jump,
    Pickup,
    GameOver,
}

impl Cue {
    /// Playback volume for the cue.
    pub fn volume(&self) -> f32 {
        match self {
            Cue::GameOver => crate::constants::GAME_OVER_VOLUME,
            Cue::Jump | Cue::Pickup => crate::constants::CUE_VOLUME,
        }
    }
}

/// Something that can play the game's sounds.
pub trait AudioPlayer {
    /// Play a cue from its beginning, cutting off any earlier instance.
    fn play_cue(&mut self, cue: Cue);

    /// Start (or resume) the looping background track.
    fn resume_music(&mut self);

    /// Pause the background track, keeping its position.
    fn pause_music(&mut self);

    /// Pause the background track and rewind it to the start.
    fn stop_music(&mut self);
}

/// An audio player that plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioPlayer for SilentAudio {
    fn play_cue(&mut self, _cue: Cue) {}
    fn resume_music(&mut self) {}
    fn pause_music(&mut self) {}
    fn stop_music(&mut self) {}
}

/// Pick the best available backend, falling back to silence.
pub fn default_player() -> Box<dyn AudioPlayer> {
    #[cfg(feature = "audio")]
    {
        match RodioAudio::new() {
            Ok(player) => return Box::new(player),
            Err(e) => log::warn!("Audio output unavailable, continuing silently: {}", e),
        }
    }
    Box::new(SilentAudio)
}
