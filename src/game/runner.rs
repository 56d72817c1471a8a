//! The frame-driven game loop.
//!
//! Owns the session together with its injected capabilities (score store and
//! audio player) and turns commands and elapsed time into session updates.

use rand::Rng;

use super::logic::{self, FrameEvent, RunSummary};
use super::types::{Field, GameSession, RunMode};
use crate::audio::{AudioPlayer, Cue};
use crate::constants::{FRAME_INTERVAL_MS, MAX_FRAME_CATCHUP_MS};
use crate::storage::{load_best_score, save_best_score, KeyValueStore};

/// UI-agnostic commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a run from the start screen, or restart after game over.
    Start,
    /// Flap upward.
    Jump,
    ToggleSound,
}

pub struct GameLoop {
    pub session: GameSession,
    store: Box<dyn KeyValueStore>,
    audio: Box<dyn AudioPlayer>,
    frame_interval_ms: u64,
    /// Milliseconds not yet consumed by a whole frame.
    accumulated_ms: u64,
    /// Summary of the last finished run, for the game-over screen.
    last_run: Option<RunSummary>,
}

impl GameLoop {
    /// Build the loop, reading the best score from `store`.
    pub fn new(
        field: Field,
        store: Box<dyn KeyValueStore>,
        audio: Box<dyn AudioPlayer>,
        sound_enabled: bool,
    ) -> Self {
        let best = load_best_score(store.as_ref());
        log::info!("Loaded best score {}", best);
        Self {
            session: GameSession::new(field, best, sound_enabled),
            store,
            audio,
            frame_interval_ms: FRAME_INTERVAL_MS,
            accumulated_ms: 0,
            last_run: None,
        }
    }

    pub fn with_frame_interval(mut self, frame_interval_ms: u64) -> Self {
        self.frame_interval_ms = frame_interval_ms.max(1);
        self
    }

    pub fn last_run(&self) -> Option<&RunSummary> {
        self.last_run.as_ref()
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Apply a command at wall-clock time `now_ms`.
    pub fn handle(&mut self, command: Command, now_ms: u64) {
        match command {
            Command::Start => self.start(now_ms),
            Command::Jump => {
                if logic::try_jump(&mut self.session, now_ms) && self.session.sound_enabled {
                    self.audio.play_cue(Cue::Jump);
                }
            }
            Command::ToggleSound => {
                let enabled = logic::toggle_sound(&mut self.session);
                log::info!("Sound {}", if enabled { "on" } else { "off" });
                if enabled && self.session.is_playing() {
                    self.audio.resume_music();
                } else {
                    self.audio.pause_music();
                }
            }
        }
    }

    fn start(&mut self, now_ms: u64) {
        if !logic::start_run(&mut self.session, now_ms) {
            return;
        }
        self.accumulated_ms = 0;
        self.last_run = None;
        log::info!("Run started");
        if self.session.sound_enabled {
            self.audio.resume_music();
        }
    }

    /// Feed `elapsed_ms` of wall-clock time and step as many whole frames as
    /// fit. A single call never catches up more than a short burst, so a
    /// stalled terminal does not fast-forward the run. Returns the number of
    /// frames stepped.
    pub fn advance<R: Rng>(&mut self, elapsed_ms: u64, now_ms: u64, rng: &mut R) -> u32 {
        if !self.session.is_playing() {
            self.accumulated_ms = 0;
            return 0;
        }

        self.accumulated_ms += elapsed_ms.min(MAX_FRAME_CATCHUP_MS);
        let mut frames = 0;
        while self.accumulated_ms >= self.frame_interval_ms {
            self.accumulated_ms -= self.frame_interval_ms;
            frames += 1;
            if !self.step(now_ms, rng) {
                self.accumulated_ms = 0;
                break;
            }
        }
        frames
    }

    /// Step one frame and react to its events. Returns false once the run is over.
    pub fn step<R: Rng>(&mut self, now_ms: u64, rng: &mut R) -> bool {
        for event in logic::step_frame(&mut self.session, now_ms, rng) {
            match event {
                FrameEvent::ObstaclePassed => {}
                FrameEvent::CoinCollected => {
                    if self.session.sound_enabled {
                        self.audio.play_cue(Cue::Pickup);
                    }
                }
                FrameEvent::RunEnded(summary) => self.finish(summary),
            }
        }
        self.session.mode == RunMode::Playing
    }

    fn finish(&mut self, summary: RunSummary) {
        log::info!(
            "Run ended ({:?}) with score {} (best {})",
            summary.cause,
            summary.final_score,
            self.session.best_score
        );
        self.audio.stop_music();

        if summary.new_best {
            if let Err(e) = save_best_score(self.store.as_mut(), summary.final_score) {
                log::warn!("Could not persist best score: {}", e);
            }
        }
        if self.session.sound_enabled {
            self.audio.play_cue(Cue::GameOver);
        }
        self.last_run = Some(summary);
    }

    /// Forget the stored best score. Returns `false` when the store only
    /// lives in memory, so nothing on disk was cleared.
    pub fn reset_best(&mut self) -> std::io::Result<bool> {
        self.session.best_score = 0;
        self.store.remove(crate::constants::HIGH_SCORE_KEY)?;
        Ok(self.store.is_persistent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::storage::{JsonFileStore, MemoryStore};
    use rand::rngs::mock::StepRng;

    fn new_loop() -> GameLoop {
        GameLoop::new(
            Field::default(),
            Box::new(MemoryStore::default()),
            Box::new(SilentAudio),
            true,
        )
    }

    #[test]
    fn test_advance_steps_whole_frames() {
        let mut game = new_loop();
        game.handle(Command::Start, 0);
        let mut rng = StepRng::new(u64::MAX, 0);

        assert_eq!(game.advance(40, 40, &mut rng), 2);
        assert_eq!(game.session.frame_count, 2);
        // 8ms left over plus 8ms more completes a third frame.
        assert_eq!(game.advance(8, 48, &mut rng), 1);
        assert_eq!(game.session.frame_count, 3);
    }

    #[test]
    fn test_advance_clamps_catchup() {
        let mut game = new_loop();
        game.handle(Command::Start, 0);
        let mut rng = StepRng::new(u64::MAX, 0);

        assert_eq!(game.advance(10_000, 10_000, &mut rng), 6);
    }

    #[test]
    fn test_advance_idle_does_nothing() {
        let mut game = new_loop();
        let mut rng = StepRng::new(u64::MAX, 0);
        assert_eq!(game.advance(100, 100, &mut rng), 0);
        assert_eq!(game.session.mode, RunMode::Idle);
    }

    #[test]
    fn test_reset_best() {
        let mut store = MemoryStore::default();
        save_best_score(&mut store, 30).unwrap();
        let mut game = GameLoop::new(Field::default(), Box::new(store), Box::new(SilentAudio), false);
        assert_eq!(game.session.best_score, 30);

        // Cleared in memory, but nothing durable was touched.
        assert!(!game.reset_best().unwrap());
        assert_eq!(game.session.best_score, 0);
    }

    #[test]
    fn test_reset_best_clears_score_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(crate::constants::SCORES_FILE);
        let mut store = JsonFileStore::open(&path);
        save_best_score(&mut store, 30).unwrap();
        let mut game = GameLoop::new(Field::default(), Box::new(store), Box::new(SilentAudio), false);

        assert!(game.reset_best().unwrap());
        assert_eq!(load_best_score(&JsonFileStore::open(&path)), 0);
    }
}
