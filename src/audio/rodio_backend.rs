//! Native audio output through rodio. Every sound is synthesised on startup.

use std::collections::HashMap;
use std::f32::consts::TAU;

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source, StreamError};

use super::{AudioPlayer, Cue};
use crate::constants::MUSIC_VOLUME;

const SAMPLE_RATE: u32 = 44_100;

/// Background loop melody: (frequency Hz, seconds).
const MELODY: [(f32, f32); 8] = [
    (523.25, 0.2),
    (659.25, 0.2),
    (783.99, 0.2),
    (659.25, 0.2),
    (587.33, 0.2),
    (698.46, 0.2),
    (880.00, 0.2),
    (698.46, 0.2),
];

pub struct RodioAudio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    cues: HashMap<Cue, Vec<f32>>,
    /// One sink per cue so replaying a cue cuts off the previous instance.
    cue_sinks: HashMap<Cue, Sink>,
    music: Option<Sink>,
}

impl RodioAudio {
    pub fn new() -> Result<Self, StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        let cues = HashMap::from([
            (Cue::Jump, sweep(400.0, 800.0, 0.12)),
            (Cue::Pickup, two_note(520.0, 680.0)),
            (Cue::GameOver, sweep(400.0, 80.0, 0.5)),
        ]);
        Ok(Self {
            _stream: stream,
            handle,
            cues,
            cue_sinks: HashMap::new(),
            music: None,
        })
    }

    fn music_sink(&mut self) -> Option<&Sink> {
        if self.music.is_none() {
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    let source = SamplesBuffer::new(1, SAMPLE_RATE, melody()).repeat_infinite();
                    sink.set_volume(MUSIC_VOLUME);
                    sink.append(source);
                    sink.pause();
                    self.music = Some(sink);
                }
                Err(e) => log::debug!("Could not create music sink: {}", e),
            }
        }
        self.music.as_ref()
    }
}

impl AudioPlayer for RodioAudio {
    fn play_cue(&mut self, cue: Cue) {
        let Some(samples) = self.cues.get(&cue) else {
            return;
        };
        if let Some(previous) = self.cue_sinks.remove(&cue) {
            previous.stop();
        }
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(cue.volume());
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.clone()));
                self.cue_sinks.insert(cue, sink);
            }
            Err(e) => log::debug!("Dropping {:?} cue: {}", cue, e),
        }
    }

    fn resume_music(&mut self) {
        if let Some(sink) = self.music_sink() {
            sink.play();
        }
    }

    fn pause_music(&mut self) {
        if let Some(sink) = &self.music {
            sink.pause();
        }
    }

    fn stop_music(&mut self) {
        // Dropping the sink discards its position; the next resume starts over.
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }
}

fn sweep(from_hz: f32, to_hz: f32, seconds: f32) -> Vec<f32> {
    let count = (SAMPLE_RATE as f32 * seconds).round() as usize;
    let mut phase = 0.0f32;
    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            let freq = from_hz + (to_hz - from_hz) * t;
            phase += TAU * freq / SAMPLE_RATE as f32;
            phase.sin() * 0.2 * (1.0 - t)
        })
        .collect()
}

fn tone(freq: f32, seconds: f32, gain: f32) -> impl Iterator<Item = f32> {
    let count = (SAMPLE_RATE as f32 * seconds).round() as usize;
    (0..count).map(move |i| {
        let t = i as f32 / SAMPLE_RATE as f32;
        let fade = 1.0 - i as f32 / count as f32;
        (TAU * freq * t).sin() * gain * fade
    })
}

fn two_note(first: f32, second: f32) -> Vec<f32> {
    tone(first, 0.1, 0.15).chain(tone(second, 0.15, 0.15)).collect()
}

fn melody() -> Vec<f32> {
    MELODY
        .iter()
        .flat_map(|&(freq, seconds)| tone(freq, seconds, 0.08))
        .collect()
}
