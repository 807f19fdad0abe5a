//! One-shot sound effects
//!
//! Two short clips are loaded from the working directory at startup and
//! played as detached rodio sinks. Every failure path degrades to silence:
//! a missing output device, a missing file, or undecodable data just means
//! the game runs without that sound.

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs;
use std::io::Cursor;

const PICKUP_FILE: &str = "pickup.wav";
const CRASH_FILE: &str = "crash.wav";

// The clips are loud; keep them in the background
const VOLUME: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// The snake ate a flower
    Pickup,
    /// The snake hit the wall or itself
    Crash,
}

pub struct Audio {
    // None when muted or when no output device exists
    output: Option<(OutputStream, OutputStreamHandle)>,
    pickup: Option<Vec<u8>>,
    crash: Option<Vec<u8>>,
}

impl Audio {
    /// Open the default output device and load the clips
    pub fn new() -> Self {
        Self {
            output: OutputStream::try_default().ok(),
            pickup: fs::read(PICKUP_FILE).ok(),
            crash: fs::read(CRASH_FILE).ok(),
        }
    }

    /// An audio handle that never makes a sound
    pub fn muted() -> Self {
        Self {
            output: None,
            pickup: None,
            crash: None,
        }
    }

    /// Fire-and-forget playback; the sink outlives the call
    pub fn play(&self, effect: SoundEffect) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        let bytes = match effect {
            SoundEffect::Pickup => &self.pickup,
            SoundEffect::Crash => &self.crash,
        };
        let Some(bytes) = bytes else {
            return;
        };

        if let Ok(sink) = Sink::try_new(handle) {
            if let Ok(source) = Decoder::new(Cursor::new(bytes.clone())) {
                sink.set_volume(VOLUME);
                sink.append(source);
                sink.detach();
            }
        }
    }
}

impl Default for Audio {
    fn default() -> Self {
        Self::new()
    }
}
