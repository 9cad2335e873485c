//! Platform-agnostic audio output trait
//!
//! Abstracts the one audio element the player drives (an HTML media
//! element, a native stream, a test double). The engine is its only caller.

use crate::error::Result;
use crate::types::Epoch;
use serde::{Deserialize, Serialize};

/// Result of asking the output to start playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Audio is playing now
    Started,

    /// Start was accepted but waits on the source (buffering). The output
    /// reports `AudioEventKind::Started` or `Failed` later.
    Pending,
}

/// Audio output driven by the playback engine
///
/// Implementors report asynchronous progress (metadata, position, end,
/// failures) as [`AudioEvent`]s tagged with the epoch passed to the last
/// [`load`](AudioOutput::load). The embedding feeds those events back into
/// the engine from its event loop.
pub trait AudioOutput: Send {
    /// Bind a new source, replacing the previous one.
    ///
    /// Any event later reported for this source must carry `epoch`.
    fn load(&mut self, url: &str, epoch: Epoch) -> Result<()>;

    /// Start or resume playback of the bound source
    fn play(&mut self) -> Result<StartOutcome>;

    /// Pause playback, keeping position
    fn pause(&mut self);

    /// Seek to `position` seconds.
    ///
    /// Returns the position actually reached (outputs clamp to the source
    /// length).
    fn seek(&mut self, position: f64) -> Result<f64>;

    /// Set linear output gain (0.0 = silent, 1.0 = full volume)
    fn set_volume(&mut self, gain: f32);

    /// Unbind the source and go silent
    fn stop(&mut self);
}

/// Something the audio output observed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AudioEventKind {
    /// Source length became known
    MetadataLoaded {
        /// Length in seconds
        duration: f64,
    },

    /// Periodic position report while playing
    TimeUpdate {
        /// Position in seconds
        position: f64,
    },

    /// A pending start completed
    Started,

    /// Playback reached the end of the source
    Ended,

    /// Source failed to load or play
    Failed {
        /// Human-readable reason
        message: String,
    },
}

/// Output callback tagged with the load it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioEvent {
    /// Load generation the event was issued under
    pub epoch: Epoch,

    /// What happened
    pub kind: AudioEventKind,
}

impl AudioEvent {
    /// Tag `kind` with `epoch`
    pub fn new(epoch: Epoch, kind: AudioEventKind) -> Self {
        Self { epoch, kind }
    }
}

/// Output that plays nothing.
///
/// Used by headless front-ends that drive the transport (and its play
/// reporting) without producing sound. Every start succeeds immediately and
/// seeks are clamped to zero because no source length is ever known.
#[derive(Debug, Default)]
pub struct NullOutput {
    url: Option<String>,
    epoch: Epoch,
    playing: bool,
    gain: f32,
}

impl NullOutput {
    /// Create a silent output
    pub fn new() -> Self {
        Self::default()
    }

    /// Source currently bound
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Epoch of the last load
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Whether `play` was called more recently than `pause`/`stop`
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Last gain applied
    pub fn gain(&self) -> f32 {
        self.gain
    }
}

impl AudioOutput for NullOutput {
    fn load(&mut self, url: &str, epoch: Epoch) -> Result<()> {
        self.url = Some(url.to_string());
        self.epoch = epoch;
        self.playing = false;
        Ok(())
    }

    fn play(&mut self) -> Result<StartOutcome> {
        if self.url.is_none() {
            return Err(crate::error::PlaybackError::NoTrackLoaded);
        }
        self.playing = true;
        Ok(StartOutcome::Started)
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, _position: f64) -> Result<f64> {
        Ok(0.0)
    }

    fn set_volume(&mut self, gain: f32) {
        self.gain = gain;
    }

    fn stop(&mut self) {
        self.url = None;
        self.playing = false;
    }
}
