//! Playback engine - the single audio transport
//!
//! Owns the one [`AudioOutput`] of the application. Every surface that wants
//! to play, pause, seek or change volume goes through this type; none of
//! them touch the output directly.

use crate::{
    events::{seconds_to_ms, PlaybackEvent},
    output::{AudioEvent, AudioEventKind, AudioOutput, StartOutcome},
    remote::{RemoteQueue, RemoteRequest},
    shortcuts::{FocusProbe, Key, ShortcutBinding},
    types::{Epoch, PlaybackConfig, TransportSnapshot, TransportState},
    volume::Volume,
};
use jam_core::types::Track;
use tracing::{debug, info, warn};

/// Central playback management
///
/// State machine:
///
/// ```text
/// Empty -> Loading(t) -> Playing(t) <-> Paused(t)
/// Playing(t) --end--> Paused(t, 0)
/// Loading(t) --failure--> Paused(t)
/// any --other track--> Loading(new)
/// any --stop--> Empty
/// ```
pub struct PlaybackEngine {
    // State
    state: TransportState,
    current_track: Option<Track>,
    current_time: f64,
    duration: f64,

    // Settings
    volume: Volume,

    // Load generation, bumped on every source change
    epoch: Epoch,

    output: Box<dyn AudioOutput>,
    remote: RemoteQueue,
    shortcuts: Option<ShortcutBinding>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackEngine {
    /// Create new playback engine
    pub fn new(config: PlaybackConfig, output: Box<dyn AudioOutput>, remote: RemoteQueue) -> Self {
        let mut volume = Volume::new(config.volume);
        if config.muted {
            volume.mute();
        }

        let mut engine = Self {
            state: TransportState::Empty,
            current_track: None,
            current_time: 0.0,
            duration: 0.0,
            volume,
            epoch: Epoch::default(),
            output,
            remote,
            shortcuts: None,
            pending_events: Vec::new(),
        };
        engine.output.set_volume(engine.volume.gain());
        engine
    }

    // ===== Playback Control =====

    /// Play `track`, or pause/resume it if it is already current.
    ///
    /// Switching to a different track queues one play report for it. Output
    /// failures are logged and leave the track current but not playing.
    pub fn toggle_play_pause(&mut self, track: &Track) {
        let is_current = self
            .current_track
            .as_ref()
            .is_some_and(|current| current.id == track.id);

        if is_current {
            self.toggle_current();
        } else {
            self.switch_to(track);
        }
    }

    /// Pause or resume the current track. No-op without one.
    pub fn toggle_current(&mut self) {
        match self.state {
            TransportState::Playing => {
                self.output.pause();
                self.set_state(TransportState::Paused);
            }
            TransportState::Loading => {
                // Cancels a pending start; its late confirmation is dropped
                self.output.pause();
                self.set_state(TransportState::Paused);
            }
            TransportState::Paused => self.start_output(),
            TransportState::Empty => {
                debug!("Toggle without a current track ignored");
            }
        }
    }

    /// Seek the current track to `position` seconds.
    ///
    /// No-op without a current track. The reported position is the one the
    /// output reached, clamped to the known duration.
    pub fn update_time(&mut self, position: f64) {
        if self.current_track.is_none() {
            debug!(position, "Seek without a current track ignored");
            return;
        }

        let target = if position.is_finite() {
            position.max(0.0)
        } else {
            0.0
        };

        match self.output.seek(target) {
            Ok(reached) => {
                self.current_time = self.clamp_time(reached);
                self.emit_position_update();
            }
            Err(err) => {
                warn!(position = target, error = %err, "Seek failed");
            }
        }
    }

    /// Rewind the current track and play it from the start.
    pub fn restart(&mut self) {
        if self.current_track.is_none() {
            return;
        }

        self.update_time(0.0);
        if self.state != TransportState::Playing {
            self.start_output();
        }
    }

    /// Unbind the current track and go silent.
    ///
    /// Output callbacks still in flight for the old source are ignored.
    pub fn stop(&mut self) {
        if let Some(track) = self.current_track.take() {
            info!(track_id = %track.id, "Stopping playback");
        }
        self.output.stop();
        self.epoch = self.epoch.next();
        self.current_time = 0.0;
        self.duration = 0.0;
        self.set_state(TransportState::Empty);
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0, clamped). Persists across track changes.
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    /// Get current volume level (0.0-1.0)
    pub fn get_volume(&self) -> f32 {
        self.volume.level()
    }

    /// Mute audio
    pub fn mute(&mut self) {
        self.volume.mute();
        self.apply_volume();
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.apply_volume();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    // ===== Output Callbacks =====

    /// Apply an observation reported by the audio output.
    ///
    /// Events from an older load are discarded. Returns whether the event
    /// was applied.
    pub fn handle_audio_event(&mut self, event: AudioEvent) -> bool {
        if event.epoch != self.epoch || self.current_track.is_none() {
            debug!(
                event_epoch = event.epoch.value(),
                current_epoch = self.epoch.value(),
                kind = ?event.kind,
                "Ignoring stale audio event"
            );
            return false;
        }

        match event.kind {
            AudioEventKind::MetadataLoaded { duration } => {
                self.duration = if duration.is_finite() && duration > 0.0 {
                    duration
                } else {
                    0.0
                };
                self.current_time = self.clamp_time(self.current_time);
                self.emit_position_update();
            }
            AudioEventKind::TimeUpdate { position } => {
                self.current_time = self.clamp_time(position);
                self.emit_position_update();
            }
            AudioEventKind::Started => {
                // Only a start still awaited by the transport applies
                if self.state == TransportState::Loading {
                    self.set_state(TransportState::Playing);
                }
            }
            AudioEventKind::Ended => self.handle_track_finished(),
            AudioEventKind::Failed { message } => self.fail(message),
        }
        true
    }

    // ===== Shortcuts =====

    pub(crate) fn register_shortcuts(&mut self, binding: ShortcutBinding) {
        debug!(registration = binding.id, "Keyboard shortcuts registered");
        self.shortcuts = Some(binding);
    }

    pub(crate) fn unregister_shortcuts(&mut self, id: u64) {
        if self.shortcuts.as_ref().is_some_and(|binding| binding.id == id) {
            debug!(registration = id, "Keyboard shortcuts unregistered");
            self.shortcuts = None;
        }
    }

    /// Whether keyboard shortcuts are registered
    pub fn has_shortcuts(&self) -> bool {
        self.shortcuts.is_some()
    }

    /// Handle a key press forwarded by the embedding.
    ///
    /// Space toggles the current track while shortcuts are registered and no
    /// text input has focus. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        let accepts = self
            .shortcuts
            .as_ref()
            .is_some_and(|binding| binding.accepts_keys());
        accepts && self.apply_key(key)
    }

    /// Focus predicate of the active registration, if any
    pub(crate) fn focus_probe(&self) -> Option<FocusProbe> {
        self.shortcuts.as_ref().map(ShortcutBinding::focus_probe)
    }

    /// Act on `key` once the focus predicate has been consulted.
    ///
    /// Still requires a live registration, which may have been dropped since.
    pub(crate) fn apply_key(&mut self, key: Key) -> bool {
        if self.shortcuts.is_none() || self.current_track.is_none() {
            return false;
        }

        match key {
            Key::Space => {
                self.toggle_current();
                true
            }
            Key::Char(_) | Key::Other => false,
        }
    }

    // ===== State Queries =====

    /// Get current transport state
    pub fn get_state(&self) -> TransportState {
        self.state
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    /// Get the track bound to the output
    pub fn get_current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Current position in seconds
    pub fn get_current_time(&self) -> f64 {
        self.current_time
    }

    /// Source length in seconds (0 until metadata loads)
    pub fn get_duration(&self) -> f64 {
        self.duration
    }

    /// Current load generation
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Copy of the whole session
    pub fn snapshot(&self) -> TransportSnapshot {
        TransportSnapshot {
            current_track: self.current_track.clone(),
            state: self.state,
            current_time: self.current_time,
            duration: self.duration,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn switch_to(&mut self, track: &Track) {
        let previous_track_id = self
            .current_track
            .replace(track.clone())
            .map(|previous| previous.id);

        self.epoch = self.epoch.next();
        self.current_time = 0.0;
        self.duration = 0.0;

        info!(
            track_id = %track.id,
            title = %track.title,
            epoch = self.epoch.value(),
            "Loading track"
        );

        self.set_state(TransportState::Loading);
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });

        self.remote.submit(RemoteRequest::ReportPlay {
            track_id: track.id.clone(),
        });

        if let Err(err) = self.output.load(&track.audio_url, self.epoch) {
            self.fail(err.to_string());
            return;
        }
        self.output.set_volume(self.volume.gain());
        self.start_output();
    }

    fn start_output(&mut self) {
        match self.output.play() {
            Ok(StartOutcome::Started) => self.set_state(TransportState::Playing),
            Ok(StartOutcome::Pending) => self.set_state(TransportState::Loading),
            Err(err) => self.fail(err.to_string()),
        }
    }

    fn handle_track_finished(&mut self) {
        let Some(track_id) = self.current_track.as_ref().map(|track| track.id.clone()) else {
            return;
        };

        debug!(track_id = %track_id, "Track finished");
        if let Err(err) = self.output.seek(0.0) {
            debug!(error = %err, "Rewind after end failed");
        }
        self.current_time = 0.0;
        self.set_state(TransportState::Paused);
        self.pending_events
            .push(PlaybackEvent::TrackFinished { track_id });
        self.emit_position_update();
    }

    fn fail(&mut self, message: String) {
        warn!(
            track_id = ?self.current_track.as_ref().map(|track| track.id.as_str()),
            error = %message,
            "Playback failed"
        );
        self.set_state(TransportState::Paused);
        self.pending_events.push(PlaybackEvent::Error { message });
    }

    fn apply_volume(&mut self) {
        self.output.set_volume(self.volume.gain());
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    fn clamp_time(&self, position: f64) -> f64 {
        if position.is_finite() {
            position.clamp(0.0, self.duration)
        } else {
            0.0
        }
    }

    fn set_state(&mut self, state: TransportState) {
        if self.state != state {
            self.state = state;
            self.pending_events.push(PlaybackEvent::StateChanged { state });
        }
    }

    fn emit_position_update(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position_ms: seconds_to_ms(self.current_time),
            duration_ms: seconds_to_ms(self.duration),
        });
    }
}
