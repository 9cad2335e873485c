//! Jam Player - Playback & Interaction Coordination
//!
//! One audio output, many surfaces. This crate provides:
//! - A single playback engine (play/pause/seek/volume, transport state)
//! - Epoch-tagged output callbacks so late events of an old source are ignored
//! - Shared, de-duplicated like/play counters keyed by track id
//! - A per-track comment cache
//! - Fire-and-forget reporting of plays and likes to the backend
//! - Keyboard shortcuts scoped by an injected focus predicate
//!
//! # Architecture
//!
//! `jam-playback` does not know how audio is produced or how the backend is
//! reached:
//! - Audio is driven through the [`AudioOutput`] trait
//! - The backend is a [`jam_core::RemoteTrackService`]
//!
//! # Example
//!
//! ```rust
//! use jam_playback::{NullOutput, PlaybackConfig, PlaybackEngine, RemoteQueue};
//! use jam_core::{Track, TrackId, UserId};
//!
//! let (remote, _requests) = RemoteQueue::channel();
//! let mut engine = PlaybackEngine::new(PlaybackConfig::default(), Box::new(NullOutput::new()), remote);
//!
//! let track = Track::new(TrackId::new("t-1"), "Night Drive", "night.mp3", UserId::new("u-1"), "sycho");
//! engine.set_volume(0.3);
//! engine.toggle_play_pause(&track);
//!
//! assert!(engine.is_playing());
//! assert_eq!(engine.get_volume(), 0.3);
//! ```

mod binding;
mod comments;
mod context;
mod engine;
mod error;
mod events;
mod interactions;
mod output;
mod remote;
mod shortcuts;
mod sync;
pub mod types;
mod volume;

// Public exports
pub use binding::{TrackBinding, TrackView};
pub use comments::CommentStore;
pub use context::PlayerContext;
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use interactions::InteractionStore;
pub use output::{AudioEvent, AudioEventKind, AudioOutput, NullOutput, StartOutcome};
pub use remote::{DispatchStats, RemoteDispatcher, RemoteQueue, RemoteRequest};
pub use shortcuts::{FocusProbe, Key, ShortcutRegistration};
pub use types::{Epoch, InteractionRecord, PlaybackConfig, TransportSnapshot, TransportState};
pub use volume::Volume;
