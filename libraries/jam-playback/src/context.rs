//! Player context - the application-wide provider
//!
//! Bundles the one playback engine, the interaction store and the comment
//! cache behind a cheap-to-clone handle. Build one per application (or per
//! test) and pass clones to every surface.

use crate::{
    comments::CommentStore,
    engine::PlaybackEngine,
    events::PlaybackEvent,
    interactions::InteractionStore,
    output::{AudioEvent, AudioOutput},
    remote::{RemoteDispatcher, RemoteQueue},
    shortcuts::{Key, ShortcutBinding, ShortcutRegistration},
    sync::lock,
    types::{InteractionRecord, PlaybackConfig, TransportSnapshot},
};
use jam_core::{
    types::{
        Comment, CommentId, InteractionSnapshot, Track, TrackId, TrackPage, UserCommentPage, UserId,
    },
    JamError, RemoteTrackService,
};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};
use tracing::{debug, info};

/// Shared handle to the player state
///
/// Every clone refers to the same engine and stores. Locks are held only for
/// the duration of one synchronous call, never across an `.await`.
#[derive(Clone)]
pub struct PlayerContext {
    engine: Arc<Mutex<PlaybackEngine>>,
    interactions: Arc<Mutex<InteractionStore>>,
    comments: Arc<Mutex<CommentStore>>,
    service: Arc<dyn RemoteTrackService>,
    next_registration: Arc<AtomicU64>,
}

impl PlayerContext {
    /// Create the player state.
    ///
    /// The returned dispatcher must be run (see [`RemoteDispatcher::spawn`])
    /// for play and like reports to reach `service`.
    pub fn new(
        config: PlaybackConfig,
        output: Box<dyn AudioOutput>,
        service: Arc<dyn RemoteTrackService>,
    ) -> (Self, RemoteDispatcher) {
        let (remote, rx) = RemoteQueue::channel();
        let engine = PlaybackEngine::new(config, output, remote.clone());
        let interactions = InteractionStore::new(remote);
        let dispatcher = RemoteDispatcher::new(rx, Arc::clone(&service));

        let context = Self {
            engine: Arc::new(Mutex::new(engine)),
            interactions: Arc::new(Mutex::new(interactions)),
            comments: Arc::new(Mutex::new(CommentStore::new())),
            service,
            next_registration: Arc::new(AtomicU64::new(1)),
        };
        (context, dispatcher)
    }

    // ===== Transport =====

    /// See [`PlaybackEngine::toggle_play_pause`]
    pub fn toggle_play_pause(&self, track: &Track) {
        lock(&self.engine).toggle_play_pause(track);
    }

    /// See [`PlaybackEngine::update_time`]
    pub fn update_time(&self, position: f64) {
        lock(&self.engine).update_time(position);
    }

    /// See [`PlaybackEngine::set_volume`]
    pub fn set_volume(&self, level: f32) {
        lock(&self.engine).set_volume(level);
    }

    /// See [`PlaybackEngine::toggle_mute`]
    pub fn toggle_mute(&self) {
        lock(&self.engine).toggle_mute();
    }

    /// See [`PlaybackEngine::restart`]
    pub fn restart(&self) {
        lock(&self.engine).restart();
    }

    /// See [`PlaybackEngine::stop`]
    pub fn stop(&self) {
        lock(&self.engine).stop();
    }

    /// Feed an audio output callback into the engine
    pub fn handle_audio_event(&self, event: AudioEvent) -> bool {
        lock(&self.engine).handle_audio_event(event)
    }

    /// Copy of the playback session
    pub fn transport(&self) -> TransportSnapshot {
        lock(&self.engine).snapshot()
    }

    /// Run `f` with exclusive access to the engine
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut PlaybackEngine) -> R) -> R {
        f(&mut lock(&self.engine))
    }

    // ===== Shortcuts =====

    /// Activate keyboard shortcuts until the registration is dropped.
    ///
    /// `text_input_focused` is asked on every key press; while it returns
    /// true keys are left to the focused input.
    pub fn register_shortcuts<F>(&self, text_input_focused: F) -> ShortcutRegistration
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        let id = self.next_registration.fetch_add(1, Ordering::Relaxed);
        lock(&self.engine).register_shortcuts(ShortcutBinding::new(id, Arc::new(text_input_focused)));
        ShortcutRegistration::new(&self.engine, id)
    }

    /// Forward a key press. Returns whether the player consumed it.
    ///
    /// The focus predicate runs without the engine lock held, so it may read
    /// player state through this context.
    pub fn handle_key(&self, key: Key) -> bool {
        let Some(text_input_focused) = lock(&self.engine).focus_probe() else {
            return false;
        };
        if text_input_focused() {
            return false;
        }
        lock(&self.engine).apply_key(key)
    }

    // ===== Interactions =====

    /// See [`InteractionStore::get_interaction`]
    pub fn interaction(&self, track_id: &TrackId) -> InteractionRecord {
        lock(&self.interactions).get_interaction(track_id)
    }

    /// See [`InteractionStore::seed`]
    pub fn seed(&self, track_id: &TrackId, snapshot: InteractionSnapshot) -> bool {
        lock(&self.interactions).seed(track_id, snapshot)
    }

    /// See [`InteractionStore::toggle_like`]
    pub fn toggle_like(&self, track_id: &TrackId) -> InteractionRecord {
        lock(&self.interactions).toggle_like(track_id)
    }

    /// See [`InteractionStore::increment_play`]
    pub fn increment_play(&self, track_id: &TrackId) -> bool {
        lock(&self.interactions).increment_play(track_id)
    }

    // ===== Comments =====

    /// Comments known for `track_id`, newest first
    pub fn comments(&self, track_id: &TrackId) -> Vec<Comment> {
        lock(&self.comments).comments(track_id).to_vec()
    }

    /// Seed the comment cache of `track_id` from a fetched list
    pub fn load_comments(&self, track_id: &TrackId, comments: Vec<Comment>) {
        lock(&self.comments).replace(track_id, comments);
    }

    /// Forget cached comments of `track_id`
    pub fn clear_comments(&self, track_id: &TrackId) {
        lock(&self.comments).clear(track_id);
    }

    /// Post a comment and cache it on success.
    ///
    /// Blank text is rejected without contacting the backend.
    pub async fn post_comment(&self, track_id: &TrackId, text: &str) -> jam_core::Result<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(JamError::invalid_input("comment text is empty"));
        }

        let comment = self.service.post_comment(track_id, text).await?;
        debug!(track_id = %track_id, comment_id = %comment.id, "Comment posted");
        lock(&self.comments).add(track_id, comment.clone());
        Ok(comment)
    }

    /// Delete a comment and drop it from the cache on success
    pub async fn delete_comment(
        &self,
        track_id: &TrackId,
        comment_id: &CommentId,
    ) -> jam_core::Result<()> {
        self.service.delete_comment(track_id, comment_id).await?;
        debug!(track_id = %track_id, comment_id = %comment_id, "Comment deleted");
        lock(&self.comments).remove(track_id, comment_id);
        Ok(())
    }

    // ===== Backend =====

    /// Fetch a single track snapshot
    pub async fn fetch_track(&self, track_id: &TrackId) -> jam_core::Result<Track> {
        self.service.fetch_track(track_id).await
    }

    /// Fetch one page of a user's tracks
    pub async fn fetch_user_tracks(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> jam_core::Result<TrackPage> {
        self.service
            .fetch_user_tracks(user_id, page_number, page_size)
            .await
    }

    /// Fetch one page of the tracks `user_id` played most recently
    pub async fn fetch_recent_plays(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> jam_core::Result<TrackPage> {
        self.service
            .fetch_recent_plays(user_id, page_number, page_size)
            .await
    }

    /// Fetch one page of the tracks `user_id` liked most recently
    pub async fn fetch_recent_likes(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> jam_core::Result<TrackPage> {
        self.service
            .fetch_recent_likes(user_id, page_number, page_size)
            .await
    }

    /// Fetch one page of the comments `user_id` left on any track
    pub async fn fetch_user_comments(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> jam_core::Result<UserCommentPage> {
        self.service
            .fetch_user_comments(user_id, page_number, page_size)
            .await
    }

    /// End the session: stop playback.
    ///
    /// Interaction records are kept; they belong to the process, not to the
    /// session.
    pub fn logout(&self) {
        info!("Session ended, stopping playback");
        self.stop();
    }

    // ===== Events =====

    /// Drain engine events followed by interaction events
    pub fn drain_events(&self) -> Vec<PlaybackEvent> {
        let mut events = lock(&self.engine).drain_events();
        events.extend(lock(&self.interactions).drain_events());
        events
    }
}
