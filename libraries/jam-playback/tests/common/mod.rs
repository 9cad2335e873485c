//! Shared helpers for jam-playback integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use jam_core::{Comment, CommentId, Track, TrackId, TrackPage, UserCommentPage, UserId};
use jam_playback::{AudioOutput, Epoch, PlaybackError, StartOutcome};
use mockall::mock;
use std::sync::{Arc, Mutex};

// ===== Tracks =====

pub fn create_test_track(id: &str) -> Track {
    Track::new(
        TrackId::new(id),
        format!("Track {}", id),
        format!("https://cdn.example.com/{}.mp3", id),
        UserId::new("owner"),
        "Owner",
    )
}

/// Track with a freshly generated id, distinct from every other fixture
pub fn create_unique_track() -> Track {
    let id = TrackId::generate();
    let mut track = create_test_track(id.as_str());
    track.id = id;
    track
}

pub fn create_counted_track(id: &str, likes: u64, plays: u64, liked: bool) -> Track {
    let mut track = create_test_track(id);
    track.like_count = likes;
    track.play_count = plays;
    track.user_liked = liked;
    track
}

// ===== Scripted audio output =====

/// Call received by [`ScriptedOutput`]
#[derive(Debug, Clone, PartialEq)]
pub enum OutputCall {
    Load { url: String, epoch: Epoch },
    Play,
    Pause,
    Seek(f64),
    SetVolume(f32),
    Stop,
}

/// How `play` answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    Immediate,
    Pending,
    Fail,
}

#[derive(Debug)]
pub struct OutputState {
    pub calls: Vec<OutputCall>,
    pub start_mode: StartMode,
    pub length: f64,
}

/// Output double recording every call. Cloning shares the recording so a
/// test can keep a handle after boxing it into the engine.
#[derive(Debug, Clone)]
pub struct ScriptedOutput {
    state: Arc<Mutex<OutputState>>,
}

impl ScriptedOutput {
    pub fn new(start_mode: StartMode) -> Self {
        Self {
            state: Arc::new(Mutex::new(OutputState {
                calls: Vec::new(),
                start_mode,
                length: 180.0,
            })),
        }
    }

    pub fn set_start_mode(&self, start_mode: StartMode) {
        self.state.lock().unwrap().start_mode = start_mode;
    }

    pub fn calls(&self) -> Vec<OutputCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn last_gain(&self) -> Option<f32> {
        self.calls().iter().rev().find_map(|call| match call {
            OutputCall::SetVolume(gain) => Some(*gain),
            _ => None,
        })
    }

    pub fn load_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, OutputCall::Load { .. }))
            .count()
    }
}

impl AudioOutput for ScriptedOutput {
    fn load(&mut self, url: &str, epoch: Epoch) -> jam_playback::Result<()> {
        self.state.lock().unwrap().calls.push(OutputCall::Load {
            url: url.to_string(),
            epoch,
        });
        Ok(())
    }

    fn play(&mut self) -> jam_playback::Result<StartOutcome> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(OutputCall::Play);
        match state.start_mode {
            StartMode::Immediate => Ok(StartOutcome::Started),
            StartMode::Pending => Ok(StartOutcome::Pending),
            StartMode::Fail => Err(PlaybackError::AudioOutput("source unreachable".to_string())),
        }
    }

    fn pause(&mut self) {
        self.state.lock().unwrap().calls.push(OutputCall::Pause);
    }

    fn seek(&mut self, position: f64) -> jam_playback::Result<f64> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(OutputCall::Seek(position));
        Ok(position.min(state.length))
    }

    fn set_volume(&mut self, gain: f32) {
        self.state.lock().unwrap().calls.push(OutputCall::SetVolume(gain));
    }

    fn stop(&mut self) {
        self.state.lock().unwrap().calls.push(OutputCall::Stop);
    }
}

// ===== Backend double =====

mock! {
    pub TrackService {}

    #[async_trait]
    impl jam_core::RemoteTrackService for TrackService {
        async fn report_play(&self, track_id: &TrackId) -> jam_core::Result<()>;
        async fn toggle_like(&self, track_id: &TrackId) -> jam_core::Result<()>;
        async fn post_comment(&self, track_id: &TrackId, text: &str) -> jam_core::Result<Comment>;
        async fn delete_comment(&self, track_id: &TrackId, comment_id: &CommentId) -> jam_core::Result<()>;
        async fn fetch_track(&self, track_id: &TrackId) -> jam_core::Result<Track>;
        async fn fetch_user_tracks(
            &self,
            user_id: &UserId,
            page_number: u32,
            page_size: u32,
        ) -> jam_core::Result<TrackPage>;
        async fn fetch_recent_plays(
            &self,
            user_id: &UserId,
            page_number: u32,
            page_size: u32,
        ) -> jam_core::Result<TrackPage>;
        async fn fetch_recent_likes(
            &self,
            user_id: &UserId,
            page_number: u32,
            page_size: u32,
        ) -> jam_core::Result<TrackPage>;
        async fn fetch_user_comments(
            &self,
            user_id: &UserId,
            page_number: u32,
            page_size: u32,
        ) -> jam_core::Result<UserCommentPage>;
    }
}

pub fn comment(id: &str, text: &str) -> Comment {
    Comment {
        id: CommentId::new(id),
        text: text.to_string(),
        user_id: UserId::new("u-1"),
        username: "sycho".to_string(),
        display_name: "Sycho".to_string(),
        user_profile_picture_url: None,
        created_at: chrono::Utc::now(),
        user_profile_updated_at: None,
    }
}
