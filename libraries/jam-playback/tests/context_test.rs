//! Integration tests for the player context
//!
//! Covers what surfaces observe through the shared context: bindings,
//! shortcut registrations, comment caching and backend reporting.

mod common;

use common::{
    comment, create_counted_track, create_test_track, create_unique_track, MockTrackService,
    ScriptedOutput, StartMode,
};
use jam_core::{JamError, TrackId, TrackPage, UserCommentPage, UserId};
use jam_playback::{
    DispatchStats, Key, PlaybackConfig, PlayerContext, RemoteDispatcher, TrackBinding,
    TransportState,
};
use mockall::predicate::eq;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ===== Test Helpers =====

fn context_with(service: MockTrackService) -> (PlayerContext, RemoteDispatcher) {
    PlayerContext::new(
        PlaybackConfig::default(),
        Box::new(ScriptedOutput::new(StartMode::Immediate)),
        Arc::new(service),
    )
}

/// Service that accepts every play and like report
fn accepting_service() -> MockTrackService {
    let mut service = MockTrackService::new();
    service.expect_report_play().returning(|_| Ok(()));
    service.expect_toggle_like().returning(|_| Ok(()));
    service
}

// ============================================================================
// Bindings
// ============================================================================

mod bindings {
    use super::*;

    #[test]
    fn surfaces_of_same_track_share_state() {
        let (ctx, _dispatcher) = context_with(accepting_service());
        let track = create_counted_track("x", 10, 100, false);

        let feed = TrackBinding::mount(&ctx, track.clone());
        let sidebar = TrackBinding::mount(&ctx, track);

        let view = feed.toggle_like();
        assert_eq!(view.like_count, 11);
        assert!(view.user_liked);

        let other = sidebar.view();
        assert_eq!(other.like_count, 11);
        assert!(other.user_liked);

        feed.toggle_play();
        let other = sidebar.view();
        assert!(other.is_current);
        assert!(other.is_playing);
        assert_eq!(other.play_count, 101);
    }

    #[test]
    fn only_current_track_reports_playing() {
        let (ctx, _dispatcher) = context_with(accepting_service());
        let a = TrackBinding::mount(&ctx, create_unique_track());
        let b = TrackBinding::mount(&ctx, create_unique_track());
        assert_ne!(a.track().id, b.track().id);

        a.toggle_play();
        b.toggle_play();

        let view_a = a.view();
        assert!(!view_a.is_current);
        assert!(!view_a.is_playing);
        assert_eq!(view_a.current_time, 0.0);
        assert!(b.view().is_playing);
    }

    #[test]
    fn play_counts_once_per_process() {
        let (ctx, _dispatcher) = context_with(accepting_service());
        let binding = TrackBinding::mount(&ctx, create_counted_track("x", 0, 5, false));

        binding.toggle_play();
        binding.toggle_play();
        binding.toggle_play();

        assert_eq!(binding.view().play_count, 6);
        assert!(binding.view().is_playing);
    }

    #[test]
    fn remount_with_stale_snapshot_keeps_local_change() {
        let (ctx, _dispatcher) = context_with(accepting_service());
        let track = create_counted_track("x", 3, 0, false);

        let first = TrackBinding::mount(&ctx, track.clone());
        first.toggle_like();
        drop(first);

        let second = TrackBinding::mount(&ctx, track);
        assert_eq!(second.view().like_count, 4);
        assert!(second.view().user_liked);
    }

    #[test]
    fn seek_only_applies_to_current_track() {
        let (ctx, _dispatcher) = context_with(accepting_service());
        let a = TrackBinding::mount(&ctx, create_test_track("a"));
        let b = TrackBinding::mount(&ctx, create_test_track("b"));

        assert!(!a.seek(10.0));

        a.toggle_play();
        assert!(a.seek(10.0));
        assert!(!b.seek(10.0));
    }
}

// ============================================================================
// Shortcuts
// ============================================================================

mod shortcuts {
    use super::*;

    #[test]
    fn space_toggles_until_registration_dropped() {
        let (ctx, _dispatcher) = context_with(accepting_service());
        ctx.toggle_play_pause(&create_test_track("a"));

        let registration = ctx.register_shortcuts(|| false);
        assert!(ctx.handle_key(Key::Space));
        assert_eq!(ctx.transport().state, TransportState::Paused);
        assert!(ctx.handle_key(Key::Space));
        assert!(ctx.transport().is_playing());

        drop(registration);
        assert!(!ctx.handle_key(Key::Space));
        assert!(ctx.transport().is_playing());
    }

    #[test]
    fn focused_text_input_keeps_space() {
        let (ctx, _dispatcher) = context_with(accepting_service());
        ctx.toggle_play_pause(&create_test_track("a"));

        let focused = Arc::new(AtomicBool::new(true));
        let probe = Arc::clone(&focused);
        let _registration = ctx.register_shortcuts(move || probe.load(Ordering::SeqCst));

        assert!(!ctx.handle_key(Key::Space));
        assert!(ctx.transport().is_playing());

        focused.store(false, Ordering::SeqCst);
        assert!(ctx.handle_key(Key::Space));
        assert!(!ctx.transport().is_playing());
    }

    #[test]
    fn dropping_replaced_registration_keeps_newer_one() {
        let (ctx, _dispatcher) = context_with(accepting_service());
        ctx.toggle_play_pause(&create_test_track("a"));

        let old = ctx.register_shortcuts(|| false);
        let _current = ctx.register_shortcuts(|| false);
        drop(old);

        assert!(ctx.with_engine(|engine| engine.has_shortcuts()));
        assert!(ctx.handle_key(Key::Space));
    }

    #[test]
    fn focus_predicate_may_read_player_state() {
        let (ctx, _dispatcher) = context_with(accepting_service());
        ctx.toggle_play_pause(&create_test_track("a"));

        let observer = ctx.clone();
        let registration =
            ctx.register_shortcuts(move || observer.transport().current_track.is_none());

        assert!(ctx.handle_key(Key::Space));
        assert_eq!(ctx.transport().state, TransportState::Paused);

        drop(registration);
        assert!(!ctx.with_engine(|engine| engine.has_shortcuts()));
    }

    #[tokio::test]
    async fn space_does_not_report_a_play() {
        let (ctx, mut dispatcher) = context_with(accepting_service());
        ctx.toggle_play_pause(&create_test_track("a"));
        let _registration = ctx.register_shortcuts(|| false);

        ctx.handle_key(Key::Space);
        ctx.handle_key(Key::Space);

        assert_eq!(dispatcher.dispatch_pending().await, 1);
    }
}

// ============================================================================
// Remote reporting
// ============================================================================

mod reporting {
    use super::*;

    #[tokio::test]
    async fn each_track_switch_reports_one_play() {
        let mut service = MockTrackService::new();
        service
            .expect_report_play()
            .with(eq(TrackId::new("a")))
            .times(2)
            .returning(|_| Ok(()));
        service
            .expect_report_play()
            .with(eq(TrackId::new("b")))
            .times(1)
            .returning(|_| Ok(()));

        let (ctx, mut dispatcher) = context_with(service);
        let a = create_test_track("a");
        let b = create_test_track("b");

        ctx.toggle_play_pause(&a);
        ctx.toggle_play_pause(&a);
        ctx.toggle_play_pause(&b);
        ctx.toggle_play_pause(&a);

        assert_eq!(dispatcher.dispatch_pending().await, 3);
        assert_eq!(
            dispatcher.stats(),
            DispatchStats {
                succeeded: 3,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn failures_are_dropped_without_rollback() {
        let mut service = MockTrackService::new();
        service
            .expect_toggle_like()
            .times(1)
            .returning(|_| Err(JamError::network("connection refused")));
        service.expect_report_play().times(1).returning(|_| Ok(()));

        let (ctx, dispatcher) = context_with(service);
        let binding = TrackBinding::mount(&ctx, create_counted_track("x", 2, 0, false));
        binding.toggle_like();
        binding.toggle_play();

        let handle = dispatcher.spawn();
        drop(binding);
        drop(ctx);
        let stats = handle.await.unwrap();

        assert_eq!(
            stats,
            DispatchStats {
                succeeded: 1,
                failed: 1
            }
        );
    }

    #[tokio::test]
    async fn local_like_survives_failed_report() {
        let mut service = MockTrackService::new();
        service
            .expect_toggle_like()
            .returning(|_| Err(JamError::network("timeout")));

        let (ctx, mut dispatcher) = context_with(service);
        let id = TrackId::new("x");
        ctx.toggle_like(&id);
        dispatcher.dispatch_pending().await;

        let record = ctx.interaction(&id);
        assert!(record.user_liked);
        assert_eq!(record.like_count, 1);
    }
}

// ============================================================================
// Comments
// ============================================================================

mod comments {
    use super::*;

    #[tokio::test]
    async fn blank_comment_never_reaches_backend() {
        let mut service = MockTrackService::new();
        service.expect_post_comment().never();

        let (ctx, _dispatcher) = context_with(service);
        let result = ctx.post_comment(&TrackId::new("x"), "   \n").await;

        assert!(matches!(result, Err(JamError::InvalidInput(_))));
        assert!(ctx.comments(&TrackId::new("x")).is_empty());
    }

    #[tokio::test]
    async fn posted_comment_is_trimmed_and_cached() {
        let mut service = MockTrackService::new();
        service
            .expect_post_comment()
            .withf(|track_id, text| track_id.as_str() == "x" && text == "fire track")
            .times(1)
            .returning(|_, text| Ok(comment("c-2", text)));

        let (ctx, _dispatcher) = context_with(service);
        let id = TrackId::new("x");
        ctx.load_comments(&id, vec![comment("c-1", "older")]);

        let posted = ctx.post_comment(&id, "  fire track ").await.unwrap();

        assert_eq!(posted.text, "fire track");
        let texts: Vec<String> = ctx.comments(&id).into_iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["fire track".to_string(), "older".to_string()]);
    }

    #[tokio::test]
    async fn failed_post_leaves_cache_untouched() {
        let mut service = MockTrackService::new();
        service.expect_post_comment().returning(|_, _| {
            Err(JamError::Remote {
                status: 500,
                message: "boom".to_string(),
            })
        });

        let (ctx, _dispatcher) = context_with(service);
        let id = TrackId::new("x");

        assert!(ctx.post_comment(&id, "hello").await.is_err());
        assert!(ctx.comments(&id).is_empty());
    }

    #[tokio::test]
    async fn delete_removes_from_cache_on_success() {
        let mut service = MockTrackService::new();
        service
            .expect_delete_comment()
            .withf(|track_id, comment_id| track_id.as_str() == "x" && comment_id.as_str() == "c-1")
            .times(1)
            .returning(|_, _| Ok(()));

        let (ctx, _dispatcher) = context_with(service);
        let id = TrackId::new("x");
        ctx.load_comments(&id, vec![comment("c-1", "bye"), comment("c-2", "stay")]);

        ctx.delete_comment(&id, &jam_core::CommentId::new("c-1"))
            .await
            .unwrap();

        let remaining = ctx.comments(&id);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id.as_str(), "c-2");
    }
}

// ============================================================================
// Backend passthrough and session
// ============================================================================

mod session {
    use super::*;

    #[tokio::test]
    async fn fetch_user_tracks_passes_paging() {
        let mut service = MockTrackService::new();
        service
            .expect_fetch_user_tracks()
            .withf(|user_id, page, size| user_id.as_str() == "u-1" && *page == 2 && *size == 10)
            .returning(|_, page, _| {
                Ok(TrackPage {
                    items: vec![create_test_track("p")],
                    page_number: page,
                    has_next_page: false,
                })
            });

        let (ctx, _dispatcher) = context_with(service);
        let page = ctx
            .fetch_user_tracks(&UserId::new("u-1"), 2, 10)
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.next_page(), None);
    }

    #[tokio::test]
    async fn liking_in_feed_shows_in_recent_likes_sidebar() {
        let mut service = accepting_service();
        service
            .expect_fetch_recent_likes()
            .withf(|user_id, page, size| user_id.as_str() == "u-1" && *page == 1 && *size == 3)
            .returning(|_, page, _| {
                Ok(TrackPage {
                    items: vec![create_counted_track("x", 10, 100, false)],
                    page_number: page,
                    has_next_page: false,
                })
            });
        let (ctx, _dispatcher) = context_with(service);

        let feed = TrackBinding::mount(&ctx, create_counted_track("x", 10, 100, false));
        feed.toggle_like();
        feed.toggle_play();

        let sidebar: Vec<TrackBinding> = ctx
            .fetch_recent_likes(&UserId::new("u-1"), 1, 3)
            .await
            .unwrap()
            .items
            .into_iter()
            .map(|track| TrackBinding::mount(&ctx, track))
            .collect();

        let view = sidebar[0].view();
        assert_eq!(view.like_count, 11);
        assert!(view.user_liked);
        assert_eq!(view.play_count, 101);
        assert!(view.is_playing);
    }

    #[tokio::test]
    async fn user_comments_pass_through() {
        let mut service = MockTrackService::new();
        service
            .expect_fetch_user_comments()
            .with(eq(UserId::new("u-1")), eq(1), eq(3))
            .returning(|_, page, _| {
                Ok(UserCommentPage {
                    items: Vec::new(),
                    page_number: page,
                    has_next_page: false,
                })
            });
        service.expect_fetch_recent_plays().never();

        let (ctx, _dispatcher) = context_with(service);
        let page = ctx
            .fetch_user_comments(&UserId::new("u-1"), 1, 3)
            .await
            .unwrap();

        assert!(page.items.is_empty());
    }

    #[test]
    fn logout_stops_playback_but_keeps_counters() {
        let (ctx, _dispatcher) = context_with(accepting_service());
        let binding = TrackBinding::mount(&ctx, create_counted_track("x", 1, 1, false));
        binding.toggle_like();
        binding.toggle_play();

        ctx.logout();

        let view = binding.view();
        assert!(!view.is_current);
        assert_eq!(ctx.transport().state, TransportState::Empty);
        assert_eq!(view.like_count, 2);
        assert_eq!(view.play_count, 2);
    }

    #[test]
    fn drained_events_include_interactions() {
        let (ctx, _dispatcher) = context_with(accepting_service());
        let binding = TrackBinding::mount(&ctx, create_test_track("x"));
        ctx.drain_events();

        binding.toggle_play();
        let events = ctx.drain_events();

        assert!(events
            .iter()
            .any(|event| matches!(event, jam_playback::PlaybackEvent::TrackChanged { .. })));
        assert!(events.iter().any(|event| matches!(
            event,
            jam_playback::PlaybackEvent::InteractionChanged { .. }
        )));
    }
}
