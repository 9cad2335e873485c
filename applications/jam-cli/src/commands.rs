/// Command implementations
///
/// Each command drives the shared player context the same way a UI surface
/// would: it mounts a binding for the track it shows and renders the view
/// the binding returns.
use anyhow::Context;
use jam_core::{CommentId, Track, TrackId, TrackPage, UserId};
use jam_playback::{PlayerContext, TrackBinding, TrackView};

pub async fn show(ctx: &PlayerContext, track_id: &str) -> anyhow::Result<()> {
    let track_id = TrackId::new(track_id);
    let track = ctx
        .fetch_track(&track_id)
        .await
        .with_context(|| format!("failed to fetch track {}", track_id))?;

    ctx.load_comments(&track.id, track.comments.clone());
    let binding = TrackBinding::mount(ctx, track);

    print_track(binding.track(), &binding.view());
    print_comments(ctx, &track_id);
    Ok(())
}

pub async fn tracks(
    ctx: &PlayerContext,
    user_id: &str,
    page: u32,
    page_size: u32,
) -> anyhow::Result<()> {
    let user_id = UserId::new(user_id);
    let page = ctx
        .fetch_user_tracks(&user_id, page.max(1), page_size.max(1))
        .await
        .with_context(|| format!("failed to list tracks of {}", user_id))?;

    print_track_page(ctx, page);
    Ok(())
}

pub async fn recent_plays(
    ctx: &PlayerContext,
    user_id: &str,
    page: u32,
    page_size: u32,
) -> anyhow::Result<()> {
    let user_id = UserId::new(user_id);
    let page = ctx
        .fetch_recent_plays(&user_id, page.max(1), page_size.max(1))
        .await
        .with_context(|| format!("failed to list recent plays of {}", user_id))?;

    print_track_page(ctx, page);
    Ok(())
}

pub async fn recent_likes(
    ctx: &PlayerContext,
    user_id: &str,
    page: u32,
    page_size: u32,
) -> anyhow::Result<()> {
    let user_id = UserId::new(user_id);
    let page = ctx
        .fetch_recent_likes(&user_id, page.max(1), page_size.max(1))
        .await
        .with_context(|| format!("failed to list recent likes of {}", user_id))?;

    print_track_page(ctx, page);
    Ok(())
}

pub async fn user_comments(
    ctx: &PlayerContext,
    user_id: &str,
    page: u32,
    page_size: u32,
) -> anyhow::Result<()> {
    let user_id = UserId::new(user_id);
    let page = ctx
        .fetch_user_comments(&user_id, page.max(1), page_size.max(1))
        .await
        .with_context(|| format!("failed to list comments of {}", user_id))?;

    if page.items.is_empty() {
        println!("No comments on page {}", page.page_number);
    }
    for comment in &page.items {
        println!(
            "{}  on {} ({}): \"{}\"",
            comment.created_at.format("%Y-%m-%d %H:%M"),
            comment.track_name,
            comment.track_id,
            comment.text
        );
    }
    if let Some(next) = page.next_page() {
        println!("More comments: --page {}", next);
    }
    Ok(())
}

pub async fn play(ctx: &PlayerContext, track_id: &str) -> anyhow::Result<()> {
    let track = fetch(ctx, track_id).await?;
    let binding = TrackBinding::mount(ctx, track);

    let view = binding.toggle_play();
    print_track(binding.track(), &view);
    Ok(())
}

pub async fn like(ctx: &PlayerContext, track_id: &str) -> anyhow::Result<()> {
    let track = fetch(ctx, track_id).await?;
    let binding = TrackBinding::mount(ctx, track);

    let view = binding.toggle_like();
    println!(
        "{} {} ({} likes)",
        if view.user_liked { "Liked" } else { "Unliked" },
        binding.track().title,
        view.like_count
    );
    Ok(())
}

pub async fn comment(ctx: &PlayerContext, track_id: &str, text: &str) -> anyhow::Result<()> {
    let track_id = TrackId::new(track_id);
    let comment = ctx
        .post_comment(&track_id, text)
        .await
        .context("failed to post comment")?;

    println!("Posted comment {}", comment.id);
    Ok(())
}

pub async fn uncomment(ctx: &PlayerContext, track_id: &str, comment_id: &str) -> anyhow::Result<()> {
    let track_id = TrackId::new(track_id);
    let comment_id = CommentId::new(comment_id);
    ctx.delete_comment(&track_id, &comment_id)
        .await
        .context("failed to delete comment")?;

    println!("Deleted comment {}", comment_id);
    Ok(())
}

async fn fetch(ctx: &PlayerContext, track_id: &str) -> anyhow::Result<Track> {
    let track_id = TrackId::new(track_id);
    ctx.fetch_track(&track_id)
        .await
        .with_context(|| format!("failed to fetch track {}", track_id))
}

fn print_track_page(ctx: &PlayerContext, page: TrackPage) {
    if page.items.is_empty() {
        println!("No tracks on page {}", page.page_number);
    }
    let next = page.next_page();
    for track in page.items {
        let binding = TrackBinding::mount(ctx, track);
        let view = binding.view();
        println!(
            "{:<24}  {:<32}  {:>6} likes  {:>7} plays",
            view.track_id.as_str(),
            binding.track().title,
            view.like_count,
            view.play_count
        );
    }
    if let Some(next) = next {
        println!("More tracks: --page {}", next);
    }
}

fn print_track(track: &Track, view: &TrackView) {
    println!("{} - {}", track.owner_name, track.title);
    if let Some(duration) = &track.duration {
        println!("  duration: {}", duration);
    }
    if !track.tags.is_empty() {
        println!("  tags:     {}", track.tags.join(", "));
    }
    if let Some(cover) = track.cover_url() {
        println!("  cover:    {}", cover);
    }
    println!(
        "  likes:    {}{}",
        view.like_count,
        if view.user_liked { " (you)" } else { "" }
    );
    println!("  plays:    {}", view.play_count);
    if view.is_current {
        println!(
            "  player:   {} at {:.1}s",
            if view.is_playing { "playing" } else { "paused" },
            view.current_time
        );
    }
}

fn print_comments(ctx: &PlayerContext, track_id: &TrackId) {
    let comments = ctx.comments(track_id);
    if comments.is_empty() {
        return;
    }
    println!("  comments:");
    for comment in comments {
        println!(
            "    [{}] {}: {}",
            comment.id, comment.display_name, comment.text
        );
    }
}
