/// Jam CLI - headless front-end for the Jam player
mod commands;
mod config;

use crate::config::CliConfig;
use clap::{Parser, Subcommand};
use jam_playback::{NullOutput, PlayerContext};
use jam_server_client::{JamApiClient, ServerConfig};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jam")]
#[command(about = "Jam Player command-line front-end", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./jam.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API root, overrides the configuration
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token, overrides the configuration
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a track with its counters and comments
    Show {
        /// Track ID
        track_id: String,
    },
    /// List the tracks uploaded by a user
    Tracks {
        /// User ID
        user_id: String,
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Tracks per page
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    /// List the tracks a user played most recently
    Plays {
        /// User ID
        user_id: String,
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Tracks per page
        #[arg(long, default_value_t = 3)]
        page_size: u32,
    },
    /// List the tracks a user liked most recently
    Likes {
        /// User ID
        user_id: String,
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Tracks per page
        #[arg(long, default_value_t = 3)]
        page_size: u32,
    },
    /// List the comments a user left
    Comments {
        /// User ID
        user_id: String,
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Comments per page
        #[arg(long, default_value_t = 3)]
        page_size: u32,
    },
    /// Start a track (reports one play)
    Play {
        /// Track ID
        track_id: String,
    },
    /// Toggle your like on a track
    Like {
        /// Track ID
        track_id: String,
    },
    /// Post a comment on a track
    Comment {
        /// Track ID
        track_id: String,
        /// Comment text
        text: String,
    },
    /// Delete one of your comments
    Uncomment {
        /// Track ID
        track_id: String,
        /// Comment ID
        comment_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api.url = url;
    }
    if let Some(token) = cli.token {
        config.api.token = Some(token);
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let server_config = match &config.api.token {
        Some(token) => ServerConfig::with_token(&config.api.url, token),
        None => ServerConfig::new(&config.api.url),
    };
    let client = Arc::new(JamApiClient::new(server_config)?);
    tracing::debug!(url = %client.url(), "Using API");

    // Posted comments take their author from the profile
    if client.is_authenticated().await {
        if let Err(e) = client.load_session_user().await {
            tracing::warn!(error = %e, "Could not load profile, comments will have no author");
        }
    }

    let (ctx, dispatcher) = PlayerContext::new(
        config.playback.clone(),
        Box::new(NullOutput::new()),
        client,
    );
    let reports = dispatcher.spawn();

    let result = run(&ctx, cli.command).await;

    // Dropping the last context closes the report queue so the dispatcher
    // can finish delivering what is queued
    ctx.logout();
    drop(ctx);
    let stats = reports.await?;
    if stats.failed > 0 {
        tracing::warn!(
            failed = stats.failed,
            succeeded = stats.succeeded,
            "Some play/like reports were not delivered"
        );
    }

    result
}

async fn run(ctx: &PlayerContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Show { track_id } => commands::show(ctx, &track_id).await,
        Commands::Tracks {
            user_id,
            page,
            page_size,
        } => commands::tracks(ctx, &user_id, page, page_size).await,
        Commands::Plays {
            user_id,
            page,
            page_size,
        } => commands::recent_plays(ctx, &user_id, page, page_size).await,
        Commands::Likes {
            user_id,
            page,
            page_size,
        } => commands::recent_likes(ctx, &user_id, page, page_size).await,
        Commands::Comments {
            user_id,
            page,
            page_size,
        } => commands::user_comments(ctx, &user_id, page, page_size).await,
        Commands::Play { track_id } => commands::play(ctx, &track_id).await,
        Commands::Like { track_id } => commands::like(ctx, &track_id).await,
        Commands::Comment { track_id, text } => commands::comment(ctx, &track_id, &text).await,
        Commands::Uncomment {
            track_id,
            comment_id,
        } => commands::uncomment(ctx, &track_id, &comment_id).await,
    }
}
