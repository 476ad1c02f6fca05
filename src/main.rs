use anyhow::Result;
use clap::Parser;
use convai_relay::{Config, FrameLog, RelaySession, SessionState};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Relay one recorded clip to a conversational agent and persist the
/// replies it streams back.
#[derive(Debug, Parser)]
#[command(name = "convai-relay", version)]
struct Cli {
    /// Input clip path (overrides INPUT_AUDIO_FILE)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory for received audio chunks (overrides OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Directory for the frame log (overrides LOG_DIR)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(input) = cli.input {
        config.input_audio_file = input;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = log_dir;
    }

    let mut frame_log = FrameLog::open(&config.log_dir)?;
    let mut session = RelaySession::new(config)?;

    let state = session.run(&mut frame_log).await?;
    match state {
        SessionState::Terminated => info!("Session terminated by the agent"),
        SessionState::Closed => info!("Session ended: connection closed"),
        other => info!("Session ended in state {other:?}"),
    }

    Ok(())
}
