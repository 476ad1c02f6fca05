use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Process configuration, read from the environment (with `.env` support
/// in the binary). `API_KEY`, `AGENT_ID` and `WEBSOCKET_BASE_URI` are
/// required; everything else has a default.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub agent_id: String,
    pub websocket_base_uri: String,

    #[serde(default = "default_input_audio_file")]
    pub input_audio_file: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Idle-receive bound in seconds; the session fails if the remote goes
    /// silent for this long.
    #[serde(default = "default_receive_timeout_secs")]
    pub receive_timeout_secs: u64,
}

fn default_input_audio_file() -> PathBuf {
    PathBuf::from("input.wav")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("log")
}

fn default_receive_timeout_secs() -> u64 {
    60
}

impl Config {
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("Failed to read environment configuration")?;

        settings.try_deserialize().context(
            "Missing or invalid configuration; API_KEY, AGENT_ID and WEBSOCKET_BASE_URI are required",
        )
    }
}
