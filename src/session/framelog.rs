use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Log file name inside the log directory.
const LOG_FILE_NAME: &str = "websocket_log.txt";

/// Append-only record of every raw inbound frame.
///
/// One line per frame: a local timestamp with microsecond resolution,
/// ` - `, then the verbatim frame text. Frames are appended before JSON
/// decoding, so the log is a faithful wire-level record regardless of
/// parse or dispatch outcome.
pub struct FrameLog {
    path: PathBuf,
    file: File,
}

impl FrameLog {
    /// Open (creating if needed) the log file under `log_dir`.
    pub fn open(log_dir: impl AsRef<Path>) -> Result<Self> {
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let path = log_dir.join(LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;

        info!("Frame log: {}", path.display());

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one raw frame. Write failures are the caller's to report;
    /// they never interrupt the receive loop.
    pub fn append(&mut self, raw: &str) -> std::io::Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.6f");
        writeln!(self.file, "{timestamp} - {raw}")?;
        self.file.flush()
    }
}
