use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Sample rate of synthesized audio received from the agent (Hz).
pub const CHUNK_SAMPLE_RATE: u32 = 16000;

/// Bit depth of synthesized audio received from the agent.
pub const CHUNK_BITS_PER_SAMPLE: u16 = 16;

/// Persists decoded audio chunks, one timestamped WAV file per chunk.
///
/// All inbound audio is 16 kHz 16-bit signed PCM mono; the sample rate and
/// bit depth are fixed by the remote protocol, not carried per frame.
pub struct AudioSink {
    output_dir: PathBuf,
}

impl AudioSink {
    /// Create a sink writing into `output_dir`, creating it if needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();

        fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

        Ok(Self { output_dir })
    }

    /// Write one chunk to a new WAV file named by the current local time
    /// with microsecond resolution.
    pub fn write_chunk(&self, samples: &[i16]) -> Result<PathBuf> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S_%6f");
        let path = self.output_dir.join(format!("{timestamp}.wav"));

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: CHUNK_SAMPLE_RATE,
            bits_per_sample: CHUNK_BITS_PER_SAMPLE,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(&path, spec)
            .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;

        for &sample in samples {
            writer
                .write_sample(sample)
                .context("Failed to write sample to WAV")?;
        }

        writer.finalize().context("Failed to finalize WAV file")?;

        info!(
            "Saved audio chunk: {} ({} samples)",
            path.display(),
            samples.len()
        );

        Ok(path)
    }
}
