use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::framelog::FrameLog;
use crate::audio::{AudioFile, AudioSink};
use crate::config::Config;
use crate::protocol::{
    DispatchOutcome, EventDispatcher, OutboundAudio, ServerFrame, SessionTransport,
};

/// Lifecycle of one relay session.
///
/// `Closed`, `Terminated` and `Failed` are terminal; the connection is
/// released on every terminal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Loading the clip and opening the connection.
    Connecting,
    /// Sending the one outbound envelope.
    Sending,
    /// Consuming the inbound event stream.
    Receiving,
    /// The peer closed the connection.
    Closed,
    /// The remote signalled `is_final`.
    Terminated,
    /// A fatal failure ended the session.
    Failed,
}

/// One run: connect, send the clip once, consume events until the remote
/// terminates or closes.
///
/// The transport handle is owned exclusively by the session; the frame log
/// is borrowed for the duration of the run.
pub struct RelaySession {
    config: Config,
    dispatcher: EventDispatcher,
    state: SessionState,
}

impl RelaySession {
    pub fn new(config: Config) -> Result<Self> {
        let sink = AudioSink::new(&config.output_dir)?;

        Ok(Self {
            config,
            dispatcher: EventDispatcher::new(sink),
            state: SessionState::Connecting,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drive the session to a terminal state.
    ///
    /// Fatal failures (unreadable clip, handshake, send, hard receive
    /// errors) leave the state at `Failed` and surface as `Err`; peer
    /// closure and remote termination are normal outcomes.
    pub async fn run(&mut self, frame_log: &mut FrameLog) -> Result<SessionState> {
        let clip = match AudioFile::open(&self.config.input_audio_file) {
            Ok(clip) => clip,
            Err(e) => {
                self.state = SessionState::Failed;
                return Err(e.context("Failed to load input clip"));
            }
        };

        let idle_timeout = Duration::from_secs(self.config.receive_timeout_secs);
        let mut transport = match SessionTransport::connect(
            &self.config.websocket_base_uri,
            &self.config.agent_id,
            &self.config.api_key,
            idle_timeout,
        )
        .await
        {
            Ok(transport) => transport,
            Err(e) => {
                self.state = SessionState::Failed;
                return Err(anyhow::Error::new(e).context("Failed to open WebSocket connection"));
            }
        };

        self.state = SessionState::Sending;
        let envelope = OutboundAudio::from_clip(&clip);
        if let Err(e) = transport.send(&envelope).await {
            self.state = SessionState::Failed;
            transport.close().await;
            return Err(anyhow::Error::new(e).context("Failed to send input clip"));
        }
        info!(
            "Input clip sent ({} samples at {}Hz)",
            clip.samples.len(),
            clip.sample_rate
        );

        self.state = SessionState::Receiving;
        let result = self.receive_loop(&mut transport, frame_log).await;
        transport.close().await;
        result?;

        Ok(self.state)
    }

    async fn receive_loop(
        &mut self,
        transport: &mut SessionTransport,
        frame_log: &mut FrameLog,
    ) -> Result<()> {
        loop {
            let raw = match transport.receive().await {
                Ok(Some(raw)) => raw,
                Ok(None) => {
                    info!("Connection closed by peer");
                    self.state = SessionState::Closed;
                    return Ok(());
                }
                Err(e) => {
                    self.state = SessionState::Failed;
                    return Err(anyhow::Error::new(e).context("Receive failed"));
                }
            };

            debug!("Received frame: {raw}");

            // Log the verbatim frame before any decoding so the log stays a
            // faithful wire-level record.
            if let Err(e) = frame_log.append(&raw) {
                warn!("Failed to append to frame log: {e}");
            }

            let frame: ServerFrame = match serde_json::from_str(&raw) {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("Discarding unparseable frame: {e}");
                    continue;
                }
            };

            if self.dispatcher.dispatch(&frame) == DispatchOutcome::Terminate {
                self.state = SessionState::Terminated;
                return Ok(());
            }
        }
    }
}
