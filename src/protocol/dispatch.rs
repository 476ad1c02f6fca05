use tracing::{debug, error, info, warn};

use super::messages::{EventKind, ServerFrame};
use crate::audio::{decode_inbound, AudioSink};

/// What the session loop should do after a frame is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Continue,
    /// The remote signalled the end of the session (`is_final`).
    Terminate,
}

/// Routes parsed inbound frames: surfaces transcripts and agent responses,
/// persists audio chunks, and watches for the termination signal.
///
/// Failures on one frame never escape; the chunk or field in question is
/// dropped and the outcome is still computed for the rest of the frame.
pub struct EventDispatcher {
    sink: AudioSink,
}

impl EventDispatcher {
    pub fn new(sink: AudioSink) -> Self {
        Self { sink }
    }

    pub fn dispatch(&self, frame: &ServerFrame) -> DispatchOutcome {
        match frame.kind() {
            EventKind::Ping => {
                // Keep-alive: skip the audio and termination checks too.
                debug!("Keep-alive ping received");
                return DispatchOutcome::Continue;
            }
            EventKind::UserTranscript => {
                info!("User transcript: {}", frame.user_transcript());
            }
            EventKind::AgentResponse => {
                info!("Agent response: {}", frame.agent_response());
            }
            EventKind::Unrecognized => {}
        }

        if let Some(payload) = frame.audio_payload() {
            match decode_inbound(payload) {
                Ok(samples) => {
                    if let Err(e) = self.sink.write_chunk(&samples) {
                        error!("Failed to persist audio chunk: {e:#}");
                    }
                }
                Err(e) => warn!("Dropping undecodable audio chunk: {e}"),
            }
        }

        if frame.is_final() {
            info!("Final frame received, ending session");
            return DispatchOutcome::Terminate;
        }

        DispatchOutcome::Continue
    }
}
