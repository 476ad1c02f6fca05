use serde::{Deserialize, Serialize};

use crate::audio::{encode_outbound, AudioFile};

/// The single outbound message: the whole input clip, base64-encoded, plus
/// the sample rate read from the source file. Constructed once, sent once.
#[derive(Debug, Serialize)]
pub struct OutboundAudio {
    pub audio: String,
    pub sample_rate: u32,
}

impl OutboundAudio {
    pub fn from_clip(clip: &AudioFile) -> Self {
        Self {
            audio: encode_outbound(&clip.samples),
            sample_rate: clip.sample_rate,
        }
    }
}

/// Discriminator carried in a frame's `type` field.
///
/// `is_final` and `audio_event` are set by the remote independently of the
/// discriminator (frames may omit `type` entirely), so they live on
/// [`ServerFrame`] rather than on the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Keep-alive; skips all further processing of the frame.
    Ping,
    /// Transcription of the user's audio.
    UserTranscript,
    /// The agent's text response.
    AgentResponse,
    /// Unknown or absent `type`; the frame still gets the audio and
    /// termination checks.
    Unrecognized,
}

/// One inbound frame. Every recognized field is optional; unrecognized
/// fields are ignored.
#[derive(Debug, Deserialize)]
pub struct ServerFrame {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub is_final: Option<bool>,
    #[serde(default)]
    pub audio_event: Option<AudioEvent>,
    #[serde(default)]
    pub user_transcription_event: Option<UserTranscriptionEvent>,
    #[serde(default)]
    pub agent_response_event: Option<AgentResponseEvent>,
}

#[derive(Debug, Deserialize)]
pub struct AudioEvent {
    #[serde(default)]
    pub audio_base_64: String,
}

#[derive(Debug, Deserialize)]
pub struct UserTranscriptionEvent {
    #[serde(default)]
    pub user_transcript: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AgentResponseEvent {
    #[serde(default)]
    pub agent_response: Option<String>,
}

impl ServerFrame {
    pub fn kind(&self) -> EventKind {
        match self.event_type.as_deref() {
            Some("ping") => EventKind::Ping,
            Some("user_transcript") => EventKind::UserTranscript,
            Some("agent_response") => EventKind::AgentResponse,
            _ => EventKind::Unrecognized,
        }
    }

    /// The base64 audio payload, if present and non-empty.
    pub fn audio_payload(&self) -> Option<&str> {
        self.audio_event
            .as_ref()
            .map(|e| e.audio_base_64.as_str())
            .filter(|payload| !payload.is_empty())
    }

    pub fn user_transcript(&self) -> &str {
        self.user_transcription_event
            .as_ref()
            .and_then(|e| e.user_transcript.as_deref())
            .unwrap_or("N/A")
    }

    pub fn agent_response(&self) -> &str {
        self.agent_response_event
            .as_ref()
            .and_then(|e| e.agent_response.as_deref())
            .unwrap_or("N/A")
    }

    pub fn is_final(&self) -> bool {
        self.is_final.unwrap_or(false)
    }
}
