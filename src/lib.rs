pub mod audio;
pub mod config;
pub mod protocol;
pub mod session;

pub use audio::{decode_inbound, encode_outbound, AudioFile, AudioSink, DecodeError};
pub use config::Config;
pub use protocol::{
    DispatchOutcome, EventDispatcher, EventKind, OutboundAudio, ServerFrame, SessionTransport,
    TransportError,
};
pub use session::{FrameLog, RelaySession, SessionState};
