//! Wire protocol for the conversational-agent session
//!
//! This module covers the three protocol concerns:
//! - typed outbound/inbound message shapes (`messages`)
//! - the authenticated WebSocket connection (`transport`)
//! - routing of inbound frames to their handlers (`dispatch`)

pub mod dispatch;
pub mod messages;
pub mod transport;

pub use dispatch::{DispatchOutcome, EventDispatcher};
pub use messages::{EventKind, OutboundAudio, ServerFrame};
pub use transport::{SessionTransport, TransportError};
