//! Session lifecycle
//!
//! This module provides the `RelaySession` state machine that manages:
//! - loading and sending the input clip
//! - the long-lived receive loop over the agent's event stream
//! - verbatim frame logging (`FrameLog`)
//! - terminal-state classification (closed / terminated / failed)

mod framelog;
mod session;

pub use framelog::FrameLog;
pub use session::{RelaySession, SessionState};
