//! State-change events published by the exchange engine.
//!
//! The presentation layer subscribes to these instead of polling shared
//! mutable state. Every transcript append, connectivity change, and
//! in-flight flag change produces exactly one event.

use serde::{Deserialize, Serialize};

use crate::connectivity::ConnectivityStatus;
use crate::message::Message;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExchangeEvent {
    /// A message was appended to the transcript.
    MessageAppended { message: Message },

    /// Connectivity status was written (even if unchanged).
    ConnectivityChanged { status: ConnectivityStatus },

    /// An exchange started (`true`) or finished (`false`).
    AwaitingReplyChanged { awaiting: bool },

    /// The token manager gained or lost its credential.
    CredentialChanged { held: bool },
}
