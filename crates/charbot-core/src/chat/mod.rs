//! Conversation state and the message-exchange engine.
//!
//! - `TranscriptStore`: append-only message log
//! - `Connectivity`: last-exchange health flag
//! - `ExchangeEngine`: one guarded request/response cycle per submission
//! - `ChatSession`: authenticated session lifecycle around the engine

pub mod connectivity;
pub mod engine;
pub mod session;
pub mod transcript;
