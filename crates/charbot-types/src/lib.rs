//! Shared domain types for CharBot.
//!
//! This crate contains the domain types used across the CharBot client:
//! messages, credentials, connectivity status, exchange events, configuration,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror, secrecy.

pub mod config;
pub mod connectivity;
pub mod credential;
pub mod error;
pub mod event;
pub mod generation;
pub mod message;
