//! Infrastructure layer for CharBot.
//!
//! Contains implementations of the port traits defined in `charbot-core`:
//! the HTTP generation client, credential sources (environment variables and
//! OAuth2 refresh-token grant), and the configuration file loader.

pub mod auth;
pub mod config;
pub mod generation;
