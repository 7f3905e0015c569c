//! Business logic and port trait definitions for CharBot.
//!
//! This crate defines the "ports" (`CredentialSource`, `GenerationClient`)
//! that the infrastructure layer implements, plus the session-authenticated
//! exchange engine built on top of them. It depends only on `charbot-types`
//! -- never on `charbot-infra` or any network crate.

pub mod auth;
pub mod chat;
pub mod event;
pub mod generation;
