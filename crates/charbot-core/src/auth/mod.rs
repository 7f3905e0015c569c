//! Credential acquisition and renewal.
//!
//! - `CredentialSource`: RPITIT trait for identity providers
//! - `BoxCredentialSource`: object-safe wrapper for runtime source selection
//! - `TokenManager`: owns the current credential for a session

pub mod box_source;
pub mod source;
pub mod token_manager;
