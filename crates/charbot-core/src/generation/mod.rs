//! Remote text-generation port and reply normalization.
//!
//! - `GenerationClient`: RPITIT trait for the generation endpoint
//! - `BoxGenerationClient`: object-safe wrapper
//! - `strip_code_fences`: removes an enclosing fence from a completion

pub mod box_client;
pub mod client;
pub mod fence;
