//! Logging and trace export setup for CharBot binaries.

pub mod tracing_setup;
