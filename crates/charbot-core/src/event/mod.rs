//! Event distribution for exchange state changes.

pub mod bus;
