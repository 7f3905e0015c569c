//! Interactive terminal chat.
//!
//! This module is the presentation layer over `ChatSession`: it renders the
//! transcript, shows a thinking spinner while an exchange is in flight, and
//! reflects connectivity and credential changes published on the event bus.
//! Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
