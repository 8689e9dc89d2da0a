//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`console`] - The streams a command reads from and writes to
//! - [`prompts`] - Interactive prompts and confirmations
//! - [`output`] - Output layout (list headers, padded maps, tab stops, dates)
//! - [`progress`] - Spinner for in-flight controller calls
//!
//! # Design
//!
//! All output and prompts go through a [`console::Console`] so that commands
//! behave the same against a terminal, a pipe, or a test buffer.

pub mod console;
pub mod output;
pub mod progress;
pub mod prompts;

pub use console::{Capture, Console};
