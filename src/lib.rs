//! drydock - command-line client for the drydock application platform
//!
//! drydock talks to a platform controller over its REST API to create and
//! deploy applications and to manage their config, domains, certificates,
//! processes, releases and access.
//!
//! # Architecture
//!
//! - [`cli`] - Routing, option parsing and one handler per `domain:verb`
//! - [`controller`] - Async HTTP client for the controller API
//! - [`core`] - The local profile and the argument grammars (key/value
//!   assignments, limits, scale targets, versions, keys)
//! - [`git`] - Remote management for binding a repository to an app
//! - [`ui`] - Console streams, prompts, formatting and the progress spinner
//! - [`logging`] - `tracing` diagnostics on standard error
//!
//! # Invariants
//!
//! 1. Command output goes through a [`ui::Console`], never straight to the
//!    process streams
//! 2. The auth token is persisted only by login, registration and token
//!    regeneration, and is never printed
//! 3. Every controller call checks API compatibility before its result is used

pub mod cli;
pub mod controller;
pub mod core;
pub mod git;
pub mod logging;
pub mod ui;
