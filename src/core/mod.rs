//! core
//!
//! Local domain types for drydock.
//!
//! # Modules
//!
//! - [`kv`] - `KEY=VALUE` parsing for config, tags and registry credentials
//! - [`types`] - Validated argument values: versions, scale targets, limits, keys
//! - [`profile`] - The profile file holding the controller URL and token
//!
//! # Design Principles
//!
//! - Arguments are validated once, before any network call
//! - A batch with one bad token is rejected whole

pub mod kv;
pub mod profile;
pub mod types;
