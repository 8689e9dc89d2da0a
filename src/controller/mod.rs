//! controller
//!
//! Typed client for the drydock controller's REST API.
//!
//! # Modules
//!
//! - `client`: transport, authentication, pagination, API version tracking
//! - `endpoints`: one async method per controller operation
//! - `error`: [`ApiError`]
//! - [`types`]: request and response shapes
//!
//! # Example
//!
//! ```ignore
//! use drydock::controller::ControllerClient;
//!
//! let client = ControllerClient::new("http://drydock.example.com", Some(token), true)?;
//! let apps = client.list_apps(100).await?;
//! for app in apps.items {
//!     println!("{}", app.id);
//! }
//! ```

mod client;
mod endpoints;
mod error;
pub mod types;

pub use client::{
    api_versions_compatible, normalize_controller_url, ControllerClient, API_VERSION,
    API_VERSION_HEADER,
};
pub use error::ApiError;
pub use types::ListResult;
