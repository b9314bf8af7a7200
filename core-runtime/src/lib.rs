//! # Core Runtime Module
//!
//! Foundational runtime infrastructure shared by the editor crates:
//! - Logging and tracing setup
//! - Editor configuration and bridge injection
//! - Event bus for media, upload and draft notifications
//!
//! Editing crates (`core-media`, `core-content`) stay free of runtime concerns;
//! `core-upload` and `core-service` build on this crate.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
