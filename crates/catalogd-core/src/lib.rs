//! catalogd-core: shared types for the catalogd application.
//!
//! Carries the unified [`Error`] type, the crate-wide [`Result`] alias, and
//! the application [`config`] types used by every other crate.

pub mod config;
pub mod error;

pub use error::{Error, Result};
