//! # Playlog Common
//!
//! Shared types, utilities, and common functionality for Playlog.
//!
//! This crate provides the error taxonomy, logging bootstrap, and the small
//! value types used across all other crates in the Playlog workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{PlaylogError, Result};
pub use logging::{init_default_logging, init_logging, LogFormat, LoggingConfig};
pub use types::*;
pub use utils::*;
