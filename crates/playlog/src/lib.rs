//! # Playlog
//!
//! Listening statistics from streaming history exports.
//!
//! This is the main binary crate: it loads configuration, ingests the
//! configured documents and prints the dashboard report as JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;

pub use app::*;
pub use error::*;
