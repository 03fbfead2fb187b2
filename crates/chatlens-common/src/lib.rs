//! # Chatlens Common
//!
//! Shared types, utilities, and common functionality for chatlens.
//!
//! This crate provides the log record model and the error type used across
//! all other crates in the chatlens workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use types::*;
pub use utils::*;
