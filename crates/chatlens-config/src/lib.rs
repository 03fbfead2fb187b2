//! # Chatlens Config
//!
//! Type-safe configuration management for chatlens.
//!
//! This crate provides configuration loading, validation and defaults for the
//! log source, the local time offset and the report vocabulary (locations and
//! query categories).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
