//! # Chatlens
//!
//! Command line reporting over a campus chatbot's interaction log.
//!
//! This is the binary crate: it loads the configuration, opens the SQLite
//! log and prints reports built by `chatlens-report`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod error;
pub mod render;

pub use app::*;
pub use cli::*;
pub use error::*;
pub use render::*;
