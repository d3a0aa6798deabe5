//! In-memory note-taking application library
//!
//! This library provides a note store with search, category filtering,
//! sorting, pinning, archiving and color tags, plus the interactive shell
//! that drives it.

mod cli;
mod config;
mod errors;
mod helper;
mod note;
mod store;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use helper::*;
pub use note::*;
pub use store::*;
pub use types::*;
