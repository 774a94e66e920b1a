//! Discovery configuration
//!
//! This module handles loading the commands directory and namespace from the
//! environment or a `.env` file, and validating them before discovery runs.

pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use parse::*;
pub use schema::*;
pub use types::*;
