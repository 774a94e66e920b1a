//! Command discovery
//!
//! This module walks a commands directory for source files and derives the
//! type path and command name of each one.

pub mod naming;
pub mod walker;

// Re-export main types
pub use naming::*;
pub use walker::*;
