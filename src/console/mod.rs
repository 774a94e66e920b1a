//! Command capability set and console handles
//!
//! This module defines what a command is and the input and output handles
//! it runs with.

pub mod command;
pub mod io;

// Re-export main types
pub use command::*;
pub use io::*;
