//! Helper Utilities
//!
//! Common utilities used across the crate.

mod fs;
mod trace;

pub use fs::*;
pub use trace::*;
