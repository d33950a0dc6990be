//! Various utilities
//!
//! External create wrappers, small functions, etc.

pub mod progress;
pub mod random;
