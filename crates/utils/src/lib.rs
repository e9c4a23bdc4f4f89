//! Common utility for extended `std` types
//!
//! These are left public for convenience.
//!
//! For example, consistent scientific formatting of numbers is useful
//! everywhere a text cube file is written.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod value_ext;

// Flatten
pub use value_ext::ValueExt;
