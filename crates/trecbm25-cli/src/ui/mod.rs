//! # CLI UI Module
//!
//! Consistent styling and formatting layer for the search engine's CLI output.
//!
//! ## Design Principles
//!
//! 1. **Scannable**: Users should identify success/failure in < 1 second
//! 2. **Consistent**: Same patterns across all binaries
//! 3. **Accessible**: Work without colors (respect `NO_COLOR`)
//!
//! ## Module Structure
//!
//! - `color`: Color mode detection and terminal capability checks
//! - `style`: Message types, prefixes, and styling functions

pub mod color;
pub mod style;

pub use color::ColorMode;
pub use style::{MessageType, Style};
