//! Utility functions module
//!
//! Provider text sanitising and score/duration formatting.

pub mod format;
pub mod text;

// Re-export commonly used functions
pub use format::{format_elapsed, format_percentage, score_line};
pub use text::sanitize;
