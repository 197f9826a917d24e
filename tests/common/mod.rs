#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from sketchify for tests
pub use sketchify::EdgeThresholds;
