//! Small helpers shared by the frame codecs, the session loop and the tests.

/// Hex rendering and parsing
pub mod hex;
/// Timeout defaults
pub mod timeout;

pub use hex::*;
pub use timeout::*;
