// libemutag/src/lib.rs

//! libemutag
//!
//! NFC Forum tag emulation for PN532-class radios in target mode. Serves a
//! Type-4 NDEF application over ISO7816-4 APDUs, or a Type-2 block image to
//! raw initiators.
#![warn(missing_docs)]

/// Protocol constants
pub mod constants;
/// Emulation engine and session loop
pub mod emulator;
/// Error type
pub mod error;
/// Common imports
pub mod prelude;
/// APDU and Type-2 frame codecs
pub mod protocol;
/// Virtual files
pub mod store;
/// Frame builders and scripted mocks for tests
pub mod test_support;
/// Chip transports
pub mod transport;
/// Shared types
pub mod types;
/// Helpers
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
