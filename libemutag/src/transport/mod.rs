// libemutag/src/transport/mod.rs

//! Transports between the session loop and the radio.

/// Scripted transports
pub mod mock;
/// PN532 target-mode adapter
#[cfg(feature = "pn532")]
pub mod pn532;
/// Transport traits
pub mod traits;

pub use mock::{MockLink, MockTarget};
#[cfg(feature = "pn532")]
pub use pn532::Pn532Target;
pub use traits::{Link, TargetTransport};
