// libemutag/src/protocol/mod.rs

//! Wire formats exchanged with the initiator.

/// Command APDU view
pub mod apdu;
/// Type-2 command decoding
pub mod block;
/// Bounds-checked byte readers
pub mod parser;
/// Response frame buffer
pub mod response;
/// Status words
pub mod status;

pub use apdu::{CommandApdu, Instruction};
pub use block::BlockCommand;
pub use response::ResponseFrame;
pub use status::{Outcome, StatusWord, status_word_for};
