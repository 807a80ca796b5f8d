// libemutag/src/protocol/block.rs

//! Raw Type-2 commands.

use crate::constants::{T2_CMD_HALT, T2_CMD_READ};

/// Raw Type-2 command decoded from the first two bytes of a frame:
/// `[Cmd] [Block]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockCommand {
    /// READ four blocks starting at `block`
    Read {
        /// First block number
        block: u8,
    },
    /// HALT
    Halt,
    /// Anything else
    Unsupported {
        /// Command byte, if the frame had one
        code: Option<u8>,
    },
}

impl BlockCommand {
    /// Classify a raw frame. Never fails.
    pub fn decode(frame: &[u8]) -> Self {
        match frame {
            [T2_CMD_READ, block, ..] => Self::Read { block: *block },
            [T2_CMD_HALT, _, ..] => Self::Halt,
            [code, _, ..] => Self::Unsupported { code: Some(*code) },
            // Shorter than the two fixed bytes
            _ => Self::Unsupported {
                code: frame.first().copied(),
            },
        }
    }
}
