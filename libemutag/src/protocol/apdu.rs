// libemutag/src/protocol/apdu.rs

//! ISO7816-4 command APDUs.

use crate::constants::{
    APDU_CLA, APDU_DATA, APDU_HEADER_LEN, APDU_INS, APDU_LC, APDU_P1, APDU_P2,
    INS_READ_BINARY, INS_SELECT_FILE, INS_UPDATE_BINARY,
};
use crate::Result;
use crate::protocol::parser::{ensure_len, slice_at};

/// ISO7816-4 instructions understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// A4
    SelectFile,
    /// B0
    ReadBinary,
    /// D6
    UpdateBinary,
    /// Anything else, answered with 6A81
    Other(u8),
}

impl From<u8> for Instruction {
    fn from(ins: u8) -> Self {
        match ins {
            INS_SELECT_FILE => Self::SelectFile,
            INS_READ_BINARY => Self::ReadBinary,
            INS_UPDATE_BINARY => Self::UpdateBinary,
            other => Self::Other(other),
        }
    }
}

/// Borrowed view over a command frame.
/// Format: [CLA] [INS] [P1] [P2] [Lc|Le] [Data(Lc)..]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandApdu<'a> {
    /// Class byte (not interpreted)
    pub cla: u8,
    /// Instruction byte
    pub ins: u8,
    /// First parameter; high offset byte for READ/UPDATE
    pub p1: u8,
    /// Second parameter; low offset byte for READ/UPDATE
    pub p2: u8,
    /// Lc for commands carrying data, Le for READ-BINARY
    pub lc: u8,
    body: &'a [u8],
}

impl<'a> CommandApdu<'a> {
    /// Parse the fixed header. Frames shorter than the header are rejected.
    pub fn parse(frame: &'a [u8]) -> Result<Self> {
        ensure_len(frame, APDU_HEADER_LEN)?;
        Ok(Self {
            cla: frame[APDU_CLA],
            ins: frame[APDU_INS],
            p1: frame[APDU_P1],
            p2: frame[APDU_P2],
            lc: frame[APDU_LC],
            body: &frame[APDU_DATA..],
        })
    }

    /// Decoded instruction.
    pub fn instruction(&self) -> Instruction {
        Instruction::from(self.ins)
    }

    /// 16-bit file offset carried in P1/P2
    pub fn offset(&self) -> u16 {
        u16::from_be_bytes([self.p1, self.p2])
    }

    /// Expected response length for READ-BINARY
    pub fn le(&self) -> usize {
        self.lc as usize
    }

    /// Command data, `Lc` bytes. Fails if the frame is shorter than declared.
    pub fn data(&self) -> Result<&'a [u8]> {
        slice_at(self.body, 0, self.lc as usize)
    }
}
