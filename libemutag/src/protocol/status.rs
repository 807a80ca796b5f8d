// libemutag/src/protocol/status.rs

//! Response Code Table: semantic outcome to ISO7816-4 status word.

use derive_more::Display;

/// Outcome of a single APDU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Outcome {
    /// 9000
    #[display(fmt = "command complete")]
    CommandComplete,
    /// 6A82
    #[display(fmt = "tag not found")]
    TagNotFound,
    /// 6A81
    #[display(fmt = "function not supported")]
    FunctionNotSupported,
    /// 6581
    #[display(fmt = "memory failure")]
    MemoryFailure,
    /// 6282
    #[display(fmt = "end of file before reached Le bytes")]
    EndOfFileBeforeReachedLength,
}

/// Two-byte status word (SW1, SW2) appended to every response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{:02x}{:02x}", sw1, sw2)]
pub struct StatusWord {
    /// First status byte
    pub sw1: u8,
    /// Second status byte
    pub sw2: u8,
}

impl StatusWord {
    /// Status word from its two bytes.
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// Wire order `[SW1, SW2]`.
    pub fn to_bytes(&self) -> [u8; 2] {
        [self.sw1, self.sw2]
    }

    /// Status word as `0xSW1SW2`.
    pub fn as_u16(&self) -> u16 {
        u16::from_be_bytes(self.to_bytes())
    }

    /// Extract the trailing status word of a response frame.
    pub fn from_response(frame: &[u8]) -> Option<Self> {
        match frame {
            [.., sw1, sw2] => Some(Self::new(*sw1, *sw2)),
            _ => None,
        }
    }

    /// Reverse lookup into the table.
    pub fn outcome(&self) -> Option<Outcome> {
        [
            Outcome::CommandComplete,
            Outcome::TagNotFound,
            Outcome::FunctionNotSupported,
            Outcome::MemoryFailure,
            Outcome::EndOfFileBeforeReachedLength,
        ]
        .into_iter()
        .find(|o| status_word_for(*o) == *self)
    }
}

/// Map an outcome to its fixed status word.
pub const fn status_word_for(outcome: Outcome) -> StatusWord {
    match outcome {
        Outcome::CommandComplete => StatusWord::new(0x90, 0x00),
        Outcome::TagNotFound => StatusWord::new(0x6A, 0x82),
        Outcome::FunctionNotSupported => StatusWord::new(0x6A, 0x81),
        Outcome::MemoryFailure => StatusWord::new(0x65, 0x81),
        Outcome::EndOfFileBeforeReachedLength => StatusWord::new(0x62, 0x82),
    }
}

impl Outcome {
    /// Same as [`status_word_for`].
    pub const fn status_word(self) -> StatusWord {
        status_word_for(self)
    }
}
