// libemutag/src/types.rs

//! Identity, file and session types shared across the crate.

use crate::Error;
use crate::constants::{CC_FILE_ID, NDEF_FILE_ID};
use derive_more::Display;
use std::convert::TryFrom;

/// NFCID1 fragment advertised during anticollision - Newtype Pattern (3 bytes)
///
/// The PN532 fixes the first UID byte itself, so the caller only controls
/// the remaining three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NfcId1Fragment([u8; 3]);

impl NfcId1Fragment {
    /// Wrap three UID bytes.
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }

    /// Raw UID bytes.
    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }

    /// Lowercase hex rendering, e.g. `"123456"`.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for NfcId1Fragment {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 3 {
            return Err(Error::InvalidLength {
                expected: 3,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 3];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// File identifier (u16, big-endian on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(u16);

impl FileId {
    /// Capability Container file (E103)
    pub const CAPABILITY_CONTAINER: Self = Self(CC_FILE_ID);
    /// NDEF file (E104)
    pub const NDEF: Self = Self(NDEF_FILE_ID);

    /// Wrap a raw identifier.
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Identifier as an integer.
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Read the identifier from the two SELECT data bytes.
    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    /// Wire form of the identifier.
    pub fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Resolve the identifier to one of the emulated files.
    pub fn tag_file(&self) -> Option<TagFile> {
        match *self {
            Self::CAPABILITY_CONTAINER => Some(TagFile::CapabilityContainer),
            Self::NDEF => Some(TagFile::Ndef),
            _ => None,
        }
    }
}

/// The virtual files backing the Type-4 emulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TagFile {
    /// Read-only Capability Container
    #[display(fmt = "CC")]
    CapabilityContainer,
    /// Length-prefixed NDEF message file
    #[display(fmt = "NDEF")]
    Ndef,
}

/// File activated by the most recent successful SELECT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum SelectedFile {
    /// Nothing selected yet, or the application was just selected
    #[default]
    #[display(fmt = "none")]
    None,
    /// CC file selected
    #[display(fmt = "CC")]
    CapabilityContainer,
    /// NDEF file selected
    #[display(fmt = "NDEF")]
    Ndef,
}

impl SelectedFile {
    /// The emulated file this selection points at, if any.
    pub fn file(self) -> Option<TagFile> {
        match self {
            Self::None => None,
            Self::CapabilityContainer => Some(TagFile::CapabilityContainer),
            Self::Ndef => Some(TagFile::Ndef),
        }
    }
}

impl From<TagFile> for SelectedFile {
    fn from(file: TagFile) -> Self {
        match file {
            TagFile::CapabilityContainer => Self::CapabilityContainer,
            TagFile::Ndef => Self::Ndef,
        }
    }
}

/// How frames are exchanged with the initiator once activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Exchange {
    /// ISO14443-4 blocks carrying ISO7816-4 APDUs (Type-4 tag)
    #[default]
    #[display(fmt = "apdu")]
    Apdu,
    /// Raw ISO14443-3 frames (Type-2 tag)
    #[display(fmt = "raw")]
    Raw,
}

/// Whether UPDATE-BINARY requires the NDEF file to be selected first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdatePolicy {
    /// Writes always target the NDEF file
    #[default]
    Direct,
    /// Writes are refused with TagNotFound unless NDEF is selected
    RequireNdefSelected,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// No initiator activated the target in time, or negotiation was refused
    #[display(fmt = "handshake failed")]
    HandshakeFailed,
    /// The initiator sent HALT
    #[display(fmt = "initiator halted")]
    InitiatorHalted,
    /// Preconditioning failed, or the link failed after activation
    #[display(fmt = "transport error")]
    TransportError,
    /// The frame handler returned an error or asked to stop
    #[display(fmt = "handler stopped")]
    HandlerStopped,
    /// A raw frame the block handler does not implement
    #[display(fmt = "unsupported command")]
    UnsupportedCommand,
}

/// Tag identity advertised to the initiator during activation.
///
/// Encodes to the TgInitAsTarget parameter block:
/// `[Mode] [SENS_RES(2)] [NFCID1t(3)] [SEL_RES] [FeliCa(18)] [NFCID3t(10)]
/// [LenGt] [Gt..] [LenTk] [Tk..]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetDescriptor {
    /// Frame exchange used after activation
    pub exchange: Exchange,
    /// TgInitAsTarget mode byte
    pub mode: u8,
    /// ATQA advertised during anticollision
    pub sens_res: [u8; 2],
    /// UID bytes the chip does not fix itself
    pub nfcid1: NfcId1Fragment,
    /// SAK advertised during selection
    pub sel_res: u8,
    /// FeliCa polling response (unused in ISO14443-A mode)
    pub felica_params: [u8; 18],
    /// NFCID3 for DEP activation
    pub nfcid3t: [u8; 10],
    /// General bytes for ATR_RES
    pub general_bytes: Vec<u8>,
    /// Historical bytes for the ATS
    pub historical_bytes: Vec<u8>,
}

impl TargetDescriptor {
    /// Passive-only mode
    pub const MODE_PASSIVE_ONLY: u8 = 0x01;
    /// SEL_RES advertising ISO14443-4 compliance
    pub const SEL_RES_ISO14443_4: u8 = 0x20;
    /// SEL_RES of a plain ISO14443-3 (Type-2) tag
    pub const SEL_RES_TYPE2: u8 = 0x00;
    /// Longest general byte list the chip accepts
    pub const MAX_GENERAL_BYTES: usize = 47;
    /// Longest historical byte list the chip accepts
    pub const MAX_HISTORICAL_BYTES: usize = 48;

    /// Default ISO14443-A identity for the given exchange. SEL_RES follows
    /// the exchange: 0x20 for APDUs, 0x00 for raw frames.
    pub fn new(exchange: Exchange) -> Self {
        let sel_res = match exchange {
            Exchange::Apdu => Self::SEL_RES_ISO14443_4,
            Exchange::Raw => Self::SEL_RES_TYPE2,
        };
        Self {
            exchange,
            mode: Self::MODE_PASSIVE_ONLY,
            sens_res: [0x04, 0x00],
            nfcid1: NfcId1Fragment::default(),
            sel_res,
            felica_params: [0; 18],
            nfcid3t: [0; 10],
            general_bytes: Vec::new(),
            historical_bytes: Vec::new(),
        }
    }

    /// Replace the UID fragment.
    pub fn with_uid(mut self, uid: NfcId1Fragment) -> Self {
        self.nfcid1 = uid;
        self
    }

    /// Encode the TgInitAsTarget parameters (without the command code).
    ///
    /// Fails with `InvalidLength` when a byte list exceeds what its one-byte
    /// length field and the chip allow.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        check_len(&self.general_bytes, Self::MAX_GENERAL_BYTES)?;
        check_len(&self.historical_bytes, Self::MAX_HISTORICAL_BYTES)?;

        let mut out =
            Vec::with_capacity(37 + self.general_bytes.len() + self.historical_bytes.len());
        out.push(self.mode);
        out.extend_from_slice(&self.sens_res);
        out.extend_from_slice(self.nfcid1.as_bytes());
        out.push(self.sel_res);
        out.extend_from_slice(&self.felica_params);
        out.extend_from_slice(&self.nfcid3t);
        out.push(self.general_bytes.len() as u8);
        out.extend_from_slice(&self.general_bytes);
        out.push(self.historical_bytes.len() as u8);
        out.extend_from_slice(&self.historical_bytes);
        Ok(out)
    }
}

fn check_len(bytes: &[u8], max: usize) -> Result<(), Error> {
    if bytes.len() > max {
        return Err(Error::InvalidLength {
            expected: max,
            actual: bytes.len(),
        });
    }
    Ok(())
}
