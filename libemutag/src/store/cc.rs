// libemutag/src/store/cc.rs

//! Capability Container (file E103) of the Type-4 emulation.

use crate::constants::{CC_LEN, NDEF_FILE_ID};

/// Mapping version 2.0
pub const MAPPING_VERSION: u8 = 0x20;
/// Maximum R-APDU data size the tag advertises
pub const MAX_LE: u16 = 0x0054;
/// Maximum C-APDU data size the tag advertises
pub const MAX_LC: u16 = 0x00FF;

/// Access byte: unrestricted
pub const ACCESS_GRANTED: u8 = 0x00;
/// Access byte: no access
pub const ACCESS_DENIED: u8 = 0xFF;

const WRITE_ACCESS_IDX: usize = 14;

/// Layout:
/// `[CCLEN(2)] [Version] [MLe(2)] [MLc(2)] [T=04] [L=06] [FileId(2)]
/// [MaxSize(2)] [Read] [Write]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityContainer {
    bytes: [u8; CC_LEN],
}

impl CapabilityContainer {
    /// CC describing an NDEF file of `ndef_capacity` bytes.
    pub fn new(ndef_capacity: u16, writable: bool) -> Self {
        let mut bytes = [0u8; CC_LEN];
        bytes[0..2].copy_from_slice(&(CC_LEN as u16).to_be_bytes());
        bytes[2] = MAPPING_VERSION;
        bytes[3..5].copy_from_slice(&MAX_LE.to_be_bytes());
        bytes[5..7].copy_from_slice(&MAX_LC.to_be_bytes());
        bytes[7] = 0x04; // NDEF File Control TLV
        bytes[8] = 0x06;
        bytes[9..11].copy_from_slice(&NDEF_FILE_ID.to_be_bytes());
        bytes[11..13].copy_from_slice(&ndef_capacity.to_be_bytes());
        bytes[13] = ACCESS_GRANTED;
        let mut cc = Self { bytes };
        cc.set_writable(writable);
        cc
    }

    /// Set the write access byte.
    pub fn set_writable(&mut self, writable: bool) {
        self.bytes[WRITE_ACCESS_IDX] = if writable {
            ACCESS_GRANTED
        } else {
            ACCESS_DENIED
        };
    }

    /// Whether write access is granted.
    pub fn is_writable(&self) -> bool {
        self.bytes[WRITE_ACCESS_IDX] == ACCESS_GRANTED
    }

    /// Advertised NDEF file size.
    pub fn max_ndef_size(&self) -> u16 {
        u16::from_be_bytes([self.bytes[11], self.bytes[12]])
    }

    /// The 15 CC bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
