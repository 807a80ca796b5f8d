// libemutag/src/store/blocks.rs

//! Type-2 memory image.

use crate::constants::{T2_BLOCK_SIZE, T2_HEADER_LEN, T2_READ_LEN};
use crate::{Error, Result};

/// Built-in Type-2 image: read-only CC with a 48-byte data area holding a
/// Smart Poster ("Libnfc", http://libnfc.org).
#[rustfmt::skip]
pub const DEFAULT_IMAGE: [u8; 64] = [
    0x00, 0x00, 0x00, 0x00, // Block 0
    0x00, 0x00, 0x00, 0x00, // Block 1
    0x00, 0x00, 0xFF, 0xFF, // Block 2: static lock bytes, CC and data area locked
    0xE1, 0x10, 0x06, 0x0F, // Block 3: CC, Type-2 v1.0, 48 byte data area, read-only

    0x03, 33,   0xD1, 0x02, // Block 4: NDEF TLV
    0x1C, 0x53, 0x70, 0x91,
    0x01, 0x09, 0x54, 0x02,
    0x65, 0x6E, 0x4C, 0x69,

    0x62, 0x6E, 0x66, 0x63,
    0x51, 0x01, 0x0B, 0x55,
    0x03, 0x6C, 0x69, 0x62,
    0x6E, 0x66, 0x63, 0x2E,

    0x6F, 0x72, 0x67, 0x00,
    0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
];

const TLV_NDEF: u8 = 0x03;
const TLV_TERMINATOR: u8 = 0xFE;
/// CC data-area size is expressed in 8-byte units in a single byte
const MAX_DATA_AREA: usize = 0xFF * 8;
const MIN_DATA_AREA: usize = 48;

/// Type-2 memory image served block-wise to raw READ commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMemory {
    bytes: Vec<u8>,
}

impl Default for BlockMemory {
    fn default() -> Self {
        Self {
            bytes: DEFAULT_IMAGE.to_vec(),
        }
    }
}

impl BlockMemory {
    /// Use an explicit image. It must cover at least one READ (16 bytes)
    /// and consist of whole blocks.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < T2_READ_LEN {
            return Err(Error::InvalidLength {
                expected: T2_READ_LEN,
                actual: bytes.len(),
            });
        }
        if bytes.len() % T2_BLOCK_SIZE != 0 {
            let expected = bytes.len().next_multiple_of(T2_BLOCK_SIZE);
            return Err(Error::InvalidLength {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    /// Build a read-only image holding `message` in an NDEF TLV.
    pub fn from_ndef(message: &[u8]) -> Result<Self> {
        let mut tlv = Vec::with_capacity(message.len() + 5);
        tlv.push(TLV_NDEF);
        if message.len() < 0xFF {
            tlv.push(message.len() as u8);
        } else {
            tlv.push(0xFF);
            tlv.extend_from_slice(&(message.len() as u16).to_be_bytes());
        }
        tlv.extend_from_slice(message);
        tlv.push(TLV_TERMINATOR);

        let data_area = tlv.len().next_multiple_of(8).max(MIN_DATA_AREA);
        if data_area > MAX_DATA_AREA {
            let overhead = tlv.len() - message.len();
            return Err(Error::NdefTooLarge {
                capacity: MAX_DATA_AREA - overhead,
                actual: message.len(),
            });
        }

        let mut bytes = vec![0u8; T2_HEADER_LEN + data_area];
        bytes[10..12].copy_from_slice(&[0xFF, 0xFF]);
        bytes[12..16].copy_from_slice(&[0xE1, 0x10, (data_area / 8) as u8, 0x0F]);
        bytes[T2_HEADER_LEN..T2_HEADER_LEN + tlv.len()].copy_from_slice(&tlv);
        Ok(Self { bytes })
    }

    /// Number of 4-byte blocks.
    pub fn block_count(&self) -> usize {
        self.bytes.len() / T2_BLOCK_SIZE
    }

    /// Whole image.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// READ returns four consecutive blocks starting at `block`, rolling
    /// over to block 0 past the end of memory.
    pub fn read(&self, block: u8) -> [u8; T2_READ_LEN] {
        let len = self.bytes.len();
        let start = (block as usize * T2_BLOCK_SIZE) % len;
        let mut out = [0u8; T2_READ_LEN];
        for (i, b) in out.iter_mut().enumerate() {
            *b = self.bytes[(start + i) % len];
        }
        out
    }
}
