// libemutag/src/transport/pn532/frame.rs

//! PN532 information frames and the ACK frame.

use crate::constants::{PN532_ACK, PN532_POSTAMBLE, PN532_PREAMBLE};
use crate::{Error, Result};

/// Normal frames carry at most 255 bytes; longer payloads need the
/// extended form.
const NORMAL_MAX_LEN: usize = 255;
const EXTENDED_MAX_LEN: usize = 0xFFFF;
const NORMAL_MIN_FRAME_LEN: usize = 7;
const EXTENDED_MIN_FRAME_LEN: usize = 10;
const ERROR_FRAME_TFI: u8 = 0x7F;

/// Length checksum: LEN + LCS == 0 (mod 256)
pub fn lcs(len: u8) -> u8 {
    0u8.wrapping_sub(len)
}

/// Data checksum: sum(payload) + DCS == 0 (mod 256)
pub fn dcs(payload: &[u8]) -> u8 {
    payload.iter().fold(0u8, |acc, &b| acc.wrapping_sub(b))
}

/// PN532 information frame helper.
/// Normal:   [00 00 FF] [LEN] [LCS] [Payload] [DCS] [00]
/// Extended: [00 00 FF] [FF FF] [LENM] [LENL] [LCS] [Payload] [DCS] [00]
pub struct Frame;

impl Frame {
    /// Wrap a payload (TFI onwards). Payloads over 255 bytes use the
    /// extended length form.
    pub fn encode(payload: &[u8]) -> Result<Vec<u8>> {
        if payload.len() > EXTENDED_MAX_LEN {
            return Err(Error::InvalidLength {
                expected: EXTENDED_MAX_LEN,
                actual: payload.len(),
            });
        }

        let mut out = Vec::with_capacity(EXTENDED_MIN_FRAME_LEN + payload.len());
        out.extend_from_slice(&PN532_PREAMBLE);
        if payload.len() <= NORMAL_MAX_LEN {
            let len = payload.len() as u8;
            out.push(len);
            out.push(lcs(len));
        } else {
            let [hi, lo] = (payload.len() as u16).to_be_bytes();
            out.extend_from_slice(&[0xFF, 0xFF, hi, lo]);
            out.push(lcs(hi.wrapping_add(lo)));
        }
        out.extend_from_slice(payload);
        out.push(dcs(payload));
        out.push(PN532_POSTAMBLE);
        Ok(out)
    }

    /// Decode a full frame and return its payload (TFI onwards).
    pub fn decode(frame: &[u8]) -> Result<Vec<u8>> {
        if frame.len() < NORMAL_MIN_FRAME_LEN {
            return Err(Error::InvalidLength {
                expected: NORMAL_MIN_FRAME_LEN,
                actual: frame.len(),
            });
        }
        if frame[..3] != PN532_PREAMBLE {
            return Err(Error::FrameFormat("invalid preamble".into()));
        }

        let (len, payload_start) = if frame[3] == 0xFF && frame[4] == 0xFF {
            if frame.len() < EXTENDED_MIN_FRAME_LEN {
                return Err(Error::InvalidLength {
                    expected: EXTENDED_MIN_FRAME_LEN,
                    actual: frame.len(),
                });
            }
            let (hi, lo) = (frame[5], frame[6]);
            let expected = lcs(hi.wrapping_add(lo));
            if frame[7] != expected {
                return Err(Error::ChecksumMismatch {
                    expected,
                    actual: frame[7],
                });
            }
            (u16::from_be_bytes([hi, lo]) as usize, 8usize)
        } else {
            let expected = lcs(frame[3]);
            if frame[4] != expected {
                return Err(Error::ChecksumMismatch {
                    expected,
                    actual: frame[4],
                });
            }
            (frame[3] as usize, 5usize)
        };

        let required_len = payload_start + len + 2;
        if frame.len() != required_len {
            return Err(Error::InvalidLength {
                expected: required_len,
                actual: frame.len(),
            });
        }

        let payload_end = payload_start + len;
        let payload = &frame[payload_start..payload_end];
        let expected = dcs(payload);
        if frame[payload_end] != expected {
            return Err(Error::ChecksumMismatch {
                expected,
                actual: frame[payload_end],
            });
        }
        if frame[payload_end + 1] != PN532_POSTAMBLE {
            return Err(Error::FrameFormat("invalid postamble".into()));
        }
        if payload == [ERROR_FRAME_TFI] {
            return Err(Error::FrameFormat("chip reported syntax error frame".into()));
        }

        Ok(payload.to_vec())
    }

    /// Whether `frame` is the six-byte ACK.
    pub fn is_ack(frame: &[u8]) -> bool {
        frame == PN532_ACK
    }
}
