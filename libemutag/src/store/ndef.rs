// libemutag/src/store/ndef.rs

//! NDEF file (E104).

use crate::constants::{NDEF_LENGTH_PREFIX, NDEF_MIN_CAPACITY};
use crate::{Error, Result};

/// Fixed-capacity NDEF file: `[NLEN(2, big-endian)] [message..] [free..]`
///
/// The stored length prefix never exceeds `capacity - 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefFile {
    buf: Vec<u8>,
    written: bool,
}

impl NdefFile {
    /// Create a zeroed file. `capacity` includes the length prefix and is
    /// limited to what the CC can advertise (u16).
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity < NDEF_MIN_CAPACITY {
            return Err(Error::InvalidLength {
                expected: NDEF_MIN_CAPACITY,
                actual: capacity,
            });
        }
        if capacity > u16::MAX as usize {
            return Err(Error::InvalidLength {
                expected: u16::MAX as usize,
                actual: capacity,
            });
        }
        Ok(Self {
            buf: vec![0u8; capacity],
            written: false,
        })
    }

    /// File size including the prefix.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Largest message the file can hold
    pub fn max_message_len(&self) -> usize {
        self.capacity() - NDEF_LENGTH_PREFIX
    }

    /// Replace the content. Oversize messages are rejected and leave the
    /// buffer untouched.
    pub fn set_message(&mut self, message: &[u8]) -> Result<()> {
        if message.len() > self.max_message_len() {
            return Err(Error::NdefTooLarge {
                capacity: self.max_message_len(),
                actual: message.len(),
            });
        }
        let end = NDEF_LENGTH_PREFIX + message.len();
        self.buf[..NDEF_LENGTH_PREFIX].copy_from_slice(&(message.len() as u16).to_be_bytes());
        self.buf[NDEF_LENGTH_PREFIX..end].copy_from_slice(message);
        self.buf[end..].fill(0);
        Ok(())
    }

    /// Length stored in the prefix
    pub fn message_len(&self) -> usize {
        u16::from_be_bytes([self.buf[0], self.buf[1]]) as usize
    }

    /// Content region described by the current prefix
    pub fn message(&self) -> &[u8] {
        &self.buf[NDEF_LENGTH_PREFIX..NDEF_LENGTH_PREFIX + self.message_len()]
    }

    /// Whole file including the prefix
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Bytes `offset..offset + length`, or `OutOfRange`.
    pub fn read(&self, offset: usize, length: usize) -> Result<&[u8]> {
        let end = self.checked_end(offset, length)?;
        Ok(&self.buf[offset..end])
    }

    /// Write `payload` at `offset`. When the write touches the prefix the
    /// resulting length is validated before anything is committed.
    pub fn write(&mut self, offset: usize, payload: &[u8]) -> Result<()> {
        let end = self.checked_end(offset, payload.len())?;

        if offset < NDEF_LENGTH_PREFIX && !payload.is_empty() {
            let mut prefix = [self.buf[0], self.buf[1]];
            for (i, slot) in prefix.iter_mut().enumerate().skip(offset) {
                if let Some(&b) = payload.get(i - offset) {
                    *slot = b;
                }
            }
            let length = u16::from_be_bytes(prefix) as usize;
            if length > self.max_message_len() {
                return Err(Error::InvalidNdefLength {
                    length,
                    capacity: self.max_message_len(),
                });
            }
        }

        self.buf[offset..end].copy_from_slice(payload);
        self.written = true;
        Ok(())
    }

    /// Whether an initiator write succeeded since the last reset
    pub fn written(&self) -> bool {
        self.written
    }

    /// Reset the written flag at session start.
    pub fn clear_written(&mut self) {
        self.written = false;
    }

    fn checked_end(&self, offset: usize, length: usize) -> Result<usize> {
        match offset.checked_add(length) {
            Some(end) if end <= self.capacity() => Ok(end),
            _ => Err(Error::OutOfRange {
                offset,
                length,
                capacity: self.capacity(),
            }),
        }
    }
}
