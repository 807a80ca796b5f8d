// libemutag/src/protocol/response.rs

//! Bounded response buffer.

use crate::protocol::status::{Outcome, StatusWord};
use crate::{Error, Result};

/// Capacity-bounded response frame. Every write is length-checked before
/// it is committed, so a rejected write leaves the frame unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseFrame {
    buf: Vec<u8>,
    capacity: usize,
}

impl ResponseFrame {
    /// Empty frame that refuses to grow past `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Upper bound on the frame length.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes still available before the capacity is reached.
    pub fn remaining(&self) -> usize {
        self.capacity - self.buf.len()
    }

    /// Append `data`, or fail with `FrameOverflow` and append nothing.
    pub fn extend_from_slice(&mut self, data: &[u8]) -> Result<()> {
        let needed = self.buf.len() + data.len();
        if needed > self.capacity {
            return Err(Error::FrameOverflow {
                capacity: self.capacity,
                actual: needed,
            });
        }
        self.buf.extend_from_slice(data);
        Ok(())
    }

    /// Append a status word.
    pub fn push_status(&mut self, sw: StatusWord) -> Result<()> {
        self.extend_from_slice(&sw.to_bytes())
    }

    /// Replace any content with the bare status word of `outcome`.
    pub fn set_outcome(&mut self, outcome: Outcome) -> Result<()> {
        self.buf.clear();
        self.push_status(outcome.status_word())
    }

    /// Frame content.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Hand the frame over for transmission.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}
