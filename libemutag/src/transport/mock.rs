// libemutag/src/transport/mock.rs

//! In-memory transports for tests and demos.

use crate::transport::traits::{Link, TargetTransport};
use crate::types::TargetDescriptor;
use crate::{Error, Result};

/// Scripted initiator for unit tests. It records sent responses and hands
/// out queued command frames.
#[derive(Debug, Default)]
pub struct MockTarget {
    /// Frame returned by `init_as_target`; `None` makes the handshake time out
    pub initial_frame: Option<Vec<u8>>,
    /// Frames handed out by `receive_command`, oldest first
    pub commands: Vec<Vec<u8>>,
    /// Responses passed to `send_response`
    pub sent: Vec<Vec<u8>>,
    /// Every descriptor `init_as_target` was called with
    pub descriptors: Vec<TargetDescriptor>,
    /// Successful `precondition` calls
    pub preconditioned: usize,
    /// `release` calls
    pub released: usize,
    /// Testing hook: number of send_response calls that should fail
    pub send_failures: usize,
    /// Testing hook: make precondition fail
    pub fail_precondition: bool,
    /// Testing hook: fail `init_as_target` as if the link dropped right
    /// after the initiator activated the target
    pub fail_after_activation: bool,
}

impl MockTarget {
    /// Target whose handshake yields `initial_frame`.
    pub fn new(initial_frame: Option<Vec<u8>>) -> Self {
        Self {
            initial_frame,
            ..Self::default()
        }
    }

    /// Queue a frame for `receive_command`.
    pub fn push_command(&mut self, frame: Vec<u8>) {
        self.commands.push(frame);
    }

    /// Set how many subsequent send_response calls should fail (for tests).
    pub fn set_send_failures(&mut self, n: usize) {
        self.send_failures = n;
    }

    /// Take the most recent response.
    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }
}

impl TargetTransport for MockTarget {
    fn precondition(&mut self) -> Result<()> {
        if self.fail_precondition {
            return Err(Error::Link("precondition rejected".into()));
        }
        self.preconditioned += 1;
        Ok(())
    }

    fn init_as_target(
        &mut self,
        descriptor: &TargetDescriptor,
        _timeout_ms: u64,
    ) -> Result<Vec<u8>> {
        self.descriptors.push(descriptor.clone());
        if self.fail_after_activation {
            return Err(Error::PostActivation(Box::new(Error::Timeout)));
        }
        self.initial_frame.take().ok_or(Error::Timeout)
    }

    fn send_response(&mut self, frame: &[u8], _timeout_ms: u64) -> Result<()> {
        if self.send_failures > 0 {
            self.send_failures -= 1;
            return Err(Error::Timeout);
        }
        self.sent.push(frame.to_vec());
        Ok(())
    }

    fn receive_command(&mut self, _timeout_ms: u64) -> Result<Vec<u8>> {
        if self.commands.is_empty() {
            Err(Error::Timeout)
        } else {
            Ok(self.commands.remove(0))
        }
    }

    fn release(&mut self) -> Result<()> {
        self.released += 1;
        Ok(())
    }
}

/// Mock chip link. It records sent frames and returns queued chip frames.
#[derive(Debug, Default)]
pub struct MockLink {
    /// Frames written by the host, in order
    pub sent: Vec<Vec<u8>>,
    /// Chip frames handed out by `receive`, oldest first
    pub responses: Vec<Vec<u8>>,
    /// `reset` calls
    pub resets: usize,
}

impl MockLink {
    /// Empty link; every `receive` times out until responses are queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a chip frame.
    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push(resp);
    }

    /// Take the most recent host frame.
    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }
}

impl Link for MockLink {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.sent.push(data.to_vec());
        Ok(())
    }

    fn receive(&mut self, _timeout_ms: u64) -> Result<Vec<u8>> {
        if self.responses.is_empty() {
            Err(Error::Timeout)
        } else {
            Ok(self.responses.remove(0))
        }
    }

    fn reset(&mut self) -> Result<()> {
        // Keep queued responses so tests can pre-seed replies before the
        // link is handed to an adapter.
        self.resets += 1;
        Ok(())
    }
}
