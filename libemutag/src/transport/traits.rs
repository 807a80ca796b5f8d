// libemutag/src/transport/traits.rs

//! Transport seams: the raw chip link and the target-mode operations.

use crate::Result;
use crate::types::TargetDescriptor;

/// Raw byte link to the radio chip (serial, I2C, SPI, USB bulk...).
/// One call moves one complete chip frame.
pub trait Link {
    /// Send raw bytes to the chip
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive one frame from the chip with a timeout in milliseconds.
    /// A timeout of 0 waits indefinitely.
    fn receive(&mut self, timeout_ms: u64) -> Result<Vec<u8>>;

    /// Link-level wakeup, issued before preconditioning. Default is a no-op
    /// for links that do not need one.
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Target-mode operations the session loop needs from the radio frontend.
/// All calls block for at most `timeout_ms` (0 = indefinitely); an elapsed
/// timeout is reported as an error.
pub trait TargetTransport {
    /// One-time link preconditioning issued before negotiation. Must be
    /// idempotent.
    fn precondition(&mut self) -> Result<()>;

    /// Negotiate target mode and return the first initiator frame.
    ///
    /// A failure after an initiator activated the target is reported as
    /// `Error::PostActivation`; anything else means the handshake failed.
    fn init_as_target(&mut self, descriptor: &TargetDescriptor, timeout_ms: u64)
    -> Result<Vec<u8>>;

    /// Transmit a response frame to the initiator.
    fn send_response(&mut self, frame: &[u8], timeout_ms: u64) -> Result<()>;

    /// Block for the next command frame from the initiator.
    fn receive_command(&mut self, timeout_ms: u64) -> Result<Vec<u8>>;

    /// Release the target session.
    fn release(&mut self) -> Result<()>;
}

impl<T: TargetTransport + ?Sized> TargetTransport for &mut T {
    fn precondition(&mut self) -> Result<()> {
        (**self).precondition()
    }

    fn init_as_target(
        &mut self,
        descriptor: &TargetDescriptor,
        timeout_ms: u64,
    ) -> Result<Vec<u8>> {
        (**self).init_as_target(descriptor, timeout_ms)
    }

    fn send_response(&mut self, frame: &[u8], timeout_ms: u64) -> Result<()> {
        (**self).send_response(frame, timeout_ms)
    }

    fn receive_command(&mut self, timeout_ms: u64) -> Result<Vec<u8>> {
        (**self).receive_command(timeout_ms)
    }

    fn release(&mut self) -> Result<()> {
        (**self).release()
    }
}

impl<L: Link + ?Sized> Link for Box<L> {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        (**self).send(data)
    }

    fn receive(&mut self, timeout_ms: u64) -> Result<Vec<u8>> {
        (**self).receive(timeout_ms)
    }

    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }
}
