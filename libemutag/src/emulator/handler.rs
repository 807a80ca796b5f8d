// libemutag/src/emulator/handler.rs

//! The seam between the session loop and frame interpretation.

use crate::Result;
use crate::types::{Exchange, Termination};

/// What the session loop does after transmitting a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// Wait for the next command frame
    Continue,
    /// End the session with the given reason
    Stop(Termination),
}

/// Response to one command frame. An empty `frame` transmits nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Bytes to transmit
    pub frame: Vec<u8>,
    /// What happens after transmission
    pub next: Next,
}

impl Reply {
    /// Transmit `frame` and keep the session going
    pub fn respond(frame: impl Into<Vec<u8>>) -> Self {
        Self {
            frame: frame.into(),
            next: Next::Continue,
        }
    }

    /// Transmit `frame`, then end the session as `HandlerStopped`
    pub fn stop(frame: impl Into<Vec<u8>>) -> Self {
        Self::stop_with(frame, Termination::HandlerStopped)
    }

    /// Transmit `frame`, then end the session with `reason`
    pub fn stop_with(frame: impl Into<Vec<u8>>, reason: Termination) -> Self {
        Self {
            frame: frame.into(),
            next: Next::Stop(reason),
        }
    }
}

/// Strategy answering frames received from the initiator.
///
/// The built-in APDU dispatcher and raw block dispatcher implement this, as
/// does any caller-supplied handler. An `Err` is fatal to the session.
pub trait FrameHandler {
    /// Answer one command frame.
    fn handle(&mut self, frame: &[u8]) -> Result<Reply>;

    /// Exchange mode the handler expects; selects the advertised SEL_RES
    /// and the adapter's data commands.
    fn exchange(&self) -> Exchange {
        Exchange::Apdu
    }
}

impl<H: FrameHandler + ?Sized> FrameHandler for &mut H {
    fn handle(&mut self, frame: &[u8]) -> Result<Reply> {
        (**self).handle(frame)
    }

    fn exchange(&self) -> Exchange {
        (**self).exchange()
    }
}

/// Closure adapter: `FnHandler::new(|frame| Ok(Reply::respond(..)))`
pub struct FnHandler<F> {
    f: F,
    exchange: Exchange,
}

impl<F> FnHandler<F>
where
    F: FnMut(&[u8]) -> Result<Reply>,
{
    /// Wrap `f`; the exchange defaults to APDU.
    pub fn new(f: F) -> Self {
        Self {
            f,
            exchange: Exchange::Apdu,
        }
    }

    /// Override the exchange mode.
    pub fn with_exchange(mut self, exchange: Exchange) -> Self {
        self.exchange = exchange;
        self
    }
}

impl<F> FrameHandler for FnHandler<F>
where
    F: FnMut(&[u8]) -> Result<Reply>,
{
    fn handle(&mut self, frame: &[u8]) -> Result<Reply> {
        (self.f)(frame)
    }

    fn exchange(&self) -> Exchange {
        self.exchange
    }
}
