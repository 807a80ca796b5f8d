// libemutag/src/emulator/session.rs

//! Session loop shared by every frame handler.

use crate::Error;
use crate::emulator::handler::{FrameHandler, Next};
use crate::transport::TargetTransport;
use crate::types::{TargetDescriptor, Termination};
use crate::utils::bytes_to_hex_spaced;
use log::{debug, info, trace, warn};

/// Run one emulation session: precondition the link, negotiate target mode,
/// then feed frames to `handler` until it stops or the transport fails.
///
/// The target session is released on every exit path, including a failed
/// handshake. Errors are logged and folded into the returned `Termination`.
pub fn run_session<T: TargetTransport + ?Sized>(
    transport: &mut T,
    descriptor: &TargetDescriptor,
    timeout_ms: u64,
    handler: &mut dyn FrameHandler,
) -> Termination {
    let reason = drive(transport, descriptor, timeout_ms, handler);
    if let Err(e) = transport.release() {
        warn!("release failed: {}", e);
    }
    info!("session ended: {}", reason);
    reason
}

fn drive<T: TargetTransport + ?Sized>(
    transport: &mut T,
    descriptor: &TargetDescriptor,
    timeout_ms: u64,
    handler: &mut dyn FrameHandler,
) -> Termination {
    if let Err(e) = transport.precondition() {
        warn!("link preconditioning failed: {}", e);
        return Termination::TransportError;
    }

    let mut frame = match transport.init_as_target(descriptor, timeout_ms) {
        Ok(frame) => frame,
        Err(Error::PostActivation(e)) => {
            warn!("receive failed right after activation: {}", e);
            return Termination::TransportError;
        }
        Err(e) => {
            warn!("target negotiation failed: {}", e);
            return Termination::HandshakeFailed;
        }
    };
    debug!("initiator activated us");

    loop {
        trace!("rx {}", bytes_to_hex_spaced(&frame));
        let reply = match handler.handle(&frame) {
            Ok(reply) => reply,
            Err(e) => {
                warn!("handler aborted: {}", e);
                return Termination::HandlerStopped;
            }
        };

        if !reply.frame.is_empty() {
            trace!("tx {}", bytes_to_hex_spaced(&reply.frame));
            if let Err(e) = transport.send_response(&reply.frame, timeout_ms) {
                warn!("send failed: {}", e);
                return Termination::TransportError;
            }
        }

        if let Next::Stop(reason) = reply.next {
            return reason;
        }

        frame = match transport.receive_command(timeout_ms) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("receive failed: {}", e);
                return Termination::TransportError;
            }
        };
    }
}
