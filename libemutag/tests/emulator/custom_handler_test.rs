#[path = "../common/mod.rs"]
mod common;

use libemutag::prelude::*;
use libemutag::test_support::{read_binary, scripted_target, select_by_id};

#[test]
fn closure_handler_sees_every_frame() -> anyhow::Result<()> {
    common::init_logger();
    let target = scripted_target(vec![vec![0x01], vec![0x02], vec![0xFF]]);
    let mut emu = Emulator::builder().with_transport(target).build()?;

    let mut seen = Vec::new();
    let mut handler = FnHandler::new(|frame: &[u8]| {
        seen.push(frame.to_vec());
        Ok(match frame {
            [0xFF] => Reply::stop(vec![0xBE, 0xEF]),
            _ => Reply::respond(vec![frame[0], 0x90, 0x00]),
        })
    });
    assert_eq!(emu.emulate_with(500, &mut handler), Termination::HandlerStopped);
    drop(handler);

    assert_eq!(seen, vec![vec![0x01], vec![0x02], vec![0xFF]]);
    let t = emu.transport();
    assert_eq!(t.sent.last(), Some(&vec![0xBE, 0xEF]));
    assert_eq!(t.released, 1);
    Ok(())
}

/// Wraps the built-in dispatcher and stops after a fixed number of APDUs.
struct Budget<'a> {
    inner: ApduDispatcher<'a>,
    left: usize,
}

impl FrameHandler for Budget<'_> {
    fn handle(&mut self, frame: &[u8]) -> Result<Reply> {
        let mut reply = self.inner.handle(frame)?;
        self.left -= 1;
        if self.left == 0 {
            reply.next = Next::Stop(Termination::HandlerStopped);
        }
        Ok(reply)
    }
}

#[test]
fn custom_handler_composes_with_dispatcher() -> anyhow::Result<()> {
    let mut files = FileStore::new(32)?;
    files.set_ndef_message(b"abc")?;

    let mut target = scripted_target(vec![
        select_by_id(0xE104),
        read_binary(2, 3),
        read_binary(0, 2),
    ]);
    let mut handler = Budget {
        inner: ApduDispatcher::new(&mut files),
        left: 2,
    };
    let descriptor = TargetDescriptor::new(handler.exchange());
    let reason = libemutag::emulator::run_session(&mut target, &descriptor, 500, &mut handler);

    assert_eq!(reason, Termination::HandlerStopped);
    assert_eq!(target.sent, vec![vec![0x90, 0x00], b"abc\x90\x00".to_vec()]);
    // the third command was never received
    assert_eq!(target.commands.len(), 1);
    Ok(())
}

#[test]
fn release_runs_on_every_exit_path() -> anyhow::Result<()> {
    // handshake failure
    let mut emu = Emulator::builder().with_transport(scripted_target(Vec::new())).build()?;
    assert_eq!(emu.emulate_ndef(100), Termination::HandshakeFailed);
    assert_eq!(emu.transport().released, 1);

    // handler error
    emu.transport_mut().initial_frame = Some(vec![0x00]);
    let mut failing = FnHandler::new(|_: &[u8]| Err(Error::Handler("bad frame".into())));
    assert_eq!(emu.emulate_with(100, &mut failing), Termination::HandlerStopped);
    assert_eq!(emu.transport().released, 2);

    // send failure
    emu.transport_mut().initial_frame = Some(select_by_id(0xE103));
    emu.transport_mut().set_send_failures(1);
    assert_eq!(emu.emulate_ndef(100), Termination::TransportError);
    assert_eq!(emu.transport().released, 3);

    // precondition failure
    emu.transport_mut().fail_precondition = true;
    assert_eq!(emu.emulate(100), Termination::TransportError);
    assert_eq!(emu.transport().released, 4);
    Ok(())
}
