#[path = "../common/mod.rs"]
mod common;

use libemutag::prelude::*;
use libemutag::test_support::scripted_target;

#[test]
fn read_cc_block_then_halt() -> anyhow::Result<()> {
    common::init_logger();
    let target = scripted_target(vec![vec![0x30, 0x03], vec![0x50, 0x00]]);
    let mut emu = Emulator::builder().with_transport(target).build()?;

    assert_eq!(emu.emulate(DEFAULT_SESSION_TIMEOUT_MS), Termination::InitiatorHalted);

    let t = emu.transport();
    assert_eq!(t.sent.len(), 1);
    assert_eq!(&t.sent[0][..], &BlockMemory::default().as_bytes()[12..28]);
    assert_eq!(&t.sent[0][..4], &[0xE1, 0x10, 0x06, 0x0F]);
    assert_eq!(t.descriptors[0].exchange, Exchange::Raw);
    assert_eq!(t.released, 1);
    Ok(())
}

#[test]
fn unsupported_command_ends_session() -> anyhow::Result<()> {
    let target = scripted_target(vec![vec![0x30, 0x00], vec![0xA2, 0x04, 1, 2, 3, 4]]);
    let mut emu = Emulator::builder().with_transport(target).build()?;
    assert_eq!(emu.emulate(500), Termination::UnsupportedCommand);
    assert_eq!(emu.transport().sent.len(), 1);
    assert_eq!(emu.transport().released, 1);
    Ok(())
}

#[test]
fn image_built_from_ndef_message() -> anyhow::Result<()> {
    let record = common::fixtures::text_record_hello();
    let target = scripted_target(vec![vec![0x30, 0x04], vec![0x50, 0x00]]);
    let mut emu = Emulator::builder()
        .with_transport(target)
        .block_memory(BlockMemory::from_ndef(&record)?)
        .build()?;
    emu.emulate(500);

    let block4 = &emu.transport().sent[0];
    assert_eq!(block4[0], 0x03);
    assert_eq!(block4[1] as usize, record.len());
    assert_eq!(&block4[2..14], &record[..]);
    assert_eq!(block4[14], 0xFE);
    Ok(())
}

#[test]
fn read_past_last_block_rolls_over() -> anyhow::Result<()> {
    let target = scripted_target(vec![vec![0x30, 0x0F], vec![0x50, 0x00]]);
    let mut emu = Emulator::builder().with_transport(target).build()?;
    emu.emulate(500);

    let image = BlockMemory::default();
    let bytes = image.as_bytes();
    let sent = &emu.transport().sent[0];
    assert_eq!(&sent[..4], &bytes[60..64]);
    assert_eq!(&sent[4..], &bytes[..12]);
    Ok(())
}
