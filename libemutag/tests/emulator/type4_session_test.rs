#[path = "../common/mod.rs"]
mod common;

use libemutag::prelude::*;
use libemutag::test_support::{
    read_binary, scripted_target, select_by_id, select_ndef_application, update_binary,
};

#[test]
fn hello_world_update_notifies() -> anyhow::Result<()> {
    common::init_logger();
    let (writes, sink) = common::fixtures::write_sink();
    let target = scripted_target(vec![
        select_by_id(0xE104),
        read_binary(0, 2),
        update_binary(2, b"WORLD"),
    ]);

    let mut emu = Emulator::builder()
        .with_transport(target)
        .ndef_message(b"hello".to_vec())
        .writable(true)
        .on_update(sink)
        .build()?;

    // the initiator goes quiet after the last command
    assert_eq!(emu.emulate_ndef(DEFAULT_SESSION_TIMEOUT_MS), Termination::TransportError);

    let sent = &emu.transport().sent;
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[0], vec![0x90, 0x00]);
    assert_eq!(sent[1], vec![0x00, 0x05, 0x90, 0x00]);
    assert_eq!(sent[2], vec![0x90, 0x00]);

    assert_eq!(*writes.borrow(), vec![b"WORLD".to_vec()]);
    assert!(emu.has_been_written());
    assert_eq!(emu.ndef_message(), b"WORLD");
    assert_eq!(emu.transport().released, 1);
    Ok(())
}

#[test]
fn reader_discovery_sequence() -> anyhow::Result<()> {
    common::init_logger();
    let record = common::fixtures::text_record_hello();
    let target = scripted_target(vec![
        select_ndef_application(),
        select_by_id(0xE103),
        read_binary(0, 15),
        select_by_id(0xE104),
        read_binary(0, 2),
        read_binary(2, record.len() as u8),
    ]);

    let mut emu = Emulator::builder()
        .with_transport(target)
        .ndef_message(record.clone())
        .writable(true)
        .build()?;
    emu.emulate_ndef(500);

    let sent = &emu.transport().sent;
    assert_eq!(sent.len(), 6);
    assert_eq!(sent[0], vec![0x90, 0x00]);
    assert_eq!(sent[1], vec![0x90, 0x00]);
    let mut cc = common::fixtures::cc_writable_128();
    cc.extend_from_slice(&[0x90, 0x00]);
    assert_eq!(sent[2], cc);
    assert_eq!(sent[4], vec![0x00, record.len() as u8, 0x90, 0x00]);
    assert_eq!(&sent[5][..record.len()], &record[..]);
    assert_eq!(&sent[5][record.len()..], &[0x90, 0x00]);

    let descriptor = &emu.transport().descriptors[0];
    assert_eq!(descriptor.exchange, Exchange::Apdu);
    assert_eq!(descriptor.sel_res, 0x20);
    Ok(())
}

#[test]
fn write_disabled_leaves_file_untouched() -> anyhow::Result<()> {
    let (writes, sink) = common::fixtures::write_sink();
    let target = scripted_target(vec![
        select_by_id(0xE104),
        update_binary(0, &[0x00, 0x03]),
        update_binary(2, b"abc"),
    ]);
    let mut emu = Emulator::builder()
        .with_transport(target)
        .ndef_message(b"hello".to_vec())
        .on_update(sink)
        .build()?;
    let before = emu.ndef_file().to_vec();

    emu.emulate_ndef(500);

    assert_eq!(emu.transport().sent[1], vec![0x6A, 0x81]);
    assert_eq!(emu.transport().sent[2], vec![0x6A, 0x81]);
    assert_eq!(emu.ndef_file(), &before[..]);
    assert!(writes.borrow().is_empty());
    assert!(!emu.has_been_written());
    Ok(())
}

#[test]
fn cc_reports_read_only_when_not_writable() -> anyhow::Result<()> {
    let target = scripted_target(vec![select_by_id(0xE103), read_binary(14, 1)]);
    let mut emu = Emulator::builder().with_transport(target).build()?;
    emu.emulate_ndef(500);
    assert_eq!(emu.transport().sent[1], vec![0xFF, 0x90, 0x00]);
    Ok(())
}

#[test]
fn strict_update_policy() -> anyhow::Result<()> {
    let target = scripted_target(vec![
        update_binary(2, b"x"),
        select_by_id(0xE104),
        update_binary(2, b"x"),
    ]);
    let mut emu = Emulator::builder()
        .with_transport(target)
        .ndef_message(b"hello".to_vec())
        .writable(true)
        .update_policy(UpdatePolicy::RequireNdefSelected)
        .build()?;
    emu.emulate_ndef(500);

    let sent = &emu.transport().sent;
    assert_eq!(sent[0], vec![0x6A, 0x82]);
    assert_eq!(sent[2], vec![0x90, 0x00]);
    assert_eq!(emu.ndef_message(), b"xello");
    Ok(())
}
