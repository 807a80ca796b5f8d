#[path = "../common/mod.rs"]
mod common;

use libemutag::prelude::*;
use libemutag::test_support::{seed_pn532_reply, select_by_id};
use libemutag::transport::pn532::Frame;

/// Replies for the link preconditioning sequence
fn seed_precondition(link: &mut MockLink) {
    let script: [(u8, &[u8]); 11] = [
        (0x14, &[]),
        (0x08, &[]),
        (0x08, &[]),
        (0x32, &[]),
        (0x06, &[0x08]),
        (0x08, &[]),
        (0x06, &[0x10]),
        (0x08, &[]),
        (0x06, &[0x00]),
        (0x08, &[]),
        (0x12, &[]),
    ];
    for (cmd, data) in script {
        seed_pn532_reply(link, cmd, data).unwrap();
    }
}

fn host_payloads(link: &MockLink) -> Vec<Vec<u8>> {
    link.sent.iter().map(|f| Frame::decode(f).unwrap()).collect()
}

#[test]
fn type2_session_over_pn532() -> anyhow::Result<()> {
    common::init_logger();
    let mut link = MockLink::new();
    seed_precondition(&mut link);
    // activated in passive 106 kbps mode with READ block 3 as first command
    seed_pn532_reply(&mut link, 0x8C, &[0x04, 0x30, 0x03])?;
    seed_pn532_reply(&mut link, 0x90, &[0x00])?;
    seed_pn532_reply(&mut link, 0x88, &[0x00, 0x50, 0x00])?;
    seed_pn532_reply(&mut link, 0x52, &[0x00])?;

    let mut emu = Emulator::builder()
        .with_transport(Pn532Target::new(link))
        .uid(NfcId1Fragment::from_bytes([0x01, 0x02, 0x03]))
        .build()?;
    assert_eq!(emu.emulate(DEFAULT_SESSION_TIMEOUT_MS), Termination::InitiatorHalted);

    let link = emu.into_transport().into_inner();
    let sent = host_payloads(&link);
    assert_eq!(sent.len(), 15);
    assert!(link.responses.is_empty());
    assert_eq!(link.resets, 1);
    assert_eq!(sent[0], vec![0xD4, 0x14, 0x01, 0x14, 0x01]);

    let init = &sent[11];
    assert_eq!(&init[..2], &[0xD4, 0x8C]);
    assert_eq!(&init[2..9], &[0x01, 0x04, 0x00, 0x01, 0x02, 0x03, 0x00]);

    let response = &sent[12];
    assert_eq!(&response[..2], &[0xD4, 0x90]);
    assert_eq!(&response[2..6], &[0xE1, 0x10, 0x06, 0x0F]);
    assert_eq!(response.len(), 2 + 16);

    assert_eq!(sent[13], vec![0xD4, 0x88]);
    assert_eq!(sent[14], vec![0xD4, 0x52, 0x00]);
    Ok(())
}

#[test]
fn type4_session_over_pn532_ends_on_release() -> anyhow::Result<()> {
    let mut link = MockLink::new();
    seed_precondition(&mut link);
    seed_pn532_reply(&mut link, 0x8C, &[0x08, 0xE0, 0x80])?;
    let mut get_data = vec![0x00];
    get_data.extend_from_slice(&select_by_id(0xE103));
    seed_pn532_reply(&mut link, 0x86, &get_data)?;
    seed_pn532_reply(&mut link, 0x8E, &[0x00])?;
    // the initiator deselects: TgGetData reports "released by initiator"
    seed_pn532_reply(&mut link, 0x86, &[0x29])?;
    seed_pn532_reply(&mut link, 0x52, &[0x00])?;

    let mut emu = Emulator::builder()
        .with_transport(Pn532Target::new(link))
        .build()?;
    assert_eq!(emu.emulate_ndef(DEFAULT_SESSION_TIMEOUT_MS), Termination::TransportError);

    let link = emu.into_transport().into_inner();
    let sent = host_payloads(&link);
    assert_eq!(sent[11][8], 0x20);
    assert_eq!(sent[12], vec![0xD4, 0x86]);
    assert_eq!(sent[13], vec![0xD4, 0x8E, 0x90, 0x00]);
    assert_eq!(sent.last(), Some(&vec![0xD4, 0x52, 0x00]));
    Ok(())
}

#[test]
fn release_before_first_apdu_is_transport_error() -> anyhow::Result<()> {
    let mut link = MockLink::new();
    seed_precondition(&mut link);
    seed_pn532_reply(&mut link, 0x8C, &[0x08, 0xE0, 0x80])?;
    // activated, then released before any APDU arrived
    seed_pn532_reply(&mut link, 0x86, &[0x29])?;
    seed_pn532_reply(&mut link, 0x52, &[0x00])?;

    let mut emu = Emulator::builder()
        .with_transport(Pn532Target::new(link))
        .build()?;
    assert_eq!(emu.emulate_ndef(DEFAULT_SESSION_TIMEOUT_MS), Termination::TransportError);

    let link = emu.into_transport().into_inner();
    let sent = host_payloads(&link);
    assert_eq!(sent.len(), 14);
    assert_eq!(sent[12], vec![0xD4, 0x86]);
    assert_eq!(sent[13], vec![0xD4, 0x52, 0x00]);
    Ok(())
}

#[test]
fn missing_ack_fails_handshake_precondition() -> anyhow::Result<()> {
    // chip never answers: preconditioning fails, release is still attempted
    let mut emu = Emulator::builder()
        .with_transport(Pn532Target::new(MockLink::new()))
        .build()?;
    assert_eq!(emu.emulate(100), Termination::TransportError);
    let link = emu.into_transport().into_inner();
    let sent = host_payloads(&link);
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], vec![0xD4, 0x14, 0x01, 0x14, 0x01]);
    assert_eq!(sent[1], vec![0xD4, 0x52, 0x00]);
    Ok(())
}
