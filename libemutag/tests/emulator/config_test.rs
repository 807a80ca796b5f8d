#[path = "../common/mod.rs"]
mod common;

use libemutag::prelude::*;
use proptest::prelude::*;

fn emulator(capacity: usize) -> Emulator<MockTarget> {
    Emulator::builder()
        .with_transport(MockTarget::new(None))
        .ndef_capacity(capacity)
        .build()
        .unwrap()
}

#[test]
fn oversize_message_keeps_previous_content() {
    common::init_logger();
    let mut emu = emulator(16);
    emu.set_ndef_file(b"previous").unwrap();
    let before = emu.ndef_file().to_vec();

    // capacity - 1 does not fit next to the 2-byte prefix
    match emu.set_ndef_file(&[0xAB; 15]) {
        Err(Error::NdefTooLarge { capacity, actual }) => {
            assert_eq!(capacity, 14);
            assert_eq!(actual, 15);
        }
        other => panic!("expected NdefTooLarge, got: {:?}", other),
    }
    assert_eq!(emu.ndef_file(), &before[..]);
    assert_eq!(emu.ndef_message(), b"previous");
}

#[test]
fn capacity_bounds() {
    let r = Emulator::builder()
        .with_transport(MockTarget::new(None))
        .ndef_capacity(2)
        .build();
    assert!(matches!(r, Err(Error::InvalidLength { .. })));

    let r = Emulator::builder()
        .with_transport(MockTarget::new(None))
        .ndef_capacity(0x1_0000)
        .build();
    assert!(matches!(r, Err(Error::InvalidLength { .. })));

    let emu = emulator(3);
    assert_eq!(emu.ndef_capacity(), 3);
}

#[test]
fn runtime_setters() {
    let mut emu = emulator(32);
    emu.set_writable(true);
    assert_eq!(emu.files().cc().as_bytes()[14], 0x00);
    emu.set_writable(false);
    assert_eq!(emu.files().cc().as_bytes()[14], 0xFF);

    emu.set_uid(NfcId1Fragment::from_bytes([9, 8, 7]));
    assert_eq!(emu.uid().to_hex(), "090807");

    let memory = BlockMemory::from_ndef(b"\xD0\x00\x00").unwrap();
    emu.set_block_memory(memory.clone());
    assert_eq!(emu.block_memory(), &memory);
}

proptest! {
    #[test]
    fn set_ndef_file_respects_capacity(len in 0usize..64) {
        let mut emu = emulator(32);
        let message = vec![0x5Au8; len];
        let r = emu.set_ndef_file(&message);
        if len <= 30 {
            prop_assert!(r.is_ok());
            prop_assert_eq!(emu.ndef_message(), &message[..]);
        } else {
            prop_assert!(r.is_err());
            prop_assert!(emu.ndef_message().is_empty());
        }
    }
}
