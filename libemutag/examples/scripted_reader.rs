// Scripted reader walkthrough
//
// Plays a phone-like initiator against the Type-4 emulation using the mock
// transport, then serves the same message as a Type-2 image. Run with
// `RUST_LOG=trace` to see every frame.

use libemutag::prelude::*;
use libemutag::test_support::{read_binary, scripted_target, select_by_id, select_ndef_application, update_binary};

fn main() -> Result<()> {
    env_logger::init();

    // NDEF well-known URI record: https://example.com
    let record = parse_hex("D1 01 0C 55 04 65 78 61 6D 70 6C 65 2E 63 6F 6D")?;

    let reader = scripted_target(vec![
        select_ndef_application(),
        select_by_id(0xE103),
        read_binary(0, 15),
        select_by_id(0xE104),
        read_binary(0, 2),
        read_binary(2, record.len() as u8),
        update_binary(2, b"\xD1\x01\x01\x54\x00"),
        update_binary(0, &[0x00, 0x05]),
    ]);

    let mut emu = Emulator::builder()
        .with_transport(reader)
        .ndef_message(record.clone())
        .writable(true)
        .uid(NfcId1Fragment::from_bytes([0xDE, 0xAD, 0x01]))
        .on_update(|msg| println!("initiator wrote {}", bytes_to_hex_spaced(msg)))
        .build()?;

    println!("=== Type-4 session ===");
    let reason = emu.emulate_ndef(DEFAULT_SESSION_TIMEOUT_MS);
    for (i, resp) in emu.transport().sent.iter().enumerate() {
        println!("  R-APDU {}: {}", i, bytes_to_hex_spaced(resp));
    }
    println!("session ended: {} (written: {})", reason, emu.has_been_written());
    println!("ndef now: {}", bytes_to_hex_spaced(emu.ndef_message()));

    println!("\n=== Type-2 session ===");
    let image = BlockMemory::from_ndef(&record)?;
    emu.set_block_memory(image);
    emu.transport_mut().initial_frame = Some(vec![0x30, 0x03]);
    emu.transport_mut().push_command(vec![0x30, 0x04]);
    emu.transport_mut().push_command(vec![0x50, 0x00]);
    let reason = emu.emulate(DEFAULT_SESSION_TIMEOUT_MS);
    for resp in emu.transport().sent.iter().rev().take(2).rev() {
        println!("  READ: {}", bytes_to_hex_spaced(resp));
    }
    println!("session ended: {}", reason);
    Ok(())
}
