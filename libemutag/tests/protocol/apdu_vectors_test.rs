#[path = "../common/mod.rs"]
mod common;

use common::fixtures::h;
use libemutag::protocol::{BlockCommand, CommandApdu, Instruction};
use libemutag::store::FileStore;
use libemutag::emulator::ApduDispatcher;

#[test]
fn parse_reader_vectors() {
    let select = h("00 A4 04 00 07 D2760000850101 00");
    let apdu = CommandApdu::parse(&select).unwrap();
    assert_eq!(apdu.instruction(), Instruction::SelectFile);
    assert_eq!(apdu.data().unwrap(), &h("D2760000850101")[..]);

    let read = h("00 B0 00 02 0C");
    let apdu = CommandApdu::parse(&read).unwrap();
    assert_eq!(apdu.instruction(), Instruction::ReadBinary);
    assert_eq!(apdu.offset(), 2);
    assert_eq!(apdu.le(), 12);

    assert_eq!(
        CommandApdu::parse(&h("00 CA 00")).map(|_| ()).unwrap_err().to_string(),
        "invalid packet length: expected 5, got 3"
    );
}

#[test]
fn dispatch_reader_vectors() {
    let mut files = FileStore::new(64).unwrap();
    files.set_ndef_message(&h("D1 01 01 54 00")).unwrap();
    let mut d = ApduDispatcher::new(&mut files);

    let script = [
        ("00 A4 04 00 07 D2760000850101 00", "90 00"),
        ("00 A4 00 0C 02 E1 03", "90 00"),
        ("00 B0 00 00 0F", "000F 20 0054 00FF 0406 E104 0040 00 FF 9000"),
        ("00 A4 00 0C 02 E1 04", "90 00"),
        ("00 B0 00 00 02", "00 05 90 00"),
        ("00 B0 00 02 05", "D1 01 01 54 00 90 00"),
        ("00 D6 00 00 02 00 00", "6A 81"),
        ("00 B0 00 41 00", "62 82"),
    ];
    for (cmd, expected) in script {
        assert_eq!(
            hex::encode(d.dispatch(&h(cmd)).as_bytes()),
            hex::encode(h(expected)),
            "command {}",
            cmd
        );
    }
}

#[test]
fn block_command_vectors() {
    assert_eq!(BlockCommand::decode(&h("30 04")), BlockCommand::Read { block: 4 });
    assert_eq!(BlockCommand::decode(&h("50 00")), BlockCommand::Halt);
    assert_eq!(
        BlockCommand::decode(&h("A2 05 01020304")),
        BlockCommand::Unsupported { code: Some(0xA2) }
    );
}
