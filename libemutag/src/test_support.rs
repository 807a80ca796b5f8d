//! Helpers shared by unit and integration tests: command APDU builders and
//! pre-seeded mocks playing the initiator side.
#![allow(dead_code)]

use crate::constants::{
    INS_READ_BINARY, INS_SELECT_FILE, INS_UPDATE_BINARY, NDEF_APPLICATION_ID, SELECT_P1_BY_ID,
    SELECT_P1_BY_NAME, SELECT_P2_BY_ID, SELECT_P2_BY_NAME,
};
use crate::transport::mock::MockTarget;
#[cfg(feature = "pn532")]
use crate::{Result, transport::mock::MockLink};

/// SELECT FILE by identifier: `00 A4 00 0C 02 <id>`
#[doc(hidden)]
pub fn select_by_id(file_id: u16) -> Vec<u8> {
    let [hi, lo] = file_id.to_be_bytes();
    vec![0x00, INS_SELECT_FILE, SELECT_P1_BY_ID, SELECT_P2_BY_ID, 0x02, hi, lo]
}

/// SELECT FILE by name with the NDEF application id
#[doc(hidden)]
pub fn select_ndef_application() -> Vec<u8> {
    let mut v = vec![
        0x00,
        INS_SELECT_FILE,
        SELECT_P1_BY_NAME,
        SELECT_P2_BY_NAME,
        NDEF_APPLICATION_ID.len() as u8,
    ];
    v.extend_from_slice(&NDEF_APPLICATION_ID);
    v
}

/// READ BINARY: `00 B0 <offset> <le>`
#[doc(hidden)]
pub fn read_binary(offset: u16, le: u8) -> Vec<u8> {
    let [p1, p2] = offset.to_be_bytes();
    vec![0x00, INS_READ_BINARY, p1, p2, le]
}

/// UPDATE BINARY: `00 D6 <offset> <lc> <data..>`. Data past 255 bytes is
/// dropped since Lc is a single byte.
#[doc(hidden)]
pub fn update_binary(offset: u16, data: &[u8]) -> Vec<u8> {
    let data = &data[..data.len().min(u8::MAX as usize)];
    let [p1, p2] = offset.to_be_bytes();
    let mut v = vec![0x00, INS_UPDATE_BINARY, p1, p2, data.len() as u8];
    v.extend_from_slice(data);
    v
}

/// MockTarget whose handshake yields `frames[0]` and whose receive queue
/// holds the rest. An empty script makes the handshake time out.
#[doc(hidden)]
pub fn scripted_target(frames: Vec<Vec<u8>>) -> MockTarget {
    let mut frames = frames.into_iter();
    let mut mock = MockTarget::new(frames.next());
    for f in frames {
        mock.push_command(f);
    }
    mock
}

/// Full PN532 response frame `D5 <cmd+1> <data..>` as the chip sends it
#[cfg(feature = "pn532")]
#[doc(hidden)]
pub fn pn532_response(cmd: u8, data: &[u8]) -> Result<Vec<u8>> {
    let mut payload = vec![crate::constants::PN532_TFI_CHIP, cmd.wrapping_add(1)];
    payload.extend_from_slice(data);
    crate::transport::pn532::Frame::encode(&payload)
}

/// Queue an ACK followed by the response to `cmd` on a MockLink.
#[cfg(feature = "pn532")]
#[doc(hidden)]
pub fn seed_pn532_reply(link: &mut MockLink, cmd: u8, data: &[u8]) -> Result<()> {
    link.push_response(crate::constants::PN532_ACK.to_vec());
    link.push_response(pn532_response(cmd, data)?);
    Ok(())
}
