// libemutag/src/constants.rs
//! Protocol constants used across the crate

/// Command APDU offset of CLA
pub const APDU_CLA: usize = 0;
/// Command APDU offset of INS
pub const APDU_INS: usize = 1;
/// Command APDU offset of P1
pub const APDU_P1: usize = 2;
/// Command APDU offset of P2
pub const APDU_P2: usize = 3;
/// Command APDU offset of Lc (or Le when there is no body)
pub const APDU_LC: usize = 4;
/// Command APDU offset of the first data byte
pub const APDU_DATA: usize = 5;

/// Fixed header length of a command APDU: CLA INS P1 P2 Lc/Le
pub const APDU_HEADER_LEN: usize = 5;

/// SELECT FILE instruction
pub const INS_SELECT_FILE: u8 = 0xA4;
/// READ BINARY instruction
pub const INS_READ_BINARY: u8 = 0xB0;
/// UPDATE BINARY instruction
pub const INS_UPDATE_BINARY: u8 = 0xD6;

/// SELECT P1: select by file identifier
pub const SELECT_P1_BY_ID: u8 = 0x00;
/// SELECT P1: select by application name
pub const SELECT_P1_BY_NAME: u8 = 0x04;

/// SELECT-by-id P2: first or only occurrence, no response data
pub const SELECT_P2_BY_ID: u8 = 0x0C;

/// SELECT-by-name P2: first or only occurrence
pub const SELECT_P2_BY_NAME: u8 = 0x00;

/// NDEF Tag Application name (mapping version 2.0)
pub const NDEF_APPLICATION_ID: [u8; 7] = [0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01];

/// Capability Container file identifier
pub const CC_FILE_ID: u16 = 0xE103;
/// NDEF file identifier
pub const NDEF_FILE_ID: u16 = 0xE104;

/// Default NDEF file capacity including the 2-byte length prefix
pub const NDEF_DEFAULT_CAPACITY: usize = 128;

/// Smallest NDEF file that still holds a prefix and one content byte
pub const NDEF_MIN_CAPACITY: usize = 3;

/// Width of the NDEF length prefix (NLEN)
pub const NDEF_LENGTH_PREFIX: usize = 2;

/// Capability Container length (CCLEN)
pub const CC_LEN: usize = 15;

/// Largest frame the PN532 moves in one TgSetData/TgGetData
pub const MAX_FRAME_LEN: usize = 262;

/// Response buffers must hold 255 content bytes plus the status word
pub const MIN_RESPONSE_CAPACITY: usize = 257;

/// Type-2 READ command
pub const T2_CMD_READ: u8 = 0x30;
/// Type-2 HALT command
pub const T2_CMD_HALT: u8 = 0x50;

/// Type-2 page (block) size
pub const T2_BLOCK_SIZE: usize = 4;
/// Bytes returned per Type-2 READ (four blocks)
pub const T2_READ_LEN: usize = 16;

/// Type-2 header blocks before the data area (blocks 0..=3)
pub const T2_HEADER_LEN: usize = 16;

/// PN532 wire frame preamble: 0x00 0x00 0xFF
pub const PN532_PREAMBLE: [u8; 3] = [0x00, 0x00, 0xFF];

/// PN532 wire frame postamble
pub const PN532_POSTAMBLE: u8 = 0x00;

/// PN532 ACK frame
pub const PN532_ACK: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];

/// PN532 host->chip frame identifier
pub const PN532_TFI_HOST: u8 = 0xD4;
/// PN532 chip->host frame identifier
pub const PN532_TFI_CHIP: u8 = 0xD5;

// PN532 command codes used in target mode

/// ReadRegister
pub const PN532_CMD_READ_REGISTER: u8 = 0x06;
/// WriteRegister
pub const PN532_CMD_WRITE_REGISTER: u8 = 0x08;
/// SetParameters
pub const PN532_CMD_SET_PARAMETERS: u8 = 0x12;
/// SAMConfiguration
pub const PN532_CMD_SAM_CONFIGURATION: u8 = 0x14;
/// RFConfiguration
pub const PN532_CMD_RF_CONFIGURATION: u8 = 0x32;
/// InRelease
pub const PN532_CMD_IN_RELEASE: u8 = 0x52;
/// TgGetData
pub const PN532_CMD_TG_GET_DATA: u8 = 0x86;
/// TgGetInitiatorCommand
pub const PN532_CMD_TG_GET_INITIATOR_COMMAND: u8 = 0x88;
/// TgInitAsTarget
pub const PN532_CMD_TG_INIT_AS_TARGET: u8 = 0x8C;
/// TgSetData
pub const PN532_CMD_TG_SET_DATA: u8 = 0x8E;
/// TgResponseToInitiator
pub const PN532_CMD_TG_RESPONSE_TO_INITIATOR: u8 = 0x90;

// PN532 CIU register addresses

/// CIU_TxMode
pub const REG_CIU_TX_MODE: u16 = 0x6302;
/// CIU_RxMode
pub const REG_CIU_RX_MODE: u16 = 0x6303;
/// CIU_TxAuto
pub const REG_CIU_TX_AUTO: u16 = 0x6305;
/// CIU_ManualRCV
pub const REG_CIU_MANUAL_RCV: u16 = 0x630D;
/// CIU_Status2
pub const REG_CIU_STATUS2: u16 = 0x6338;
