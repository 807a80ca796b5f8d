// libemutag/src/transport/pn532/commands.rs

//! PN532 host command payloads (TFI onwards) used in target mode.

use crate::constants::{
    PN532_CMD_IN_RELEASE, PN532_CMD_READ_REGISTER, PN532_CMD_RF_CONFIGURATION,
    PN532_CMD_SAM_CONFIGURATION, PN532_CMD_SET_PARAMETERS, PN532_CMD_TG_INIT_AS_TARGET,
    PN532_CMD_WRITE_REGISTER, PN532_TFI_HOST,
};
use crate::Result;
use crate::types::TargetDescriptor;

/// RFConfiguration item: RF field
pub const RF_CFG_FIELD: u8 = 0x01;

/// SetParameters flag: the chip answers RATS on its own
pub const PARAM_AUTOMATIC_RATS: u8 = 0x10;

/// CIU_TxMode/CIU_RxMode value: CRC enabled, 106 kbps, no invalid or
/// multiple frames
pub const CIU_MODE_CRC_106: u8 = 0x80;

/// CIU_Status2 bit 3: MFCrypto1On
pub const STATUS2_CRYPTO1_ON: u8 = 1 << 3;
/// CIU_ManualRCV bit 4: ParityDisable
pub const MANUAL_RCV_PARITY_DISABLE: u8 = 1 << 4;
/// CIU_TxAuto bit 2: InitialRFOn
pub const TX_AUTO_INITIAL_RF_ON: u8 = 1 << 2;

/// SAMConfiguration mode: normal, no SAM in the path
pub const SAM_MODE_NORMAL: u8 = 0x01;
/// SAMConfiguration timeout in units of 50 ms (only used in virtual card mode)
pub const SAM_TIMEOUT: u8 = 0x14;
/// SAMConfiguration: drive the IRQ pin
pub const SAM_USE_IRQ: u8 = 0x01;

/// Build a host command payload: `D4 <cmd> <params..>`
pub fn build_command(cmd: u8, params: &[u8]) -> Vec<u8> {
    let mut v = Vec::with_capacity(2 + params.len());
    v.push(PN532_TFI_HOST);
    v.push(cmd);
    v.extend_from_slice(params);
    v
}

/// ReadRegister for one CIU register.
pub fn build_read_register(addr: u16) -> Vec<u8> {
    build_command(PN532_CMD_READ_REGISTER, &addr.to_be_bytes())
}

/// WriteRegister for one CIU register.
pub fn build_write_register(addr: u16, value: u8) -> Vec<u8> {
    let [hi, lo] = addr.to_be_bytes();
    build_command(PN532_CMD_WRITE_REGISTER, &[hi, lo, value])
}

/// SetParameters with the given flag byte.
pub fn build_set_parameters(flags: u8) -> Vec<u8> {
    build_command(PN532_CMD_SET_PARAMETERS, &[flags])
}

/// RF field on/off. Auto RF collision avoidance stays off so the initiator
/// owns the field.
pub fn build_rf_field(on: bool) -> Vec<u8> {
    build_command(PN532_CMD_RF_CONFIGURATION, &[RF_CFG_FIELD, on as u8])
}

/// InRelease for a logical target; 0 releases all.
pub fn build_in_release(target: u8) -> Vec<u8> {
    build_command(PN532_CMD_IN_RELEASE, &[target])
}

/// SAMConfiguration in normal mode. Wakes the chip out of low-vbat state.
pub fn build_sam_configuration() -> Vec<u8> {
    build_command(
        PN532_CMD_SAM_CONFIGURATION,
        &[SAM_MODE_NORMAL, SAM_TIMEOUT, SAM_USE_IRQ],
    )
}

/// TgInitAsTarget carrying the encoded descriptor.
pub fn build_tg_init_as_target(descriptor: &TargetDescriptor) -> Result<Vec<u8>> {
    Ok(build_command(
        PN532_CMD_TG_INIT_AS_TARGET,
        &descriptor.encode()?,
    ))
}
