// libemutag/src/transport/pn532/mod.rs

//! Target-mode adapter for PN532-class chips over a raw [`Link`].

/// Host command payload builders
pub mod commands;
/// Information frame codec
pub mod frame;

pub use frame::Frame;

use crate::constants::{
    PN532_CMD_TG_GET_DATA, PN532_CMD_TG_GET_INITIATOR_COMMAND, PN532_CMD_TG_RESPONSE_TO_INITIATOR,
    PN532_CMD_TG_SET_DATA, PN532_TFI_CHIP, REG_CIU_MANUAL_RCV, REG_CIU_RX_MODE, REG_CIU_STATUS2,
    REG_CIU_TX_AUTO, REG_CIU_TX_MODE,
};
use crate::protocol::parser::{byte_at, expect_code};
use crate::transport::traits::{Link, TargetTransport};
use crate::types::{Exchange, TargetDescriptor};
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};
use log::{debug, trace};

/// Time allowed for the chip to ACK a command frame (ms)
pub const ACK_TIMEOUT_MS: u64 = 100;

/// Timeout for register and configuration commands (ms)
pub const CONFIG_TIMEOUT_MS: u64 = 1000;

/// Error bits of a target-mode status byte
const STATUS_ERROR_MASK: u8 = 0x3F;

/// PN532 driven in target mode over `L`
pub struct Pn532Target<L: Link> {
    link: L,
    exchange: Exchange,
}

impl<L: Link> Pn532Target<L> {
    /// Wrap a link. The chip is not touched until `precondition`.
    pub fn new(link: L) -> Self {
        Self {
            link,
            exchange: Exchange::default(),
        }
    }

    /// Give the link back.
    pub fn into_inner(self) -> L {
        self.link
    }

    /// Exchange mode negotiated by the last `init_as_target`
    pub fn exchange(&self) -> Exchange {
        self.exchange
    }

    /// Send one host command, wait for the ACK and return the response data
    /// following `D5 <cmd+1>`.
    pub fn command(&mut self, payload: &[u8], timeout_ms: u64) -> Result<Vec<u8>> {
        let cmd = byte_at(payload, 1)?;
        let framed = Frame::encode(payload)?;
        trace!("pn532 > {}", bytes_to_hex_spaced(payload));
        self.link.send(&framed)?;

        let ack = self.link.receive(ACK_TIMEOUT_MS)?;
        if !Frame::is_ack(&ack) {
            return Err(Error::FrameFormat(format!(
                "expected ACK for command {:#04x}, got {}",
                cmd,
                bytes_to_hex_spaced(&ack)
            )));
        }

        let raw = self.link.receive(timeout_ms)?;
        let resp = Frame::decode(&raw)?;
        trace!("pn532 < {}", bytes_to_hex_spaced(&resp));
        expect_code(&resp, PN532_TFI_CHIP)?;
        let code = byte_at(&resp, 1)?;
        let expected = cmd.wrapping_add(1);
        if code != expected {
            return Err(Error::UnexpectedResponse {
                expected,
                actual: code,
            });
        }
        Ok(resp[2..].to_vec())
    }

    /// Like `command` for responses led by a status byte; a non-zero error
    /// code surfaces as `ChipStatus`.
    fn status_command(&mut self, payload: &[u8], timeout_ms: u64) -> Result<Vec<u8>> {
        let cmd = byte_at(payload, 1)?;
        let data = self.command(payload, timeout_ms)?;
        let status = byte_at(&data, 0)?;
        if status & STATUS_ERROR_MASK != 0 {
            return Err(Error::ChipStatus {
                command: cmd,
                status,
            });
        }
        Ok(data[1..].to_vec())
    }

    /// Read one CIU register.
    pub fn read_register(&mut self, addr: u16) -> Result<u8> {
        let data = self.command(&commands::build_read_register(addr), CONFIG_TIMEOUT_MS)?;
        byte_at(&data, 0)
    }

    /// Write one CIU register.
    pub fn write_register(&mut self, addr: u16, value: u8) -> Result<()> {
        self.command(&commands::build_write_register(addr, value), CONFIG_TIMEOUT_MS)?;
        Ok(())
    }

    fn update_register(&mut self, addr: u16, set: u8, clear: u8) -> Result<()> {
        let prev = self.read_register(addr)?;
        self.write_register(addr, (prev & !clear) | set)
    }
}

impl<L: Link> TargetTransport for Pn532Target<L> {
    fn precondition(&mut self) -> Result<()> {
        self.link.reset()?;
        self.command(&commands::build_sam_configuration(), CONFIG_TIMEOUT_MS)?;
        self.write_register(REG_CIU_RX_MODE, commands::CIU_MODE_CRC_106)?;
        self.write_register(REG_CIU_TX_MODE, commands::CIU_MODE_CRC_106)?;
        self.command(&commands::build_rf_field(false), CONFIG_TIMEOUT_MS)?;
        self.update_register(REG_CIU_STATUS2, 0, commands::STATUS2_CRYPTO1_ON)?;
        self.update_register(REG_CIU_MANUAL_RCV, 0, commands::MANUAL_RCV_PARITY_DISABLE)?;
        self.update_register(REG_CIU_TX_AUTO, commands::TX_AUTO_INITIAL_RF_ON, 0)?;
        self.command(
            &commands::build_set_parameters(commands::PARAM_AUTOMATIC_RATS),
            CONFIG_TIMEOUT_MS,
        )?;
        Ok(())
    }

    fn init_as_target(
        &mut self,
        descriptor: &TargetDescriptor,
        timeout_ms: u64,
    ) -> Result<Vec<u8>> {
        self.exchange = descriptor.exchange;
        let payload = commands::build_tg_init_as_target(descriptor)?;
        let data = self
            .command(&payload, timeout_ms)
            .map_err(|e| match e {
                Error::Timeout => Error::Timeout,
                other => Error::HandshakeFailed(other.to_string()),
            })?;
        let mode = byte_at(&data, 0)?;
        debug!(
            "activated as target: mode={:#04x}, initiator={}",
            mode,
            bytes_to_hex_spaced(&data[1..])
        );

        match self.exchange {
            Exchange::Raw => Ok(data[1..].to_vec()),
            // RATS was answered by the chip; the first APDU follows.
            Exchange::Apdu => self
                .receive_command(timeout_ms)
                .map_err(|e| Error::PostActivation(Box::new(e))),
        }
    }

    fn send_response(&mut self, frame: &[u8], timeout_ms: u64) -> Result<()> {
        let cmd = match self.exchange {
            Exchange::Apdu => PN532_CMD_TG_SET_DATA,
            Exchange::Raw => PN532_CMD_TG_RESPONSE_TO_INITIATOR,
        };
        self.status_command(&commands::build_command(cmd, frame), timeout_ms)?;
        Ok(())
    }

    fn receive_command(&mut self, timeout_ms: u64) -> Result<Vec<u8>> {
        let cmd = match self.exchange {
            Exchange::Apdu => PN532_CMD_TG_GET_DATA,
            Exchange::Raw => PN532_CMD_TG_GET_INITIATOR_COMMAND,
        };
        self.status_command(&commands::build_command(cmd, &[]), timeout_ms)
    }

    fn release(&mut self) -> Result<()> {
        self.status_command(&commands::build_in_release(0), CONFIG_TIMEOUT_MS)?;
        Ok(())
    }
}
