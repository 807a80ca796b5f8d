// libemutag/src/emulator/dispatch.rs

//! ISO7816-4 state machine serving the Type-4 CC and NDEF files.

use crate::constants::{
    MIN_RESPONSE_CAPACITY, NDEF_APPLICATION_ID, SELECT_P1_BY_ID, SELECT_P1_BY_NAME,
    SELECT_P2_BY_ID, SELECT_P2_BY_NAME,
};
use crate::emulator::handler::{FrameHandler, Reply};
use crate::protocol::{CommandApdu, Instruction, Outcome, ResponseFrame};
use crate::store::FileStore;
use crate::types::{Exchange, FileId, SelectedFile, TagFile, UpdatePolicy};
use crate::utils::bytes_to_hex_spaced;
use crate::Result;
use log::{debug, trace, warn};

/// Write-notification callback. Receives the NDEF content region after a
/// successful UPDATE-BINARY; the slice is only valid for the call.
pub type UpdateCallback = Box<dyn FnMut(&[u8])>;

/// APDU dispatcher for one session. `selected` starts at `None` and only
/// a successful SELECT-FILE by identifier changes it.
pub struct ApduDispatcher<'a> {
    files: &'a mut FileStore,
    policy: UpdatePolicy,
    selected: SelectedFile,
    on_update: Option<&'a mut UpdateCallback>,
    response_capacity: usize,
}

impl<'a> ApduDispatcher<'a> {
    /// Dispatcher over `files` with the direct update policy and no callback.
    pub fn new(files: &'a mut FileStore) -> Self {
        Self {
            files,
            policy: UpdatePolicy::default(),
            selected: SelectedFile::None,
            on_update: None,
            response_capacity: MIN_RESPONSE_CAPACITY,
        }
    }

    /// Set the UPDATE-BINARY selection policy.
    pub fn with_policy(mut self, policy: UpdatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attach the write-notification callback.
    pub fn with_callback(mut self, on_update: Option<&'a mut UpdateCallback>) -> Self {
        self.on_update = on_update;
        self
    }

    /// Capacity of produced response frames. Values below 257 are raised so
    /// a full READ-BINARY plus status word always fits.
    pub fn with_response_capacity(mut self, capacity: usize) -> Self {
        self.response_capacity = capacity.max(MIN_RESPONSE_CAPACITY);
        self
    }

    /// File targeted by READ-BINARY.
    pub fn selected(&self) -> SelectedFile {
        self.selected
    }

    /// Interpret one command frame and build the response frame
    /// (`[content..] SW1 SW2`).
    pub fn dispatch(&mut self, frame: &[u8]) -> ResponseFrame {
        let mut resp = ResponseFrame::with_capacity(self.response_capacity);
        let outcome = match CommandApdu::parse(frame) {
            Ok(apdu) => self.execute(&apdu, &mut resp),
            Err(e) => {
                debug!("malformed apdu ({}): {}", e, bytes_to_hex_spaced(frame));
                Outcome::FunctionNotSupported
            }
        };

        let status = match outcome {
            Outcome::CommandComplete => resp.push_status(outcome.status_word()),
            _ => resp.set_outcome(outcome),
        };
        if let Err(e) = status {
            warn!("status word does not fit response frame: {}", e);
        }
        resp
    }

    fn execute(&mut self, apdu: &CommandApdu<'_>, resp: &mut ResponseFrame) -> Outcome {
        match apdu.instruction() {
            Instruction::SelectFile => self.select(apdu),
            Instruction::ReadBinary => self.read_binary(apdu, resp),
            Instruction::UpdateBinary => self.update_binary(apdu),
            Instruction::Other(ins) => {
                debug!("unsupported instruction {:#04x}", ins);
                Outcome::FunctionNotSupported
            }
        }
    }

    fn select(&mut self, apdu: &CommandApdu<'_>) -> Outcome {
        match apdu.p1 {
            SELECT_P1_BY_ID => {
                if apdu.p2 != SELECT_P2_BY_ID {
                    return Outcome::TagNotFound;
                }
                let Ok(data) = apdu.data() else {
                    return Outcome::FunctionNotSupported;
                };
                let file = match data {
                    [hi, lo] => FileId::from_be_bytes([*hi, *lo]).tag_file(),
                    _ => None,
                };
                match file {
                    Some(file) => {
                        self.selected = file.into();
                        debug!("selected {}", file);
                        Outcome::CommandComplete
                    }
                    None => {
                        debug!("select: unknown file id {}", bytes_to_hex_spaced(data));
                        Outcome::TagNotFound
                    }
                }
            }
            SELECT_P1_BY_NAME => {
                if apdu.p2 != SELECT_P2_BY_NAME {
                    return Outcome::FunctionNotSupported;
                }
                match apdu.data() {
                    Ok(name) if name == NDEF_APPLICATION_ID => {
                        debug!("selected ndef application");
                        Outcome::CommandComplete
                    }
                    _ => Outcome::FunctionNotSupported,
                }
            }
            p1 => {
                debug!("select: unsupported p1 {:#04x}", p1);
                Outcome::FunctionNotSupported
            }
        }
    }

    fn read_binary(&mut self, apdu: &CommandApdu<'_>, resp: &mut ResponseFrame) -> Outcome {
        let Some(file) = self.selected.file() else {
            return Outcome::TagNotFound;
        };
        let offset = apdu.offset() as usize;
        let length = apdu.le();
        if offset > self.files.max_len(file) {
            return Outcome::EndOfFileBeforeReachedLength;
        }

        match self.files.read_range(file, offset, length) {
            Ok(bytes) => match resp.extend_from_slice(bytes) {
                Ok(()) => Outcome::CommandComplete,
                Err(e) => {
                    warn!("read-binary: {}", e);
                    Outcome::FunctionNotSupported
                }
            },
            Err(e) => {
                trace!("read-binary {}: {}", file, e);
                Outcome::EndOfFileBeforeReachedLength
            }
        }
    }

    fn update_binary(&mut self, apdu: &CommandApdu<'_>) -> Outcome {
        if !self.files.is_writable() {
            return Outcome::FunctionNotSupported;
        }
        if self.policy == UpdatePolicy::RequireNdefSelected
            && self.selected != SelectedFile::Ndef
        {
            return Outcome::TagNotFound;
        }
        let Ok(payload) = apdu.data() else {
            return Outcome::FunctionNotSupported;
        };
        let offset = apdu.offset() as usize;
        if offset > self.files.max_len(TagFile::Ndef) {
            return Outcome::MemoryFailure;
        }

        if let Err(e) = self.files.write_range(offset, payload) {
            warn!("update-binary at {}: {}", offset, e);
            return Outcome::MemoryFailure;
        }
        debug!("ndef updated: {} bytes at offset {}", payload.len(), offset);

        let ndef = self.files.ndef();
        if ndef.message_len() > 0 {
            if let Some(cb) = self.on_update.as_deref_mut() {
                cb(ndef.message());
            }
        }
        Outcome::CommandComplete
    }
}

impl FrameHandler for ApduDispatcher<'_> {
    fn handle(&mut self, frame: &[u8]) -> Result<Reply> {
        let resp = self.dispatch(frame);
        Ok(Reply::respond(resp.into_vec()))
    }

    fn exchange(&self) -> Exchange {
        Exchange::Apdu
    }
}
