// libemutag/src/emulator/builder.rs

//! Builder for [`Emulator`].

use crate::constants::{MAX_FRAME_LEN, MIN_RESPONSE_CAPACITY, NDEF_DEFAULT_CAPACITY};
use crate::emulator::{Emulator, UpdateCallback};
use crate::store::{BlockMemory, FileStore};
use crate::transport::TargetTransport;
use crate::types::{NfcId1Fragment, UpdatePolicy};
use crate::{Error, Result};

/// Helper to construct an Emulator with optional configuration.
pub struct EmulatorBuilder<T> {
    transport: Option<T>,
    ndef_capacity: usize,
    ndef_message: Option<Vec<u8>>,
    uid: NfcId1Fragment,
    writable: bool,
    update_policy: UpdatePolicy,
    block_memory: Option<BlockMemory>,
    on_update: Option<UpdateCallback>,
    response_capacity: usize,
}

impl<T> Default for EmulatorBuilder<T> {
    fn default() -> Self {
        Self {
            transport: None,
            ndef_capacity: NDEF_DEFAULT_CAPACITY,
            ndef_message: None,
            uid: NfcId1Fragment::default(),
            writable: false,
            update_policy: UpdatePolicy::default(),
            block_memory: None,
            on_update: None,
            response_capacity: MAX_FRAME_LEN,
        }
    }
}

impl<T: TargetTransport> EmulatorBuilder<T> {
    /// Builder with default files and no transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide the transport adapter (e.g. MockTarget or Pn532Target)
    pub fn with_transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// NDEF file size including the 2-byte length prefix
    pub fn ndef_capacity(mut self, capacity: usize) -> Self {
        self.ndef_capacity = capacity;
        self
    }

    /// Initial NDEF message (without the length prefix)
    pub fn ndef_message(mut self, message: impl Into<Vec<u8>>) -> Self {
        self.ndef_message = Some(message.into());
        self
    }

    /// UID fragment advertised during anticollision
    pub fn uid(mut self, uid: NfcId1Fragment) -> Self {
        self.uid = uid;
        self
    }

    /// Accept UPDATE-BINARY; also sets the CC write access byte
    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    /// Whether writes need the NDEF file selected first
    pub fn update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.update_policy = policy;
        self
    }

    /// Type-2 image served in block mode; defaults to `BlockMemory::default()`
    pub fn block_memory(mut self, memory: BlockMemory) -> Self {
        self.block_memory = Some(memory);
        self
    }

    /// Callback run after each successful write
    pub fn on_update(mut self, callback: impl FnMut(&[u8]) + 'static) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    /// Response frame size; must be at least 257
    pub fn response_capacity(mut self, capacity: usize) -> Self {
        self.response_capacity = capacity;
        self
    }

    /// Consume the builder. Requires a transport; returns
    /// TransportNotConfigured otherwise.
    pub fn build(self) -> Result<Emulator<T>> {
        let transport = self.transport.ok_or(Error::TransportNotConfigured)?;
        if self.response_capacity < MIN_RESPONSE_CAPACITY {
            return Err(Error::InvalidLength {
                expected: MIN_RESPONSE_CAPACITY,
                actual: self.response_capacity,
            });
        }

        let mut files = FileStore::new(self.ndef_capacity)?;
        if let Some(message) = &self.ndef_message {
            files.set_ndef_message(message)?;
        }
        files.set_writable(self.writable);

        Ok(Emulator {
            transport,
            files,
            blocks: self.block_memory.unwrap_or_default(),
            uid: self.uid,
            update_policy: self.update_policy,
            on_update: self.on_update,
            response_capacity: self.response_capacity,
        })
    }
}
