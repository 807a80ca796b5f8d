// libemutag/src/emulator/mod.rs

//! Tag emulation engine: owns the virtual files and configuration, and runs
//! sessions over a [`TargetTransport`].

/// Type-2 block handler
pub mod blocks;
/// Emulator builder
pub mod builder;
/// Type-4 APDU dispatcher
pub mod dispatch;
/// Frame handler trait and replies
pub mod handler;
/// Session loop
pub mod session;

pub use blocks::BlockHandler;
pub use builder::EmulatorBuilder;
pub use dispatch::{ApduDispatcher, UpdateCallback};
pub use handler::{FnHandler, FrameHandler, Next, Reply};
pub use session::run_session;

use crate::Result;
use crate::store::{BlockMemory, FileStore};
use crate::transport::TargetTransport;
use crate::types::{NfcId1Fragment, TargetDescriptor, Termination, UpdatePolicy};

/// Frame handling strategy for one session
pub enum Strategy<'h> {
    /// Raw Type-2 block reads against the block image
    Blocks,
    /// ISO7816-4 dispatch against the CC and NDEF files
    Apdu,
    /// Caller-supplied handler
    Custom(&'h mut dyn FrameHandler),
}

/// NFC tag emulator bound to one transport.
///
/// Holds the Type-4 files, the Type-2 block image and the identity
/// advertised to initiators. Configuration persists across sessions.
pub struct Emulator<T: TargetTransport> {
    transport: T,
    files: FileStore,
    blocks: BlockMemory,
    uid: NfcId1Fragment,
    update_policy: UpdatePolicy,
    on_update: Option<UpdateCallback>,
    response_capacity: usize,
}

impl<T: TargetTransport> Emulator<T> {
    /// Start configuring an emulator.
    pub fn builder() -> EmulatorBuilder<T> {
        EmulatorBuilder::new()
    }

    /// Run one session with the given strategy and return why it ended.
    pub fn run_session(&mut self, timeout_ms: u64, strategy: Strategy<'_>) -> Termination {
        self.files.ndef_mut().clear_written();

        let Self {
            transport,
            files,
            blocks,
            uid,
            update_policy,
            on_update,
            response_capacity,
        } = self;

        match strategy {
            Strategy::Blocks => {
                let mut handler = BlockHandler::new(blocks);
                let descriptor = TargetDescriptor::new(handler.exchange()).with_uid(*uid);
                session::run_session(transport, &descriptor, timeout_ms, &mut handler)
            }
            Strategy::Apdu => {
                let mut handler = ApduDispatcher::new(files)
                    .with_policy(*update_policy)
                    .with_callback(on_update.as_mut())
                    .with_response_capacity(*response_capacity);
                let descriptor = TargetDescriptor::new(handler.exchange()).with_uid(*uid);
                session::run_session(transport, &descriptor, timeout_ms, &mut handler)
            }
            Strategy::Custom(handler) => {
                let descriptor = TargetDescriptor::new(handler.exchange()).with_uid(*uid);
                session::run_session(transport, &descriptor, timeout_ms, handler)
            }
        }
    }

    /// Type-2 style emulation with the built-in block dispatcher
    pub fn emulate(&mut self, timeout_ms: u64) -> Termination {
        self.run_session(timeout_ms, Strategy::Blocks)
    }

    /// Type-4 emulation with the APDU dispatcher
    pub fn emulate_ndef(&mut self, timeout_ms: u64) -> Termination {
        self.run_session(timeout_ms, Strategy::Apdu)
    }

    /// Session driven by a caller-supplied handler
    pub fn emulate_with(&mut self, timeout_ms: u64, handler: &mut dyn FrameHandler) -> Termination {
        self.run_session(timeout_ms, Strategy::Custom(handler))
    }

    /// Replace the NDEF message. Oversize content is rejected and the
    /// previous content is kept.
    pub fn set_ndef_file(&mut self, message: &[u8]) -> Result<()> {
        self.files.set_ndef_message(message)
    }

    /// Replace the advertised UID fragment.
    pub fn set_uid(&mut self, uid: NfcId1Fragment) {
        self.uid = uid;
    }

    /// Toggle write access; the CC is updated to match.
    pub fn set_writable(&mut self, writable: bool) {
        self.files.set_writable(writable);
    }

    /// Change the UPDATE-BINARY selection policy.
    pub fn set_update_policy(&mut self, policy: UpdatePolicy) {
        self.update_policy = policy;
    }

    /// Replace the Type-2 image.
    pub fn set_block_memory(&mut self, memory: BlockMemory) {
        self.blocks = memory;
    }

    /// Install the write-notification callback, replacing any previous one
    pub fn on_update(&mut self, callback: impl FnMut(&[u8]) + 'static) {
        self.on_update = Some(Box::new(callback));
    }

    /// Whether an initiator UPDATE-BINARY succeeded during the last session
    pub fn has_been_written(&self) -> bool {
        self.files.ndef().written()
    }

    /// Current NDEF message (content after the length prefix)
    pub fn ndef_message(&self) -> &[u8] {
        self.files.ndef().message()
    }

    /// Whole NDEF file including the length prefix
    pub fn ndef_file(&self) -> &[u8] {
        self.files.ndef().as_bytes()
    }

    /// NDEF file size including the prefix
    pub fn ndef_capacity(&self) -> usize {
        self.files.ndef().capacity()
    }

    /// Whether initiators may write
    pub fn is_writable(&self) -> bool {
        self.files.is_writable()
    }

    /// Advertised UID fragment
    pub fn uid(&self) -> NfcId1Fragment {
        self.uid
    }

    /// Type-4 file store
    pub fn files(&self) -> &FileStore {
        &self.files
    }

    /// Type-2 image
    pub fn block_memory(&self) -> &BlockMemory {
        &self.blocks
    }

    /// Borrow the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Borrow the transport mutably.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the emulator and return its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }
}
