// libemutag/src/prelude.rs

//! `use libemutag::prelude::*;` brings in everything a session needs.

pub use crate::emulator::{
    ApduDispatcher, BlockHandler, Emulator, EmulatorBuilder, FnHandler, FrameHandler, Next,
    Reply, Strategy,
};
pub use crate::protocol::{Outcome, StatusWord, status_word_for};
pub use crate::store::{BlockMemory, FileStore};
pub use crate::transport::{Link, MockLink, MockTarget, TargetTransport};
#[cfg(feature = "pn532")]
pub use crate::transport::Pn532Target;
pub use crate::{
    Error, Exchange, FileId, NfcId1Fragment, Result, SelectedFile, TagFile, TargetDescriptor,
    Termination, UpdatePolicy,
};

pub use crate::utils::{DEFAULT_SESSION_TIMEOUT_MS, bytes_to_hex, bytes_to_hex_spaced, parse_hex};
