// libemutag/src/store/mod.rs

//! Virtual File Store: the Capability Container and NDEF file served to
//! APDU initiators, plus the Type-2 block image for raw initiators.

/// Type-2 block image
pub mod blocks;
/// Capability Container
pub mod cc;
/// NDEF file
pub mod ndef;

pub use blocks::BlockMemory;
pub use cc::CapabilityContainer;
pub use ndef::NdefFile;

use crate::types::TagFile;
use crate::{Error, Result};
use log::warn;

/// CC and NDEF files plus the write-enable flag.
#[derive(Debug, Clone)]
pub struct FileStore {
    cc: CapabilityContainer,
    ndef: NdefFile,
    writable: bool,
}

impl FileStore {
    /// Empty, read-only store with an NDEF file of `ndef_capacity` bytes.
    pub fn new(ndef_capacity: usize) -> Result<Self> {
        let ndef = NdefFile::new(ndef_capacity)?;
        Ok(Self {
            cc: CapabilityContainer::new(ndef.capacity() as u16, false),
            ndef,
            writable: false,
        })
    }

    /// Capability Container
    pub fn cc(&self) -> &CapabilityContainer {
        &self.cc
    }

    /// NDEF file
    pub fn ndef(&self) -> &NdefFile {
        &self.ndef
    }

    /// NDEF file, mutably
    pub fn ndef_mut(&mut self) -> &mut NdefFile {
        &mut self.ndef
    }

    /// Write-Enable Flag
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Toggle the Write-Enable Flag and the CC write-access byte together.
    pub fn set_writable(&mut self, writable: bool) {
        self.writable = writable;
        self.cc.set_writable(writable);
    }

    /// Caller-driven content replacement.
    pub fn set_ndef_message(&mut self, message: &[u8]) -> Result<()> {
        self.ndef.set_message(message).inspect_err(|e| {
            warn!("rejecting ndef content: {}", e);
        })
    }

    /// Length of the file as seen by READ/UPDATE bounds checks
    pub fn max_len(&self, file: TagFile) -> usize {
        match file {
            TagFile::CapabilityContainer => self.cc.as_bytes().len(),
            TagFile::Ndef => self.ndef.capacity(),
        }
    }

    /// Bytes `offset..offset + length` of `file`, or `OutOfRange`.
    pub fn read_range(&self, file: TagFile, offset: usize, length: usize) -> Result<&[u8]> {
        match file {
            TagFile::CapabilityContainer => {
                let bytes = self.cc.as_bytes();
                match offset.checked_add(length) {
                    Some(end) if end <= bytes.len() => Ok(&bytes[offset..end]),
                    _ => Err(Error::OutOfRange {
                        offset,
                        length,
                        capacity: bytes.len(),
                    }),
                }
            }
            TagFile::Ndef => self.ndef.read(offset, length),
        }
    }

    /// Initiator-driven write into the NDEF file.
    pub fn write_range(&mut self, offset: usize, payload: &[u8]) -> Result<()> {
        if !self.writable {
            return Err(Error::WriteDisabled);
        }
        self.ndef.write(offset, payload)
    }
}
