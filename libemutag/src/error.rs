// libemutag/src/error.rs

//! Crate error type.

use thiserror::Error;

/// Common error type
#[derive(Error, Debug)]
pub enum Error {
    /// NDEF message does not fit behind the length prefix
    #[error("ndef message too large: capacity {capacity}, got {actual}")]
    NdefTooLarge {
        /// Largest message the file holds
        capacity: usize,
        /// Requested message length
        actual: usize,
    },

    /// Byte range reaches past the end of a file
    #[error("range out of bounds: offset {offset} + length {length} exceeds {capacity}")]
    OutOfRange {
        /// First byte of the range
        offset: usize,
        /// Range length
        length: usize,
        /// File size
        capacity: usize,
    },

    /// Write attempted while the NDEF file is read-only
    #[error("tag is not writable")]
    WriteDisabled,

    /// Stored NLEN points past the file
    #[error("ndef length prefix {length} exceeds file capacity {capacity}")]
    InvalidNdefLength {
        /// NLEN value
        length: usize,
        /// Content bytes available
        capacity: usize,
    },

    /// Input shorter or longer than the field it fills
    #[error("invalid packet length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required length (a bound for variable fields)
        expected: usize,
        /// Length found
        actual: usize,
    },

    /// Response would exceed its buffer
    #[error("frame overflow: capacity {capacity}, needed {actual}")]
    FrameOverflow {
        /// Buffer capacity
        capacity: usize,
        /// Bytes that would have been written
        actual: usize,
    },

    /// LCS or DCS does not match the frame
    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch {
        /// Computed checksum
        expected: u8,
        /// Checksum on the wire
        actual: u8,
    },

    /// Malformed chip frame
    #[error("frame format error: {0}")]
    FrameFormat(String),

    /// Chip answered with a different command code
    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse {
        /// Awaited code (command + 1)
        expected: u8,
        /// Code received
        actual: u8,
    },

    /// Chip status byte carried an error code
    #[error("chip reported error for command {command:#04x}: status={status:#04x}")]
    ChipStatus {
        /// Command the status belongs to
        command: u8,
        /// Raw status byte
        status: u8,
    },

    /// Target-mode negotiation was refused
    #[error("target handshake failed: {0}")]
    HandshakeFailed(String),

    /// The link failed after an initiator had already activated the target
    #[error("link failed after activation: {0}")]
    PostActivation(Box<Error>),

    /// Nothing arrived within the timeout
    #[error("operation timed out")]
    Timeout,

    /// Underlying link failure
    #[error("link error: {0}")]
    Link(String),

    /// Frame handler aborted
    #[error("frame handler error: {0}")]
    Handler(String),

    /// Builder was finished without a transport
    #[error("no transport configured")]
    TransportNotConfigured,
}

/// Crate result alias
pub type Result<T> = std::result::Result<T, Error>;
