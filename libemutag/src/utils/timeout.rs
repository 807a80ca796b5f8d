//! Session timeouts. Every blocking transport call takes milliseconds.

/// Per-call timeout used when the caller picks none
pub const DEFAULT_SESSION_TIMEOUT_MS: u64 = 1000;
