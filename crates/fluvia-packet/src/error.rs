//! Parse errors. Every variant is non-fatal at the pipeline level: the
//! caller drops the offending frame, counts it, and keeps reading.

/// Result type for packet parsing.
pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Not enough bytes left to read the next fixed-size field.
    #[error("truncated frame: need at least {needed} bytes, have {have}")]
    TruncatedFrame { needed: usize, have: usize },

    /// The Ethernet frame's EtherType was not IPv6 (0x86DD).
    #[error("unexpected EtherType: {0:#06x}")]
    UnexpectedEtherType(u16),

    /// A `next header` (or HBH option type) field did not match what the
    /// fixed probe-packet stack requires at this position.
    #[error("unexpected next header: expected {expected}, got {actual}")]
    UnexpectedNextHeader { expected: u8, actual: u8 },

    /// The SRH's Routing Type was not 4.
    #[error("unsupported SRH routing type: {0}")]
    UnsupportedRoutingType(u8),

    /// The IOAM Trace Header's `node_len` was not 4; NodeData entries
    /// would be mis-sized if parsing continued.
    #[error("unsupported IOAM node_len: {0}")]
    UnsupportedIoamNodeLen(u8),
}
