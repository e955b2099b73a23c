//! Meter-fatal errors. Per-packet parse failures never reach this type —
//! they're counted and dropped inside `read_loop`.

pub type Result<T> = std::result::Result<T, MeterError>;

#[derive(Debug, thiserror::Error)]
pub enum MeterError {
    /// The XDP program could not be loaded or attached to the interface.
    #[error("failed to load/attach XDP program: {0}")]
    KernelLoad(String),

    /// The kernel ring buffer channel broke (the perf array closed, or a
    /// sample could not be decoded as a metadata-prefixed frame).
    #[error("ring buffer read failed: {0}")]
    RingRead(String),
}

impl From<aya::EbpfError> for MeterError {
    fn from(err: aya::EbpfError) -> Self {
        Self::KernelLoad(err.to_string())
    }
}

impl From<aya::programs::ProgramError> for MeterError {
    fn from(err: aya::programs::ProgramError) -> Self {
        Self::KernelLoad(err.to_string())
    }
}
