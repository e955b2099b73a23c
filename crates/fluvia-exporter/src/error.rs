pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Fatal when it occurs on the initial connect; a per-send occurrence
    /// is logged by the run loop and the record is dropped.
    #[error("UDP socket error: {0}")]
    Socket(#[from] std::io::Error),
}
