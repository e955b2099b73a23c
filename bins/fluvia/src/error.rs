//! Top-level error composing every library crate's error type. `main`
//! returns `Result<(), AppError>`; the process exit message comes from
//! `Display`.

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] fluvia_config::ConfigError),

    #[error(transparent)]
    Meter(#[from] fluvia_meter::MeterError),

    #[error(transparent)]
    Export(#[from] fluvia_exporter::ExportError),

    #[error("failed to read BPF object at {path}: {source}")]
    BpfObject {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("task panicked: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
