//! Fluvia daemon: wires the meter's capture + aggregation tasks to the
//! exporter's UDP send loop, and supervises them until a fatal error or
//! `SIGINT`/`SIGTERM` arrives.

mod error;
mod version;

use std::path::PathBuf;

use clap::Parser;
use error::AppError;
use tokio::sync::{mpsc, watch};

/// Location of the compiled XDP probe object. The program itself is built
/// and shipped separately from this daemon; see the project's packaging
/// notes for how it lands here.
const BPF_OBJECT_PATH: &str = "/usr/local/share/fluvia/bpf/probe.o";

#[derive(Parser)]
#[command(name = "fluvia", version = version::VERSION, about = "On-path telemetry agent for SRv6 IOAM probes")]
struct Cli {
    /// Configuration file path.
    #[arg(short = 'f', long = "config", default_value = "fluvia.yaml")]
    config: PathBuf,

    /// Overrides `ipfix.ingress-interface` from the config file.
    #[arg(short = 'i', long = "interface")]
    interface: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = fluvia_config::Config::from_path(&cli.config)?;
    let interface = cli.interface.unwrap_or(config.ipfix.ingress_interface.clone());

    tracing::info!(interface, address = %config.ipfix.address, port = config.ipfix.port, "starting fluvia");

    let obj_bytes = std::fs::read(BPF_OBJECT_PATH).map_err(|source| AppError::BpfObject {
        path: PathBuf::from(BPF_OBJECT_PATH),
        source,
    })?;
    let mut xdp_handle = fluvia_meter::XdpHandle::attach(&obj_bytes, &interface)?;
    let perf_sources = xdp_handle.open_perf_buffers()?;

    let boot_wall_nanos = fluvia_meter::clock::boot_wall_nanos();
    let stats = fluvia_meter::new_shared_stats();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (fatal_tx, mut fatal_rx) = mpsc::channel::<AppError>(perf_sources.len() + 2);

    for source in perf_sources {
        let stats = stats.clone();
        let shutdown_rx = shutdown_rx.clone();
        let fatal_tx = fatal_tx.clone();
        tokio::spawn(async move {
            if let Err(err) = fluvia_meter::read_loop(source, stats, boot_wall_nanos, shutdown_rx).await {
                let _ = fatal_tx.send(AppError::from(err)).await;
            }
        });
    }

    let (field_values_tx, field_values_rx) = mpsc::channel(256);
    {
        let stats = stats.clone();
        let shutdown_rx = shutdown_rx.clone();
        let fatal_tx = fatal_tx.clone();
        let interval = std::time::Duration::from_secs(config.ipfix.interval);
        tokio::spawn(async move {
            if let Err(err) = fluvia_meter::send_loop(stats, field_values_tx, interval, shutdown_rx).await {
                let _ = fatal_tx.send(AppError::from(err)).await;
            }
        });
    }

    let exporter = fluvia_exporter::Exporter::connect((config.ipfix.address.as_str(), config.ipfix.port)).await?;
    tokio::spawn(fluvia_exporter::run_loop(exporter, field_values_rx, shutdown_rx.clone()));

    let result = tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
            Ok(())
        }
        Some(err) = fatal_rx.recv() => {
            tracing::error!(error = %err, "fatal error, shutting down");
            Err(err)
        }
    };

    let _ = shutdown_tx.send(true);
    drop(xdp_handle);
    result
}
