//! Feeds synthetic per-flow field-value batches into the exporter, so the
//! wire format can be exercised against a real collector without a live
//! XDP capture.

use std::net::Ipv6Addr;
use std::time::Duration;

use clap::Parser;
use fluvia_ipfix::FieldValue;

#[derive(Parser)]
#[command(name = "fluvia-exporter-harness", version, about = "Synthetic IPFIX flow generator for Fluvia")]
struct Cli {
    /// Collector address.
    #[arg(short = 'a', long, default_value = "127.0.0.1")]
    address: String,

    /// Collector port.
    #[arg(short = 'p', long, default_value_t = 4739)]
    port: u16,

    /// Seconds between emitted datagrams.
    #[arg(short = 'i', long, default_value_t = 1)]
    interval: u64,

    /// Number of datagrams to send before exiting. Unset runs forever.
    #[arg(short = 'n', long)]
    count: Option<u64>,
}

/// Builds one synthetic flow's field values, varying the packet count and
/// delay stats with `tick` so successive datagrams aren't identical.
fn synthetic_field_values(tick: u64) -> Vec<FieldValue> {
    let segments = vec![
        "2001:db8:dead:beef::1".parse::<Ipv6Addr>().unwrap(),
        "2001:db8:dead:beef::2".parse::<Ipv6Addr>().unwrap(),
    ];
    let active_segment = segments[0];
    let base_delay = 1_000 + (tick % 50) * 10;

    vec![
        FieldValue::PacketDeltaCount(1 + tick % 10),
        FieldValue::SrhActiveSegmentIpv6(active_segment),
        FieldValue::SrhSegmentsIpv6Left(1),
        FieldValue::SrhFlagsIpv6(0),
        FieldValue::SrhTagIpv6(42),
        FieldValue::SrhSegmentIpv6BasicList(segments),
        FieldValue::PathDelayMeanDeltaMicroseconds(base_delay as u32),
        FieldValue::PathDelayMinDeltaMicroseconds(base_delay.saturating_sub(200) as u32),
        FieldValue::PathDelayMaxDeltaMicroseconds((base_delay + 200) as u32),
        FieldValue::PathDelaySumDeltaMicroseconds((base_delay * (1 + tick % 10)) as u32),
    ]
}

fn unix_now_secs() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_secs() as u32
}

#[tokio::main]
async fn main() -> Result<(), fluvia_exporter::ExportError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut exporter = fluvia_exporter::Exporter::connect((cli.address.as_str(), cli.port)).await?;
    let mut ticker = tokio::time::interval(Duration::from_secs(cli.interval));

    let mut tick = 0u64;
    loop {
        if let Some(count) = cli.count {
            if tick >= count {
                break;
            }
        }
        ticker.tick().await;
        let fvs = synthetic_field_values(tick);
        exporter.send(fvs, unix_now_secs()).await?;
        tracing::info!(tick, "sent synthetic flow record");
        tick += 1;
    }

    Ok(())
}
