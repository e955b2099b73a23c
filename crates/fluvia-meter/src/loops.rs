//! The meter's two long-running tasks: draining the capture ring and
//! periodically draining the stats map into the exporter's input channel.

use std::time::Duration;

use fluvia_ipfix::FieldValue;
use tokio::sync::{mpsc, watch};

use crate::clock::delay_micros;
use crate::error::{MeterError, Result};
use crate::fields::build_field_values;
use crate::stats::{SharedStats, Stats};
use crate::xdp::{RingSource, XdpMetadata};

/// Drains `source` forever, parsing each sample into a `ProbeKey` and
/// folding its delay into `stats`. Parse failures are dropped and counted;
/// a ring-level failure is fatal and returned to the caller. Returns
/// `Ok(())` only when `shutdown` fires.
pub async fn read_loop<R: RingSource>(
    mut source: R,
    stats: SharedStats,
    boot_wall_nanos: i128,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    loop {
        let sample = tokio::select! {
            biased;
            _ = shutdown.changed() => return Ok(()),
            sample = source.next_sample() => sample?,
        };
        let Some(sample) = sample else {
            return Err(MeterError::RingRead("ring buffer channel closed".into()));
        };

        let (meta, frame) = match XdpMetadata::split(&sample) {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::debug!("dropped sample shorter than metadata prefix");
                continue;
            }
        };
        if frame.is_empty() {
            tracing::debug!("dropped sample with empty frame payload");
            continue;
        }

        let key = match fluvia_packet::parse(frame) {
            Ok(key) => key,
            Err(err) => {
                tracing::debug!(error = %err, "dropped unparseable probe frame");
                continue;
            }
        };

        let delay_us = delay_micros(boot_wall_nanos, meta.received_nano, meta.sent_sec, meta.sent_subsec);
        let mut guard = stats.lock().await;
        guard
            .entry(key)
            .and_modify(|s| s.upsert(delay_us))
            .or_insert_with(|| Stats::new(delay_us));
    }
}

/// Every `interval`, drains `stats` and pushes one `Vec<FieldValue>` per
/// flow onto `out_tx`. Draining removes each entry as it's emitted, so
/// every record is a delta over the previous interval. Returns `Ok(())`
/// when `shutdown` fires or the exporter's receiver is dropped.
pub async fn send_loop(
    stats: SharedStats,
    out_tx: mpsc::Sender<Vec<FieldValue>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => return Ok(()),
            _ = ticker.tick() => {}
        }

        let drained: Vec<_> = {
            let mut guard = stats.lock().await;
            guard.drain().collect()
        };
        for (key, stat) in drained {
            let fvs = build_field_values(&key, &stat);
            if out_tx.send(fvs).await.is_err() {
                return Ok(());
            }
        }
    }
}
