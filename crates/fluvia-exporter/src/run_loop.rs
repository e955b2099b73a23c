//! Drives an [`Exporter`] from the meter's field-value channel until
//! cancellation or the channel closes.

use std::time::{SystemTime, UNIX_EPOCH};

use fluvia_ipfix::FieldValue;
use tokio::sync::{mpsc, watch};

use crate::exporter::Exporter;

fn unix_now_secs() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_secs() as u32
}

/// Consumes field-value batches from `in_rx`, sending one Message per
/// batch. A per-send socket error is logged and the record dropped; the
/// loop only returns when `shutdown` fires or the channel closes, per the
/// supervising runtime's cancellation contract.
pub async fn run_loop(
    mut exporter: Exporter,
    mut in_rx: mpsc::Receiver<Vec<FieldValue>>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        let field_values = tokio::select! {
            biased;
            _ = shutdown.changed() => return,
            fvs = in_rx.recv() => match fvs {
                Some(fvs) => fvs,
                None => return,
            },
        };

        if let Err(err) = exporter.send(field_values, unix_now_secs()).await {
            tracing::warn!(error = %err, "dropping record after transient export failure");
        }
    }
}
