//! The kernel capture contract: the 16-byte metadata prefix the XDP
//! program stamps onto every sample, and the userspace side of loading
//! and attaching it.
//!
//! The BPF ELF object itself is an external collaborator — this module
//! only knows how to load whatever object it's handed, attach it, and
//! drain the perf array it exposes.

use aya::maps::{AsyncPerfEventArray, MapError};
use aya::programs::{Xdp, XdpFlags};
use aya::util::online_cpus;
use aya::Ebpf;
use bytes::BytesMut;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::{MeterError, Result};

/// Name of the perf-event array map exposed by the probe program.
pub const PERF_MAP_NAME: &str = "packet_probe_perf";

/// Prepended to each captured frame in the ring buffer. Field order and
/// width must match the kernel C definition bit-for-bit; any change here
/// requires a coordinated kernel rebuild.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct XdpMetadata {
    /// `CLOCK_MONOTONIC` nanoseconds at the host when the probe was received.
    pub received_nano: u64,
    /// Sender's IOAM-reported seconds, copied from the innermost NodeData.
    pub sent_sec: u32,
    /// Sender's IOAM-reported subseconds (nanoseconds within `sent_sec`).
    pub sent_subsec: u32,
}

impl XdpMetadata {
    pub const LEN: usize = std::mem::size_of::<Self>();

    /// Splits a ring-buffer sample into its metadata prefix and the
    /// original Ethernet frame that follows it.
    pub fn split(sample: &[u8]) -> Result<(&Self, &[u8])> {
        Self::ref_from_prefix(sample).map_err(|_| {
            MeterError::RingRead(format!(
                "sample too short for metadata prefix: need {}, have {}",
                Self::LEN,
                sample.len()
            ))
        })
    }
}

/// A ring-buffer sample source, abstracted so `read_loop` can be driven by
/// a live `aya` perf buffer in production and by a canned sequence in
/// tests.
pub trait RingSource: Send {
    /// Awaits the next sample. `Ok(None)` means the source closed cleanly
    /// (e.g. on cancellation); any ring-level failure is a `MeterError`.
    fn next_sample(&mut self) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
}

/// Owns the loaded BPF object and the attached XDP link. Dropping it
/// detaches the program from the interface.
pub struct XdpHandle {
    ebpf: Ebpf,
}

impl XdpHandle {
    /// Loads `obj_bytes` (a compiled BPF ELF object) and attaches its
    /// `xdp_probe` program to `interface` in generic (SKB) mode.
    pub fn attach(obj_bytes: &[u8], interface: &str) -> Result<Self> {
        let mut ebpf = Ebpf::load(obj_bytes).map_err(MeterError::from)?;
        let program: &mut Xdp = ebpf
            .program_mut("xdp_probe")
            .ok_or_else(|| MeterError::KernelLoad("missing xdp_probe program".into()))?
            .try_into()
            .map_err(MeterError::from)?;
        program.load().map_err(MeterError::from)?;
        program
            .attach(interface, XdpFlags::SKB_MODE)
            .map_err(MeterError::from)?;
        Ok(Self { ebpf })
    }

    /// Opens one `AsyncPerfEventArrayBuffer` per online CPU on the
    /// `packet_probe_perf` map, per aya's per-CPU perf array API.
    pub fn open_perf_buffers(&mut self) -> Result<Vec<PerfBufferSource>> {
        let mut perf_array: AsyncPerfEventArray<_> = self
            .ebpf
            .take_map(PERF_MAP_NAME)
            .ok_or_else(|| MeterError::KernelLoad(format!("missing map {PERF_MAP_NAME}")))?
            .try_into()
            .map_err(MeterError::from)?;

        let cpus = online_cpus().map_err(|(msg, err)| {
            MeterError::KernelLoad(format!("failed to enumerate online CPUs: {msg}: {err}"))
        })?;

        cpus.into_iter()
            .map(|cpu_id| {
                perf_array
                    .open(cpu_id, None)
                    .map(PerfBufferSource::new)
                    .map_err(MeterError::from)
            })
            .collect()
    }
}

impl From<MapError> for MeterError {
    fn from(err: MapError) -> Self {
        MeterError::KernelLoad(err.to_string())
    }
}

impl From<aya::maps::perf::PerfBufferError> for MeterError {
    fn from(err: aya::maps::perf::PerfBufferError) -> Self {
        MeterError::KernelLoad(err.to_string())
    }
}

/// One CPU's perf event buffer, wrapped to implement [`RingSource`].
pub struct PerfBufferSource {
    buf: aya::maps::perf::AsyncPerfEventArrayBuffer<aya::maps::MapData>,
    bufs: Vec<BytesMut>,
}

impl PerfBufferSource {
    fn new(buf: aya::maps::perf::AsyncPerfEventArrayBuffer<aya::maps::MapData>) -> Self {
        Self {
            buf,
            bufs: vec![BytesMut::with_capacity(4096)],
        }
    }
}

impl RingSource for PerfBufferSource {
    async fn next_sample(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            let events = self
                .buf
                .read_events(&mut self.bufs)
                .await
                .map_err(|e| MeterError::RingRead(e.to_string()))?;
            if events.lost > 0 {
                tracing::warn!(lost = events.lost, "perf buffer dropped samples");
            }
            if events.read > 0 {
                return Ok(Some(self.bufs[0][..].to_vec()));
            }
        }
    }
}
