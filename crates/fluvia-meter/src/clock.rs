//! Converts kernel `CLOCK_MONOTONIC` timestamps to wall-clock delay.
//!
//! `boot_wall_nanos` is computed once at startup and never refreshed: if
//! the host suspends, `CLOCK_MONOTONIC` and wall clock drift apart and
//! every subsequently computed delay carries that drift. This is a known
//! limitation, not a bug to fix here.

/// Reads the current `CLOCK_MONOTONIC` value in nanoseconds, matching the
/// clock source the kernel XDP program stamps into `XdpMetadata`.
pub fn now_monotonic_nanos() -> u64 {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: `ts` is a valid, fully-initialized timespec and
    // CLOCK_MONOTONIC is always a supported clock id.
    unsafe {
        libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts);
    }
    ts.tv_sec as u64 * 1_000_000_000 + ts.tv_nsec as u64
}

/// `now_wallclock - now_monotonic`, in nanoseconds. Adding this to a
/// `CLOCK_MONOTONIC` timestamp recovers the corresponding wall-clock time.
pub fn boot_wall_nanos() -> i128 {
    let wall_nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_nanos() as i128;
    wall_nanos - now_monotonic_nanos() as i128
}

/// Delay in microseconds between a sender's IOAM-reported timestamp and
/// this host's receive time. `sent_subsec` is interpreted as nanoseconds
/// within `sent_sec`, matching the NodeData layout in `fluvia-packet`.
pub fn delay_micros(boot_wall_nanos: i128, received_nano: u64, sent_sec: u32, sent_subsec: u32) -> i64 {
    let received_wall_nanos = boot_wall_nanos + received_nano as i128;
    let sent_wall_nanos = sent_sec as i128 * 1_000_000_000 + sent_subsec as i128;
    ((received_wall_nanos - sent_wall_nanos) / 1_000) as i64
}
