//! Turns the kernel capture stream into a live per-flow aggregate map,
//! and drains that map into the exporter's input channel on a timer.

pub mod clock;
pub mod error;
pub mod fields;
pub mod loops;
pub mod stats;
pub mod xdp;

pub use error::{MeterError, Result};
pub use fields::build_field_values;
pub use loops::{read_loop, send_loop};
pub use stats::{new_shared_stats, SharedStats, Stats};
pub use xdp::{RingSource, XdpHandle, XdpMetadata};
