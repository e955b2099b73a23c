//! Builds the per-flow field-value list emitted once per drain interval.

use fluvia_ipfix::FieldValue;
use fluvia_packet::ProbeKey;

use crate::stats::Stats;

/// The ordered list of Information Elements exported for one flow: packet
/// count, the active SRH segment, routing metadata, the ordered segment
/// list, and the four delay statistics.
pub fn build_field_values(key: &ProbeKey, stats: &Stats) -> Vec<FieldValue> {
    vec![
        FieldValue::PacketDeltaCount(stats.count as u64),
        FieldValue::SrhActiveSegmentIpv6(key.active_segment()),
        FieldValue::SrhSegmentsIpv6Left(key.segments_left),
        FieldValue::SrhFlagsIpv6(key.flags),
        FieldValue::SrhTagIpv6(key.tag),
        FieldValue::SrhSegmentIpv6BasicList(key.non_zero_segments()),
        FieldValue::PathDelayMeanDeltaMicroseconds(stats.delay_mean as u32),
        FieldValue::PathDelayMinDeltaMicroseconds(stats.delay_min as u32),
        FieldValue::PathDelayMaxDeltaMicroseconds(stats.delay_max as u32),
        FieldValue::PathDelaySumDeltaMicroseconds(stats.delay_sum as u32),
    ]
}
