//! Full frame round-trip scenarios: `parse(serialize(key)) == key` for a
//! range of segment counts and header field combinations.

use fluvia_packet::types::NodeData;
use fluvia_packet::{parse, serialize, ParseError, SerializeParams};
use pretty_assertions::assert_eq;
use std::net::Ipv6Addr;

fn base_params(segments: Vec<Ipv6Addr>) -> SerializeParams {
    let last_entry = (segments.len() - 1) as u8;
    SerializeParams {
        src_mac: [0x02, 0, 0, 0, 0, 0x0a],
        dst_mac: [0x02, 0, 0, 0, 0, 0x0b],
        src_ip: "2001:db8:1::1".parse().unwrap(),
        dst_ip: "2001:db8:1::2".parse().unwrap(),
        pad1_count: 2,
        ioam_flags: 0b1010,
        ioam_remaining_len: 1,
        node_data: vec![
            NodeData {
                hop_limit_node_id: 0x0102_0304,
                ingress_egress_ids: 0x0506_0708,
                second: 1_700_000_000,
                subsecond: 0,
            },
            NodeData {
                hop_limit_node_id: 0x1112_1314,
                ingress_egress_ids: 0x1516_1718,
                second: 1_700_000_000,
                subsecond: 10_000,
            },
        ],
        srh_next_header: 17,
        segments_left: last_entry,
        last_entry,
        flags: 0,
        tag: 0x1234,
        segments,
    }
}

#[test]
fn round_trips_two_segment_probe() {
    let segments = vec![
        "2001:db8:dead:beef::1".parse().unwrap(),
        "2001:db8:dead:beef::2".parse().unwrap(),
    ];
    let params = base_params(segments.clone());
    let frame = serialize(&params);
    let key = parse(&frame).expect("round-trip frame parses");

    assert_eq!(key.routing_type, 4);
    assert_eq!(key.next_header, 17);
    assert_eq!(key.segments_left, 1);
    assert_eq!(key.last_entry, 1);
    assert_eq!(key.tag, 0x1234);
    assert_eq!(key.src_ip, params.src_ip);
    assert_eq!(key.dst_ip, params.dst_ip);
    assert_eq!(key.src_mac, params.src_mac);
    assert_eq!(key.dst_mac, params.dst_mac);
    assert_eq!(&key.segments[0..2], segments.as_slice());
    assert!(key.segments[2..].iter().all(|s| *s == Ipv6Addr::UNSPECIFIED));
}

#[test]
fn round_trips_single_segment_probe_with_no_leading_padding() {
    let mut params = base_params(vec!["2001:db8::1".parse().unwrap()]);
    params.pad1_count = 0;
    let frame = serialize(&params);
    let key = parse(&frame).expect("frame with no Pad1 options still parses");
    assert_eq!(key.last_entry, 0);
    assert_eq!(key.active_segment(), "2001:db8::1".parse::<Ipv6Addr>().unwrap());
}

#[test]
fn round_trips_full_ten_segment_probe() {
    let segments: Vec<Ipv6Addr> = (0..10)
        .map(|i| format!("2001:db8::{i:x}").parse().unwrap())
        .collect();
    let params = base_params(segments.clone());
    let frame = serialize(&params);
    let key = parse(&frame).expect("ten-segment frame parses");
    assert_eq!(key.last_entry, 9);
    assert_eq!(key.segments.to_vec(), segments);
}

#[test]
fn truncated_frame_is_reported_not_panicked() {
    let params = base_params(vec!["2001:db8::1".parse().unwrap(), "2001:db8::2".parse().unwrap()]);
    let frame = serialize(&params);
    let truncated = &frame[..frame.len() - 10];
    match parse(truncated) {
        Err(ParseError::TruncatedFrame { .. }) => {}
        other => panic!("expected TruncatedFrame, got {other:?}"),
    }
}
