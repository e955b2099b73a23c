//! Parses Ethernet → IPv6 → HBH(IOAM) → SRH into a [`ProbeKey`].

use std::net::Ipv6Addr;

use crate::error::{ParseError, Result};
use crate::types::{
    wire, ProbeKey, ETHER_TYPE_IPV6, IOAM_OPTION_TYPE, MAX_SEGMENTS, NEXT_HEADER_HOP_BY_HOP,
    NEXT_HEADER_ROUTING, SRH_ROUTING_TYPE, SUPPORTED_IOAM_NODE_LEN,
};

fn need(buf: &[u8], n: usize) -> Result<()> {
    if buf.len() < n {
        Err(ParseError::TruncatedFrame {
            needed: n,
            have: buf.len(),
        })
    } else {
        Ok(())
    }
}

fn read_ipv6_addr(buf: &[u8]) -> Ipv6Addr {
    let octets: [u8; 16] = buf[..16].try_into().expect("slice pre-sized by caller");
    Ipv6Addr::from(octets)
}

/// Parses a probe frame starting at its Ethernet header.
pub fn parse(frame: &[u8]) -> Result<ProbeKey> {
    need(frame, wire::ETHERNET_HEADER_LEN)?;
    let dst_mac: [u8; 6] = frame[0..6].try_into().unwrap();
    let src_mac: [u8; 6] = frame[6..12].try_into().unwrap();
    let ether_type = u16::from_be_bytes([frame[12], frame[13]]);
    if ether_type != ETHER_TYPE_IPV6 {
        return Err(ParseError::UnexpectedEtherType(ether_type));
    }

    let ipv6 = &frame[wire::ETHERNET_HEADER_LEN..];
    need(ipv6, wire::IPV6_HEADER_LEN)?;
    let next_header = ipv6[6];
    if next_header != NEXT_HEADER_HOP_BY_HOP {
        return Err(ParseError::UnexpectedNextHeader {
            expected: NEXT_HEADER_HOP_BY_HOP,
            actual: next_header,
        });
    }
    let src_ip = read_ipv6_addr(&ipv6[8..24]);
    let dst_ip = read_ipv6_addr(&ipv6[24..40]);

    let hbh = &ipv6[wire::IPV6_HEADER_LEN..];
    need(hbh, 8)?;
    let hbh_next_header = hbh[0];
    if hbh_next_header != NEXT_HEADER_ROUTING {
        return Err(ParseError::UnexpectedNextHeader {
            expected: NEXT_HEADER_ROUTING,
            actual: hbh_next_header,
        });
    }
    let hbh_total_len = (hbh[1] as usize + 1) * 8;
    need(hbh, hbh_total_len)?;
    let options = &hbh[2..hbh_total_len];

    // Skip Pad1 options one byte at a time until the IOAM option.
    let mut pos = 0;
    while pos < options.len() && options[pos] == 0 {
        pos += 1;
    }
    need(options, pos + 2)?;
    let option_type = options[pos];
    if option_type != IOAM_OPTION_TYPE {
        return Err(ParseError::UnexpectedNextHeader {
            expected: IOAM_OPTION_TYPE,
            actual: option_type,
        });
    }
    let opt_data_len = options[pos + 1] as usize;
    let opt_data = &options[pos + 2..];
    need(opt_data, opt_data_len)?;
    // opt_data[0] = reserved, opt_data[1] = IOAM option-type (0 = Pre-allocated Trace),
    // opt_data[2..10] = 8-byte IOAM Trace Header, opt_data[10..] = NodeData entries.
    need(opt_data, 10)?;
    let trace_header = &opt_data[2..10];
    let node_len = trace_header[2] >> 3;
    if node_len != SUPPORTED_IOAM_NODE_LEN {
        return Err(ParseError::UnsupportedIoamNodeLen(node_len));
    }

    let srh = &hbh[hbh_total_len..];
    need(srh, 8)?;
    let srh_next_header = srh[0];
    let srh_hdr_ext_len = srh[1];
    let routing_type = srh[2];
    if routing_type != SRH_ROUTING_TYPE {
        return Err(ParseError::UnsupportedRoutingType(routing_type));
    }
    let segments_left = srh[3];
    let last_entry = srh[4];
    let flags = srh[5];
    let tag = u16::from_be_bytes([srh[6], srh[7]]);

    let mut segments = [Ipv6Addr::UNSPECIFIED; MAX_SEGMENTS];
    let num_segments = (last_entry as usize + 1).min(MAX_SEGMENTS);
    let segments_bytes = &srh[8..];
    need(segments_bytes, num_segments * 16)?;
    for (i, slot) in segments.iter_mut().take(num_segments).enumerate() {
        *slot = read_ipv6_addr(&segments_bytes[i * 16..]);
    }

    Ok(ProbeKey {
        next_header: srh_next_header,
        hdr_ext_len: srh_hdr_ext_len,
        routing_type,
        segments_left,
        last_entry,
        flags,
        tag,
        segments,
        src_mac,
        dst_mac,
        src_ip,
        dst_ip,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::{serialize, SerializeParams};
    use crate::types::NodeData;
    use pretty_assertions::assert_eq;

    fn sample_params() -> SerializeParams {
        SerializeParams {
            src_mac: [0x02, 0, 0, 0, 0, 1],
            dst_mac: [0x02, 0, 0, 0, 0, 2],
            src_ip: "2001:db8:1::1".parse().unwrap(),
            dst_ip: "2001:db8:1::2".parse().unwrap(),
            pad1_count: 2,
            ioam_flags: 0,
            ioam_remaining_len: 1,
            node_data: vec![
                NodeData {
                    hop_limit_node_id: 1,
                    ingress_egress_ids: 2,
                    second: 1_700_000_000,
                    subsecond: 0,
                },
                NodeData {
                    hop_limit_node_id: 2,
                    ingress_egress_ids: 3,
                    second: 1_700_000_000,
                    subsecond: 10_000,
                },
            ],
            srh_next_header: 17,
            segments_left: 2,
            last_entry: 1,
            flags: 0,
            tag: 0,
            segments: vec!["2001:db8:dead:beef::1".parse().unwrap(), "2001:db8:dead:beef::2".parse().unwrap()],
        }
    }

    #[test]
    fn parses_one_probe() {
        let frame = serialize(&sample_params());
        let key = parse(&frame).expect("valid probe frame parses");

        assert_eq!(key.routing_type, 4);
        assert_eq!(key.segments_left, 2);
        assert_eq!(key.last_entry, 1);
        assert_eq!(key.next_header, 17);
        assert_eq!(key.segments[0], "2001:db8:dead:beef::1".parse::<Ipv6Addr>().unwrap());
        assert_eq!(key.segments[1], "2001:db8:dead:beef::2".parse::<Ipv6Addr>().unwrap());
        for seg in &key.segments[2..] {
            assert_eq!(*seg, Ipv6Addr::UNSPECIFIED);
        }
    }

    #[test]
    fn rejects_non_ipv6_ethertype() {
        let mut frame = serialize(&sample_params());
        frame[12] = 0x08;
        frame[13] = 0x00;
        assert_eq!(parse(&frame), Err(ParseError::UnexpectedEtherType(0x0800)));
    }

    #[test]
    fn rejects_wrong_ipv6_next_header() {
        let mut frame = serialize(&sample_params());
        frame[wire::ETHERNET_HEADER_LEN + 6] = 6; // TCP instead of HBH
        assert_eq!(
            parse(&frame),
            Err(ParseError::UnexpectedNextHeader {
                expected: NEXT_HEADER_HOP_BY_HOP,
                actual: 6,
            })
        );
    }

    #[test]
    fn rejects_unsupported_node_len() {
        let mut params = sample_params();
        params.node_data.push(NodeData::default());
        let mut frame = serialize(&params);
        // Trace header node_len byte sits right after the 4-byte option
        // header and 2-byte namespace id.
        let hbh_start = wire::ETHERNET_HEADER_LEN + wire::IPV6_HEADER_LEN;
        let node_len_byte_offset = hbh_start + params.pad1_count + 8;
        frame[node_len_byte_offset] = 5 << 3;
        assert_eq!(parse(&frame), Err(ParseError::UnsupportedIoamNodeLen(5)));
    }
}
