//! Inverse of [`crate::parse::parse`]: synthesizes a probe frame from a
//! flow description and an IOAM NodeData sequence. Used by tests and by
//! the standalone exporter harness to exercise the wire format without a
//! live capture.

use std::net::Ipv6Addr;

use crate::types::{NodeData, IOAM_OPTION_TYPE, NEXT_HEADER_HOP_BY_HOP, NEXT_HEADER_ROUTING};

/// Everything [`serialize`] needs to build a probe frame. Distinct from
/// [`crate::types::ProbeKey`] because a few wire-only fields (IOAM flags,
/// remaining_len, NodeData, pad count) never survive into the parsed key.
#[derive(Debug, Clone)]
pub struct SerializeParams {
    pub src_mac: [u8; 6],
    pub dst_mac: [u8; 6],
    pub src_ip: Ipv6Addr,
    pub dst_ip: Ipv6Addr,
    pub pad1_count: usize,
    pub ioam_flags: u8,
    pub ioam_remaining_len: u8,
    pub node_data: Vec<NodeData>,
    pub srh_next_header: u8,
    pub segments_left: u8,
    pub last_entry: u8,
    pub flags: u8,
    pub tag: u16,
    pub segments: Vec<Ipv6Addr>,
}

const IOAM_NODE_LEN: u8 = 4;

fn build_hbh_options(params: &SerializeParams) -> Vec<u8> {
    let mut opts = vec![0u8; params.pad1_count];

    let mut opt_data = Vec::new();
    opt_data.push(0); // reserved
    opt_data.push(0); // IOAM option-type: Pre-allocated Trace
    opt_data.extend_from_slice(&0u16.to_be_bytes()); // namespace id
    let byte0 = (IOAM_NODE_LEN << 3) | ((params.ioam_flags >> 1) & 0x07);
    let byte1 = ((params.ioam_flags & 0x01) << 7) | (params.ioam_remaining_len & 0x7F);
    opt_data.push(byte0);
    opt_data.push(byte1);
    opt_data.extend_from_slice(&[0, 0, 0]); // IOAM-Trace-Type
    opt_data.push(0); // reserved
    for nd in &params.node_data {
        opt_data.extend_from_slice(&nd.to_bytes());
    }

    opts.push(IOAM_OPTION_TYPE);
    opts.push(opt_data.len() as u8);
    opts.extend_from_slice(&opt_data);

    // Pad the whole HBH header (2-byte header + options) to an 8-byte
    // multiple, as RFC 8200 requires.
    let unpadded_total = 2 + opts.len();
    let padded_total = (unpadded_total + 7) & !7;
    opts.resize(opts.len() + (padded_total - unpadded_total), 0);
    opts
}

fn build_srh(params: &SerializeParams) -> Vec<u8> {
    let mut buf = Vec::with_capacity(8 + params.segments.len() * 16);
    buf.push(params.srh_next_header);
    buf.push((params.segments.len() as u8).saturating_mul(2));
    buf.push(4); // routing type
    buf.push(params.segments_left);
    buf.push(params.last_entry);
    buf.push(params.flags);
    buf.extend_from_slice(&params.tag.to_be_bytes());
    for seg in &params.segments {
        buf.extend_from_slice(&seg.octets());
    }
    buf
}

/// Builds a full Ethernet-through-SRH probe frame.
pub fn serialize(params: &SerializeParams) -> Vec<u8> {
    let hbh_options = build_hbh_options(params);
    let srh = build_srh(params);

    let mut hbh = Vec::with_capacity(2 + hbh_options.len());
    hbh.push(NEXT_HEADER_ROUTING);
    hbh.push(((2 + hbh_options.len()) / 8 - 1) as u8);
    hbh.extend_from_slice(&hbh_options);

    let mut ipv6 = Vec::with_capacity(40);
    ipv6.extend_from_slice(&0x6000_0000u32.to_be_bytes());
    let payload_len = (hbh.len() + srh.len()) as u16;
    ipv6.extend_from_slice(&payload_len.to_be_bytes());
    ipv6.push(NEXT_HEADER_HOP_BY_HOP);
    ipv6.push(64); // hop limit
    ipv6.extend_from_slice(&params.src_ip.octets());
    ipv6.extend_from_slice(&params.dst_ip.octets());

    let mut frame = Vec::with_capacity(14 + ipv6.len() + hbh.len() + srh.len());
    frame.extend_from_slice(&params.dst_mac);
    frame.extend_from_slice(&params.src_mac);
    frame.extend_from_slice(&crate::types::ETHER_TYPE_IPV6.to_be_bytes());
    frame.extend_from_slice(&ipv6);
    frame.extend_from_slice(&hbh);
    frame.extend_from_slice(&srh);
    frame
}
