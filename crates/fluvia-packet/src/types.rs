//! Wire constants and the flow fingerprint extracted from a probe frame.

use std::net::Ipv6Addr;

/// Maximum number of SRH segments `ProbeKey` can hold; unused slots stay
/// the unspecified (all-zero) address.
pub const MAX_SEGMENTS: usize = 10;

pub const ETHER_TYPE_IPV6: u16 = 0x86DD;
pub const NEXT_HEADER_HOP_BY_HOP: u8 = 0;
pub const NEXT_HEADER_ROUTING: u8 = 43;
pub const SRH_ROUTING_TYPE: u8 = 4;

/// Outer HBH option type used by the Pre-allocated Trace Option variant
/// of IOAM (draft-ietf-ippm-ioam-ipv6-options).
pub const IOAM_OPTION_TYPE: u8 = 0x31;
/// The only `node_len` this parser understands: 4 32-bit words (16 bytes)
/// per hop.
pub const SUPPORTED_IOAM_NODE_LEN: u8 = 4;

const ETHERNET_HEADER_LEN: usize = 14;
const IPV6_HEADER_LEN: usize = 40;

pub(crate) mod wire {
    pub const ETHERNET_HEADER_LEN: usize = super::ETHERNET_HEADER_LEN;
    pub const IPV6_HEADER_LEN: usize = super::IPV6_HEADER_LEN;
}

/// Flow fingerprint used as the aggregation map key: every SRv6/Ethernet
/// field that identifies "the same flow" across probe observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeKey {
    /// Next header carried by the SRH — the encapsulated protocol
    /// (typically UDP, 17).
    pub next_header: u8,
    pub hdr_ext_len: u8,
    /// Always 4 (`SRH_ROUTING_TYPE`) once parsing succeeds.
    pub routing_type: u8,
    pub segments_left: u8,
    /// Index of the last segment; `segments_left <= last_entry < MAX_SEGMENTS`.
    pub last_entry: u8,
    pub flags: u8,
    pub tag: u16,
    /// Fixed-size segment list; entries past `last_entry` are unspecified
    /// (zero-filled by the parser, but callers must not rely on that
    /// beyond equality comparisons against other parser output).
    pub segments: [Ipv6Addr; MAX_SEGMENTS],
    pub src_mac: [u8; 6],
    pub dst_mac: [u8; 6],
    pub src_ip: Ipv6Addr,
    pub dst_ip: Ipv6Addr,
}

impl ProbeKey {
    /// The segment currently being visited, per the SRv6 active-segment
    /// rule: `segments[segments_left]`.
    pub fn active_segment(&self) -> Ipv6Addr {
        self.segments[self.segments_left as usize]
    }

    /// Non-zero segments in index order, for the IPFIX basic-list encoding.
    pub fn non_zero_segments(&self) -> Vec<Ipv6Addr> {
        self.segments[..=self.last_entry as usize].to_vec()
    }
}

/// One 16-byte IOAM NodeData entry under `node_len = 4`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeData {
    pub hop_limit_node_id: u32,
    pub ingress_egress_ids: u32,
    pub second: u32,
    pub subsecond: u32,
}

impl NodeData {
    pub const LEN: usize = 16;

    pub fn to_bytes(self) -> [u8; Self::LEN] {
        let mut buf = [0u8; Self::LEN];
        buf[0..4].copy_from_slice(&self.hop_limit_node_id.to_be_bytes());
        buf[4..8].copy_from_slice(&self.ingress_egress_ids.to_be_bytes());
        buf[8..12].copy_from_slice(&self.second.to_be_bytes());
        buf[12..16].copy_from_slice(&self.subsecond.to_be_bytes());
        buf
    }
}
