//! Typed Information Element values and their wire encodings.
//!
//! Mirrors the IPFIX data model's "element id + length + enterprise number"
//! triple per value. Rather than a trait object per field, this is a closed
//! enum: every Fluvia field is known ahead of time, so a `match` dispatches
//! to the right encoding without an allocation or a vtable.

use std::net::Ipv6Addr;

use crate::ie::{Ie, ENTERPRISE_NUMBER_NTTCOM};

/// A single IPFIX Field Specifier: element id, advertised length, and an
/// optional enterprise number when the element id's high bit is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpecifier {
    pub element_id: u16,
    pub field_length: u16,
    pub enterprise_number: Option<u32>,
}

impl FieldSpecifier {
    /// Bytes occupied by this specifier in a Template Record: 4, or 8 when
    /// scoped to an enterprise.
    pub fn len(&self) -> u16 {
        if self.enterprise_number.is_some() { 8 } else { 4 }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        let id = match self.enterprise_number {
            Some(_) => self.element_id | 0x8000,
            None => self.element_id,
        };
        buf.extend_from_slice(&id.to_be_bytes());
        buf.extend_from_slice(&self.field_length.to_be_bytes());
        if let Some(ent) = self.enterprise_number {
            buf.extend_from_slice(&ent.to_be_bytes());
        }
    }
}

/// Declared field length for a variable-length Information Element, per
/// RFC 7011 §7.
const VARIABLE_LENGTH: u16 = 0xFFFF;

/// One exported Information Element value.
///
/// `SrhSegmentIpv6BasicList` and `SrhSegmentIpv6ListSection` are the only
/// variable-length members; everything else has a fixed wire length equal
/// to its `template_length()`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    OctetDeltaCount(u64),
    PacketDeltaCount(u64),
    SourceIpv6Address(Ipv6Addr),
    DestinationIpv6Address(Ipv6Addr),

    SrhFlagsIpv6(u8),
    SrhTagIpv6(u16),
    /// Bare single-segment IE (494), distinct from the ordered list below.
    SrhSegmentIpv6(Ipv6Addr),
    SrhActiveSegmentIpv6(Ipv6Addr),
    /// RFC 6313 basicList wrapping an ordered sequence of IE 494 elements.
    SrhSegmentIpv6BasicList(Vec<Ipv6Addr>),
    /// Flatter, wrapper-free concatenation of segment addresses.
    SrhSegmentIpv6ListSection(Vec<Ipv6Addr>),
    SrhSegmentsIpv6Left(u8),
    SrhIpv6ActiveSegmentType(u8),
    SrhSegmentIpv6LocatorLength(u8),
    SrhSegmentIpv6EndpointBehavior(u16),

    PathDelayMeanDeltaMicroseconds(u32),
    PathDelayMinDeltaMicroseconds(u32),
    PathDelayMaxDeltaMicroseconds(u32),
    PathDelaySumDeltaMicroseconds(u32),

    /// Catch-all for an Information Element the registry doesn't model by
    /// name: raw bytes plus the id/enterprise pair needed to describe it.
    Undefined {
        element_id: u16,
        enterprise_number: Option<u32>,
        value: Vec<u8>,
    },
}

impl FieldValue {
    pub fn element_id(&self) -> u16 {
        match self {
            Self::OctetDeltaCount(_) => Ie::OCTET_DELTA_COUNT,
            Self::PacketDeltaCount(_) => Ie::PACKET_DELTA_COUNT,
            Self::SourceIpv6Address(_) => Ie::SOURCE_IPV6_ADDRESS,
            Self::DestinationIpv6Address(_) => Ie::DESTINATION_IPV6_ADDRESS,
            Self::SrhFlagsIpv6(_) => Ie::SRH_FLAGS_IPV6,
            Self::SrhTagIpv6(_) => Ie::SRH_TAG_IPV6,
            Self::SrhSegmentIpv6(_) => Ie::SRH_SEGMENT_IPV6,
            Self::SrhActiveSegmentIpv6(_) => Ie::SRH_ACTIVE_SEGMENT_IPV6,
            Self::SrhSegmentIpv6BasicList(_) => Ie::SRH_SEGMENT_IPV6_BASIC_LIST,
            Self::SrhSegmentIpv6ListSection(_) => Ie::SRH_SEGMENT_IPV6_LIST_SECTION,
            Self::SrhSegmentsIpv6Left(_) => Ie::SRH_SEGMENTS_IPV6_LEFT,
            Self::SrhIpv6ActiveSegmentType(_) => Ie::SRH_IPV6_ACTIVE_SEGMENT_TYPE,
            Self::SrhSegmentIpv6LocatorLength(_) => Ie::SRH_SEGMENT_IPV6_LOCATOR_LENGTH,
            Self::SrhSegmentIpv6EndpointBehavior(_) => Ie::SRH_SEGMENT_IPV6_ENDPOINT_BEHAVIOR,
            Self::PathDelayMeanDeltaMicroseconds(_) => Ie::PATH_DELAY_MEAN_DELTA_MICROSECONDS,
            Self::PathDelayMinDeltaMicroseconds(_) => Ie::PATH_DELAY_MIN_DELTA_MICROSECONDS,
            Self::PathDelayMaxDeltaMicroseconds(_) => Ie::PATH_DELAY_MAX_DELTA_MICROSECONDS,
            Self::PathDelaySumDeltaMicroseconds(_) => Ie::PATH_DELAY_SUM_DELTA_MICROSECONDS,
            Self::Undefined { element_id, .. } => *element_id,
        }
    }

    pub fn enterprise_number(&self) -> Option<u32> {
        match self {
            Self::OctetDeltaCount(_)
            | Self::PacketDeltaCount(_)
            | Self::SourceIpv6Address(_)
            | Self::DestinationIpv6Address(_) => None,
            Self::Undefined {
                enterprise_number, ..
            } => *enterprise_number,
            _ => Some(ENTERPRISE_NUMBER_NTTCOM),
        }
    }

    /// Length advertised in a `FieldSpecifier`: the fixed wire size, or
    /// [`VARIABLE_LENGTH`] for the two list-shaped variants.
    pub fn template_length(&self) -> u16 {
        match self {
            Self::OctetDeltaCount(_) | Self::PacketDeltaCount(_) => 8,
            Self::SourceIpv6Address(_)
            | Self::DestinationIpv6Address(_)
            | Self::SrhSegmentIpv6(_)
            | Self::SrhActiveSegmentIpv6(_) => 16,
            Self::SrhFlagsIpv6(_)
            | Self::SrhSegmentsIpv6Left(_)
            | Self::SrhIpv6ActiveSegmentType(_)
            | Self::SrhSegmentIpv6LocatorLength(_) => 1,
            Self::SrhTagIpv6(_) | Self::SrhSegmentIpv6EndpointBehavior(_) => 2,
            Self::SrhSegmentIpv6BasicList(_) | Self::SrhSegmentIpv6ListSection(_) => {
                VARIABLE_LENGTH
            }
            Self::PathDelayMeanDeltaMicroseconds(_)
            | Self::PathDelayMinDeltaMicroseconds(_)
            | Self::PathDelayMaxDeltaMicroseconds(_)
            | Self::PathDelaySumDeltaMicroseconds(_) => 4,
            Self::Undefined { value, .. } => value.len() as u16,
        }
    }

    /// Bytes this value actually occupies in a Data Record — equal to
    /// `template_length()` except for the two variable-length list variants.
    pub fn serialized_len(&self) -> u16 {
        match self {
            Self::SrhSegmentIpv6BasicList(segs) => 16 * segs.len() as u16 + 8,
            Self::SrhSegmentIpv6ListSection(segs) => 16 * segs.len() as u16 + 1,
            other => other.template_length(),
        }
    }

    pub fn field_specifier(&self) -> FieldSpecifier {
        FieldSpecifier {
            element_id: self.element_id(),
            field_length: self.template_length(),
            enterprise_number: self.enterprise_number(),
        }
    }

    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        match self {
            Self::OctetDeltaCount(v) | Self::PacketDeltaCount(v) => {
                buf.extend_from_slice(&v.to_be_bytes());
            }
            Self::SourceIpv6Address(a)
            | Self::DestinationIpv6Address(a)
            | Self::SrhSegmentIpv6(a)
            | Self::SrhActiveSegmentIpv6(a) => {
                buf.extend_from_slice(&a.octets());
            }
            Self::SrhFlagsIpv6(v)
            | Self::SrhSegmentsIpv6Left(v)
            | Self::SrhIpv6ActiveSegmentType(v)
            | Self::SrhSegmentIpv6LocatorLength(v) => {
                buf.push(*v);
            }
            Self::SrhTagIpv6(v) | Self::SrhSegmentIpv6EndpointBehavior(v) => {
                buf.extend_from_slice(&v.to_be_bytes());
            }
            Self::SrhSegmentIpv6BasicList(segs) => {
                let content_len = 16 * segs.len() as u16 + 5;
                buf.push(0xFF);
                buf.extend_from_slice(&content_len.to_be_bytes());
                buf.push(0x04); // ordered semantic, RFC 6313
                buf.extend_from_slice(&Ie::SRH_SEGMENT_IPV6.to_be_bytes());
                buf.extend_from_slice(&16u16.to_be_bytes());
                for seg in segs {
                    buf.extend_from_slice(&seg.octets());
                }
            }
            Self::SrhSegmentIpv6ListSection(segs) => {
                let length = (16 * segs.len()) as u8;
                buf.push(length);
                for seg in segs {
                    buf.extend_from_slice(&seg.octets());
                }
            }
            Self::PathDelayMeanDeltaMicroseconds(v)
            | Self::PathDelayMinDeltaMicroseconds(v)
            | Self::PathDelayMaxDeltaMicroseconds(v)
            | Self::PathDelaySumDeltaMicroseconds(v) => {
                buf.extend_from_slice(&v.to_be_bytes());
            }
            Self::Undefined { value, .. } => buf.extend_from_slice(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn packet_delta_count_is_eight_byte_big_endian() {
        let fv = FieldValue::PacketDeltaCount(42);
        let mut buf = Vec::new();
        fv.serialize_into(&mut buf);
        assert_eq!(buf, 42u64.to_be_bytes().to_vec());
    }

    #[test]
    fn srh_segment_is_sixteen_raw_bytes() {
        let addr: Ipv6Addr = "2001:db8::1".parse().unwrap();
        let fv = FieldValue::SrhSegmentIpv6(addr);
        let mut buf = Vec::new();
        fv.serialize_into(&mut buf);
        assert_eq!(buf, addr.octets().to_vec());
    }

    #[test]
    fn basic_list_two_segments_matches_wire_layout() {
        let a: Ipv6Addr = "2001:db8::1".parse().unwrap();
        let b: Ipv6Addr = "2001:db8::2".parse().unwrap();
        let fv = FieldValue::SrhSegmentIpv6BasicList(vec![a, b]);
        let mut buf = Vec::new();
        fv.serialize_into(&mut buf);

        let mut expected = vec![0xFF, 0x00, 0x25, 0x04, 0x01, 0xEE, 0x00, 0x10];
        expected.extend_from_slice(&a.octets());
        expected.extend_from_slice(&b.octets());

        assert_eq!(buf, expected);
        assert_eq!(buf.len(), 40);
        assert_eq!(fv.serialized_len(), 40);
        assert_eq!(fv.template_length(), 0xFFFF);
    }

    #[test]
    fn list_section_two_segments_matches_wire_layout() {
        let a: Ipv6Addr = "2001:db8::1".parse().unwrap();
        let b: Ipv6Addr = "2001:db8::2".parse().unwrap();
        let fv = FieldValue::SrhSegmentIpv6ListSection(vec![a, b]);
        let mut buf = Vec::new();
        fv.serialize_into(&mut buf);

        let mut expected = vec![0x20];
        expected.extend_from_slice(&a.octets());
        expected.extend_from_slice(&b.octets());

        assert_eq!(buf, expected);
        assert_eq!(buf.len(), 33);
        assert_eq!(fv.serialized_len(), 33);
        assert_eq!(fv.template_length(), 0xFFFF);
    }

    #[test]
    fn undefined_value_reports_its_own_length() {
        let fv = FieldValue::Undefined {
            element_id: 9999,
            enterprise_number: None,
            value: vec![1, 2, 3],
        };
        assert_eq!(fv.template_length(), 3);
        assert_eq!(fv.serialized_len(), 3);
    }

    #[test]
    fn field_specifier_sets_enterprise_bit() {
        let fv = FieldValue::SrhTagIpv6(7);
        let spec = fv.field_specifier();
        let mut buf = Vec::new();
        spec.serialize_into(&mut buf);
        assert_eq!(spec.len(), 8);
        assert_eq!(&buf[0..2], &(Ie::SRH_TAG_IPV6 | 0x8000).to_be_bytes());
        assert_eq!(&buf[4..8], &ENTERPRISE_NUMBER_NTTCOM.to_be_bytes());
    }
}
