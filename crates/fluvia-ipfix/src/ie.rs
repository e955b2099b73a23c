//! Information Element identifiers used by Fluvia's exported records.
//!
//! IDs below 256 are IANA-assigned (RFC 5102/7270); IDs in the 490-528
//! range are enterprise-scoped under [`ENTERPRISE_NUMBER_NTTCOM`] per
//! draft-ietf-opsawg-ipfix-srv6-srh and draft-ietf-opsawg-ipfix-on-path-telemetry.

/// NTT Communications' IANA Private Enterprise Number.
pub const ENTERPRISE_NUMBER_NTTCOM: u32 = 29319;

/// Information Element identifiers.
pub struct Ie;

impl Ie {
    /// octetDeltaCount, RFC5102.
    pub const OCTET_DELTA_COUNT: u16 = 1;
    /// packetDeltaCount, RFC5102.
    pub const PACKET_DELTA_COUNT: u16 = 2;
    /// sourceIPv6Address, RFC5102.
    pub const SOURCE_IPV6_ADDRESS: u16 = 27;
    /// destinationIPv6Address, RFC5102.
    pub const DESTINATION_IPV6_ADDRESS: u16 = 28;

    /// srhFlagsIPv6, draft-ietf-opsawg-ipfix-srv6-srh.
    pub const SRH_FLAGS_IPV6: u16 = 492;
    /// srhTagIPv6, draft-ietf-opsawg-ipfix-srv6-srh.
    pub const SRH_TAG_IPV6: u16 = 493;
    /// srhSegmentIPv6, draft-ietf-opsawg-ipfix-srv6-srh.
    pub const SRH_SEGMENT_IPV6: u16 = 494;
    /// srhActiveSegmentIPv6, draft-ietf-opsawg-ipfix-srv6-srh.
    pub const SRH_ACTIVE_SEGMENT_IPV6: u16 = 495;
    /// srhSegmentIPv6BasicList, draft-ietf-opsawg-ipfix-srv6-srh.
    pub const SRH_SEGMENT_IPV6_BASIC_LIST: u16 = 496;
    /// srhSegmentIPv6ListSection, draft-ietf-opsawg-ipfix-srv6-srh.
    pub const SRH_SEGMENT_IPV6_LIST_SECTION: u16 = 497;
    /// srhSegmentsIPv6Left, draft-ietf-opsawg-ipfix-srv6-srh.
    pub const SRH_SEGMENTS_IPV6_LEFT: u16 = 498;
    /// srhIPv6ActiveSegmentType, draft-ietf-opsawg-ipfix-srv6-srh.
    pub const SRH_IPV6_ACTIVE_SEGMENT_TYPE: u16 = 500;
    /// srhSegmentIPv6LocatorLength, draft-ietf-opsawg-ipfix-srv6-srh.
    pub const SRH_SEGMENT_IPV6_LOCATOR_LENGTH: u16 = 501;
    /// srhSegmentIPv6EndpointBehavior, draft-ietf-opsawg-ipfix-srv6-srh.
    pub const SRH_SEGMENT_IPV6_ENDPOINT_BEHAVIOR: u16 = 502;

    /// pathDelayMeanDeltaMicroseconds, draft-ietf-opsawg-ipfix-on-path-telemetry.
    pub const PATH_DELAY_MEAN_DELTA_MICROSECONDS: u16 = 521;
    /// pathDelayMinDeltaMicroseconds, draft-ietf-opsawg-ipfix-on-path-telemetry.
    pub const PATH_DELAY_MIN_DELTA_MICROSECONDS: u16 = 523;
    /// pathDelayMaxDeltaMicroseconds, draft-ietf-opsawg-ipfix-on-path-telemetry.
    pub const PATH_DELAY_MAX_DELTA_MICROSECONDS: u16 = 525;
    /// pathDelaySumDeltaMicroseconds, draft-ietf-opsawg-ipfix-on-path-telemetry.
    pub const PATH_DELAY_SUM_DELTA_MICROSECONDS: u16 = 527;
}
