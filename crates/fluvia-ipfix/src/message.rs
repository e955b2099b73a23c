//! RFC 7011 message framing: Sets, Template/Options-Template/Data Records,
//! and the Message header that wraps them.

use crate::field_value::{FieldSpecifier, FieldValue};

/// IPFIX protocol version carried in every Message header.
pub const VERSION: u16 = 10;
/// Set ID reserved for Template Records.
pub const TEMPLATE_SET_ID: u16 = 2;
/// Set ID reserved for Options Template Records.
pub const OPTIONS_TEMPLATE_SET_ID: u16 = 3;
/// Data Set IDs start at 256; everything below is reserved.
pub const MIN_DATA_SET_ID: u16 = 256;

fn pad_to_four(raw_len: u16) -> u16 {
    (raw_len + 3) & !3
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRecord {
    pub template_id: u16,
    pub field_specifiers: Vec<FieldSpecifier>,
}

impl TemplateRecord {
    pub fn len(&self) -> u16 {
        4 + self.field_specifiers.iter().map(FieldSpecifier::len).sum::<u16>()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.template_id.to_be_bytes());
        buf.extend_from_slice(&(self.field_specifiers.len() as u16).to_be_bytes());
        for spec in &self.field_specifiers {
            spec.serialize_into(buf);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionsTemplateRecord {
    pub template_id: u16,
    pub scope_field_count: u16,
    pub field_specifiers: Vec<FieldSpecifier>,
}

impl OptionsTemplateRecord {
    pub fn len(&self) -> u16 {
        6 + self.field_specifiers.iter().map(FieldSpecifier::len).sum::<u16>()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.template_id.to_be_bytes());
        buf.extend_from_slice(&(self.field_specifiers.len() as u16).to_be_bytes());
        buf.extend_from_slice(&self.scope_field_count.to_be_bytes());
        for spec in &self.field_specifiers {
            spec.serialize_into(buf);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataRecord {
    pub values: Vec<FieldValue>,
}

impl DataRecord {
    pub fn len(&self) -> u16 {
        self.values.iter().map(FieldValue::serialized_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        for value in &self.values {
            value.serialize_into(buf);
        }
    }

    /// The Template Record describing this data record's field order,
    /// lengths, and enterprise scoping — derived from the values
    /// themselves rather than tracked separately, matching §4.4's "one
    /// FieldSpecifier per element of fvs" rule.
    pub fn derive_template(&self, template_id: u16) -> TemplateRecord {
        TemplateRecord {
            template_id,
            field_specifiers: self.values.iter().map(FieldValue::field_specifier).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Template(TemplateRecord),
    OptionsTemplate(OptionsTemplateRecord),
    Data(DataRecord),
}

impl Record {
    pub fn len(&self) -> u16 {
        match self {
            Self::Template(r) => r.len(),
            Self::OptionsTemplate(r) => r.len(),
            Self::Data(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        match self {
            Self::Template(r) => r.serialize_into(buf),
            Self::OptionsTemplate(r) => r.serialize_into(buf),
            Self::Data(r) => r.serialize_into(buf),
        }
    }
}

/// One Set: a 4-byte header (`set id`, `length`) followed by one or more
/// records, zero-padded so the whole Set is a multiple of 4 bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub id: u16,
    pub records: Vec<Record>,
}

impl Set {
    pub fn template(template: TemplateRecord) -> Self {
        Self {
            id: TEMPLATE_SET_ID,
            records: vec![Record::Template(template)],
        }
    }

    pub fn options_template(template: OptionsTemplateRecord) -> Self {
        Self {
            id: OPTIONS_TEMPLATE_SET_ID,
            records: vec![Record::OptionsTemplate(template)],
        }
    }

    pub fn data(set_id: u16, record: DataRecord) -> Self {
        debug_assert!(set_id >= MIN_DATA_SET_ID, "data set id must be >= 256");
        Self {
            id: set_id,
            records: vec![Record::Data(record)],
        }
    }

    fn body_len(&self) -> u16 {
        self.records.iter().map(Record::len).sum()
    }

    /// Total Set length including the 4-byte header and trailing padding.
    pub fn len(&self) -> u16 {
        pad_to_four(4 + self.body_len())
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        let total = self.len();
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&total.to_be_bytes());
        let body_start = buf.len();
        for record in &self.records {
            record.serialize_into(buf);
        }
        let written = (buf.len() - body_start) as u16 + 4;
        for _ in 0..(total - written) {
            buf.push(0);
        }
    }
}

/// A complete IPFIX Message: a fixed 16-byte header plus an ordered list
/// of Sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub sequence: u32,
    pub observation_domain_id: u32,
    pub sets: Vec<Set>,
}

impl Message {
    /// Total length in bytes, header included. Callers must ensure this
    /// fits `u16::MAX`; Fluvia's per-flow field list never comes close.
    pub fn len(&self) -> u16 {
        16 + self.sets.iter().map(Set::len).sum::<u16>()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Serializes the message, stamping `export_time` (Unix seconds) into
    /// the header. Export time is a parameter rather than read from the
    /// system clock so the framing logic stays a pure function.
    pub fn serialize(&self, export_time: u32) -> Vec<u8> {
        let total_len = self.len();
        let mut buf = Vec::with_capacity(total_len as usize);
        buf.extend_from_slice(&VERSION.to_be_bytes());
        buf.extend_from_slice(&total_len.to_be_bytes());
        buf.extend_from_slice(&export_time.to_be_bytes());
        buf.extend_from_slice(&self.sequence.to_be_bytes());
        buf.extend_from_slice(&self.observation_domain_id.to_be_bytes());
        for set in &self.sets {
            set.serialize_into(&mut buf);
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_values() -> Vec<FieldValue> {
        vec![
            FieldValue::PacketDeltaCount(5),
            FieldValue::SrhSegmentsIpv6Left(2),
            FieldValue::SrhFlagsIpv6(0),
        ]
    }

    #[test]
    fn set_length_includes_header_and_padding() {
        let data = DataRecord { values: sample_values() };
        // body: 8 (u64) + 1 + 1 = 10; + 4-byte header = 14; padded to 16.
        let set = Set::data(256, data);
        assert_eq!(set.len(), 16);
        let mut buf = Vec::new();
        set.serialize_into(&mut buf);
        assert_eq!(buf.len(), 16);
        assert_eq!(&buf[0..2], &256u16.to_be_bytes());
        assert_eq!(&buf[2..4], &16u16.to_be_bytes());
        assert_eq!(&buf[14..16], &[0, 0]);
    }

    #[test]
    fn template_record_matches_field_specifier_count() {
        let data = DataRecord { values: sample_values() };
        let template = data.derive_template(256);
        assert_eq!(template.field_specifiers.len(), 3);
        // packetDeltaCount (4) + two enterprise-scoped 1-byte fields (8 each)
        assert_eq!(template.len(), 4 + 4 + 8 + 8);
    }

    #[test]
    fn message_length_equals_header_plus_sets() {
        let data = DataRecord { values: sample_values() };
        let template_set = Set::template(data.derive_template(256));
        let data_set = Set::data(256, data);
        let msg = Message {
            sequence: 1,
            observation_domain_id: 61166,
            sets: vec![template_set.clone(), data_set.clone()],
        };
        assert_eq!(msg.len(), 16 + template_set.len() + data_set.len());

        let bytes = msg.serialize(1_700_000_000);
        assert_eq!(bytes.len(), msg.len() as usize);
        assert_eq!(&bytes[0..2], &VERSION.to_be_bytes());
        assert_eq!(&bytes[2..4], &msg.len().to_be_bytes());
        assert_eq!(&bytes[8..12], &1u32.to_be_bytes());
        assert_eq!(&bytes[12..16], &61166u32.to_be_bytes());
    }

    #[test]
    fn sequence_and_template_ids_increase_across_three_drains() {
        let mut flow_seq: u32 = 1;
        let mut template_id: u16 = 256;
        let mut seqs = Vec::new();
        let mut ids = Vec::new();
        for _ in 0..3 {
            seqs.push(flow_seq);
            ids.push(template_id);
            flow_seq = flow_seq.wrapping_add(1);
            template_id = template_id.wrapping_add(1);
        }
        assert_eq!(seqs, vec![1, 2, 3]);
        assert_eq!(ids, vec![256, 257, 258]);
    }
}
