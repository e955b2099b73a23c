//! Information Element registry and RFC 7011 wire framing for Fluvia.
//!
//! This crate has no runtime dependencies on sockets, the clock, or the
//! packet parser: it only knows how to name and encode values.

pub mod field_value;
pub mod ie;
pub mod message;

pub use field_value::{FieldSpecifier, FieldValue};
pub use ie::{Ie, ENTERPRISE_NUMBER_NTTCOM};
pub use message::{DataRecord, Message, OptionsTemplateRecord, Record, Set, TemplateRecord};

/// Fluvia's fixed Observation Domain ID, assigned at the collector.
pub const OBSERVATION_DOMAIN_ID: u32 = 61166;
