//! Versioned message schemas as data.
//!
//! Most inbound messages are a flat run of fields, some of which only
//! exist from a given message version on. Those messages are described
//! here as ordered tables:
//!
//! ```text
//! (gate, name, kind)
//!   gate : Always | Since(v) | Exactly { version, server_version }
//!   kind : Int | IntMax | Long | Double | DoubleMax | Bool | Str | TagValues
//! ```
//!
//! [`Record::read`] walks a table for one concrete message version,
//! scanning only the admitted fields, and the decoder builds its event
//! from the record by field name. A field a version does not carry reads
//! back as its kind's default, which for the `*Max` kinds is the unset
//! sentinel, so "never sent" and "sent empty" look the same.
//!
//! The tables double as the audit trail of each message's revision
//! history: [`field_count`] tells how many fields a given version spans.

use bytes::Bytes;
use tws_core::{TagValue, UNSET_DOUBLE, UNSET_INTEGER};

use crate::decoder::FieldReader;
use crate::error::ProtocolError;

/// How a field is typed on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    IntMax,
    Long,
    Double,
    DoubleMax,
    Bool,
    Str,
    /// A count field followed by that many `(tag, value)` string pairs.
    TagValues,
}

/// When a field is present.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Gate {
    Always,
    /// From this message version on.
    Since(i32),
    /// Only for this exact message / server version pair.
    Exactly { version: i32, server_version: i32 },
}

impl Gate {
    pub fn admits(self, version: i32, server_version: i32) -> bool {
        match self {
            Gate::Always => true,
            Gate::Since(min) => version >= min,
            Gate::Exactly {
                version: v,
                server_version: sv,
            } => version == v && server_version == sv,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub gate: Gate,
    pub name: &'static str,
    pub kind: FieldKind,
}

pub const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        gate: Gate::Always,
        name,
        kind,
    }
}

pub const fn since(version: i32, name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        gate: Gate::Since(version),
        name,
        kind,
    }
}

pub const fn exactly(
    version: i32,
    server_version: i32,
    name: &'static str,
    kind: FieldKind,
) -> FieldSpec {
    FieldSpec {
        gate: Gate::Exactly {
            version,
            server_version,
        },
        name,
        kind,
    }
}

/// An ordered field table.
pub type Schema = &'static [FieldSpec];

/// Number of wire fields a message body spans for `version`, counting
/// each tag/value list as its count field only (i.e. an empty list).
pub fn field_count(schema: Schema, version: i32, server_version: i32) -> usize {
    schema
        .iter()
        .filter(|entry| entry.gate.admits(version, server_version))
        .count()
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Long(i64),
    Double(f64),
    Bool(bool),
    Str(Bytes),
    TagValues(Vec<TagValue>),
}

/// The fields of one message, decoded against a schema.
#[derive(Debug)]
pub struct Record {
    schema: Schema,
    values: Vec<Option<Value>>,
}

impl Record {
    /// Scan the fields `schema` admits for this message version.
    pub fn read(
        r: &mut FieldReader<'_>,
        schema: Schema,
        version: i32,
    ) -> Result<Record, ProtocolError> {
        let server_version = r.server_version();
        let mut values = Vec::with_capacity(schema.len());

        for entry in schema {
            if !entry.gate.admits(version, server_version) {
                values.push(None);
                continue;
            }
            let value = match entry.kind {
                FieldKind::Int => Value::Int(r.read_int()?),
                FieldKind::IntMax => Value::Int(r.read_int_max()?),
                FieldKind::Long => Value::Long(r.read_long()?),
                FieldKind::Double => Value::Double(r.read_double()?),
                FieldKind::DoubleMax => Value::Double(r.read_double_max()?),
                FieldKind::Bool => Value::Bool(r.read_bool()?),
                FieldKind::Str => Value::Str(r.read_string()?),
                FieldKind::TagValues => Value::TagValues(r.read_tag_values()?),
            };
            values.push(Some(value));
        }

        Ok(Record { schema, values })
    }

    fn slot(&self, name: &str) -> Option<usize> {
        let idx = self.schema.iter().position(|entry| entry.name == name);
        debug_assert!(idx.is_some(), "field `{name}` is not in this schema");
        idx
    }

    /// Returns `true` if the field was present on the wire.
    pub fn has(&self, name: &str) -> bool {
        self.slot(name)
            .map(|idx| self.values[idx].is_some())
            .unwrap_or(false)
    }

    pub fn int(&self, name: &str) -> i32 {
        self.opt_int(name).unwrap_or_else(|| self.int_default(name))
    }

    /// The field's value, or `None` if this version did not carry it.
    pub fn opt_int(&self, name: &str) -> Option<i32> {
        match self.slot(name).and_then(|idx| self.values[idx].as_ref()) {
            Some(Value::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn long(&self, name: &str) -> i64 {
        match self.slot(name).and_then(|idx| self.values[idx].as_ref()) {
            Some(Value::Long(v)) => *v,
            _ => 0,
        }
    }

    pub fn double(&self, name: &str) -> f64 {
        match self.slot(name).and_then(|idx| self.values[idx].as_ref()) {
            Some(Value::Double(v)) => *v,
            _ => self.double_default(name),
        }
    }

    pub fn bool(&self, name: &str) -> bool {
        matches!(
            self.slot(name).and_then(|idx| self.values[idx].as_ref()),
            Some(Value::Bool(true))
        )
    }

    pub fn string(&self, name: &str) -> Bytes {
        match self.slot(name).and_then(|idx| self.values[idx].as_ref()) {
            Some(Value::Str(v)) => v.clone(),
            _ => Bytes::new(),
        }
    }

    /// Move a tag/value list out of the record.
    pub fn take_tag_values(&mut self, name: &str) -> Vec<TagValue> {
        match self.slot(name).and_then(|idx| self.values[idx].as_mut()) {
            Some(Value::TagValues(v)) => std::mem::take(v),
            _ => Vec::new(),
        }
    }

    fn int_default(&self, name: &str) -> i32 {
        match self.kind_of(name) {
            Some(FieldKind::IntMax) => UNSET_INTEGER,
            _ => 0,
        }
    }

    fn double_default(&self, name: &str) -> f64 {
        match self.kind_of(name) {
            Some(FieldKind::DoubleMax) => UNSET_DOUBLE,
            _ => 0.0,
        }
    }

    fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.slot(name).map(|idx| self.schema[idx].kind)
    }
}
