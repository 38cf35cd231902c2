//! Decoded output: values, fields and per-message records.

use std::fmt;

use crate::{
    bits::BitBuffer,
    field::{FieldKind, Presenter},
};

/// A value produced by decoding a field, grouping fields, or presenting them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Value {
    Unsigned(u64),
    Signed(i64),
    /// Six-bit text with `@` mapped to space and trailing spaces trimmed.
    Text(String),
    /// Uninterpreted trailing bits.
    Raw(BitBuffer),
    /// Scaled value produced by a presenter.
    Float(f64),
}

impl Value {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Unsigned(v) => Some(*v),
            Value::Signed(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Unsigned(v) => i64::try_from(*v).ok(),
            Value::Signed(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Unsigned(v) => Some(*v as f64),
            Value::Signed(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&BitBuffer> {
        match self {
            Value::Raw(bits) => Some(bits),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unsigned(v) => write!(f, "{v}"),
            Value::Signed(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
            Value::Float(v) => write!(f, "{v}"),
            Value::Raw(bits) => {
                write!(f, "{}:", bits.bit_len())?;
                for byte in bits.as_bytes() {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Unsigned(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Signed(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<BitBuffer> for Value {
    fn from(value: BitBuffer) -> Self {
        Value::Raw(value)
    }
}

/// One decoded field, carrying the metadata of the descriptor that produced it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodedField {
    pub name: String,
    pub value: Value,
    pub kind: FieldKind,
    pub legend: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub out_of_band: Option<i64>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub presenter: Option<Presenter>,
}

/// The ordered fields decoded from one message.
///
/// Order follows schema declaration order. A truncated message yields fewer
/// fields than its schema declares.
#[derive(Debug, Clone, Default)]
pub struct DecodedRecord {
    fields: Vec<DecodedField>,
}

impl DecodedRecord {
    pub fn new(fields: Vec<DecodedField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[DecodedField] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut Vec<DecodedField> {
        &mut self.fields
    }

    pub fn into_fields(self) -> Vec<DecodedField> {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First field named `name`.
    pub fn field(&self, name: &str) -> Option<&DecodedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Value of the first field named `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.field(name).map(|f| &f.value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecodedField> {
        self.fields.iter()
    }
}

impl IntoIterator for DecodedRecord {
    type Item = DecodedField;
    type IntoIter = std::vec::IntoIter<DecodedField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a DecodedRecord {
    type Item = &'a DecodedField;
    type IntoIter = std::slice::Iter<'a, DecodedField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, value: Value) -> DecodedField {
        DecodedField {
            name: name.to_string(),
            value,
            kind: FieldKind::Unsigned,
            legend: String::new(),
            out_of_band: None,
            presenter: None,
        }
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::Unsigned(5).as_i64(), Some(5));
        assert_eq!(Value::Signed(-5).as_u64(), None);
        assert_eq!(Value::Signed(5).as_u64(), Some(5));
        assert_eq!(Value::Unsigned(u64::MAX).as_i64(), None);
        assert_eq!(Value::Text("A".into()).as_u64(), None);
        assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Signed(-2).to_string(), "-2");
        assert_eq!(Value::from("ALFA").to_string(), "ALFA");
        let raw = BitBuffer::from_bytes(vec![0xAB, 0xC0], 12);
        assert_eq!(Value::Raw(raw).to_string(), "12:abc0");
    }

    #[test]
    fn test_record_lookup() {
        let record = DecodedRecord::new(vec![
            field("msgtype", Value::Unsigned(1)),
            field("mmsi", Value::Unsigned(477553000)),
            field("mmsi", Value::Unsigned(1)),
        ]);

        assert_eq!(record.len(), 3);
        assert_eq!(record.get("mmsi"), Some(&Value::Unsigned(477553000)));
        assert_eq!(record.get("speed"), None);
        assert_eq!(
            record.names().collect::<Vec<_>>(),
            vec!["msgtype", "mmsi", "mmsi"]
        );
    }
}
