//! Serializable schema description and record output.
//!
//! [SchemaDef] describes a message layout in data form, for example a JSON file
//! shipped next to an application, and converts into a checked
//! [crate::schema::Schema] with `Schema::try_from`. Presenter and dispatch-compute
//! functions cannot be expressed in data; a loaded schema supports legend tables
//! and identity dispatch only.
//!
//! A [crate::record::DecodedRecord] serializes as a map from field name to value,
//! in decode order.

use serde::{Deserialize, Serialize, ser::SerializeMap};

use crate::record::DecodedRecord;

/// Top-level schema definition: an ordered list of instructions.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SchemaDef {
    pub instructions: Vec<InstructionDef>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InstructionDef {
    Field(FieldDef),
    Spare {
        width: usize,
    },
    /// `subtypes` is indexed by the selector's value; `null` entries have no layout.
    Dispatch {
        selector: String,
        subtypes: Vec<Option<SchemaDef>>,
    },
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    /// Width in bits.
    pub width: usize,
    pub kind: FieldKindDef,
    /// Raw value meaning "not available".
    #[serde(default)]
    pub out_of_band: Option<i64>,
    #[serde(default)]
    pub legend: String,
    /// Accepted inclusive range; other values abort the message.
    #[serde(default)]
    pub range: Option<RangeDef>,
    /// Label table for presentation, indexed by value.
    #[serde(default)]
    pub legends: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldKindDef {
    Unsigned,
    Signed,
    Text,
    Raw,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct RangeDef {
    pub min: i64,
    pub max: i64,
}

impl Serialize for DecodedRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for field in self {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bits::BitBuffer,
        errors::SchemaError,
        field::FieldKind,
        record::Value,
        schema::{Instruction, Schema},
        stream::{ErrorPolicy, StreamConfig},
        transform::present_record,
        unpack::decode,
    };

    const SCHEMA_JSON: &str = r#"{
        "instructions": [
            { "type": "field", "name": "msgtype", "width": 6, "kind": "unsigned",
              "range": { "min": 1, "max": 2 } },
            { "type": "spare", "width": 2 },
            { "type": "dispatch", "selector": "msgtype", "subtypes": [
                null,
                { "instructions": [
                    { "type": "field", "name": "epfd", "width": 4, "kind": "unsigned",
                      "legends": ["Undefined", "GPS"], "out_of_band": 0 }
                ] },
                { "instructions": [
                    { "type": "field", "name": "name", "width": 12, "kind": "text",
                      "legend": "Name" }
                ] }
            ] }
        ]
    }"#;

    #[test]
    fn test_schema_from_json() {
        let def: SchemaDef = serde_json::from_str(SCHEMA_JSON).unwrap();
        let schema = Schema::try_from(def).unwrap();
        assert_eq!(schema.len(), 3);

        let Instruction::Field(field) = &schema.instructions()[0] else {
            panic!("expected a field");
        };
        assert_eq!(field.kind, FieldKind::Unsigned);
        assert!(field.accepts(&Value::Unsigned(2)));
        assert!(!field.accepts(&Value::Unsigned(3)));
    }

    #[test]
    fn test_loaded_schema_decodes() {
        let def: SchemaDef = serde_json::from_str(SCHEMA_JSON).unwrap();
        let schema = Schema::try_from(def).unwrap();

        let mut buffer = BitBuffer::new();
        buffer.push_bits(1, 6);
        buffer.push_bits(0, 2);
        buffer.push_bits(1, 4);

        let mut record = decode(&buffer, &schema).unwrap();
        assert_eq!(record.get("epfd"), Some(&Value::Unsigned(1)));
        present_record(&mut record);
        assert_eq!(record.get("epfd"), Some(&Value::from("GPS")));
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let json = r#"{ "instructions": [
            { "type": "field", "name": "name", "width": 10, "kind": "text" }
        ] }"#;
        let def: SchemaDef = serde_json::from_str(json).unwrap();
        assert_eq!(
            Schema::try_from(def).unwrap_err(),
            SchemaError::InvalidTextWidth("name".to_string())
        );
    }

    #[test]
    fn test_record_serializes_as_map() {
        let mut buffer = BitBuffer::new();
        buffer.push_bits(2, 6);
        buffer.push_bits(0, 2);
        buffer.push_bits(1, 6);
        buffer.push_bits(2, 6);

        let def: SchemaDef = serde_json::from_str(SCHEMA_JSON).unwrap();
        let schema = Schema::try_from(def).unwrap();
        let record = decode(&buffer, &schema).unwrap();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({ "msgtype": 2, "name": "AB" }));
    }

    #[test]
    fn test_stream_config_from_json() {
        let config: StreamConfig =
            serde_json::from_str(r#"{ "error_policy": "skip", "scaled": true }"#).unwrap();
        assert_eq!(config.error_policy, ErrorPolicy::Skip);
        assert!(config.scaled);
        assert!(config.groups);
    }
}
