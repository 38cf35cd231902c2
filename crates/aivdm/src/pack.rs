//! The packing interpreter: the inverse of [crate::unpack], writing named values
//! into a [BitBuffer] in schema order.
//!
//! Text values longer than their field continue into the next text field of the
//! same name, so a name split over a field and its extension packs from one value.

use std::collections::{BTreeMap, HashMap};

use crate::{
    bits::{BitBuffer, text_value},
    errors::EncodeError,
    field::{Field, FieldKind},
    record::Value,
    schema::{Instruction, Schema},
};

/// Packs `values` (keyed by field name) with `schema`.
///
/// Spares are written as zeros. Dispatch nodes pick their branch from the value
/// supplied for the selector.
pub fn pack(schema: &Schema, values: &BTreeMap<String, Value>) -> Result<BitBuffer, EncodeError> {
    let mut packer = Packer {
        values,
        buffer: BitBuffer::new(),
        text_used: HashMap::new(),
    };
    packer.pack(schema)?;
    packer.finish()
}

struct Packer<'v> {
    values: &'v BTreeMap<String, Value>,
    buffer: BitBuffer,
    /// Characters of each text value written so far.
    text_used: HashMap<&'v str, usize>,
}

impl<'v> Packer<'v> {
    fn pack(&mut self, schema: &Schema) -> Result<(), EncodeError> {
        for instruction in schema.instructions() {
            match instruction {
                Instruction::Spare(width) => self.zeros(*width),
                Instruction::Field(field) => self.field(field)?,
                Instruction::Dispatch(dispatch) => {
                    let value = self.value(&dispatch.selector)?;
                    let subtype =
                        dispatch
                            .select(value)
                            .ok_or_else(|| EncodeError::NoVariant {
                                selector: dispatch.selector.clone(),
                                value: value.clone(),
                            })?;
                    self.pack(subtype)?;
                }
            }
        }
        Ok(())
    }

    fn value(&self, name: &str) -> Result<&'v Value, EncodeError> {
        self.values
            .get(name)
            .ok_or_else(|| EncodeError::MissingField(name.to_string()))
    }

    fn zeros(&mut self, mut width: usize) {
        while width > 0 {
            let chunk = width.min(64);
            self.buffer.push_bits(0, chunk);
            width -= chunk;
        }
    }

    fn field(&mut self, field: &Field) -> Result<(), EncodeError> {
        let (name, value) = self
            .values
            .get_key_value(field.name.as_str())
            .ok_or_else(|| EncodeError::MissingField(field.name.clone()))?;

        let invalid = || EncodeError::InvalidValue {
            field: field.name.clone(),
            value: value.clone(),
        };

        match field.kind {
            FieldKind::Unsigned => {
                let v = value.as_u64().ok_or_else(invalid)?;
                if field.width < 64 && v >> field.width != 0 {
                    return Err(invalid());
                }
                if !field.accepts(value) {
                    return Err(invalid());
                }
                self.buffer.push_bits(v, field.width);
            }
            FieldKind::Signed => {
                let v = value.as_i64().ok_or_else(invalid)?;
                if !fits_signed(v, field.width) || !field.accepts(value) {
                    return Err(invalid());
                }
                self.buffer.push_bits(v as u64, field.width);
            }
            FieldKind::Text => {
                let text = value.as_str().ok_or_else(invalid)?;
                let used = self.text_used.entry(name.as_str()).or_insert(0);
                let count = field.width / 6;

                let mut chars = text.chars().skip(*used);
                for _ in 0..count {
                    let code = match chars.next() {
                        Some(ch) => text_value(ch).ok_or_else(invalid)?,
                        None => 0,
                    };
                    self.buffer.push_bits(code as u64, 6);
                }
                *used += count;
            }
            FieldKind::Raw => {
                let raw = value.as_raw().ok_or_else(invalid)?;
                if raw.bit_len() > field.width {
                    return Err(invalid());
                }
                self.buffer.extend_from(raw);
            }
        }

        Ok(())
    }

    /// Rejects text that did not fit in the fields of its name.
    fn finish(self) -> Result<BitBuffer, EncodeError> {
        for (name, used) in self.text_used {
            let value = &self.values[name];
            let length = value.as_str().map_or(0, |s| s.chars().count());
            if length > used {
                return Err(EncodeError::InvalidValue {
                    field: name.to_string(),
                    value: value.clone(),
                });
            }
        }
        Ok(self.buffer)
    }
}

fn fits_signed(value: i64, width: usize) -> bool {
    if width >= 64 {
        return true;
    }
    let half = 1i64 << (width - 1);
    (-half..half).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        field::Validator,
        schema::Dispatch,
        unpack::{decode, unpack},
    };

    fn values(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_pack_fields_and_spare() {
        let schema = Schema::new(vec![
            Field::unsigned("a", 4).into(),
            Instruction::Spare(3),
            Field::signed("b", 8).into(),
        ]);
        let buffer = pack(
            &schema,
            &values(&[("a", Value::Unsigned(9)), ("b", Value::Signed(-2))]),
        )
        .unwrap();

        assert_eq!(buffer.bit_len(), 15);
        assert_eq!(buffer.unsigned(0, 4), 9);
        assert_eq!(buffer.unsigned(4, 3), 0);
        assert_eq!(buffer.signed(7, 8), -2);
    }

    #[test]
    fn test_pack_text_padding() {
        let schema = Schema::new(vec![Field::text("name", 42).into()]);
        let buffer = pack(&schema, &values(&[("name", Value::from("tc6163"))])).unwrap();

        assert_eq!(buffer.bit_len(), 42);
        assert_eq!(buffer.text(0, 42), "TC6163");
        assert_eq!(buffer.unsigned(36, 6), 0);
    }

    #[test]
    fn test_pack_text_spills_into_extension() {
        let schema = Schema::new(vec![
            Field::text("name", 12).into(),
            Field::unsigned("kind", 2).into(),
            Field::text("name", 18).into(),
        ]);
        let input = values(&[("name", Value::from("ALFAB")), ("kind", Value::Unsigned(1))]);
        let buffer = pack(&schema, &input).unwrap();

        let record = decode(&buffer, &schema).unwrap();
        let texts: Vec<_> = record
            .iter()
            .filter(|f| f.name == "name")
            .map(|f| f.value.clone())
            .collect();
        assert_eq!(texts, vec![Value::from("AL"), Value::from("FAB")]);
    }

    #[test]
    fn test_pack_text_too_long() {
        let schema = Schema::new(vec![Field::text("name", 12).into()]);
        let err = pack(&schema, &values(&[("name", Value::from("ABC"))])).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidValue { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_pack_text_unknown_character() {
        let schema = Schema::new(vec![Field::text("name", 12).into()]);
        assert!(pack(&schema, &values(&[("name", Value::from("é"))])).is_err());
    }

    #[test]
    fn test_pack_out_of_range() {
        let schema = Schema::new(vec![
            Field::unsigned("a", 4).into(),
            Field::signed("b", 4).into(),
        ]);

        let err = pack(
            &schema,
            &values(&[("a", Value::Unsigned(16)), ("b", Value::Signed(0))]),
        )
        .unwrap_err();
        assert!(matches!(err, EncodeError::InvalidValue { ref field, .. } if field == "a"));

        let err = pack(
            &schema,
            &values(&[("a", Value::Unsigned(1)), ("b", Value::Signed(8))]),
        )
        .unwrap_err();
        assert!(matches!(err, EncodeError::InvalidValue { ref field, .. } if field == "b"));

        assert!(
            pack(
                &schema,
                &values(&[("a", Value::Unsigned(15)), ("b", Value::Signed(-8))]),
            )
            .is_ok()
        );
    }

    #[test]
    fn test_pack_validator() {
        let schema = Schema::new(vec![
            Field::unsigned("epfd", 4)
                .with_validator(Validator::Range { min: 0, max: 8 })
                .into(),
        ]);
        assert!(pack(&schema, &values(&[("epfd", Value::Unsigned(9))])).is_err());
    }

    #[test]
    fn test_pack_missing_field() {
        let schema = Schema::new(vec![Field::unsigned("a", 4).into()]);
        assert_eq!(
            pack(&schema, &BTreeMap::new()).unwrap_err(),
            EncodeError::MissingField("a".to_string())
        );
    }

    #[test]
    fn test_pack_dispatch() {
        let schema = Schema::new(vec![
            Field::unsigned("part", 1).into(),
            Dispatch::new(
                "part",
                vec![
                    Some(Schema::new(vec![Field::unsigned("x", 3).into()])),
                    Some(Schema::new(vec![Field::text("y", 6).into()])),
                ],
            )
            .into(),
        ]);

        let input = values(&[("part", Value::Unsigned(1)), ("y", Value::from("Z"))]);
        let buffer = pack(&schema, &input).unwrap();
        let (fields, next) = unpack(&buffer, 0, &schema).unwrap();
        assert_eq!(next, 7);
        assert_eq!(fields[1].value, Value::from("Z"));

        let input = values(&[("part", Value::Unsigned(0)), ("y", Value::from("Z"))]);
        assert_eq!(
            pack(&schema, &input).unwrap_err(),
            EncodeError::MissingField("x".to_string())
        );
    }

    #[test]
    fn test_pack_no_variant() {
        let schema = Schema::new(vec![
            Field::unsigned("part", 2).into(),
            Dispatch::new("part", vec![None, Some(Schema::default())]).into(),
        ]);
        let err = pack(&schema, &values(&[("part", Value::Unsigned(0))])).unwrap_err();
        assert!(matches!(err, EncodeError::NoVariant { .. }));
    }

    #[test]
    fn test_pack_raw_tail() {
        let schema = Schema::new(vec![
            Field::unsigned("app", 4).into(),
            Field::raw("data", 16).into(),
        ]);
        let mut raw = BitBuffer::new();
        raw.push_bits(0b101, 3);

        let input = values(&[("app", Value::Unsigned(2)), ("data", Value::Raw(raw.clone()))]);
        let buffer = pack(&schema, &input).unwrap();
        assert_eq!(buffer.bit_len(), 7);
        assert_eq!(buffer.raw_tail(4), raw);
    }
}
