//! The unpacking interpreter: walks a [Schema] over a [BitBuffer].
//!
//! A walk stops without error when the cursor reaches the end of the buffer or when
//! a numeric field no longer fits, so a decoded record may be shorter than its
//! schema. Text fields keep the whole characters that fit; raw fields take the rest.

use crate::{
    bits::BitBuffer,
    errors::DecodeError,
    field::{Field, FieldKind},
    record::{DecodedField, DecodedRecord, Value},
    schema::{Dispatch, Instruction, Schema},
};

/// Decodes `schema` from `buffer` starting at bit `offset`.
///
/// Returns the decoded fields and the offset just past the last bit consumed.
pub fn unpack(
    buffer: &BitBuffer,
    offset: usize,
    schema: &Schema,
) -> Result<(Vec<DecodedField>, usize), DecodeError> {
    let mut fields = Vec::with_capacity(schema.len());
    let next = unpack_into(buffer, offset, schema, &mut fields)?;
    Ok((fields, next))
}

/// Decodes a whole message from bit 0.
pub fn decode(buffer: &BitBuffer, schema: &Schema) -> Result<DecodedRecord, DecodeError> {
    let (fields, _) = unpack(buffer, 0, schema)?;
    Ok(DecodedRecord::new(fields))
}

/// Walks `schema`, appending to `fields`. `fields` holds everything decoded so far
/// for this message and is where dispatch selectors are looked up.
fn unpack_into(
    buffer: &BitBuffer,
    mut cursor: usize,
    schema: &Schema,
    fields: &mut Vec<DecodedField>,
) -> Result<usize, DecodeError> {
    let end = buffer.bit_len();

    for instruction in schema.instructions() {
        if cursor >= end {
            break;
        }

        match instruction {
            Instruction::Spare(width) => cursor += width,
            Instruction::Dispatch(dispatch) => {
                let subtype = select(dispatch, fields)?;
                cursor = unpack_into(buffer, cursor, subtype, fields)?;
            }
            Instruction::Field(field) => {
                let Some((value, next)) = extract(buffer, cursor, field) else {
                    return Ok(end);
                };

                if !field.accepts(&value) {
                    return Err(DecodeError::Validation {
                        field: field.name.clone(),
                        value,
                    });
                }

                fields.push(DecodedField {
                    name: field.name.clone(),
                    value,
                    kind: field.kind,
                    legend: field.legend.clone(),
                    out_of_band: field.out_of_band,
                    presenter: field.presenter.clone(),
                });
                cursor = next;
            }
        }
    }

    Ok(cursor)
}

/// Picks the sub-schema for `dispatch` from the latest value of its selector.
fn select<'s>(
    dispatch: &'s Dispatch,
    fields: &[DecodedField],
) -> Result<&'s Schema, DecodeError> {
    let value = fields
        .iter()
        .rev()
        .find(|f| f.name == dispatch.selector)
        .map(|f| &f.value)
        .ok_or_else(|| DecodeError::MissingSelector(dispatch.selector.clone()))?;

    dispatch.select(value).ok_or_else(|| DecodeError::NoVariant {
        selector: dispatch.selector.clone(),
        value: value.clone(),
    })
}

/// Reads one field at `cursor`. Returns `None` when nothing of it fits.
fn extract(buffer: &BitBuffer, cursor: usize, field: &Field) -> Option<(Value, usize)> {
    let remaining = buffer.bit_len() - cursor;

    match field.kind {
        FieldKind::Unsigned if field.width <= remaining => Some((
            Value::Unsigned(buffer.unsigned(cursor, field.width)),
            cursor + field.width,
        )),
        FieldKind::Signed if field.width <= remaining => Some((
            Value::Signed(buffer.signed(cursor, field.width)),
            cursor + field.width,
        )),
        FieldKind::Text => {
            let width = field.width.min(remaining - remaining % 6);
            if width == 0 {
                return None;
            }

            let next = if width == field.width {
                cursor + width
            } else {
                buffer.bit_len()
            };
            Some((Value::Text(buffer.text(cursor, width)), next))
        }
        FieldKind::Raw => Some((Value::Raw(buffer.raw_tail(cursor)), buffer.bit_len())),
        _ => None,
    }
}
