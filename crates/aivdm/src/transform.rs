//! Presentation of decoded values ("scaled" output).
//!
//! For each field, in order:
//! 1. A raw value equal to the field's out-of-band sentinel becomes the text `"n/a"`.
//! 2. Otherwise the field's [Presenter] maps the value (legend lookup or function).
//! 3. Fields without either keep their decoded value.
//!
//! Text and raw values are never rewritten.

use crate::{
    field::FieldKind,
    record::{DecodedField, DecodedRecord, Value},
};

/// Presentation text for out-of-band values.
pub const NOT_AVAILABLE: &str = "n/a";

/// Computes the presentation value of one field.
pub fn present(field: &DecodedField) -> Value {
    if matches!(field.kind, FieldKind::Text | FieldKind::Raw) {
        return field.value.clone();
    }

    if field.out_of_band.is_some() && field.value.as_i64() == field.out_of_band {
        return Value::Text(NOT_AVAILABLE.to_string());
    }

    match &field.presenter {
        Some(presenter) => presenter.present(&field.value),
        None => field.value.clone(),
    }
}

/// Replaces every value in `record` with its presentation value.
pub fn present_record(record: &mut DecodedRecord) {
    for field in record.fields_mut() {
        field.value = present(field);
    }
}
