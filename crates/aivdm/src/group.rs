//! Post-decode rewriting of a record: collapsing runs of primitive fields into one
//! composite field, and merging repeated text fields.

use crate::{
    field::FieldKind,
    record::{DecodedField, DecodedRecord, Value},
};

/// A run of fields at a fixed record position that collapses into one text field.
#[derive(Debug, Clone, Copy)]
pub struct FieldGroup {
    /// Index of the first field of the run in the record.
    pub offset: usize,
    /// Names the run must have, in order.
    pub template: &'static [&'static str],
    pub name: &'static str,
    pub legend: &'static str,
    /// Builds the composite value. `None` leaves the run as it is.
    pub combine: fn(&[&Value]) -> Option<Value>,
}

impl FieldGroup {
    /// Replaces the matching run in `fields`. Returns whether it matched.
    pub fn apply(&self, fields: &mut Vec<DecodedField>) -> bool {
        let end = self.offset + self.template.len();
        let Some(run) = fields.get(self.offset..end) else {
            return false;
        };

        let names = run.iter().map(|f| f.name.as_str());
        if !names.eq(self.template.iter().copied()) {
            return false;
        }

        let values: Vec<&Value> = run.iter().map(|f| &f.value).collect();
        let Some(value) = (self.combine)(&values) else {
            return false;
        };

        let composite = DecodedField {
            name: self.name.to_string(),
            value,
            kind: FieldKind::Text,
            legend: self.legend.to_string(),
            out_of_band: None,
            presenter: None,
        };
        fields.splice(self.offset..end, [composite]);
        true
    }
}

/// Applies each group in table order. Groups whose template does not match are skipped.
pub fn apply_groups(record: &mut DecodedRecord, groups: &[FieldGroup]) {
    let fields = record.fields_mut();
    for group in groups {
        group.apply(fields);
    }
}

/// Concatenates every later text field onto the first text field of the same name
/// and removes the later ones.
///
/// One sweep reaches the fixed point: each surviving text name appears once.
pub fn merge_extensions(record: &mut DecodedRecord) {
    let fields = record.fields_mut();
    let mut i = 0;

    while i < fields.len() {
        if fields[i].kind == FieldKind::Text {
            let mut j = i + 1;
            while j < fields.len() {
                if fields[j].kind == FieldKind::Text && fields[j].name == fields[i].name {
                    let extension = fields.remove(j);
                    if let (Value::Text(head), Value::Text(tail)) =
                        (&mut fields[i].value, extension.value)
                    {
                        head.push_str(&tail);
                    }
                } else {
                    j += 1;
                }
            }
        }
        i += 1;
    }
}

/// Runs grouping, then extension merging.
pub fn post_process(record: &mut DecodedRecord, groups: &[FieldGroup]) {
    apply_groups(record, groups);
    merge_extensions(record);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, value: Value) -> DecodedField {
        let kind = match value {
            Value::Text(_) => FieldKind::Text,
            _ => FieldKind::Unsigned,
        };
        DecodedField {
            name: name.to_string(),
            value,
            kind,
            legend: String::new(),
            out_of_band: None,
            presenter: None,
        }
    }

    fn hour_minute(values: &[&Value]) -> Option<Value> {
        let h = values[0].as_u64()?;
        let m = values[1].as_u64()?;
        Some(Value::Text(format!("{h:02}:{m:02}")))
    }

    const CLOCK: FieldGroup = FieldGroup {
        offset: 1,
        template: &["hour", "minute"],
        name: "clock",
        legend: "Clock",
        combine: hour_minute,
    };

    #[test]
    fn test_group_collapses_run() {
        let mut record = DecodedRecord::new(vec![
            field("id", Value::Unsigned(1)),
            field("hour", Value::Unsigned(7)),
            field("minute", Value::Unsigned(5)),
            field("flag", Value::Unsigned(0)),
        ]);

        apply_groups(&mut record, &[CLOCK]);
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["id", "clock", "flag"]);
        let clock = record.field("clock").unwrap();
        assert_eq!(clock.value, Value::Text("07:05".to_string()));
        assert_eq!(clock.kind, FieldKind::Text);
        assert_eq!(clock.legend, "Clock");
    }

    #[test]
    fn test_group_skipped_on_name_mismatch() {
        let mut record = DecodedRecord::new(vec![
            field("id", Value::Unsigned(1)),
            field("minute", Value::Unsigned(5)),
            field("hour", Value::Unsigned(7)),
        ]);

        apply_groups(&mut record, &[CLOCK]);
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_group_skipped_when_record_too_short() {
        let mut record = DecodedRecord::new(vec![
            field("id", Value::Unsigned(1)),
            field("hour", Value::Unsigned(7)),
        ]);

        apply_groups(&mut record, &[CLOCK]);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_merge_extensions() {
        let mut record = DecodedRecord::new(vec![
            field("name", Value::from("ALFA")),
            field("type", Value::Unsigned(3)),
            field("name", Value::from("BRAVO")),
        ]);

        merge_extensions(&mut record);
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["name", "type"]);
        assert_eq!(record.get("name"), Some(&Value::from("ALFABRAVO")));
    }

    #[test]
    fn test_merge_many_extensions() {
        let mut record = DecodedRecord::new(vec![
            field("a", Value::from("1")),
            field("b", Value::from("x")),
            field("a", Value::from("2")),
            field("b", Value::from("y")),
            field("a", Value::from("3")),
        ]);

        merge_extensions(&mut record);
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&Value::from("123")));
        assert_eq!(record.get("b"), Some(&Value::from("xy")));
    }

    #[test]
    fn test_merge_ignores_numeric_duplicates() {
        let mut record = DecodedRecord::new(vec![
            field("mmsi", Value::Unsigned(1)),
            field("mmsi", Value::Unsigned(2)),
        ]);

        merge_extensions(&mut record);
        assert_eq!(record.len(), 2);
    }
}
