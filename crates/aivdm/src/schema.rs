//! Schema: an ordered list of field, spare and dispatch instructions describing one
//! message shape. Use [Schema::compile] to check a hand-built or loaded schema, then
//! [crate::unpack::unpack] to decode with it.

use crate::{
    errors::SchemaError,
    field::{Field, FieldKind},
    record::Value,
};

/// Maps a selector value to an index into [Dispatch::subtypes].
#[derive(Debug, Clone, Copy)]
pub enum Compute {
    /// The selector's unsigned value is the index.
    Identity,
    Function(fn(&Value) -> Option<usize>),
}

impl Compute {
    pub fn index(&self, value: &Value) -> Option<usize> {
        match self {
            Compute::Identity => value.as_u64().and_then(|v| usize::try_from(v).ok()),
            Compute::Function(f) => f(value),
        }
    }
}

/// Selects a sub-schema from the value of a field decoded earlier in the same message.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub selector: String,
    /// `None` marks a selector value with no defined layout.
    pub subtypes: Vec<Option<Schema>>,
    pub compute: Compute,
}

impl Dispatch {
    pub fn new(selector: &str, subtypes: Vec<Option<Schema>>) -> Self {
        Self {
            selector: selector.to_string(),
            subtypes,
            compute: Compute::Identity,
        }
    }

    pub fn with_compute(mut self, compute: fn(&Value) -> Option<usize>) -> Self {
        self.compute = Compute::Function(compute);
        self
    }

    /// The sub-schema chosen by `value`, if there is one.
    pub fn select(&self, value: &Value) -> Option<&Schema> {
        self.compute
            .index(value)
            .and_then(|i| self.subtypes.get(i))
            .and_then(Option::as_ref)
    }
}

#[derive(Debug, Clone)]
pub enum Instruction {
    Field(Field),
    /// Bits to skip.
    Spare(usize),
    Dispatch(Dispatch),
}

impl From<Field> for Instruction {
    fn from(value: Field) -> Self {
        Instruction::Field(value)
    }
}

impl From<Dispatch> for Instruction {
    fn from(value: Dispatch) -> Self {
        Instruction::Dispatch(value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Schema {
    instructions: Vec<Instruction>,
}

impl Schema {
    /// Wraps instructions without checking them. Used for static catalogs, which are
    /// checked by their own tests.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Wraps instructions, rejecting widths that cannot be decoded, raw fields that
    /// are not last, and dispatches on fields not declared before them.
    pub fn compile(instructions: Vec<Instruction>) -> Result<Self, SchemaError> {
        let schema = Self::new(instructions);
        schema.validate()?;
        Ok(schema)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut declared = Vec::new();
        self.validate_with(&mut declared)
    }

    /// Every branch of a dispatch is checked against the names declared before it.
    fn validate_with<'a>(&'a self, declared: &mut Vec<&'a str>) -> Result<(), SchemaError> {
        let count = self.instructions.len();

        for (i, instruction) in self.instructions.iter().enumerate() {
            match instruction {
                Instruction::Field(field) => {
                    validate_field(field)?;
                    if field.kind == FieldKind::Raw && i + 1 != count {
                        return Err(SchemaError::RawNotTerminal(field.name.clone()));
                    }
                    declared.push(&field.name);
                }
                Instruction::Spare(width) => {
                    if *width == 0 {
                        return Err(SchemaError::EmptySpare);
                    }
                }
                Instruction::Dispatch(dispatch) => {
                    if !declared.contains(&dispatch.selector.as_str()) {
                        return Err(SchemaError::UnknownSelector(dispatch.selector.clone()));
                    }
                    if dispatch.subtypes.iter().all(Option::is_none) {
                        return Err(SchemaError::EmptyDispatch(dispatch.selector.clone()));
                    }

                    let mark = declared.len();
                    for subtype in dispatch.subtypes.iter().flatten() {
                        subtype.validate_with(declared)?;
                        declared.truncate(mark);
                    }
                }
            }
        }

        Ok(())
    }
}

fn validate_field(field: &Field) -> Result<(), SchemaError> {
    if field.width == 0 {
        return Err(SchemaError::InvalidFieldSize(field.name.clone()));
    }

    match field.kind {
        FieldKind::Unsigned | FieldKind::Signed if field.width > 64 => {
            Err(SchemaError::InvalidFieldSize(field.name.clone()))
        }
        FieldKind::Text if field.width % 6 != 0 => {
            Err(SchemaError::InvalidTextWidth(field.name.clone()))
        }
        _ => Ok(()),
    }
}

#[cfg(feature = "serde")]
impl TryFrom<crate::serde::SchemaDef> for Schema {
    type Error = SchemaError;

    fn try_from(value: crate::serde::SchemaDef) -> Result<Self, Self::Error> {
        let instructions = value
            .instructions
            .into_iter()
            .map(Instruction::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Schema::compile(instructions)
    }
}

#[cfg(feature = "serde")]
impl TryFrom<crate::serde::InstructionDef> for Instruction {
    type Error = SchemaError;

    fn try_from(value: crate::serde::InstructionDef) -> Result<Self, Self::Error> {
        Ok(match value {
            crate::serde::InstructionDef::Field(field) => Instruction::Field(field.into()),
            crate::serde::InstructionDef::Spare { width } => Instruction::Spare(width),
            crate::serde::InstructionDef::Dispatch { selector, subtypes } => {
                let subtypes = subtypes
                    .into_iter()
                    .map(|s| s.map(Schema::try_from).transpose())
                    .collect::<Result<Vec<_>, _>>()?;
                Instruction::Dispatch(Dispatch::new(&selector, subtypes))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector_schema(nested: Schema) -> Vec<Instruction> {
        vec![
            Field::unsigned("kind", 2).into(),
            Dispatch::new("kind", vec![Some(nested), None]).into(),
        ]
    }

    #[test]
    fn test_compile_empty() {
        let schema = Schema::compile(vec![]).unwrap();
        assert!(schema.is_empty());
    }

    #[test]
    fn test_compile_rejects_zero_width() {
        let err = Schema::compile(vec![Field::unsigned("a", 0).into()]).unwrap_err();
        assert_eq!(err, SchemaError::InvalidFieldSize("a".to_string()));
    }

    #[test]
    fn test_compile_rejects_wide_numeric() {
        let err = Schema::compile(vec![Field::signed("a", 65).into()]).unwrap_err();
        assert_eq!(err, SchemaError::InvalidFieldSize("a".to_string()));
        assert!(Schema::compile(vec![Field::text("name", 120).into()]).is_ok());
    }

    #[test]
    fn test_compile_rejects_ragged_text() {
        let err = Schema::compile(vec![Field::text("name", 20).into()]).unwrap_err();
        assert_eq!(err, SchemaError::InvalidTextWidth("name".to_string()));
    }

    #[test]
    fn test_compile_rejects_raw_before_end() {
        let err = Schema::compile(vec![
            Field::raw("data", 920).into(),
            Instruction::Spare(2),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::RawNotTerminal("data".to_string()));
    }

    #[test]
    fn test_compile_rejects_unknown_selector() {
        let err = Schema::compile(vec![
            Dispatch::new("kind", vec![Some(Schema::default())]).into(),
            Field::unsigned("kind", 2).into(),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::UnknownSelector("kind".to_string()));
    }

    #[test]
    fn test_compile_nested_selector_scope() {
        // the nested dispatch may use a field declared by the parent
        let nested = Schema::new(vec![
            Field::unsigned("sub", 1).into(),
            Dispatch::new("kind", vec![Some(Schema::default())]).into(),
        ]);
        assert!(Schema::compile(selector_schema(nested)).is_ok());

        // but not one declared in a sibling branch
        let sibling = Schema::new(vec![Field::unsigned("only_here", 1).into()]);
        let err = Schema::compile(vec![
            Field::unsigned("kind", 1).into(),
            Dispatch::new("kind", vec![Some(sibling), Some(Schema::default())]).into(),
            Dispatch::new("only_here", vec![Some(Schema::default())]).into(),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::UnknownSelector("only_here".to_string()));
    }

    #[test]
    fn test_compile_rejects_empty_dispatch() {
        let err = Schema::compile(vec![
            Field::unsigned("kind", 2).into(),
            Dispatch::new("kind", vec![None, None]).into(),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::EmptyDispatch("kind".to_string()));
    }

    #[test]
    fn test_dispatch_select() {
        let dispatch = Dispatch::new(
            "kind",
            vec![None, Some(Schema::new(vec![Instruction::Spare(1)]))],
        );
        assert!(dispatch.select(&Value::Unsigned(0)).is_none());
        assert_eq!(dispatch.select(&Value::Unsigned(1)).unwrap().len(), 1);
        assert!(dispatch.select(&Value::Unsigned(2)).is_none());
        assert!(dispatch.select(&Value::Signed(-1)).is_none());

        let custom = dispatch.with_compute(|v| v.as_u64().map(|v| (v % 2) as usize));
        assert!(custom.select(&Value::Unsigned(3)).is_some());
    }
}
