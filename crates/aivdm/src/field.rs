//! Field descriptors: the primitive entries of a [crate::schema::Schema].

use std::sync::Arc;

use crate::record::Value;

/// How the bits of a field are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldKind {
    Unsigned,
    /// Two's complement.
    Signed,
    /// Six-bit characters; width must be a multiple of 6.
    Text,
    /// Everything from the field start to the end of the buffer, uninterpreted.
    Raw,
}

#[cfg(feature = "serde")]
impl From<crate::serde::FieldKindDef> for FieldKind {
    fn from(value: crate::serde::FieldKindDef) -> Self {
        match value {
            crate::serde::FieldKindDef::Unsigned => FieldKind::Unsigned,
            crate::serde::FieldKindDef::Signed => FieldKind::Signed,
            crate::serde::FieldKindDef::Text => FieldKind::Text,
            crate::serde::FieldKindDef::Raw => FieldKind::Raw,
        }
    }
}

/// Predicate applied to a decoded value. A rejection aborts the message.
#[derive(Debug, Clone, Copy)]
pub enum Validator {
    /// Integer value within `min..=max`. Non-integer values are rejected.
    Range { min: i64, max: i64 },
    Predicate(fn(&Value) -> bool),
}

impl Validator {
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Validator::Range { min, max } => value
                .as_i64()
                .is_some_and(|v| (*min..=*max).contains(&v)),
            Validator::Predicate(check) => check(value),
        }
    }
}

/// Maps a decoded value to its presentation form.
#[derive(Debug, Clone)]
pub enum Presenter {
    /// Label table indexed by the integer value.
    Legends(Arc<[String]>),
    Function(fn(&Value) -> Value),
}

impl Presenter {
    pub fn legends(labels: &[&str]) -> Self {
        Presenter::Legends(labels.iter().map(|s| s.to_string()).collect())
    }

    /// Applies the presenter. A legend table leaves indices it has no label for unchanged.
    pub fn present(&self, value: &Value) -> Value {
        match self {
            Presenter::Legends(labels) => value
                .as_u64()
                .and_then(|i| labels.get(i as usize))
                .map(|label| Value::Text(label.clone()))
                .unwrap_or_else(|| value.clone()),
            Presenter::Function(f) => f(value),
        }
    }
}

/// A named, fixed-width field in a schema.
#[derive(Debug, Clone)]
pub struct Field {
    /// Name used in the decoded record and for dispatch lookups.
    pub name: String,
    /// Width in bits. For [FieldKind::Raw] this is the nominal maximum.
    pub width: usize,
    pub kind: FieldKind,
    /// Raw value meaning "not available".
    pub out_of_band: Option<i64>,
    /// Human-readable description.
    pub legend: String,
    pub validator: Option<Validator>,
    pub presenter: Option<Presenter>,
}

impl Field {
    pub fn new(name: &str, width: usize, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            width,
            kind,
            out_of_band: None,
            legend: String::new(),
            validator: None,
            presenter: None,
        }
    }

    pub fn unsigned(name: &str, width: usize) -> Self {
        Self::new(name, width, FieldKind::Unsigned)
    }

    pub fn signed(name: &str, width: usize) -> Self {
        Self::new(name, width, FieldKind::Signed)
    }

    pub fn text(name: &str, width: usize) -> Self {
        Self::new(name, width, FieldKind::Text)
    }

    pub fn raw(name: &str, width: usize) -> Self {
        Self::new(name, width, FieldKind::Raw)
    }

    pub fn with_legend(mut self, legend: &str) -> Self {
        self.legend = legend.to_string();
        self
    }

    pub fn with_out_of_band(mut self, value: i64) -> Self {
        self.out_of_band = Some(value);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_range(self, min: i64, max: i64) -> Self {
        self.with_validator(Validator::Range { min, max })
    }

    pub fn with_presenter(mut self, presenter: Presenter) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn with_legends(self, labels: &Presenter) -> Self {
        self.with_presenter(labels.clone())
    }

    pub fn present_with(self, f: fn(&Value) -> Value) -> Self {
        self.with_presenter(Presenter::Function(f))
    }

    /// Runs the validator, if any.
    pub fn accepts(&self, value: &Value) -> bool {
        self.validator.is_none_or(|v| v.accepts(value))
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::FieldDef> for Field {
    fn from(value: crate::serde::FieldDef) -> Self {
        Field {
            name: value.name,
            width: value.width,
            kind: value.kind.into(),
            out_of_band: value.out_of_band,
            legend: value.legend,
            validator: value
                .range
                .map(|r| Validator::Range { min: r.min, max: r.max }),
            presenter: value
                .legends
                .map(|labels| Presenter::Legends(labels.into())),
        }
    }
}
