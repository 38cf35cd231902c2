//! Error types for decoding, encoding and schema construction.

use thiserror::Error;

use crate::record::Value;

/// Malformed transport input: bad armor characters or a sentence line of the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Character outside the six-bit armor range (`'0'..='W'` and `` '`'..='w' ``).
    #[error("invalid armor character {0:?}")]
    InvalidArmorChar(char),
    /// Sentence line has fewer than six comma-separated fields.
    #[error("sentence has {found} fields, expected at least 6")]
    TooFewFields { found: usize },
    /// Fragment count or fragment number is not a positive integer.
    #[error("invalid fragment counter {0:?}")]
    InvalidFragmentCounter(String),
}

/// Errors produced while turning sentences into a [crate::record::DecodedRecord].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Format(#[from] FormatError),
    /// A field's validator rejected its decoded value. Aborts the whole message.
    #[error("validation of field {field} failed (value {value})")]
    Validation { field: String, value: Value },
    /// The dispatch selector's value does not index a sub-schema.
    #[error("no variant of {selector} for value {value}")]
    NoVariant { selector: String, value: Value },
    /// A dispatch names a field that was not decoded earlier in the message.
    #[error("dispatch selector {0} has not been decoded")]
    MissingSelector(String),
    /// A typed view expected a field the record does not carry.
    #[error("record has no field {0}")]
    MissingField(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced when packing values back into a bit buffer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("no value supplied for field {0}")]
    MissingField(String),
    /// The value has the wrong type, does not fit the field width, or fails validation.
    #[error("value {value} does not fit field {field}")]
    InvalidValue { field: String, value: Value },
    #[error("no variant of {selector} for value {value}")]
    NoVariant { selector: String, value: Value },
}

/// Errors produced by [crate::schema::Schema::compile].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Field width is zero, or above 64 bits for a numeric field.
    #[error("field {0} has an invalid width")]
    InvalidFieldSize(String),
    /// Text width is not a multiple of six.
    #[error("text field {0} width is not a multiple of 6")]
    InvalidTextWidth(String),
    /// A raw field is followed by further instructions.
    #[error("raw field {0} must be the last instruction")]
    RawNotTerminal(String),
    #[error("spare region has zero width")]
    EmptySpare,
    /// Dispatch has no sub-schemas at all.
    #[error("dispatch on {0} has no subtypes")]
    EmptyDispatch(String),
    /// Dispatch selector is not declared before the dispatch node.
    #[error("dispatch selector {0} is not declared before use")]
    UnknownSelector(String),
}
