//! Sentence stream to decoded records.
//!
//! [MessageStream] pulls lines from any iterator, reassembles fragments and yields
//! one [DecodedRecord] per complete message. Comment and blank lines are ignored.

use std::io::{self, BufRead};

use crate::{
    bits::BitBuffer,
    catalog,
    errors::DecodeError,
    fragment::Reassembler,
    group::{FieldGroup, post_process},
    record::DecodedRecord,
    schema::Schema,
    transform::present_record,
    unpack,
};

/// What the stream does with a message that fails to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorPolicy {
    /// Yield the error, then end the stream.
    #[default]
    Abort,
    /// Drop the message and keep going. Read errors still end the stream.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StreamConfig {
    pub error_policy: ErrorPolicy,
    /// Replace raw values with their presentation form.
    pub scaled: bool,
    /// Collapse field groups and merge text extensions.
    pub groups: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::Abort,
            scaled: false,
            groups: true,
        }
    }
}

impl StreamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_error_policy(&mut self, policy: ErrorPolicy) -> &mut Self {
        self.error_policy = policy;
        self
    }

    pub fn set_scaled(&mut self, scaled: bool) -> &mut Self {
        self.scaled = scaled;
        self
    }

    pub fn set_groups(&mut self, groups: bool) -> &mut Self {
        self.groups = groups;
        self
    }
}

/// A line source item: plain strings, or the results of reading lines.
pub trait SourceLine {
    fn into_line(self) -> io::Result<String>;
}

impl SourceLine for String {
    fn into_line(self) -> io::Result<String> {
        Ok(self)
    }
}

impl SourceLine for &str {
    fn into_line(self) -> io::Result<String> {
        Ok(self.to_string())
    }
}

impl SourceLine for io::Result<String> {
    fn into_line(self) -> io::Result<String> {
        self
    }
}

pub struct MessageStream<'s, I> {
    lines: I,
    schema: &'s Schema,
    groups: &'s [FieldGroup],
    config: StreamConfig,
    reassembler: Reassembler,
    skipped: usize,
    last_error: Option<String>,
    finished: bool,
}

impl<I> MessageStream<'static, I>
where
    I: Iterator,
    I::Item: SourceLine,
{
    /// Decodes with the built-in AIVDM catalog.
    pub fn ais<L>(lines: L) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        MessageStream::new(lines, catalog::aivdm(), &catalog::FIELD_GROUPS)
    }
}

impl<R: BufRead> MessageStream<'static, io::Lines<R>> {
    pub fn from_reader(reader: R) -> Self {
        MessageStream::ais(reader.lines())
    }
}

impl<'s, I> MessageStream<'s, I>
where
    I: Iterator,
    I::Item: SourceLine,
{
    pub fn new<L>(lines: L, schema: &'s Schema, groups: &'s [FieldGroup]) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        Self {
            lines: lines.into_iter(),
            schema,
            groups,
            config: StreamConfig::default(),
            reassembler: Reassembler::new(),
            skipped: 0,
            last_error: None,
            finished: false,
        }
    }

    pub fn with_config(mut self, config: StreamConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Messages dropped under [ErrorPolicy::Skip].
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Text of the most recent decode error, skipped or not.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Decodes one assembled armored payload with this stream's schema and settings.
    pub fn decode_payload(&self, payload: &str) -> Result<DecodedRecord, DecodeError> {
        decode_message(payload, self.schema, self.groups, &self.config)
    }

    /// Reads lines until a message completes.
    fn next_message(&mut self) -> Option<Result<DecodedRecord, DecodeError>> {
        for item in self.lines.by_ref() {
            let line = match item.into_line() {
                Ok(line) => line,
                Err(e) => return Some(Err(DecodeError::Io(e))),
            };

            match self.reassembler.push_line(&line) {
                Ok(Some(payload)) => {
                    return Some(decode_message(
                        &payload,
                        self.schema,
                        self.groups,
                        &self.config,
                    ));
                }
                Ok(None) => {}
                Err(e) => {
                    self.reassembler.reset();
                    return Some(Err(e.into()));
                }
            }
        }
        None
    }
}

fn decode_message(
    payload: &str,
    schema: &Schema,
    groups: &[FieldGroup],
    config: &StreamConfig,
) -> Result<DecodedRecord, DecodeError> {
    let buffer = BitBuffer::from_armored(payload)?;
    let mut record = unpack::decode(&buffer, schema)?;

    if config.groups {
        post_process(&mut record, groups);
    }
    if config.scaled {
        present_record(&mut record);
    }

    Ok(record)
}

impl<'s, I> Iterator for MessageStream<'s, I>
where
    I: Iterator,
    I::Item: SourceLine,
{
    type Item = Result<DecodedRecord, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            match self.next_message() {
                None => self.finished = true,
                Some(Ok(record)) => return Some(Ok(record)),
                Some(Err(e)) => {
                    self.last_error = Some(e.to_string());
                    let fatal = matches!(e, DecodeError::Io(_))
                        || self.config.error_policy == ErrorPolicy::Abort;
                    if fatal {
                        self.finished = true;
                        return Some(Err(e));
                    }
                    self.skipped += 1;
                }
            }
        }
        None
    }
}

impl<'s, I> std::iter::FusedIterator for MessageStream<'s, I>
where
    I: Iterator,
    I::Item: SourceLine,
{
}
