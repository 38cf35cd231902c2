//! Multi-sentence reassembly.
//!
//! A logical message may be split over several sentences. Fragments are assumed to
//! arrive in transmission order; there is no out-of-order detection and no timeout.

use crate::errors::FormatError;

/// Marks a line that carries no sentence.
pub const COMMENT_MARKER: char = '#';

/// The parts of a sentence line used for reassembly.
///
/// Line layout: `field[1]` is the fragment count, `field[2]` this fragment's number
/// and `field[5]` the armored payload segment. Everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub expected: usize,
    pub number: usize,
    pub payload: &'a str,
}

impl<'a> Sentence<'a> {
    /// Parses a line. Comment and blank lines yield `Ok(None)`.
    pub fn parse(line: &'a str) -> Result<Option<Self>, FormatError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.starts_with(COMMENT_MARKER) || line.trim().is_empty() {
            return Ok(None);
        }

        let fields: Vec<&str> = line.splitn(7, ',').collect();
        if fields.len() < 6 {
            return Err(FormatError::TooFewFields {
                found: fields.len(),
            });
        }

        Ok(Some(Sentence {
            expected: counter(fields[1])?,
            number: counter(fields[2])?,
            payload: fields[5],
        }))
    }
}

fn counter(field: &str) -> Result<usize, FormatError> {
    match field.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(FormatError::InvalidFragmentCounter(field.to_string())),
    }
}

/// Accumulates payload segments until a message is complete.
#[derive(Debug, Default)]
pub struct Reassembler {
    expected: usize,
    payload: String,
}

impl Reassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one fragment. Returns the assembled payload once the fragment number
    /// reaches the fragment count.
    pub fn push(&mut self, sentence: &Sentence<'_>) -> Option<String> {
        if sentence.number == 1 {
            self.payload.clear();
            self.expected = sentence.expected;
        }
        self.payload.push_str(sentence.payload);

        if sentence.number < sentence.expected {
            return None;
        }

        self.expected = 0;
        Some(std::mem::take(&mut self.payload))
    }

    /// Parses and feeds one line. Comments leave the state untouched.
    pub fn push_line(&mut self, line: &str) -> Result<Option<String>, FormatError> {
        Ok(Sentence::parse(line)?.and_then(|sentence| self.push(&sentence)))
    }

    /// Fragment count of the message being accumulated, if any.
    pub fn pending(&self) -> Option<usize> {
        (self.expected > 0).then_some(self.expected)
    }

    pub fn reset(&mut self) {
        self.expected = 0;
        self.payload.clear();
    }
}
