//! Sentence framing for outgoing payloads.
//!
//! A payload is split into segments of at most [MAX_SEGMENT] characters, each
//! wrapped as `!AIVDM,<count>,<number>,<sequence>,<channel>,<segment>,<fill>*<checksum>`.
//! Only the last fragment carries the fill-bit count; the others carry 0.

/// Longest payload segment placed in one sentence.
pub const MAX_SEGMENT: usize = 60;

const TALKER: &str = "AIVDM";

/// XOR of every byte between the leading `!` or `$` and the `*`.
pub fn checksum(body: &str) -> u8 {
    body.trim_start_matches(['!', '$'])
        .split('*')
        .next()
        .unwrap_or_default()
        .bytes()
        .fold(0, |acc, b| acc ^ b)
}

/// Frames an armored payload as one or more sentence lines.
///
/// `sequence` is the multi-sentence message id (0-9) and is left empty when
/// `None`. An empty payload still produces one sentence.
pub fn sentences(
    payload: &str,
    fill_bits: usize,
    channel: char,
    sequence: Option<u8>,
) -> Vec<String> {
    let chars: Vec<char> = payload.chars().collect();
    let segments: Vec<String> = if chars.is_empty() {
        vec![String::new()]
    } else {
        chars
            .chunks(MAX_SEGMENT)
            .map(|chunk| chunk.iter().collect())
            .collect()
    };

    let count = segments.len();
    let sequence = sequence.map(|s| s.to_string()).unwrap_or_default();

    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let fill = if i + 1 == count { fill_bits } else { 0 };
            let body = format!(
                "!{TALKER},{count},{},{sequence},{channel},{segment},{fill}",
                i + 1
            );
            let sum = checksum(&body);
            format!("{body}*{sum:02X}")
        })
        .collect()
}
