//! Decoding of raw capture files. Strategies run in
//! [`DecodeStrategy::ORDER`]; the first one that yields a document wins.

use crate::error::{ConvertError, Result};
use flate2::read::MultiGzDecoder;
use serde_json::Value;
use std::io::Read;
use tracing::{debug, warn};

pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// Whole buffer as UTF-8 JSON-lines.
    PlainText,
    /// Skip to the first gzip magic marker and inflate from there.
    FramedGzip,
    /// Whole buffer as UTF-8 when no gzip marker exists.
    RawText,
}

enum Attempt {
    Decoded(Value),
    Skipped,
    Failed(String),
}

impl DecodeStrategy {
    pub const ORDER: [DecodeStrategy; 3] = [
        DecodeStrategy::PlainText,
        DecodeStrategy::FramedGzip,
        DecodeStrategy::RawText,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DecodeStrategy::PlainText => "plain-text",
            DecodeStrategy::FramedGzip => "framed-gzip",
            DecodeStrategy::RawText => "raw-text",
        }
    }

    fn attempt(self, raw: &[u8]) -> Attempt {
        match self {
            DecodeStrategy::PlainText => match std::str::from_utf8(raw) {
                Ok(text) => parse_lines(text, LineBreaks::Universal),
                Err(_) => Attempt::Failed("buffer is not valid UTF-8".to_string()),
            },
            DecodeStrategy::FramedGzip => {
                let Some(offset) = find_gzip_magic(raw) else {
                    return Attempt::Skipped;
                };
                debug!(offset, "gzip magic found");

                let inflated = match gunzip_lenient(&raw[offset..]) {
                    Ok(bytes) => bytes,
                    Err(reason) => return Attempt::Failed(reason),
                };

                match String::from_utf8(inflated) {
                    Ok(text) => parse_lines(&text, LineBreaks::NewlineOnly),
                    Err(_) => {
                        Attempt::Failed("decompressed payload is not valid UTF-8".to_string())
                    }
                }
            }
            DecodeStrategy::RawText => {
                if find_gzip_magic(raw).is_some() {
                    return Attempt::Skipped;
                }
                match std::str::from_utf8(raw) {
                    Ok(text) => parse_lines(text, LineBreaks::NewlineOnly),
                    Err(err) => Attempt::Failed(format!("UTF-8 decode failed: {}", err)),
                }
            }
        }
    }
}

/// Decodes a capture buffer into the first JSON document it contains.
pub fn decode(raw: &[u8]) -> Result<Value> {
    let mut failures: Vec<String> = Vec::new();

    for strategy in DecodeStrategy::ORDER {
        match strategy.attempt(raw) {
            Attempt::Decoded(value) => {
                debug!(strategy = strategy.label(), "capture decoded");
                return Ok(value);
            }
            Attempt::Skipped => continue,
            Attempt::Failed(reason) => {
                debug!(strategy = strategy.label(), %reason, "decode strategy failed");
                failures.push(format!("{}: {}", strategy.label(), reason));
            }
        }
    }

    Err(ConvertError::Decode(failures.join("; ")))
}

/// Offset of the first gzip magic marker in `raw`, if any.
pub fn find_gzip_magic(raw: &[u8]) -> Option<usize> {
    raw.windows(GZIP_MAGIC.len())
        .position(|window| window == GZIP_MAGIC)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineBreaks {
    /// `\n`, `\r\n` and a lone `\r` all end a line.
    Universal,
    /// Only `\n` ends a line; a stray `\r` is trimmed as padding.
    NewlineOnly,
}

/// Returns the first non-blank line that parses as JSON.
pub fn first_json_line(text: &str, breaks: LineBreaks) -> Option<Value> {
    let is_break = |c: char| match breaks {
        LineBreaks::Universal => c == '\n' || c == '\r',
        LineBreaks::NewlineOnly => c == '\n',
    };

    text.split(is_break)
        .map(|line| line.trim_matches(is_line_padding))
        .filter(|line| !line.is_empty())
        .find_map(|line| serde_json::from_str(line).ok())
}

// Whitespace plus the ASCII file/group/record/unit separators.
fn is_line_padding(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

fn parse_lines(text: &str, breaks: LineBreaks) -> Attempt {
    match first_json_line(text, breaks) {
        Some(value) => Attempt::Decoded(value),
        None => Attempt::Failed("no line parses as JSON".to_string()),
    }
}

// Truncated streams and trailing garbage still count as long as some bytes
// came out before the error.
fn gunzip_lenient(payload: &[u8]) -> std::result::Result<Vec<u8>, String> {
    let mut decoder = MultiGzDecoder::new(payload);
    let mut out = Vec::new();

    if let Err(err) = decoder.read_to_end(&mut out) {
        if out.is_empty() {
            return Err(format!("gzip decompression failed: {}", err));
        }
        warn!(error = %err, recovered = out.len(), "gzip stream ended uncleanly, keeping output");
    }

    if out.is_empty() {
        return Err("gzip decompression produced no output".to_string());
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use serde_json::json;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn plain_json_line() {
        let value = decode(br#"{"a": 1}"#).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn skips_blank_and_garbage_lines() {
        let raw = b"\n   \nHTTP/1.1 200 OK\r\n{\"a\": 2}\r\n{\"a\": 3}\n";
        assert_eq!(decode(raw).unwrap(), json!({"a": 2}));
    }

    #[test]
    fn lone_carriage_return_splits_plain_text() {
        let raw = b"garbage\r{\"e\": 5}\r";
        assert_eq!(decode(raw).unwrap(), json!({"e": 5}));
    }

    #[test]
    fn record_separator_padding_is_trimmed() {
        let raw = b"\x1e{\"f\": 6}\x1f\n";
        assert_eq!(decode(raw).unwrap(), json!({"f": 6}));
    }

    #[test]
    fn inflated_text_splits_on_newline_only() {
        let text = "junk\r{\"g\": 7}\n{\"g\": 8}\r\n";
        assert_eq!(
            first_json_line(text, LineBreaks::NewlineOnly),
            Some(json!({"g": 8}))
        );
        assert_eq!(
            first_json_line(text, LineBreaks::Universal),
            Some(json!({"g": 7}))
        );
    }

    #[test]
    fn gzip_without_framing() {
        let raw = gzip(b"{\"b\": true}\n");
        assert_eq!(decode(&raw).unwrap(), json!({"b": true}));
    }

    #[test]
    fn gzip_behind_framing_bytes() {
        let mut raw = b"HTTP/1.1 200 OK\r\nContent-Encoding: gzip\r\n\r\n".to_vec();
        raw.extend_from_slice(&[0x00, 0xff, 0x10]);
        raw.extend(gzip(b"\n{\"c\": [1, 2]}\n"));
        assert_eq!(decode(&raw).unwrap(), json!({"c": [1, 2]}));
    }

    #[test]
    fn gzip_with_trailing_garbage_is_recovered() {
        let mut raw = gzip(b"{\"d\": 4}");
        raw.extend_from_slice(b"\x00\x01trailing proxy bytes");
        assert_eq!(decode(&raw).unwrap(), json!({"d": 4}));
    }

    #[test]
    fn empty_gzip_output_is_decode_error() {
        let raw = gzip(b"");
        let err = decode(&raw).unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
        assert!(err.to_string().contains("no output"));
    }

    #[test]
    fn gzip_of_non_json_is_decode_error() {
        let raw = gzip(b"not json at all\n");
        assert!(matches!(decode(&raw), Err(ConvertError::Decode(_))));
    }

    #[test]
    fn invalid_utf8_without_magic_is_decode_error() {
        let raw = [0xff, 0xfe, 0x00, 0x7b, 0xc3];
        assert!(matches!(decode(&raw), Err(ConvertError::Decode(_))));
    }

    #[test]
    fn text_without_json_is_decode_error() {
        assert!(matches!(decode(b"hello\nworld\n"), Err(ConvertError::Decode(_))));
        assert!(matches!(decode(b""), Err(ConvertError::Decode(_))));
    }

    #[test]
    fn magic_offset() {
        assert_eq!(find_gzip_magic(&[0x00, 0x1f, 0x8b, 0x08]), Some(1));
        assert_eq!(find_gzip_magic(&[0x1f]), None);
        assert_eq!(find_gzip_magic(b"{}"), None);
    }
}
