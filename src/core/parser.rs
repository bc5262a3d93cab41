//! Line parser for surface nomenclature files
//!
//! One record per line, fields separated by runs of whitespace:
//!
//! ```text
//! <id> _("<display name>") <type> <latitude> <longitude> <size> [ignored...]
//! ```
//!
//! Blank lines and lines whose first non-blank character is `#` are comments.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Blank line or `#` comment
    static ref COMMENT_RE: Regex = Regex::new(r"^\s*(#.*)?$").unwrap();

    /// id, translatable name, type, latitude, longitude, size, remainder
    static ref RECORD_RE: Regex = Regex::new(
        r#"^\s*([\w\-]+)\s+_\("(.*)"\)\s+(\w+)\s+([\-+.\d]+)\s+([\-+.\d]+)\s+([\-+.\d]+)(.*)$"#
    )
    .unwrap();
}

/// Fields of one successfully matched line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub id: String,
    pub name: String,
    /// Type token as written in the file
    pub feature_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub size: f64,
}

/// Classification of a single input line
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// Blank or comment, not a record attempt
    Comment,
    /// Matched the record schema
    Record(ParsedRecord),
    /// A record attempt that did not match
    Malformed,
}

/// Whether a line is a blank or comment line
pub fn is_comment(line: &str) -> bool {
    COMMENT_RE.is_match(line)
}

/// Classify and, when possible, parse one line
pub fn parse_line(line: &str) -> LineKind {
    if is_comment(line) {
        return LineKind::Comment;
    }

    let Some(caps) = RECORD_RE.captures(line) else {
        return LineKind::Malformed;
    };

    LineKind::Record(ParsedRecord {
        id: caps[1].trim().to_string(),
        name: caps[2].trim().to_string(),
        feature_type: caps[3].trim().to_string(),
        latitude: parse_lossy(&caps[4]),
        longitude: parse_lossy(&caps[5]),
        size: parse_lossy(&caps[6]),
    })
}

/// Numeric text that passed the pattern but is not a number (`1.2.3`, `+-`) reads as zero
fn parse_lossy(text: &str) -> f64 {
    text.trim().parse().unwrap_or(0.0)
}
