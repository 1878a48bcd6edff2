//! Line model for env documents
//!
//! Every physical line is either passed through verbatim or decoded into a
//! key/value assignment. Parsing is best-effort and never fails.

use serde::{Deserialize, Serialize};

/// Characters stripped from both ends of a raw value
const VALUE_STRIP: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B', '"', '\''];

/// Characters stripped from both ends of a raw key
const KEY_STRIP: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// One physical line of an env document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Line {
    /// A comment, blank line, or anything without a `key=value` shape
    Raw { content: String },
    /// A decoded key/value pair
    Assignment { key: String, value: String },
}

impl Line {
    /// Create a passthrough line
    pub fn raw(content: impl Into<String>) -> Self {
        Self::Raw {
            content: content.into(),
        }
    }

    /// Create an assignment line
    pub fn assignment(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Assignment {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parse a single line (without its trailing `\n`)
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Self::raw(line);
        }

        match line.split_once('=') {
            Some((key, value)) => {
                let key = key.trim_matches(KEY_STRIP);
                if key.is_empty() {
                    return Self::raw(line);
                }
                Self::assignment(key, value.trim_matches(VALUE_STRIP))
            }
            None => Self::raw(line),
        }
    }

    /// The assignment key, if this is an assignment
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Assignment { key, .. } => Some(key),
            Self::Raw { .. } => None,
        }
    }

    /// The assignment value, if this is an assignment
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Assignment { value, .. } => Some(value),
            Self::Raw { .. } => None,
        }
    }

    /// Whether this line assigns `key`
    pub fn assigns(&self, key: &str) -> bool {
        self.key() == Some(key)
    }

    /// Render the line as it is written back to disk
    ///
    /// Values are double-quoted only when they contain a space.
    pub fn render(&self) -> String {
        match self {
            Self::Raw { content } => content.clone(),
            Self::Assignment { key, value } => {
                if value.contains(' ') {
                    format!("{}=\"{}\"", key, value)
                } else {
                    format!("{}={}", key, value)
                }
            }
        }
    }

    /// Render the line with its value removed, for template documents
    pub fn render_blank(&self) -> String {
        match self {
            Self::Raw { content } => content.clone(),
            Self::Assignment { key, .. } => format!("{}=", key),
        }
    }
}

/// Split document text into lines
///
/// Splits on `\n` only; a `\r` before the newline stays part of the line.
/// Empty text yields no lines.
pub fn parse_lines(content: &str) -> Vec<Line> {
    if content.is_empty() {
        return Vec::new();
    }
    content.split('\n').map(Line::parse).collect()
}
