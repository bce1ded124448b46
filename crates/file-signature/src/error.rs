use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reader::ReadError;

/// Bytes either side of a failing offset included in a [`ParserError`].
const CONTEXT_BYTES: usize = 8;

/// A parse that could not complete, or a buffer no parser claims.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ParserError {
    pub message: String,
    /// Absolute offset of the failure; `None` when not tied to a byte.
    pub byte_index: Option<usize>,
    /// Bytes surrounding `byte_index`.  Empty when not localised.
    pub data_slice: Vec<u8>,
    /// Set only for a buffer no parser claims.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    unrecognised: bool,
}

impl ParserError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            byte_index: None,
            data_slice: Vec::new(),
            unrecognised: false,
        }
    }

    /// Error located at `index`, capturing the surrounding bytes.
    pub fn at(message: impl Into<String>, index: usize, buffer: &[u8]) -> Self {
        let start = index.saturating_sub(CONTEXT_BYTES).min(buffer.len());
        let end = index.saturating_add(CONTEXT_BYTES).min(buffer.len());
        Self {
            message: message.into(),
            byte_index: Some(index),
            data_slice: buffer[start..end].to_vec(),
            unrecognised: false,
        }
    }

    pub fn unknown_format() -> Self {
        Self {
            unrecognised: true,
            ..Self::new("Unknown file format")
        }
    }

    pub fn is_unknown_format(&self) -> bool {
        self.unrecognised
    }
}

/// Failure inside a single format extractor, before the buffer context is
/// attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("{message}")]
    Invalid { message: String, offset: usize },
}

impl ExtractError {
    pub fn invalid(message: impl Into<String>, offset: usize) -> Self {
        Self::Invalid {
            message: message.into(),
            offset,
        }
    }

    pub fn into_parser_error(self, buffer: &[u8]) -> ParserError {
        let offset = match &self {
            Self::Read(e) => e.offset(),
            Self::Invalid { offset, .. } => *offset,
        };
        ParserError::at(self.to_string(), offset, buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_format_is_not_localised() {
        let err = ParserError::unknown_format();
        assert_eq!(err.to_string(), "Unknown file format");
        assert_eq!(err.byte_index, None);
        assert!(err.data_slice.is_empty());
        assert!(err.is_unknown_format());
    }

    #[test]
    fn unknown_format_is_a_marker_not_a_message() {
        assert!(!ParserError::new("Unknown file format").is_unknown_format());

        let json = serde_json::to_string(&ParserError::unknown_format()).unwrap();
        let back: ParserError = serde_json::from_str(&json).unwrap();
        assert!(back.is_unknown_format());

        let json = serde_json::to_value(ParserError::new("Invalid file format")).unwrap();
        assert!(json.get("unrecognised").is_none());
    }

    #[test]
    fn located_error_captures_context() {
        let buffer: Vec<u8> = (0u8..32).collect();
        let err = ParserError::at("bad", 16, &buffer);
        assert_eq!(err.byte_index, Some(16));
        assert_eq!(err.data_slice, (8u8..24).collect::<Vec<_>>());
    }

    #[test]
    fn context_is_clamped_at_edges() {
        let buffer = [1u8, 2, 3];
        let err = ParserError::at("end", 3, &buffer);
        assert_eq!(err.data_slice, vec![1, 2, 3]);
        let err = ParserError::at("past", 100, &buffer);
        assert!(err.data_slice.is_empty());
    }

    #[test]
    fn read_error_converts_with_offset() {
        let buffer = [0u8; 4];
        let err = ExtractError::from(ReadError::OutOfBounds {
            offset: 4,
            width: 4,
            len: 4,
        })
        .into_parser_error(&buffer);
        assert_eq!(err.byte_index, Some(4));
        assert!(err.message.contains("runs past end"));
    }
}
