/*!
 * Error types for the dualsub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while decoding subtitle documents
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// A timestamp was too short or had a non-numeric field
    #[error("Malformed timestamp {value:?}: {reason}")]
    MalformedTimestamp {
        /// The offending timestamp text
        value: String,
        /// What was wrong with it
        reason: String,
    },

    /// Two consecutive SRT blocks did not touch, or text trailed the last block
    #[error(
        "Expected contiguous start of match or end of input at char {expected_start}, \
         but started at char {actual_start} (unmatched content: {unmatched_content:?})"
    )]
    ParseError {
        /// Byte offset where the next block should have started
        expected_start: usize,
        /// Byte offset where the next block actually started
        actual_start: usize,
        /// The text found between the two offsets
        unmatched_content: String,
    },

    /// A block index did not fit in the index type
    #[error("Invalid subtitle index: {0}")]
    InvalidIndex(String),

    /// A SAMI document could not be converted
    #[error("Invalid SAMI document: {0}")]
    InvalidSami(String),
}

impl SubtitleError {
    pub(crate) fn malformed_timestamp(value: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTimestamp {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Application error for file and configuration failures
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

// Utility functions for error conversion
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
