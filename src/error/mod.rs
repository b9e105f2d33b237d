//! Error types for linefold.

use std::fmt;

use thiserror::Error;

/// Result type alias for aggregation runs.
pub type Result<T> = std::result::Result<T, AggregateError>;

/// Errors that can occur while scanning and aggregating input.
///
/// Every variant aborts the whole run. There is no skip-bad-line mode and
/// a partial table is never returned alongside an error.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A record did not match `name;value`.
    #[error("bad input format at byte {offset}: {reason}")]
    Format {
        /// Offset of the offending record in the source.
        offset: u64,
        /// What was wrong with it.
        reason: FormatReason,
    },

    /// Reading the source or mapping the file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A worker thread panicked before reporting a result.
    #[error("worker thread panicked")]
    WorkerPanicked,
}

impl AggregateError {
    /// Builds a format error for the record starting at `offset`.
    pub fn format(offset: u64, reason: FormatReason) -> Self {
        AggregateError::Format { offset, reason }
    }

    /// Returns true if this is a malformed-record error.
    pub fn is_format(&self) -> bool {
        matches!(self, AggregateError::Format { .. })
    }
}

/// The ways a record can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatReason {
    /// No `;` before the end of the line.
    MissingSeparator,
    /// Nothing after the `;`.
    EmptyValue,
    /// The value is not `-?digits[.digit]`.
    InvalidValue,
    /// A line with no content at all.
    EmptyLine,
}

impl fmt::Display for FormatReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FormatReason::MissingSeparator => "missing ';' separator",
            FormatReason::EmptyValue => "empty value",
            FormatReason::InvalidValue => "value is not a one-decimal number",
            FormatReason::EmptyLine => "empty line",
        };
        f.write_str(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: AggregateError = io_err.into();
        assert!(matches!(err, AggregateError::Io(_)));
        assert!(!err.is_format());
    }

    #[test]
    fn test_display() {
        let err = AggregateError::format(42, FormatReason::MissingSeparator);
        let msg = err.to_string();
        assert!(msg.contains("byte 42"));
        assert!(msg.contains("missing ';'"));
        assert!(err.is_format());
    }

    #[test]
    fn test_invalid_config_display() {
        let err = AggregateError::InvalidConfig {
            message: "workers must be non-zero",
        };
        assert_eq!(err.to_string(), "invalid config: workers must be non-zero");
    }
}
