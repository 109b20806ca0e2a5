//! Error types for the fixed-width codec
//!
//! Every failure aborts the traversal at the first offending field and is
//! returned to the caller of `marshal`/`unmarshal`. Variants carry the name
//! of the field being processed so a caller can locate the problem in the
//! record layout.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Boxed error returned by custom field codecs
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for fixed-width encoding and decoding
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing field annotation
    #[error("Invalid tag on field `{field}`: {reason}")]
    InvalidTag {
        /// Field carrying the annotation
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Decode input is smaller than the span a field requires
    #[error(
        "Short buffer at field `{field}`: need {needed} bytes at offset {offset}, {available} available"
    )]
    ShortBuffer {
        /// Field being decoded
        field: &'static str,
        /// Cursor position when the field was reached
        offset: usize,
        /// Bytes the field requires
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },

    /// Numeric parse or format failure (including an unusable base)
    #[error("Invalid number in field `{field}`: {reason}")]
    InvalidNumber {
        /// Field being processed
        field: &'static str,
        /// Parser or formatter message
        reason: String,
    },

    /// Date/time parse or format failure
    #[error("Invalid temporal value in field `{field}`: {reason}")]
    InvalidTemporal {
        /// Field being processed
        field: &'static str,
        /// Parser or formatter message
        reason: String,
    },

    /// Temporal field without a `format` key
    #[error("Missing format on temporal field `{field}`")]
    MissingFormat {
        /// Field lacking the pattern
        field: &'static str,
    },

    /// Field type has no rule for the requested direction
    #[error("Unsupported kind for field `{field}`: {reason}")]
    UnsupportedKind {
        /// Field being processed
        field: &'static str,
        /// Which capability is missing
        reason: String,
    },

    /// Value wider than its declared width
    #[error("Oversize value in field `{field}`: {actual} bytes exceed declared width {width}")]
    OversizeValue {
        /// Field being encoded
        field: &'static str,
        /// Declared width
        width: usize,
        /// Actual byte count
        actual: usize,
    },

    /// Text span is not valid UTF-8
    #[error("Invalid text in field `{field}`: {reason}")]
    InvalidText {
        /// Field being decoded
        field: &'static str,
        /// UTF-8 decoder message
        reason: String,
    },

    /// Encoded width differs from the declared width (strict mode)
    #[error("Width mismatch in field `{field}`: encoded {actual} bytes, declared {width}")]
    WidthMismatch {
        /// Field being encoded
        field: &'static str,
        /// Declared width
        width: usize,
        /// Bytes actually produced
        actual: usize,
    },

    /// Input continues past the record's declared width (strict mode)
    #[error("Trailing bytes: record is {width} bytes wide, input has {actual}")]
    TrailingBytes {
        /// Total record width
        width: usize,
        /// Input length
        actual: usize,
    },

    /// Custom codec reported a failure
    #[error("Codec error in field `{field}`: {source}")]
    Codec {
        /// Field being processed
        field: &'static str,
        /// Error returned by the codec
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Name of the field the error was raised for, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::InvalidTag { field, .. }
            | Error::ShortBuffer { field, .. }
            | Error::InvalidNumber { field, .. }
            | Error::InvalidTemporal { field, .. }
            | Error::MissingFormat { field }
            | Error::UnsupportedKind { field, .. }
            | Error::OversizeValue { field, .. }
            | Error::InvalidText { field, .. }
            | Error::WidthMismatch { field, .. }
            | Error::Codec { field, .. } => Some(*field),
            Error::TrailingBytes { .. } => None,
        }
    }

    pub(crate) fn invalid_tag(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidTag {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_number(field: &'static str, reason: impl ToString) -> Self {
        Error::InvalidNumber {
            field,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_temporal(field: &'static str, reason: impl ToString) -> Self {
        Error::InvalidTemporal {
            field,
            reason: reason.to_string(),
        }
    }
}
