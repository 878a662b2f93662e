//! Core error type for all codec operations
//!
//! Every parse and serialize operation reports failure through [`Error`].
//! Variants carry the offending length or value so callers can log or report
//! without the codec doing any I/O itself.

use derive_more::Display;

/// The APDU kind an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ApduKind {
    /// Command APDU (C-APDU)
    #[display("command APDU")]
    Command,
    /// Response APDU (R-APDU)
    #[display("response APDU")]
    Response,
}

/// An encoded length field inside a command APDU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum LengthField {
    /// Length of the command data field
    Lc,
    /// Length of the expected response data
    Le,
}

/// A structured field whose value is bounded by the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Field {
    /// Command data length
    #[display("command data length")]
    CommandData,
    /// Expected response length (Ne)
    #[display("expected response length")]
    ExpectedLength,
    /// Response data length
    #[display("response data length")]
    ResponseData,
}

/// Hex decoding failures of the string adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    /// The string has an odd number of characters
    #[error("odd number of hex characters: {0}")]
    OddLength(usize),

    /// A character outside `[0-9a-fA-F]` was found
    #[error("invalid hex character {c:?} at index {index}")]
    InvalidCharacter {
        /// The offending character
        c: char,
        /// Its position in the input
        index: usize,
    },
}

/// Core error type that encompasses all possible errors in the crate
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// Overall buffer length is outside the legal range for the unit
    #[error("Invalid {kind} length: expected {min} to {max} bytes, got {actual}")]
    InvalidLength {
        /// Unit being parsed
        kind: ApduKind,
        /// Length that was supplied
        actual: usize,
        /// Minimum legal length
        min: usize,
        /// Maximum legal length
        max: usize,
    },

    /// An embedded length field disagrees with the bytes that follow the header
    #[error("Encoding mismatch: {field} value {value} is inconsistent with a {body_len} byte body")]
    EncodingMismatch {
        /// The length field that was checked
        field: LengthField,
        /// Decoded value of the field
        value: usize,
        /// Number of bytes after the command header
        body_len: usize,
    },

    /// A field exceeds the protocol maximum at serialization time
    #[error("Value out of range: {field} {value} exceeds maximum of {max}")]
    OutOfRange {
        /// Field that is out of range
        field: Field,
        /// Supplied value
        value: usize,
        /// Largest value the protocol allows
        max: usize,
    },

    /// Input to a hex adapter could not be decoded
    #[error("Hex decode error: {0}")]
    Hex(#[from] HexError),

    /// Context error with message and source error
    #[error("{context}: {source}")]
    Context {
        /// Contextual message
        context: String,
        /// Source error
        source: Box<Self>,
    },
}

impl Error {
    /// Create a new error with context information
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create a length error
    pub const fn invalid_length(kind: ApduKind, actual: usize, min: usize, max: usize) -> Self {
        Self::InvalidLength {
            kind,
            actual,
            min,
            max,
        }
    }

    /// Create an encoding mismatch error
    pub const fn mismatch(field: LengthField, value: usize, body_len: usize) -> Self {
        Self::EncodingMismatch {
            field,
            value,
            body_len,
        }
    }

    /// Create a range error
    pub const fn out_of_range(field: Field, value: usize, max: usize) -> Self {
        Self::OutOfRange { field, value, max }
    }

    /// The error without any context layers
    pub fn root(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether the buffer length was outside the legal range
    pub fn is_length_error(&self) -> bool {
        matches!(self.root(), Self::InvalidLength { .. })
    }

    /// Whether an Lc or Le field disagreed with the buffer
    pub fn is_encoding_mismatch(&self) -> bool {
        matches!(self.root(), Self::EncodingMismatch { .. })
    }

    /// Whether a field exceeded the protocol maximum
    pub fn is_range_error(&self) -> bool {
        matches!(self.root(), Self::OutOfRange { .. })
    }

    /// Whether hex decoding failed
    pub fn is_hex_error(&self) -> bool {
        matches!(self.root(), Self::Hex(_))
    }
}

/// Result type for codec operations
pub type Result<T> = core::result::Result<T, Error>;

/// Extension trait for Result with codec Errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<S: Into<String>>(self, context: S) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context<S: Into<String>>(self, context: S) -> Self {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::invalid_length(ApduKind::Command, 3, 4, 65544);
        assert_eq!(
            err.to_string(),
            "Invalid command APDU length: expected 4 to 65544 bytes, got 3"
        );

        let err = Error::mismatch(LengthField::Lc, 5, 9);
        assert_eq!(
            err.to_string(),
            "Encoding mismatch: Lc value 5 is inconsistent with a 9 byte body"
        );

        let err = Error::out_of_range(Field::ExpectedLength, 65537, 65536);
        assert_eq!(
            err.to_string(),
            "Value out of range: expected response length 65537 exceeds maximum of 65536"
        );
    }

    #[test]
    fn test_context_is_transparent_to_predicates() {
        let err: Result<()> = Err(Error::from(HexError::OddLength(3)));
        let err = err.context("decoding SELECT").unwrap_err();

        assert!(err.is_hex_error());
        assert!(!err.is_length_error());
        assert_eq!(err.root(), &Error::Hex(HexError::OddLength(3)));
        assert_eq!(
            err.to_string(),
            "decoding SELECT: Hex decode error: odd number of hex characters: 3"
        );
    }
}
