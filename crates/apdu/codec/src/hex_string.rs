//! Hex-string adapters over the byte codec
//!
//! Output is always upper case. Input is case-insensitive and is checked for
//! parity and length bounds before any decoding takes place.

use tracing::debug;

use crate::error::{ApduKind, Error, HexError, Result};

/// Decode a hex string whose decoded length must lie in `min..=max` bytes
pub(crate) fn decode_bounded(kind: ApduKind, s: &str, min: usize, max: usize) -> Result<Vec<u8>> {
    if s.len() % 2 != 0 {
        debug!(len = s.len(), %kind, "Rejecting odd-length hex string");
        return Err(HexError::OddLength(s.len()).into());
    }

    let byte_len = s.len() / 2;
    if byte_len < min || byte_len > max {
        debug!(byte_len, %kind, "Rejecting hex string outside length bounds");
        return Err(Error::invalid_length(kind, byte_len, min, max));
    }

    hex::decode(s).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, index } => {
            HexError::InvalidCharacter { c, index }.into()
        }
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            HexError::OddLength(s.len()).into()
        }
    })
}

/// Encode bytes as an upper-case hex string
pub(crate) fn encode_upper(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_upper(bytes)
}
