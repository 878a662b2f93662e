//! APDU response definitions
//!
//! This module provides the response APDU value type and its codec
//! according to ISO/IEC 7816-4.

pub mod status;

use std::str::FromStr;

use bytes::{BufMut, Bytes, BytesMut};
use derive_more::Display;
use tracing::{debug, trace};

use crate::constants::*;
use crate::error::{ApduKind, Error, Field, Result};
use crate::hex_string;
use status::{StatusClass, StatusWord};

/// Basic APDU response structure
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Response {
    /// Response data, empty when the card returned only a status word
    data: Bytes,
    /// Status word
    status: StatusWord,
}

impl Response {
    /// Create a new response with data and status
    pub fn new<T: Into<Bytes>>(data: T, status: impl Into<StatusWord>) -> Self {
        Self {
            data: data.into(),
            status: status.into(),
        }
    }

    /// Create a success response
    pub fn success<T: Into<Bytes>>(data: T) -> Self {
        Self::new(data, status::common::SUCCESS)
    }

    /// Create a response carrying only a status word
    pub fn status_only(status: impl Into<StatusWord>) -> Self {
        Self::new(Bytes::new(), status)
    }

    /// Parse response from raw bytes (including status word)
    pub fn from_bytes(apdu: &[u8]) -> Result<Self> {
        let len = apdu.len();
        if !(MIN_LEN_RESPONSE..=MAX_LEN_RESPONSE).contains(&len) {
            debug!(len, "Response APDU length out of range");
            return Err(Error::invalid_length(
                ApduKind::Response,
                len,
                MIN_LEN_RESPONSE,
                MAX_LEN_RESPONSE,
            ));
        }

        let (data, trailer) = apdu.split_at(len - LEN_RESPONSE_TRAILER);
        let response = Self {
            data: Bytes::copy_from_slice(data),
            status: StatusWord::new(trailer[0], trailer[1]),
        };

        trace!(
            sw1 = format_args!("{:#04x}", response.status.sw1),
            sw2 = format_args!("{:#04x}", response.status.sw2),
            data_len = response.data.len(),
            "Parsed APDU response"
        );

        Ok(response)
    }

    /// Parse a response from its hex representation
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes =
            hex_string::decode_bounded(ApduKind::Response, s, MIN_LEN_RESPONSE, MAX_LEN_RESPONSE)?;
        Self::from_bytes(&bytes)
    }

    /// Convert to raw APDU bytes: data followed by SW1 SW2
    pub fn to_bytes(&self) -> Result<Bytes> {
        if self.data.len() > MAX_LEN_RESPONSE_DATA_EXTENDED {
            return Err(Error::out_of_range(
                Field::ResponseData,
                self.data.len(),
                MAX_LEN_RESPONSE_DATA_EXTENDED,
            ));
        }

        let mut buf = BytesMut::with_capacity(self.data.len() + LEN_RESPONSE_TRAILER);
        buf.put_slice(&self.data);
        buf.put_u8(self.status.sw1);
        buf.put_u8(self.status.sw2);
        Ok(buf.freeze())
    }

    /// Upper-case hex representation of [`Response::to_bytes`]
    pub fn to_hex(&self) -> Result<String> {
        self.to_bytes().map(hex_string::encode_upper)
    }

    /// Response data
    pub const fn data(&self) -> &Bytes {
        &self.data
    }

    /// Get the status word
    pub const fn status(&self) -> StatusWord {
        self.status
    }

    /// First status byte
    pub const fn sw1(&self) -> u8 {
        self.status.sw1
    }

    /// Second status byte
    pub const fn sw2(&self) -> u8 {
        self.status.sw2
    }

    /// Status word as a u16 value (SW1 | SW2)
    pub const fn sw(&self) -> u16 {
        self.status.to_u16()
    }

    /// Check if the response indicates success (90 00 or 61 XX)
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if the response indicates a warning (62 XX or 63 XX)
    pub const fn is_warning(&self) -> bool {
        self.status.is_warning()
    }

    /// Check if the response indicates an error (64 XX, 65 XX, 67 XX to 6F XX)
    pub const fn is_error(&self) -> bool {
        self.status.is_error()
    }

    /// Classify the status word
    pub const fn class(&self) -> StatusClass {
        self.status.class()
    }

    /// Convert to the response data, or a [`StatusError`] when the status
    /// word does not indicate success
    pub fn into_result(self) -> core::result::Result<Bytes, StatusError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(StatusError::new(self.status))
        }
    }

    /// Summary for diagnostics: status word and data
    pub fn summary(&self) -> ResponseSummary {
        ResponseSummary {
            sw: self.sw(),
            data: hex_string::encode_upper(&self.data),
        }
    }
}

impl TryFrom<&[u8]> for Response {
    type Error = Error;

    fn try_from(apdu: &[u8]) -> Result<Self> {
        Self::from_bytes(apdu)
    }
}

impl TryFrom<Bytes> for Response {
    type Error = Error;

    fn try_from(apdu: Bytes) -> Result<Self> {
        Self::from_bytes(&apdu)
    }
}

impl FromStr for Response {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

/// Diagnostic view of a [`Response`], not a wire format
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("SW={sw:04X} data={data}")]
pub struct ResponseSummary {
    /// Status word
    pub sw: u16,
    /// Upper-case hex of the response data
    pub data: String,
}

/// A response whose status word does not indicate success
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Status error {status}: {}", .status.description())]
pub struct StatusError {
    /// Status word that caused the error
    pub status: StatusWord,
}

impl StatusError {
    /// Create a new status error
    pub const fn new(status: StatusWord) -> Self {
        Self { status }
    }

    /// Get the status word
    pub const fn status_word(&self) -> StatusWord {
        self.status
    }
}
