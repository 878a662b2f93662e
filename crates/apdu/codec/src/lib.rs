//! ISO/IEC 7816-4 APDU codec
//!
//! This crate parses and serializes the two messages exchanged between a
//! host and a smart card: the command APDU and the response APDU.
//!
//! ## Overview
//!
//! - [`Command`] covers the four ISO cases in both the standard and the
//!   extended length regime. [`Command::to_bytes`] picks the shortest
//!   encoding, [`Command::to_bytes_extended`] always uses extended length
//!   fields.
//! - [`Response`] splits the response data from its [`StatusWord`] and
//!   classifies the status as success, warning or error.
//! - Both units have hex-string adapters (`from_hex` / `to_hex`) and a
//!   summary view for diagnostics.
//!
//! All operations are pure functions over byte buffers. Moving bytes to and
//! from a card reader is left to the caller.
//!
//! ```
//! use nexum_apdu_codec::{Command, CommandCase, Response};
//!
//! let (select, case) = Command::decode(&[0x00, 0xA4, 0x04, 0x00, 0x00]).unwrap();
//! assert_eq!(case, CommandCase::Case2Standard);
//! assert_eq!(select.ne, 256);
//!
//! let response = Response::from_hex("6A88").unwrap();
//! assert!(response.is_error());
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

// Re-export bytes for convenience
pub use bytes::{Bytes, BytesMut};

pub mod command;
pub mod constants;
pub mod response;

mod error;
mod hex_string;

pub use command::{ApduCommand, Command, CommandCase, CommandSummary, ExpectedLength};
pub use error::{ApduKind, Error, Field, HexError, LengthField, Result, ResultExt};
pub use response::status::{StatusClass, StatusWord};
pub use response::{Response, ResponseSummary, StatusError};

/// Prelude module containing commonly used traits and types
pub mod prelude {
    pub use crate::{
        ApduCommand, Bytes, Command, CommandCase, Error, ExpectedLength, Response, Result,
        ResultExt, StatusClass, StatusWord, response::status::common as status,
    };
}
