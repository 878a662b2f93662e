//! APDU command definitions and traits
//!
//! This module provides the command APDU value type and its codec
//! according to ISO/IEC 7816-4, including extended length encodings.

mod case;

pub use case::CommandCase;

use std::str::FromStr;

use bytes::{BufMut, Bytes, BytesMut};
use derive_more::Display;
use tracing::trace;

use crate::constants::*;
use crate::error::{ApduKind, Error, Field, Result};
use crate::hex_string;
use case::read_u16;

/// Expected response length (Ne), decoded from the Le field
///
/// Zero means no response data is expected. The largest value is 65536.
pub type ExpectedLength = u32;

/// Core trait for APDU commands
///
/// Typed commands describe their header, data and Ne; serialization is
/// provided through [`Command`].
pub trait ApduCommand {
    /// Command class (CLA)
    fn class(&self) -> u8;

    /// Instruction code (INS)
    fn instruction(&self) -> u8;

    /// First parameter (P1)
    fn p1(&self) -> u8;

    /// Second parameter (P2)
    fn p2(&self) -> u8;

    /// Command payload data, empty when there is none
    fn data(&self) -> &[u8] {
        &[]
    }

    /// Expected response length (Ne), zero when no response data is expected
    fn expected_length(&self) -> ExpectedLength {
        0
    }

    /// Convert to a generic Command
    fn to_command(&self) -> Command {
        Command {
            cla: self.class(),
            ins: self.instruction(),
            p1: self.p1(),
            p2: self.p2(),
            data: Bytes::copy_from_slice(self.data()),
            ne: self.expected_length(),
        }
    }

    /// Convert to raw APDU bytes using the shortest encoding
    fn to_bytes(&self) -> Result<Bytes> {
        self.to_command().to_bytes()
    }

    /// Convert to raw APDU bytes forcing the extended length encoding
    fn to_bytes_extended(&self) -> Result<Bytes> {
        self.to_command().to_bytes_extended()
    }
}

/// Generic APDU command structure
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    /// Command class byte
    pub cla: u8,
    /// Instruction byte
    pub ins: u8,
    /// Parameter 1
    pub p1: u8,
    /// Parameter 2
    pub p2: u8,
    /// Command data, empty when absent
    pub data: Bytes,
    /// Expected response length (Ne), zero when absent
    pub ne: ExpectedLength,
}

impl Command {
    /// Create a new command with just the header bytes
    pub const fn new(cla: u8, ins: u8, p1: u8, p2: u8) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: Bytes::new(),
            ne: 0,
        }
    }

    /// Create a new command with an expected response length
    pub const fn new_with_ne(cla: u8, ins: u8, p1: u8, p2: u8, ne: ExpectedLength) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: Bytes::new(),
            ne,
        }
    }

    /// Create a new command with data payload
    pub fn new_with_data<T: Into<Bytes>>(cla: u8, ins: u8, p1: u8, p2: u8, data: T) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: data.into(),
            ne: 0,
        }
    }

    /// Create a new command with both data and expected response length
    pub fn new_with_data_and_ne<T: Into<Bytes>>(
        cla: u8,
        ins: u8,
        p1: u8,
        p2: u8,
        data: T,
        ne: ExpectedLength,
    ) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: data.into(),
            ne,
        }
    }

    /// Set the data field
    pub fn with_data<T: Into<Bytes>>(mut self, data: T) -> Self {
        self.data = data.into();
        self
    }

    /// Set the expected response length
    pub const fn with_ne(mut self, ne: ExpectedLength) -> Self {
        self.ne = ne;
        self
    }

    /// Whether the shortest encoding of this command needs extended length
    /// fields (data longer than 255 bytes or Ne above 256)
    pub const fn is_extended_length(&self) -> bool {
        self.data.len() > MAX_LEN_COMMAND_DATA_STANDARD
            || self.ne as usize > MAX_LEN_RESPONSE_DATA_STANDARD
    }

    /// The case [`Command::to_bytes`] encodes this command as
    pub const fn case(&self) -> CommandCase {
        match (
            self.data.is_empty(),
            self.ne == 0,
            self.is_extended_length(),
        ) {
            (true, true, _) => CommandCase::Case1,
            (true, false, false) => CommandCase::Case2Standard,
            (true, false, true) => CommandCase::Case2Extended,
            (false, true, false) => CommandCase::Case3Standard,
            (false, true, true) => CommandCase::Case3Extended,
            (false, false, false) => CommandCase::Case4Standard,
            (false, false, true) => CommandCase::Case4Extended,
        }
    }

    /// Parse a command from raw bytes
    pub fn from_bytes(apdu: &[u8]) -> Result<Self> {
        Self::decode(apdu).map(|(command, _)| command)
    }

    /// Parse a command from raw bytes, also reporting the case it was
    /// encoded in
    pub fn decode(apdu: &[u8]) -> Result<(Self, CommandCase)> {
        let case = CommandCase::detect(apdu)?;
        let len = apdu.len();

        let mut command = Self::new(
            apdu[OFFSET_CLA],
            apdu[OFFSET_INS],
            apdu[OFFSET_P1],
            apdu[OFFSET_P2],
        );

        // Lc has already been checked against the body, so the data field
        // always ends where the Le field (if any) begins
        match case {
            CommandCase::Case1 => {}
            CommandCase::Case2Standard => {
                command.ne = decode_le_standard(apdu[OFFSET_LC_STANDARD]);
            }
            CommandCase::Case2Extended => {
                command.ne = decode_le_extended(read_u16(apdu, OFFSET_LC_EXTENDED));
            }
            CommandCase::HidQuirk => {
                command.ne = MAX_LEN_RESPONSE_DATA_STANDARD as ExpectedLength;
            }
            CommandCase::Case3Standard => {
                command.data = Bytes::copy_from_slice(&apdu[OFFSET_CDATA_STANDARD..]);
            }
            CommandCase::Case4Standard => {
                command.data =
                    Bytes::copy_from_slice(&apdu[OFFSET_CDATA_STANDARD..len - LEN_LE_STANDARD]);
                command.ne = decode_le_standard(apdu[len - 1]);
            }
            CommandCase::Case3Extended => {
                command.data = Bytes::copy_from_slice(&apdu[OFFSET_CDATA_EXTENDED..]);
            }
            CommandCase::Case4Extended => {
                command.data =
                    Bytes::copy_from_slice(&apdu[OFFSET_CDATA_EXTENDED..len - LEN_LE_EXTENDED]);
                command.ne = decode_le_extended(read_u16(apdu, len - LEN_LE_EXTENDED));
            }
        }

        trace!(%case, command = %command.summary(), "Parsed command APDU");

        Ok((command, case))
    }

    /// Parse a command from its hex representation
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::decode_hex(s).map(|(command, _)| command)
    }

    /// Parse a command from its hex representation, also reporting the case
    /// it was encoded in
    pub fn decode_hex(s: &str) -> Result<(Self, CommandCase)> {
        let bytes =
            hex_string::decode_bounded(ApduKind::Command, s, MIN_LEN_COMMAND, MAX_LEN_COMMAND)?;
        Self::decode(&bytes)
    }

    /// Convert to raw APDU bytes using the shortest encoding
    ///
    /// Extended length fields are only used when the data is longer than 255
    /// bytes or Ne is above 256.
    pub fn to_bytes(&self) -> Result<Bytes> {
        self.check_limits()?;
        Ok(self.encode(self.case()))
    }

    /// Convert to raw APDU bytes forcing the extended length encoding
    ///
    /// The three byte Lc field is always present. Le follows whenever Ne is
    /// non-zero, and also when there is no data at all: the body after the
    /// sentinel must not be ambiguous, so an empty command carries Le `00 00`
    /// and decodes with Ne = 65536.
    pub fn to_bytes_extended(&self) -> Result<Bytes> {
        self.check_limits()?;

        let case = if self.ne == 0 && !self.data.is_empty() {
            CommandCase::Case3Extended
        } else {
            CommandCase::Case4Extended
        };
        Ok(self.encode(case))
    }

    /// Upper-case hex representation of [`Command::to_bytes`]
    pub fn to_hex(&self) -> Result<String> {
        self.to_bytes().map(hex_string::encode_upper)
    }

    /// Summary for diagnostics: header and Ne, data is reduced to its length
    pub fn summary(&self) -> CommandSummary {
        CommandSummary {
            cla: self.cla,
            ins: self.ins,
            p1: self.p1,
            p2: self.p2,
            ne: self.ne,
            data_len: self.data.len(),
        }
    }

    fn check_limits(&self) -> Result<()> {
        if self.data.len() > MAX_LEN_COMMAND_DATA_EXTENDED {
            return Err(Error::out_of_range(
                Field::CommandData,
                self.data.len(),
                MAX_LEN_COMMAND_DATA_EXTENDED,
            ));
        }

        if self.ne as usize > MAX_LEN_RESPONSE_DATA_EXTENDED {
            return Err(Error::out_of_range(
                Field::ExpectedLength,
                self.ne as usize,
                MAX_LEN_RESPONSE_DATA_EXTENDED,
            ));
        }

        Ok(())
    }

    /// Serialize in the layout of `case`; limits must already be checked
    fn encode(&self, case: CommandCase) -> Bytes {
        let data_len = self.data.len();
        let mut buffer = BytesMut::with_capacity(case.encoded_len(data_len));

        // Header: CLA, INS, P1, P2
        buffer.put_u8(self.cla);
        buffer.put_u8(self.ins);
        buffer.put_u8(self.p1);
        buffer.put_u8(self.p2);

        match case {
            CommandCase::Case1 => {}
            CommandCase::Case2Standard => {
                buffer.put_u8(self.le_standard());
            }
            CommandCase::Case2Extended => {
                buffer.put_u8(EXTENDED_LENGTH_SENTINEL);
                buffer.put_u16(self.le_extended());
            }
            CommandCase::HidQuirk => {
                buffer.put_u8(EXTENDED_LENGTH_SENTINEL);
                buffer.put_u8(0x00);
            }
            CommandCase::Case3Standard | CommandCase::Case4Standard => {
                buffer.put_u8(data_len as u8);
                buffer.put_slice(&self.data);
                if case == CommandCase::Case4Standard {
                    buffer.put_u8(self.le_standard());
                }
            }
            CommandCase::Case3Extended | CommandCase::Case4Extended => {
                buffer.put_u8(EXTENDED_LENGTH_SENTINEL);
                buffer.put_u16(data_len as u16);
                buffer.put_slice(&self.data);
                if case == CommandCase::Case4Extended {
                    buffer.put_u16(self.le_extended());
                }
            }
        }

        trace!(%case, len = buffer.len(), "Serialized command APDU");

        buffer.freeze()
    }

    /// Le byte, 256 is sent as zero
    const fn le_standard(&self) -> u8 {
        if self.ne as usize == MAX_LEN_RESPONSE_DATA_STANDARD {
            0x00
        } else {
            self.ne as u8
        }
    }

    /// Le bytes, 65536 is sent as zero
    const fn le_extended(&self) -> u16 {
        if self.ne as usize == MAX_LEN_RESPONSE_DATA_EXTENDED {
            0x0000
        } else {
            self.ne as u16
        }
    }
}

const fn decode_le_standard(le: u8) -> ExpectedLength {
    match le {
        0x00 => MAX_LEN_RESPONSE_DATA_STANDARD as ExpectedLength,
        le => le as ExpectedLength,
    }
}

const fn decode_le_extended(le: u16) -> ExpectedLength {
    match le {
        0x0000 => MAX_LEN_RESPONSE_DATA_EXTENDED as ExpectedLength,
        le => le as ExpectedLength,
    }
}

impl ApduCommand for Command {
    fn class(&self) -> u8 {
        self.cla
    }

    fn instruction(&self) -> u8 {
        self.ins
    }

    fn p1(&self) -> u8 {
        self.p1
    }

    fn p2(&self) -> u8 {
        self.p2
    }

    fn data(&self) -> &[u8] {
        &self.data
    }

    fn expected_length(&self) -> ExpectedLength {
        self.ne
    }

    fn to_command(&self) -> Command {
        self.clone()
    }
}

impl TryFrom<&[u8]> for Command {
    type Error = Error;

    fn try_from(apdu: &[u8]) -> Result<Self> {
        Self::from_bytes(apdu)
    }
}

impl TryFrom<Bytes> for Command {
    type Error = Error;

    fn try_from(apdu: Bytes) -> Result<Self> {
        Self::from_bytes(&apdu)
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

/// Diagnostic view of a [`Command`]
///
/// Renders as `CLA INS P1 P2 (Ne)` followed by the data length. Not a wire
/// format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("{cla:02X} {ins:02X} {p1:02X} {p2:02X} ({ne}) data_len={data_len}")]
pub struct CommandSummary {
    /// Command class byte
    pub cla: u8,
    /// Instruction byte
    pub ins: u8,
    /// Parameter 1
    pub p1: u8,
    /// Parameter 2
    pub p2: u8,
    /// Expected response length
    pub ne: ExpectedLength,
    /// Length of the command data
    pub data_len: usize,
}
