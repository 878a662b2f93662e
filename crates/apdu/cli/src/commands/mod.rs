//! Subcommands of the APDU tool

use clap::Subcommand;
use nexum_apdu_codec::{Bytes, Command, ExpectedLength, Result, StatusWord};

mod decode;
mod encode;

pub(crate) use decode::{parse_command, parse_response};
pub(crate) use encode::{encode_command, encode_response};

use crate::utils::input::{parse_byte, parse_status_word};

/// Define subcommands for the CLI
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Decode a command APDU and show its fields
    ParseCommand {
        /// Command APDU in hex, whitespace is ignored
        #[arg(required = true, num_args = 1..)]
        hex: Vec<String>,
    },

    /// Decode a response APDU and classify its status word
    ParseResponse {
        /// Response APDU in hex, whitespace is ignored
        #[arg(required = true, num_args = 1..)]
        hex: Vec<String>,
    },

    /// Encode a command APDU and print it as hex
    EncodeCommand {
        /// Class byte
        #[arg(long, value_parser = parse_byte)]
        cla: u8,

        /// Instruction byte
        #[arg(long, value_parser = parse_byte)]
        ins: u8,

        /// Parameter 1
        #[arg(long, value_parser = parse_byte)]
        p1: u8,

        /// Parameter 2
        #[arg(long, value_parser = parse_byte)]
        p2: u8,

        /// Command data in hex
        #[arg(long)]
        data: Option<String>,

        /// Expected response length (0 to 65536)
        #[arg(long, default_value_t = 0)]
        ne: ExpectedLength,

        /// Always use extended length fields
        #[arg(long)]
        extended: bool,
    },

    /// Encode a response APDU and print it as hex
    EncodeResponse {
        /// Response data in hex
        #[arg(long)]
        data: Option<String>,

        /// Status word, e.g. 9000
        #[arg(long, value_parser = parse_status_word)]
        sw: StatusWord,
    },
}

/// How a command APDU is serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum EncodingMode {
    /// Shortest encoding that can represent the command
    #[default]
    Minimal,
    /// Extended length fields regardless of size
    Extended,
}

impl EncodingMode {
    pub(crate) const fn from_flag(extended: bool) -> Self {
        if extended {
            Self::Extended
        } else {
            Self::Minimal
        }
    }

    pub(crate) fn encode(self, command: &Command) -> Result<Bytes> {
        match self {
            Self::Minimal => command.to_bytes(),
            Self::Extended => command.to_bytes_extended(),
        }
    }
}
