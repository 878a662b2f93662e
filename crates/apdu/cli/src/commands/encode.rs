//! Commands for encoding APDUs

use std::error::Error;

use nexum_apdu_codec::{Command, ExpectedLength, Response, ResultExt, StatusWord};
use tracing::debug;

use super::EncodingMode;
use crate::utils::input;

/// Build a command APDU from its fields and print the encoding
pub(crate) fn encode_command(
    header: [u8; 4],
    data: Option<&str>,
    ne: ExpectedLength,
    mode: EncodingMode,
) -> Result<(), Box<dyn Error>> {
    let [cla, ins, p1, p2] = header;
    let data = input::decode_data("--data", data)?;
    let command = Command::new_with_data_and_ne(cla, ins, p1, p2, data, ne);

    debug!(?mode, case = %command.case(), summary = %command.summary(), "Encoding command APDU");
    let bytes = mode
        .encode(&command)
        .context("Failed to encode command APDU")?;

    println!("{}", hex::encode_upper(bytes));

    Ok(())
}

/// Build a response APDU and print the encoding
pub(crate) fn encode_response(data: Option<&str>, sw: StatusWord) -> Result<(), Box<dyn Error>> {
    let data = input::decode_data("--data", data)?;
    let response = Response::new(data, sw);

    debug!(summary = %response.summary(), "Encoding response APDU");
    let hex = response
        .to_hex()
        .context("Failed to encode response APDU")?;

    println!("{hex}");

    Ok(())
}
