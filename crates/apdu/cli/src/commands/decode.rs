//! Commands for decoding APDUs

use std::error::Error;

use nexum_apdu_codec::{Command, Response, ResultExt};
use tracing::{Level, debug, info, warn};

use crate::utils::{display, input};

/// Decode a command APDU and display its fields
pub(crate) fn parse_command(hex: &str) -> Result<(), Box<dyn Error>> {
    let (command, case) = Command::decode_hex(&input::normalize_hex(hex))
        .context("Failed to parse command APDU")?;

    debug!(%case, summary = %command.summary(), "Decoded command APDU");
    println!("{}", display::command_details(&command, case));

    Ok(())
}

/// Decode a response APDU and display its status
pub(crate) fn parse_response(hex: &str) -> Result<(), Box<dyn Error>> {
    let response = Response::from_hex(&input::normalize_hex(hex))
        .context("Failed to parse response APDU")?;

    let summary = response.summary();
    let level = response.status().tracing_level();
    if level == Level::DEBUG {
        debug!(%summary, "Decoded response APDU");
    } else if level == Level::INFO {
        info!(%summary, "Response APDU carries a warning");
    } else {
        warn!(%summary, "Response APDU reports an error");
    }

    println!("{}", display::response_details(&response));

    Ok(())
}
