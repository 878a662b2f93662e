//! Display utilities for the APDU tool

use colored::Colorize;
use nexum_apdu_codec::{Command, CommandCase, Response, StatusClass};

/// Format a titled block of key-value lines
pub(crate) fn key_value_box(title: &str, items: Vec<(&str, String)>) -> String {
    let mut result = format!("{}", title.bold().underline());

    for (key, value) in items {
        result.push_str(&format!("\n  {}: {}", key.bold(), value));
    }

    result
}

/// Render a byte slice as spaced upper-case hex, or `none` when empty
pub(crate) fn spaced_hex(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "none".dimmed().to_string();
    }
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Describe a decoded command APDU
pub(crate) fn command_details(command: &Command, case: CommandCase) -> String {
    let ne = if command.ne == 0 {
        "none".dimmed().to_string()
    } else {
        command.ne.to_string()
    };

    key_value_box(
        "Command APDU",
        vec![
            ("Case", case.to_string()),
            ("CLA", format!("{:02X}", command.cla)),
            ("INS", format!("{:02X}", command.ins)),
            ("P1", format!("{:02X}", command.p1)),
            ("P2", format!("{:02X}", command.p2)),
            (
                "Data",
                format!("{} ({} bytes)", spaced_hex(&command.data), command.data.len()),
            ),
            ("Ne", ne),
        ],
    )
}

/// Describe a decoded response APDU, coloring the status by its class
pub(crate) fn response_details(response: &Response) -> String {
    let status = response.status();
    let class = match status.class() {
        StatusClass::Success => status.class().to_string().green(),
        StatusClass::Warning => status.class().to_string().yellow(),
        StatusClass::Error => status.class().to_string().red(),
        StatusClass::Unclassified => status.class().to_string().normal(),
    };

    key_value_box(
        "Response APDU",
        vec![
            (
                "Data",
                format!(
                    "{} ({} bytes)",
                    spaced_hex(response.data()),
                    response.data().len()
                ),
            ),
            ("Status", status.to_string()),
            ("Class", class.to_string()),
            ("Meaning", status.description().to_string()),
        ],
    )
}
