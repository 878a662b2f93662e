//! Parsing of command-line hex arguments

use nexum_apdu_codec::StatusWord;

/// Strip whitespace so that `"00 A4 04 00"` and `"00A40400"` are equivalent
pub(crate) fn normalize_hex(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Decode an optional hex payload argument
pub(crate) fn decode_data(arg: &str, input: Option<&str>) -> Result<Vec<u8>, String> {
    input.map_or_else(
        || Ok(Vec::new()),
        |s| hex::decode(normalize_hex(s)).map_err(|e| format!("Invalid {arg} hex: {e}")),
    )
}

/// Parse a single header byte given as hex, with or without a `0x` prefix
pub(crate) fn parse_byte(s: &str) -> Result<u8, String> {
    let digits = strip_prefix(s);
    if digits.is_empty() || digits.len() > 2 {
        return Err(format!("expected one byte in hex, got '{s}'"));
    }
    u8::from_str_radix(digits, 16).map_err(|e| format!("invalid byte '{s}': {e}"))
}

/// Parse a status word given as four hex digits, spaces allowed
pub(crate) fn parse_status_word(s: &str) -> Result<StatusWord, String> {
    let normalized = normalize_hex(s);
    let digits = strip_prefix(&normalized);
    if digits.len() != 4 {
        return Err(format!("expected SW1 SW2 as four hex digits, got '{s}'"));
    }
    u16::from_str_radix(digits, 16)
        .map(StatusWord::from_u16)
        .map_err(|e| format!("invalid status word '{s}': {e}"))
}

fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}
