//! Offsets and length limits shared by the command and response codecs
//!
//! All values follow ISO/IEC 7816-4. Offsets are byte positions within a
//! serialized command APDU.

/// Offset of the class byte (CLA)
pub const OFFSET_CLA: usize = 0;
/// Offset of the instruction byte (INS)
pub const OFFSET_INS: usize = 1;
/// Offset of the first parameter byte (P1)
pub const OFFSET_P1: usize = 2;
/// Offset of the second parameter byte (P2)
pub const OFFSET_P2: usize = 3;

/// Offset of the Lc byte of a standard length command, or of the Le byte of a
/// standard case 2 command
pub const OFFSET_LC_STANDARD: usize = 4;
/// Offset of the two Lc bytes following the zero sentinel of an extended
/// length command
pub const OFFSET_LC_EXTENDED: usize = 5;
/// Offset of the data field of a standard length command
pub const OFFSET_CDATA_STANDARD: usize = 5;
/// Offset of the data field of an extended length command
pub const OFFSET_CDATA_EXTENDED: usize = 7;

/// Length of the command header (CLA, INS, P1, P2)
pub const LEN_HEADER: usize = 4;
/// Length of a standard Lc field
pub const LEN_LC_STANDARD: usize = 1;
/// Length of an extended Lc field, zero sentinel included
pub const LEN_LC_EXTENDED: usize = 3;
/// Length of a standard Le field
pub const LEN_LE_STANDARD: usize = 1;
/// Length of an extended Le field when it follows an extended Lc field
pub const LEN_LE_EXTENDED: usize = 2;
/// Length of the status word trailer of a response
pub const LEN_RESPONSE_TRAILER: usize = 2;

/// Byte that marks an extended length body when it follows the header
pub const EXTENDED_LENGTH_SENTINEL: u8 = 0x00;

/// Maximum command data length in the standard regime
pub const MAX_LEN_COMMAND_DATA_STANDARD: usize = 255;
/// Maximum command data length in the extended regime
pub const MAX_LEN_COMMAND_DATA_EXTENDED: usize = 65535;
/// Maximum expected response length (Ne) in the standard regime
pub const MAX_LEN_RESPONSE_DATA_STANDARD: usize = 256;
/// Maximum expected response length (Ne) in the extended regime
pub const MAX_LEN_RESPONSE_DATA_EXTENDED: usize = 65536;

/// Shortest valid command APDU (case 1, header only)
pub const MIN_LEN_COMMAND: usize = LEN_HEADER;
/// Longest valid command APDU (extended case 4 with maximum data)
pub const MAX_LEN_COMMAND: usize =
    LEN_HEADER + LEN_LC_EXTENDED + MAX_LEN_COMMAND_DATA_EXTENDED + LEN_LE_EXTENDED;
/// Shortest valid response APDU (status word only)
pub const MIN_LEN_RESPONSE: usize = LEN_RESPONSE_TRAILER;
/// Longest valid response APDU
pub const MAX_LEN_RESPONSE: usize = MAX_LEN_RESPONSE_DATA_EXTENDED + LEN_RESPONSE_TRAILER;
