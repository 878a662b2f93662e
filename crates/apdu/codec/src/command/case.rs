//! ISO/IEC 7816-4 command cases
//!
//! A command APDU carries no tag describing its layout. The case and length
//! regime follow from the total length, the byte right after the header and
//! the embedded Lc field. [`CommandCase::detect`] is that decision tree.

use derive_more::Display;
use tracing::debug;

use crate::constants::*;
use crate::error::{ApduKind, Error, LengthField, Result};

/// Layout of a serialized command APDU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CommandCase {
    /// `CLA INS P1 P2`
    #[display("case 1")]
    Case1,
    /// `CLA INS P1 P2 | Le`
    #[display("case 2 (standard)")]
    Case2Standard,
    /// `CLA INS P1 P2 | 00 Le Le`
    #[display("case 2 (extended)")]
    Case2Extended,
    /// `CLA INS P1 P2 | Lc | data`
    #[display("case 3 (standard)")]
    Case3Standard,
    /// `CLA INS P1 P2 | 00 Lc Lc | data`
    #[display("case 3 (extended)")]
    Case3Extended,
    /// `CLA INS P1 P2 | Lc | data | Le`
    #[display("case 4 (standard)")]
    Case4Standard,
    /// `CLA INS P1 P2 | 00 Lc Lc | data | Le Le`
    #[display("case 4 (extended)")]
    Case4Extended,
    /// `CLA INS P1 P2 | 00 00`, sent by some broken HID reader firmware in
    /// place of a standard case 2 command with Ne = 256
    #[display("case 2 (HID quirk)")]
    HidQuirk,
}

impl CommandCase {
    /// Determine the case of a serialized command APDU
    ///
    /// Besides picking the case this validates the total length and the Lc
    /// field, so the byte offsets of a returned case can be sliced without
    /// further checks. The HID quirk still requires its final byte to be zero;
    /// that is checked here too.
    pub fn detect(apdu: &[u8]) -> Result<Self> {
        let len = apdu.len();
        if !(MIN_LEN_COMMAND..=MAX_LEN_COMMAND).contains(&len) {
            debug!(len, "Command APDU length out of range");
            return Err(Error::invalid_length(
                ApduKind::Command,
                len,
                MIN_LEN_COMMAND,
                MAX_LEN_COMMAND,
            ));
        }

        if len == LEN_HEADER {
            return Ok(Self::Case1);
        }

        if len == LEN_HEADER + LEN_LE_STANDARD {
            return Ok(Self::Case2Standard);
        }

        let body_len = len - LEN_HEADER;

        if apdu[OFFSET_LC_STANDARD] == EXTENDED_LENGTH_SENTINEL {
            if len == LEN_HEADER + LEN_LC_EXTENDED {
                return Ok(Self::Case2Extended);
            }

            if len == LEN_HEADER + 2 {
                let le = apdu[len - 1];
                if le != 0x00 {
                    debug!(le, "Rejecting non-zero Le in HID quirk command");
                    return Err(Error::mismatch(LengthField::Le, le as usize, body_len));
                }
                return Ok(Self::HidQuirk);
            }

            let lc = read_u16(apdu, OFFSET_LC_EXTENDED) as usize;
            return if lc == body_len - LEN_LC_EXTENDED {
                Ok(Self::Case3Extended)
            } else if lc + LEN_LC_EXTENDED + LEN_LE_EXTENDED == body_len {
                Ok(Self::Case4Extended)
            } else {
                debug!(lc, body_len, "Extended Lc does not match command body");
                Err(Error::mismatch(LengthField::Lc, lc, body_len))
            };
        }

        let lc = apdu[OFFSET_LC_STANDARD] as usize;
        if lc == body_len - LEN_LC_STANDARD {
            Ok(Self::Case3Standard)
        } else if lc + LEN_LC_STANDARD + LEN_LE_STANDARD == body_len {
            Ok(Self::Case4Standard)
        } else {
            debug!(lc, body_len, "Standard Lc does not match command body");
            Err(Error::mismatch(LengthField::Lc, lc, body_len))
        }
    }

    /// Whether this case uses the extended length regime
    pub const fn is_extended(self) -> bool {
        matches!(
            self,
            Self::Case2Extended | Self::Case3Extended | Self::Case4Extended
        )
    }

    /// Whether this case carries an Lc field and command data
    pub const fn has_data(self) -> bool {
        matches!(
            self,
            Self::Case3Standard | Self::Case3Extended | Self::Case4Standard | Self::Case4Extended
        )
    }

    /// Whether this case carries an Le field
    pub const fn has_le(self) -> bool {
        matches!(
            self,
            Self::Case2Standard
                | Self::Case2Extended
                | Self::Case4Standard
                | Self::Case4Extended
                | Self::HidQuirk
        )
    }

    /// Number of bytes a command in this case occupies on the wire
    pub const fn encoded_len(self, data_len: usize) -> usize {
        LEN_HEADER
            + match self {
                Self::Case1 => 0,
                Self::Case2Standard => LEN_LE_STANDARD,
                Self::Case2Extended => LEN_LC_EXTENDED,
                Self::Case3Standard => LEN_LC_STANDARD + data_len,
                Self::Case3Extended => LEN_LC_EXTENDED + data_len,
                Self::Case4Standard => LEN_LC_STANDARD + data_len + LEN_LE_STANDARD,
                Self::Case4Extended => LEN_LC_EXTENDED + data_len + LEN_LE_EXTENDED,
                Self::HidQuirk => 2,
            }
    }
}

/// Read a big-endian u16 at `offset`
pub(crate) fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([bytes[offset], bytes[offset + 1]])
}
