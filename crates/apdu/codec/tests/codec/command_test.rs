use nexum_apdu_codec::constants::{MAX_LEN_COMMAND, MIN_LEN_COMMAND};
use nexum_apdu_codec::{Command, CommandCase, Error, LengthField};

fn decode_hex(s: &str) -> (Command, CommandCase) {
    let bytes = hex::decode(s.replace(' ', "")).unwrap();
    Command::decode(&bytes).unwrap()
}

#[test]
fn case_1_header_only() {
    let (cmd, case) = decode_hex("00 A4 04 00");
    assert_eq!(case, CommandCase::Case1);
    assert_eq!(cmd, Command::new(0x00, 0xA4, 0x04, 0x00));
    assert_eq!(cmd.ne, 0);
}

#[test]
fn case_2_standard_zero_le_means_256() {
    let (cmd, case) = decode_hex("00 A4 04 00 00");
    assert_eq!(case, CommandCase::Case2Standard);
    assert!(cmd.data.is_empty());
    assert_eq!(cmd.ne, 256);
}

#[test]
fn case_3_standard() {
    let (cmd, case) = decode_hex("00 A4 04 00 05 01 02 03 04 05");
    assert_eq!(case, CommandCase::Case3Standard);
    assert_eq!(cmd.data.as_ref(), &[0x01, 0x02, 0x03, 0x04, 0x05]);
    assert_eq!(cmd.ne, 0);
}

#[test]
fn case_4_standard_zero_le_means_256() {
    let (cmd, case) = decode_hex("00 A4 04 00 05 01 02 03 04 05 00");
    assert_eq!(case, CommandCase::Case4Standard);
    assert_eq!(cmd.data.as_ref(), &[0x01, 0x02, 0x03, 0x04, 0x05]);
    assert_eq!(cmd.ne, 256);
}

#[test]
fn case_4_extended_zero_le_means_65536() {
    let (cmd, case) = decode_hex("00 A4 04 00 00 00 03 01 02 03 00 00");
    assert_eq!(case, CommandCase::Case4Extended);
    assert_eq!(cmd.data.as_ref(), &[0x01, 0x02, 0x03]);
    assert_eq!(cmd.ne, 65536);
}

#[test]
fn case_4_extended_nonzero_le() {
    let (cmd, _) = decode_hex("00 A4 04 01 00 00 03 01 02 03 01 01");
    assert_eq!(cmd.ne, 257);
    assert_eq!(cmd.p2, 0x01);
}

#[test]
fn hid_quirk_decodes_as_256() {
    let (cmd, case) = decode_hex("00 A4 04 00 00 00");
    assert_eq!(case, CommandCase::HidQuirk);
    assert_eq!(cmd.ne, 256);
    assert!(cmd.data.is_empty());
}

#[test]
fn hid_quirk_rejects_nonzero_trailing_byte() {
    let err = Command::from_bytes(&[0x00, 0xA4, 0x04, 0x00, 0x00, 0x01]).unwrap_err();
    assert_eq!(
        err,
        Error::EncodingMismatch {
            field: LengthField::Le,
            value: 1,
            body_len: 2,
        }
    );
}

#[test]
fn parse_rejects_out_of_range_lengths() {
    assert!(
        Command::from_bytes(&vec![0x00; MIN_LEN_COMMAND - 1])
            .unwrap_err()
            .is_length_error()
    );
    assert!(
        Command::from_bytes(&vec![0x00; MAX_LEN_COMMAND + 1])
            .unwrap_err()
            .is_length_error()
    );
}

#[test]
fn parse_accepts_largest_command() {
    let cmd = Command::new_with_data_and_ne(0x80, 0xCA, 0x00, 0x00, vec![0x5A; 65535], 65536);
    let bytes = cmd.to_bytes().unwrap();
    assert_eq!(bytes.len(), MAX_LEN_COMMAND);
    assert_eq!(Command::from_bytes(&bytes).unwrap(), cmd);
}

#[test]
fn serialize_rejects_out_of_range_fields() {
    let too_much_data = Command::new_with_data(0x00, 0xD6, 0x00, 0x00, vec![0x00; 65536]);
    assert!(too_much_data.to_bytes().unwrap_err().is_range_error());
    assert!(too_much_data.to_bytes_extended().unwrap_err().is_range_error());

    let too_large_ne = Command::new_with_ne(0x00, 0xB0, 0x00, 0x00, 65537);
    assert!(too_large_ne.to_bytes().unwrap_err().is_range_error());
    assert!(too_large_ne.to_bytes_extended().unwrap_err().is_range_error());
}

#[test]
fn ne_zero_mapping_on_serialize() {
    let standard = Command::new_with_ne(0x00, 0xB0, 0x00, 0x00, 256);
    assert_eq!(standard.to_bytes().unwrap().as_ref(), &[0x00, 0xB0, 0x00, 0x00, 0x00]);

    let extended = Command::new_with_ne(0x00, 0xB0, 0x00, 0x00, 65536);
    assert_eq!(
        extended.to_bytes().unwrap().as_ref(),
        &[0x00, 0xB0, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
}

#[test]
fn forced_extended_round_trips_with_data() {
    let cmd = Command::new_with_data_and_ne(0x00, 0x2A, 0x9E, 0x9A, vec![0xAB; 32], 256);
    let bytes = cmd.to_bytes_extended().unwrap();
    assert_eq!(bytes[4], 0x00);
    assert_eq!(&bytes[5..7], &[0x00, 0x20]);
    assert_eq!(&bytes[bytes.len() - 2..], &[0x01, 0x00]);

    let (parsed, case) = Command::decode(&bytes).unwrap();
    assert_eq!(case, CommandCase::Case4Extended);
    assert_eq!(parsed, cmd);
}

#[test]
fn hex_adapter() {
    let cmd = Command::from_hex("00A40401").unwrap();
    assert_eq!(cmd, Command::new(0x00, 0xA4, 0x04, 0x01));
    assert_eq!(cmd.to_hex().unwrap(), "00A40401");

    assert!(Command::from_hex("000102030").unwrap_err().is_hex_error());
    assert!(Command::from_hex("000102").unwrap_err().is_length_error());
    assert!(Command::from_hex("s:00010203GG").unwrap_err().is_hex_error());

    let too_long = "00".repeat(MAX_LEN_COMMAND + 1);
    assert!(Command::from_hex(&too_long).unwrap_err().is_length_error());
}
