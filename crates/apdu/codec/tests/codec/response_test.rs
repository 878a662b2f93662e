use nexum_apdu_codec::constants::MAX_LEN_RESPONSE;
use nexum_apdu_codec::{Response, StatusClass, StatusWord};

#[test]
fn status_only_response() {
    let resp = Response::from_bytes(&[0x90, 0x00]).unwrap();
    assert!(resp.data().is_empty());
    assert_eq!(resp.sw1(), 0x90);
    assert_eq!(resp.sw2(), 0x00);
    assert!(resp.is_success());
}

#[test]
fn data_and_status() {
    let resp = Response::from_bytes(&[0x6F, 0x10, 0x84, 0x08, 0x61, 0x10]).unwrap();
    assert_eq!(resp.data().as_ref(), &[0x6F, 0x10, 0x84, 0x08]);
    assert_eq!(resp.status(), StatusWord::new(0x61, 0x10));
    assert!(resp.is_success());
    assert_eq!(resp.status().remaining_bytes(), Some(0x10));
}

#[test]
fn status_bytes_are_not_validated() {
    let resp = Response::from_bytes(&[0x00, 0x00]).unwrap();
    assert_eq!(resp.class(), StatusClass::Unclassified);
    assert_eq!(resp.status().description(), "Unknown status word");
}

#[test]
fn parse_rejects_out_of_range_lengths() {
    assert!(Response::from_bytes(&[0x90]).unwrap_err().is_length_error());
    assert!(
        Response::from_bytes(&vec![0x00; MAX_LEN_RESPONSE + 1])
            .unwrap_err()
            .is_length_error()
    );
}

#[test]
fn serialize_rejects_oversized_data() {
    let resp = Response::new(vec![0x00; 65537], (0x90, 0x00));
    assert!(resp.to_bytes().unwrap_err().is_range_error());

    let resp = Response::new(vec![0x00; 65536], (0x90, 0x00));
    assert_eq!(resp.to_bytes().unwrap().len(), MAX_LEN_RESPONSE);
}

#[test]
fn classification_scenarios() {
    let ok = Response::from_hex("9000").unwrap();
    assert!(ok.is_success());
    assert_eq!(ok.class(), StatusClass::Success);

    let not_found = Response::from_hex("6A88").unwrap();
    assert!(not_found.is_error());
    assert!(!not_found.is_success());
    assert!(!not_found.is_warning());

    let warning = Response::from_hex("6300").unwrap();
    assert!(warning.is_warning());
    assert!(!warning.is_error());
}

#[test]
fn sw1_60_and_66_match_no_predicate() {
    for hex in ["6000", "60FF", "6600", "6681"] {
        let resp = Response::from_hex(hex).unwrap();
        assert!(!resp.is_success(), "{hex}");
        assert!(!resp.is_warning(), "{hex}");
        assert!(!resp.is_error(), "{hex}");
    }
}

#[test]
fn hex_adapter() {
    let resp = Response::from_hex("0102039000").unwrap();
    assert_eq!(resp.to_hex().unwrap(), "0102039000");

    let lower = Response::from_hex("0a0b6a82").unwrap();
    assert_eq!(lower.to_hex().unwrap(), "0A0B6A82");

    assert!(Response::from_hex("90000").unwrap_err().is_hex_error());
    assert!(Response::from_hex("90").unwrap_err().is_length_error());
    assert!(Response::from_hex("9G00").unwrap_err().is_hex_error());

    let too_long = "00".repeat(MAX_LEN_RESPONSE + 1);
    assert!(Response::from_hex(&too_long).unwrap_err().is_length_error());
}
