use nexum_apdu_codec::{Command, Response, StatusWord};
use proptest::prelude::*;

fn command_strategy(max_data: usize, max_ne: u32) -> impl Strategy<Value = Command> {
    (
        any::<u8>(),
        any::<u8>(),
        any::<u8>(),
        any::<u8>(),
        prop::collection::vec(any::<u8>(), 0..=max_data),
        0..=max_ne,
    )
        .prop_map(|(cla, ins, p1, p2, data, ne)| {
            Command::new_with_data_and_ne(cla, ins, p1, p2, data, ne)
        })
}

proptest! {
    #[test]
    fn standard_command_roundtrip(cmd in command_strategy(255, 256)) {
        let bytes = cmd.to_bytes().unwrap();
        prop_assert!(!cmd.case().is_extended());
        prop_assert_eq!(Command::from_bytes(&bytes).unwrap(), cmd);
    }

    #[test]
    fn extended_command_roundtrip(cmd in command_strategy(600, 65536)) {
        let bytes = cmd.to_bytes().unwrap();
        prop_assert_eq!(Command::from_bytes(&bytes).unwrap(), cmd);
    }

    #[test]
    fn forced_extended_roundtrip(cmd in command_strategy(300, 65536)) {
        prop_assume!(!cmd.data.is_empty() || cmd.ne != 0);
        let bytes = cmd.to_bytes_extended().unwrap();
        prop_assert_eq!(bytes[4], 0x00);
        prop_assert_eq!(Command::from_bytes(&bytes).unwrap(), cmd);
    }

    #[test]
    fn minimal_encoding_is_standard_when_it_fits(cmd in command_strategy(255, 256)) {
        let bytes = cmd.to_bytes().unwrap();
        let expected = 4
            + if cmd.data.is_empty() { 0 } else { 1 + cmd.data.len() }
            + usize::from(cmd.ne > 0);
        prop_assert_eq!(bytes.len(), expected);
    }

    #[test]
    fn response_roundtrip(
        data in prop::collection::vec(any::<u8>(), 0..512),
        sw1 in any::<u8>(),
        sw2 in any::<u8>(),
    ) {
        let resp = Response::new(data, StatusWord::new(sw1, sw2));
        let bytes = resp.to_bytes().unwrap();
        prop_assert_eq!(Response::from_bytes(&bytes).unwrap(), resp.clone());
        prop_assert_eq!(Response::from_hex(&resp.to_hex().unwrap()).unwrap(), resp);
    }

    #[test]
    fn command_hex_roundtrip(cmd in command_strategy(64, 300)) {
        let hex = cmd.to_hex().unwrap();
        prop_assert_eq!(hex.to_uppercase(), hex.clone());
        prop_assert_eq!(Command::from_hex(&hex.to_lowercase()).unwrap(), cmd);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..32)) {
        let _ = Command::from_bytes(&bytes);
        let _ = Response::from_bytes(&bytes);
    }
}
