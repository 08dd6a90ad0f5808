//! Codec Tests
//!
//! Tests for command encoding/decoding:
//! - Zero value omission and field order
//! - Semicolon escaping and escape sequence stripping
//! - Base64 fields
//! - Decode errors

use bytes::Bytes;
use ftwire::protocol::{
    decode_command, encode_command, Action, Compression, FileType, Mtime, Permissions,
    QuietLevel, TransmissionType,
};
use ftwire::{FileTransmissionCommand, FtError};

fn sample_command() -> FileTransmissionCommand {
    FileTransmissionCommand {
        action: Action::Send,
        compression: Compression::Zlib,
        file_type: FileType::Directory,
        transmission_type: TransmissionType::Rsync,
        quiet: QuietLevel::Errors,
        id: "s1".to_string(),
        file_id: "f1".to_string(),
        bypass: "secret".to_string(),
        name: "dir/x".to_string(),
        status: "OK".to_string(),
        parent: "p".to_string(),
        mtime: Mtime::from_nanos(-5),
        permissions: Permissions::from_mode(0o644),
        size: 7,
        data: Bytes::from_static(&[0x00, 0xFF, 0x01]),
    }
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_concrete_scenario() {
    let cmd = FileTransmissionCommand {
        action: Action::File,
        name: "a.txt".to_string(),
        size: 42,
        ..Default::default()
    };

    assert_eq!(encode_command(&cmd, false), "ac=file;n=a.txt;sz=42");
}

#[test]
fn test_encode_with_prefix() {
    let cmd = FileTransmissionCommand {
        action: Action::File,
        name: "a.txt".to_string(),
        size: 42,
        ..Default::default()
    };

    assert_eq!(encode_command(&cmd, true), "5113;ac=file;n=a.txt;sz=42");
}

#[test]
fn test_encode_empty_command() {
    let cmd = FileTransmissionCommand::default();
    assert_eq!(encode_command(&cmd, false), "");
    assert_eq!(encode_command(&cmd, true), "5113");
}

#[test]
fn test_encode_every_field_in_registry_order() {
    assert_eq!(
        encode_command(&sample_command(), false),
        "ac=send;zip=zlib;ft=directory;tt=rsync;q=errors;id=s1;fid=f1;pw=c2VjcmV0;\
         n=dir/x;st=T0s;pr=p;mod=-5;prm=420;sz=7;d=AP8B"
    );
}

#[test]
fn test_encode_zero_enums_omitted() {
    let cmd = FileTransmissionCommand {
        action: Action::Invalid,
        compression: Compression::None,
        file_type: FileType::Regular,
        transmission_type: TransmissionType::Simple,
        quiet: QuietLevel::None,
        id: "x".to_string(),
        ..Default::default()
    };

    assert_eq!(encode_command(&cmd, false), "id=x");
}

#[test]
fn test_encode_escapes_semicolons() {
    let cmd = FileTransmissionCommand {
        name: "a;b".to_string(),
        ..Default::default()
    };
    assert_eq!(encode_command(&cmd, false), "n=a;;b");
}

#[test]
fn test_encode_strips_escape_codes() {
    let cmd = FileTransmissionCommand {
        name: "\x1b[31mred;x\x1b[0m".to_string(),
        parent: "\x1b]0;title\x07dir".to_string(),
        ..Default::default()
    };
    assert_eq!(encode_command(&cmd, false), "n=red;;x;pr=dir");
}

#[test]
fn test_encode_text_that_strips_to_nothing_is_omitted() {
    let cmd = FileTransmissionCommand {
        action: Action::File,
        name: "\x1b[0m".to_string(),
        ..Default::default()
    };
    assert_eq!(encode_command(&cmd, false), "ac=file");
}

#[test]
fn test_encode_base64_text_not_escaped() {
    let cmd = FileTransmissionCommand {
        bypass: "a;b".to_string(),
        ..Default::default()
    };
    assert_eq!(encode_command(&cmd, false), "pw=YTti");
}

#[test]
fn test_encode_base64_text_keeps_escape_codes() {
    let cmd = FileTransmissionCommand {
        status: "\x1b[1m".to_string(),
        ..Default::default()
    };
    let decoded = decode_command(&encode_command(&cmd, false)).unwrap();
    assert_eq!(decoded.status, "\x1b[1m");
}

#[test]
fn test_encode_permissions_masked() {
    let cmd = FileTransmissionCommand {
        permissions: Permissions::from_mode(0o100755),
        ..Default::default()
    };
    assert_eq!(encode_command(&cmd, false), "prm=493");
}

#[test]
fn test_encode_only_file_type_bits_is_omitted() {
    let cmd = FileTransmissionCommand {
        permissions: Permissions::from_mode(0o040000),
        ..Default::default()
    };
    assert_eq!(encode_command(&cmd, false), "");
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_decode_concrete_scenario() {
    let cmd = decode_command("ac=file;n=a.txt;sz=42").unwrap();

    assert_eq!(cmd.action, Action::File);
    assert_eq!(cmd.name, "a.txt");
    assert_eq!(cmd.size, 42);
    assert!(cmd.id.is_empty());
    assert!(cmd.data.is_empty());
}

#[test]
fn test_decode_every_field() {
    let wire = encode_command(&sample_command(), false);
    assert_eq!(decode_command(&wire).unwrap(), sample_command());
}

#[test]
fn test_decode_empty_input() {
    assert!(decode_command("").unwrap().is_empty());
}

#[test]
fn test_decode_bare_prefix_token() {
    assert!(decode_command("5113").unwrap().is_empty());
}

#[test]
fn test_decode_trailing_separator() {
    let with = decode_command("id=abc;n=x;").unwrap();
    let without = decode_command("id=abc;n=x").unwrap();

    assert_eq!(with, without);
    assert_eq!(with.id, "abc");
    assert_eq!(with.name, "x");
}

#[test]
fn test_decode_escaped_semicolons() {
    let cmd = decode_command("n=a;;b;id=1").unwrap();
    assert_eq!(cmd.name, "a;b");
    assert_eq!(cmd.id, "1");
}

#[test]
fn test_decode_escaped_semicolon_at_end_of_value() {
    let cmd = decode_command("n=a;;;id=1").unwrap();
    assert_eq!(cmd.name, "a;");
    assert_eq!(cmd.id, "1");

    let cmd = decode_command("n=a;;").unwrap();
    assert_eq!(cmd.name, "a;");
}

#[test]
fn test_decode_value_containing_equals() {
    let cmd = decode_command("n=k=v;sz=1").unwrap();
    assert_eq!(cmd.name, "k=v");
    assert_eq!(cmd.size, 1);
}

#[test]
fn test_decode_repeated_key_last_wins() {
    let cmd = decode_command("id=a;id=b").unwrap();
    assert_eq!(cmd.id, "b");
}

#[test]
fn test_decode_permissions_masked() {
    let cmd = decode_command("prm=33188").unwrap();
    assert_eq!(cmd.permissions.bits(), 0o644);
}

#[test]
fn test_decode_negative_mtime() {
    let cmd = decode_command("mod=-1000000000").unwrap();
    assert_eq!(cmd.mtime.as_nanos(), -1_000_000_000);
}

#[test]
fn test_decode_empty_data_value() {
    let cmd = decode_command("d=").unwrap();
    assert!(cmd.data.is_empty());
}

#[test]
fn test_decode_does_not_strip_prefix() {
    let result = decode_command("5113;ac=file");
    match result {
        Err(FtError::UnknownField { field }) => assert_eq!(field, "5113;ac"),
        other => panic!("Expected UnknownField, got {:?}", other),
    }
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_round_trip_tricky_text() {
    for name in [";", ";;", "a;", ";a", "a;;;b", "x=y;z", "naïve/файл.txt"] {
        let cmd = FileTransmissionCommand {
            name: name.to_string(),
            parent: name.to_string(),
            id: "i".to_string(),
            ..Default::default()
        };
        let wire = encode_command(&cmd, false);
        assert_eq!(decode_command(&wire).unwrap(), cmd, "wire: {}", wire);
    }
}

#[test]
fn test_round_trip_binary_data() {
    let payload: Vec<u8> = (0..=255).collect();
    let cmd = FileTransmissionCommand::data_chunk("s", "f", Bytes::from(payload.clone()));

    let decoded = decode_command(&encode_command(&cmd, false)).unwrap();
    assert_eq!(decoded.data.as_ref(), payload.as_slice());
    assert_eq!(decoded, cmd);
}

#[test]
fn test_round_trip_large_size() {
    let cmd = FileTransmissionCommand {
        size: u64::MAX,
        mtime: Mtime::from_nanos(i64::MIN),
        ..Default::default()
    };
    assert_eq!(decode_command(&encode_command(&cmd, false)).unwrap(), cmd);
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_unknown_field() {
    match decode_command("zz=1") {
        Err(FtError::UnknownField { field }) => assert_eq!(field, "zz"),
        other => panic!("Expected UnknownField, got {:?}", other),
    }
}

#[test]
fn test_equals_at_key_start_is_not_a_pair() {
    assert!(decode_command("=x").unwrap().is_empty());

    let cmd = decode_command("id=a;=x").unwrap();
    assert_eq!(cmd.id, "a");
    assert!(cmd.name.is_empty());

    match decode_command("=x;id=a") {
        Err(FtError::UnknownField { field }) => assert_eq!(field, "=x;id"),
        other => panic!("Expected UnknownField, got {:?}", other),
    }
}

#[test]
fn test_malformed_base64_data() {
    let err = decode_command("d=not!base64").unwrap_err();
    assert!(matches!(err, FtError::InvalidEncoding { .. }));
    assert_eq!(err.field(), Some("d"));
}

#[test]
fn test_padded_base64_rejected() {
    let err = decode_command("pw=aGk=").unwrap_err();
    assert!(matches!(err, FtError::InvalidEncoding { ref field, .. } if field == "pw"));
}

#[test]
fn test_base64_text_must_be_utf8() {
    let err = decode_command("st=/w").unwrap_err();
    assert!(matches!(err, FtError::InvalidEncoding { ref field, .. } if field == "st"));
}

#[test]
fn test_unrecognized_enum() {
    match decode_command("ac=bogus") {
        Err(FtError::InvalidEnumValue { field, value }) => {
            assert_eq!(field, "ac");
            assert_eq!(value, "bogus");
        }
        other => panic!("Expected InvalidEnumValue, got {:?}", other),
    }
}

#[test]
fn test_enum_match_is_case_sensitive() {
    let err = decode_command("ft=Directory").unwrap_err();
    assert!(matches!(err, FtError::InvalidEnumValue { .. }));
}

#[test]
fn test_invalid_numbers() {
    for wire in [
        "sz=abc",
        "sz=-1",
        "sz=+1",
        "sz=",
        "mod=1.5",
        "prm=rw",
        "prm=+420",
        "prm=99999999999",
    ] {
        let err = decode_command(wire).unwrap_err();
        assert!(
            matches!(err, FtError::InvalidNumber { .. }),
            "{} gave {:?}",
            wire,
            err
        );
    }
}

#[test]
fn test_signed_mtime_accepts_plus() {
    let cmd = decode_command("mod=+5").unwrap();
    assert_eq!(cmd.mtime.as_nanos(), 5);
}

#[test]
fn test_invalid_number_names_field() {
    let err = decode_command("id=a;sz=12x").unwrap_err();
    assert_eq!(err.field(), Some("sz"));
    assert!(err.to_string().contains("\"12x\""));
}

#[test]
fn test_error_aborts_after_valid_fields() {
    let result = decode_command("id=a;n=b;zz=1;sz=3");
    assert!(result.is_err());
}
