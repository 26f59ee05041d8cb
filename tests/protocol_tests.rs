//! Protocol Tests
//!
//! Tests verify:
//! - Command payload decoding, including unknown actions and missing fields
//! - Producer-side validation
//! - Exact outcome line formats
//! - Test data parsing and log verification

use orderkv::protocol::{
    decode_command, decode_line, encode_command, parse_test_data, verify_outcomes, Action,
    Command, ExpectedResponse, Outcome, TestDataAction,
};
use orderkv::OrderKvError;

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_decode_add() {
    let command = decode_command(br#"{"Action":"add","Key":"foo","Value":"bar"}"#).unwrap();
    assert_eq!(command, Command::add("foo", "bar"));
}

#[test]
fn test_decode_get_all_without_key() {
    let command = decode_command(br#"{"Action":"getAll"}"#).unwrap();
    assert_eq!(command.action(), &Action::GetAll);
    assert_eq!(command.key(), "");
    assert_eq!(command.value(), "");
}

#[test]
fn test_decode_lowercase_field_names() {
    let command = decode_line(r#"  {"action":"remove","key":"foo"}  "#).unwrap();
    assert_eq!(command, Command::remove("foo"));
}

#[test]
fn test_decode_field_names_ignore_case() {
    let command = decode_command(br#"{"ACTION":"add","KEY":"k","vAlUe":"v"}"#).unwrap();
    assert_eq!(command, Command::add("k", "v"));
}

#[test]
fn test_decode_null_and_extra_fields() {
    let command =
        decode_command(br#"{"Action":"get","Key":"k","Value":null,"Trace":{"id":[1,2]}}"#)
            .unwrap();
    assert_eq!(command, Command::get("k"));
}

#[test]
fn test_decode_later_duplicate_field_wins() {
    let command = decode_command(br#"{"Action":"get","Key":"first","key":"second"}"#).unwrap();
    assert_eq!(command.key(), "second");
}

#[test]
fn test_decode_unknown_action_is_not_an_error() {
    let command = decode_command(br#"{"Action":"flush","Key":"foo"}"#).unwrap();
    assert_eq!(command.action(), &Action::Unknown("flush".to_string()));
    assert!(!command.action().is_known());
}

#[test]
fn test_decode_missing_action_is_unknown() {
    let command = decode_command(br#"{"Key":"foo"}"#).unwrap();
    assert_eq!(command.action(), &Action::Unknown(String::new()));
}

#[test]
fn test_decode_malformed_payload() {
    let err = decode_command(b"{not json").unwrap_err();
    assert!(matches!(err, OrderKvError::Decode(_)));
}

#[test]
fn test_decode_wrong_field_type() {
    let err = decode_command(br#"{"Action":"add","Key":7,"Value":"x"}"#).unwrap_err();
    assert!(matches!(err, OrderKvError::Decode(_)));
}

#[test]
fn test_encode_uses_wire_field_names() {
    let payload = encode_command(&Command::get_all()).unwrap();
    assert_eq!(
        String::from_utf8(payload).unwrap(),
        r#"{"Action":"getAll","Key":"","Value":""}"#
    );
}

#[test]
fn test_action_names() {
    for name in ["add", "remove", "get", "getAll"] {
        let action = Action::from(name);
        assert!(action.is_known());
        assert_eq!(action.as_str(), name);
        assert_eq!(String::from(action), name);
    }
    assert_eq!(Action::from("GETALL"), Action::Unknown("GETALL".to_string()));
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_validate_accepts_complete_commands() {
    assert!(Command::add("k", "v").validate().is_ok());
    assert!(Command::remove("k").validate().is_ok());
    assert!(Command::get("k").validate().is_ok());
    assert!(Command::get_all().validate().is_ok());
}

#[test]
fn test_validate_rejects_incomplete_commands() {
    for command in [
        Command::new("bogus", "k", "v"),
        Command::add("", "v"),
        Command::add("k", ""),
        Command::remove(""),
        Command::get(""),
    ] {
        let err = command.validate().unwrap_err();
        assert!(matches!(err, OrderKvError::InvalidCommand(_)), "{:?}", command);
    }
}

// =============================================================================
// Outcome Line Tests
// =============================================================================

#[test]
fn test_outcome_lines() {
    let cases = [
        (
            Outcome::Added { key: "foo".into(), value: "bar".into() },
            "[add] Added key foo with value bar",
        ),
        (Outcome::Removed { key: "foo".into() }, "[remove] key foo"),
        (
            Outcome::RemoveMissing { key: "foo".into() },
            "[remove] key foo doesn't exist",
        ),
        (
            Outcome::Found { key: "foo".into(), value: "bar".into() },
            "[get] Got key foo with value bar",
        ),
        (Outcome::NotFound { key: "foo".into() }, "[get] Key foo doesn't exist"),
    ];

    for (outcome, line) in cases {
        assert_eq!(outcome.to_string(), line);
    }
}

#[test]
fn test_listing_line_preserves_order() {
    let outcome = Outcome::Listing(vec![
        ("foo".to_string(), "bar".to_string()),
        ("baz".to_string(), "qux".to_string()),
    ]);
    assert_eq!(outcome.to_string(), r#"[getAll] All values ["foo=bar","baz=qux"]"#);
    assert_eq!(outcome.action(), Action::GetAll);
}

#[test]
fn test_empty_listing_line() {
    assert_eq!(Outcome::Listing(vec![]).to_string(), "[getAll] All values []");
}

#[test]
fn test_listing_line_keeps_html_characters() {
    let outcome = Outcome::Listing(vec![("<a>".to_string(), "x&y".to_string())]);
    assert_eq!(outcome.to_string(), r#"[getAll] All values ["<a>=x&y"]"#);
}

#[test]
fn test_listing_line_escapes_quotes() {
    let outcome = Outcome::Listing(vec![("k".to_string(), "say \"hi\"".to_string())]);
    assert_eq!(outcome.to_string(), r#"[getAll] All values ["k=say \"hi\""]"#);
}

// =============================================================================
// Test Data Tests
// =============================================================================

const TEST_DATA: &str = r#"{"RequestData":{"Action":"add","Key":"key3","Value":"value3"},"ExpectedResponse":null}
{"RequestData":{"Action":"add","Key":"key1","Value":"value1"},"ExpectedResponse":null}
{"RequestData":{"Action":"get","Key":"key3","Value":"value3"},"ExpectedResponse":"value3"}
{"RequestData":{"Action":"remove","Key":"key9","Value":""},"ExpectedResponse":null}
{"RequestData":{"Action":"get","Key":"key9","Value":""},"ExpectedResponse":null}
{"RequestData":{"Action":"getAll","Key":"key2","Value":""},"ExpectedResponse":{"key3":"value3","key1":"value1"}}
"#;

#[test]
fn test_parse_test_data() {
    let actions = parse_test_data(TEST_DATA.as_bytes()).unwrap();
    assert_eq!(actions.len(), 6);

    assert_eq!(actions[0].request, Command::add("key3", "value3"));
    assert_eq!(actions[0].expected, ExpectedResponse::Absent);
    assert_eq!(actions[2].expected, ExpectedResponse::Value("value3".to_string()));
    assert_eq!(
        actions[5].expected,
        ExpectedResponse::Listing(vec![
            ("key3".to_string(), "value3".to_string()),
            ("key1".to_string(), "value1".to_string()),
        ])
    );
}

#[test]
fn test_parse_test_data_missing_expected_response() {
    let actions =
        parse_test_data(r#"{"RequestData":{"Action":"add","Key":"a","Value":"1"}}"#.as_bytes())
            .unwrap();
    assert_eq!(actions[0].expected, ExpectedResponse::Absent);
}

#[test]
fn test_parse_test_data_rejects_garbage() {
    let err = parse_test_data("[1, 2".as_bytes()).unwrap_err();
    assert!(matches!(err, OrderKvError::Decode(_)));
}

#[test]
fn test_expected_response_serializes_in_order() {
    let action = TestDataAction {
        request: Command::get_all(),
        expected: ExpectedResponse::Listing(vec![
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
        ]),
    };
    let json = serde_json::to_string(&action).unwrap();
    assert!(json.ends_with(r#""ExpectedResponse":{"b":"2","a":"1"}}"#), "{}", json);
}

#[test]
fn test_expected_lines() {
    let actions = parse_test_data(TEST_DATA.as_bytes()).unwrap();

    assert_eq!(actions[0].expected_line(), None);
    assert_eq!(
        actions[2].expected_line().as_deref(),
        Some("[get] Got key key3 with value value3")
    );
    assert_eq!(actions[4].expected_line().as_deref(), Some("[get] Key key9 doesn't exist"));
    assert_eq!(
        actions[5].expected_line().as_deref(),
        Some(r#"[getAll] All values ["key3=value3","key1=value1"]"#)
    );
}

#[test]
fn test_verify_matching_log() {
    let actions = parse_test_data(TEST_DATA.as_bytes()).unwrap();
    let log = [
        "[add] Added key key3 with value value3",
        "[add] Added key key1 with value value1",
        "[get] Got key key3 with value value3",
        "[remove] key key9 doesn't exist",
        "[get] Key key9 doesn't exist",
        r#"[getAll] All values ["key3=value3","key1=value1"]"#,
    ];

    assert!(verify_outcomes(&actions, &log).is_empty());
}

#[test]
fn test_verify_reports_mismatch_and_truncated_log() {
    let actions = parse_test_data(TEST_DATA.as_bytes()).unwrap();
    let log = [
        "[add] Added key key3 with value value3",
        "[add] Added key key1 with value value1",
        "[get] Got key key3 with value stale",
        "[remove] key key9 doesn't exist",
    ];

    let mismatches = verify_outcomes(&actions, &log);
    assert_eq!(mismatches.len(), 3);

    assert_eq!(mismatches[0].record, 2);
    assert_eq!(mismatches[0].actual.as_deref(), Some("[get] Got key key3 with value stale"));
    assert_eq!(mismatches[1].record, 4);
    assert_eq!(mismatches[1].actual, None);
    assert_eq!(mismatches[2].record, 5);
}

#[test]
fn test_verify_skips_unknown_actions() {
    let actions = vec![
        TestDataAction {
            request: Command::new("flush", "", ""),
            expected: ExpectedResponse::Absent,
        },
        TestDataAction {
            request: Command::get("a"),
            expected: ExpectedResponse::Value("1".to_string()),
        },
    ];
    let log = vec!["[get] Got key a with value 1".to_string()];

    assert!(verify_outcomes(&actions, &log).is_empty());
}
