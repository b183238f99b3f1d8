use anyhow::Result;
use sendkeys::config::{parse_duration, Config};
use sendkeys::{
    parse_keys, KeyAction, KeyInput, KeySender, ParseOptions, RecordingTransmitter, SendOptions,
};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn test_replay_config() {
    let json = r#"
    {
        "sequence": "^a{DEL}status report{ENTER}",
        "pause": "20ms",
        "with_spaces": true,
        "repeat_count": 3,
        "interval": "2s",
        "verbose": true
    }
    "#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.sequence, "^a{DEL}status report{ENTER}");
    assert_eq!(config.pause, Duration::from_millis(20));
    assert!(config.with_spaces);
    assert!(!config.with_tabs);
    assert_eq!(config.repeat_count, 3);
    assert_eq!(config.interval, Duration::from_secs(2));
    assert!(config.verbose);

    // Test validation
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_file_operations() -> Result<()> {
    // Create a temporary file
    let mut temp_file = NamedTempFile::new()?;

    let json_content = r#"
    {
        "sequence": "{F5}{PAUSE 0.5}",
        "pause": "100ms",
        "repeat_count": 0,
        "interval": "30s"
    }
    "#;

    // Write JSON to file
    temp_file.write_all(json_content.as_bytes())?;

    // Load config from file
    let config = Config::from_file(temp_file.path().to_str().unwrap())?;

    assert_eq!(config.sequence, "{F5}{PAUSE 0.5}");
    assert_eq!(config.pause, Duration::from_millis(100));
    assert_eq!(config.repeat_count, 0);
    assert_eq!(config.interval, Duration::from_secs(30));

    // Test validation
    assert!(config.validate().is_ok());

    Ok(())
}

#[test]
fn test_duration_parsing_edge_cases() {
    // Valid cases
    assert_eq!(parse_duration("0ms").unwrap(), Duration::from_millis(0));
    assert_eq!(parse_duration("1000").unwrap(), Duration::from_millis(1000));
    assert_eq!(parse_duration("5S").unwrap(), Duration::from_secs(5)); // Case insensitive
    assert_eq!(parse_duration(" 2m ").unwrap(), Duration::from_secs(120)); // Whitespace

    // Invalid cases
    assert!(parse_duration("").is_err());
    assert!(parse_duration("abc").is_err());
    assert!(parse_duration("1000x").is_err());
    assert!(parse_duration("-1000ms").is_err());
}

#[test]
fn test_config_validation_errors() {
    // Empty sequence
    let mut config = Config {
        sequence: "".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());

    // Malformed sequence
    config.sequence = "{ENTER".to_string();
    assert!(config.validate().is_err());

    // A valid sequence passes
    config.sequence = "{ENTER}".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_default_values() {
    let json = r#"
    {
        "sequence": "~"
    }
    "#;

    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.sequence, "~");
    assert_eq!(config.pause, Duration::from_millis(50)); // default
    assert_eq!(config.repeat_count, 1); // default
    assert_eq!(config.interval, Duration::ZERO); // default
    assert!(!config.with_spaces); // default false
    assert!(!config.with_tabs); // default false
    assert!(!config.with_newlines); // default false
    assert!(!config.verbose); // default false

    assert!(config.validate().is_ok());
}

#[test]
fn test_config_save_load_roundtrip() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let config_path = temp_dir.path().join("test_config.json");

    let original = Config {
        sequence: "+(hello){TAB 2}~".to_string(),
        pause: Duration::from_millis(35),
        with_spaces: true,
        with_tabs: false,
        with_newlines: true,
        repeat_count: 5,
        interval: Duration::from_secs(1),
        verbose: true,
    };

    // Save
    original.save_to_file(config_path.to_str().unwrap())?;

    // Load
    let loaded = Config::from_file(config_path.to_str().unwrap())?;

    // Verify
    assert_eq!(loaded, original);

    Ok(())
}

// Parser properties

#[test]
fn test_plain_printable_characters_parse_to_single_literals() {
    let reserved = "~!@#$%^&*()_+{}|:\"<>?";

    for byte in 0x21u8..=0x7e {
        let ch = byte as char;
        if reserved.contains(ch) {
            continue;
        }
        let actions = parse_keys(&ch.to_string(), &ParseOptions::default()).unwrap();
        assert_eq!(
            actions,
            vec![KeyAction::Key {
                ch,
                down: true,
                up: true
            }],
            "unexpected parse for '{ch}'"
        );
    }
}

#[test]
fn test_pause_action() {
    let actions = parse_keys("{PAUSE 1.3}", &ParseOptions::default()).unwrap();
    assert_eq!(
        actions,
        vec![KeyAction::pause(Duration::from_secs_f64(1.3))]
    );
}

#[test]
fn test_tab_repetition() {
    let actions = parse_keys("{TAB 3}", &ParseOptions::default()).unwrap();
    assert_eq!(actions, vec![KeyAction::virtual_key(9); 3]);
}

#[test]
fn test_metacharacters_self_escape() {
    let actions = parse_keys("{%}{^}{+}{(}{)}{{}{}}{~}", &ParseOptions::default()).unwrap();
    let spelled: String = actions.iter().map(KeyAction::key_description).collect();
    assert_eq!(spelled, "%^+(){}~");
    // no modifier holds or releases anywhere in the list
    assert!(actions
        .iter()
        .all(|a| matches!(a, KeyAction::Key { down: true, up: true, .. })));
}

#[test]
fn test_malformed_sequences_fail_before_producing_actions() {
    assert!(parse_keys("{ENTER", &ParseOptions::default()).is_err());
    assert!(parse_keys("ENTER}", &ParseOptions::default()).is_err());

    let err = parse_keys("{ENTER five}", &ParseOptions::default()).unwrap_err();
    assert!(
        err.to_string().contains("five"),
        "error should name the bad count: {err}"
    );
}

#[test]
fn test_literal_text_round_trips_through_descriptions() {
    let text = "the-quick-brown-fox-1234";
    let spelled: String = parse_keys(text, &ParseOptions::default())
        .unwrap()
        .iter()
        .map(KeyAction::key_description)
        .collect();
    assert_eq!(spelled, text);
}

// Executor properties

#[test]
fn test_send_keys_transmits_in_action_order() {
    let mut sender = KeySender::new(RecordingTransmitter::new());
    sender.send_keys("^a{ENTER}", &SendOptions::default()).unwrap();

    let events = sender.transmitter().events();
    assert_eq!(events.len(), 4);

    // ctrl down
    assert_eq!(events[0].input, KeyInput::Virtual(17));
    assert!(events[0].down && !events[0].up);
    // 'a' through the scan-code path while ctrl is held
    assert_eq!(events[1].input, KeyInput::Scan('a'));
    assert!(events[1].down && events[1].up);
    // ctrl up
    assert_eq!(events[2].input, KeyInput::Virtual(17));
    assert!(!events[2].down && events[2].up);
    // enter
    assert_eq!(events[3].input, KeyInput::Virtual(13));
}

#[test]
fn test_send_keys_paces_every_action() {
    let options = SendOptions {
        pause: Duration::from_millis(10),
        ..SendOptions::default()
    };
    let mut sender = KeySender::new(RecordingTransmitter::new());
    sender.send_keys("ab{PAUSE 0.2}c", &options).unwrap();

    // one inter-action pause per action; the {PAUSE} sleeps its own
    // duration first and is then paced like any other action
    assert_eq!(
        sender.transmitter().sleeps(),
        &[
            Duration::from_millis(10),
            Duration::from_millis(10),
            Duration::from_millis(200),
            Duration::from_millis(10),
            Duration::from_millis(10),
        ]
    );
}

#[test]
fn test_send_keys_rejects_malformed_input_without_sending() {
    let mut sender = KeySender::new(RecordingTransmitter::new());
    assert!(sender.send_keys("(oops", &SendOptions::default()).is_err());
    assert!(sender.transmitter().events().is_empty());
    assert!(sender.transmitter().sleeps().is_empty());
}

// Error type tests

#[test]
fn test_error_types() {
    use sendkeys::SendKeysError;

    let err = SendKeysError::unknown_code("WOBBLE");
    assert!(err.to_string().contains("WOBBLE"));

    let err = SendKeysError::invalid_repeat_count("ENTER five", "five");
    assert!(err.to_string().contains("five"));

    let err = SendKeysError::config_validation("sequence cannot be empty");
    assert!(err.to_string().contains("sequence cannot be empty"));
}
