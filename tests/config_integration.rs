use std::path::PathBuf;

use stylepad::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".stylepadrc");
    let content = r#"
# comment
--no-autosave

--store notes.json

--log-file=stylepad.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_autosave);
    assert_eq!(flags.store, Some(PathBuf::from("notes.json")));
    assert_eq!(flags.log_file, Some(PathBuf::from("stylepad.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".stylepadrc");
    let content = "--no-autosave\n--store file.json\n--log-file file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "stylepad".to_string(),
        "--store".to_string(),
        "cli.json".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_autosave, "file flags should remain enabled");
    assert_eq!(
        effective.store,
        Some(PathBuf::from("cli.json")),
        "cli should override store"
    );
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "stylepad".to_string(),
        "--store=notes.json".to_string(),
        "--log-file=stylepad.log".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.store, Some(PathBuf::from("notes.json")));
    assert_eq!(flags.log_file, Some(PathBuf::from("stylepad.log")));
}

#[test]
fn test_unknown_tokens_are_ignored() {
    let args = vec![
        "stylepad".to_string(),
        "--save".to_string(),
        "--clear".to_string(),
        "stray".to_string(),
    ];
    assert_eq!(parse_flag_tokens(&args), ConfigFlags::default());
}

#[test]
fn test_missing_config_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}
