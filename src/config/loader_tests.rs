//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_contains_errdoc_config_toml() {
    if let Some(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("errdoc") && path_str.ends_with("config.toml"),
            "Path should contain 'errdoc' and end with 'config.toml', got: {}",
            path_str
        );
    }
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("errdoc_test_config.toml");

    let toml_content = r#"
pretty = true
envelope = true
fail_on_malformed = false
log_file_path = "/var/log/errdoc.log"
"#;
    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    let config = result
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");
    assert_eq!(config.pretty, Some(true));
    assert_eq!(config.envelope, Some(true));
    assert_eq!(config.fail_on_malformed, Some(false));
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/var/log/errdoc.log"))
    );
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("errdoc_test_invalid.toml");
    fs::write(&config_path, "pretty = [unclosed").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should be a ParseError, got: {:?}",
        result
    );
}

#[test]
fn load_config_file_rejects_unknown_keys() {
    let config_path = env::temp_dir().join("errdoc_test_unknown_key.toml");
    fs::write(&config_path, "colour = \"red\"\n").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn load_config_file_reports_directory_as_read_error() {
    let dir = env::temp_dir().join("errdoc_test_config_dir.toml");
    fs::create_dir_all(&dir).expect("Failed to create dir");

    let result = load_config_file(&dir);
    fs::remove_dir_all(&dir).ok();

    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

#[test]
#[serial(env)]
fn explicit_path_wins_over_env_var() {
    let explicit = env::temp_dir().join("errdoc_test_explicit.toml");
    let from_env = env::temp_dir().join("errdoc_test_from_env.toml");
    fs::write(&explicit, "pretty = true\n").unwrap();
    fs::write(&from_env, "pretty = false\n").unwrap();

    env::set_var(CONFIG_ENV_VAR, &from_env);
    let result = load_config_with_precedence(Some(explicit.clone()));
    env::remove_var(CONFIG_ENV_VAR);

    fs::remove_file(&explicit).ok();
    fs::remove_file(&from_env).ok();

    assert_eq!(result.unwrap().and_then(|c| c.pretty), Some(true));
}

#[test]
#[serial(env)]
fn env_var_path_is_used_without_explicit_path() {
    let from_env = env::temp_dir().join("errdoc_test_env_only.toml");
    fs::write(&from_env, "envelope = true\n").unwrap();

    env::set_var(CONFIG_ENV_VAR, &from_env);
    let result = load_config_with_precedence(None);
    env::remove_var(CONFIG_ENV_VAR);

    fs::remove_file(&from_env).ok();

    assert_eq!(result.unwrap().and_then(|c| c.envelope), Some(true));
}

#[test]
fn merge_config_without_file_uses_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_applies_set_fields_only() {
    let config_file = ConfigFile {
        pretty: Some(true),
        log_file_path: Some(PathBuf::from("/tmp/errdoc.log")),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(config_file));

    assert!(resolved.pretty);
    assert!(!resolved.envelope);
    assert!(!resolved.fail_on_malformed);
    assert_eq!(resolved.log_file_path, Some(PathBuf::from("/tmp/errdoc.log")));
}

#[test]
#[serial(env)]
fn env_overrides_pretty_and_log_file() {
    env::set_var(PRETTY_ENV_VAR, "yes");
    env::set_var(LOG_FILE_ENV_VAR, "/tmp/env.log");
    let config = apply_env_overrides(ResolvedConfig::default());
    env::remove_var(PRETTY_ENV_VAR);
    env::remove_var(LOG_FILE_ENV_VAR);

    assert!(config.pretty);
    assert_eq!(config.log_file_path, Some(PathBuf::from("/tmp/env.log")));
}

#[test]
#[serial(env)]
fn unrecognised_pretty_value_is_ignored() {
    let base = ResolvedConfig {
        pretty: true,
        ..ResolvedConfig::default()
    };

    env::set_var(PRETTY_ENV_VAR, "maybe");
    let config = apply_env_overrides(base);
    env::remove_var(PRETTY_ENV_VAR);

    assert!(config.pretty);
}

#[test]
fn cli_overrides_take_precedence() {
    let from_file = merge_config(Some(ConfigFile {
        pretty: Some(false),
        envelope: Some(true),
        fail_on_malformed: Some(false),
        log_file_path: None,
    }));

    let resolved = apply_cli_overrides(from_file, Some(true), None, Some(true));

    assert!(resolved.pretty, "CLI should override file value");
    assert!(resolved.envelope, "Unset CLI flag keeps file value");
    assert!(resolved.fail_on_malformed);
}

#[test]
fn parse_flag_accepts_common_spellings() {
    assert_eq!(parse_flag("TRUE"), Some(true));
    assert_eq!(parse_flag(" 0 "), Some(false));
    assert_eq!(parse_flag("off"), Some(false));
    assert_eq!(parse_flag(""), None);
}
