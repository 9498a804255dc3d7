// Configuration loading

use std::io::Write;

use cfn_sphere::config::{Config, LogFormat};
use cfn_sphere::constants::DEFAULT_SERVER_TIME_ENDPOINT;
use cfn_sphere::retry::RetryPolicy;
use tempfile::NamedTempFile;

#[test]
fn test_minimal_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "retry:\n  max_retries: 2\n  pause_time_multiplier: 0.5").unwrap();

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.retry_policy().unwrap(), RetryPolicy::new(2, 0.5));
    assert_eq!(config.server_time.endpoint, DEFAULT_SERVER_TIME_ENDPOINT);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_config_without_max_retries_fails() {
    let result = Config::from_yaml_with_env("retry:\n  pause_time_multiplier: 1\n");
    assert!(result.is_err());
}

#[test]
fn test_config_with_negative_multiplier_fails() {
    let err = Config::from_yaml_with_env("retry:\n  max_retries: 1\n  pause_time_multiplier: -2\n")
        .unwrap_err();
    assert!(err.to_string().contains("pause_time_multiplier"));
}

#[test]
fn test_config_file_without_retry_section() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "logging:\n  format: text\n  level: debug").unwrap();

    let config = Config::from_file(file.path()).unwrap();

    assert!(config.retry_policy().is_none());
    assert_eq!(config.logging.format, LogFormat::Text);
    assert_eq!(config.server_time.endpoint, DEFAULT_SERVER_TIME_ENDPOINT);
}
