use std::io::Write;

use strike_forecast::algorithms::ModelKind;
use strike_forecast::config::{AppConfig, ConfigError};
use strike_forecast::services::PipelineSettings;

mod support;
use support::with_scoped_env;

const ENV_KEYS: [&str; 4] = ["STRIKE_CONFIG", "HOST", "PORT", "UPLOAD_DIR"];

fn cleared<'a>() -> Vec<(&'a str, Option<&'a str>)> {
    ENV_KEYS.iter().map(|k| (*k, None)).collect()
}

#[test]
fn test_load_from_strike_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[server]\nport = 8080\n\n[forecast]\nmodel = \"linear\"\nhorizon_days = 14"
    )
    .unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let mut env = cleared();
    env[0] = ("STRIKE_CONFIG", Some(path.as_str()));
    let config = with_scoped_env(&env, AppConfig::load).unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.forecast.model, ModelKind::Linear);

    let settings = PipelineSettings::from(&config);
    assert_eq!(settings.horizon_days, 14);
    assert_eq!(settings.model.kind, ModelKind::Linear);
    assert_eq!(settings.date_column, "FlightDate");
}

#[test]
fn test_env_overrides_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server]\nhost = \"127.0.0.1\"\nport = 8080").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let env = [
        ("STRIKE_CONFIG", Some(path.as_str())),
        ("HOST", Some("0.0.0.0")),
        ("PORT", Some("9090")),
        ("UPLOAD_DIR", Some("/tmp/strike-uploads")),
    ];
    let config = with_scoped_env(&env, AppConfig::load).unwrap();

    assert_eq!(config.bind_addr(), "0.0.0.0:9090");
    assert_eq!(config.server.upload_dir.to_str(), Some("/tmp/strike-uploads"));
}

#[test]
fn test_invalid_port_rejected() {
    let mut env = cleared();
    env[2] = ("PORT", Some("not-a-port"));
    let err = with_scoped_env(&env, AppConfig::load).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_missing_config_file_is_error() {
    let mut env = cleared();
    env[0] = ("STRIKE_CONFIG", Some("/nonexistent/strike-forecast.toml"));
    let err = with_scoped_env(&env, AppConfig::load).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_invalid_values_fail_validation() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[forecast]\ntest_fraction = 0.0").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let mut env = cleared();
    env[0] = ("STRIKE_CONFIG", Some(path.as_str()));
    let err = with_scoped_env(&env, AppConfig::load).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("test_fraction")));
}
