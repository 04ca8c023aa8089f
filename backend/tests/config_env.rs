mod support;

use std::io::Write;

use meeus_astronomy::config::{AppConfig, ConfigError};
use meeus_core::CalendarReform;
use support::with_meeus_env;

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_explicit_path() {
    let file = config_file(
        r#"
[observer]
name = "Paris"
latitude = 48.8366
longitude = 2.3364

[calendar]
reform = "proleptic_gregorian"
"#,
    );
    let path = file.path().to_str().unwrap().to_string();

    let config = with_meeus_env(&[("MEEUS_CONFIG", Some(path.as_str()))], AppConfig::load).unwrap();
    assert_eq!(config.observer.name, "Paris");
    assert_eq!(config.observer.longitude, 2.3364);
    assert_eq!(config.calendar.reform, CalendarReform::ProlepticGregorian);
    assert_eq!(config.server.port, 8080);
}

#[test]
fn test_environment_overrides_file() {
    let file = config_file("[server]\nport = 9000\n[observer]\nlongitude = 2.3364\n");
    let path = file.path().to_str().unwrap().to_string();

    let config = with_meeus_env(
        &[
            ("MEEUS_CONFIG", Some(path.as_str())),
            ("MEEUS_PORT", Some("9100")),
            ("MEEUS_LONGITUDE", Some("-1.6222")),
            ("MEEUS_LOCATION_NAME", Some("Cherbourg")),
        ],
        AppConfig::load,
    )
    .unwrap();

    assert_eq!(config.server.port, 9100);
    assert_eq!(config.observer.longitude, -1.6222);
    assert_eq!(config.observer.name, "Cherbourg");
}

#[test]
fn test_default_search_finds_crate_config() {
    // Integration tests run from the crate directory, which ships a meeus.toml.
    let config = with_meeus_env(&[], AppConfig::load).unwrap();
    assert_eq!(config.observer.name, "Cherbourg");
    assert_eq!(config.polling.calendar_interval_secs, 60);
}

#[test]
fn test_invalid_override_fails_load() {
    let err = with_meeus_env(&[("MEEUS_LATITUDE", Some("north"))], AppConfig::load).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "MEEUS_LATITUDE"));
}

#[test]
fn test_out_of_range_longitude_fails_validation() {
    let err = with_meeus_env(&[("MEEUS_LONGITUDE", Some("181"))], AppConfig::load).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "observer"));
}

#[test]
fn test_missing_config_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    let path = path.to_str().unwrap().to_string();

    let err = with_meeus_env(&[("MEEUS_CONFIG", Some(path.as_str()))], AppConfig::load).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
