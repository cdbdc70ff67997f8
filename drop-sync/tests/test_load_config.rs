use std::env;
use std::fs;
use std::path::PathBuf;

use drop_sync::load_config::load;
use serial_test::serial;
use tempfile::tempdir;

fn clear_storage_env() {
    for var in ["ACCOUNT_NAME", "ACCOUNT_KEY", "DIRECTORY", "BLOB_ENDPOINT"] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn loads_settings_from_config_file() {
    clear_storage_env();
    let dir = tempdir().expect("Creating temp dir failed");
    fs::write(
        dir.path().join("config.json"),
        br#"{
            "AccountName": "mydrops",
            "AccountKey": "sv=2022&sig=abc",
            "Directory": "/var/drops"
        }"#,
    )
    .expect("Writing config failed");

    let settings = load(dir.path()).expect("Loading config should succeed");
    assert_eq!(settings.account_name, "mydrops");
    assert_eq!(settings.account_key, "sv=2022&sig=abc");
    assert_eq!(settings.directory, PathBuf::from("/var/drops"));
    assert!(settings.endpoint.is_none());
}

#[test]
#[serial]
fn environment_overrides_config_file() {
    clear_storage_env();
    let dir = tempdir().expect("Creating temp dir failed");
    fs::write(
        dir.path().join("config.json"),
        br#"{"AccountName": "fromfile", "Directory": "/from/file"}"#,
    )
    .expect("Writing config failed");

    env::set_var("ACCOUNT_NAME", "fromenv");
    env::set_var("BLOB_ENDPOINT", "http://127.0.0.1:10000/devaccount");
    let settings = load(dir.path()).expect("Loading config should succeed");
    clear_storage_env();

    assert_eq!(settings.account_name, "fromenv", "Environment wins");
    assert_eq!(settings.directory, PathBuf::from("/from/file"));
    assert_eq!(
        settings.endpoint.as_deref(),
        Some("http://127.0.0.1:10000/devaccount")
    );
}

#[test]
#[serial]
fn missing_config_file_defaults_to_empty_settings() {
    clear_storage_env();
    let dir = tempdir().expect("Creating temp dir failed");

    let settings = load(dir.path()).expect("Absent config file is not an error");
    assert!(settings.account_name.is_empty());
    assert!(settings.account_key.is_empty());
    assert_eq!(settings.directory, PathBuf::new());
}

#[test]
#[serial]
fn malformed_config_file_is_an_error() {
    clear_storage_env();
    let dir = tempdir().expect("Creating temp dir failed");
    fs::write(dir.path().join("config.json"), b"{not valid json")
        .expect("Writing config failed");

    assert!(
        load(dir.path()).is_err(),
        "Present-but-malformed config must fail loudly"
    );
}
