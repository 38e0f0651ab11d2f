//! Integration tests for environment overrides against the real process environment

use tempfile::TempDir;
use tiercfg::{load, LoadError, LoadOptions, OverrideError};

use super::fixtures::{TestConfig, CONFIG_OVERRIDE_YAML, CONFIG_YAML};
use crate::integration::{with_env, write_file};

fn yaml_options(dir: &TempDir, name: &str, prefix: &str) -> LoadOptions {
    LoadOptions::new()
        .with_paths([dir.path()])
        .with_name(name)
        .with_env_prefix(prefix)
}

#[test]
fn test_env_prefix() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "config.yaml", CONFIG_YAML);

    let cfg = with_env(&[("MYAPP_SERVER_PORT", "7070"), ("SERVER_PORT", "8080")], || {
        let mut cfg = TestConfig::default();
        load(&mut cfg, &yaml_options(&temp_dir, "config", "myapp")).unwrap();
        cfg
    });

    assert_eq!(cfg.server.port, 7070);
}

#[test]
fn test_load_env_and_override_yaml() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "config.yaml", CONFIG_YAML);

    let vars = [
        ("ENVTEST_APP_NAME", "env-override-app"),
        ("ENVTEST_SERVER_PORT", "9090"),
        ("ENVTEST_SERVER_DEBUG", "false"),
    ];
    let cfg = with_env(&vars, || {
        let mut cfg = TestConfig::default();
        load(&mut cfg, &yaml_options(&temp_dir, "config", "ENVTEST")).unwrap();
        cfg
    });

    assert_eq!(cfg.app.name, "env-override-app");
    assert_eq!(cfg.server.port, 9090);
    assert!(!cfg.server.debug);
    // Untouched fields keep file values
    assert_eq!(cfg.database.host, "db.localhost");
    assert_eq!(cfg.app.version, "1.0.0");
}

#[test]
fn test_nested_structs() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "config_override.yaml", CONFIG_OVERRIDE_YAML);

    let vars = [
        ("NESTTEST_FEATURES_ENABLED", "true"),
        ("NESTTEST_FEATURES_TIMEOUT", "45"),
    ];
    let cfg = with_env(&vars, || {
        let mut cfg = TestConfig::default();
        load(&mut cfg, &yaml_options(&temp_dir, "config_override", "NESTTEST")).unwrap();
        cfg
    });

    assert_eq!(cfg.server.port, 8080);
    assert!(!cfg.server.debug);
    assert!(cfg.features.enabled);
    assert_eq!(cfg.features.timeout, 45);
}

#[test]
fn test_no_env_override_without_key() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "config.yaml", CONFIG_YAML);

    let vars = [("KEYTEST_TIMEOUT", "99"), ("KEYTEST_SERVER_TIMEOUT", "99")];
    let cfg = with_env(&vars, || {
        let mut cfg = TestConfig::default();
        load(&mut cfg, &yaml_options(&temp_dir, "config", "KEYTEST")).unwrap();
        cfg
    });

    assert_eq!(cfg.server.timeout, 30);
}

#[test]
fn test_unset_variable_keeps_file_value() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "config.yaml", CONFIG_YAML);

    let cfg = with_env(&[], || {
        let mut cfg = TestConfig::default();
        load(&mut cfg, &yaml_options(&temp_dir, "config", "UNSETTEST")).unwrap();
        cfg
    });

    assert_eq!(cfg.server.port, 3000);
}

#[test]
fn test_bad_value_returns_parse_error_without_rollback() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "config.yaml", CONFIG_YAML);

    let vars = [
        ("BADTEST_APP_NAME", "applied-before-failure"),
        ("BADTEST_SERVER_PORT", "notanumber"),
    ];
    let (cfg, err) = with_env(&vars, || {
        let mut cfg = TestConfig::default();
        let err = load(&mut cfg, &yaml_options(&temp_dir, "config", "BADTEST")).unwrap_err();
        (cfg, err)
    });

    match err {
        LoadError::Override(OverrideError::Parse { field, variable, value, .. }) => {
            assert_eq!(field, "port");
            assert_eq!(variable, "BADTEST_SERVER_PORT");
            assert_eq!(value, "notanumber");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
    assert_eq!(cfg.app.name, "applied-before-failure");
    assert_eq!(cfg.server.port, 3000);
}

#[test]
fn test_deeply_nested_structs() {
    use serde::{Deserialize, Serialize};
    use tiercfg::env_record;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Level3 {
        value: String,
    }
    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Level2 {
        level3: Level3,
    }
    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Level1 {
        level2: Level2,
    }
    #[derive(Debug, Default, Serialize, Deserialize)]
    struct DeepConfig {
        level1: Level1,
    }

    env_record!(Level3 { value = "DEEP_VALUE" });
    env_record!(Level2 { nested level3 });
    env_record!(Level1 { nested level2 });
    env_record!(DeepConfig { nested level1 });

    let temp_dir = TempDir::new().unwrap();
    write_file(
        temp_dir.path(),
        "deep_config.yaml",
        "level1:\n  level2:\n    level3:\n      value: from-file\n",
    );

    let cfg = with_env(&[("DEEPTEST_DEEP_VALUE", "env-override-value")], || {
        let mut cfg = DeepConfig::default();
        load(&mut cfg, &yaml_options(&temp_dir, "deep_config", "DEEPTEST")).unwrap();
        cfg
    });

    assert_eq!(cfg.level1.level2.level3.value, "env-override-value");
}
