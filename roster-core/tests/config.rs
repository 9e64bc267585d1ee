use std::fs;

use roster_core::config::{ConfigError, ConfigProperties, ConfigValue, RosterConfig};
use serial_test::serial;

#[test]
fn test_empty_config() {
    let config = RosterConfig::empty();
    assert!(config.get::<String>("nonexistent").is_err());
    assert_eq!(config.profile(), "test");
}

#[test]
fn test_set_and_get() {
    let mut config = RosterConfig::empty();
    config.set("app.name", ConfigValue::String("Roster".into()));
    assert_eq!(config.get::<String>("app.name").unwrap(), "Roster");
    assert!(config.contains_key("app.name"));
}

#[test]
fn test_get_or_default() {
    let config = RosterConfig::empty();
    assert_eq!(config.get_or("missing", 42i64).unwrap(), 42);
}

#[test]
fn test_get_or_rejects_wrong_type() {
    let mut config = RosterConfig::empty();
    config.set("database.max_connections", ConfigValue::String("many".into()));
    assert!(matches!(
        config.get_or("database.max_connections", 5u32),
        Err(ConfigError::TypeMismatch { .. })
    ));
}

#[test]
fn test_type_conversions() {
    let mut config = RosterConfig::empty();
    config.set("int_val", ConfigValue::Integer(42));
    config.set("bool_val", ConfigValue::Bool(true));
    config.set("bool_str", ConfigValue::String("off".into()));
    config.set("null_val", ConfigValue::Null);

    assert_eq!(config.get::<i64>("int_val").unwrap(), 42);
    assert_eq!(config.get::<u32>("int_val").unwrap(), 42);
    assert!(config.get::<bool>("bool_val").unwrap());
    assert!(!config.get::<bool>("bool_str").unwrap());
    assert_eq!(config.get::<String>("int_val").unwrap(), "42");
    assert!(config.get::<Option<String>>("null_val").unwrap().is_none());
}

#[test]
fn test_negative_into_unsigned_is_mismatch() {
    let mut config = RosterConfig::empty();
    config.set("n", ConfigValue::Integer(-1));
    assert!(matches!(
        config.get::<u32>("n"),
        Err(ConfigError::TypeMismatch { expected: "u32", .. })
    ));
}

#[test]
fn test_flatten_yaml() {
    let yaml = r#"
app:
  name: "Student Records"
database:
  url: "sqlite::memory:"
  max_connections: 1
security:
  csrf: false
"#;
    let config = RosterConfig::from_yaml_str(yaml, "test").unwrap();

    assert_eq!(config.get::<String>("app.name").unwrap(), "Student Records");
    assert_eq!(config.get::<String>("database.url").unwrap(), "sqlite::memory:");
    assert_eq!(config.get::<u32>("database.max_connections").unwrap(), 1);
    assert!(!config.get::<bool>("security.csrf").unwrap());
}

#[test]
fn test_list_config() {
    let yaml = r#"
server:
  trusted:
    - "127.0.0.1"
    - "10.0.0.1"
"#;
    let config = RosterConfig::from_yaml_str(yaml, "test").unwrap();
    let trusted: Vec<String> = config.get("server.trusted").unwrap();
    assert_eq!(trusted, vec!["127.0.0.1", "10.0.0.1"]);
}

#[test]
fn test_invalid_yaml_is_load_error() {
    let err = RosterConfig::from_yaml_str("app: [unclosed", "test").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

struct PagingConfig {
    size: u64,
}

impl ConfigProperties for PagingConfig {
    fn prefix() -> &'static str {
        "paging"
    }

    fn from_config(config: &RosterConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            size: config.get_or(&Self::key("size"), 10)?,
        })
    }
}

#[test]
fn test_typed_section() {
    let config = RosterConfig::from_yaml_str("paging:\n  size: 25\n", "test").unwrap();
    let paging: PagingConfig = config.section().unwrap();
    assert_eq!(paging.size, 25);

    let defaults: PagingConfig = RosterConfig::empty().section().unwrap();
    assert_eq!(defaults.size, 10);
}

#[test]
#[serial]
fn test_profile_file_overrides_base() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("application.yaml"),
        "app:\n  name: base\n  greeting: hello\n",
    )
    .unwrap();
    fs::write(dir.path().join("application-prod.yaml"), "app:\n  name: prod\n").unwrap();

    std::env::remove_var(roster_core::config::PROFILE_ENV);
    let config = RosterConfig::load_from_dir(dir.path(), "prod").unwrap();

    assert_eq!(config.profile(), "prod");
    assert_eq!(config.get::<String>("app.name").unwrap(), "prod");
    assert_eq!(config.get::<String>("app.greeting").unwrap(), "hello");
}

#[test]
#[serial]
fn test_env_var_overrides_yaml() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("application.yaml"),
        "rostertest:\n  database:\n    url: from-yaml\n",
    )
    .unwrap();

    std::env::set_var("ROSTERTEST_DATABASE_URL", "from-env");
    let config = RosterConfig::load_from_dir(dir.path(), "dev").unwrap();
    std::env::remove_var("ROSTERTEST_DATABASE_URL");

    assert_eq!(
        config.get::<String>("rostertest.database.url").unwrap(),
        "from-env"
    );
}

#[test]
#[serial]
fn test_missing_files_are_not_errors() {
    let dir = tempfile::tempdir().unwrap();
    let config = RosterConfig::load_from_dir(dir.path(), "dev").unwrap();
    assert!(!config.contains_key("app.name"));
}
