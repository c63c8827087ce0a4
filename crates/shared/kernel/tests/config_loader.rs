use serial_test::serial;
use std::fs;
use tempfile::tempdir;
use vconf_kernel::config::{ConfigLoadError, load_config};
use vconf_kernel::domain::config::AppConfig;

#[test]
#[serial]
fn loads_settings_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vconf.toml");
    fs::write(
        &path,
        r#"
[server]
port = 9000

[store]
journal = "data/journal.jsonl"

[[actors]]
username = "admin"
token = "admin-token"
superuser = true

[[schemas]]
name = "example"
key_fields = ["name"]
fields = [
    { name = "name", kind = "text" },
    { name = "int_field", kind = "integer", default = 10 },
]
"#,
    )
    .unwrap();

    let cfg: AppConfig = load_config(Some(&path)).unwrap();
    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.actors.len(), 1);
    assert_eq!(cfg.actors[0].token.as_deref(), Some("admin-token"));

    let schema = cfg.schemas[0].to_schema().unwrap();
    assert_eq!(schema.key_fields(), ["name"]);
}

#[test]
#[serial]
fn explicit_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = load_config::<AppConfig>(Some(dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigLoadError::Config { .. }));
}

#[test]
#[serial]
fn defaults_apply_without_a_file() {
    let cfg: AppConfig = load_config(None::<&str>).unwrap();
    assert_eq!(cfg.cache.capacity, 10_000);
}
