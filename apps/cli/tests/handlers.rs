use clap::Parser;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use vconf::Platform;
use vconf::domain::FieldKind;
use vconf::domain::config::{ActorConfig, AppConfig, FieldConfig, SchemaConfig};
use vconf_cli::handlers::{dump, history, populate, show};
use vconf_cli::models::args::{AppCommands, Cli, DEFAULT_DUMP_FILE};

const WORKER: &str = "test_management_worker";

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/data.json")
}

fn platform() -> Platform {
    let mut cfg = AppConfig::default();
    cfg.actors.push(ActorConfig { username: WORKER.to_owned(), token: None, superuser: false });
    cfg.schemas.push(SchemaConfig {
        name: "ExampleDeserializeConfig".to_owned(),
        key_fields: vec!["name".to_owned()],
        fields: vec![
            FieldConfig { name: "name".to_owned(), kind: FieldKind::Text, default: None, compare: true },
            FieldConfig {
                name: "int_field".to_owned(),
                kind: FieldKind::Integer,
                default: Some(json!(10)),
                compare: true,
            },
        ],
        cache_timeout_seconds: None,
    });
    vconf::init(&cfg).unwrap()
}

#[test]
fn populate_imports_the_file() {
    let platform = platform();
    assert_eq!(populate::populate(&platform, Some(&fixture()), Some(WORKER)).unwrap(), 2);

    let model = platform.configs.model("ExampleDeserializeConfig").unwrap();
    for name in ["betty", "fred"] {
        let current = model.current(&[name.into()]).unwrap();
        assert_eq!(current.created_by.as_deref(), Some(WORKER));
    }
}

#[test]
fn populate_requires_a_username() {
    let err = populate::populate(&platform(), Some(&fixture()), None).unwrap_err();
    assert_eq!(err.to_string(), "A valid username must be specified");
}

#[test]
fn populate_rejects_an_unknown_username() {
    let err = populate::populate(&platform(), Some(&fixture()), Some("does_not_exist")).unwrap_err();
    assert!(err.to_string().contains("Actor matching query does not exist"));
}

#[test]
fn populate_requires_a_file() {
    let err = populate::populate(&platform(), None, Some(WORKER)).unwrap_err();
    assert_eq!(err.to_string(), "A file containing JSON must be specified");
}

#[test]
fn populate_rejects_a_missing_file() {
    let path = Path::new("does/not/exist.json");
    let err = populate::populate(&platform(), Some(path), Some(WORKER)).unwrap_err();
    assert_eq!(err.to_string(), "File does/not/exist.json does not exist");
}

#[test]
fn dump_then_populate_creates_nothing() {
    let platform = platform();
    populate::populate(&platform, Some(&fixture()), Some(WORKER)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_DUMP_FILE);
    assert_eq!(dump::dump(&platform, &path, &[]).unwrap(), 2);

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written[0]["model"], "ExampleDeserializeConfig");
    assert!(written[0]["data"][0].get("created_by").is_none());

    assert_eq!(populate::populate(&platform, Some(&path), Some(WORKER)).unwrap(), 0);
}

#[test]
fn show_prints_the_current_snapshot() {
    let platform = platform();
    populate::populate(&platform, Some(&fixture()), Some(WORKER)).unwrap();

    let mut out = Vec::new();
    show::show(&platform, "ExampleDeserializeConfig", &["betty".to_owned()], &mut out).unwrap();
    let printed: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed["int_field"], 5);
    assert_eq!(printed["enabled"], true);

    let err = show::show(&platform, "ExampleDeserializeConfig", &[], &mut out).unwrap_err();
    assert!(err.to_string().contains("takes exactly 1 arguments (0 given)"));
}

#[test]
fn history_marks_active_rows() {
    let platform = platform();
    let model = platform.configs.model("ExampleDeserializeConfig").unwrap();
    for limit in [1, 2] {
        let row = json!({"name": "betty", "int_field": limit});
        model.save_fields(row.as_object().unwrap(), Some(WORKER)).unwrap();
    }

    let mut out = Vec::new();
    history::history(&platform, "ExampleDeserializeConfig", &mut out).unwrap();
    let printed = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = printed.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("* #2 "));
    assert!(lines[0].contains("int_field=2"));
    assert!(lines[1].starts_with("  #1 "));
    assert!(lines[1].contains(&format!("by {WORKER}")));
}

#[test]
fn arguments_parse() {
    let cli = Cli::try_parse_from(["vconf", "dump", "--schema", "A", "--schema", "B"]).unwrap();
    let AppCommands::Dump { file, schemas } = cli.command else { panic!("expected dump") };
    assert_eq!(file, PathBuf::from(DEFAULT_DUMP_FILE));
    assert_eq!(schemas, ["A", "B"]);

    let cli = Cli::try_parse_from(["vconf", "--config", "vconf.toml", "show", "S", "k1"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("vconf.toml")));
    assert!(matches!(cli.command, AppCommands::Show { ref keys, .. } if keys == &["k1"]));

    let cli = Cli::try_parse_from(["vconf", "populate"]).unwrap();
    assert!(matches!(cli.command, AppCommands::Populate { file: None, username: None }));
}
