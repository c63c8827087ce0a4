use serde_json::json;
use std::fs::File;
use std::path::PathBuf;
use vconf_domain::config::ActorConfig;
use vconf_domain::{FieldDescriptor, FieldValue, Schema};
use vconf_kernel::security::MemoryActors;
use vconf_models::{ConfigModel, Configurations};
use vconf_transfer::{TransferError, deserialize_json};

const WORKER: &str = "test_worker";

fn fixture() -> File {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/data.json");
    File::open(path).unwrap()
}

fn setup() -> (Configurations, MemoryActors) {
    let configs = Configurations::builder()
        .schema(
            Schema::builder("ExampleDeserializeConfig")
                .field(FieldDescriptor::text("name"))
                .field(FieldDescriptor::integer("int_field").with_default(10))
                .key_field("name")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let actors = MemoryActors::from_config(&[ActorConfig {
        username: WORKER.to_owned(),
        token: None,
        superuser: false,
    }])
    .unwrap();
    (configs, actors)
}

fn model(configs: &Configurations) -> ConfigModel {
    configs.model("ExampleDeserializeConfig").unwrap()
}

fn int_field(model: &ConfigModel, name: &str) -> Option<FieldValue> {
    model.current(&[name.into()]).unwrap().field("int_field").cloned()
}

#[test]
fn imports_every_new_row() {
    let (configs, actors) = setup();

    assert_eq!(deserialize_json(&configs, fixture(), WORKER, &actors).unwrap(), 2);

    let model = model(&configs);
    assert_eq!(model.count().unwrap(), 2);

    let betty = model.current(&["betty".into()]).unwrap();
    assert!(betty.enabled);
    assert_eq!(betty.field("int_field"), Some(&FieldValue::Integer(5)));
    assert_eq!(betty.created_by.as_deref(), Some(WORKER));

    let fred = model.current(&["fred".into()]).unwrap();
    assert!(!fred.enabled);
    assert_eq!(fred.field("int_field"), Some(&FieldValue::Integer(10)));
    assert_eq!(fred.created_by.as_deref(), Some(WORKER));
}

#[test]
fn existing_rows_are_kept() {
    let (configs, actors) = setup();
    let model = model(&configs);
    let fred = json!({"name": "fred", "enabled": true});
    let barney = json!({"name": "barney", "int_field": 200});
    model.save_fields(fred.as_object().unwrap(), None).unwrap();
    model.save_fields(barney.as_object().unwrap(), None).unwrap();

    assert_eq!(deserialize_json(&configs, fixture(), WORKER, &actors).unwrap(), 2);

    assert_eq!(model.count().unwrap(), 4);
    assert_eq!(model.current_set().unwrap().len(), 3);
    assert_eq!(int_field(&model, "betty"), Some(FieldValue::Integer(5)));
    assert_eq!(int_field(&model, "barney"), Some(FieldValue::Integer(200)));
    assert!(!model.is_enabled(&["fred".into()]).unwrap());
}

#[test]
fn unchanged_rows_are_not_duplicated() {
    let (configs, actors) = setup();
    let model = model(&configs);

    assert_eq!(deserialize_json(&configs, fixture(), WORKER, &actors).unwrap(), 2);
    assert_eq!(deserialize_json(&configs, fixture(), WORKER, &actors).unwrap(), 0);
    assert_eq!(model.count().unwrap(), 2);

    let mut betty = model.current(&["betty".into()]).unwrap();
    betty.set("int_field", -8);
    model.save(betty, None).unwrap();
    assert_eq!(model.count().unwrap(), 3);
    assert_eq!(int_field(&model, "betty"), Some(FieldValue::Integer(-8)));

    assert_eq!(deserialize_json(&configs, fixture(), WORKER, &actors).unwrap(), 1);
    assert_eq!(model.count().unwrap(), 4);
    assert_eq!(int_field(&model, "betty"), Some(FieldValue::Integer(5)));
}

#[test]
fn unknown_actor_is_rejected_before_writing() {
    let (configs, actors) = setup();
    let input = br#"{"model": "ExampleDeserializeConfig", "data": [{"name": "dino"}]}"#;

    let err = deserialize_json(&configs, &input[..], "unknown_username", &actors).unwrap_err();
    assert!(matches!(err, TransferError::ReferentialError { .. }));
    assert!(err.to_string().contains("Actor matching query does not exist"));
    assert_eq!(model(&configs).count().unwrap(), 0);
}

#[test]
fn invalid_json_is_malformed_input() {
    let (configs, actors) = setup();
    let input = br#"{"model": "ExampleDeserializeConfig", "data": [{"name": "dino""#;

    let err = deserialize_json(&configs, &input[..], WORKER, &actors).unwrap_err();
    assert!(matches!(err, TransferError::MalformedInput { .. }));
    assert!(err.to_string().contains("JSON parse error"));
}

#[test]
fn unknown_schema_is_reported() {
    let (configs, actors) = setup();
    let input = br#"{"model": "xxx.yyy", "data": [{"name": "dino"}]}"#;

    let err = deserialize_json(&configs, &input[..], WORKER, &actors).unwrap_err();
    assert!(matches!(err, TransferError::UnknownSchema { .. }));
}

#[test]
fn schema_is_checked_before_actor() {
    let (configs, actors) = setup();
    let input = br#"{"model": "xxx.yyy", "data": []}"#;

    let err = deserialize_json(&configs, &input[..], "nobody", &actors).unwrap_err();
    assert!(matches!(err, TransferError::UnknownSchema { .. }));
}

#[test]
fn one_bad_row_blocks_the_whole_import() {
    let (configs, actors) = setup();
    let input = br#"{"model": "ExampleDeserializeConfig",
        "data": [{"name": "ok"}, {"name": "bad", "int_field": "many"}]}"#;

    let err = deserialize_json(&configs, &input[..], WORKER, &actors).unwrap_err();
    assert!(matches!(err, TransferError::Config { .. }));
    assert_eq!(model(&configs).count().unwrap(), 0);
}
