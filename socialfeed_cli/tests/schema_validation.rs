use serde_json::Value;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn load_fixture(name: &str) -> Value {
    let path = workspace_root()
        .join("socialfeed_api/tests/fixtures")
        .join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("fixture is valid JSON")
}

fn load_schema(name: &str) -> Value {
    let path = workspace_root().join("schema").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("schema is valid JSON")
}

/// Posts come wrapped in a page; everything else is a bare list.
fn extract_items(fixture: &Value) -> Value {
    match &fixture["data"] {
        Value::Object(page) => page["data"].clone(),
        other => other.clone(),
    }
}

fn assert_conforms(fixture: &str, schema: &str) {
    let data = extract_items(&load_fixture(fixture));
    let schema = load_schema(schema);
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    if let Err(e) = validator.validate(&data) {
        panic!("{fixture} failed validation: {e}");
    }
}

// ---------------------------------------------------------------------------
// Positive validation: fixtures conform to their schemas
// ---------------------------------------------------------------------------

#[test]
fn posts_fixture_conforms_to_schema() {
    assert_conforms("posts_page.json", "post.schema.json");
}

#[test]
fn users_fixture_conforms_to_schema() {
    assert_conforms("users_search.json", "user.schema.json");
}

#[test]
fn notifications_fixture_conforms_to_schema() {
    assert_conforms("notifications.json", "notification.schema.json");
}

// ---------------------------------------------------------------------------
// Negative validation: schemas reject invalid data
// ---------------------------------------------------------------------------

#[test]
fn post_schema_rejects_missing_id() {
    let mut data = extract_items(&load_fixture("posts_page.json"));
    data[0].as_object_mut().expect("post is an object").remove("id");

    let schema = load_schema("post.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    assert!(validator.validate(&data).is_err(), "schema should reject post missing id");
}

#[test]
fn post_schema_rejects_negative_like_count() {
    let mut data = extract_items(&load_fixture("posts_page.json"));
    data[0]
        .as_object_mut()
        .expect("post is an object")
        .insert("likes_count".to_string(), Value::Number((-1).into()));

    let schema = load_schema("post.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    assert!(validator.validate(&data).is_err());
}

#[test]
fn notification_schema_rejects_additional_properties() {
    let mut data = extract_items(&load_fixture("notifications.json"));
    data[0]
        .as_object_mut()
        .expect("notification is an object")
        .insert("bogusField".to_string(), Value::Number(123.into()));

    let schema = load_schema("notification.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    assert!(
        validator.validate(&data).is_err(),
        "schema should reject additional properties"
    );
}

#[test]
fn empty_array_conforms_to_all_schemas() {
    let empty = serde_json::json!([]);

    for schema_name in ["post.schema.json", "user.schema.json", "notification.schema.json"] {
        let schema = load_schema(schema_name);
        let validator =
            jsonschema::draft202012::new(&schema).unwrap_or_else(|e| panic!("{schema_name}: {e}"));
        if let Err(e) = validator.validate(&empty) {
            panic!("empty array should conform to {schema_name}: {e}");
        }
    }
}
