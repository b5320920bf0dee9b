use crate::{cli::CliCommand, context::EngineContext, error::EngineError};
use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCHEMA: &str = indoc! {r#"
    {
      "entities": [
        {
          "name": "Account",
          "fields": [
            { "name": "id", "kind": "SCALAR", "scalarTypeName": "String", "notNull": true },
            { "name": "tokens", "kind": "DERIVED", "derivedFromEntityName": "Token", "derivedFromFieldName": "owner" }
          ]
        },
        {
          "name": "Token",
          "fields": [
            { "name": "id", "kind": "SCALAR", "scalarTypeName": "String", "notNull": true },
            { "name": "owner", "kind": "RELATIONSHIP", "relatedEntityName": "Account", "notNull": true },
            { "name": "value", "kind": "SCALAR", "scalarTypeName": "BigInt", "notNull": false }
          ]
        }
      ]
    }
"#};

struct TestApi {
    dir: TempDir,
}

impl TestApi {
    fn new() -> Self {
        let api = Self {
            dir: tempfile::tempdir().unwrap(),
        };

        api.write("schema.json", SCHEMA);
        api
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// A fresh context per command, like separate invocations of the binary.
    fn context(&self) -> EngineContext {
        let database = self.dir.path().join("store.db");
        EngineContext::new(&self.dir.path().join("schema.json"), path_str(&database)).unwrap()
    }

    async fn run(&self, command: CliCommand) -> Result<String, EngineError> {
        command.execute(&self.context()).await
    }
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[tokio::test]
async fn sdl_renders_the_compiled_schema() {
    let api = TestApi::new();
    let sdl = api.run(CliCommand::Sdl).await.unwrap();

    assert!(sdl.contains("type Account {"), "{sdl}");
    assert!(sdl.contains("  token(id: String!): Token"), "{sdl}");
    assert!(sdl.ends_with("scalar Bytes"), "{sdl}");
}

#[tokio::test]
async fn seeded_history_is_queryable_at_any_timestamp() {
    let api = TestApi::new();

    let data = json!([
        { "entity": "Account", "timestamp": 1, "record": { "id": "0xa" } },
        { "entity": "Token", "timestamp": 2, "record": { "id": "t1", "owner": "0xa", "value": "123456789012345678901234567890" } },
        { "entity": "Token", "timestamp": 5, "deleteId": "t1" }
    ]);

    let seeded = api
        .run(CliCommand::Seed(api.write("data.json", &data.to_string())))
        .await
        .unwrap();
    assert_eq!(seeded, "Applied 3 operations.");

    let query = json!({
        "selections": [{
            "name": "account",
            "arguments": { "id": "0xa" },
            "selections": [
                { "name": "id" },
                { "name": "tokens", "alias": "before", "arguments": { "timestamp": 3 }, "selections": [{ "name": "id" }, { "name": "value" }] },
                { "name": "tokens", "alias": "now", "selections": [{ "name": "id" }] }
            ]
        }]
    });

    let response = api
        .run(CliCommand::Execute(api.write("query.json", &query.to_string())))
        .await
        .unwrap();

    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&response).unwrap(),
        json!({
            "data": {
                "account": {
                    "id": "0xa",
                    "before": [{ "id": "t1", "value": "123456789012345678901234567890" }],
                    "now": []
                }
            }
        })
    );
}

#[tokio::test]
async fn field_errors_are_part_of_the_response() {
    let api = TestApi::new();

    let data = json!([{ "entity": "Token", "timestamp": 1, "record": { "id": "t1", "owner": "0xgone" } }]);
    api.run(CliCommand::Seed(api.write("data.json", &data.to_string())))
        .await
        .unwrap();

    let query = json!({
        "selections": [{
            "name": "token",
            "arguments": { "id": "t1" },
            "selections": [{ "name": "id" }, { "name": "owner", "selections": [{ "name": "id" }] }]
        }]
    });

    let response = api
        .run(CliCommand::Execute(api.write("query.json", &query.to_string())))
        .await
        .unwrap();
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();

    assert_eq!(response["data"], json!({ "token": { "id": "t1", "owner": null } }));
    assert_eq!(response["errors"][0]["path"], json!(["token", "owner"]));
}

#[tokio::test]
async fn malformed_seed_operations_are_rejected() {
    let api = TestApi::new();

    let data = json!([
        { "entity": "Account", "timestamp": 1, "record": { "id": "0xa" } },
        { "entity": "Account", "timestamp": 2 }
    ]);

    let err = api
        .run(CliCommand::Seed(api.write("data.json", &data.to_string())))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::SeedError { index: 1, .. }), "{err}");
}

#[tokio::test]
async fn invalid_entity_schema_fails_context_creation() {
    let api = TestApi::new();
    let schema = indoc! {r#"
        {
          "entities": [
            {
              "name": "Token",
              "fields": [
                { "name": "id", "kind": "SCALAR", "scalarTypeName": "String", "notNull": true },
                { "name": "owner", "kind": "RELATIONSHIP", "relatedEntityName": "Nobody", "notNull": true }
              ]
            }
          ]
        }
    "#};

    let path = api.write("broken.json", schema);
    let err = EngineContext::new(&path, ":memory:").unwrap_err();

    assert!(matches!(err, EngineError::SchemaError(_)), "{err}");
    assert!(err.to_string().contains("Token.owner"), "{err}");
}
