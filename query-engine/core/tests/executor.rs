use async_trait::async_trait;
use entity_value::{EntityValue, Record, num_bigint::BigInt};
use indoc::indoc;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use query_connector::{Connector, Filter, ReadOperations};
use query_core::{Executor, FieldErrorKind, PathSegment, QueryDocument, Response, Selection};
use schema::{Entity, EntitySchema, Field, ListElement, ScalarType, build};
use serde_json::json;
use std::{collections::HashMap, str::FromStr, sync::Arc};

/// In-memory store that answers lookups from fixed records and remembers every filter it
/// was asked for.
#[derive(Default)]
struct RecordingStore {
    records: HashMap<String, Vec<Record>>,
    filters: Mutex<Vec<Filter>>,
}

impl RecordingStore {
    fn with(mut self, entity: &str, record: Record) -> Self {
        self.records.entry(entity.to_owned()).or_default().push(record);
        self
    }

    fn filters(&self) -> Vec<Filter> {
        self.filters.lock().clone()
    }
}

impl Connector for RecordingStore {
    fn name(&self) -> &'static str {
        "recording"
    }
}

#[async_trait]
impl ReadOperations for RecordingStore {
    async fn find_unique(&self, model_name: &str, id: &EntityValue) -> query_connector::Result<Option<Record>> {
        let found = self
            .records
            .get(model_name)
            .and_then(|records| records.iter().find(|r| r.get("id").map(ToString::to_string) == Some(id.to_string())));

        Ok(found.cloned())
    }

    async fn find_many(&self, model_name: &str, filter: Filter) -> query_connector::Result<Vec<Record>> {
        self.filters.lock().push(filter.clone());

        let matching = self
            .records
            .get(model_name)
            .into_iter()
            .flatten()
            .filter(|record| filter.where_.iter().all(|(k, v)| record.get(k) == Some(v)))
            .cloned()
            .collect();

        Ok(matching)
    }
}

fn entity_schema() -> EntitySchema {
    EntitySchema::new(vec![
        Entity::new(
            "Account",
            vec![
                Field::scalar("id", ScalarType::String, true),
                Field::scalar("balance", ScalarType::Int, false),
                Field::derived("tokens", "Token", "owner"),
            ],
        ),
        Entity::new(
            "Token",
            vec![
                Field::scalar("id", ScalarType::String, true),
                Field::scalar("value", ScalarType::BigInt, false),
                Field::relationship("owner", "Account", true),
                Field::enumeration("color", "Color", false),
                Field::list(
                    "tags",
                    ListElement::Scalar {
                        scalar_type_name: ScalarType::String,
                    },
                    true,
                    true,
                ),
            ],
        ),
    ])
    .with_enum("Color", &["RED", "GREEN"])
}

fn record(fields: &[(&str, EntityValue)]) -> Record {
    fields.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn token(id: &str, owner: &str, tags: EntityValue) -> Record {
    record(&[("id", id.into()), ("owner", owner.into()), ("tags", tags)])
}

async fn execute(store: Arc<RecordingStore>, document: &str) -> Response {
    let registry = build(entity_schema()).unwrap();
    let executor = Executor::new(registry, store);

    executor.execute(QueryDocument::from_json(document).unwrap()).await
}

fn account_tokens(arguments: serde_json::Value) -> String {
    let document = json!({
        "selections": [{
            "name": "account",
            "arguments": { "id": "0xa" },
            "selections": [{ "name": "tokens", "arguments": arguments, "selections": [{ "name": "id" }] }]
        }]
    });

    document.to_string()
}

fn base_store() -> RecordingStore {
    RecordingStore::default()
        .with("Account", record(&[("id", "0xa".into())]))
        .with("Token", token("t1", "0xa", EntityValue::List(vec![])))
}

#[tokio::test]
async fn derived_field_without_arguments_uses_default_filter() {
    let store = Arc::new(base_store());
    let response = execute(store.clone(), &account_tokens(json!({}))).await;

    assert!(!response.has_errors(), "{:?}", response.errors);
    assert_eq!(store.filters(), vec![Filter::default().where_eq("owner", "0xa")]);

    assert_eq!(
        serde_json::to_value(&store.filters()[0]).unwrap(),
        json!({ "where": { "owner": "0xa" }, "skip": 0, "first": 100, "orderBy": "id", "orderDirection": "asc" })
    );

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({ "data": { "account": { "tokens": [{ "id": "t1" }] } } })
    );
}

#[tokio::test]
async fn derived_field_forwards_timestamp_only_when_supplied() {
    let store = Arc::new(base_store());
    execute(store.clone(), &account_tokens(json!({ "timestamp": 1700 }))).await;
    execute(store.clone(), &account_tokens(json!({ "timestamp": 0 }))).await;
    execute(store.clone(), &account_tokens(json!({ "timestamp": null }))).await;

    let timestamps: Vec<Option<i64>> = store.filters().iter().map(|f| f.timestamp).collect();
    assert_eq!(timestamps, vec![Some(1700), Some(0), None]);

    let serialized = serde_json::to_value(&store.filters()[2]).unwrap();
    assert!(serialized.get("timestamp").is_none());
}

#[tokio::test]
async fn derived_field_forwards_paging_verbatim() {
    let store = Arc::new(base_store());
    let arguments = json!({ "skip": 5, "first": 2, "orderBy": "value", "orderDirection": "desc" });
    execute(store.clone(), &account_tokens(arguments)).await;

    let expected = Filter::default()
        .skip(5)
        .first(2)
        .order_by("value", query_connector::SortOrder::Desc)
        .where_eq("owner", "0xa");

    assert_eq!(store.filters(), vec![expected]);
}

#[tokio::test]
async fn big_int_fields_resolve_to_decimal_strings() {
    let value = BigInt::from_str("123456789012345678901234567890").unwrap();
    let mut stored = token("t1", "0xa", EntityValue::List(vec![]));
    stored.insert("value".into(), EntityValue::BigInt(value));

    let store = Arc::new(RecordingStore::default().with("Token", stored));
    let document = indoc! {r#"
        {
          "selections": [
            { "name": "token", "arguments": { "id": "t1" }, "selections": [{ "name": "value" }] }
          ]
        }
    "#};

    let response = execute(store, document).await;

    assert_eq!(
        serde_json::to_value(&response.data).unwrap(),
        json!({ "token": { "value": "123456789012345678901234567890" } })
    );
}

#[tokio::test]
async fn missing_required_relationship_errors_while_siblings_resolve() {
    let store = Arc::new(RecordingStore::default().with("Token", token("t1", "0xgone", EntityValue::List(vec![]))));
    let document = indoc! {r#"
        {
          "selections": [
            {
              "name": "token",
              "arguments": { "id": "t1" },
              "selections": [{ "name": "id" }, { "name": "owner", "selections": [{ "name": "id" }] }]
            }
          ]
        }
    "#};

    let response = execute(store, document).await;

    assert_eq!(response.get("token.id"), Some(&query_core::Item::Value("t1".into())));
    assert!(response.get("token.owner").unwrap().is_null());

    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].kind, FieldErrorKind::RecordNotFound);
    assert_eq!(
        response.errors[0].path,
        vec![PathSegment::Field("token".into()), PathSegment::Field("owner".into())]
    );
}

async fn tags_of(tags: EntityValue) -> Response {
    let store = Arc::new(RecordingStore::default().with("Token", token("t1", "0xa", tags)));
    let document = json!({
        "selections": [{ "name": "token", "arguments": { "id": "t1" }, "selections": [{ "name": "tags" }] }]
    });

    execute(store, &document.to_string()).await
}

#[tokio::test]
async fn required_list_of_required_elements_enforces_both_wrappers() {
    let empty = tags_of(EntityValue::List(vec![])).await;
    assert!(!empty.has_errors());
    assert_eq!(empty.get("token.tags"), Some(&query_core::Item::List(vec![])));

    let null = tags_of(EntityValue::Null).await;
    assert_eq!(null.errors.len(), 1);
    assert_eq!(null.errors[0].kind, FieldErrorKind::NullabilityViolation);
    assert!(null.get("token.tags").unwrap().is_null());

    let null_element = tags_of(EntityValue::List(vec!["a".into(), EntityValue::Null])).await;
    assert_eq!(null_element.errors.len(), 1);
    assert_eq!(null_element.errors[0].kind, FieldErrorKind::NullabilityViolation);
    assert_eq!(
        null_element.errors[0].path,
        vec![
            PathSegment::Field("token".into()),
            PathSegment::Field("tags".into()),
            PathSegment::Index(1)
        ]
    );
}

#[tokio::test]
async fn argument_and_selection_errors_stay_local() {
    let store = Arc::new(base_store());
    let document = json!({
        "selections": [
            { "name": "nope" },
            { "name": "tokens", "arguments": { "first": -1 }, "selections": [{ "name": "id" }] },
            { "name": "tokens", "alias": "all", "selections": [{ "name": "id" }] }
        ]
    });

    let response = execute(store, &document.to_string()).await;
    let kinds: Vec<FieldErrorKind> = response.errors.iter().map(|e| e.kind).collect();

    assert_eq!(kinds, vec![FieldErrorKind::UnknownField, FieldErrorKind::InvalidArgument]);
    assert!(response.get("nope").unwrap().is_null());
    assert!(response.get("tokens").unwrap().is_null());
    assert_eq!(
        serde_json::to_value(response.get("all").unwrap()).unwrap(),
        json!([{ "id": "t1" }])
    );
}

#[tokio::test]
async fn enum_values_outside_the_enum_are_type_mismatches() {
    let mut stored = token("t1", "0xa", EntityValue::List(vec![]));
    stored.insert("color".into(), EntityValue::Enum("BLUE".into()));

    let store = Arc::new(RecordingStore::default().with("Token", stored));
    let document = json!({
        "selections": [{ "name": "token", "arguments": { "id": "t1" }, "selections": [{ "name": "color" }] }]
    });

    let response = execute(store, &document.to_string()).await;

    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].kind, FieldErrorKind::TypeMismatch);
}

#[tokio::test]
async fn int_fields_must_fit_32_bits() {
    let store = Arc::new(
        RecordingStore::default()
            .with("Account", record(&[("id", "a".into()), ("balance", EntityValue::Int(1 << 40))]))
            .with("Account", record(&[("id", "b".into()), ("balance", EntityValue::Int(7))])),
    );
    let document = json!({
        "selections": [
            { "name": "account", "alias": "a", "arguments": { "id": "a" }, "selections": [{ "name": "balance" }] },
            { "name": "account", "alias": "b", "arguments": { "id": "b" }, "selections": [{ "name": "balance" }] }
        ]
    });

    let response = execute(store, &document.to_string()).await;

    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].kind, FieldErrorKind::TypeMismatch);
    assert_eq!(response.get("b.balance"), Some(&query_core::Item::Value(EntityValue::Int(7))));
}
