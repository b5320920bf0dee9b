//! Executes query documents against the root type of a registry.
//!
//! Sibling fields resolve concurrently. A failing field yields `null` in its own slot and
//! an entry in the response's `errors`; its parent and siblings are unaffected, so a
//! response can carry data and errors at the same time.

use crate::{
    FieldError, FieldErrorKind, Item, List, Map, Path, PathSegment, QueryDocument, Response, Selection,
    arguments::coerce_arguments,
    context::RequestContext,
    resolver::{self, Resolved},
};
use entity_value::{EntityValue, Record, encode_bytes};
use futures::future::{BoxFuture, FutureExt, join_all};
use query_connector::Connector;
use schema::{IntoArc, ObjectType, OutputType, ScalarType, TypeRegistryRef};
use std::sync::Arc;

pub struct Executor {
    registry: TypeRegistryRef,
    store: Arc<dyn Connector>,
}

impl Executor {
    pub fn new(registry: TypeRegistryRef, store: Arc<dyn Connector>) -> Self {
        Self { registry, store }
    }

    #[tracing::instrument(skip_all, fields(store = self.store.name(), selections = document.selections.len()))]
    pub async fn execute(&self, document: QueryDocument) -> Response {
        let ctx = RequestContext::new(self.store.clone());
        let data = execute_selection_set(&ctx, self.registry.query(), None, &document.selections, &[]).await;
        let errors = ctx.into_errors();

        tracing::debug!(errors = errors.len(), "Executed query document");

        Response {
            data: Item::Map(data),
            errors,
        }
    }
}

fn child(path: &[PathSegment], segment: PathSegment) -> Path {
    let mut path = path.to_vec();
    path.push(segment);
    path
}

fn execute_selection_set<'a>(
    ctx: &'a RequestContext,
    object_type: &'a ObjectType,
    parent: Option<&'a Record>,
    selections: &'a [Selection],
    path: &'a [PathSegment],
) -> BoxFuture<'a, Map> {
    async move {
        let fields = selections.iter().map(move |selection| async move {
            let key = selection.response_key().to_owned();
            let path = child(path, PathSegment::Field(key.clone()));
            let item = execute_field(ctx, object_type, parent, selection, path).await;

            (key, item)
        });

        join_all(fields).await.into_iter().collect()
    }
    .boxed()
}

async fn execute_field(
    ctx: &RequestContext,
    object_type: &ObjectType,
    parent: Option<&Record>,
    selection: &Selection,
    path: Path,
) -> Item {
    let Some(field) = object_type.find_field(&selection.name) else {
        let message = format!("Field `{}` does not exist on type `{}`.", selection.name, object_type.name());
        ctx.push_error(FieldError::new(FieldErrorKind::UnknownField, message, path));

        return Item::null();
    };

    let resolved = match coerce_arguments(field, &selection.arguments) {
        Ok(arguments) => resolver::resolve(ctx, field, parent, &arguments).await,
        Err(err) => Err(err),
    };

    let completed = match resolved {
        Ok(resolved) => complete_value(ctx, &field.field_type, selection, resolved, path).await,
        Err(err) => Err(FieldError::from_core(err, path)),
    };

    completed.unwrap_or_else(|err| {
        ctx.push_error(err);
        Item::null()
    })
}

/// Checks a resolved value against `field_type`, executing sub-selections of objects.
fn complete_value<'a>(
    ctx: &'a RequestContext,
    field_type: &'a OutputType,
    selection: &'a Selection,
    resolved: Resolved,
    path: Path,
) -> BoxFuture<'a, Result<Item, FieldError>> {
    async move {
        match field_type {
            OutputType::NonNull(inner) => {
                let item = complete_value(ctx, inner, selection, resolved, path.clone()).await?;

                if item.is_null() {
                    return Err(FieldError::new(
                        FieldErrorKind::NullabilityViolation,
                        format!("Cannot return null for non-nullable field of type `{field_type}`."),
                        path,
                    ));
                }

                Ok(item)
            }

            _ if is_null(&resolved) => Ok(Item::null()),

            OutputType::List(inner) => {
                let elements: Vec<Resolved> = match resolved {
                    Resolved::Records(records) => records.into_iter().map(|r| Resolved::Record(Some(r))).collect(),
                    Resolved::Value(EntityValue::List(values)) => values.into_iter().map(Resolved::Value).collect(),
                    other => return Err(mismatch(field_type, &other, path)),
                };

                let elements = elements.into_iter().enumerate().map(|(idx, element)| {
                    complete_value(ctx, inner, selection, element, child(&path, PathSegment::Index(idx)))
                });

                let items: List = join_all(elements).await.into_iter().collect::<Result<_, _>>()?;

                Ok(Item::List(items))
            }

            OutputType::Object(object_type) => {
                let record = match resolved {
                    Resolved::Record(Some(record)) => record,
                    other => return Err(mismatch(field_type, &other, path)),
                };

                if selection.selections.is_empty() {
                    return Err(FieldError::new(
                        FieldErrorKind::TypeMismatch,
                        format!(
                            "Field `{}` of type `{field_type}` must have a selection of subfields.",
                            selection.name
                        ),
                        path,
                    ));
                }

                let object_type = object_type.into_arc();
                let map = execute_selection_set(ctx, &object_type, Some(&record), &selection.selections, &path).await;

                Ok(Item::Map(map))
            }

            OutputType::Enum(enum_type) => match &resolved {
                Resolved::Value(EntityValue::Enum(value) | EntityValue::String(value))
                    if enum_type.value_for(value).is_some() =>
                {
                    Ok(Item::Value(EntityValue::Enum(value.clone())))
                }
                other => Err(mismatch(field_type, other, path)),
            },

            OutputType::Scalar(scalar) => match resolved {
                Resolved::Value(value) => complete_scalar(*scalar, value)
                    .map(Item::Value)
                    .ok_or_else(|| scalar_mismatch(*scalar, path)),
                other => Err(mismatch(field_type, &other, path)),
            },
        }
    }
    .boxed()
}

fn is_null(resolved: &Resolved) -> bool {
    matches!(resolved, Resolved::Value(EntityValue::Null) | Resolved::Record(None))
}

/// Serializable form of a scalar, or `None` if the value does not fit the scalar type.
fn complete_scalar(scalar: ScalarType, value: EntityValue) -> Option<EntityValue> {
    match (scalar, value) {
        (ScalarType::String, v @ EntityValue::String(_)) => Some(v),
        (ScalarType::Int, EntityValue::Int(i)) => i32::try_from(i).ok().map(EntityValue::from),
        (ScalarType::Float, v @ EntityValue::Float(_)) => Some(v),
        (ScalarType::Float, EntityValue::Int(i)) => Some(EntityValue::Float(i as f64)),
        (ScalarType::Boolean, v @ EntityValue::Boolean(_)) => Some(v),
        (ScalarType::BigInt, v @ EntityValue::String(_)) => Some(v),
        (ScalarType::BigInt, EntityValue::BigInt(b)) => Some(EntityValue::String(b.to_string())),
        (ScalarType::Bytes, EntityValue::Bytes(b)) => Some(EntityValue::String(encode_bytes(&b))),
        (ScalarType::Bytes, v @ EntityValue::String(_)) => Some(v),
        _ => None,
    }
}

fn scalar_mismatch(scalar: ScalarType, path: Path) -> FieldError {
    FieldError::new(
        FieldErrorKind::TypeMismatch,
        format!("Value cannot be represented as `{scalar}`."),
        path,
    )
}

fn mismatch(field_type: &OutputType, resolved: &Resolved, path: Path) -> FieldError {
    let found = match resolved {
        Resolved::Value(value) => value.type_name(),
        Resolved::Record(_) => "record",
        Resolved::Records(_) => "list of records",
    };

    FieldError::new(
        FieldErrorKind::TypeMismatch,
        format!("Expected a value of type `{field_type}`, found {found}."),
        path,
    )
}
