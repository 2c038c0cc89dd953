//! Write-once structured objects.
//!
//! An [`Object`] is built exactly once from an untyped map by walking its
//! [`Schema`]: declared fields present in the map are cast and stored, every
//! other key is ignored. The field list is private and never changes
//! afterwards; reads go through [`Object::field`], dotted-path lookup and
//! serialization.
//!
//! ```rust,ignore
//! let update = Object::from_json(&UPDATE, payload)?;
//! let chat_id = update.get("message.chat.id");
//! let text = update.lookup("message.entities[0].type")?;
//! ```

use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::caster::cast;
use crate::descriptor::Schema;
use crate::error::{ObjectError, ObjectResult};
use crate::path::{FieldPath, PathStep};
use crate::value::{FromValue, Map, Value};

struct ObjectInner {
    schema: &'static Schema,
    fields: Vec<(&'static str, Value)>,
}

/// An immutable instance of a [`Schema`].
///
/// Cloning is cheap; clones share the same field storage.
#[derive(Clone)]
pub struct Object {
    inner: Arc<ObjectInner>,
}

impl Object {
    /// Constructs an object from an untyped map.
    ///
    /// Fields are visited in schema order. Keys that are missing or `null`
    /// leave the field unset; keys the schema does not declare are dropped.
    pub fn new(schema: &'static Schema, mut map: Map) -> ObjectResult<Self> {
        let mut fields = Vec::with_capacity(schema.fields.len().min(map.len()));
        for field in schema.fields {
            match map.remove(field.name) {
                None | Some(Value::Null) => continue,
                Some(value) => fields.push((field.name, cast(value, &field.ty)?)),
            }
        }
        Ok(Self {
            inner: Arc::new(ObjectInner { schema, fields }),
        })
    }

    /// Constructs an object from decoded JSON.
    pub fn from_json(schema: &'static Schema, json: serde_json::Value) -> ObjectResult<Self> {
        match Value::from(json) {
            Value::Map(map) => Self::new(schema, map),
            other => Err(ObjectError::uncastable(schema.name, other.kind())),
        }
    }

    /// Returns the object's schema.
    pub fn schema(&self) -> &'static Schema {
        self.inner.schema
    }

    /// Returns the schema name.
    pub fn name(&self) -> &'static str {
        self.inner.schema.name
    }

    /// Returns a materialized field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.inner
            .fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Returns `true` if the field was present in the source payload.
    pub fn has(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Iterates over materialized fields in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.inner.fields.iter().map(|(name, value)| (*name, value))
    }

    /// Number of materialized fields.
    pub fn len(&self) -> usize {
        self.inner.fields.len()
    }

    /// Returns `true` if no field was materialized.
    pub fn is_empty(&self) -> bool {
        self.inner.fields.is_empty()
    }

    // =========================================================================
    // Dotted-path access
    // =========================================================================

    /// Resolves a dotted path, returning `None` on any failure.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.lookup(path).ok()
    }

    /// Resolves a dotted path, failing with `InvalidPath` or `UndefinedOffset`.
    pub fn lookup(&self, path: &str) -> ObjectResult<&Value> {
        let parsed = FieldPath::parse(path)?;
        let mut steps = parsed.steps().iter();

        // A parsed path always starts with a field.
        let mut current = match steps.next() {
            Some(PathStep::Field(key)) => self
                .field(key)
                .ok_or_else(|| ObjectError::undefined_offset(key.as_str(), self.name()))?,
            _ => return Err(ObjectError::invalid_path(path)),
        };

        for step in steps {
            current = match (step, current) {
                (PathStep::Field(key), Value::Object(object)) => object
                    .field(key)
                    .ok_or_else(|| ObjectError::undefined_offset(key.as_str(), object.name()))?,
                (PathStep::Field(key), Value::Map(map)) => map
                    .get(key)
                    .ok_or_else(|| ObjectError::undefined_offset(key.as_str(), "map"))?,
                (PathStep::Index(index), Value::Array(items)) => items
                    .get(*index)
                    .ok_or_else(|| ObjectError::undefined_offset(format!("[{index}]"), "array"))?,
                (PathStep::Field(key), other) => {
                    return Err(ObjectError::undefined_offset(key.as_str(), other.kind()));
                }
                (PathStep::Index(index), other) => {
                    return Err(ObjectError::undefined_offset(format!("[{index}]"), other.kind()));
                }
            };
        }

        Ok(current)
    }

    /// Resolves a dotted path and converts the value to `T`.
    ///
    /// Returns `None` if the path does not resolve or the value has another
    /// shape.
    pub fn extract<T: FromValue>(&self, path: &str) -> Option<T> {
        self.get(path)
            .cloned()
            .and_then(|value| T::from_value(value).ok())
    }

    /// Resolves a dotted path in either strict or lenient mode.
    ///
    /// Lenient mode maps every failure to `Ok(None)`.
    pub fn get_with(&self, path: &str, strict: bool) -> ObjectResult<Option<&Value>> {
        match self.lookup(path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if strict => Err(e),
            Err(_) => Ok(None),
        }
    }

    // =========================================================================
    // Write attempts
    // =========================================================================

    /// Always fails: objects are write-once.
    pub fn set(&self, field: &str, _value: impl Into<Value>) -> ObjectResult<()> {
        Err(self.access_violation(field))
    }

    /// Always fails: objects are write-once.
    pub fn unset(&self, field: &str) -> ObjectResult<()> {
        Err(self.access_violation(field))
    }

    fn access_violation(&self, field: &str) -> ObjectError {
        ObjectError::AccessViolation {
            field: field.to_owned(),
            object: self.name().to_owned(),
        }
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Returns the materialized fields as a JSON object, in schema order.
    pub fn to_array(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields()
                .map(|(name, value)| (name.to_owned(), value.to_json()))
                .collect(),
        )
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.schema().is(other.schema()) && self.inner.fields == other.inner.fields
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.name());
        for (name, value) in self.fields() {
            out.field(name, value);
        }
        out.finish()
    }
}

/// Compact JSON of the materialized fields.
impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_array())
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.fields() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Typed wrappers
// =============================================================================

/// A typed view over an [`Object`] of one fixed schema.
///
/// Implemented by every concrete domain type; the wrapper adds nothing but
/// the static guarantee that the object has [`TelegramObject::SCHEMA`].
pub trait TelegramObject: Sized {
    /// The schema every instance has.
    const SCHEMA: &'static Schema;

    /// Wraps an object without checking its schema.
    #[doc(hidden)]
    fn wrap(object: Object) -> Self;

    /// Borrows the underlying object.
    fn as_object(&self) -> &Object;

    /// Unwraps the underlying object.
    fn into_object(self) -> Object;

    /// Wraps an object, failing if it has a different schema.
    fn from_object(object: Object) -> ObjectResult<Self> {
        if object.schema().is(Self::SCHEMA) {
            Ok(Self::wrap(object))
        } else {
            Err(ObjectError::uncastable(Self::SCHEMA.name, object.name()))
        }
    }

    /// Constructs an instance from an untyped map.
    fn from_map(map: Map) -> ObjectResult<Self> {
        Object::new(Self::SCHEMA, map).map(Self::wrap)
    }

    /// Constructs an instance from decoded JSON.
    fn from_json(json: serde_json::Value) -> ObjectResult<Self> {
        Object::from_json(Self::SCHEMA, json).map(Self::wrap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Field, Type};
    use crate::error::ErrorKind;
    use serde_json::json;

    static USER: Schema = Schema {
        name: "User",
        fields: &[
            Field {
                name: "id",
                ty: Type::Integer,
            },
            Field {
                name: "first_name",
                ty: Type::String,
            },
            Field {
                name: "username",
                ty: Type::String,
            },
        ],
    };

    static ENTITY: Schema = Schema {
        name: "Entity",
        fields: &[
            Field {
                name: "type",
                ty: Type::String,
            },
            Field {
                name: "user",
                ty: Type::Object(&USER),
            },
        ],
    };

    static NOTE: Schema = Schema {
        name: "Note",
        fields: &[
            Field {
                name: "id",
                ty: Type::Integer,
            },
            Field {
                name: "from",
                ty: Type::Object(&USER),
            },
            Field {
                name: "entities",
                ty: Type::Array(&Type::Object(&ENTITY)),
            },
            Field {
                name: "reply",
                ty: Type::Object(&NOTE),
            },
        ],
    };

    fn note() -> Object {
        Object::from_json(
            &NOTE,
            json!({
                "id": "10",
                "unknown": 1,
                "from": {"id": 1, "first_name": "Ann"},
                "entities": [
                    {"type": "mention", "user": {"id": 2, "first_name": "Bob"}},
                    {"type": "bold"}
                ],
                "reply": {"id": 9, "from": {"id": 2, "first_name": "Bob", "username": null}}
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_construct_only_declared_and_present() {
        let user = Object::from_json(&USER, json!({"username": "ann", "id": 1, "extra": true})).unwrap();
        assert_eq!(user.len(), 2);
        assert!(!user.has("first_name"));
        assert!(!user.has("extra"));
        assert_eq!(user.to_array(), json!({"id": 1, "username": "ann"}));
    }

    #[test]
    fn test_to_array_follows_schema_order() {
        let user = Object::from_json(&USER, json!({"username": "ann", "id": 1})).unwrap();
        let keys: Vec<_> = user.to_array().as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["id", "username"]);
        assert_eq!(user.to_string(), r#"{"id":1,"username":"ann"}"#);
    }

    #[test]
    fn test_null_fields_are_unset() {
        let note = note();
        let reply_from = note.lookup("reply.from").unwrap().as_object().unwrap();
        assert!(!reply_from.has("username"));
        assert_eq!(
            note.lookup("reply").unwrap().to_json(),
            json!({"id": 9, "from": {"id": 2, "first_name": "Bob"}})
        );
    }

    #[test]
    fn test_nested_casting() {
        let note = note();
        assert_eq!(note.field("id"), Some(&Value::Integer(10)));
        assert_eq!(note.get("entities[0].user.first_name"), Some(&Value::from("Bob")));
        assert_eq!(note.get("entities[1].type"), Some(&Value::from("bold")));
        assert_eq!(note.get("reply.from.id"), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_extract_typed() {
        let note = note();
        assert_eq!(note.extract::<i64>("reply.id"), Some(9));
        assert_eq!(note.extract::<String>("from.first_name").as_deref(), Some("Ann"));
        assert_eq!(note.extract::<String>("from.id"), None);
        assert_eq!(note.extract::<Vec<Object>>("entities").map(|e| e.len()), Some(2));
    }

    #[test]
    fn test_strict_lookup_errors() {
        let note = note();
        assert_eq!(
            note.lookup("missing.b[0].c"),
            Err(ObjectError::undefined_offset("missing", "Note"))
        );
        assert_eq!(
            note.lookup("entities[5]"),
            Err(ObjectError::undefined_offset("[5]", "array"))
        );
        assert_eq!(
            note.lookup("entities[1].user"),
            Err(ObjectError::undefined_offset("user", "Entity"))
        );
        assert_eq!(
            note.lookup("id[0]"),
            Err(ObjectError::undefined_offset("[0]", "integer"))
        );
        assert_eq!(note.lookup("a..b"), Err(ObjectError::invalid_path("a..b")));
    }

    #[test]
    fn test_get_with_strict_flag() {
        let note = note();
        let err = note.get_with("from.b[0].c", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UndefinedOffset);
        assert_eq!(note.get_with("from.b[0].c", false), Ok(None));
        assert_eq!(note.get_with("][", false), Ok(None));
        assert_eq!(
            note.get_with("from.id", true),
            Ok(Some(&Value::Integer(1)))
        );
    }

    #[test]
    fn test_write_once() {
        let user = Object::from_json(&USER, json!({"id": 1})).unwrap();
        let before = user.to_array();

        let err = user.set("id", 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessViolation);
        let err = user.unset("id").unwrap_err();
        assert_eq!(
            err,
            ObjectError::AccessViolation {
                field: "id".into(),
                object: "User".into()
            }
        );
        assert_eq!(user.to_array(), before);
    }

    #[test]
    fn test_uncastable_field_fails_construction() {
        let err = Object::from_json(&USER, json!({"id": {"nested": true}})).unwrap_err();
        assert_eq!(err, ObjectError::uncastable("integer", "map"));

        let err = Object::from_json(&USER, json!([1, 2])).unwrap_err();
        assert_eq!(err, ObjectError::uncastable("User", "array"));
    }

    #[test]
    fn test_shared_between_threads() {
        let note = note();
        let clone = note.clone();
        let handle = std::thread::spawn(move || clone.get("from.first_name").cloned());
        assert_eq!(handle.join().unwrap(), Some(Value::from("Ann")));
        assert_eq!(note.get("from.first_name"), Some(&Value::from("Ann")));
    }
}
