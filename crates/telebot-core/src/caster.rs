//! The value caster.
//!
//! [`cast`] converts a decoded [`Value`] into the shape a [`Type`] demands.
//! Rules are tried in order and the first applicable one wins:
//!
//! 1. `Array(T)`: the input must be an array; every element is cast to `T`.
//! 2. The input already satisfies a candidate: it is returned unchanged.
//! 3. A primitive input and a primitive candidate: coerced with the table below.
//! 4. A map input and an object or family candidate: the object is constructed.
//! 5. Otherwise `UncastableType`.
//!
//! Primitive coercion comes before object construction, so a scalar declared
//! as `string|Object` never turns into an object.
//!
//! # Coercion table
//!
//! | from \ to | integer | float | boolean | string |
//! |-----------|---------|-------|---------|--------|
//! | integer | same | exact | `0` is false | decimal |
//! | float | truncated (finite, in range) | same | `0.0` is false | shortest decimal |
//! | boolean | 0 / 1 | 0.0 / 1.0 | same | `"1"` / `""` |
//! | string | trimmed integer or float literal | trimmed float literal | `""` and `"0"` are false | same |
//!
//! Strings that are not numeric fail instead of silently becoming zero.

use crate::descriptor::Type;
use crate::error::{ObjectError, ObjectResult};
use crate::object::Object;
use crate::value::Value;

/// Casts `value` to the shape described by `ty`.
pub fn cast(value: Value, ty: &Type) -> ObjectResult<Value> {
    if let Type::Array(inner) = ty {
        return cast_array(value, ty, inner);
    }

    let candidates = ty.candidates();

    if candidates.iter().any(|candidate| satisfies(&value, candidate)) {
        return Ok(value);
    }

    if value.is_primitive() {
        for candidate in candidates.iter().filter(|c| c.is_primitive()) {
            if let Some(coerced) = coerce(&value, candidate) {
                return Ok(coerced);
            }
        }
        return Err(ObjectError::uncastable(ty, value.kind()));
    }

    match value {
        Value::Array(items) => match candidates.iter().find_map(|c| match c {
            Type::Array(inner) => Some((c, *inner)),
            _ => None,
        }) {
            Some((array_ty, inner)) => cast_array(Value::Array(items), array_ty, inner),
            None => Err(ObjectError::uncastable(ty, "array")),
        },
        Value::Map(map) => {
            for candidate in candidates {
                match candidate {
                    Type::Object(schema) => return Object::new(*schema, map).map(Value::Object),
                    Type::Family(family) => {
                        if let Some(schema) = family.resolve(&map) {
                            return Object::new(schema, map).map(Value::Object);
                        }
                    }
                    _ => {}
                }
            }
            Err(ObjectError::uncastable(ty, "map"))
        }
        other => Err(ObjectError::uncastable(ty, other.kind())),
    }
}

fn cast_array(value: Value, ty: &Type, inner: &Type) -> ObjectResult<Value> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| cast(item, inner))
            .collect::<ObjectResult<Vec<_>>>()
            .map(Value::Array),
        other => Err(ObjectError::uncastable(ty, other.kind())),
    }
}

/// Returns `true` if `value` already has the shape of `candidate`.
fn satisfies(value: &Value, candidate: &Type) -> bool {
    match (value, candidate) {
        (Value::Integer(_), Type::Integer)
        | (Value::Float(_), Type::Float)
        | (Value::Boolean(_), Type::Boolean)
        | (Value::String(_), Type::String) => true,
        (Value::Object(object), Type::Object(schema)) => object.schema().is(schema),
        (Value::Object(object), Type::Family(family)) => family.contains(object.schema()),
        _ => false,
    }
}

/// Applies the coercion table. `None` means the conversion is undefined.
fn coerce(value: &Value, target: &Type) -> Option<Value> {
    match target {
        Type::Integer => to_integer(value).map(Value::Integer),
        Type::Float => to_float(value).map(Value::Float),
        Type::Boolean => Some(Value::Boolean(to_boolean(value))),
        Type::String => to_string(value).map(Value::String),
        _ => None,
    }
}

fn to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Float(f) => truncate(*f),
        Value::Boolean(b) => Some(i64::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

fn truncate(f: f64) -> Option<i64> {
    // `i64::MAX as f64` rounds up to 2^63, hence the strict upper bound.
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Integer(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::Boolean(b) => *b,
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Null => false,
        _ => true,
    }
}

fn to_string(value: &Value) -> Option<String> {
    match value {
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(true) => Some("1".to_owned()),
        Value::Boolean(false) => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Discriminator, Family, Field, Schema};
    use crate::error::ErrorKind;
    use crate::value::Map;
    use serde_json::json;

    static SEND_OPTIONS: Schema = Schema {
        name: "SendOptions",
        fields: &[
            Field {
                name: "chat_id",
                ty: Type::Union(&[Type::String, Type::Integer]),
            },
            Field {
                name: "disable_notification",
                ty: Type::Boolean,
            },
        ],
    };

    static ARTICLE: Schema = Schema {
        name: "Article",
        fields: &[
            Field {
                name: "type",
                ty: Type::String,
            },
            Field {
                name: "id",
                ty: Type::String,
            },
        ],
    };

    static PHOTO: Schema = Schema {
        name: "Photo",
        fields: &[
            Field {
                name: "type",
                ty: Type::String,
            },
            Field {
                name: "photo_url",
                ty: Type::String,
            },
        ],
    };

    static RESULT: Family = Family {
        name: "Result",
        discriminator: Discriminator::Tag {
            field: "type",
            variants: &[("article", &ARTICLE), ("photo", &PHOTO)],
        },
    };

    static ANSWER: Schema = Schema {
        name: "Answer",
        fields: &[Field {
            name: "results",
            ty: Type::Array(&Type::Family(&RESULT)),
        }],
    };

    fn map(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_idempotent_primitives() {
        let union = Type::Union(&[Type::String, Type::Integer, Type::Boolean]);
        for value in [Value::from("42"), Value::from(42), Value::from(false)] {
            assert_eq!(cast(value.clone(), &union).unwrap(), value);
        }
        assert_eq!(cast(Value::from(0.5), &Type::Float).unwrap(), Value::Float(0.5));
    }

    #[test]
    fn test_coerce_to_first_primitive_candidate() {
        let ty = Type::Union(&[Type::Integer, Type::Boolean]);
        assert_eq!(cast(Value::from(" 12 "), &ty).unwrap(), Value::Integer(12));
        assert_eq!(cast(Value::from("3.9"), &ty).unwrap(), Value::Integer(3));
        assert_eq!(cast(Value::from(0.5), &ty).unwrap(), Value::Integer(0));
    }

    #[test]
    fn test_matching_kind_wins_over_coercion() {
        let ty = Type::Union(&[Type::Integer, Type::String]);
        assert_eq!(cast(Value::from(true), &ty).unwrap(), Value::Integer(1));
        assert_eq!(cast(Value::from(" 12 "), &ty).unwrap(), Value::from(" 12 "));
        assert_eq!(cast(Value::from("abc"), &ty).unwrap(), Value::from("abc"));
    }

    #[test]
    fn test_boolean_table() {
        let cases = [
            (Value::from("1"), true),
            (Value::from("0"), false),
            (Value::from(""), false),
            (Value::from("false"), true),
            (Value::from(0), false),
            (Value::from(-3), true),
            (Value::from(0.0), false),
        ];
        for (input, expected) in cases {
            assert_eq!(cast(input, &Type::Boolean).unwrap(), Value::Boolean(expected));
        }
    }

    #[test]
    fn test_string_table() {
        assert_eq!(cast(Value::from(42), &Type::String).unwrap(), Value::from("42"));
        assert_eq!(cast(Value::from(1.0), &Type::String).unwrap(), Value::from("1"));
        assert_eq!(cast(Value::from(2.5), &Type::String).unwrap(), Value::from("2.5"));
        assert_eq!(cast(Value::from(true), &Type::String).unwrap(), Value::from("1"));
        assert_eq!(cast(Value::from(false), &Type::String).unwrap(), Value::from(""));
    }

    #[test]
    fn test_non_numeric_string_is_uncastable() {
        let err = cast(Value::from("abc"), &Type::Integer).unwrap_err();
        assert_eq!(err, ObjectError::uncastable("integer", "string"));
        assert!(cast(Value::from(f64::NAN), &Type::Integer).is_err());
    }

    #[test]
    fn test_array_of_type() {
        let ty = Type::Array(&Type::Integer);
        let value = Value::from(vec![Value::from("1"), Value::from(2), Value::from(true)]);
        assert_eq!(
            cast(value, &ty).unwrap(),
            Value::from(vec![1_i64, 2, 1])
        );

        let err = cast(Value::from(1), &ty).unwrap_err();
        assert_eq!(err, ObjectError::uncastable("[integer]", "integer"));
    }

    #[test]
    fn test_nested_arrays() {
        let ty = Type::Array(&Type::Array(&Type::String));
        let value = map(json!([["a", 1], []]));
        assert_eq!(cast(value, &ty).unwrap(), map(json!([["a", "1"], []])));
    }

    #[test]
    fn test_map_to_object_scenario() {
        let value = map(json!({"chat_id": "42", "disable_notification": "1"}));
        let casted = cast(value, &Type::Object(&SEND_OPTIONS)).unwrap();
        let object = casted.as_object().unwrap();
        assert_eq!(object.field("chat_id"), Some(&Value::from("42")));
        assert_eq!(object.field("disable_notification"), Some(&Value::Boolean(true)));
    }

    const OPTIONS_OR_STRING: Type = Type::Union(&[Type::Object(&SEND_OPTIONS), Type::String]);

    #[test]
    fn test_primitive_before_object() {
        assert_eq!(cast(Value::from(5), &OPTIONS_OR_STRING).unwrap(), Value::from("5"));
    }

    #[test]
    fn test_family_by_discriminator() {
        let value = map(json!({"results": [{"type": "article", "id": "1"}]}));
        let answer = cast(value, &Type::Object(&ANSWER)).unwrap();
        let results = answer.as_object().unwrap().field("results").unwrap();
        let items = results.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind(), "Article");
    }

    #[test]
    fn test_family_unknown_tag() {
        let value = map(json!({"type": "sticker"}));
        let err = cast(value, &Type::Family(&RESULT)).unwrap_err();
        assert_eq!(err, ObjectError::uncastable("Result", "map"));
    }

    #[test]
    fn test_object_recast_is_idempotent() {
        let value = cast(map(json!({"type": "photo", "photo_url": "x"})), &Type::Family(&RESULT)).unwrap();
        assert_eq!(cast(value.clone(), &Type::Family(&RESULT)).unwrap(), value);
        assert_eq!(cast(value.clone(), &Type::Object(&PHOTO)).unwrap(), value);

        let err = cast(value, &Type::Object(&ARTICLE)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UncastableType);
    }

    #[test]
    fn test_null_is_uncastable() {
        let err = cast(Value::Null, &Type::Union(&[Type::String, Type::Integer])).unwrap_err();
        assert_eq!(err, ObjectError::uncastable("string|integer", "null"));
    }

    #[test]
    fn test_map_without_object_candidate() {
        let err = cast(Value::from(Map::new()), &Type::String).unwrap_err();
        assert_eq!(err, ObjectError::uncastable("string", "map"));
    }
}
