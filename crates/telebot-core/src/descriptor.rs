//! Type descriptors and object schemas.
//!
//! Descriptors are plain `'static` data so that schemas can be declared as
//! `static` items and reference each other, including themselves:
//!
//! ```rust,ignore
//! pub static MESSAGE: Schema = Schema {
//!     name: "Message",
//!     fields: &[
//!         Field { name: "message_id", ty: Type::Integer },
//!         Field { name: "chat_id", ty: Type::Union(&[Type::String, Type::Integer]) },
//!         Field { name: "photo", ty: Type::Array(&Type::Object(&PHOTO_SIZE)) },
//!         Field { name: "reply_to_message", ty: Type::Object(&MESSAGE) },
//!     ],
//! };
//! ```
//!
//! Abstract object kinds (keyboards, inline query results, ...) are described
//! by a [`Family`], which picks the concrete [`Schema`] for a payload through
//! an explicit discriminator table.

use std::fmt;

use crate::value::Map;

/// Declarative specification of the runtime shape a value is cast to.
#[derive(Clone, Copy)]
pub enum Type {
    /// 64-bit signed integer.
    Integer,
    /// 64-bit float.
    Float,
    /// Boolean.
    Boolean,
    /// UTF-8 string.
    String,
    /// A concrete structured object.
    Object(&'static Schema),
    /// An abstract object kind resolved through a discriminator.
    Family(&'static Family),
    /// Ordered alternatives; the first applicable one wins.
    Union(&'static [Type]),
    /// A sequence whose elements all have the wrapped type.
    Array(&'static Type),
}

impl Type {
    /// Returns the ordered candidate list of this descriptor.
    ///
    /// A union yields its members; any other descriptor yields itself.
    pub fn candidates(&self) -> &[Type] {
        match self {
            Self::Union(members) => *members,
            other => std::slice::from_ref(other),
        }
    }

    /// Returns `true` for the four primitive tags.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Float | Self::Boolean | Self::String
        )
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Boolean => f.write_str("boolean"),
            Self::String => f.write_str("string"),
            Self::Object(schema) => f.write_str(schema.name),
            Self::Family(family) => f.write_str(family.name),
            Self::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            Self::Array(inner) => write!(f, "[{inner}]"),
        }
    }
}

// Schemas may be self-referential, so Debug prints the rendered form instead
// of walking into nested schemas.
impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({self})")
    }
}

// =============================================================================
// Schema
// =============================================================================

/// A declared field: its name and its single type descriptor.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Wire name of the field.
    pub name: &'static str,
    /// Type the field value is cast to.
    pub ty: Type,
}

/// The field schema of a structured object.
pub struct Schema {
    /// Object type name, e.g. `"Message"`.
    pub name: &'static str,
    /// Declared fields in declaration order.
    pub fields: &'static [Field],
}

impl Schema {
    /// Looks up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns `true` if both schemas describe the same object type.
    pub fn is(&self, other: &Schema) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("fields", &self.fields.len())
            .finish()
    }
}

// =============================================================================
// Family
// =============================================================================

/// How a [`Family`] chooses its concrete schema.
#[derive(Clone, Copy)]
pub enum Discriminator {
    /// A string field whose value names the variant (e.g. `"type": "article"`).
    Tag {
        /// Name of the discriminator field.
        field: &'static str,
        /// Tag value to schema table.
        variants: &'static [(&'static str, &'static Schema)],
    },
    /// The first variant whose marker field is present in the payload.
    Presence(&'static [(&'static str, &'static Schema)]),
}

/// An abstract object kind with several concrete schemas.
pub struct Family {
    /// Family name, e.g. `"InlineQueryResult"`.
    pub name: &'static str,
    /// Variant selection rule.
    pub discriminator: Discriminator,
}

impl Family {
    /// Picks the concrete schema for an untyped map.
    pub fn resolve(&self, map: &Map) -> Option<&'static Schema> {
        match self.discriminator {
            Discriminator::Tag { field, variants } => {
                let tag = map.get(field)?.as_str()?;
                variants
                    .iter()
                    .find(|(name, _)| *name == tag)
                    .map(|(_, schema)| *schema)
            }
            Discriminator::Presence(variants) => variants
                .iter()
                .find(|(marker, _)| map.get(*marker).is_some_and(|v| !v.is_null()))
                .map(|(_, schema)| *schema),
        }
    }

    /// Returns `true` if `schema` is one of the family's variants.
    pub fn contains(&self, schema: &Schema) -> bool {
        self.variants().any(|variant| variant.is(schema))
    }

    /// Iterates over the variant schemas.
    pub fn variants(&self) -> impl Iterator<Item = &'static Schema> {
        let table = match self.discriminator {
            Discriminator::Tag { variants, .. } => variants,
            Discriminator::Presence(variants) => variants,
        };
        table.iter().map(|(_, schema)| *schema)
    }
}

impl fmt::Debug for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Family").field("name", &self.name).finish()
    }
}
