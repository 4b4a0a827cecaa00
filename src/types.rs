//! Core types for spark-fiber.
//!
//! These types define the foundation that everything builds on.
//! They flow from element descriptors through fibers onto the display surface.

use std::collections::BTreeMap;
use std::fmt;

use serde::{ser, Deserialize, Serialize, Serializer};

// =============================================================================
// Constants
// =============================================================================

/// Wire name of the text sentinel type.
pub const TEXT_ELEMENT: &str = "TEXT_ELEMENT";

/// Attribute a text element carries its content in.
pub const NODE_VALUE: &str = "nodeValue";

/// Props key holding the child list. Never an attribute.
pub const CHILDREN: &str = "children";

// =============================================================================
// Element Type
// =============================================================================

/// What kind of display node an element (and its fiber) produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementType {
    /// Bare text-content node.
    Text,
    /// Structural node tagged with a name (`div`, `a`, ...).
    Tag(String),
}

impl ElementType {
    /// Tag name, `None` for text.
    pub fn tag(&self) -> Option<&str> {
        match self {
            ElementType::Text => None,
            ElementType::Tag(tag) => Some(tag),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ElementType::Text)
    }

    /// Name as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            ElementType::Text => TEXT_ELEMENT,
            ElementType::Tag(tag) => tag,
        }
    }
}

impl From<&str> for ElementType {
    fn from(value: &str) -> Self {
        if value == TEXT_ELEMENT {
            ElementType::Text
        } else {
            ElementType::Tag(value.to_string())
        }
    }
}

impl From<String> for ElementType {
    fn from(value: String) -> Self {
        if value == TEXT_ELEMENT {
            ElementType::Text
        } else {
            ElementType::Tag(value)
        }
    }
}

impl From<ElementType> for String {
    fn from(value: ElementType) -> Self {
        match value {
            ElementType::Text => TEXT_ELEMENT.to_string(),
            ElementType::Tag(tag) => tag,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Attribute Values
// =============================================================================

/// Value of a single element attribute.
///
/// Scalars only. Nested objects are not assignable onto a display node.
/// JSON has no NaN or infinity, so a non-finite `Float` refuses to serialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    #[serde(serialize_with = "serialize_finite")]
    Float(f64),
    Str(String),
}

fn serialize_finite<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        Err(ser::Error::custom(format!("{} is not a finite number", value)))
    }
}

impl AttrValue {
    /// False only for a NaN or infinite `Float`.
    pub fn is_finite(&self) -> bool {
        match self {
            AttrValue::Float(v) => v.is_finite(),
            _ => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(v) => write!(f, "{}", v),
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Float(v) => write!(f, "{}", v),
            AttrValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(value as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

/// Attribute name → value, in stable (sorted) order.
pub type Attributes = BTreeMap<String, AttrValue>;

// =============================================================================
// Tests
// =============================================================================
