//! Field schema that queries are compiled against.
//!
//! A [`Metadata`] is built once by the caller, usually from JSON:
//!
//! ```
//! use sift_lang::metadata::{FieldType, Metadata};
//!
//! let metadata = Metadata::from_json(r#"{
//!     "fields": [
//!         {
//!             "name": "status",
//!             "label": "Status",
//!             "type": "Boolean",
//!             "operators": ["Equal", "NotEqual"],
//!             "values": [{"name": "Enabled", "value": true}]
//!         }
//!     ]
//! }"#).unwrap();
//!
//! let field = metadata.field("STATUS").unwrap();
//! assert_eq!(field.field_type, FieldType::Boolean);
//! assert_eq!(field.lookup("enabled").unwrap().value, "true");
//! ```
//!
//! Name and label comparisons are case-insensitive everywhere.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ast::Operator;

/// Declared type of a field, scalar or array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    Time,
    DateTime,
    StringArray,
    NumberArray,
    BooleanArray,
    DateArray,
    TimeArray,
    DateTimeArray,
}

impl FieldType {
    pub fn is_array(self) -> bool {
        matches!(
            self,
            FieldType::StringArray
                | FieldType::NumberArray
                | FieldType::BooleanArray
                | FieldType::DateArray
                | FieldType::TimeArray
                | FieldType::DateTimeArray
        )
    }

    /// Scalar type of a single element. Scalars map to themselves.
    pub fn element(self) -> FieldType {
        match self {
            FieldType::StringArray => FieldType::String,
            FieldType::NumberArray => FieldType::Number,
            FieldType::BooleanArray => FieldType::Boolean,
            FieldType::DateArray => FieldType::Date,
            FieldType::TimeArray => FieldType::Time,
            FieldType::DateTimeArray => FieldType::DateTime,
            scalar => scalar,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Named alias for a literal value, scoped to one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lookup {
    /// Display name typed by users
    pub name: String,

    /// Literal text substituted for the name before type checking
    #[serde(deserialize_with = "literal_text")]
    pub value: String,
}

impl Lookup {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Lookup {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Accept any JSON scalar and keep its literal text.
fn literal_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "lookup value must be a scalar, got {}",
            other
        ))),
    }
}

/// A named, typed slot a query may filter on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    #[serde(default)]
    pub label: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Operators this field permits
    #[serde(default)]
    pub operators: Vec<Operator>,

    /// Enumerated value lookups
    #[serde(default)]
    pub values: Vec<Lookup>,
}

impl Field {
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Field {
            name: name.into(),
            label: label.into(),
            field_type,
            operators: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn with_operators(mut self, operators: impl IntoIterator<Item = Operator>) -> Self {
        self.operators.extend(operators);
        self
    }

    pub fn with_values(mut self, values: impl IntoIterator<Item = Lookup>) -> Self {
        self.values.extend(values);
        self
    }

    /// Whether `text` names this field by name or label.
    pub fn is_named(&self, text: &str) -> bool {
        self.name.eq_ignore_ascii_case(text)
            || (!self.label.is_empty() && self.label.eq_ignore_ascii_case(text))
    }

    pub fn allows(&self, operator: Operator) -> bool {
        self.operators.contains(&operator)
    }

    /// Lookup whose display name matches `name`, case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<&Lookup> {
        self.values
            .iter()
            .find(|lookup| lookup.name.eq_ignore_ascii_case(name))
    }
}

/// Ordered field list. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub fields: Vec<Field>,
}

impl Metadata {
    pub fn new(fields: Vec<Field>) -> Self {
        Metadata { fields }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Field matching `text` by name or label.
    pub fn field(&self, text: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.is_named(text))
    }
}
