//! The authenticated (or guest) actor

use crate::constants::PATH_SEPARATOR;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque mapping of field name to value describing the current actor
///
/// The shape is owned by the credential backend. Authsome only needs to
/// look fields up, either as top-level keys or by dotted path:
///
/// ```
/// use authsome_domain::Identity;
/// use serde_json::json;
///
/// let identity = Identity::from_value(json!({"User": {"id": 5}})).unwrap();
/// assert_eq!(identity.extract("User.id"), Some(&json!(5)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(Map<String, Value>);

impl Identity {
    /// Create an empty identity
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build an identity from a JSON value
    ///
    /// Returns `None` unless the value is a non-empty object: an empty
    /// mapping never stands for "somebody".
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Self(map).non_empty(),
            _ => None,
        }
    }

    /// `Some(self)` when the identity carries at least one field
    pub fn non_empty(self) -> Option<Self> {
        if self.0.is_empty() { None } else { Some(self) }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Top-level field lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a top-level field, returning the previous value
    pub fn insert<K: Into<String>>(&mut self, key: K, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Dotted-path lookup, e.g. `"User.id"` or `"User.roles.0"`
    ///
    /// Object segments are looked up by key, array segments by index.
    /// Empty segments never match.
    pub fn extract(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split(PATH_SEPARATOR);
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into a JSON object value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Identity {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
