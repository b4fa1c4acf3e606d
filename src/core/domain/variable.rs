//! Variable type.
//!
//! A single CI/CD variable as GitLab returns it. Remote identity is the
//! `(key, environment_scope)` pair: the same key may exist once per scope.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::core::constants;
use crate::core::types::{EnvironmentScope, VariableKey};

const KEY: &str = "key";
const VALUE: &str = "value";
const SCOPE: &str = "environment_scope";

/// A CI/CD variable.
///
/// The attribute map is kept exactly as received, in the server's order.
/// `key`, `value` and `environment_scope` are a typed view over it; on
/// serialization they are written back in place, so a variable that was not
/// changed serializes to the same JSON it was read from.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Variable name
    pub key: VariableKey,
    /// Variable value; `None` for hidden variables
    pub value: Option<String>,
    /// Environment scope, `*` when absent
    pub environment_scope: EnvironmentScope,
    attributes: Map<String, Value>,
}

impl Variable {
    /// Create a plain variable with no optional attributes.
    pub fn new(
        key: impl Into<VariableKey>,
        value: impl Into<String>,
        environment_scope: impl Into<EnvironmentScope>,
    ) -> Self {
        let key: VariableKey = key.into();
        let value: String = value.into();
        let environment_scope: EnvironmentScope = environment_scope.into();

        let mut attributes = Map::new();
        attributes.insert(KEY.to_string(), Value::String(key.clone()));
        attributes.insert(VALUE.to_string(), Value::String(value.clone()));
        attributes.insert(SCOPE.to_string(), Value::String(environment_scope.clone()));

        Self {
            key,
            value: Some(value),
            environment_scope,
            attributes,
        }
    }

    /// Build from a JSON object, keeping every attribute and its position.
    ///
    /// # Errors
    ///
    /// Fails if `key` is missing or not a string, or if `value` or
    /// `environment_scope` is present with a non-string type.
    pub fn from_attributes(attributes: Map<String, Value>) -> Result<Self, String> {
        let key = match attributes.get(KEY) {
            Some(Value::String(key)) => key.clone(),
            Some(_) => return Err("`key` must be a string".to_string()),
            None => return Err("missing field `key`".to_string()),
        };
        let value = match attributes.get(VALUE) {
            Some(Value::String(value)) => Some(value.clone()),
            Some(Value::Null) | None => None,
            Some(_) => return Err("`value` must be a string or null".to_string()),
        };
        let environment_scope = match attributes.get(SCOPE) {
            Some(Value::String(scope)) => scope.clone(),
            Some(Value::Null) | None => constants::DEFAULT_SCOPE.to_string(),
            Some(_) => return Err("`environment_scope` must be a string".to_string()),
        };

        Ok(Self {
            key,
            value,
            environment_scope,
            attributes,
        })
    }

    /// All attributes, with the typed fields written back in place.
    ///
    /// An absent `value` or `environment_scope` stays absent as long as the
    /// typed field still holds the implied default.
    pub fn to_attributes(&self) -> Map<String, Value> {
        let mut attributes = self.attributes.clone();
        attributes.insert(KEY.to_string(), Value::String(self.key.clone()));

        match (&self.value, attributes.get(VALUE)) {
            (Some(value), _) => {
                attributes.insert(VALUE.to_string(), Value::String(value.clone()));
            }
            (None, Some(_)) => {
                attributes.insert(VALUE.to_string(), Value::Null);
            }
            (None, None) => {}
        }

        let implied = matches!(attributes.get(SCOPE), None | Some(Value::Null));
        if !(implied && self.environment_scope == constants::DEFAULT_SCOPE) {
            attributes.insert(
                SCOPE.to_string(),
                Value::String(self.environment_scope.clone()),
            );
        }
        attributes
    }

    /// Any attribute by name, e.g. `masked` or `hidden`.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Compound identity used by the remote store.
    pub fn id(&self) -> VariableId {
        VariableId {
            key: self.key.clone(),
            environment_scope: self.environment_scope.clone(),
        }
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.to_attributes() == other.to_attributes()
    }
}

impl Serialize for Variable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_attributes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Variable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let attributes = Map::deserialize(deserializer)?;
        Self::from_attributes(attributes).map_err(D::Error::custom)
    }
}

/// `(key, environment_scope)` identity of a variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId {
    pub key: VariableKey,
    pub environment_scope: EnvironmentScope,
}

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.key, self.environment_scope)
    }
}
