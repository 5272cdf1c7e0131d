// Entity Domain Model

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::{DomainError, Result};

/// Prefix shared by every qdrouterd management type
pub const ENTITY_TYPE_PREFIX: &str = "org.apache.qpid.dispatch.";

/// A management entity record returned by `qdmanage query`
///
/// Implementors only need to be deserializable from one element of the JSON
/// array qdmanage prints; the associated tag selects which kind is queried.
pub trait Entity: DeserializeOwned + Send + 'static {
    /// Fully qualified management type (e.g. `org.apache.qpid.dispatch.router.address`)
    const ENTITY_TYPE: &'static str;

    fn entity_type() -> EntityType {
        EntityType::new(Self::ENTITY_TYPE)
    }
}

/// Management entity type tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityType(String);

impl EntityType {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Validate a user supplied tag (CLI input)
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidEntityType(
                "entity type cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidEntityType(format!(
                "entity type must not contain whitespace: {:?}",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tag without the `org.apache.qpid.dispatch.` prefix
    pub fn short_name(&self) -> &str {
        self.0
            .strip_prefix(ENTITY_TYPE_PREFIX)
            .unwrap_or(self.0.as_str())
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Untyped entity record (any JSON object), for ad-hoc queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEntity(serde_json::Map<String, serde_json::Value>);

impl RawEntity {
    pub fn new(attributes: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(attributes)
    }

    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn name(&self) -> Option<&str> {
        self.str_attribute("name")
    }

    pub fn identity(&self) -> Option<&str> {
        self.str_attribute("identity")
    }

    pub fn entity_type(&self) -> Option<&str> {
        self.str_attribute("type")
    }

    pub fn attributes(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.0
    }

    fn str_attribute(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }
}

/// `key=value` attribute filter applied to untyped records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeFilter {
    pub key: String,
    pub value: String,
}

impl AttributeFilter {
    pub fn parse(expr: &str) -> Result<Self> {
        let (key, value) = expr.split_once('=').ok_or_else(|| {
            DomainError::InvalidFilter(format!("expected key=value, got {:?}", expr))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(DomainError::InvalidFilter(format!(
                "missing attribute name in {:?}",
                expr
            )));
        }

        Ok(Self {
            key: key.to_string(),
            value: value.trim().to_string(),
        })
    }

    /// Strings compare verbatim; other JSON values compare by their rendered form
    pub fn matches(&self, entity: &RawEntity) -> bool {
        match entity.attribute(&self.key) {
            Some(serde_json::Value::String(s)) => *s == self.value,
            Some(serde_json::Value::Null) | None => false,
            Some(other) => other.to_string() == self.value,
        }
    }
}
