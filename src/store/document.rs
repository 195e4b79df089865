//! Document, identifier, filter and update primitives shared by every store backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::error::StoreError;

/// A stored record. Attributes are opaque JSON; only `_id` is interpreted by the store.
pub type Document = Map<String, Value>;

/// Name of the identifier field carried by every document
pub const ID_FIELD: &str = "_id";

/// Store-generated document identifier, serialized as a hyphenated UUID string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| StoreError::InvalidId(raw.to_string()))
    }

    pub fn as_value(&self) -> Value {
        Value::String(self.0.to_string())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Collections known to the bookshelf store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Books,
    Users,
    Cart,
    News,
    Events,
    Members,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Books,
        Collection::Users,
        Collection::Cart,
        Collection::News,
        Collection::Events,
        Collection::Members,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Books => "books",
            Collection::Users => "users",
            Collection::Cart => "cart",
            Collection::News => "news",
            Collection::Events => "events",
            Collection::Members => "members",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| StoreError::UnknownCollection(s.to_string()))
    }
}

/// Top-level field equality filter. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Document);

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn id(id: DocumentId) -> Self {
        Self::default().and(ID_FIELD, id.as_value())
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::default().and(field, value)
    }

    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }

    /// Filter as a JSON object, usable as a containment pattern
    pub fn as_document(&self) -> &Document {
        &self.0
    }

    /// Seed document for an upsert: the filter's equality fields
    pub fn seed(&self) -> Document {
        self.0.clone()
    }
}

/// Mutation applied by `update_one`
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Overwrite the listed top-level fields
    Set(Document),
    /// Append a value to an array field, creating the array when absent
    Push { field: String, value: Value },
}

impl Update {
    /// Apply the mutation in place; returns whether the document changed.
    /// `_id` is never rewritten.
    pub fn apply(&self, document: &mut Document) -> bool {
        match self {
            Update::Set(fields) => {
                let mut changed = false;
                for (field, value) in fields {
                    if field == ID_FIELD {
                        continue;
                    }
                    if document.get(field) != Some(value) {
                        document.insert(field.clone(), value.clone());
                        changed = true;
                    }
                }
                changed
            }
            Update::Push { field, value } => {
                match document.get_mut(field) {
                    Some(Value::Array(items)) => items.push(value.clone()),
                    _ => {
                        document.insert(field.clone(), Value::Array(vec![value.clone()]));
                    }
                }
                true
            }
        }
    }
}
