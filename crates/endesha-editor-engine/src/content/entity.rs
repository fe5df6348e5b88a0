use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Key of an entity in a document's entity map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey(pub u32);

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of an out-of-line entity attached to a text range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Hyperlink, `data.url`
    Link,
    /// Inline image, `data.src` and optional `data.alt`
    Image,
    /// Mention of a user or page, `data.url`
    Mention,
    /// Embedded media frame, `data.src`, `data.width`, `data.height`
    EmbeddedLink,
}

impl EntityKind {
    /// Parse the entity type name used in stored content.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "LINK" => Some(EntityKind::Link),
            "IMAGE" => Some(EntityKind::Image),
            "MENTION" => Some(EntityKind::Mention),
            "EMBEDDED_LINK" => Some(EntityKind::EmbeddedLink),
            _ => None,
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            EntityKind::Link => "LINK",
            EntityKind::Image => "IMAGE",
            EntityKind::Mention => "MENTION",
            EntityKind::EmbeddedLink => "EMBEDDED_LINK",
        }
    }
}

/// How the editor treats text covered by an entity when it is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mutability {
    #[default]
    Mutable,
    Immutable,
    Segmented,
}

/// An entity referenced by entity ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub mutability: Mutability,
    pub data: Map<String, Value>,
}

impl Entity {
    pub fn new(kind: EntityKind, mutability: Mutability) -> Self {
        Self {
            kind,
            mutability,
            data: Map::new(),
        }
    }

    pub fn with_data(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn link(url: &str) -> Self {
        Self::new(EntityKind::Link, Mutability::Mutable).with_data("url", url)
    }

    pub fn image(src: &str, alt: &str) -> Self {
        Self::new(EntityKind::Image, Mutability::Mutable)
            .with_data("src", src)
            .with_data("alt", alt)
    }

    /// String value stored under `key`, if any.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Value under `key` rendered as text: strings verbatim, numbers and
    /// booleans formatted, anything else absent.
    pub fn data_text(&self, key: &str) -> Option<String> {
        match self.data.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}
