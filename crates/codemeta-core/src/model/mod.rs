//! Typed view over CodeMeta JSON-LD nodes.
//!
//! Documents arrive as loosely-typed JSON where the same thing can be spelled
//! several ways (`type` / `@type` / `codemeta:type`, `Person` /
//! `schema:Person` / `http://schema.org/Person`). Everything is normalised once
//! here, at the JSON boundary:
//! - [`EntityType`]: the closed set of entity types the engine knows
//! - [`TypeTag`]: a normalised type, or the raw spelling when unknown
//! - [`NodeId`]: an IRI or a blank-node label
//! - [`Node`]: a decoded object with its id, type and normalised field names
//!
//! Validators and the import mapper work on these instead of raw maps.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::iri;

mod node;
mod person;

pub use node::{Field, Node};
pub use person::PersonKey;

/// Entity types known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityType {
    SoftwareSourceCode,
    SoftwareApplication,
    CreativeWork,
    Person,
    Organization,
    Role,
    Review,
}

impl EntityType {
    pub const ALL: [EntityType; 7] = [
        EntityType::SoftwareSourceCode,
        EntityType::SoftwareApplication,
        EntityType::CreativeWork,
        EntityType::Person,
        EntityType::Organization,
        EntityType::Role,
        EntityType::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SoftwareSourceCode => "SoftwareSourceCode",
            Self::SoftwareApplication => "SoftwareApplication",
            Self::CreativeWork => "CreativeWork",
            Self::Person => "Person",
            Self::Organization => "Organization",
            Self::Role => "Role",
            Self::Review => "Review",
        }
    }

    /// Parse any accepted spelling (bare, prefixed or full IRI).
    pub fn parse(spelling: &str) -> Option<Self> {
        let bare = normalize_key(spelling);
        Self::ALL.into_iter().find(|t| t.as_str() == bare)
    }

    pub fn is_software(&self) -> bool {
        matches!(self, Self::SoftwareSourceCode | Self::SoftwareApplication)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node's type after normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    Known(EntityType),
    /// Unrecognised type, kept as written.
    Other(String),
}

impl TypeTag {
    pub fn from_value(value: &Value) -> Self {
        let single = match value {
            Value::String(s) => Some(s.as_str()),
            Value::Array(items) if items.len() == 1 => items[0].as_str(),
            _ => None,
        };
        match single {
            Some(s) => match EntityType::parse(s) {
                Some(t) => Self::Known(t),
                None => Self::Other(s.to_string()),
            },
            None => Self::Other(value.to_string()),
        }
    }

    pub fn known(&self) -> Option<EntityType> {
        match self {
            Self::Known(t) => Some(*t),
            Self::Other(_) => None,
        }
    }

    pub fn is(&self, expected: EntityType) -> bool {
        self.known() == Some(expected)
    }
}

/// Node identifier. Blank nodes have no identity outside their document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeId {
    Iri(String),
    /// Label without the `_:` prefix.
    Blank(String),
}

impl NodeId {
    pub fn parse(s: &str) -> Self {
        match s.strip_prefix(iri::BLANK_NODE_PREFIX) {
            Some(label) => Self::Blank(label.to_string()),
            None => Self::Iri(s.to_string()),
        }
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Self::Blank(label.into())
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }

    /// The IRI, or `None` for a blank node.
    pub fn public_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(s) => Some(s),
            Self::Blank(_) => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(s) => f.write_str(s),
            Self::Blank(label) => write!(f, "{}{label}", iri::BLANK_NODE_PREFIX),
        }
    }
}

pub fn is_blank_node_id(s: &str) -> bool {
    s.starts_with(iri::BLANK_NODE_PREFIX)
}

/// Strip the namespace spellings that compare equal to a bare term.
pub fn normalize_key(key: &str) -> &str {
    const PREFIXES: [&str; 5] = [
        "schema:",
        "codemeta:",
        iri::SCHEMA_HTTP,
        iri::SCHEMA_HTTPS,
        iri::CODEMETA_TERMS,
    ];
    PREFIXES
        .iter()
        .find_map(|p| key.strip_prefix(p))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(key)
}
