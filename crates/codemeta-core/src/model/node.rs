//! Decoded node objects.

use serde_json::{Map, Value};

use super::{normalize_key, EntityType, NodeId, TypeTag};

/// Keys read as the node type, in priority order.
const TYPE_KEYS: [&str; 3] = ["type", "@type", "codemeta:type"];
/// Keys read as the node identifier, in priority order.
const ID_KEYS: [&str; 2] = ["id", "@id"];

/// One non-keyword entry of a node.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    /// Key as written in the document.
    pub key: &'a str,
    /// Key with namespace spellings stripped.
    pub name: &'a str,
    pub value: &'a Value,
}

/// A JSON object viewed as a CodeMeta node.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    pub raw_id: Option<&'a Value>,
    pub raw_type: Option<&'a Value>,
    pub type_tag: Option<TypeTag>,
    pub fields: Vec<Field<'a>>,
}

impl<'a> Node<'a> {
    pub fn decode(map: &'a Map<String, Value>) -> Self {
        let raw_type = first_present(map, &TYPE_KEYS);
        let raw_id = first_present(map, &ID_KEYS);
        let fields = map
            .iter()
            .filter(|(key, _)| !is_reserved(key))
            .map(|(key, value)| Field {
                key: key.as_str(),
                name: normalize_key(key),
                value,
            })
            .collect();

        Self {
            raw_id,
            raw_type,
            type_tag: raw_type.map(TypeTag::from_value),
            fields,
        }
    }

    /// Decode `value` if it is an object.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::decode)
    }

    pub fn id_str(&self) -> Option<&'a str> {
        self.raw_id.and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    pub fn id(&self) -> Option<NodeId> {
        self.id_str().map(NodeId::parse)
    }

    pub fn entity_type(&self) -> Option<EntityType> {
        self.type_tag.as_ref().and_then(TypeTag::known)
    }

    pub fn is(&self, expected: EntityType) -> bool {
        self.entity_type() == Some(expected)
    }

    /// First field whose normalised name is `name`.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.value)
    }

    pub fn get_str(&self, name: &str) -> Option<&'a str> {
        self.get(name).and_then(Value::as_str)
    }
}

/// Type and id keys, plus `@context` which only documents carry.
pub fn is_reserved(key: &str) -> bool {
    key == "@context" || TYPE_KEYS.contains(&key) || ID_KEYS.contains(&key)
}

fn first_present<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .find(|v| !v.is_null() && v.as_str() != Some(""))
}
