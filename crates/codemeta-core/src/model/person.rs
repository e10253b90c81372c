//! Person identity for merging roles back into their owners.

use serde_json::Value;

use super::Node;

/// What two person references are compared on.
///
/// A bare string reference carries only an id. A list, which is how a
/// `@list` term compacts a single reference, stands for its first element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonKey {
    pub id: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<String>,
}

impl PersonKey {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self {
                id: Some(s.clone()).filter(|s| !s.is_empty()),
                ..Self::default()
            }),
            Value::Object(map) => Some(Self::from_node(&Node::decode(map))),
            Value::Array(items) => items.first().and_then(Self::from_value),
            _ => None,
        }
    }

    pub fn from_node(node: &Node<'_>) -> Self {
        let text = |name: &str| node.get_str(name).map(str::to_string);
        Self {
            id: node.id_str().map(str::to_string),
            given_name: text("givenName"),
            family_name: text("familyName"),
            email: text("email"),
        }
    }

    /// Ids decide when either side has one; names and email otherwise.
    pub fn same_person(&self, other: &Self) -> bool {
        if self.id.is_some() || other.id.is_some() {
            return self.id == other.id;
        }
        self.given_name == other.given_name
            && self.family_name == other.family_name
            && self.email == other.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(v: Value) -> PersonKey {
        PersonKey::from_value(&v).unwrap()
    }

    #[test]
    fn ids_decide_when_present() {
        let a = key(json!({"@id": "_:author_1", "givenName": "A"}));
        let b = key(json!("_:author_1"));
        let c = key(json!({"givenName": "A"}));
        assert!(a.same_person(&b));
        assert!(!a.same_person(&c));
    }

    #[test]
    fn values_decide_without_ids() {
        let a = key(json!({"givenName": "A", "familyName": "B", "email": "a@b.c"}));
        let b = key(json!({"@type": "Person", "givenName": "A", "familyName": "B", "email": "a@b.c"}));
        let c = key(json!({"givenName": "A", "familyName": "C"}));
        assert!(a.same_person(&b));
        assert!(!a.same_person(&c));
    }

    #[test]
    fn lists_stand_for_their_first_reference() {
        assert_eq!(key(json!(["https://orcid.org/1"])), key(json!("https://orcid.org/1")));
        let a = key(json!([{"@id": "_:a"}, {"@id": "_:b"}]));
        assert_eq!(a.id.as_deref(), Some("_:a"));
    }

    #[test]
    fn non_references_are_rejected() {
        assert!(PersonKey::from_value(&json!(42)).is_none());
        assert!(PersonKey::from_value(&json!([])).is_none());
    }
}
