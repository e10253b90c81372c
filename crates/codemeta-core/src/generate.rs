//! Form -> document generation.
//!
//! The skeleton is written against the union of every known context so any
//! property can be expressed, then compacted against the target version only.
//! Properties the target version has no term for come out as compact IRIs;
//! cross-version aliases in that situation are pruned.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::debug;

use crate::context::{Compactor, ContextRegistry};
use crate::errors::{CodemetaError, CodemetaResult};
use crate::form::fields::{
    is_cross_alias, CROSS_FIELDS, DIRECT_FIELDS, PERSON_FIELDS, REVIEW_FIELDS, ROLE_FIELDS,
    SHORT_ORG_FIELDS, SPLIT_FIELDS,
};
use crate::form::{FormState, PersonGroup, PersonRow, RoleRow};
use crate::iri::BLANK_NODE_PREFIX;
use crate::model::{normalize_key, EntityType};
use crate::validate::primitives::is_url;
use crate::version::CodemetaVersion;

/// Compacted document for `form` in `version`.
///
/// The form is assumed to satisfy its own input constraints.
pub fn generate_document(
    form: &FormState,
    version: CodemetaVersion,
    contexts: &ContextRegistry,
) -> CodemetaResult<Value> {
    let skeleton = build_skeleton(form, contexts.union_context());
    let target = Value::String(version.context_url().to_string());
    let mut compacted = Compactor::new(contexts).compact(&skeleton, &target)?;
    match &mut compacted {
        Value::Object(map) => prune_cross_aliases(map, |key| contexts.has_term(version, key)),
        other => {
            return Err(CodemetaError::invariant(format!(
                "compaction produced a non-object document: {other}"
            )))
        }
    }
    Ok(compacted)
}

/// Document written against `context` (normally the union of all versions).
pub fn build_skeleton(form: &FormState, context: Value) -> Value {
    let mut doc = Map::new();
    doc.insert("@context".into(), context);
    doc.insert("@type".into(), EntityType::SoftwareSourceCode.as_str().into());

    let licenses = form.licenses.to_iris();
    if !licenses.is_empty() {
        doc.insert("license".into(), licenses.into());
    }

    for field in DIRECT_FIELDS {
        if let Some(v) = form.value(field) {
            doc.insert(field.into(), v.into());
        }
    }

    for field in SHORT_ORG_FIELDS {
        if let Some(v) = form.value(field) {
            doc.insert(field.into(), short_org(v));
        }
    }

    if REVIEW_FIELDS.iter().any(|f| form.value(f).is_some()) {
        let mut review = Map::new();
        review.insert("@type".into(), EntityType::Review.as_str().into());
        for field in REVIEW_FIELDS {
            if let Some(v) = form.value(field) {
                review.insert(field.into(), v.into());
            }
        }
        doc.insert("review".into(), Value::Object(review));
    }

    for (field, separator) in SPLIT_FIELDS {
        if let Some(v) = form.value(field) {
            doc.insert(field.into(), split_values(v, separator).into());
        }
    }

    for group in PersonGroup::ALL {
        let entries = person_entries(group, form.group(group));
        if !entries.is_empty() {
            doc.insert(group.property().into(), Value::Array(entries));
        }
    }

    for (field, aliases) in CROSS_FIELDS {
        if let Some(v) = doc.get(field).cloned() {
            for alias in aliases {
                doc.insert((*alias).into(), v.clone());
            }
        }
    }

    Value::Object(doc)
}

/// Organization reference for a free-text field: by IRI when the text is a
/// URL, by name otherwise.
pub fn short_org(value: &str) -> Value {
    let mut org = Map::new();
    org.insert("@type".into(), EntityType::Organization.as_str().into());
    let key = if is_url(value) { "@id" } else { "name" };
    org.insert(key.into(), value.into());
    Value::Object(org)
}

/// Split on `separator`, trimming items and dropping empty ones.
pub fn split_values(value: &str, separator: &str) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Identifier written for a person row: its IRI, or a blank node named after
/// the row position (`_:author_1`).
pub fn person_id(group: PersonGroup, position: usize, row: &PersonRow) -> String {
    let id = row.id.trim();
    if id.is_empty() {
        format!("{BLANK_NODE_PREFIX}{}_{position}", group.property())
    } else {
        row.id.clone()
    }
}

/// Persons of a group, each followed by its roles.
fn person_entries(group: PersonGroup, rows: &[PersonRow]) -> Vec<Value> {
    let mut entries = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let id = person_id(group, i + 1, row);

        let mut person = Map::new();
        person.insert("@type".into(), EntityType::Person.as_str().into());
        person.insert("@id".into(), id.clone().into());
        for field in PERSON_FIELDS {
            let Some(value) = row.field(field).filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            let value = match field {
                "affiliation" => short_org(value),
                _ => value.as_str().into(),
            };
            person.insert(field.into(), value);
        }
        entries.push(Value::Object(person));

        entries.extend(row.roles.iter().map(|role| role_entry(role, &id)));
    }
    entries
}

fn role_entry(role: &RoleRow, person_id: &str) -> Value {
    let mut node = Map::new();
    node.insert("@type".into(), EntityType::Role.as_str().into());
    for field in ROLE_FIELDS {
        if let Some(value) = role.field(field).filter(|v| !v.trim().is_empty()) {
            node.insert(field.into(), value.as_str().into());
        }
    }
    // prefixed so the back reference does not pick up the @list container of `author`
    node.insert("schema:author".into(), person_id.into());
    Value::Object(node)
}

/// Drop cross-version aliases the target context has no term for.
pub fn prune_cross_aliases(doc: &mut Map<String, Value>, is_term: impl Fn(&str) -> bool) {
    doc.retain(|key, _| {
        let keep = !is_cross_alias(normalize_key(key)) || is_term(key);
        if !keep {
            debug!(key = %key, "pruning alias absent from the target context");
        }
        keep
    });
}

/// Pretty-print with `indent` spaces per level.
pub fn render(doc: &Value, indent: usize) -> CodemetaResult<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    doc.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(CodemetaError::serialization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contexts() -> ContextRegistry {
        ContextRegistry::bundled().unwrap()
    }

    #[test]
    fn skeleton_uses_every_context() {
        let form = FormState::new().with("name", "x");
        let doc = build_skeleton(&form, contexts().union_context());
        assert_eq!(
            doc["@context"],
            json!(["https://doi.org/10.5063/schema/codemeta-2.0", "https://w3id.org/codemeta/3.0"])
        );
        assert_eq!(doc["@type"], "SoftwareSourceCode");
        assert!(doc.get("license").is_none());
    }

    #[test]
    fn short_org_branches_on_url() {
        assert_eq!(
            short_org("https://ror.org/02feahw73"),
            json!({"@type": "Organization", "@id": "https://ror.org/02feahw73"})
        );
        assert_eq!(short_org("Inria"), json!({"@type": "Organization", "name": "Inria"}));
    }

    #[test]
    fn split_drops_empty_items() {
        assert_eq!(split_values(" a, b ,,c ", ","), vec!["a", "b", "c"]);
        assert!(split_values(" , ", ",").is_empty());
    }

    #[test]
    fn roles_follow_their_person() {
        let mut form = FormState::new().with("name", "x");
        form.authors.push(
            PersonRow::named("Ada", "Lovelace")
                .with_role(RoleRow::named("Dev"))
                .with_role(RoleRow::named("Lead")),
        );
        form.authors.push(PersonRow::named("Alan", "Turing"));
        let doc = build_skeleton(&form, Value::Null);
        let authors = doc["author"].as_array().unwrap();
        assert_eq!(authors.len(), 4);
        assert_eq!(authors[0]["@id"], "_:author_1");
        assert_eq!(authors[1]["schema:author"], "_:author_1");
        assert_eq!(authors[2]["roleName"], "Lead");
        assert_eq!(authors[3]["@id"], "_:author_2");
    }

    #[test]
    fn name_only_form_generates_minimal_document() {
        let form = FormState::new().with("name", "My Test Software");
        let doc = generate_document(&form, CodemetaVersion::V2, &contexts()).unwrap();
        assert_eq!(
            render(&doc, 4).unwrap(),
            "{\n    \"@context\": \"https://doi.org/10.5063/schema/codemeta-2.0\",\n    \"@type\": \"SoftwareSourceCode\",\n    \"name\": \"My Test Software\"\n}"
        );
    }

    #[test]
    fn cross_aliases_follow_the_target_version() {
        let form = FormState::new()
            .with("name", "x")
            .with("contIntegration", "https://ci.example.org/");
        let v2 = generate_document(&form, CodemetaVersion::V2, &contexts()).unwrap();
        assert_eq!(v2["contIntegration"], "https://ci.example.org/");
        assert!(v2.get("codemeta:continuousIntegration").is_none());

        let v3 = generate_document(&form, CodemetaVersion::V3, &contexts()).unwrap();
        assert_eq!(v3["continuousIntegration"], "https://ci.example.org/");
        assert!(v3.get("codemeta:contIntegration").is_none());
        assert!(v3.get("contIntegration").is_none());
    }

    #[test]
    fn roles_without_terms_use_compact_iris() {
        let mut form = FormState::new().with("name", "x");
        form.authors.push(PersonRow::named("Ada", "Lovelace").with_role(RoleRow {
            start_date: "2020-01-01".into(),
            ..RoleRow::named("Dev")
        }));

        let v2 = generate_document(&form, CodemetaVersion::V2, &contexts()).unwrap();
        assert_eq!(
            v2["author"][1],
            json!({
                "@type": "schema:Role",
                "schema:author": "_:author_1",
                "schema:roleName": "Dev",
                "schema:startDate": "2020-01-01"
            })
        );

        let v3 = generate_document(&form, CodemetaVersion::V3, &contexts()).unwrap();
        assert_eq!(
            v3["author"][1],
            json!({
                "@type": "Role",
                "roleName": "Dev",
                "schema:author": "_:author_1",
                "startDate": "2020-01-01"
            })
        );
    }

    #[test]
    fn pruning_keeps_target_terms() {
        let mut doc = json!({
            "contIntegration": "a",
            "codemeta:continuousIntegration": "b",
            "name": "x"
        });
        let map = doc.as_object_mut().unwrap();
        prune_cross_aliases(map, |key| key == "contIntegration");
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("contIntegration"));
    }

    #[test]
    fn license_cardinality() {
        let mut form = FormState::new().with("name", "x");
        form.licenses.insert_raw("MIT");
        let doc = generate_document(&form, CodemetaVersion::V2, &contexts()).unwrap();
        assert_eq!(doc["license"], "https://spdx.org/licenses/MIT");

        form.licenses.insert_raw("GPL-3.0");
        let doc = generate_document(&form, CodemetaVersion::V2, &contexts()).unwrap();
        assert_eq!(
            doc["license"],
            json!(["https://spdx.org/licenses/MIT", "https://spdx.org/licenses/GPL-3.0"])
        );
    }
}
