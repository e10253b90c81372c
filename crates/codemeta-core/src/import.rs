//! Document -> form import.
//!
//! Import is total and lenient: the form is rebuilt from scratch, and as much
//! as can be read is read even when the document does not validate. The
//! document is first recompacted against every known context so properties
//! from either version land on the same keys.

use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::context::{Compactor, ContextRegistry};
use crate::errors::{CodemetaError, CodemetaResult};
use crate::form::fields::{
    CROSS_FIELDS, DIRECT_FIELDS, PERSON_FIELDS, REVIEW_FIELDS, ROLE_FIELDS, SHORT_ORG_FIELDS,
    SPLIT_FIELDS,
};
use crate::form::{FormState, PersonGroup, PersonRow, RoleRow};
use crate::license::spdx_id;
use crate::model::{EntityType, Node, NodeId, PersonKey};
use crate::validate::{render, validate_document, ValidationReport};

/// Result of importing one document.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub form: FormState,
    /// Validation of the document as given. Import proceeds regardless.
    pub report: ValidationReport,
    /// License values that are not SPDX IRIs.
    pub dropped_licenses: Vec<String>,
}

impl ImportOutcome {
    /// Message to display, if the document did not validate.
    pub fn message(&self) -> Option<&str> {
        (!self.report.is_valid()).then(|| self.report.message())
    }
}

/// Parse document text, enforcing a size limit.
pub fn parse_document(text: &str, max_bytes: usize) -> CodemetaResult<Value> {
    if text.len() > max_bytes {
        return Err(CodemetaError::invalid_argument(format!(
            "document is {} bytes, the limit is {max_bytes}",
            text.len()
        )));
    }
    serde_json::from_str(text).map_err(|e| CodemetaError::NotJson(e.to_string()))
}

/// Validate, recompact and map a parsed document onto a fresh form.
pub fn import_document(doc: &Value, contexts: &ContextRegistry) -> CodemetaResult<ImportOutcome> {
    let report = validate_document(doc);
    if !report.is_valid() {
        debug!(error = report.message(), "importing a document that does not validate");
    }

    let compacted = recompact_with_all_contexts(doc, contexts)?;
    let (form, dropped_licenses) = form_from_document(&compacted);
    Ok(ImportOutcome {
        form,
        report,
        dropped_licenses,
    })
}

/// Replace the declared context by every known one, then compact against
/// all of them.
///
/// Top-level arrays are taken as already expanded. Scalars are returned
/// unchanged.
pub fn recompact_with_all_contexts(doc: &Value, contexts: &ContextRegistry) -> CodemetaResult<Value> {
    let union = contexts.union_context();
    let input = match doc {
        Value::Object(map) => {
            let mut rewritten = map.clone();
            rewritten.insert("@context".into(), union.clone());
            Value::Object(rewritten)
        }
        Value::Array(_) => doc.clone(),
        _ => return Ok(doc.clone()),
    };

    Compactor::new(contexts).compact(&input, &union)
}

/// Map a compacted document onto a new form.
///
/// Returns the form and the license values that were dropped.
pub fn form_from_document(doc: &Value) -> (FormState, Vec<String>) {
    let mut form = FormState::new();
    let mut dropped = Vec::new();
    let Some(node) = Node::from_value(doc) else {
        return (form, dropped);
    };

    if let Some(licenses) = node.get("license") {
        for item in values(licenses) {
            let iri = item
                .as_str()
                .or_else(|| item.get("@id").and_then(Value::as_str));
            match iri.and_then(spdx_id) {
                Some(id) => {
                    form.licenses.insert_raw(id);
                }
                None => {
                    let raw = iri.map(str::to_string).unwrap_or_else(|| render(item));
                    warn!(license = %raw, "dropping license that is not an SPDX IRI");
                    dropped.push(raw);
                }
            }
        }
    }

    for field in DIRECT_FIELDS {
        if let Some(text) = node.get(field).and_then(field_text) {
            form.set(field, text);
        }
    }

    for field in SHORT_ORG_FIELDS {
        if let Some(text) = node.get(field).and_then(short_org_text) {
            form.set(field, text);
        }
    }

    if let Some(review) = node.get("review").and_then(first_node) {
        for field in REVIEW_FIELDS {
            if let Some(text) = review.get(field).and_then(field_text) {
                form.set(field, text);
            }
        }
    }

    for (field, separator) in SPLIT_FIELDS {
        if let Some(value) = node.get(field) {
            let joined = values(value).filter_map(field_text).join(separator);
            if !joined.is_empty() {
                form.set(field, joined);
            }
        }
    }

    for (field, aliases) in CROSS_FIELDS {
        let last = aliases
            .iter()
            .filter_map(|alias| node.get(alias).and_then(field_text))
            .filter(|text| !text.is_empty())
            .last();
        match last {
            Some(text) => form.set(field, text),
            None => {
                form.remove(field);
            }
        }
    }

    for group in PersonGroup::ALL {
        if let Some(value) = node.get(group.property()) {
            *form.group_mut(group) = import_persons(value);
        }
    }

    (form, dropped)
}

/// Rebuild person rows from an author/contributor list.
///
/// The rows are the Persons in the list plus every Person a Role points to,
/// without duplicates; each row gets the roles that point to it.
pub fn import_persons(value: &Value) -> Vec<PersonRow> {
    let nodes: Vec<Node<'_>> = values(value).filter_map(Node::from_value).collect();

    let roles: Vec<(&Value, PersonKey, &Node<'_>)> = nodes
        .iter()
        .filter(|n| n.is(EntityType::Role))
        .filter_map(|role| {
            let author = role.get("author")?;
            let key = PersonKey::from_value(author)?;
            Some((author, key, role))
        })
        .collect();

    let mut owners: Vec<(PersonKey, Option<Node<'_>>)> = Vec::new();
    let direct = nodes
        .iter()
        .filter(|n| n.is(EntityType::Person))
        .map(|p| (PersonKey::from_node(p), Some(p.clone())));
    let referenced = roles
        .iter()
        .map(|(author, key, _)| (key.clone(), first_node(author)));
    for (key, node) in direct.chain(referenced) {
        if !owners.iter().any(|(k, _)| k.same_person(&key)) {
            owners.push((key, node));
        }
    }

    owners
        .into_iter()
        .map(|(key, node)| {
            let mut row = PersonRow::default();
            if let Some(id) = key.id.as_deref().map(NodeId::parse) {
                row.id = id.public_iri().unwrap_or_default().to_string();
            }
            if let Some(node) = &node {
                for name in PERSON_FIELDS {
                    let text = match name {
                        "affiliation" => node.get(name).and_then(short_org_text),
                        _ => node.get(name).and_then(field_text),
                    };
                    if let Some(slot) = row.field_mut(name) {
                        *slot = text.unwrap_or_default();
                    }
                }
            }
            row.roles = roles
                .iter()
                .filter(|(_, role_key, _)| role_key.same_person(&key))
                .map(|(_, _, role)| role_row(role))
                .collect();
            row
        })
        .collect()
}

fn role_row(role: &Node<'_>) -> RoleRow {
    let mut row = RoleRow::default();
    for name in ROLE_FIELDS {
        if let Some(slot) = row.field_mut(name) {
            *slot = role.get(name).and_then(field_text).unwrap_or_default();
        }
    }
    row
}

/// Text shown in a form field for a document value.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(_) | Value::Bool(_) => Some(value.to_string()),
        Value::Array(items) if items.iter().all(Value::is_string) => {
            Some(items.iter().filter_map(Value::as_str).join(","))
        }
        Value::Object(map) if map.len() == 1 && map.contains_key("@id") => {
            map.get("@id").and_then(Value::as_str).map(str::to_string)
        }
        other => Some(render(other)),
    }
}

/// Short-form Organization: its name if present, else its identifier.
fn short_org_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.first().and_then(short_org_text),
        Value::Object(map) => {
            let node = Node::decode(map);
            node.get_str("name")
                .or_else(|| node.id_str())
                .map(str::to_string)
        }
        _ => None,
    }
}

fn first_node(value: &Value) -> Option<Node<'_>> {
    values(value).find_map(Node::from_value)
}

fn values(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::Array(items) => Box::new(items.iter()),
        other => Box::new(std::iter::once(other)),
    }
}
