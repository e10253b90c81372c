//! Top-level document validation.

use itertools::Itertools;
use serde_json::Value;

use super::primitives::is_node_reference;
use super::things::{validate_fields, SOFTWARE_FIELDS};
use super::{render, ErrorKind, ValidationReport};
use crate::model::Node;
use crate::version::all_context_urls;

/// Validate a parsed CodeMeta document.
///
/// The document type is checked before anything else: a wrong type is a more
/// useful message than a pile of unknown-field errors.
pub fn validate_document(doc: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();

    let Value::Object(map) = doc else {
        report.push(
            ErrorKind::NotAnObject,
            "",
            format!(
                "Document must be an object (starting and ending with {{ and }}), not {}.",
                kind_name(doc)
            ),
        );
        return report;
    };

    let node = Node::decode(map);
    match (&node.type_tag, node.entity_type()) {
        (None, _) => {
            report.push(
                ErrorKind::MissingType,
                "",
                "Missing type (must be SoftwareSourceCode or SoftwareApplication).",
            );
            return report;
        }
        (Some(_), Some(t)) if t.is_software() => {}
        (Some(_), _) => {
            let raw = node.raw_type.cloned().unwrap_or(Value::Null);
            report.push(
                ErrorKind::WrongType,
                "",
                format!(
                    "Wrong document type: must be \"SoftwareSourceCode\"/\"SoftwareApplication\", not {}",
                    render(&raw)
                ),
            );
            return report;
        }
    }

    if let Some(context) = map.get("@context") {
        validate_context(context, &mut report);
    }

    if let Some(raw_id) = node.raw_id {
        if !raw_id.as_str().is_some_and(is_node_reference) {
            report.push(
                ErrorKind::InvalidId,
                "@id",
                format!("Invalid URL in field \"@id\": {}", render(raw_id)),
            );
        }
    }

    validate_fields(None, "", SOFTWARE_FIELDS, &node, &mut report);
    report
}

fn expected_contexts() -> String {
    all_context_urls().iter().map(|u| format!("\"{u}\"")).join(" or ")
}

fn is_known_context(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| all_context_urls().contains(&s))
}

fn validate_context(context: &Value, report: &mut ValidationReport) {
    match context {
        Value::Array(items) if items.len() > 1 => {
            report.push(
                ErrorKind::InvalidContext,
                "@context",
                format!(
                    "Multiple values in @context are not supported (@context should be {}, not {})",
                    expected_contexts(),
                    render(context)
                ),
            );
        }
        Value::Array(items) if items.len() == 1 && is_known_context(&items[0]) => {}
        single if is_known_context(single) => {}
        other => {
            report.push(
                ErrorKind::InvalidContext,
                "@context",
                format!("@context must be {}, not {}", expected_contexts(), render(other)),
            );
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
