//! Validators for objects derived from schema.org `Thing`.
//!
//! Each entity type has a field table mapping a (normalised) property name to
//! the check applied to its value. A nested entity is validated by dispatching
//! on its normalised type; an entity referenced purely by IRI is accepted
//! without further checks.

use itertools::Itertools;
use serde_json::Value;

use super::primitives::{self, is_node_reference, list_or_single};
use super::{child_path, render, ErrorKind, ValidationReport};
use crate::model::{EntityType, Node};

use crate::model::EntityType::*;

/// How a property value is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCheck {
    /// Accepted as-is.
    Any,
    Url,
    Urls,
    Text,
    Texts,
    TextsOrUrls,
    Numbers,
    NumberOrText,
    Boolean,
    Date,
    /// One or more entities of the listed types, or IRIs.
    Things(&'static [EntityType]),
}

impl FieldCheck {
    pub fn run(&self, field: &str, path: &str, value: &Value, report: &mut ValidationReport) -> bool {
        match self {
            Self::Any => true,
            Self::Url => primitives::url(field, path, value, report),
            Self::Urls => primitives::urls(field, path, value, report),
            Self::Text => primitives::text(field, path, value, report),
            Self::Texts => primitives::texts(field, path, value, report),
            Self::TextsOrUrls => primitives::texts_or_urls(field, path, value, report),
            Self::Numbers => primitives::numbers(field, path, value, report),
            Self::NumberOrText => primitives::number_or_text(field, path, value, report),
            Self::Boolean => primitives::boolean(field, path, value, report),
            Self::Date => primitives::date(field, path, value, report),
            Self::Things(types) => things_or_ids(field, path, types, value, report),
        }
    }
}

pub type FieldSchema = &'static [(&'static str, FieldCheck)];

const ACTORS: &[EntityType] = &[Person, Organization];
/// Author lists also carry the Role records of their persons.
const ACTORS_AND_ROLES: &[EntityType] = &[Person, Organization, Role];
const PERSONS: &[EntityType] = &[Person];
const ORGANIZATIONS: &[EntityType] = &[Organization];
const CREATIVE_WORKS: &[EntityType] = &[CreativeWork];
const SOFTWARE: &[EntityType] = &[SoftwareSourceCode, SoftwareApplication];
const SOFTWARE_OR_WORKS: &[EntityType] = &[SoftwareSourceCode, SoftwareApplication, CreativeWork];
const REVIEWS: &[EntityType] = &[Review];

/// Shared by SoftwareSourceCode and SoftwareApplication.
pub const SOFTWARE_FIELDS: FieldSchema = &[
    ("codeRepository", FieldCheck::Urls),
    ("programmingLanguage", FieldCheck::Any),
    ("runtimePlatform", FieldCheck::Texts),
    ("targetProduct", FieldCheck::Any),
    ("applicationCategory", FieldCheck::TextsOrUrls),
    ("applicationSubCategory", FieldCheck::TextsOrUrls),
    ("downloadUrl", FieldCheck::Urls),
    ("fileSize", FieldCheck::Text),
    ("installUrl", FieldCheck::Urls),
    ("memoryRequirements", FieldCheck::TextsOrUrls),
    ("operatingSystem", FieldCheck::Texts),
    ("permissions", FieldCheck::Texts),
    ("processorRequirements", FieldCheck::Texts),
    ("releaseNotes", FieldCheck::TextsOrUrls),
    ("softwareHelp", FieldCheck::Things(CREATIVE_WORKS)),
    ("softwareRequirements", FieldCheck::Any),
    ("softwareVersion", FieldCheck::Text),
    ("storageRequirements", FieldCheck::TextsOrUrls),
    ("supportingData", FieldCheck::Any),
    ("author", FieldCheck::Things(ACTORS_AND_ROLES)),
    ("citation", FieldCheck::Things(CREATIVE_WORKS)),
    ("contributor", FieldCheck::Things(ACTORS_AND_ROLES)),
    ("copyrightHolder", FieldCheck::Things(ACTORS)),
    ("copyrightYear", FieldCheck::Numbers),
    ("creator", FieldCheck::Things(ACTORS)),
    ("dateCreated", FieldCheck::Date),
    ("dateModified", FieldCheck::Date),
    ("datePublished", FieldCheck::Date),
    ("editor", FieldCheck::Things(PERSONS)),
    ("encoding", FieldCheck::Any),
    ("fileFormat", FieldCheck::TextsOrUrls),
    ("funder", FieldCheck::Things(ACTORS)),
    ("keywords", FieldCheck::Texts),
    ("license", FieldCheck::Things(CREATIVE_WORKS)),
    ("producer", FieldCheck::Things(ACTORS)),
    ("provider", FieldCheck::Things(ACTORS)),
    ("publisher", FieldCheck::Things(ACTORS)),
    ("sponsor", FieldCheck::Things(ACTORS)),
    ("version", FieldCheck::NumberOrText),
    ("isAccessibleForFree", FieldCheck::Boolean),
    ("isPartOf", FieldCheck::Things(CREATIVE_WORKS)),
    ("hasPart", FieldCheck::Things(CREATIVE_WORKS)),
    ("position", FieldCheck::Any),
    ("identifier", FieldCheck::Any),
    ("description", FieldCheck::Text),
    ("name", FieldCheck::Text),
    ("sameAs", FieldCheck::Urls),
    ("url", FieldCheck::Urls),
    ("relatedLink", FieldCheck::Urls),
    ("softwareSuggestions", FieldCheck::Any),
    ("maintainer", FieldCheck::Things(ACTORS)),
    ("contIntegration", FieldCheck::Urls),
    ("continuousIntegration", FieldCheck::Urls),
    ("buildInstructions", FieldCheck::Urls),
    ("developmentStatus", FieldCheck::Text),
    ("embargoDate", FieldCheck::Date),
    ("embargoEndDate", FieldCheck::Date),
    ("funding", FieldCheck::Text),
    ("issueTracker", FieldCheck::Urls),
    ("referencePublication", FieldCheck::Any),
    ("readme", FieldCheck::Urls),
    ("review", FieldCheck::Things(REVIEWS)),
    ("isSourceCodeOf", FieldCheck::Things(SOFTWARE_OR_WORKS)),
    ("hasSourceCode", FieldCheck::Things(SOFTWARE)),
];

pub const PERSON_FIELDS: FieldSchema = &[
    ("givenName", FieldCheck::Text),
    ("familyName", FieldCheck::Text),
    ("email", FieldCheck::Text),
    ("affiliation", FieldCheck::Things(ORGANIZATIONS)),
    ("identifier", FieldCheck::Urls),
    ("name", FieldCheck::Text),
    ("url", FieldCheck::Urls),
];

pub const ORGANIZATION_FIELDS: FieldSchema = &[
    ("name", FieldCheck::Text),
    ("url", FieldCheck::Urls),
    ("identifier", FieldCheck::Urls),
    ("email", FieldCheck::Text),
    ("address", FieldCheck::Any),
    ("sameAs", FieldCheck::Urls),
];

pub const ROLE_FIELDS: FieldSchema = &[
    ("roleName", FieldCheck::Text),
    ("startDate", FieldCheck::Date),
    ("endDate", FieldCheck::Date),
    ("author", FieldCheck::Things(ACTORS)),
];

pub const REVIEW_FIELDS: FieldSchema = &[
    ("reviewAspect", FieldCheck::Text),
    ("reviewBody", FieldCheck::Text),
    ("author", FieldCheck::Things(ACTORS)),
    ("datePublished", FieldCheck::Date),
    ("name", FieldCheck::Text),
    ("itemReviewed", FieldCheck::Any),
];

pub const CREATIVE_WORK_FIELDS: FieldSchema = &[
    ("name", FieldCheck::Text),
    ("url", FieldCheck::Urls),
    ("identifier", FieldCheck::Any),
    ("description", FieldCheck::Text),
    ("author", FieldCheck::Things(ACTORS)),
    ("datePublished", FieldCheck::Date),
    ("license", FieldCheck::Things(CREATIVE_WORKS)),
    ("version", FieldCheck::NumberOrText),
];

pub fn schema_for(entity: EntityType) -> FieldSchema {
    match entity {
        SoftwareSourceCode | SoftwareApplication => SOFTWARE_FIELDS,
        CreativeWork => CREATIVE_WORK_FIELDS,
        Person => PERSON_FIELDS,
        Organization => ORGANIZATION_FIELDS,
        Role => ROLE_FIELDS,
        Review => REVIEW_FIELDS,
    }
}

pub fn lookup(schema: FieldSchema, name: &str) -> Option<FieldCheck> {
    schema.iter().find(|(n, _)| *n == name).map(|(_, check)| *check)
}

fn type_names(types: &[EntityType]) -> String {
    types.iter().map(EntityType::as_str).join(" or ")
}

/// Validate one entity object found under `parent`.
pub fn validate_thing(
    parent: &str,
    path: &str,
    accepted: &[EntityType],
    node: &Node<'_>,
    report: &mut ValidationReport,
) -> bool {
    if let Some(raw_id) = node.raw_id {
        if !raw_id.as_str().is_some_and(is_node_reference) {
            report.push(
                ErrorKind::InvalidId,
                path,
                format!("\"{parent}\" has an invalid URI as id: {}", render(raw_id)),
            );
            return false;
        }
    }

    let Some(tag) = &node.type_tag else {
        if node.raw_id.is_some() {
            // referenced by id only
            return true;
        }
        report.push(
            ErrorKind::MissingType,
            path,
            format!(
                "\"{parent}\" must be a (list of) {} object(s) or an URI, but is missing a type/@type.",
                type_names(accepted)
            ),
        );
        return false;
    };

    let entity = match tag.known() {
        Some(t) if accepted.contains(&t) => t,
        _ => {
            let raw = node.raw_type.cloned().unwrap_or(Value::Null);
            report.push(
                ErrorKind::WrongType,
                path,
                format!(
                    "\"{parent}\" type must be a (list of) {} object(s), not {}",
                    type_names(accepted),
                    render(&raw)
                ),
            );
            return false;
        }
    };

    validate_fields(Some(parent), path, schema_for(entity), node, report)
}

/// Check every field of `node` against `schema`.
///
/// `parent` names the enclosing property in unknown-field messages; the
/// document root has none.
pub fn validate_fields(
    parent: Option<&str>,
    path: &str,
    schema: FieldSchema,
    node: &Node<'_>,
    report: &mut ValidationReport,
) -> bool {
    let mut ok = true;
    for field in &node.fields {
        let field_path = child_path(path, field.key);
        match lookup(schema, field.name) {
            Some(check) => ok &= check.run(field.key, &field_path, field.value, report),
            None => {
                let message = match parent {
                    Some(parent) => format!("Unknown field \"{}\" in \"{parent}\".", field.key),
                    None => format!("Unknown field \"{}\".", field.key),
                };
                report.push(ErrorKind::UnknownField, field_path, message);
                ok = false;
            }
        }
    }
    ok
}

/// Entities of the accepted types, IRIs, or a list of those.
pub fn things_or_ids(
    field: &str,
    path: &str,
    accepted: &[EntityType],
    value: &Value,
    report: &mut ValidationReport,
) -> bool {
    list_or_single(path, value, report, |item, _in_list, path, report| match item {
        Value::String(s) if is_node_reference(s) => true,
        Value::String(_) => {
            report.push(
                ErrorKind::InvalidValue,
                path,
                format!(
                    "\"{field}\" must be an URI or a {} object, not: {}",
                    type_names(accepted),
                    render(item)
                ),
            );
            false
        }
        Value::Object(map) => validate_thing(field, path, accepted, &Node::decode(map), report),
        _ => {
            report.push(
                ErrorKind::InvalidValue,
                path,
                format!(
                    "\"{field}\" must be a {} object or an URI, not {}",
                    type_names(accepted),
                    render(item)
                ),
            );
            false
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(field: &str, accepted: &'static [EntityType], value: Value) -> ValidationReport {
        let mut report = ValidationReport::new();
        things_or_ids(field, field, accepted, &value, &mut report);
        report
    }

    #[test]
    fn person_with_known_fields_passes() {
        let r = check(
            "author",
            ACTORS_AND_ROLES,
            json!([{"@type": "Person", "@id": "_:author_1", "givenName": "Ada",
                    "affiliation": {"@type": "Organization", "name": "Foo"}}]),
        );
        assert!(r.is_valid(), "{:?}", r.errors);
    }

    #[test]
    fn invalid_id_stops_validation() {
        let r = check("author", ACTORS, json!({"@id": "foo", "@type": "Person", "bogus": 1}));
        assert_eq!(r.errors.len(), 1);
        assert_eq!(r.message(), "\"author\" has an invalid URI as id: \"foo\"");
    }

    #[test]
    fn missing_type_without_id() {
        let r = check("funder", ACTORS, json!({"name": "Foo"}));
        assert_eq!(
            r.message(),
            "\"funder\" must be a (list of) Person or Organization object(s) or an URI, but is missing a type/@type."
        );
    }

    #[test]
    fn bare_id_reference_is_accepted() {
        let r = check("funder", ACTORS, json!({"@id": "https://ror.org/123", "whatever": []}));
        assert!(r.is_valid());
    }

    #[test]
    fn wrong_type_names_accepted_types() {
        let r = check("editor", PERSONS, json!({"@type": "Organization"}));
        assert_eq!(
            r.message(),
            "\"editor\" type must be a (list of) Person object(s), not \"Organization\""
        );
    }

    #[test]
    fn unknown_nested_field() {
        let r = check("author", ACTORS, json!({"@type": "schema:Person", "foo": "bar"}));
        assert_eq!(r.message(), "Unknown field \"foo\" in \"author\".");
        assert_eq!(r.errors[0].path, "author.foo");
    }

    #[test]
    fn strings_must_be_uris() {
        let r = check("license", CREATIVE_WORKS, json!("MIT"));
        assert_eq!(
            r.message(),
            "\"license\" must be an URI or a CreativeWork object, not: \"MIT\""
        );
        let r = check("license", CREATIVE_WORKS, json!(3));
        assert_eq!(r.message(), "\"license\" must be a CreativeWork object or an URI, not 3");
    }

    #[test]
    fn role_back_reference_accepts_blank_ids() {
        let r = check(
            "author",
            ACTORS_AND_ROLES,
            json!({"@type": "Role", "schema:author": "_:author_1", "roleName": "Dev",
                   "startDate": "2020-01-01"}),
        );
        assert!(r.is_valid(), "{:?}", r.errors);
    }

    #[test]
    fn every_type_has_a_schema() {
        for t in EntityType::ALL {
            assert!(!schema_for(t).is_empty());
        }
        assert_eq!(lookup(SOFTWARE_FIELDS, "keywords"), Some(FieldCheck::Texts));
        assert_eq!(lookup(SOFTWARE_FIELDS, "nope"), None);
    }
}
