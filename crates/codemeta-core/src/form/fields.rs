//! Field tables shared by generation and import.
//!
//! These tables are the single source of truth for how a flat form field maps
//! onto document properties. Generation reads them forwards, import reads them
//! backwards.

/// Form fields copied verbatim into a property of the same name.
pub const DIRECT_FIELDS: [&str; 18] = [
    "codeRepository",
    "contIntegration",
    "dateCreated",
    "datePublished",
    "dateModified",
    "downloadUrl",
    "issueTracker",
    "name",
    "version",
    "identifier",
    "description",
    "applicationCategory",
    "releaseNotes",
    "funding",
    "developmentStatus",
    "isSourceCodeOf",
    "isPartOf",
    "referencePublication",
];

/// Form fields holding a list joined on a fixed separator.
pub const SPLIT_FIELDS: [(&str, &str); 6] = [
    ("keywords", ","),
    ("programmingLanguage", ","),
    ("runtimePlatform", ","),
    ("operatingSystem", ","),
    ("softwareRequirements", "\n"),
    ("relatedLink", "\n"),
];

/// One form field written under every property name a version may use.
pub const CROSS_FIELDS: [(&str, &[&str]); 1] =
    [("contIntegration", &["contIntegration", "continuousIntegration"])];

/// Free-text fields turned into an Organization reference.
pub const SHORT_ORG_FIELDS: [&str; 1] = ["funder"];

pub const REVIEW_FIELDS: [&str; 2] = ["reviewAspect", "reviewBody"];

pub const PERSON_FIELDS: [&str; 4] = ["givenName", "familyName", "email", "affiliation"];

pub const ROLE_FIELDS: [&str; 3] = ["roleName", "startDate", "endDate"];

/// Inputs that only accept absolute URLs.
pub const URL_FIELDS: [&str; 6] = [
    "codeRepository",
    "contIntegration",
    "downloadUrl",
    "issueTracker",
    "isPartOf",
    "isSourceCodeOf",
];

/// Inputs that only accept `YYYY-MM-DD`.
pub const DATE_FIELDS: [&str; 3] = ["dateCreated", "datePublished", "dateModified"];

pub const REQUIRED_FIELDS: [&str; 1] = ["name"];

pub fn separator_of(field: &str) -> Option<&'static str> {
    SPLIT_FIELDS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, sep)| *sep)
}

/// True for any property produced by a cross-version field.
pub fn is_cross_alias(property: &str) -> bool {
    CROSS_FIELDS
        .iter()
        .any(|(_, aliases)| aliases.contains(&property))
}

/// Names accepted as keys of [`super::FormState::fields`].
pub fn is_known_field(field: &str) -> bool {
    DIRECT_FIELDS.contains(&field)
        || separator_of(field).is_some()
        || SHORT_ORG_FIELDS.contains(&field)
        || REVIEW_FIELDS.contains(&field)
}
