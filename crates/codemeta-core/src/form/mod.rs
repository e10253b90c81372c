//! Flat form state.
//!
//! The form is what a user edits: one text value per simple field, an ordered
//! license selection, and two repeated groups of person rows (authors and
//! contributors), each row with its own role rows. Blank values mean "not
//! set" everywhere; generation never emits them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::license::LicenseSelection;
use crate::validate::primitives::{is_date, is_email, is_url};

pub mod fields;

use fields::{is_known_field, DATE_FIELDS, REQUIRED_FIELDS, URL_FIELDS};

/// A role held by a person row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleRow {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub role_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub start_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub end_date: String,
}

impl RoleRow {
    pub fn named(role_name: impl Into<String>) -> Self {
        Self {
            role_name: role_name.into(),
            ..Self::default()
        }
    }

    /// Value of a [`fields::ROLE_FIELDS`] entry.
    pub fn field(&self, name: &str) -> Option<&String> {
        match name {
            "roleName" => Some(&self.role_name),
            "startDate" => Some(&self.start_date),
            "endDate" => Some(&self.end_date),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "roleName" => Some(&mut self.role_name),
            "startDate" => Some(&mut self.start_date),
            "endDate" => Some(&mut self.end_date),
            _ => None,
        }
    }
}

/// One author or contributor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonRow {
    /// Public IRI of the person (e.g. an ORCID). Empty when unknown.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub given_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub family_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    /// Organization name or IRI.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub affiliation: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<RoleRow>,
}

impl PersonRow {
    pub fn named(given_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        Self {
            given_name: given_name.into(),
            family_name: family_name.into(),
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: RoleRow) -> Self {
        self.roles.push(role);
        self
    }

    /// Value of a [`fields::PERSON_FIELDS`] entry.
    pub fn field(&self, name: &str) -> Option<&String> {
        match name {
            "givenName" => Some(&self.given_name),
            "familyName" => Some(&self.family_name),
            "email" => Some(&self.email),
            "affiliation" => Some(&self.affiliation),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "givenName" => Some(&mut self.given_name),
            "familyName" => Some(&mut self.family_name),
            "email" => Some(&mut self.email),
            "affiliation" => Some(&mut self.affiliation),
            _ => None,
        }
    }
}

/// The two repeated person groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonGroup {
    Author,
    Contributor,
}

impl PersonGroup {
    pub const ALL: [PersonGroup; 2] = [PersonGroup::Author, PersonGroup::Contributor];

    /// Document property holding the group.
    pub fn property(&self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Contributor => "contributor",
        }
    }

    /// Key of the group in the serialized form.
    pub fn form_key(&self) -> &'static str {
        match self {
            Self::Author => "authors",
            Self::Contributor => "contributors",
        }
    }
}

/// A violated input constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormIssue {
    /// Form location, e.g. `name` or `authors[0].roles[1].startDate`.
    pub field: String,
    pub message: String,
}

impl FormIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FormIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default, skip_serializing_if = "LicenseSelection::is_empty")]
    pub licenses: LicenseSelection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<PersonRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<PersonRow>,
    /// Simple fields by name.
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Raw value of a simple field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Value of a simple field, or `None` when blank.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|v| !v.trim().is_empty())
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.fields.remove(field)
    }

    pub fn group(&self, group: PersonGroup) -> &[PersonRow] {
        match group {
            PersonGroup::Author => &self.authors,
            PersonGroup::Contributor => &self.contributors,
        }
    }

    pub fn group_mut(&mut self, group: PersonGroup) -> &mut Vec<PersonRow> {
        match group {
            PersonGroup::Author => &mut self.authors,
            PersonGroup::Contributor => &mut self.contributors,
        }
    }

    /// Append a person row and return its 1-based position.
    pub fn add_person(&mut self, group: PersonGroup, row: PersonRow) -> usize {
        let rows = self.group_mut(group);
        rows.push(row);
        rows.len()
    }

    /// Back to an empty form: no fields, licenses, persons or roles.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Input constraints the form enforces before anything is generated.
    pub fn check_validity(&self) -> Vec<FormIssue> {
        let mut issues = Vec::new();

        for field in REQUIRED_FIELDS {
            if self.value(field).is_none() {
                issues.push(FormIssue::new(field, "Please fill out this field."));
            }
        }

        for field in self.fields.keys().filter(|f| !is_known_field(f)) {
            issues.push(FormIssue::new(field.as_str(), "Unknown form field."));
        }

        for field in URL_FIELDS {
            if let Some(v) = self.value(field) {
                check_url(&mut issues, field, v);
            }
        }
        if let Some(links) = self.value("relatedLink") {
            for (i, line) in links.split('\n').map(str::trim).enumerate() {
                if !line.is_empty() {
                    check_url(&mut issues, &format!("relatedLink[{i}]"), line);
                }
            }
        }
        for field in DATE_FIELDS {
            if let Some(v) = self.value(field) {
                check_date(&mut issues, field, v);
            }
        }

        for group in PersonGroup::ALL {
            for (i, person) in self.group(group).iter().enumerate() {
                let at = format!("{}[{i}]", group.form_key());
                if !person.id.trim().is_empty() {
                    check_url(&mut issues, &format!("{at}.id"), &person.id);
                }
                if !person.email.trim().is_empty() && !is_email(&person.email) {
                    issues.push(FormIssue::new(
                        format!("{at}.email"),
                        format!("Please enter an email address, not \"{}\".", person.email),
                    ));
                }
                for (j, role) in person.roles.iter().enumerate() {
                    let role_at = format!("{at}.roles[{j}]");
                    if !role.start_date.trim().is_empty() {
                        check_date(&mut issues, &format!("{role_at}.startDate"), &role.start_date);
                    }
                    if !role.end_date.trim().is_empty() {
                        check_date(&mut issues, &format!("{role_at}.endDate"), &role.end_date);
                    }
                }
            }
        }

        issues
    }

    pub fn is_valid(&self) -> bool {
        self.check_validity().is_empty()
    }
}

fn check_url(issues: &mut Vec<FormIssue>, field: &str, value: &str) {
    if !is_url(value) {
        issues.push(FormIssue::new(field, format!("Please enter a URL, not \"{value}\".")));
    }
}

fn check_date(issues: &mut Vec<FormIssue>, field: &str, value: &str) {
    if !is_date(value) {
        issues.push(FormIssue::new(
            field,
            format!("Please enter a date as YYYY-MM-DD, not \"{value}\"."),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fields::{PERSON_FIELDS, ROLE_FIELDS};

    #[test]
    fn row_tables_name_real_fields() {
        let mut row = PersonRow::default();
        for name in PERSON_FIELDS {
            *row.field_mut(name).unwrap() = name.to_string();
        }
        assert_eq!(row.affiliation, "affiliation");
        assert_eq!(row.field("givenName").map(String::as_str), Some("givenName"));
        assert!(row.field("id").is_none());

        let mut role = RoleRow::default();
        for name in ROLE_FIELDS {
            *role.field_mut(name).unwrap() = name.to_string();
        }
        assert_eq!(role.end_date, "endDate");
        assert!(role.field("author").is_none());
    }

    #[test]
    fn name_is_required() {
        let form = FormState::new().with("name", "   ");
        let issues = form.check_validity();
        assert_eq!(issues, vec![FormIssue::new("name", "Please fill out this field.")]);
        assert!(FormState::new().with("name", "x").is_valid());
    }

    #[test]
    fn url_and_date_inputs() {
        let form = FormState::new()
            .with("name", "x")
            .with("codeRepository", "not a url")
            .with("dateCreated", "2020-1-1")
            .with("relatedLink", "https://example.org\n\nfoo");
        let fields: Vec<_> = form.check_validity().into_iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["codeRepository", "relatedLink[2]", "dateCreated"]);
    }

    #[test]
    fn person_rows_are_checked() {
        let mut form = FormState::new().with("name", "x");
        let mut row = PersonRow::named("Ada", "Lovelace");
        row.id = "orcid".into();
        row.email = "ada".into();
        row.roles.push(RoleRow {
            role_name: "Dev".into(),
            start_date: "yesterday".into(),
            end_date: String::new(),
        });
        form.add_person(PersonGroup::Contributor, row);
        let fields: Vec<_> = form.check_validity().into_iter().map(|i| i.field).collect();
        assert_eq!(
            fields,
            vec![
                "contributors[0].id",
                "contributors[0].email",
                "contributors[0].roles[0].startDate"
            ]
        );
    }

    #[test]
    fn unknown_fields_are_reported() {
        let form = FormState::new().with("name", "x").with("colour", "blue");
        assert_eq!(form.check_validity()[0].field, "colour");
    }

    #[test]
    fn serde_shape() {
        let form = FormState::from_json(
            r#"{"name": "x", "licenses": ["MIT"],
                "authors": [{"givenName": "Ada", "roles": [{"roleName": "Dev"}]}]}"#,
        )
        .unwrap();
        assert_eq!(form.value("name"), Some("x"));
        assert_eq!(form.licenses.ids(), ["MIT".to_string()]);
        assert_eq!(form.authors[0].roles[0], RoleRow::named("Dev"));

        let back = serde_json::to_value(&form).unwrap();
        assert_eq!(back["authors"][0]["givenName"], "Ada");
        assert!(back.get("contributors").is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut form = FormState::new().with("name", "x");
        form.add_person(PersonGroup::Author, PersonRow::default());
        form.reset();
        assert_eq!(form, FormState::default());
    }
}
