//! Validators for native schema.org data types.
//!
//! Each validator takes the field name (used in messages), the path of the
//! value and the value itself, records at most one error per offending value
//! and returns whether the value passed. Plural-capable validators accept a
//! single value or an array; the wording differs depending on whether the bad
//! value stood alone or sat inside a list.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use url::Url;

use super::{item_path, render, ErrorKind, ValidationReport};
use crate::model::is_blank_node_id;

fn date_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").ok())
        .as_ref()
}

fn email_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+$").ok())
        .as_ref()
}

/// Absolute URL with a non-empty host.
pub fn is_url(s: &str) -> bool {
    Url::parse(s)
        .map(|u| u.host_str().is_some_and(|h| !h.is_empty()))
        .unwrap_or(false)
}

/// URL, or a blank-node identifier.
pub fn is_node_reference(s: &str) -> bool {
    is_blank_node_id(s) || is_url(s)
}

/// `YYYY-MM-DD`, without a calendar check.
pub fn is_date(s: &str) -> bool {
    date_pattern().is_some_and(|re| re.is_match(s))
}

pub fn is_email(s: &str) -> bool {
    email_pattern().is_some_and(|re| re.is_match(s))
}

/// Run `check` on each element of an array, or once on a single value.
///
/// `check` receives the value, whether it sits in a list, and its path.
pub fn list_or_single<F>(path: &str, value: &Value, report: &mut ValidationReport, mut check: F) -> bool
where
    F: FnMut(&Value, bool, &str, &mut ValidationReport) -> bool,
{
    match value {
        Value::Array(items) => {
            let mut ok = true;
            for (i, item) in items.iter().enumerate() {
                ok &= check(item, true, &item_path(path, i), report);
            }
            ok
        }
        single => check(single, false, path, report),
    }
}

pub fn urls(field: &str, path: &str, value: &Value, report: &mut ValidationReport) -> bool {
    list_or_single(path, value, report, |item, in_list, path, report| match item {
        Value::String(_) => url(field, path, item, report),
        _ if in_list => {
            report.push(
                ErrorKind::InvalidValue,
                path,
                format!(
                    "\"{field}\" must be a list of URLs (or a single URL), but it contains: {}",
                    render(item)
                ),
            );
            false
        }
        _ => {
            report.push(
                ErrorKind::InvalidValue,
                path,
                format!("\"{field}\" must be an URL (or a list of URLs), not: {}", render(item)),
            );
            false
        }
    })
}

pub fn url(field: &str, path: &str, value: &Value, report: &mut ValidationReport) -> bool {
    if value.as_str().is_some_and(is_url) {
        return true;
    }
    report.push(
        ErrorKind::InvalidValue,
        path,
        format!("Invalid URL in field \"{field}\": {}", render(value)),
    );
    false
}

pub fn texts_or_urls(field: &str, path: &str, value: &Value, report: &mut ValidationReport) -> bool {
    list_or_single(path, value, report, |item, in_list, path, report| {
        if item.is_string() {
            return true;
        }
        let message = if in_list {
            format!(
                "\"{field}\" must be a list of texts/URLs (or a single text/URL), but it contains: {}",
                render(item)
            )
        } else {
            format!(
                "\"{field}\" must be a text/URL (or a list of texts/URLs), not: {}",
                render(item)
            )
        };
        report.push(ErrorKind::InvalidValue, path, message);
        false
    })
}

pub fn texts(field: &str, path: &str, value: &Value, report: &mut ValidationReport) -> bool {
    list_or_single(path, value, report, |item, in_list, path, report| {
        if item.is_string() {
            return true;
        }
        let message = if in_list {
            format!(
                "\"{field}\" must be a list of texts (or a single text), but it contains: {}",
                render(item)
            )
        } else {
            format!(
                "\"{field}\" must be a text (or a list of texts), not: {}",
                render(item)
            )
        };
        report.push(ErrorKind::InvalidValue, path, message);
        false
    })
}

pub fn text(field: &str, path: &str, value: &Value, report: &mut ValidationReport) -> bool {
    if value.is_string() {
        return true;
    }
    report.push(
        ErrorKind::InvalidValue,
        path,
        format!("\"{field}\" must be text, not {}", render(value)),
    );
    false
}

pub fn numbers(field: &str, path: &str, value: &Value, report: &mut ValidationReport) -> bool {
    list_or_single(path, value, report, |item, in_list, path, report| {
        if item.is_number() {
            return true;
        }
        let message = if in_list {
            format!(
                "\"{field}\" must be an array of numbers (or a single number), but contains: {}",
                render(item)
            )
        } else {
            format!(
                "\"{field}\" must be a number or an array of numbers, not: {}",
                render(item)
            )
        };
        report.push(ErrorKind::InvalidValue, path, message);
        false
    })
}

pub fn number_or_text(field: &str, path: &str, value: &Value, report: &mut ValidationReport) -> bool {
    if value.is_string() || value.is_number() {
        return true;
    }
    report.push(
        ErrorKind::InvalidValue,
        path,
        format!("\"{field}\" must be text or a number, not {}", render(value)),
    );
    false
}

pub fn boolean(field: &str, path: &str, value: &Value, report: &mut ValidationReport) -> bool {
    if value.is_boolean() {
        return true;
    }
    report.push(
        ErrorKind::InvalidValue,
        path,
        format!(
            "\"{field}\" must be a boolean (ie. \"true\" or \"false\"), not {}",
            render(value)
        ),
    );
    false
}

pub fn date(field: &str, path: &str, value: &Value, report: &mut ValidationReport) -> bool {
    match value.as_str() {
        None => {
            report.push(
                ErrorKind::InvalidValue,
                path,
                format!("\"{field}\" must be a date, not {}", render(value)),
            );
            false
        }
        Some(s) if !is_date(s) => {
            report.push(
                ErrorKind::InvalidValue,
                path,
                format!(
                    "\"{field}\" must be a date in the format YYYY-MM-DD, not {}",
                    render(value)
                ),
            );
            false
        }
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(
        f: fn(&str, &str, &Value, &mut ValidationReport) -> bool,
        field: &str,
        value: Value,
    ) -> (bool, String) {
        let mut report = ValidationReport::new();
        let ok = f(field, field, &value, &mut report);
        (ok, report.message().to_string())
    }

    #[test]
    fn urls_scalar_and_list_wording() {
        assert_eq!(
            run(urls, "codeRepository", json!({})),
            (
                false,
                "\"codeRepository\" must be an URL (or a list of URLs), not: {}".to_string()
            )
        );
        assert_eq!(
            run(urls, "codeRepository", json!(["http://example.org/", {}])),
            (
                false,
                "\"codeRepository\" must be a list of URLs (or a single URL), but it contains: {}"
                    .to_string()
            )
        );
        assert_eq!(
            run(urls, "codeRepository", json!(["http://example.org/", "foo"])),
            (false, "Invalid URL in field \"codeRepository\": \"foo\"".to_string())
        );
        assert!(run(urls, "codeRepository", json!("https://example.org/x")).0);
    }

    #[test]
    fn texts_or_urls_wording() {
        assert_eq!(
            run(texts_or_urls, "applicationCategory", json!({})).1,
            "\"applicationCategory\" must be a text/URL (or a list of texts/URLs), not: {}"
        );
        assert_eq!(
            run(texts_or_urls, "applicationCategory", json!(["a", 1])).1,
            "\"applicationCategory\" must be a list of texts/URLs (or a single text/URL), but it contains: 1"
        );
    }

    #[test]
    fn text_and_numbers() {
        assert_eq!(
            run(text, "description", json!([])).1,
            "\"description\" must be text, not []"
        );
        assert_eq!(
            run(numbers, "copyrightYear", json!("2020")).1,
            "\"copyrightYear\" must be a number or an array of numbers, not: \"2020\""
        );
        assert_eq!(
            run(numbers, "copyrightYear", json!([2020, "x"])).1,
            "\"copyrightYear\" must be an array of numbers (or a single number), but contains: \"x\""
        );
        assert!(run(number_or_text, "version", json!(1.5)).0);
        assert_eq!(
            run(number_or_text, "version", json!([])).1,
            "\"version\" must be text or a number, not []"
        );
    }

    #[test]
    fn booleans_and_dates() {
        assert_eq!(
            run(boolean, "isAccessibleForFree", json!("true")).1,
            "\"isAccessibleForFree\" must be a boolean (ie. \"true\" or \"false\"), not \"true\""
        );
        assert_eq!(
            run(date, "dateCreated", json!([])).1,
            "\"dateCreated\" must be a date, not []"
        );
        assert_eq!(
            run(date, "dateCreated", json!("foo")).1,
            "\"dateCreated\" must be a date in the format YYYY-MM-DD, not \"foo\""
        );
        // no calendar check
        assert!(run(date, "dateCreated", json!("2020-13-45")).0);
    }

    #[test]
    fn list_errors_are_accumulated() {
        let mut report = ValidationReport::new();
        assert!(!urls("relatedLink", "relatedLink", &json!(["a", "b"]), &mut report));
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[1].path, "relatedLink[1]");
    }

    #[test]
    fn url_predicates() {
        assert!(is_url("https://example.org"));
        assert!(!is_url("foo"));
        assert!(!is_url("mailto:someone@example.org"));
        assert!(is_node_reference("_:author_1"));
        assert!(is_email("a@b.c"));
        assert!(!is_email("not an email"));
    }
}
