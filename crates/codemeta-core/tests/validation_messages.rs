//! User-facing validation messages for hand-edited documents.

use codemeta_core::prelude::*;
use codemeta_core::validate::validate_document;
use serde_json::json;

fn message(doc: serde_json::Value) -> String {
    validate_document(&doc).message().to_string()
}

#[test]
fn minimal_documents_validate() {
    for t in ["SoftwareSourceCode", "SoftwareApplication", "schema:SoftwareSourceCode"] {
        let report = validate_document(&json!({"@type": t, "name": "x"}));
        assert!(report.is_valid(), "{t}: {}", report.message());
        assert_eq!(report.message(), "");
    }
}

#[test]
fn wrong_type_wins_over_field_errors() {
    for t in ["foo", "Person", "CreativeWork"] {
        let report = validate_document(&json!({"@type": t, "codeRepository": {}, "bogus": 1}));
        assert!(!report.is_valid());
        assert_eq!(
            report.message(),
            format!("Wrong document type: must be \"SoftwareSourceCode\"/\"SoftwareApplication\", not \"{t}\"")
        );
        assert_eq!(report.errors.len(), 1);
    }
}

#[test]
fn not_an_object() {
    assert_eq!(
        message(json!([])),
        "Document must be an object (starting and ending with { and }), not array."
    );
}

#[test]
fn url_fields() {
    assert_eq!(
        message(json!({"@type": "SoftwareSourceCode", "codeRepository": {}})),
        "\"codeRepository\" must be an URL (or a list of URLs), not: {}"
    );
    assert_eq!(
        message(json!({"@type": "SoftwareSourceCode", "codeRepository": ["http://example.org/", "foo"]})),
        "Invalid URL in field \"codeRepository\": \"foo\""
    );
}

#[test]
fn unknown_fields_name_their_parent() {
    assert_eq!(
        message(json!({"@type": "SoftwareSourceCode", "foo": "bar"})),
        "Unknown field \"foo\"."
    );
    assert_eq!(
        message(json!({
            "@type": "SoftwareSourceCode",
            "author": {"@type": "Person", "givenName": "Ada", "bar": 1}
        })),
        "Unknown field \"bar\" in \"author\"."
    );
}

#[test]
fn every_error_is_reported_in_order() {
    let report = validate_document(&json!({
        "@type": "SoftwareSourceCode",
        "codeRepository": "nope",
        "foo": 1,
        "dateCreated": "yesterday"
    }));
    let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["codeRepository", "foo", "dateCreated"]);
    assert_eq!(report.message(), "Invalid URL in field \"codeRepository\": \"nope\"");
}

#[test]
fn contexts() {
    let ok = validate_document(&json!({
        "@context": "https://w3id.org/codemeta/3.0",
        "@type": "SoftwareSourceCode"
    }));
    assert!(ok.is_valid());

    let msg = message(json!({"@context": "https://example.org/", "@type": "SoftwareSourceCode"}));
    assert!(msg.starts_with("@context must be \"https://doi.org/10.5063/schema/codemeta-2.0\" or "), "{msg}");

    let msg = message(json!({
        "@context": ["https://doi.org/10.5063/schema/codemeta-2.0", "https://w3id.org/codemeta/3.0"],
        "@type": "SoftwareSourceCode"
    }));
    assert!(msg.starts_with("Multiple values in @context are not supported"), "{msg}");
}

#[test]
fn blank_node_ids_are_accepted() {
    let report = validate_document(&json!({
        "@type": "SoftwareSourceCode",
        "author": [
            {"@type": "Person", "@id": "_:author_1", "givenName": "Ada"},
            {"@type": "Role", "schema:author": "_:author_1", "roleName": "Dev"}
        ]
    }));
    assert!(report.is_valid(), "{}", report.message());
}

#[test]
fn engine_validate_text_uses_the_same_messages() {
    let engine = Engine::bundled(EngineConfig::default()).unwrap();
    let report = engine.validate_text(r#"{"@type": "foo", "name": "My Test Software"}"#).unwrap();
    assert_eq!(
        report.message(),
        "Wrong document type: must be \"SoftwareSourceCode\"/\"SoftwareApplication\", not \"foo\""
    );
}
