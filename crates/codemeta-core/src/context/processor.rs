//! Compaction of CodeMeta documents through the `json-ld` crate.
//!
//! The input is expanded with the contexts it declares and compacted against
//! the requested one, all contexts being resolved by the [`PinnedLoader`]. The
//! library is async; every document it can request is already in memory, so
//! the future is driven to completion on the calling thread.
//!
//! The compacted output is then laid out the way documents are displayed:
//! `@context` first, then `@id` and `@type` (never their aliases), then the
//! other keys in lexical order, at every level. Literal value objects
//! (`{"@type": "schema:Date", "@value": "2020-01-01"}`), which compaction
//! emits for typed literals without a matching term, become their plain value.

use std::collections::BTreeMap;

use futures::executor::block_on;
use iref::{IriBuf, IriRefBuf};
use json_ld::syntax::context::{Context, ContextEntry};
use json_ld::{JsonLdProcessor, RemoteContextReference, RemoteDocument, RemoteDocumentReference};
use serde_json::{Map, Value};
use tracing::debug;

use super::{ContextRegistry, PinnedLoader};
use crate::errors::{CodemetaError, CodemetaResult};

const LEADING_KEYS: [&str; 3] = ["@context", "@id", "@type"];

/// Expand-then-compact pipeline used by generation and import.
#[derive(Debug, Clone, Copy)]
pub struct Compactor<'a> {
    contexts: &'a ContextRegistry,
}

impl<'a> Compactor<'a> {
    pub fn new(contexts: &'a ContextRegistry) -> Self {
        Self { contexts }
    }

    /// Compact `document` against `context`: a context IRI or an array of
    /// them. The context value is copied into the output.
    pub fn compact(&self, document: &Value, context: &Value) -> CodemetaResult<Value> {
        let reference = context_reference(context)?;
        let input = RemoteDocument::<IriBuf>::new(
            None,
            None,
            json_syntax::Value::from_serde_json(document.clone()),
        );
        let mut loader = PinnedLoader::new(self.contexts);
        let compacted = block_on(input.compact(reference, &mut loader))
            .map_err(|e| CodemetaError::context(format!("compaction failed: {e}")))?;

        let aliases = self.contexts.keyword_aliases(context);
        let out = match layout(compacted.into_serde_json(), &aliases) {
            Value::Object(map) => map,
            other => {
                return Err(CodemetaError::invariant(format!(
                    "compaction produced a non-object document: {other}"
                )))
            }
        };

        let mut doc = Map::new();
        if !context.is_null() {
            doc.insert("@context".into(), context.clone());
        }
        doc.extend(out.into_iter().filter(|(key, _)| key != "@context"));
        debug!(keys = doc.len(), "compacted document");
        Ok(Value::Object(doc))
    }
}

fn context_reference(context: &Value) -> CodemetaResult<RemoteContextReference> {
    match context {
        Value::String(iri) => Ok(RemoteDocumentReference::Iri(parse_iri(iri)?)),
        Value::Array(items) => {
            let entries = items
                .iter()
                .map(|item| match item.as_str() {
                    Some(iri) => IriRefBuf::new(iri.to_string())
                        .map(ContextEntry::IriRef)
                        .map_err(|_| CodemetaError::context(format!("not an IRI reference: {iri}"))),
                    None => Err(CodemetaError::context(format!(
                        "only context IRIs can be compacted against, not {item}"
                    ))),
                })
                .collect::<CodemetaResult<Vec<_>>>()?;
            Ok(RemoteDocumentReference::Loaded(RemoteDocument::new(
                None,
                None,
                Context::Many(entries),
            )))
        }
        other => Err(CodemetaError::context(format!(
            "only context IRIs can be compacted against, not {other}"
        ))),
    }
}

fn parse_iri(iri: &str) -> CodemetaResult<IriBuf> {
    IriBuf::new(iri.to_string()).map_err(|_| CodemetaError::context(format!("not an IRI: {iri}")))
}

/// Keywords under their own name, leading keys first, the rest sorted.
fn layout(value: Value, aliases: &[(String, String)]) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(|v| layout(v, aliases)).collect()),
        Value::Object(map) if is_value_object(&map) => map
            .into_iter()
            .find(|(key, _)| key == "@value")
            .map(|(_, value)| value)
            .unwrap_or(Value::Null),
        Value::Object(map) => {
            let mut leading: [Option<Value>; LEADING_KEYS.len()] = Default::default();
            let mut rest = BTreeMap::new();
            for (key, value) in map {
                let key = aliases
                    .iter()
                    .find(|(alias, _)| *alias == key)
                    .map(|(_, keyword)| keyword.clone())
                    .unwrap_or(key);
                let value = if key == "@context" { value } else { layout(value, aliases) };
                match LEADING_KEYS.iter().position(|k| *k == key) {
                    Some(i) => leading[i] = Some(value),
                    None => {
                        rest.insert(key, value);
                    }
                }
            }
            let mut out = Map::new();
            for (key, value) in LEADING_KEYS.iter().zip(leading) {
                if let Some(value) = value {
                    out.insert((*key).to_string(), value);
                }
            }
            out.extend(rest);
            Value::Object(out)
        }
        other => other,
    }
}

fn is_value_object(map: &Map<String, Value>) -> bool {
    map.contains_key("@value")
        && map
            .keys()
            .all(|k| matches!(k.as_str(), "@value" | "@type" | "@language"))
}
