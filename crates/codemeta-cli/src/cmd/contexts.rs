use anyhow::Result;
use codemeta_core::prelude::{CodemetaVersion, Engine};
use serde::Serialize;

use crate::output;

#[derive(Debug, Serialize)]
pub struct ContextOut {
    pub version: &'static str,
    pub url: &'static str,
    pub loaded: bool,
    pub default: bool,
}

pub fn run(engine: &Engine) -> Result<()> {
    let rows: Vec<ContextOut> = CodemetaVersion::ALL
        .into_iter()
        .map(|version| ContextOut {
            version: version.as_str(),
            url: version.context_url(),
            loaded: engine.contexts().is_loaded(version),
            default: version == engine.config().default_version,
        })
        .collect();

    if output::is_json() {
        output::print(&rows)?;
    } else {
        for row in &rows {
            let mut flags = Vec::new();
            if row.default {
                flags.push("default");
            }
            if !row.loaded {
                flags.push("not loaded");
            }
            let suffix = if flags.is_empty() {
                String::new()
            } else {
                format!(" ({})", flags.join(", "))
            };
            output::print_text(&format!("{}\t{}{}", row.version, row.url, suffix))?;
        }
    }
    Ok(())
}
