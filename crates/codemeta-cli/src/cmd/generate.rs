use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use codemeta_core::prelude::{CodemetaError, CodemetaVersion, FormState, Session};
use serde::Serialize;
use serde_json::Value;

use crate::io::input;
use crate::io::store::FileStore;
use crate::output;

#[derive(Debug, Serialize)]
pub struct GenerateOut<'a> {
    pub version: &'a str,
    pub document: &'a Value,
}

pub async fn run(
    mut session: Session<FileStore>,
    form_input: &str,
    version: CodemetaVersion,
    out: Option<&Path>,
) -> Result<()> {
    let text = input::resolve_to_text(form_input).await?;
    let form = FormState::from_json(&text).with_context(|| format!("reading form {form_input}"))?;

    session.set_version(version);
    session.set_form(form);
    let generated = match session.generate() {
        Ok(generated) => generated,
        Err(CodemetaError::InvalidForm(issues)) => {
            for issue in &issues {
                output::error(&issue.to_string())?;
            }
            return Err(CodemetaError::InvalidForm(issues).into());
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(path) = out {
        fs::write(path, format!("{}\n", generated.text))
            .with_context(|| format!("writing {}", path.display()))?;
        output::ok(&format!("wrote {} (CodeMeta {})", path.display(), version))?;
    } else if output::is_json() {
        output::print(&GenerateOut {
            version: version.as_str(),
            document: &generated.document,
        })?;
    } else {
        output::print_text(&generated.text)?;
    }
    Ok(())
}
