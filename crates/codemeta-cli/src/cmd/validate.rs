use anyhow::Result;
use codemeta_core::prelude::Engine;

use super::Reported;
use crate::io::input;
use crate::output;

pub async fn run(engine: &Engine, source: &str) -> Result<()> {
    let text = input::resolve_to_text(source).await?;
    let report = engine.validate_text(&text)?;

    if output::is_json() {
        output::print(&report)?;
    } else if report.is_valid() {
        output::ok("document is valid")?;
    } else {
        for message in report.messages() {
            output::error(message)?;
        }
    }

    if report.is_valid() {
        Ok(())
    } else {
        Err(Reported::InvalidDocument.into())
    }
}
