use anyhow::Result;
use codemeta_core::prelude::Session;

use crate::io::input;
use crate::io::store::FileStore;
use crate::output;

pub async fn run(mut session: Session<FileStore>, source: &str) -> Result<()> {
    let text = input::resolve_to_text(source).await?;
    let outcome = session.import(&text)?;

    if let Some(message) = outcome.message() {
        output::warn(message)?;
    }
    for license in &outcome.dropped_licenses {
        output::warn(&format!("license {license} is not an SPDX license and was not imported"))?;
    }

    if output::is_json() {
        output::print(&outcome)?;
    } else {
        output::print(&outcome.form)?;
    }
    Ok(())
}
