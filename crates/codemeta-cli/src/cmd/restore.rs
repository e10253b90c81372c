use anyhow::Result;
use codemeta_core::prelude::Session;

use crate::io::store::FileStore;
use crate::output;

pub fn run(mut session: Session<FileStore>) -> Result<()> {
    let Some(outcome) = session.restore()? else {
        output::warn(&format!(
            "nothing to restore: {} does not exist",
            session.store().path().display()
        ))?;
        return Ok(());
    };

    if let Some(message) = outcome.message() {
        output::warn(message)?;
    }
    output::print(&outcome.form)?;
    Ok(())
}
