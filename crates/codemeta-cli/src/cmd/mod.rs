use std::process::ExitCode;

use anyhow::Result;
use codemeta_core::prelude::{CodemetaError, Engine, EngineConfig, Session};

use crate::args::{Cli, Command};
use crate::io::{data, store::FileStore};
use crate::output;

mod contexts;
mod generate;
mod import;
mod licenses;
mod restore;
mod validate;

/// Shown when the engine generated a document its own validator rejects.
pub const BUG_MESSAGE: &str = "Bug detected! The data you wrote is correct; but for some reason, \
it seems we generated an invalid codemeta.json. Please report this bug at \
https://github.com/codemeta/codemeta-generator/issues/new and copy-paste the generated \
codemeta.json file. Thanks!";

/// Exit status for engine defects, distinct from bad input (1) and usage errors (2).
const EXIT_BUG: u8 = 3;

/// Failures whose details were already printed.
#[derive(Debug, thiserror::Error)]
pub enum Reported {
    #[error("document is not valid")]
    InvalidDocument,
    #[error("unknown license")]
    UnknownLicense,
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    let engine = data::load_engine(cli.data_dir.as_deref(), EngineConfig::default())?;
    match cli.command {
        Command::Generate { form, version, out } => {
            generate::run(open_session(engine, &cli.session_dir), &form, version, out.as_deref()).await
        }
        Command::Import { input } => import::run(open_session(engine, &cli.session_dir), &input).await,
        Command::Validate { input } => validate::run(&engine, &input).await,
        Command::Licenses { query, check } => licenses::run(&engine, query.as_deref(), check.as_deref()),
        Command::Contexts => contexts::run(&engine),
        Command::Restore => restore::run(open_session(engine, &cli.session_dir)),
    }
}

fn open_session(engine: Engine, session_dir: &std::path::Path) -> Session<FileStore> {
    Session::new(engine, FileStore::new(session_dir))
}

/// Print `e` and pick the exit status.
///
/// The status does not depend on whether stderr could be written.
pub fn report_failure(e: &anyhow::Error) -> ExitCode {
    let (code, printed) = print_failure(e);
    if let Err(err) = printed {
        tracing::debug!(error = %err, "could not print failure");
    }
    code
}

fn print_failure(e: &anyhow::Error) -> (ExitCode, std::io::Result<()>) {
    if let Some(err) = e.downcast_ref::<CodemetaError>() {
        if err.is_internal() {
            let printed = output::error(&err.to_string()).and_then(|()| output::eprintln_line(BUG_MESSAGE));
            return (ExitCode::from(EXIT_BUG), printed);
        }
    }
    if e.downcast_ref::<Reported>().is_some() {
        return (ExitCode::FAILURE, Ok(()));
    }
    (ExitCode::FAILURE, output::error(&format!("{e:#}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_status_follows_the_error_kind() {
        let bug = anyhow::Error::from(CodemetaError::invariant("broken"));
        let (code, printed) = print_failure(&bug);
        assert_eq!(code, ExitCode::from(EXIT_BUG));
        assert!(printed.is_ok());

        let reported = anyhow::Error::from(Reported::InvalidDocument);
        assert_eq!(report_failure(&reported), ExitCode::FAILURE);

        let other = anyhow::anyhow!("reading form.json");
        assert_eq!(print_failure(&other).0, ExitCode::FAILURE);
    }
}
