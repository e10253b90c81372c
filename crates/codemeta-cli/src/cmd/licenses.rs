use anyhow::Result;
use codemeta_core::prelude::{CodemetaError, Engine};
use serde::Serialize;

use super::Reported;
use crate::output;

#[derive(Debug, Serialize)]
pub struct CheckOut<'a> {
    pub input: &'a str,
    pub license_id: Option<String>,
    pub error: Option<String>,
}

pub fn run(engine: &Engine, query: Option<&str>, check: Option<&str>) -> Result<()> {
    if let Some(id) = check {
        return check_one(engine, id);
    }

    let hits = engine.licenses().search(query.unwrap_or(""));
    if output::is_json() {
        output::print(&hits)?;
    } else {
        for license in hits {
            output::print_text(&format!("{}\t{}", license.license_id, license.name))?;
        }
    }
    Ok(())
}

fn check_one(engine: &Engine, input: &str) -> Result<()> {
    let result = engine.licenses().normalize(input);
    if output::is_json() {
        let (license_id, error) = match &result {
            Ok(id) => (Some(id.clone()), None),
            Err(e) => (None, Some(e.to_string())),
        };
        output::print(&CheckOut {
            input,
            license_id,
            error,
        })?;
    }

    match result {
        Ok(id) => {
            if !output::is_json() {
                output::print_text(&id)?;
            }
            Ok(())
        }
        Err(e @ CodemetaError::UnknownLicense(_)) => {
            if !output::is_json() {
                output::error(&e.to_string())?;
            }
            Err(Reported::UnknownLicense.into())
        }
        Err(e) => Err(e.into()),
    }
}
