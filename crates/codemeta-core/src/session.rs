//! Interactive session: one form, its generated output and a storage slot.
//!
//! A session is always in one of three states. Generate and import only start
//! from `Idle`, and the state goes back to `Idle` on every exit path. While an
//! import repopulates the form, edits do not trigger auto-generation.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::engine::{Engine, Generated};
use crate::errors::{CodemetaError, CodemetaResult};
use crate::form::FormState;
use crate::import::ImportOutcome;
use crate::version::CodemetaVersion;

/// Shown when generation is refused because the form is invalid.
pub const INVALID_INPUT_MESSAGE: &str = "invalid input (see error above)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Idle,
    Importing,
    Generating,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Importing => "importing",
            Self::Generating => "generating",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slot holding the last generated document text.
pub trait SessionStore {
    fn load(&self) -> CodemetaResult<Option<String>>;
    fn save(&mut self, text: &str) -> CodemetaResult<()>;
}

/// In-process slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    text: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> CodemetaResult<Option<String>> {
        Ok(self.text.clone())
    }

    fn save(&mut self, text: &str) -> CodemetaResult<()> {
        self.text = Some(text.to_string());
        Ok(())
    }
}

pub struct Session<S: SessionStore> {
    engine: Engine,
    store: S,
    form: FormState,
    version: CodemetaVersion,
    state: SessionState,
    last_output: Option<String>,
    last_error: Option<String>,
}

impl<S: SessionStore> Session<S> {
    pub fn new(engine: Engine, store: S) -> Self {
        let version = engine.config().default_version;
        Self {
            engine,
            store,
            form: FormState::default(),
            version,
            state: SessionState::Idle,
            last_output: None,
            last_error: None,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn version(&self) -> CodemetaVersion {
        self.version
    }

    pub fn set_version(&mut self, version: CodemetaVersion) {
        self.version = version;
    }

    /// Last successfully generated text.
    pub fn last_output(&self) -> Option<&str> {
        self.last_output.as_deref()
    }

    /// The one error message currently displayed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replace the whole form without regenerating.
    pub fn set_form(&mut self, form: FormState) {
        self.form = form;
    }

    /// Apply a form change, then regenerate if the session is idle.
    ///
    /// An invalid form is not an error here: it only updates the displayed
    /// message, as generating from the form directly would.
    pub fn edit<F>(&mut self, change: F) -> CodemetaResult<()>
    where
        F: FnOnce(&mut FormState),
    {
        change(&mut self.form);
        if self.state != SessionState::Idle {
            debug!(state = %self.state, "auto-generation suppressed");
            return Ok(());
        }
        match self.generate() {
            Ok(_) | Err(CodemetaError::InvalidForm(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Generate from the current form, persist and record the output.
    ///
    /// On an invalid form the previous output is kept.
    pub fn generate(&mut self) -> CodemetaResult<Generated> {
        self.run_in(SessionState::Generating, |session| {
            match session.engine.generate(&session.form, session.version) {
                Ok(generated) => {
                    session.store.save(&generated.text)?;
                    session.last_output = Some(generated.text.clone());
                    session.last_error = None;
                    Ok(generated)
                }
                Err(e @ CodemetaError::InvalidForm(_)) => {
                    session.last_error = Some(INVALID_INPUT_MESSAGE.to_string());
                    Err(e)
                }
                Err(e) => Err(e),
            }
        })
    }

    /// Replace the form with the content of `text`.
    pub fn import(&mut self, text: &str) -> CodemetaResult<ImportOutcome> {
        self.run_in(SessionState::Importing, |session| {
            let outcome = match session.engine.import(text) {
                Ok(outcome) => outcome,
                Err(e) => {
                    session.last_error = Some(e.to_string());
                    return Err(e);
                }
            };
            let form = outcome.form.clone();
            session.edit(move |current| *current = form)?;
            session.last_error = outcome.message().map(str::to_string);
            Ok(outcome)
        })
    }

    /// Re-import the stored document, if any.
    pub fn restore(&mut self) -> CodemetaResult<Option<ImportOutcome>> {
        match self.store.load()? {
            Some(text) if !text.trim().is_empty() => {
                self.last_output = Some(text.clone());
                self.import(&text).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn run_in<T, F>(&mut self, state: SessionState, f: F) -> CodemetaResult<T>
    where
        F: FnOnce(&mut Self) -> CodemetaResult<T>,
    {
        if self.state != SessionState::Idle {
            return Err(CodemetaError::Busy(self.state));
        }
        self.state = state;
        let result = f(self);
        self.state = SessionState::Idle;
        result
    }
}
