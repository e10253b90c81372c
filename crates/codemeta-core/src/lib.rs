//! codemeta-core
//!
//! Engine behind the CodeMeta generator:
//! - Flat form state and its field tables
//! - Form -> JSON-LD document generation across CodeMeta 2.0 / 3.0
//! - Document -> form import (compacted or expanded input, roles regrouped per person)
//! - Human-friendly validation of hand-edited documents
//! - Pinned context documents served to the `json-ld` crate for compaction
//! - SPDX license selection
//! - Session state (Idle / Importing / Generating) with a pluggable storage slot
//!
//! The crate performs no filesystem or network I/O. Context documents and the
//! SPDX list are either bundled (`bundled-data` feature) or handed in by the caller.

pub mod config;
pub mod context;
pub mod engine;
pub mod errors;
pub mod form;
pub mod generate;
pub mod import;
pub mod license;
pub mod model;
pub mod session;
pub mod validate;
pub mod version;

pub use crate::errors::{CodemetaError, CodemetaResult};

/// Well-known IRIs and namespaces.
pub mod iri {
    pub const SPDX_PREFIX: &str = "https://spdx.org/licenses/";
    pub const SCHEMA_HTTP: &str = "http://schema.org/";
    pub const SCHEMA_HTTPS: &str = "https://schema.org/";
    pub const CODEMETA_TERMS: &str = "https://codemeta.github.io/terms/";
    /// Marks a node identifier with no external identity.
    pub const BLANK_NODE_PREFIX: &str = "_:";
}

/// Default engine settings.
pub mod defaults {
    /// Indentation of generated documents.
    pub const INDENT: usize = 4;
    /// Largest document text accepted by import/validate.
    pub const MAX_DOCUMENT_BYTES: usize = 2 * 1024 * 1024;
    /// Storage slot holding the last generated document.
    pub const SESSION_KEY: &str = "codemetaText";
}

/// Convenience re-exports.
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::context::{Compactor, ContextRegistry, PinnedLoader};
    pub use crate::engine::{Engine, Generated};
    pub use crate::form::{FormIssue, FormState, PersonGroup, PersonRow, RoleRow};
    pub use crate::import::ImportOutcome;
    pub use crate::license::{LicenseRegistry, LicenseSelection};
    pub use crate::model::{EntityType, NodeId};
    pub use crate::session::{MemoryStore, Session, SessionState, SessionStore};
    pub use crate::validate::{ValidationError, ValidationReport};
    pub use crate::version::CodemetaVersion;
    pub use crate::{CodemetaError, CodemetaResult};
}
