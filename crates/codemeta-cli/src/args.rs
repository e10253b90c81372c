use std::path::PathBuf;

use clap::{Parser, Subcommand};
use codemeta_core::prelude::CodemetaVersion;

#[derive(Parser, Debug, Clone)]
#[command(name = "codemeta", version, about = "CodeMeta generator CLI")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding contexts/*.jsonld and spdx/licenses.json.
    /// Bundled copies are used for missing files.
    #[arg(long, global = true, env = "CODEMETA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Session directory (default: .codemeta)
    #[arg(long, global = true, default_value = ".codemeta")]
    pub session_dir: PathBuf,

    /// Write logs to stderr as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate codemeta.json from a form file.
    Generate {
        /// Form file (JSON) path or URL.
        #[arg(long)]
        form: String,

        /// CodeMeta version to generate: 2.0 or 3.0
        #[arg(long, default_value = "2.0")]
        version: CodemetaVersion,

        /// Write the document here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Import a codemeta.json document and print the form it maps to.
    Import {
        /// Input path or URL.
        input: String,
    },

    /// Validate a codemeta.json document.
    Validate {
        /// Input path or URL.
        input: String,
    },

    /// List SPDX licenses, optionally filtered.
    Licenses {
        /// Case-insensitive filter on id or name.
        query: Option<String>,

        /// Normalize and check a single license id.
        #[arg(long)]
        check: Option<String>,
    },

    /// List known CodeMeta versions and their context IRIs.
    Contexts,

    /// Re-import the last generated document from the session directory.
    Restore,
}
