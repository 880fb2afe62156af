//! Driver-level errors (§7): failures in loading a model or parsing CLI
//! input, as opposed to [`zonecheck_core::error::StateStatus`] which reports
//! an expected outcome of exploring a timed automaton.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read model file {path}: {source}")]
    ModelRead { path: PathBuf, source: std::io::Error },

    #[error("cannot parse model file {path}: {source}")]
    ModelParse { path: PathBuf, source: serde_json::Error },

    #[error("accepting label `{0}` is not declared in the model")]
    UnknownLabel(String),

    #[error(transparent)]
    Fatal(#[from] zonecheck_core::error::FatalError),
}
