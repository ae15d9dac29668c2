//! Error types emitted by the Catchspot CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use catchspot_spots::SpotQueryError;
use thiserror::Error;

/// Errors emitted by the Catchspot CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the catch export failed.
    #[error("failed to open catch export at {path:?}: {source}")]
    OpenCatches {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The catch export is not a JSON array of catch records.
    #[error("failed to parse catch export JSON at {path:?}: {source}")]
    ParseCatches {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A `--near` value was not a `lat,lng` pair.
    #[error("invalid --near value {raw:?}: expected \"lat,lng\"")]
    InvalidNear { raw: String },
    /// The engine rejected the query parameters.
    #[error("query failed: {0}")]
    Query(#[from] SpotQueryError),
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
