//! Error types emitted by the loadplan CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use loadplan_core::{ItemId, RegistryError, ValidationError};
use thiserror::Error;

/// Errors emitted by the loadplan CLI.
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
    #[error("{field} path {path:?} does not exist or is not a file")]
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
    /// The `--tiers` list was empty or contained a blank entry.
    #[error("invalid tier list {value:?}: expected comma-separated tier names")]
    InvalidTiers { value: String },
    /// The `--sequencing` value named no known policy.
    #[error("unknown sequencing policy {value:?} (expected batch or paired)")]
    InvalidSequencing { value: String },
    /// Failed to open the evaluation request file.
    #[error("failed to open evaluation request at {path:?}: {source}")]
    OpenRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to decode the evaluation request JSON.
    #[error("failed to parse evaluation request at {path:?}: {source}")]
    ParseRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The request catalogue listed the same item twice.
    #[error("evaluation request at {path:?} defines item {item_id} more than once")]
    DuplicateCatalogItem { path: Utf8PathBuf, item_id: ItemId },
    /// Failed to open the fleet file.
    #[error("failed to open fleet file at {path:?}: {source}")]
    OpenFleet {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to decode the fleet JSON.
    #[error("failed to parse fleet file at {path:?}: {source}")]
    ParseFleet {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The fleet profiles did not form a valid registry.
    #[error("invalid fleet at {path:?}: {source}")]
    InvalidFleet {
        path: Utf8PathBuf,
        #[source]
        source: RegistryError,
    },
    /// The engine rejected the bookings.
    #[error("evaluation failed: {0}")]
    Evaluate(#[from] ValidationError),
    /// Failed to serialise the tier plans to JSON.
    #[error("failed to serialise route plans: {0}")]
    SerialisePlans(#[source] serde_json::Error),
    /// Failed to write the plans to the output stream.
    #[error("failed to write route plans: {0}")]
    WriteOutput(#[source] std::io::Error),
}
