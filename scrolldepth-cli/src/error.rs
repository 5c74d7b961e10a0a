//! CLI error types.

use thiserror::Error;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The session script could not be loaded or was invalid.
    #[error("script error: {0}")]
    Script(#[from] scrolldepth::replay::ScriptError),

    /// An event record could not be encoded for output.
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}
