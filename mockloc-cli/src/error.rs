//! CLI error types.

use thiserror::Error;

use mockloc::replay::ReplayError;

/// Errors surfaced to the CLI user.
#[derive(Debug, Error)]
pub enum CliError {
    /// Script could not be loaded or failed validation.
    #[error("Script error: {0}")]
    Script(#[from] ReplayError),

    /// Script contains no fixes where at least one is required.
    #[error("Script '{0}' contains no fixes")]
    EmptyScript(String),
}
