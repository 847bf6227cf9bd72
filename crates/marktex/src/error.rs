//! CLI error types.

use marktex_assist::{AssistError, ImproveFailure};
use marktex_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Assist(#[from] AssistError),

    #[error("{0}")]
    Improve(#[from] ImproveFailure),

    #[error("file watcher: {0}")]
    Watch(#[from] notify::Error),
}
