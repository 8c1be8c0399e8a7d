//! CLI error types.

use arc_config::ConfigError;
use arc_oauth1::{OAuthError, TokenError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Signing(#[from] OAuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
