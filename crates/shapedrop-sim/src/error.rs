//! Errors raised while loading and replaying a session script.

use shapedrop_core::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("failed to read script {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse script: {0}")]
    Script(serde_json::Error),
    #[error("failed to serialize snapshot: {0}")]
    Output(serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
