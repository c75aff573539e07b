use std::path::PathBuf;

use thiserror::Error;

/// Both failure modes are terminal: the caller logs the error and exits
/// non-zero. A partially written file is not cleaned up.
#[derive(Debug, Error)]
pub enum Error {
    /// The descriptor string was malformed or failed validation.
    #[error("invalid cluster config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// The kubeconfig could not be written to its destination.
    #[error("writing kubeconfig to {}: {cause:#}", .path.display())]
    WriteFailed { path: PathBuf, cause: anyhow::Error },
}
