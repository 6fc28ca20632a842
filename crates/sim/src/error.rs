use battle_core::{ErrorSeverity, ExecuteError, GameError};

/// Failures while simulating or replaying a battle.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A command was rejected by the engine.
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    /// Replaying a transcript ended on a different state.
    #[error("replay diverged: expected digest {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    #[error("transcript encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("transcript I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Content could not be loaded or a battle could not be set up.
    #[error(transparent)]
    Content(#[from] anyhow::Error),
}

impl SimError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SimError::Execute(err) => err.severity(),
            SimError::DigestMismatch { .. } => ErrorSeverity::Fatal,
            SimError::Json(_) | SimError::Content(_) => ErrorSeverity::Validation,
            SimError::Io(_) => ErrorSeverity::Internal,
        }
    }
}
