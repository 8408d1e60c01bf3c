//! Error types for building and running reveals.

use crate::surface::SurfaceError;
use thiserror::Error;

/// Errors surfaced by the builder and the reveal scheduler.
#[derive(Debug, Error)]
pub enum RevealError {
    /// A stroke arrived with no points, so it has no bounding box.
    #[error("Stroke {index} has no points")]
    EmptyStroke { index: usize },
    /// The run was started without a usable rendering surface.
    #[error("No rendering surface available")]
    MissingSurface,
    /// Another run still owns the surface.
    #[error("A reveal is already running")]
    Busy,
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Result type for reveal operations.
pub type RevealResult<T> = Result<T, RevealError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = RevealError::EmptyStroke { index: 3 };
        assert_eq!(err.to_string(), "Stroke 3 has no points");

        let err: RevealError = SurfaceError::Rejected("locked".to_string()).into();
        assert!(matches!(err, RevealError::Surface(_)));
        assert_eq!(err.to_string(), "Surface rejected update: locked");
    }
}
