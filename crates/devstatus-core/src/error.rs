//! Boundary error taxonomy for devstatus.
//!
//! The decision engine itself is total and never returns these. They cover
//! the edges around it: reading evidence bundles and project metadata,
//! loading configuration, and persisting report artifacts.

/// devstatus boundary errors.
#[derive(Debug, thiserror::Error)]
pub enum DevStatusError {
    #[error("invalid evidence bundle: {0}")]
    InvalidBundle(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown development status classifier: {0}")]
    UnknownClassifier(String),

    #[error("digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for devstatus boundary operations.
pub type Result<T> = std::result::Result<T, DevStatusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DevStatusError::InvalidBundle("missing checks".to_string());
        assert!(err.to_string().contains("invalid evidence bundle"));

        let err = DevStatusError::UnknownClassifier("Development Status :: 9 - Done".to_string());
        assert!(err.to_string().contains("9 - Done"));
    }

    #[test]
    fn test_digest_mismatch_error() {
        let err = DevStatusError::DigestMismatch {
            expected: "abc123".to_string(),
            actual: "def456".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("abc123"));
        assert!(msg.contains("def456"));
    }
}
