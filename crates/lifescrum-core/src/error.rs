use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrumError {
    /// The import payload is neither a story array nor a backup object.
    #[error("Invalid import format: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ScrumError {
    pub fn is_format(&self) -> bool {
        matches!(self, ScrumError::Format(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: ScrumError = io.into();
        assert!(matches!(err, ScrumError::Io(_)));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_format_error_message() {
        let err = ScrumError::Format("expected array".to_string());
        assert!(err.is_format());
        assert_eq!(err.to_string(), "Invalid import format: expected array");
    }
}
