use thiserror::Error;

/// Result type alias for dossier-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the dossier client
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Backend/transport errors
    #[error("backend error: {0}")]
    Backend(String),

    /// Stream protocol errors
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Submission rejected: input was empty after trimming
    #[error("empty input")]
    EmptyInput,

    /// Submission rejected: an exchange is already in flight
    #[error("an exchange is already in flight")]
    Busy,

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let io_err: Error = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"));
        assert_eq!(io_err.to_string(), "I/O error: file not found");

        let config_err: Error = Error::Config("missing backend url".to_string());
        assert_eq!(config_err.to_string(), "configuration error: missing backend url");

        let backend_err: Error = Error::Backend("status 502".to_string());
        assert_eq!(backend_err.to_string(), "backend error: status 502");

        let protocol_err: Error = Error::Protocol("bad documents payload".to_string());
        assert_eq!(protocol_err.to_string(), "protocol error: bad documents payload");

        let other_err: Error = Error::Other("something went wrong".to_string());
        assert_eq!(other_err.to_string(), "something went wrong");
    }

    #[test]
    fn test_submission_errors_display() {
        assert_eq!(Error::EmptyInput.to_string(), "empty input");
        assert_eq!(Error::Busy.to_string(), "an exchange is already in flight");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: Error = io_err.into();
        assert_eq!(error.to_string(), "I/O error: denied");
    }

    #[test]
    fn test_result_type_alias() {
        let ok: Result<i32> = Ok(42);
        assert!(ok.is_ok());

        let err: Result<i32> = Err(Error::Busy);
        assert!(err.is_err());
    }
}
