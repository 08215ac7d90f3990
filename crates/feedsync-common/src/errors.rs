use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Why an incremental fetch or history load produced no usable data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Network unreachable, timed out, or a non-2xx status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body could not be parsed as a message batch.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered with a non-2xx status (not logged in, empty
    /// message, bad CSRF token, ...).
    #[error("send rejected (HTTP {status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FeedsyncError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ValidationError("polling.max_delay_ms".into());
        assert_eq!(
            err.to_string(),
            "config validation error: polling.max_delay_ms"
        );
    }

    #[test]
    fn fetch_error_display() {
        let err = FetchError::Transport("HTTP 502 Bad Gateway".into());
        assert_eq!(err.to_string(), "transport error: HTTP 502 Bad Gateway");

        let err = FetchError::MalformedResponse("expected value at line 1".into());
        assert_eq!(
            err.to_string(),
            "malformed response: expected value at line 1"
        );
    }

    #[test]
    fn send_error_rejected_display() {
        let err = SendError::Rejected {
            status: 400,
            detail: "Message cannot be empty".into(),
        };
        assert_eq!(
            err.to_string(),
            "send rejected (HTTP 400): Message cannot be empty"
        );
    }

    #[test]
    fn feedsync_error_from_variants() {
        let err: FeedsyncError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, FeedsyncError::Config(_)));
        assert!(err.to_string().contains("bad toml"));

        let err = FeedsyncError::Other("invalid base URL".into());
        assert_eq!(err.to_string(), "invalid base URL");
    }
}
