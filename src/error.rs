//! Error types for chanscope

use thiserror::Error;

/// Main error type for chanscope operations
#[derive(Debug, Error)]
pub enum ChanError {
    #[error("Network error: {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("HTTP error {status}: {url}")]
    Http { status: u16, url: String },

    #[error("Failed to parse JSON for {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChanError {
    /// Whether this error came from the network rather than local state
    pub fn is_transport(&self) -> bool {
        matches!(self, ChanError::Transport { .. } | ChanError::Http { .. })
    }
}

/// Result type alias for chanscope operations
pub type ChanResult<T> = Result<T, ChanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        let transport = ChanError::Transport {
            url: "https://a.4cdn.org/boards.json".into(),
            reason: "timed out".into(),
        };
        let http = ChanError::Http {
            status: 404,
            url: "https://a.4cdn.org/g/thread/1.json".into(),
        };
        let io = ChanError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));

        assert!(transport.is_transport());
        assert!(http.is_transport());
        assert!(!io.is_transport());
    }

    #[test]
    fn test_decode_message_names_path() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ChanError::Decode {
            path: "g/catalog.json".into(),
            source,
        };
        assert!(err.to_string().contains("g/catalog.json"));
    }
}
