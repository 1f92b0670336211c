//! Error types for the translation core.

use std::fmt;

/// Broad category of a failed translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The selection was empty or whitespace-only.
    Input,
    /// Credential or endpoint missing or malformed.
    Config,
    /// Transport failure or an unreadable response.
    Network,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Input => "InputError",
            Self::Config => "ConfigError",
            Self::Network => "NetworkError",
        };
        f.write_str(name)
    }
}

/// Failure raised while talking to the remote endpoint.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("stream error: {0}")]
    Stream(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("nothing to translate")]
    EmptyInput,

    #[error("missing API key")]
    MissingCredential,

    #[error("missing API URL")]
    MissingEndpoint,

    #[error("invalid API URL '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("malformed response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl TranslateError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::Input,
            Self::MissingCredential | Self::MissingEndpoint | Self::InvalidEndpoint { .. } => {
                ErrorKind::Config
            }
            Self::Transport(_) | Self::MalformedResponse(_) => ErrorKind::Network,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(TranslateError::EmptyInput.kind(), ErrorKind::Input);
        assert_eq!(TranslateError::MissingCredential.kind(), ErrorKind::Config);
        assert_eq!(TranslateError::MissingEndpoint.kind(), ErrorKind::Config);

        let transport = TranslateError::from(TransportError::Stream("reset".to_string()));
        assert_eq!(transport.kind(), ErrorKind::Network);
    }

    #[test]
    fn test_status_error_message() {
        let err = TransportError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API request failed with status 401: unauthorized"
        );
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::Input.to_string(), "InputError");
        assert_eq!(ErrorKind::Network.to_string(), "NetworkError");
    }
}
