/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not find configuration directory")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Http { status: StatusCode, message: String },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0} is not supported by the backend")]
    Unsupported(&'static str),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ConnectorError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ConnectorError::Http { status, .. } => Some(*status),
            ConnectorError::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Missing, invalid or expired token as reported by the backend.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }
}

pub type ConnectorResult<T> = Result<T, ConnectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = ConnectorError::Http {
            status: StatusCode::BAD_REQUEST,
            message: "Email already registered".to_string(),
        };

        assert_eq!(err.to_string(), "400 Bad Request: Email already registered");
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_auth_failure() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = ConnectorError::Http {
                status,
                message: String::new(),
            };
            assert!(err.is_auth_failure());
        }

        assert!(!ConnectorError::Unsupported("Deleting users").is_auth_failure());
    }

    #[test]
    fn test_unsupported_display() {
        let err = ConnectorError::Unsupported("Deleting users");
        assert_eq!(err.to_string(), "Deleting users is not supported by the backend");
    }
}
