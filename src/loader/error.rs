//! Failures while loading a year document.

use std::path::PathBuf;
use thiserror::Error;

/// Why a year document could not be loaded.
///
/// Superseded requests are not represented here: they are aborted tasks
/// and never produce a value.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed analysis document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LoadError {
    /// Short machine-friendly kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Network(_) => "network",
            LoadError::Status { .. } => "status",
            LoadError::Io { .. } => "io",
            LoadError::Parse(_) => "parse",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = LoadError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            url: "http://localhost/data/analysis_data_2030.json".to_string(),
        };
        assert_eq!(err.kind(), "status");
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("analysis_data_2030.json"));
    }

    #[test]
    fn test_parse_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LoadError::from(serde_err);
        assert_eq!(err.kind(), "parse");
    }
}
