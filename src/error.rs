use std::path::PathBuf;
use thiserror::Error;

use crate::client::RATE_LIMIT_PER_HOUR;

#[derive(Error, Debug)]
pub enum LinearError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Authentication failed. Check your API key.\nGet your API key at: https://linear.app/settings/api")]
    Authentication,

    #[error(
        "Rate limit exceeded. Linear API allows {limit} requests per hour.\nPlease wait before making more requests."
    )]
    RateLimit { limit: u32 },

    #[error("HTTP error: {status} - {body}")]
    Http { status: u16, body: String },

    #[error("GraphQL errors: {}", messages.join(", "))]
    GraphQL { messages: Vec<String> },

    #[error("Empty response from API")]
    EmptyResponse,

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No API key provided. Set LINEAR_API_KEY, pass --api-key, or add api_key to the config file.\nGet your API key at: https://linear.app/settings/api"
    )]
    MissingApiKey,

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid issue data: {0}")]
    Validation(String),

    #[error("Editor failed: {0}")]
    EditorFailed(String),

    #[error("Invalid YAML syntax: {0}")]
    EditorParse(#[from] serde_yaml::Error),
}

impl LinearError {
    pub fn rate_limited() -> Self {
        LinearError::RateLimit {
            limit: RATE_LIMIT_PER_HOUR,
        }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        LinearError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Linear reports unknown ids on lookups as a GraphQL error rather than a null entity.
    pub fn into_not_found(self, kind: &'static str, id: &str) -> Self {
        match self {
            LinearError::GraphQL { ref messages }
                if messages
                    .iter()
                    .any(|m| m.to_lowercase().contains("not found")) =>
            {
                LinearError::not_found(kind, id)
            }
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, LinearError>;

/// A null entity in an otherwise successful lookup is still a miss.
pub fn found<T>(entity: Option<T>, kind: &'static str, id: &str) -> Result<T> {
    entity.ok_or_else(|| LinearError::not_found(kind, id))
}
