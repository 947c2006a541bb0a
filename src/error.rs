// src/error.rs

//! Unified error handling for the directory lookup.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Result type alias for lookup operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Reasons a query filter is rejected by the compiler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Filter argument missing or unusable
    #[error("Invalid filter argument.")]
    InvalidFilter,

    /// Block type not present in the taxonomy
    #[error("Unknown block type '{0}'.")]
    UnknownBlockType(String),

    /// Block number not valid for the requested type
    #[error("Block {block_type}{block_number:02} does not exist.")]
    BlockMismatch { block_type: char, block_number: u32 },

    /// Block number not valid for any type
    #[error("Block number {0} does not exist in any block type.")]
    BlockNumberNotFound(u32),

    /// Floor outside 1..=9
    #[error("Invalid floor number {0}.")]
    InvalidFloor(u32),
}

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Filter compilation failed
    #[error("Failed to compile the filter: {0}")]
    Filter(#[from] FilterError),

    /// Filter is valid but produced nothing to fetch
    #[error("Filter you specified is unable to generate any queries to fetch.")]
    EmptyQuerySet,

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Cache file could not be read or parsed
    #[error("Couldn't load or parse input file {path}: {message}")]
    CacheLoad { path: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A single query failed against the directory
    #[error("Fetch error for {query}: {message}")]
    Fetch { query: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a cache load error for the given file.
    pub fn cache_load(path: impl AsRef<Path>, message: impl fmt::Display) -> Self {
        Self::CacheLoad {
            path: path.as_ref().display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a fetch error carrying the failing query.
    pub fn fetch(query: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            query: query.into(),
            message: message.to_string(),
        }
    }

    /// The query a fetch error belongs to, if any.
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Fetch { query, .. } => Some(query),
            _ => None,
        }
    }
}
