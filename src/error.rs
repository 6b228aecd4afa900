// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error taxonomy for the signature engine

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, scoring, or classifying event data
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("event data not found: {}", path.display())]
    DataNotFound { path: PathBuf },

    #[error("malformed record at `{field}`: {reason}")]
    MalformedRecord { field: String, reason: String },

    #[error("state `{state}` is not mapped to any region")]
    UnmappedState { state: String },

    #[error("event `{event}` has no state scores to analyze")]
    InsufficientData { event: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("i/o failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AtlasError {
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AtlasError::MalformedRecord {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-friendly tag used in excluded-event listings
    pub fn kind(&self) -> &'static str {
        match self {
            AtlasError::DataNotFound { .. } => "data_not_found",
            AtlasError::MalformedRecord { .. } => "malformed_record",
            AtlasError::UnmappedState { .. } => "unmapped_state",
            AtlasError::InsufficientData { .. } => "insufficient_data",
            AtlasError::InvalidConfig(_) => "invalid_config",
            AtlasError::Io { .. } => "io",
        }
    }
}

pub type AtlasResult<T> = std::result::Result<T, AtlasError>;
