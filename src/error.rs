//! Custom error types for tasknreward.
//!
//! This module provides structured error types so that every operation
//! can report a precise, user-facing message and a stable exit code.

use std::path::PathBuf;
use thiserror::Error;

use crate::tier::Tier;

/// Main error type for tasknreward operations
#[derive(Error, Debug)]
pub enum TaskRewardError {
    // =========================================================================
    // Document Errors
    // =========================================================================
    /// A required persisted document is absent
    #[error("{kind} file does not exist: {path}")]
    MissingDocument { kind: DocumentKind, path: PathBuf },

    // =========================================================================
    // Lifecycle Errors
    // =========================================================================
    /// Catalog is smaller than the requested sample size
    #[error("Not enough tasks to draw from: requested {requested}, available {available}")]
    InsufficientCatalog { requested: usize, available: usize },

    /// Refresh budget for the current day is used up
    #[error("Exceed refresh limit")]
    RefreshExhausted,

    /// Manifest contains entries that are not pending tasks
    #[error("Unrecognized tasks in manifest: {}", .tasks.join(", "))]
    UnrecognizedTasks { tasks: Vec<String> },

    /// Rollup requested from a tier that has nothing to roll into
    #[error("Cannot roll up the {tier} tier")]
    InvalidRollup { tier: Tier },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to load configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfig { field: String, reason: String },

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// IO error wrapper
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The persisted documents an operation may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Parameters,
    Record,
    Manifest,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Parameters => write!(f, "Parameter"),
            DocumentKind::Record => write!(f, "Record"),
            DocumentKind::Manifest => write!(f, "Task"),
        }
    }
}

impl TaskRewardError {
    // =========================================================================
    // Constructor helpers
    // =========================================================================

    /// Create a missing document error
    pub fn missing(kind: DocumentKind, path: impl Into<PathBuf>) -> Self {
        Self::MissingDocument {
            kind,
            path: path.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error with path
    pub fn config_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path),
        }
    }

    // =========================================================================
    // Classification helpers
    // =========================================================================

    /// Check if this error is fatal to the process.
    ///
    /// An exhausted refresh budget is reported but the process still exits
    /// successfully.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::RefreshExhausted)
    }

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RefreshExhausted => 0,
            Self::MissingDocument { .. } => 2,
            Self::InsufficientCatalog { .. } => 3,
            Self::UnrecognizedTasks { .. } | Self::InvalidRollup { .. } => 4,
            Self::Config { .. } | Self::InvalidConfig { .. } => 7,
            _ => 1,
        }
    }
}

/// Type alias for tasknreward results
pub type Result<T> = std::result::Result<T, TaskRewardError>;
