//! Error types for the multipattern crate.
//!
//! Only data errors live here. Caller-contract violations (adding to a
//! compiled set, scanning before compile, zero capacity) panic instead.

use crate::backend::BackendKind;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MultipatternError>;

/// Domain tag carried by every compile error.
pub const ERROR_DOMAIN: &str = "multipattern";

/// Numeric code attached to a [`CompileError`].
///
/// Values follow the errno numbers the surrounding mail pipeline already
/// uses when it logs engine failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A pattern was rejected by the backend (syntax, unsupported construct).
    InvalidPattern,
    /// The combined automaton exceeded a backend size limit.
    TooLarge,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        match self {
            ErrorCode::InvalidPattern => 22, // EINVAL
            ErrorCode::TooLarge => 7,        // E2BIG
        }
    }
}

/// A pattern set failed to compile under the active backend.
///
/// When the failure can be attributed to one pattern, `pattern_id` and
/// `pattern` name it so the rule author can fix the source.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileError {
    pub backend: BackendKind,
    pub code: ErrorCode,
    pub pattern_id: Option<usize>,
    pub pattern: Option<String>,
    pub reason: String,
}

impl CompileError {
    pub(crate) fn invalid_pattern(
        backend: BackendKind,
        pattern_id: usize,
        pattern: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            code: ErrorCode::InvalidPattern,
            pattern_id: Some(pattern_id),
            pattern: Some(pattern.to_string()),
            reason: reason.into(),
        }
    }

    pub(crate) fn whole_set(
        backend: BackendKind,
        code: ErrorCode,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            code,
            pattern_id: None,
            pattern: None,
            reason: reason.into(),
        }
    }

    /// Always [`ERROR_DOMAIN`].
    pub fn domain(&self) -> &'static str {
        ERROR_DOMAIN
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pattern {
            Some(pattern) => write!(
                f,
                "cannot create tree of regexp when processing '{pattern}': {}",
                self.reason
            ),
            None => write!(f, "cannot compile pattern set: {}", self.reason),
        }
    }
}

impl std::error::Error for CompileError {}

/// Failures while loading an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown backend: {0}")]
    UnknownBackend(String),
}

#[derive(Debug, Error)]
pub enum MultipatternError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
