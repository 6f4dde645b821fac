//! Structured error types shared across the k-coloring crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`KcolError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (parameter names, node ids, paths).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for graph generation, coloring and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum KcolError {
    /// Malformed generator or run inputs. Not recoverable.
    #[error("invalid parameter: {0}")]
    InvalidParameter(ErrorInfo),
    /// Structural misuse of the graph arena.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// A coloring run produced an improper coloring.
    #[error("coloring invariant violated: {0}")]
    ColoringInvariantViolated(ErrorInfo),
    /// Export target already exists.
    #[error("export conflict: {0}")]
    ExportConflict(ErrorInfo),
    /// Filesystem failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl KcolError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            KcolError::InvalidParameter(info)
            | KcolError::Graph(info)
            | KcolError::ColoringInvariantViolated(info)
            | KcolError::ExportConflict(info)
            | KcolError::Io(info)
            | KcolError::Serde(info) => info,
        }
    }

    /// Shorthand for an [`KcolError::InvalidParameter`] naming the offending parameter.
    pub fn invalid_parameter(
        parameter: &str,
        value: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        KcolError::InvalidParameter(
            ErrorInfo::new("invalid-parameter", message)
                .with_context("parameter", parameter)
                .with_context("value", value),
        )
    }

    /// Wraps an IO failure with the offending path.
    pub fn io(code: &str, path: &std::path::Path, err: impl ToString) -> Self {
        KcolError::Io(
            ErrorInfo::new(code, err.to_string()).with_context("path", path.display()),
        )
    }
}
