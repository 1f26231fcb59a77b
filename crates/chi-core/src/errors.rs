//! The workspace error type.
//!
//! Every failure is a [`ChiError`] family wrapping an [`ErrorInfo`]: a stable
//! code for matching in tests and scripts, a message, and whatever context
//! (sample index, frequency ratio, file path) the failing layer could attach.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and context carried by every [`ChiError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable code, e.g. `out-of-range`.
    pub code: String,
    /// Diagnostic message.
    pub message: String,
    /// Key value context such as `sample`, `nu_ratio` or `path`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
    /// Suggested remedy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context or hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds or replaces a context entry.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a remedy hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.code)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " {{{key}={value}")?;
            for (key, value) in entries {
                write!(f, ", {key}={value}")?;
            }
            f.write_str("}")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

/// Error type for grids, evaluators, sweeps and their artefacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum ChiError {
    /// Frequency grid construction.
    #[error("grid error: {0}")]
    Grid(ErrorInfo),
    /// Parameter decoding and sweep plan validation.
    #[error("params error: {0}")]
    Params(ErrorInfo),
    /// Raised by an evaluator backend or its tables.
    #[error("evaluator error: {0}")]
    Evaluator(ErrorInfo),
    /// Filesystem access.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Encoding and decoding of tables, reports and configs.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Rendering.
    #[error("plot error: {0}")]
    Plot(ErrorInfo),
}

impl ChiError {
    /// The payload, whatever the family.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            ChiError::Grid(info)
            | ChiError::Params(info)
            | ChiError::Evaluator(info)
            | ChiError::Io(info)
            | ChiError::Serde(info)
            | ChiError::Plot(info) => info,
        }
    }

    /// Family name as used in the serialized `family` tag.
    pub fn family(&self) -> &'static str {
        match self {
            ChiError::Grid(_) => "Grid",
            ChiError::Params(_) => "Params",
            ChiError::Evaluator(_) => "Evaluator",
            ChiError::Io(_) => "Io",
            ChiError::Serde(_) => "Serde",
            ChiError::Plot(_) => "Plot",
        }
    }

    /// Adds context to the payload while keeping the family.
    pub fn with_context(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            ChiError::Grid(info) => ChiError::Grid(info.with_context(key, value)),
            ChiError::Params(info) => ChiError::Params(info.with_context(key, value)),
            ChiError::Evaluator(info) => ChiError::Evaluator(info.with_context(key, value)),
            ChiError::Io(info) => ChiError::Io(info.with_context(key, value)),
            ChiError::Serde(info) => ChiError::Serde(info.with_context(key, value)),
            ChiError::Plot(info) => ChiError::Plot(info.with_context(key, value)),
        }
    }

    /// Io family error from a foreign error under `code`.
    pub fn io(code: &str, err: impl ToString) -> Self {
        ChiError::Io(ErrorInfo::new(code, err.to_string()))
    }

    /// Serde family error from a foreign error under `code`.
    pub fn serde(code: &str, err: impl ToString) -> Self {
        ChiError::Serde(ErrorInfo::new(code, err.to_string()))
    }
}
