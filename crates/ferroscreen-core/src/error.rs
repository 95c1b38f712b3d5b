use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::domain::{Interval, ScreenerKind};
use crate::filter::Operator;

/// Failures parsing user-facing identifiers (kinds, categories, directions).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid screener kind '{value}', expected one of stock, forex, crypto, bond, futures, coin")]
    ScreenerKind { value: String },
    #[error("invalid category '{value}'")]
    Category { value: String },
    #[error("invalid operator '{value}'")]
    Operator { value: String },
    #[error("invalid sort direction '{value}', expected asc or desc")]
    SortDirection { value: String },
    #[error("invalid interval '{value}', expected one of 1, 5, 15, 30, 60, 120, 240, 1D, 1W, 1M")]
    Interval { value: String },
}

/// Catalog lookup and construction errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown field '{key}'{}", suggestion_suffix(.suggestion))]
    UnknownField {
        key: String,
        suggestion: Option<String>,
    },
    #[error("field '{key}' is defined more than once")]
    DuplicateField { key: String },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|key| format!(", did you mean '{key}'?"))
        .unwrap_or_default()
}

/// Field reference construction errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("field '{key}' does not accept an interval (requested '{interval}')")]
    IntervalNotSupported { key: String, interval: Interval },
    #[error("field '{key}' got invalid interval '{value}', expected one of 1, 5, 15, 30, 60, 120, 240, 1D, 1W, 1M")]
    InvalidInterval { key: String, value: String },
}

/// Validation failures detected while compiling a query, before any network call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("field '{field_key}' is not available for {kind} screeners")]
    FieldKindMismatch {
        field_key: String,
        kind: ScreenerKind,
    },
    #[error("operator '{operator}' cannot be applied to field '{field_key}': {reason}")]
    OperandType {
        field_key: String,
        operator: Operator,
        reason: String,
    },
    #[error("page limit {limit} exceeds the service maximum of {max}")]
    PageLimitExceeded { limit: usize, max: usize },
    #[error("page limit must be greater than zero")]
    EmptyPage,
}

/// Opaque failure reported by the transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    message: String,
    status: Option<u16>,
    retryable: bool,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            retryable: true,
        }
    }

    pub fn non_retryable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            retryable: false,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {status})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for TransportError {}

/// Raw rows that cannot be zipped against the compiled column list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaterializeError {
    #[error("row '{symbol}' has {actual} values, expected {expected}")]
    RowWidthMismatch {
        symbol: String,
        expected: usize,
        actual: usize,
    },
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {name} has invalid value '{value}'")]
    InvalidEnv { name: &'static str, value: String },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level error type for screener operations.
#[derive(Debug, Error)]
pub enum ScreenerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("execution task failed: {0}")]
    Execution(String),
}

impl ScreenerError {
    /// Stable machine-readable code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Catalog(CatalogError::UnknownField { .. }) => "catalog.unknown_field",
            Self::Catalog(CatalogError::DuplicateField { .. }) => "catalog.duplicate_field",
            Self::Field(FieldError::IntervalNotSupported { .. }) => "field.interval_not_supported",
            Self::Field(FieldError::InvalidInterval { .. }) => "field.invalid_interval",
            Self::Compile(CompileError::FieldKindMismatch { .. }) => "compile.kind_mismatch",
            Self::Compile(CompileError::OperandType { .. }) => "compile.operand_type",
            Self::Compile(CompileError::PageLimitExceeded { .. }) => "compile.page_limit",
            Self::Compile(CompileError::EmptyPage) => "compile.empty_page",
            Self::Transport(_) => "transport.failed",
            Self::Materialize(_) => "materialize.row_width",
            Self::Serialization(_) => "serialization",
            Self::Execution(_) => "execution",
        }
    }

    /// Whether the failure happened before anything was sent.
    pub const fn is_construction_error(&self) -> bool {
        matches!(self, Self::Catalog(_) | Self::Field(_) | Self::Compile(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_message_includes_suggestion() {
        let err = CatalogError::UnknownField {
            key: String::from("PRCE"),
            suggestion: Some(String::from("PRICE")),
        };
        assert_eq!(err.to_string(), "unknown field 'PRCE', did you mean 'PRICE'?");
    }

    #[test]
    fn kind_mismatch_names_field_and_kind() {
        let err = CompileError::FieldKindMismatch {
            field_key: String::from("DIVIDEND_YIELD"),
            kind: ScreenerKind::Crypto,
        };
        let message = err.to_string();
        assert!(message.contains("DIVIDEND_YIELD"));
        assert!(message.contains("crypto"));
    }

    #[test]
    fn transport_error_passes_status_through() {
        let err = TransportError::non_retryable("bad request").with_status(400);
        assert_eq!(err.status(), Some(400));
        assert!(!err.retryable());
        assert_eq!(err.to_string(), "bad request (status 400)");
    }
}
