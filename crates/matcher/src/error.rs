//! Error types for docfill matching.

use crate::alias::{LogicalField, TableRole};
use docfill_sheet::SheetError;
use std::fmt;
use thiserror::Error;

/// Result type for matcher operations.
pub type MatchResult<T> = Result<T, MatchError>;

/// A logical field that no header in its table could be resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingField {
    pub table: TableRole,
    pub field: LogicalField,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.table, self.field)
    }
}

fn join_missing(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur while filling documents.
#[derive(Debug, Error)]
pub enum MatchError {
    /// One or more required columns could not be resolved.
    #[error("Missing columns: {}", join_missing(.0))]
    MissingColumns(Vec<MissingField>),

    /// An input file could not be decoded.
    #[error("Parse error in {table}: {message}")]
    Parse { table: TableRole, message: String },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Sheet operation failed (e.g. writing the result).
    #[error("Sheet error: {0}")]
    Sheet(#[from] SheetError),
}

impl MatchError {
    /// Create a parse error for one of the inputs.
    pub fn parse(table: TableRole, message: impl Into<String>) -> Self {
        Self::Parse {
            table,
            message: message.into(),
        }
    }

    /// Wrap a failure to load an input file.
    ///
    /// Malformed content becomes [`MatchError::Parse`]; anything else (such
    /// as an unreadable file) stays a sheet error.
    #[must_use]
    pub fn from_load(table: TableRole, err: SheetError) -> Self {
        if err.is_parse() {
            Self::parse(table, err.to_string())
        } else {
            Self::Sheet(err)
        }
    }

    /// The missing fields, if this is a missing-column error.
    #[must_use]
    pub fn missing_fields(&self) -> &[MissingField] {
        match self {
            Self::MissingColumns(fields) => fields,
            _ => &[],
        }
    }
}
