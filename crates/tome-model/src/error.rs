//! Error taxonomy shared by the normalizers and the aggregator.

use std::fmt;

use thiserror::Error;

use crate::domain::Domain;

/// Position of a record inside its raw dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordLocation {
    /// Zero-based index in the input sequence.
    pub index: Option<usize>,
    /// Record name, when one could be read.
    pub name: Option<String>,
}

impl RecordLocation {
    pub fn new(index: usize, name: Option<&str>) -> Self {
        Self {
            index: Some(index),
            name: name.map(str::to_string),
        }
    }
}

impl fmt::Display for RecordLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.index, &self.name) {
            (Some(index), Some(name)) => write!(f, "#{index} ({name})"),
            (Some(index), None) => write!(f, "#{index}"),
            (None, Some(name)) => write!(f, "({name})"),
            (None, None) => f.write_str("<unknown>"),
        }
    }
}

/// Failure of a single field coercion, before record context is attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("missing required field '{field}'")]
    Missing { field: String },

    #[error("field '{field}' must be {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl FieldError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    pub fn mismatch(field: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            found,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::TypeMismatch { field, .. } => field,
        }
    }

    /// Attach domain and record context.
    pub fn at(self, domain: Domain, location: RecordLocation) -> CatalogError {
        match self {
            Self::Missing { field } => CatalogError::MissingField {
                domain,
                location,
                field,
            },
            Self::TypeMismatch {
                field,
                expected,
                found,
            } => CatalogError::TypeMismatch {
                domain,
                location,
                field,
                expected,
                found,
            },
        }
    }
}

/// Coarse classification of a [`CatalogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingField,
    TypeMismatch,
    SchemaViolation,
    InvalidArgument,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A required field is absent or empty on a record.
    #[error("{domain} record {location}: missing required field '{field}'")]
    MissingField {
        domain: Domain,
        location: RecordLocation,
        field: String,
    },

    /// A field is present but has the wrong semantic type.
    #[error("{domain} record {location}: field '{field}' must be {expected}, found {found}")]
    TypeMismatch {
        domain: Domain,
        location: RecordLocation,
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Collection-level structural violation.
    #[error("{domain}: {message}")]
    SchemaViolation { domain: String, message: String },

    /// Malformed call into a normalizer or the aggregator.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::SchemaViolation { .. } => ErrorKind::SchemaViolation,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
        }
    }

    /// Offending field name for record-level errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field, .. } | Self::TypeMismatch { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn location(&self) -> Option<&RecordLocation> {
        match self {
            Self::MissingField { location, .. } | Self::TypeMismatch { location, .. } => {
                Some(location)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
