//! Validation issue types.
//!
//! Each variant carries only the data its message needs.

use serde::{Deserialize, Serialize};

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Record does not satisfy its schema
    Error,
    /// Should review
    Warning,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// Coarse grouping for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Presence,
    Type,
    Identity,
    Shape,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Presence => "Presence",
            Category::Type => "Type",
            Category::Identity => "Identity",
            Category::Shape => "Shape",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    // Shape checks
    /// Dataset entry is not an object
    NotAnObject { found: String },
    /// Field outside a closed schema
    UnknownField { field: String },

    // Presence checks
    /// Required field is absent
    RequiredMissing { field: String },

    // Type checks
    /// Field is present with the wrong semantic type
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    // Identity checks
    /// Id already used by an earlier record
    DuplicateId { id: String, first_index: usize },
}

impl Issue {
    /// Field the issue is about, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Issue::UnknownField { field }
            | Issue::RequiredMissing { field }
            | Issue::TypeMismatch { field, .. } => Some(field),
            Issue::DuplicateId { .. } => Some("id"),
            Issue::NotAnObject { .. } => None,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Issue::NotAnObject { .. } | Issue::UnknownField { .. } => Category::Shape,
            Issue::RequiredMissing { .. } => Category::Presence,
            Issue::TypeMismatch { .. } => Category::Type,
            Issue::DuplicateId { .. } => Category::Identity,
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            Issue::UnknownField { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn format_message(&self) -> String {
        match self {
            Issue::NotAnObject { found } => format!("record must be an object, found {found}"),
            Issue::UnknownField { field } => format!("unexpected field '{field}'"),
            Issue::RequiredMissing { field } => format!("missing required field '{field}'"),
            Issue::TypeMismatch {
                field,
                expected,
                found,
            } => format!("field '{field}' must be {expected}, found {found}"),
            Issue::DuplicateId { id, first_index } => {
                format!("duplicate id '{id}' (first used by record #{first_index})")
            }
        }
    }
}
