//! # Error Types: Schema Compilation Failures
//!
//! Every failure in the Rx system happens while *building* a schema or
//! setting up a registry. Checking a value against a compiled schema is
//! total and reports mismatches as `false`, never as an error.
//!
//! All variants carry enough context (type name, parameter, field) to
//! point at the offending part of the definition.

use thiserror::Error;

/// Convenience alias for results of schema compilation and registry setup.
pub type RxResult<T> = Result<T, RxError>;

/// Compile-time error for schema definitions and registry setup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RxError {
    /// The definition is neither a type-name string nor a mapping with a
    /// string `type` entry.
    #[error("invalid schema definition: {0}")]
    InvalidSchema(String),

    /// The type name is neither an absolute URI nor `/<prefix>/<local>`.
    #[error("couldn't understand type name '{0}'")]
    MalformedTypeName(String),

    /// The type name uses a prefix that was never registered.
    #[error("unknown prefix '{prefix}' in type name '{type_name}'")]
    UnknownPrefix {
        /// The unregistered prefix.
        prefix: String,
        /// The full type name that was being expanded.
        type_name: String,
    },

    /// The expanded URI has no registered type.
    #[error("unknown type {0}")]
    UnknownType(String),

    /// A parameter key is not accepted by the type.
    #[error("unknown parameter '{param}' for {kind}")]
    UnknownParameter {
        /// Type name, e.g. `//rec`.
        kind: String,
        /// The rejected key.
        param: String,
    },

    /// A required parameter is absent or empty.
    #[error("missing parameter '{param}' for {kind}")]
    MissingParameter {
        /// Type name, e.g. `//arr`.
        kind: String,
        /// The missing key.
        param: String,
    },

    /// A parameter is present but has the wrong shape or value.
    #[error("invalid {param} parameter for {kind}: {reason}")]
    InvalidParameter {
        /// Type name, e.g. `//int`.
        kind: String,
        /// The offending key.
        param: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A range definition has an unknown key or a non-numeric bound.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A `//rec` field is listed as both required and optional.
    #[error("{0} appears in both required and optional")]
    OverlappingField(String),

    /// A type (builtin or learned) is already registered under this URI.
    #[error("type already registered for {0}")]
    DuplicateType(String),

    /// The prefix name is already taken.
    #[error("the prefix '{0}' is already registered")]
    DuplicatePrefix(String),

    /// A learned type was used with parameters besides `type`.
    #[error("composed type {0} does not take check arguments")]
    AliasParameters(String),
}

impl RxError {
    /// Shorthand for [`RxError::UnknownParameter`].
    pub fn unknown_parameter(kind: impl Into<String>, param: impl Into<String>) -> Self {
        Self::UnknownParameter {
            kind: kind.into(),
            param: param.into(),
        }
    }

    /// Shorthand for [`RxError::MissingParameter`].
    pub fn missing_parameter(kind: impl Into<String>, param: impl Into<String>) -> Self {
        Self::MissingParameter {
            kind: kind.into(),
            param: param.into(),
        }
    }

    /// Shorthand for [`RxError::InvalidParameter`].
    pub fn invalid_parameter(
        kind: impl Into<String>,
        param: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            kind: kind.into(),
            param: param.into(),
            reason: reason.into(),
        }
    }
}
