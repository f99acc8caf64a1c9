//! Error kinds surfaced by the filtering compiler.
//!
//! Mirrors the teacher's per-backend error enums (`data::clickhouse::error::ClickhouseError`,
//! `data::postgres::error::PostgresError`): a flat `thiserror` enum with `{0}`-style display
//! strings and a handful of structured variants. Two of the three kinds are user-facing
//! (`MissingParameter`, `IllegalParameter`); the third (`Internal`) indicates a bug in the
//! caller (unsupported column type reaching dispatch, a `FilterSet` built without a view or
//! collection) and is never meant to reach an end user unwrapped.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A required piece of user input is empty or whitespace-only.
    #[error("{0}")]
    MissingParameter(String),

    /// User input is present but invalid under the grammar or schema.
    #[error("{0}")]
    IllegalParameter(String),

    /// Internal misuse of the compiler's API. Never surfaced to end users directly.
    #[error("{0}")]
    Internal(String),
}

impl FilterError {
    pub fn missing(msg: impl Into<String>) -> Self {
        Self::MissingParameter(msg.into())
    }

    pub fn illegal(msg: impl Into<String>) -> Self {
        Self::IllegalParameter(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Wrap an error with a field-name prefix, preserving its kind.
    ///
    /// Used by `FilterSet::append` and the request adapter to turn e.g. an
    /// `IllegalParameter("not exactly one comma")` into
    /// `IllegalParameter("Invalid filter for field foo: not exactly one comma")`.
    pub fn with_field_prefix(self, field: &str) -> Self {
        let prefix = format!("Invalid filter for field {field}: ");
        match self {
            Self::MissingParameter(m) => Self::MissingParameter(format!("{prefix}{m}")),
            Self::IllegalParameter(m) => Self::IllegalParameter(format!("{prefix}{m}")),
            Self::Internal(m) => Self::Internal(format!("{prefix}{m}")),
        }
    }

    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_passes_through_message() {
        let err = FilterError::illegal("bad range");
        assert_eq!(err.to_string(), "bad range");
    }

    #[test]
    fn with_field_prefix_preserves_kind() {
        let err = FilterError::missing("empty value").with_field_prefix("myfield");
        assert_eq!(
            err,
            FilterError::MissingParameter(
                "Invalid filter for field myfield: empty value".to_string()
            )
        );
    }

    #[test]
    fn internal_is_not_user_facing() {
        assert!(!FilterError::internal("unsupported type").is_user_facing());
        assert!(FilterError::missing("x").is_user_facing());
        assert!(FilterError::illegal("x").is_user_facing());
    }
}
