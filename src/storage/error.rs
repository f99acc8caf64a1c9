//! Errors from the ArangoDB collaborator boundary.
//!
//! Follows the teacher's per-backend error enum shape (`data::clickhouse::error::ClickhouseError`):
//! a flat `thiserror` enum, one variant per failure class the boundary can report.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArangoError {
    #[error("failed to connect to ArangoDB: {0}")]
    Connection(String),

    #[error("failed to probe search view '{view}': {reason}")]
    ViewProbe { view: String, reason: String },

    #[error("failed to install analyzer '{name}': {reason}")]
    AnalyzerInstall { name: String, reason: String },

    #[error("query execution failed: {0}")]
    Execution(String),
}
