//! The ArangoDB collaborator: a narrow async trait carrying exactly the two
//! operations the filtering compiler's host service needs, plus a stub
//! implementation used by tests and local `serve` runs without a real database.
//!
//! Grounded on the teacher's `data::traits::AnalyticsRepository` (`data/traits.rs`):
//! a `#[async_trait]` boundary trait the rest of the service programs against,
//! with a concrete service (there: `ClickhouseService`) behind it.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use super::error::ArangoError;
use crate::filtering::analyzers::AnalyzerInstaller;

/// What the filtering compiler's host service needs from ArangoDB: whether a
/// search view exists (to pick an emission backend) and the ability to run an
/// emitted query program. Query execution and result shaping beyond that are
/// out of scope (spec Non-goals) — this is a collaborator boundary, not a
/// driver.
#[async_trait]
pub trait ArangoStorage: Send + Sync {
    async fn has_search_view(&self, view: &str) -> Result<bool, ArangoError>;

    async fn execute(
        &self,
        query: &str,
        bind_vars: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value, ArangoError>;
}

/// An in-memory stand-in for ArangoDB. Tracks which views it considers present
/// and echoes back the query program it was asked to run, rather than
/// executing anything — sufficient for exercising the compiler end to end
/// without a live database.
#[derive(Debug, Default)]
pub struct StubArangoStorage {
    views: Mutex<HashSet<String>>,
    analyzers: Mutex<HashSet<String>>,
}

impl StubArangoStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(self, view: impl Into<String>) -> Self {
        self.views.lock().expect("lock poisoned").insert(view.into());
        self
    }
}

#[async_trait]
impl ArangoStorage for StubArangoStorage {
    async fn has_search_view(&self, view: &str) -> Result<bool, ArangoError> {
        Ok(self.views.lock().expect("lock poisoned").contains(view))
    }

    async fn execute(
        &self,
        query: &str,
        bind_vars: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value, ArangoError> {
        Ok(serde_json::json!({
            "query": query,
            "bind_vars": bind_vars,
            "result": [],
        }))
    }
}

#[async_trait]
impl AnalyzerInstaller for StubArangoStorage {
    async fn declare_analyzer(
        &self,
        name: &str,
        _analyzer_type: &str,
        _properties: &serde_json::Value,
        _features: &[&str],
    ) -> Result<(), ArangoError> {
        self.analyzers
            .lock()
            .expect("lock poisoned")
            .insert(name.to_string());
        Ok(())
    }
}
