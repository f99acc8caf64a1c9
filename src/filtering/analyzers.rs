//! ArangoSearch analyzer registry: which custom analyzer backs each [`FilterStrategy`],
//! and the minimum query length each strategy tolerates.
//!
//! Grounded on `original_source/src/service/filtering/analyzers.py`: the
//! `_COL2ANALYZER`/`_COL2MIN_LENGTH` maps and `install_analyzers()` translate directly;
//! the Python module's bespoke analyzer *definitions* (ngram feature lists, locale) become
//! the `AnalyzerSpec` literals in [`CUSTOM_ANALYZERS`].

use crate::common::FilterStrategy;
use crate::storage::ArangoError;

pub const DEFAULT_ANALYZER: &str = "identity";
const STRING_FULLTEXT_ANALYZER: &str = "text_en";
const STRING_PREFIX_ANALYZER: &str = "text_en_prefix";
const STRING_NGRAM_ANALYZER: &str = "ngram_trigram";

/// Ngram matching is meaningless below 3 characters; shorter queries are rejected
/// by the request adapter before a filter is ever constructed.
const NGRAM_MIN_QUERY_LENGTH: usize = 3;

/// The analyzer an ArangoSearch `SEARCH` clause applies for a given strategy.
pub fn analyzer_for(strategy: FilterStrategy) -> &'static str {
    match strategy {
        FilterStrategy::Identity => DEFAULT_ANALYZER,
        FilterStrategy::Fulltext => STRING_FULLTEXT_ANALYZER,
        FilterStrategy::Prefix => STRING_PREFIX_ANALYZER,
        FilterStrategy::Ngram => STRING_NGRAM_ANALYZER,
    }
}

/// The shortest query string a strategy will accept. Only `ngram` imposes a floor;
/// every other strategy accepts any non-empty string.
pub fn minimum_query_length(strategy: FilterStrategy) -> usize {
    match strategy {
        FilterStrategy::Ngram => NGRAM_MIN_QUERY_LENGTH,
        _ => 1,
    }
}

/// A custom analyzer definition to be installed once at process bootstrap.
pub struct AnalyzerSpec {
    pub name: &'static str,
    pub analyzer_type: &'static str,
    pub properties: serde_json::Value,
    pub features: &'static [&'static str],
}

pub fn custom_analyzers() -> Vec<AnalyzerSpec> {
    vec![
        AnalyzerSpec {
            name: STRING_PREFIX_ANALYZER,
            analyzer_type: "text",
            properties: serde_json::json!({
                "locale": "en",
                "case": "lower",
                "accent": false,
                "stemming": false,
                "edgeNgram": {
                    "min": 2,
                    "max": 8,
                    "preserveOriginal": true,
                },
            }),
            features: &[],
        },
        AnalyzerSpec {
            name: STRING_NGRAM_ANALYZER,
            analyzer_type: "ngram",
            properties: serde_json::json!({
                "min": 3,
                "max": 3,
                "preserveOriginal": false,
                "streamType": "utf8",
            }),
            features: &["frequency", "norm", "position"],
        },
    ]
}

/// An ArangoDB handle capable of declaring a custom analyzer. The analyzer
/// installer is written against this narrow trait rather than the full
/// storage trait so it can run once, independent of per-request concerns.
#[async_trait::async_trait]
pub trait AnalyzerInstaller: Send + Sync {
    async fn declare_analyzer(
        &self,
        name: &str,
        analyzer_type: &str,
        properties: &serde_json::Value,
        features: &[&str],
    ) -> Result<(), ArangoError>;
}

/// Install every custom analyzer the filter strategies depend on. Idempotent:
/// the installer is expected to treat an already-existing analyzer as success.
pub async fn install_analyzers(installer: &dyn AnalyzerInstaller) -> Result<(), ArangoError> {
    for spec in custom_analyzers() {
        installer
            .declare_analyzer(spec.name, spec.analyzer_type, &spec.properties, spec.features)
            .await?;
        tracing::debug!(analyzer = spec.name, "installed ArangoSearch analyzer");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ngram_requires_three_characters() {
        assert_eq!(minimum_query_length(FilterStrategy::Ngram), 3);
        assert_eq!(minimum_query_length(FilterStrategy::Identity), 1);
    }

    #[test]
    fn each_strategy_maps_to_an_analyzer() {
        assert_eq!(analyzer_for(FilterStrategy::Identity), "identity");
        assert_eq!(analyzer_for(FilterStrategy::Fulltext), "text_en");
        assert_eq!(analyzer_for(FilterStrategy::Prefix), "text_en_prefix");
        assert_eq!(analyzer_for(FilterStrategy::Ngram), "ngram_trigram");
    }
}
