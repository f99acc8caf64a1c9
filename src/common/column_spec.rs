//! The column schema model (spec §3): the closed set of column types and filter
//! strategies, the per-column spec and its validation rules, and the per-collection
//! spec container with its merge-across-collections rule (§B.1 of SPEC_FULL.md).
//!
//! Grounded on `original_source/src/common/product_models/columnar_attribs_common_models.py`:
//! `ColumnType`, `FilterStrategy`, `AttributesColumnSpec` (with its `_check_filter_strategy`
//! and `_check_visible_col` validators) and `AttributesColumn` (adding `min_value`/`max_value`/
//! `enum_values`) map onto the types below field for field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::errors::FilterError;

/// The closed set of column data types a collection's attributes table can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Date,
    Int,
    Float,
    String,
    Bool,
    Enum,
}

/// The filtering strategy a string column is indexed and matched with. Non-string
/// columns never carry one; exactly one of these is required on every string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStrategy {
    Identity,
    Fulltext,
    Prefix,
    Ngram,
}

/// A single column's filtering metadata, as declared in a collection's attributes spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributesColumnSpec {
    pub key: String,
    #[serde(rename = "type")]
    pub col_type: ColumnType,
    pub filter_strategy: Option<FilterStrategy>,
    #[serde(default)]
    pub non_visible: bool,
    pub display_name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl AttributesColumnSpec {
    pub fn new(key: impl Into<String>, col_type: ColumnType) -> Self {
        Self {
            key: key.into(),
            col_type,
            filter_strategy: None,
            non_visible: false,
            display_name: None,
            category: None,
            description: None,
        }
    }

    pub fn with_filter_strategy(mut self, strategy: FilterStrategy) -> Self {
        self.filter_strategy = Some(strategy);
        self
    }

    pub fn with_non_visible(mut self, non_visible: bool) -> Self {
        self.non_visible = non_visible;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Validate the cross-field rules a bare deserialize cannot express:
    /// a string column must carry exactly one filter strategy, a non-string
    /// column must carry none, and a visible column must have a display name.
    pub fn validate(&self) -> Result<(), FilterError> {
        match (self.col_type, self.filter_strategy) {
            (ColumnType::String, None) => {
                return Err(FilterError::internal(format!(
                    "column {}: string columns require a filter_strategy",
                    self.key
                )));
            }
            (ColumnType::String, Some(_)) => {}
            (_, Some(_)) => {
                return Err(FilterError::internal(format!(
                    "column {}: filter_strategy is only valid on string columns",
                    self.key
                )));
            }
            (_, None) => {}
        }
        if !self.non_visible && (self.display_name.is_none() || self.category.is_none()) {
            return Err(FilterError::internal(format!(
                "column {}: visible columns require a display_name and a category",
                self.key
            )));
        }
        Ok(())
    }
}

/// An elaborated column spec adding numeric bounds and/or an enumerated value set,
/// per `original_source`'s `AttributesColumn`. `min_value`/`max_value` only apply to
/// `Date`/`Int`/`Float` columns; `enum_values` only applies to `Enum` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributesColumn {
    #[serde(flatten)]
    pub spec: AttributesColumnSpec,
    pub min_value: Option<serde_json::Value>,
    pub max_value: Option<serde_json::Value>,
    pub enum_values: Option<Vec<String>>,
}

impl AttributesColumn {
    pub fn new(spec: AttributesColumnSpec) -> Self {
        Self {
            spec,
            min_value: None,
            max_value: None,
            enum_values: None,
        }
    }

    pub fn with_range(mut self, min_value: serde_json::Value, max_value: serde_json::Value) -> Self {
        self.min_value = Some(min_value);
        self.max_value = Some(max_value);
        self
    }

    pub fn with_enum_values(mut self, values: Vec<String>) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Validate that range/enum metadata is only attached to the column types
    /// that can carry it.
    pub fn validate(&self) -> Result<(), FilterError> {
        self.spec.validate()?;
        let has_range = self.min_value.is_some() || self.max_value.is_some();
        if has_range
            && !matches!(
                self.spec.col_type,
                ColumnType::Date | ColumnType::Int | ColumnType::Float
            )
        {
            return Err(FilterError::internal(format!(
                "column {}: min_value/max_value only apply to date, int or float columns",
                self.spec.key
            )));
        }
        if self.enum_values.is_some() && self.spec.col_type != ColumnType::Enum {
            return Err(FilterError::internal(format!(
                "column {}: enum_values only applies to enum columns",
                self.spec.key
            )));
        }
        Ok(())
    }
}

/// A conflict discovered while merging two collections' column specs: the same
/// key appears in both with structurally different metadata.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
    "column spec conflict for key '{key}' between collection '{left_collection}' and '{right_collection}'"
)]
pub struct MergeConflictError {
    pub key: String,
    pub left_collection: String,
    pub right_collection: String,
}

/// A collection's full set of column specs, keyed by column key. Insertion order
/// of `columns` is preserved to keep `KEEP(doc, @keep)`-style output deterministic.
///
/// `spec_files` records the on-disk paths the spec was loaded from, per
/// `original_source`'s `ColumnarAttributesSpec.spec_files` - provenance only,
/// not consulted by the compiler itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnarAttributesSpec {
    pub collection_id: String,
    pub columns: Vec<AttributesColumn>,
    #[serde(default)]
    pub spec_files: Vec<std::path::PathBuf>,
}

impl ColumnarAttributesSpec {
    pub fn new(collection_id: impl Into<String>, columns: Vec<AttributesColumn>) -> Self {
        Self {
            collection_id: collection_id.into(),
            columns,
            spec_files: Vec::new(),
        }
    }

    pub fn with_spec_files(mut self, spec_files: Vec<std::path::PathBuf>) -> Self {
        self.spec_files = spec_files;
        self
    }

    /// Validate every column, plus the spec-level invariant that keys are
    /// unique within the spec.
    pub fn validate(&self) -> Result<(), FilterError> {
        let mut seen = std::collections::HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.spec.key.as_str()) {
                return Err(FilterError::internal(format!(
                    "duplicate column key '{}' in spec for collection {}",
                    column.spec.key, self.collection_id
                )));
            }
            column.validate()?;
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&AttributesColumn> {
        self.columns.iter().find(|c| c.spec.key == key)
    }

    fn as_map(&self) -> BTreeMap<&str, &AttributesColumn> {
        self.columns.iter().map(|c| (c.spec.key.as_str(), c)).collect()
    }

    /// Union this spec's columns with another collection's, keeping `self`'s
    /// column order first followed by any new keys from `other`. A key present
    /// in both must be identical in both or the merge fails, naming both
    /// collections, per spec §3's `ColumnarAttributesSpec` invariant.
    ///
    /// `original_source`'s `load_specs.py` stubs this case out entirely
    /// (`raise ValueError("I ain't done this yet, dang")`); this implements the
    /// union/conflict check the invariant actually describes.
    pub fn merge(&self, other: &Self) -> Result<Self, MergeConflictError> {
        let ours = self.as_map();
        let theirs = other.as_map();

        for (key, ours_col) in &ours {
            if let Some(theirs_col) = theirs.get(key) {
                if ours_col != theirs_col {
                    return Err(MergeConflictError {
                        key: (*key).to_string(),
                        left_collection: self.collection_id.clone(),
                        right_collection: other.collection_id.clone(),
                    });
                }
            }
        }

        let mut merged = self.columns.clone();
        for col in &other.columns {
            if !ours.contains_key(col.spec.key.as_str()) {
                merged.push(col.clone());
            }
        }

        let mut spec_files = self.spec_files.clone();
        spec_files.extend(other.spec_files.iter().cloned());

        Ok(Self {
            collection_id: format!("{}+{}", self.collection_id, other.collection_id),
            columns: merged,
            spec_files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_col(key: &str) -> AttributesColumn {
        AttributesColumn::new(
            AttributesColumnSpec::new(key, ColumnType::String)
                .with_filter_strategy(FilterStrategy::Prefix)
                .with_display_name(key)
                .with_category("general"),
        )
    }

    #[test]
    fn string_column_requires_filter_strategy() {
        let spec = AttributesColumnSpec::new("name", ColumnType::String)
            .with_display_name("Name")
            .with_category("general");
        assert!(spec.validate().is_err());
    }

    #[test]
    fn non_string_column_rejects_filter_strategy() {
        let spec = AttributesColumnSpec::new("count", ColumnType::Int)
            .with_filter_strategy(FilterStrategy::Identity)
            .with_display_name("Count")
            .with_category("general");
        assert!(spec.validate().is_err());
    }

    #[test]
    fn invisible_column_does_not_need_display_name() {
        let spec = AttributesColumnSpec::new("internal_id", ColumnType::Int).with_non_visible(true);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn visible_column_requires_category() {
        let spec = AttributesColumnSpec::new("count", ColumnType::Int).with_display_name("Count");
        assert!(spec.validate().is_err());
    }

    #[test]
    fn enum_values_only_on_enum_columns() {
        let col = AttributesColumn::new(
            AttributesColumnSpec::new("status", ColumnType::String)
                .with_filter_strategy(FilterStrategy::Identity)
                .with_display_name("Status")
                .with_category("general"),
        )
        .with_enum_values(vec!["active".to_string(), "archived".to_string()]);
        assert!(col.validate().is_err());
    }

    #[test]
    fn merge_unions_disjoint_columns() {
        let a = ColumnarAttributesSpec::new("coll_a", vec![string_col("name")]);
        let b = ColumnarAttributesSpec::new("coll_b", vec![string_col("email")]);
        let merged = a.merge(&b).unwrap();
        assert_eq!(merged.columns.len(), 2);
        assert!(merged.get("name").is_some());
        assert!(merged.get("email").is_some());
    }

    #[test]
    fn merge_allows_identical_shared_column() {
        let a = ColumnarAttributesSpec::new("coll_a", vec![string_col("name")]);
        let b = ColumnarAttributesSpec::new("coll_b", vec![string_col("name")]);
        let merged = a.merge(&b).unwrap();
        assert_eq!(merged.columns.len(), 1);
    }

    #[test]
    fn merge_rejects_conflicting_shared_column() {
        let a = ColumnarAttributesSpec::new("coll_a", vec![string_col("name")]);
        let mut conflicting = string_col("name");
        conflicting.spec.filter_strategy = Some(FilterStrategy::Ngram);
        let b = ColumnarAttributesSpec::new("coll_b", vec![conflicting]);
        let err = a.merge(&b).unwrap_err();
        assert_eq!(err.key, "name");
        assert_eq!(err.left_collection, "coll_a");
        assert_eq!(err.right_collection, "coll_b");
    }
}
