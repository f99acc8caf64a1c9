//! The request-to-`FilterSet` adapter (spec §4.4): turns a query-parameter
//! list into validated `FilterSet::append` calls against a column schema.
//!
//! Grounded on `original_source/src/service/filtering/filtering_processing.py`
//! (`get_filters`/`_get_filter_map`): the `filter_<field>` prefix convention,
//! the repeated-parameter rejection, the per-strategy minimum-length check,
//! and the field-name translation hook all translate directly. Represented
//! here as a `&[(String, String)]` ordered pair list rather than a
//! `HashMap<String, String>`, since real query strings both preserve
//! parameter order and allow repeats — a single-valued map can't even
//! detect the "provided more than once" case the spec requires (spec §B.3 of
//! `SPEC_FULL.md`).

use crate::common::column_spec::{ColumnType, ColumnarAttributesSpec};
use crate::common::errors::FilterError;
use crate::filtering::analyzers;
use crate::filtering::filter_set::FilterSet;

/// The query-parameter key prefix that marks a per-column filter value.
pub const FILTER_PARAM_PREFIX: &str = "filter_";

/// Cross-cutting options the adapter enforces beyond per-field validation
/// (spec §4.4 "Cross-cutting checks").
#[derive(Default)]
pub struct RequestAdapterOptions<'a> {
    /// Rewrites a schema-validated field name into the identifier the
    /// `FilterSet` should store it under (e.g. a public alias to an internal
    /// document path). Applied only after the field is confirmed valid.
    pub translate_field: Option<&'a dyn Fn(&str) -> String>,
    /// If set, restricts which `ColumnType`s may appear in `keep`.
    pub allowed_keep_types: Option<&'a [ColumnType]>,
    /// A caller-requested load-version override. Rejected whenever at least
    /// one filter is present and it disagrees with the `FilterSet`'s
    /// configured load version (spec §4.4: "filters with a load-version
    /// override are rejected").
    pub requested_load_version: Option<&'a str>,
}

/// Extract every `filter_<field>` entry from `params`, validate it against
/// `schema`, and append it to `filter_set`. Also validates the cross-cutting
/// `sort_on`/`keep` column references spec §4.4 assigns to the adapter
/// (rather than to `FilterSet` construction, which has no schema to check
/// against).
pub fn populate_filter_set(
    params: &[(String, String)],
    schema: &ColumnarAttributesSpec,
    filter_set: &mut FilterSet,
    options: &RequestAdapterOptions,
) -> Result<(), FilterError> {
    let mut seen_fields = std::collections::HashSet::new();
    let mut any_filter = false;

    for (key, _) in params {
        let Some(field) = key.strip_prefix(FILTER_PARAM_PREFIX) else {
            continue;
        };
        any_filter = true;
        if !seen_fields.insert(field.to_string()) {
            return Err(FilterError::illegal(format!(
                "Filter for field {field} was provided more than once"
            )));
        }
    }

    if any_filter {
        if let Some(requested) = options.requested_load_version {
            if requested != filter_set.load_version() {
                return Err(FilterError::illegal(
                    "A load version override is not permitted when filters are present",
                ));
            }
        }
    }

    for (key, value) in params {
        let Some(field) = key.strip_prefix(FILTER_PARAM_PREFIX) else {
            continue;
        };

        let column = schema
            .get(field)
            .ok_or_else(|| FilterError::illegal(format!("Unknown filter field: {field}")))?;

        if let Some(strategy) = column.spec.filter_strategy {
            let min_len = analyzers::minimum_query_length(strategy);
            if value.trim().chars().count() < min_len {
                return Err(FilterError::illegal(format!(
                    "Filter for field {field} requires at least {min_len} characters"
                )));
            }
        }

        let analyzer = column.spec.filter_strategy.map(analyzers::analyzer_for);
        let target_field = match options.translate_field {
            Some(translate) => translate(field),
            None => field.to_string(),
        };

        filter_set
            .append(&target_field, column.spec.col_type, value, analyzer, column.spec.filter_strategy)
            .map_err(|e| e.with_field_prefix(field))?;
    }

    if any_filter && filter_set.view().is_none() {
        return Err(FilterError::illegal(
            "A search view must be configured to filter this data product",
        ));
    }

    Ok(())
}

/// Validate that `sort_on` (if any) and every entry of `keep` name a real
/// column in `schema`, and that `keep` entries respect `allowed_keep_types`
/// when the caller restricts the allowed set (spec §4.4).
pub fn validate_sort_and_keep(
    sort_on: Option<&str>,
    keep: &[String],
    schema: &ColumnarAttributesSpec,
    allowed_keep_types: Option<&[ColumnType]>,
) -> Result<(), FilterError> {
    if let Some(sort_field) = sort_on {
        if schema.get(sort_field).is_none() {
            return Err(FilterError::illegal(format!("Unknown sort field: {sort_field}")));
        }
    }
    for field in keep {
        let column = schema
            .get(field)
            .ok_or_else(|| FilterError::illegal(format!("Unknown keep field: {field}")))?;
        if let Some(allowed) = allowed_keep_types {
            if !allowed.contains(&column.spec.col_type) {
                return Err(FilterError::illegal(format!(
                    "Field {field} cannot be kept: type {:?} is not in the allowed set",
                    column.spec.col_type
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::column_spec::{AttributesColumn, AttributesColumnSpec};
    use crate::common::FilterStrategy;
    use crate::filtering::filter_set::FilterSetOptions;

    fn schema() -> ColumnarAttributesSpec {
        ColumnarAttributesSpec::new(
            "coll1",
            vec![
                AttributesColumn::new(
                    AttributesColumnSpec::new("name", ColumnType::String)
                        .with_filter_strategy(FilterStrategy::Ngram)
                        .with_display_name("Name")
                        .with_category("general"),
                ),
                AttributesColumn::new(
                    AttributesColumnSpec::new("active", ColumnType::Bool)
                        .with_display_name("Active")
                        .with_category("general"),
                ),
            ],
        )
    }

    fn new_filter_set() -> FilterSet {
        FilterSet::new(FilterSetOptions::new("coll24", "loadver9").with_view("v")).unwrap()
    }

    #[test]
    fn populates_valid_filters() {
        let params = vec![
            ("filter_name".to_string(), "whee".to_string()),
            ("filter_active".to_string(), "true".to_string()),
        ];
        let mut fs = new_filter_set();
        populate_filter_set(&params, &schema(), &mut fs, &RequestAdapterOptions::default()).unwrap();
        assert_eq!(fs.len(), 2);
    }

    #[test]
    fn rejects_unknown_field() {
        let params = vec![("filter_bogus".to_string(), "x".to_string())];
        let mut fs = new_filter_set();
        let err = populate_filter_set(&params, &schema(), &mut fs, &RequestAdapterOptions::default()).unwrap_err();
        assert!(matches!(err, FilterError::IllegalParameter(_)));
    }

    #[test]
    fn rejects_repeated_key() {
        let params = vec![
            ("filter_name".to_string(), "a".to_string()),
            ("filter_name".to_string(), "b".to_string()),
        ];
        let mut fs = new_filter_set();
        let err = populate_filter_set(&params, &schema(), &mut fs, &RequestAdapterOptions::default()).unwrap_err();
        assert_eq!(
            err,
            FilterError::IllegalParameter("Filter for field name was provided more than once".to_string())
        );
    }

    #[test]
    fn enforces_ngram_minimum_length() {
        let params = vec![("filter_name".to_string(), "ab".to_string())];
        let mut fs = new_filter_set();
        let err = populate_filter_set(&params, &schema(), &mut fs, &RequestAdapterOptions::default()).unwrap_err();
        assert!(matches!(err, FilterError::IllegalParameter(_)));
    }

    #[test]
    fn translates_field_name_after_validation() {
        let params = vec![("filter_name".to_string(), "whee".to_string())];
        let mut fs = new_filter_set();
        let translate = |f: &str| format!("doc_{f}");
        let opts = RequestAdapterOptions {
            translate_field: Some(&translate),
            ..Default::default()
        };
        populate_filter_set(&params, &schema(), &mut fs, &opts).unwrap();
        let (text, _) = fs.to_query().unwrap();
        assert!(text.contains("doc.doc_name"));
    }

    #[test]
    fn rejects_filters_without_a_configured_view() {
        let params = vec![("filter_active".to_string(), "true".to_string())];
        let mut fs = FilterSet::new(FilterSetOptions::new("c", "v").with_collection("coll")).unwrap();
        let err = populate_filter_set(&params, &schema(), &mut fs, &RequestAdapterOptions::default()).unwrap_err();
        assert!(matches!(err, FilterError::IllegalParameter(_)));
    }

    #[test]
    fn validate_sort_and_keep_rejects_unknown_columns() {
        let err = validate_sort_and_keep(Some("bogus"), &[], &schema(), None).unwrap_err();
        assert!(matches!(err, FilterError::IllegalParameter(_)));
    }

    #[test]
    fn validate_sort_and_keep_enforces_allowed_types() {
        let err = validate_sort_and_keep(
            None,
            &["name".to_string()],
            &schema(),
            Some(&[ColumnType::Bool]),
        )
        .unwrap_err();
        assert!(matches!(err, FilterError::IllegalParameter(_)));
    }
}
