//! `FilterSet`: the insertion-ordered accumulator of per-field filters plus the
//! global query options, and its two emission backends (spec §4.3).
//!
//! Grounded on `original_source/src/service/filtering/filters.py::FilterSet`
//! for the field set, the `append`/`to_aql` shape, and the search-vs-scan
//! branch; on the teacher's `data::duckdb::filters::builder` for the Rust
//! idiom of a query-fragment builder that grows a `Vec<String>` of clauses and
//! a `serde_json::Map` of binds side by side rather than a single mutable SQL
//! string.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::filter::Filter;
use crate::common::errors::FilterError;
use crate::common::names::{FLD_COLLECTION_ID, FLD_LOAD_VERSION, FLD_MATCHES_SELECTIONS};
use crate::common::ColumnType;

/// The backend-imposed ceiling substituted for `limit == 0` ("unbounded").
/// The origin uses an arbitrary-precision `10**80` literal; this implementation
/// stores limits as `i64` binds, so the practical ceiling is `i64::MAX`
/// (see spec §9 "Astronomical limit sentinel").
pub const UNBOUNDED_LIMIT: i64 = i64::MAX;

/// Which direction a `SORT` clause orders its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn as_aql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn comparison_operator(self) -> &'static str {
        match self {
            SortDirection::Asc => ">",
            SortDirection::Desc => "<",
        }
    }
}

/// How the user-filter clauses are combined: `AND` narrows, `OR` widens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Conjunction,
    Disjunction,
}

impl Combinator {
    fn as_aql(self) -> &'static str {
        match self {
            Combinator::Conjunction => "AND",
            Combinator::Disjunction => "OR",
        }
    }
}

/// An opaque subset (match or selection) membership identifier, per spec
/// §3's `SubsetSpecification`. `mark_only` lets a caller pass the same spec
/// for both roles and have it narrow only the selection side: "mark-only"
/// means "skip my own filter clause, but still count me for the role that
/// asked for narrowing" (spec §4.3 "Match-spec semantics").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetSpec {
    pub id: Option<String>,
    pub mark_only: bool,
}

impl SubsetSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            mark_only: false,
        }
    }

    pub fn mark_only(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            mark_only: true,
        }
    }
}

/// The validated, immutable construction options a `FilterSet` is built
/// from. Kept as a separate struct (rather than a sprawling `FilterSet::new`
/// argument list) so constructor validation has one obvious place to live,
/// mirroring the teacher's `*Config` structs that get validated once and
/// then handed to a long-lived service.
#[derive(Debug, Clone)]
pub struct FilterSetOptions {
    pub collection_id: String,
    pub load_version: String,
    pub view: Option<String>,
    pub collection: Option<String>,
    pub sort_on: Option<String>,
    pub sort_direction: SortDirection,
    pub start_after: Option<String>,
    pub skip: u64,
    pub limit: u64,
    pub combinator: Combinator,
    pub match_spec: Option<SubsetSpec>,
    pub selection_spec: Option<SubsetSpec>,
    pub keep: Vec<String>,
    pub keep_filter_nulls: bool,
    pub doc_var: String,
    pub count: bool,
}

impl FilterSetOptions {
    pub fn new(collection_id: impl Into<String>, load_version: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
            load_version: load_version.into(),
            view: None,
            collection: None,
            sort_on: None,
            sort_direction: SortDirection::Asc,
            start_after: None,
            skip: 0,
            limit: 0,
            combinator: Combinator::Conjunction,
            match_spec: None,
            selection_spec: None,
            keep: Vec::new(),
            keep_filter_nulls: false,
            doc_var: "doc".to_string(),
            count: false,
        }
    }

    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_on = Some(field.into());
        self.sort_direction = direction;
        self
    }

    pub fn with_start_after(mut self, cursor: impl Into<String>) -> Self {
        self.start_after = Some(cursor.into());
        self
    }

    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_disjunction(mut self) -> Self {
        self.combinator = Combinator::Disjunction;
        self
    }

    pub fn with_match_spec(mut self, spec: SubsetSpec) -> Self {
        self.match_spec = Some(spec);
        self
    }

    pub fn with_selection_spec(mut self, spec: SubsetSpec) -> Self {
        self.selection_spec = Some(spec);
        self
    }

    pub fn with_keep(mut self, keep: Vec<String>) -> Self {
        self.keep = keep;
        self
    }

    pub fn with_keep_filter_nulls(mut self, keep_filter_nulls: bool) -> Self {
        self.keep_filter_nulls = keep_filter_nulls;
        self
    }

    pub fn with_count(mut self, count: bool) -> Self {
        self.count = count;
        self
    }

    pub fn with_doc_var(mut self, doc_var: impl Into<String>) -> Self {
        self.doc_var = doc_var.into();
        self
    }
}

/// The ordered `field -> Filter` accumulator plus the global query options
/// that together produce an AQL query program (spec §3 `FilterSet`).
#[derive(Debug, Clone)]
pub struct FilterSet {
    fields: Vec<(String, Filter)>,
    field_set: HashSet<String>,
    opts: FilterSetOptions,
}

impl FilterSet {
    /// Construct a `FilterSet`, validating every invariant that does not
    /// depend on which filters end up being appended (spec §4.3 "Construction
    /// contract"). The view-vs-collection-vs-filters relationship can only be
    /// checked once filters are known, so it is deferred to [`Self::to_query`].
    pub fn new(opts: FilterSetOptions) -> Result<Self, FilterError> {
        if opts.collection_id.trim().is_empty() {
            return Err(FilterError::internal("FilterSet requires a non-empty collection_id"));
        }
        if opts.load_version.trim().is_empty() {
            return Err(FilterError::internal("FilterSet requires a non-empty load_version"));
        }
        if opts.view.as_deref().unwrap_or("").is_empty() && opts.collection.as_deref().unwrap_or("").is_empty() {
            return Err(FilterError::internal(
                "FilterSet requires at least one of view or collection",
            ));
        }
        if opts.start_after.is_some() && opts.sort_on.is_none() {
            return Err(FilterError::internal("start_after requires sort_on to be set"));
        }
        if opts.doc_var.trim().is_empty() {
            return Err(FilterError::internal("FilterSet requires a non-empty doc_var"));
        }
        if opts.keep.iter().any(|k| k.trim().is_empty()) {
            return Err(FilterError::internal("FilterSet keep entries must be non-empty"));
        }
        Ok(Self {
            fields: Vec::new(),
            field_set: HashSet::new(),
            opts,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn load_version(&self) -> &str {
        &self.opts.load_version
    }

    pub fn view(&self) -> Option<&str> {
        self.opts.view.as_deref()
    }

    /// Parse `filter_string` into the filter variant appropriate for
    /// `col_type`/`strategy` and append it under `field`. Rejects a field
    /// already present (spec §8 S6) and wraps parser errors with the
    /// field-name prefix (spec §7).
    pub fn append(
        &mut self,
        field: &str,
        col_type: ColumnType,
        filter_string: &str,
        analyzer: Option<&str>,
        strategy: Option<crate::common::FilterStrategy>,
    ) -> Result<(), FilterError> {
        if field.trim().is_empty() {
            return Err(FilterError::illegal("Filter field name must not be empty"));
        }
        if !self.field_set.insert(field.to_string()) {
            return Err(FilterError::illegal(format!(
                "Filter for field {field} was provided more than once"
            )));
        }
        let filter = Filter::parse(col_type, strategy, filter_string, analyzer)
            .map_err(|e| e.with_field_prefix(field))?;
        self.fields.push((field.to_string(), filter));
        Ok(())
    }

    fn effective_limit(&self) -> i64 {
        if self.opts.limit == 0 {
            UNBOUNDED_LIMIT
        } else {
            self.opts.limit as i64
        }
    }

    fn keep_clause(&self, binds: &mut Map<String, Value>) -> String {
        let doc_var = &self.opts.doc_var;
        if self.opts.keep.is_empty() {
            format!("RETURN {doc_var}")
        } else {
            binds.insert("keep".to_string(), serde_json::json!(self.opts.keep));
            format!("RETURN KEEP({doc_var}, @keep)")
        }
    }

    fn keep_null_clauses(&self, binds: &mut Map<String, Value>) -> Vec<String> {
        let doc_var = &self.opts.doc_var;
        if !self.opts.keep_filter_nulls {
            return Vec::new();
        }
        self.opts
            .keep
            .iter()
            .enumerate()
            .map(|(i, field)| {
                binds.insert(format!("keep{i}"), serde_json::json!(field));
                format!("{doc_var}[@keep{i}] != null")
            })
            .collect()
    }

    /// Produce the `(query_text, bind_map)` pair. Referentially transparent:
    /// calling this twice on the same `FilterSet` yields identical output
    /// (spec §8 invariant 2). Chooses the search-view backend when at least
    /// one filter is present, else the plain-scan backend (spec §4.3).
    pub fn to_query(&self) -> Result<(String, Map<String, Value>), FilterError> {
        if self.fields.is_empty() {
            let collection = self.opts.collection.as_ref().ok_or_else(|| {
                FilterError::internal("FilterSet has no filters but no collection was configured")
            })?;
            self.emit_scan(collection)
        } else {
            let view = self.opts.view.as_ref().ok_or_else(|| {
                FilterError::internal("FilterSet has filters but no search view was configured")
            })?;
            self.emit_search(view)
        }
    }

    /// Search-view emission path: one ArangoSearch `SEARCH` clause combining
    /// an invariant conjunction (collection id, load version, null exclusion,
    /// subset membership) with the user-supplied filter clauses (spec §4.3
    /// "Emission — search-view path").
    fn emit_search(&self, view: &str) -> Result<(String, Map<String, Value>), FilterError> {
        let doc_var = &self.opts.doc_var;
        let mut binds = Map::new();
        let mut let_lines = Vec::new();
        let mut filter_clauses = Vec::new();

        for (i, (field, filter)) in self.fields.iter().enumerate() {
            let prefix = format!("v{}_", i + 1);
            let identifier = format!("{doc_var}.{field}");
            let part = filter.emit(&identifier, &prefix);
            for (name, expr) in part.variable_assignments {
                let_lines.push(format!("LET {name} = {expr}"));
            }
            filter_clauses.extend(part.aql_lines);
            binds.extend(part.bind_vars);
        }

        binds.insert("view".to_string(), serde_json::json!(view));
        binds.insert("collid".to_string(), serde_json::json!(self.opts.collection_id));
        binds.insert("load_ver".to_string(), serde_json::json!(self.opts.load_version));

        let mut invariant_clauses = vec![
            format!("{doc_var}.{FLD_COLLECTION_ID} == @collid"),
            format!("{doc_var}.{FLD_LOAD_VERSION} == @load_ver"),
        ];
        invariant_clauses.extend(self.keep_null_clauses(&mut binds));

        if let Some(spec) = &self.opts.match_spec {
            if !spec.mark_only {
                if let Some(id) = &spec.id {
                    binds.insert("internal_match_id".to_string(), serde_json::json!(id));
                    invariant_clauses.push(format!("{doc_var}.{FLD_MATCHES_SELECTIONS} == @internal_match_id"));
                }
            }
        }
        if let Some(spec) = &self.opts.selection_spec {
            if let Some(id) = &spec.id {
                binds.insert("internal_selection_id".to_string(), serde_json::json!(id));
                invariant_clauses.push(format!(
                    "{doc_var}.{FLD_MATCHES_SELECTIONS} == @internal_selection_id"
                ));
            }
        }

        let user_clause = filter_clauses.join(&format!(" {} ", self.opts.combinator.as_aql()));
        let search_expr = format!("({}) AND ({user_clause})", invariant_clauses.join(" AND "));

        let mut lines = let_lines;
        if self.opts.count {
            lines.push(format!(
                "RETURN COUNT(FOR {doc_var} IN @@view SEARCH {search_expr} RETURN {doc_var})"
            ));
            return Ok((lines.join("\n"), binds));
        }

        lines.push(format!("FOR {doc_var} IN @@view"));
        lines.push(format!("SEARCH {search_expr}"));
        if let Some(sort) = &self.opts.sort_on {
            binds.insert("sort".to_string(), serde_json::json!(sort));
            binds.insert("sortdir".to_string(), serde_json::json!(self.opts.sort_direction.as_str()));
            lines.push(format!("SORT {doc_var}[@sort] {}", self.opts.sort_direction.as_aql()));
        }
        binds.insert("skip".to_string(), serde_json::json!(self.opts.skip));
        binds.insert("limit".to_string(), serde_json::json!(self.effective_limit()));
        lines.push("LIMIT @skip, @limit".to_string());
        lines.push(self.keep_clause(&mut binds));

        Ok((lines.join("\n"), binds))
    }

    /// Plain-scan emission path, taken only when no filters are present
    /// (spec §4.3 "Emission — scan path"). Subset membership is tested with
    /// `IN` against the document's membership list rather than equality,
    /// since there is no ArangoSearch view to pre-expand the comparison.
    fn emit_scan(&self, collection: &str) -> Result<(String, Map<String, Value>), FilterError> {
        let doc_var = &self.opts.doc_var;
        let mut binds = Map::new();
        binds.insert("collection".to_string(), serde_json::json!(collection));
        binds.insert("collid".to_string(), serde_json::json!(self.opts.collection_id));
        binds.insert("load_ver".to_string(), serde_json::json!(self.opts.load_version));

        let mut lines = vec![
            format!("FOR {doc_var} IN @@collection"),
            format!("FILTER {doc_var}.{FLD_COLLECTION_ID} == @collid"),
            format!("FILTER {doc_var}.{FLD_LOAD_VERSION} == @load_ver"),
        ];
        for clause in self.keep_null_clauses(&mut binds) {
            lines.push(format!("FILTER {clause}"));
        }

        if let Some(spec) = &self.opts.match_spec {
            if !spec.mark_only {
                if let Some(id) = &spec.id {
                    binds.insert("internal_match_id".to_string(), serde_json::json!(id));
                    lines.push(format!("FILTER @internal_match_id IN {doc_var}.{FLD_MATCHES_SELECTIONS}"));
                }
            }
        }
        if let Some(spec) = &self.opts.selection_spec {
            if let Some(id) = &spec.id {
                binds.insert("internal_selection_id".to_string(), serde_json::json!(id));
                lines.push(format!(
                    "FILTER @internal_selection_id IN {doc_var}.{FLD_MATCHES_SELECTIONS}"
                ));
            }
        }

        if self.opts.count {
            lines.push("COLLECT WITH COUNT INTO length".to_string());
            lines.push("RETURN length".to_string());
            return Ok((lines.join("\n"), binds));
        }

        if let Some(start_after) = &self.opts.start_after {
            binds.insert("sort".to_string(), serde_json::json!(self.opts.sort_on.clone().unwrap_or_default()));
            binds.insert("start_after".to_string(), serde_json::json!(start_after));
            lines.push(format!(
                "FILTER {doc_var}[@sort] {} @start_after",
                self.opts.sort_direction.comparison_operator()
            ));
        }
        if let Some(sort) = &self.opts.sort_on {
            binds.insert("sort".to_string(), serde_json::json!(sort));
            binds.insert("sortdir".to_string(), serde_json::json!(self.opts.sort_direction.as_str()));
            lines.push(format!("SORT {doc_var}[@sort] {}", self.opts.sort_direction.as_aql()));
        }
        binds.insert("skip".to_string(), serde_json::json!(self.opts.skip));
        binds.insert("limit".to_string(), serde_json::json!(self.effective_limit()));
        lines.push("LIMIT @skip, @limit".to_string());
        lines.push(self.keep_clause(&mut binds));

        Ok((lines.join("\n"), binds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::FilterStrategy;

    fn base_search_opts() -> FilterSetOptions {
        FilterSetOptions::new("coll24", "loadver9").with_view("my_search_view")
    }

    #[test]
    fn s1_five_mixed_filters_search_emission() {
        let mut fs = FilterSet::new(base_search_opts()).unwrap();
        fs.append("rangefield", ColumnType::Int, "[6,24]", None, None).unwrap();
        fs.append(
            "prefixfield",
            ColumnType::String,
            "foobar",
            Some("text_en"),
            Some(FilterStrategy::Prefix),
        )
        .unwrap();
        fs.append("rangefield2", ColumnType::Float, "0.2,", None, None).unwrap();
        fs.append(
            "fulltextfield",
            ColumnType::String,
            "whee",
            Some("text_rs"),
            Some(FilterStrategy::Fulltext),
        )
        .unwrap();
        fs.append(
            "datefield",
            ColumnType::Date,
            ",2023-09-13T18:51:19+0000]",
            None,
            None,
        )
        .unwrap();
        fs.append(
            "ngramfield",
            ColumnType::String,
            "bitsnbobs",
            Some("ngram_stuff"),
            Some(FilterStrategy::Ngram),
        )
        .unwrap();
        fs.append(
            "strident",
            ColumnType::String,
            "thingy",
            None,
            Some(FilterStrategy::Identity),
        )
        .unwrap();

        let (text, binds) = fs.to_query().unwrap();

        assert!(text.starts_with("LET v2_prefixes = TOKENS(@v2_input, \"text_en\")\n"));
        assert!(text.contains("LET v4_prefixes = TOKENS(@v4_input, \"text_rs\")"));
        assert!(text.contains("FOR doc IN @@view"));
        assert!(text.contains("SEARCH (doc.coll == @collid AND doc.load_ver == @load_ver) AND ("));
        assert!(text.contains("IN_RANGE(doc.rangefield, @v1_low, @v1_high, true, true)"));
        assert!(text.contains("doc.rangefield2 > @v3_low"));
        assert!(text.contains("doc.datefield < @v5_high"));
        assert!(text.ends_with("LIMIT @skip, @limit\nRETURN doc"));

        assert_eq!(binds["view"], "my_search_view");
        assert_eq!(binds["collid"], "coll24");
        assert_eq!(binds["load_ver"], "loadver9");
        assert_eq!(binds["skip"], 0);
        assert_eq!(binds["limit"], UNBOUNDED_LIMIT);
        assert_eq!(binds["v1_low"], 6.0);
        assert_eq!(binds["v1_high"], 24.0);
        assert_eq!(binds["v2_input"], "foobar");
        assert_eq!(binds["v3_low"], 0.2);
        assert_eq!(binds["v4_input"], "whee");
        assert_eq!(binds["v5_high"], "2023-09-13T18:51:19+0000");
        assert_eq!(binds["v6_input"], "bitsnbobs");
        assert_eq!(binds["v7_input"], "thingy");
    }

    #[test]
    fn s2_scan_path_default_limits() {
        let opts = FilterSetOptions::new("coll24", "loadver9").with_collection("my_coll");
        let fs = FilterSet::new(opts).unwrap();
        let (text, binds) = fs.to_query().unwrap();
        assert_eq!(
            text,
            "FOR doc IN @@collection\nFILTER doc.coll == @collid\nFILTER doc.load_ver == @load_ver\nLIMIT @skip, @limit\nRETURN doc"
        );
        assert_eq!(binds["skip"], 0);
        assert_eq!(binds["limit"], UNBOUNDED_LIMIT);
        assert_eq!(binds["collection"], "my_coll");
    }

    #[test]
    fn s3_count_suppresses_sort_and_limit() {
        let mut fs = FilterSet::new(base_search_opts().with_count(true)).unwrap();
        fs.append("strident", ColumnType::String, "thingy", None, Some(FilterStrategy::Identity))
            .unwrap();
        let (text, _binds) = fs.to_query().unwrap();
        assert!(text.starts_with("RETURN COUNT(FOR doc IN @@view SEARCH"));
        assert!(!text.contains("LIMIT"));
        assert!(!text.contains("SORT"));
    }

    #[test]
    fn s4_scan_count_with_no_filters() {
        let opts = FilterSetOptions::new("coll24", "loadver9")
            .with_collection("my_coll")
            .with_count(true);
        let fs = FilterSet::new(opts).unwrap();
        let (text, _binds) = fs.to_query().unwrap();
        assert!(text.ends_with("COLLECT WITH COUNT INTO length\nRETURN length"));
    }

    #[test]
    fn empty_filter_set_on_search_only_construction_is_programmer_error() {
        let opts = FilterSetOptions::new("coll24", "loadver9").with_view("v");
        let fs = FilterSet::new(opts).unwrap();
        let err = fs.to_query().unwrap_err();
        assert!(!err.is_user_facing());
    }

    #[test]
    fn filters_on_scan_only_construction_is_programmer_error() {
        let opts = FilterSetOptions::new("coll24", "loadver9").with_collection("c");
        let mut fs = FilterSet::new(opts).unwrap();
        fs.append("strident", ColumnType::String, "thingy", None, Some(FilterStrategy::Identity))
            .unwrap();
        let err = fs.to_query().unwrap_err();
        assert!(!err.is_user_facing());
    }

    #[test]
    fn construction_requires_view_or_collection() {
        let err = FilterSet::new(FilterSetOptions::new("c", "v")).unwrap_err();
        assert!(!err.is_user_facing());
    }

    #[test]
    fn start_after_requires_sort_on() {
        let opts = FilterSetOptions::new("c", "v").with_collection("coll").with_start_after("x");
        let err = FilterSet::new(opts).unwrap_err();
        assert!(!err.is_user_facing());
    }

    #[test]
    fn duplicate_field_is_rejected() {
        let opts = FilterSetOptions::new("coll24", "loadver9").with_view("v");
        let mut fs = FilterSet::new(opts).unwrap();
        fs.append("myfield", ColumnType::Bool, "true", None, None).unwrap();
        let err = fs.append("myfield", ColumnType::Bool, "false", None, None).unwrap_err();
        assert_eq!(
            err,
            FilterError::IllegalParameter("Filter for field myfield was provided more than once".to_string())
        );
    }

    #[test]
    fn each_appended_filter_gets_a_unique_prefix() {
        let opts = FilterSetOptions::new("c", "v").with_view("view");
        let mut fs = FilterSet::new(opts).unwrap();
        for i in 0..4 {
            fs.append(&format!("f{i}"), ColumnType::Bool, "true", None, None).unwrap();
        }
        let (text, _) = fs.to_query().unwrap();
        for i in 1..=4 {
            assert!(text.contains(&format!("@v{i}_bool_value")));
        }
    }

    #[test]
    fn keep_filter_nulls_emits_positional_binds() {
        let opts = FilterSetOptions::new("c", "v")
            .with_collection("coll")
            .with_keep(vec!["a".to_string(), "b".to_string()])
            .with_keep_filter_nulls(true);
        let fs = FilterSet::new(opts).unwrap();
        let (text, binds) = fs.to_query().unwrap();
        assert!(text.contains("FILTER doc[@keep0] != null"));
        assert!(text.contains("FILTER doc[@keep1] != null"));
        assert_eq!(binds["keep0"], "a");
        assert_eq!(binds["keep1"], "b");
        assert_eq!(binds["keep"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn mark_only_match_spec_skips_match_clause_but_selection_still_applies() {
        let opts = FilterSetOptions::new("c", "v")
            .with_collection("coll")
            .with_match_spec(SubsetSpec::mark_only("subset1"))
            .with_selection_spec(SubsetSpec::new("subset1"));
        let fs = FilterSet::new(opts).unwrap();
        let (text, binds) = fs.to_query().unwrap();
        assert!(!text.contains("internal_match_id"));
        assert!(text.contains("FILTER @internal_selection_id IN doc._mtchsel"));
        assert_eq!(binds["internal_selection_id"], "subset1");
    }

    #[test]
    fn explicit_limit_is_honored_over_sentinel() {
        let opts = FilterSetOptions::new("c", "v").with_collection("coll").with_limit(50).with_skip(10);
        let fs = FilterSet::new(opts).unwrap();
        let (_text, binds) = fs.to_query().unwrap();
        assert_eq!(binds["limit"], 50);
        assert_eq!(binds["skip"], 10);
    }
}
