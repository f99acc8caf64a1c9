//! The `Filter` sum type: parsing a filter's string value into a typed filter,
//! and emitting it as a fragment of AQL.
//!
//! Grounded on `original_source/src/service/filtering/filters.py`
//! (`AbstractFilter`/`RangeFilter`/`StringFilter`/`BooleanFilter`,
//! `SearchQueryPart`) for the parsing grammar and emission shape, and on the
//! teacher's `data::duckdb::filters::types::Filter` (`#[serde(tag = "type")]`
//! enum with a `to_sql`/`to_sql_aliased` pair) for the Rust idiom: a tagged
//! enum whose variants each know how to grow a parameter-tracking query
//! fragment. A single `emit` covers both emission backends: `FilterSet` only
//! ever reaches a filter's `emit` when it has taken the search-view path, since
//! the scan path is only taken when no filters are present at all (spec §4.3).

use chrono::DateTime;

use super::analyzers::DEFAULT_ANALYZER;
use crate::common::errors::FilterError;
use crate::common::{ColumnType, FilterStrategy};

/// A fragment of an AQL query under construction: zero or more `LET`
/// assignments (name, expression), one or more boolean expressions to be
/// joined by the caller, and the bind variables those expressions reference.
/// Mirrors `filters.py::SearchQueryPart`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQueryPart {
    pub variable_assignments: Vec<(String, String)>,
    pub aql_lines: Vec<String>,
    pub bind_vars: serde_json::Map<String, serde_json::Value>,
}

impl SearchQueryPart {
    fn single_line(line: String, bind_vars: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            variable_assignments: Vec::new(),
            aql_lines: vec![line],
            bind_vars,
        }
    }
}

/// Which comparator family a range filter's endpoints are parsed and
/// compared under. Collapses `int`/`float` into one numeric kind, per the
/// spec's choice to store both uniformly as `f64` - only `date` keeps its
/// endpoints as the caller-supplied string, compared lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    Numeric,
    Date,
}

impl RangeKind {
    pub fn from_column_type(col_type: ColumnType) -> Result<Self, FilterError> {
        match col_type {
            ColumnType::Int | ColumnType::Float => Ok(Self::Numeric),
            ColumnType::Date => Ok(Self::Date),
            other => Err(FilterError::internal(format!(
                "{other:?} columns cannot be range filtered"
            ))),
        }
    }
}

/// A single range endpoint: a parsed number (for `int`/`float` columns) or a
/// validated-but-unparsed ISO-8601 string (for `date` columns, per the design
/// note to keep dates stringly-typed and compare them lexicographically).
#[derive(Debug, Clone, PartialEq)]
pub enum RangeEndpoint {
    Numeric(f64),
    Date(String),
}

impl RangeEndpoint {
    fn parse(raw: &str, kind: RangeKind, name: &str) -> Result<Self, FilterError> {
        match kind {
            RangeKind::Numeric => raw.parse::<f64>().map(RangeEndpoint::Numeric).map_err(|_| {
                FilterError::illegal(format!("{name} value is not a number: {raw}"))
            }),
            RangeKind::Date => {
                validate_iso8601(raw).map_err(|_| {
                    FilterError::illegal(format!("{name} value is not an ISO8601 date: {raw}"))
                })?;
                Ok(RangeEndpoint::Date(raw.to_string()))
            }
        }
    }

    fn display(&self) -> String {
        match self {
            RangeEndpoint::Numeric(v) => format!("{v:?}"),
            RangeEndpoint::Date(s) => s.clone(),
        }
    }

    fn to_bind_value(&self) -> serde_json::Value {
        match self {
            RangeEndpoint::Numeric(v) => serde_json::json!(v),
            RangeEndpoint::Date(s) => serde_json::json!(s),
        }
    }

    /// Endpoints of a single `RangeFilter` always share a `RangeKind`, so this
    /// only ever compares same-variant pairs.
    fn cmp_to(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (RangeEndpoint::Numeric(a), RangeEndpoint::Numeric(b)) => {
                a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
            }
            (RangeEndpoint::Date(a), RangeEndpoint::Date(b)) => a.cmp(b),
            _ => unreachable!("range endpoints always share a RangeKind"),
        }
    }
}

/// A lenient ISO-8601 check: try a handful of offset/fractional-second
/// variants plus RFC 3339 (which covers colon-separated offsets and `Z`).
/// `dateutil.isoparse` in the original is considerably more permissive; this
/// covers the shapes the filter DSL is documented to accept.
fn validate_iso8601(raw: &str) -> Result<(), ()> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%z",
        "%Y-%m-%dT%H:%M:%S%.f%z",
        "%Y-%m-%dT%H:%M:%S%:z",
        "%Y-%m-%dT%H:%M:%S%.f%:z",
    ];
    if FORMATS
        .iter()
        .any(|fmt| DateTime::parse_from_str(raw, fmt).is_ok())
    {
        return Ok(());
    }
    DateTime::parse_from_rfc3339(raw).map(|_| ()).map_err(|_| ())
}

/// A bounded or half-bounded range over an int, float or date column, parsed
/// from interval notation: `[low,high]`, `(low,high)`, or a mix, with either
/// bound left empty for unbounded (e.g. `[,100)`).
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter {
    pub kind: RangeKind,
    pub low: Option<RangeEndpoint>,
    pub low_inclusive: bool,
    pub high: Option<RangeEndpoint>,
    pub high_inclusive: bool,
}

fn split_bracket(part: &str, leading: bool) -> (bool, &str) {
    if leading {
        let inclusive = part.starts_with('[');
        let stripped = if part.starts_with('[') || part.starts_with('(') {
            &part[1..]
        } else {
            part
        };
        (inclusive, stripped)
    } else {
        let inclusive = part.ends_with(']');
        let stripped = if part.ends_with(')') || part.ends_with(']') {
            &part[..part.len() - 1]
        } else {
            part
        };
        (inclusive, stripped)
    }
}

impl RangeFilter {
    /// Parse `[low,high]`-style interval notation. Both endpoints may be
    /// empty (no constraint on that side) but not both; the comma is always
    /// required, exactly once.
    pub fn parse(value: &str, kind: RangeKind) -> Result<Self, FilterError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(FilterError::missing("Missing range information"));
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(FilterError::illegal(format!(
                "Invalid range specification; expected exactly one comma: {trimmed}"
            )));
        }

        let (low_inclusive, low_raw) = split_bracket(parts[0], true);
        let (high_inclusive, high_raw) = split_bracket(parts[1], false);

        let low = if low_raw.is_empty() {
            None
        } else {
            Some(RangeEndpoint::parse(low_raw, kind, "low range endpoint")?)
        };
        let high = if high_raw.is_empty() {
            None
        } else {
            Some(RangeEndpoint::parse(high_raw, kind, "high range endpoint")?)
        };

        if low.is_none() && high.is_none() {
            return Err(FilterError::illegal(
                "At least one of the low or high values for the filter range must be provided",
            ));
        }

        let filter = Self {
            kind,
            low,
            low_inclusive,
            high,
            high_inclusive,
        };
        filter.check_non_empty()?;
        Ok(filter)
    }

    fn check_non_empty(&self) -> Result<(), FilterError> {
        if let (Some(low), Some(high)) = (&self.low, &self.high) {
            let ordering = low.cmp_to(high);
            let excludes_all = ordering == std::cmp::Ordering::Greater
                || (ordering == std::cmp::Ordering::Equal
                    && !(self.low_inclusive && self.high_inclusive));
            if excludes_all {
                return Err(FilterError::illegal(format!(
                    "The filter range {} excludes all values",
                    self.to_range_string()
                )));
            }
        }
        Ok(())
    }

    /// The canonical interval-notation rendering of this filter. Used both
    /// for error messages and to check the parse/stringify round-trip
    /// invariant (spec §8.1).
    pub fn to_range_string(&self) -> String {
        let mut out = String::new();
        if let Some(low) = &self.low {
            out.push(if self.low_inclusive { '[' } else { '(' });
            out.push_str(&low.display());
        }
        out.push(',');
        if let Some(high) = &self.high {
            out.push_str(&high.display());
            out.push(if self.high_inclusive { ']' } else { ')' });
        }
        out
    }

    /// Either a two-sided `IN_RANGE(...)` call or a one-sided comparison,
    /// depending on which endpoints are present. `identifier` is spliced
    /// verbatim; only endpoint values flow through bind variables.
    pub fn emit(&self, identifier: &str, prefix: &str) -> SearchQueryPart {
        let low_bind = format!("{prefix}low");
        let high_bind = format!("{prefix}high");

        match (&self.low, &self.high) {
            (Some(low), Some(high)) => {
                let mut bind_vars = serde_json::Map::new();
                bind_vars.insert(low_bind.clone(), low.to_bind_value());
                bind_vars.insert(high_bind.clone(), high.to_bind_value());
                let line = format!(
                    "IN_RANGE({identifier}, @{low_bind}, @{high_bind}, {}, {})",
                    self.low_inclusive, self.high_inclusive
                );
                SearchQueryPart::single_line(line, bind_vars)
            }
            (Some(low), None) => {
                let mut bind_vars = serde_json::Map::new();
                bind_vars.insert(low_bind.clone(), low.to_bind_value());
                let op = if self.low_inclusive { ">=" } else { ">" };
                SearchQueryPart::single_line(format!("{identifier} {op} @{low_bind}"), bind_vars)
            }
            (None, Some(high)) => {
                let mut bind_vars = serde_json::Map::new();
                bind_vars.insert(high_bind.clone(), high.to_bind_value());
                let op = if self.high_inclusive { "<=" } else { "<" };
                SearchQueryPart::single_line(format!("{identifier} {op} @{high_bind}"), bind_vars)
            }
            (None, None) => unreachable!("RangeFilter::parse rejects empty-empty ranges"),
        }
    }
}

/// A boolean-valued filter: `true`/`false`, case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanFilter {
    pub value: bool,
}

impl BooleanFilter {
    pub fn parse(value: &str) -> Result<Self, FilterError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(FilterError::missing("Missing boolean string information"));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "true" => Ok(Self { value: true }),
            "false" => Ok(Self { value: false }),
            other => Err(FilterError::illegal(format!(
                "Invalid boolean specification; expected true or false: {other}"
            ))),
        }
    }

    pub fn emit(&self, identifier: &str, prefix: &str) -> SearchQueryPart {
        let value_bind = format!("{prefix}bool_value");
        let mut bind_vars = serde_json::Map::new();
        bind_vars.insert(value_bind.clone(), serde_json::json!(self.value));
        SearchQueryPart::single_line(format!("{identifier} == @{value_bind}"), bind_vars)
    }
}

/// A string-valued filter matched via one of the four [`FilterStrategy`]
/// variants, each backed by a different ArangoSearch analyzer. The minimum
/// query length per strategy (ngram: 3 characters) is enforced by the request
/// adapter, not here - `filters.py::StringFilter` never checks it either.
#[derive(Debug, Clone, PartialEq)]
pub struct StringFilter {
    pub strategy: FilterStrategy,
    pub value: String,
    pub analyzer: String,
}

impl StringFilter {
    pub fn parse(
        strategy: FilterStrategy,
        value: &str,
        analyzer: Option<&str>,
    ) -> Result<Self, FilterError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(FilterError::missing(
                "Filter string is required and must be non-whitespace only",
            ));
        }
        let analyzer = match analyzer.map(str::trim) {
            Some(a) if !a.is_empty() => a.to_string(),
            _ => DEFAULT_ANALYZER.to_string(),
        };
        Ok(Self {
            strategy,
            value: trimmed.to_string(),
            analyzer,
        })
    }

    /// `identifier` is spliced verbatim; the needle flows through `@{prefix}input`.
    pub fn emit(&self, identifier: &str, prefix: &str) -> SearchQueryPart {
        let input_bind = format!("{prefix}input");
        let mut bind_vars = serde_json::Map::new();
        bind_vars.insert(input_bind.clone(), serde_json::json!(self.value));

        let (variable_assignments, line) = match self.strategy {
            FilterStrategy::Identity => (Vec::new(), format!("{identifier} == @{input_bind}")),
            FilterStrategy::Fulltext => {
                let prefixes = format!("{prefix}prefixes");
                let assign = (
                    prefixes.clone(),
                    format!("TOKENS(@{input_bind}, \"{}\")", self.analyzer),
                );
                let line = format!(
                    "ANALYZER({prefixes} ALL == {identifier}, \"{}\")",
                    self.analyzer
                );
                (vec![assign], line)
            }
            FilterStrategy::Prefix => {
                let prefixes = format!("{prefix}prefixes");
                let assign = (
                    prefixes.clone(),
                    format!("TOKENS(@{input_bind}, \"{}\")", self.analyzer),
                );
                let line = format!(
                    "ANALYZER(STARTS_WITH({identifier}, {prefixes}, LENGTH({prefixes})), \"{}\")",
                    self.analyzer
                );
                (vec![assign], line)
            }
            FilterStrategy::Ngram => (
                Vec::new(),
                format!("NGRAM_MATCH({identifier}, @{input_bind}, 1, \"{}\")", self.analyzer),
            ),
        };

        SearchQueryPart {
            variable_assignments,
            aql_lines: vec![line],
            bind_vars,
        }
    }
}

/// The closed set of filter kinds a column's [`FilterStrategy`]/[`ColumnType`]
/// can resolve to. `enum` columns have no filter representation - the
/// original dispatch table (`FilterSet._FILTER_MAP`) never maps `ENUM` to a
/// filter class either, so it reaches [`Filter::parse`] only to be rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Range(RangeFilter),
    String(StringFilter),
    Boolean(BooleanFilter),
}

impl Filter {
    /// Parse a raw query-string value into the filter variant appropriate for
    /// `col_type`, per the column's declared [`FilterStrategy`] when it has one.
    pub fn parse(
        col_type: ColumnType,
        strategy: Option<FilterStrategy>,
        value: &str,
        analyzer: Option<&str>,
    ) -> Result<Self, FilterError> {
        match col_type {
            ColumnType::Int | ColumnType::Float | ColumnType::Date => {
                let kind = RangeKind::from_column_type(col_type)?;
                Ok(Filter::Range(RangeFilter::parse(value, kind)?))
            }
            ColumnType::Bool => Ok(Filter::Boolean(BooleanFilter::parse(value)?)),
            ColumnType::String => {
                let strategy = strategy.ok_or_else(|| {
                    FilterError::internal("string columns require a filter_strategy")
                })?;
                Ok(Filter::String(StringFilter::parse(strategy, value, analyzer)?))
            }
            ColumnType::Enum => Err(FilterError::internal("unsupported column type: enum")),
        }
    }

    pub fn emit(&self, identifier: &str, prefix: &str) -> SearchQueryPart {
        match self {
            Filter::Range(f) => f.emit(identifier, prefix),
            Filter::Boolean(f) => f.emit(identifier, prefix),
            Filter::String(f) => f.emit(identifier, prefix),
        }
    }
}
