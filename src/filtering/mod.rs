//! The filter-expression compiler: parsing (`filter`), the ArangoSearch
//! analyzer registry (`analyzers`), the per-request accumulator and its two
//! emission backends (`filter_set`), the query-parameter-to-`FilterSet`
//! adapter (`request_adapter`), and the generic-view schema fallback
//! (`generic_view`). Everything here is pure and synchronous except
//! `analyzers::install_analyzers`, the one asynchronous boundary call (spec
//! §5).

pub mod analyzers;
pub mod filter;
pub mod filter_set;
pub mod generic_view;
pub mod request_adapter;

pub use analyzers::{analyzer_for, install_analyzers, minimum_query_length, AnalyzerInstaller};
pub use filter::{BooleanFilter, Filter, RangeFilter, RangeKind, SearchQueryPart, StringFilter};
pub use filter_set::{Combinator, FilterSet, FilterSetOptions, SortDirection, SubsetSpec};
pub use generic_view::{generic_view_spec, is_generic_view_product, GENERIC_VIEW_FIELD};
pub use request_adapter::{populate_filter_set, validate_sort_and_keep, RequestAdapterOptions, FILTER_PARAM_PREFIX};
