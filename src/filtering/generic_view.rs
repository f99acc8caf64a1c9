//! The generic-view selector (spec §2 item 6, §9 Open Questions): for data
//! products configured as "generic view" products, synthesize a minimal
//! column schema containing only a single reserved, ngram-searchable field
//! rather than loading a per-product attributes spec.
//!
//! Grounded on `original_source/src/service/filtering/generic_view.py` — it
//! declares exactly one column, `kbase_display_name`.
//!
//! Open Question (spec §9, carried unresolved into this implementation): the
//! request adapter only ever accepts filters against fields declared in the
//! schema it is handed. Since this schema declares only one field, a
//! generic-view product's filtering surface is limited to
//! `filter_kbase_display_name` — other fields are not filterable through the
//! generic view. This is the behavior the spec flags, not a gap introduced
//! here.

use crate::common::column_spec::{AttributesColumn, AttributesColumnSpec, ColumnType, ColumnarAttributesSpec};
use crate::common::FilterStrategy;

/// The single field a generic-view schema exposes.
pub const GENERIC_VIEW_FIELD: &str = "kbase_display_name";

/// True when `product` is configured (via `AppConfig::generic_view_products`)
/// to use the generic-view schema rather than a loaded per-product spec.
pub fn is_generic_view_product(product: &str, generic_view_products: &[String]) -> bool {
    generic_view_products.iter().any(|p| p == product)
}

/// Synthesize the minimal column schema a generic-view product is searched
/// under: a single non-visible, ngram-matched display-name field.
pub fn generic_view_spec(collection_id: impl Into<String>) -> ColumnarAttributesSpec {
    let column = AttributesColumn::new(
        AttributesColumnSpec::new(GENERIC_VIEW_FIELD, ColumnType::String)
            .with_filter_strategy(FilterStrategy::Ngram)
            .with_non_visible(true),
    );
    ColumnarAttributesSpec::new(collection_id, vec![column])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_view_spec_declares_only_the_reserved_field() {
        let spec = generic_view_spec("coll1");
        assert_eq!(spec.columns.len(), 1);
        let col = spec.get(GENERIC_VIEW_FIELD).unwrap();
        assert_eq!(col.spec.filter_strategy, Some(FilterStrategy::Ngram));
        assert!(col.spec.non_visible);
        assert!(col.validate().is_ok());
    }

    #[test]
    fn product_membership_check_is_exact_match() {
        let products = vec!["genomes".to_string(), "samples".to_string()];
        assert!(is_generic_view_product("genomes", &products));
        assert!(!is_generic_view_product("other", &products));
    }
}
