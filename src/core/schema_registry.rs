//! The in-memory column-schema registry the HTTP surface reads from.
//!
//! Loading specs from disk/network and merging per-collection fragments
//! (`ColumnarAttributesSpec::merge`) is the loaders' job and out of scope
//! for this compiler (spec §1 "Out of scope: ... loaders that populate the
//! database"). What *is* in scope is resolving a `(product, collection_id)`
//! pair to the right schema: a loaded spec if one was registered, or the
//! generic-view fallback (§2 item 6) for products configured as such.

use std::collections::HashMap;

use crate::common::column_spec::ColumnarAttributesSpec;
use crate::common::errors::FilterError;
use crate::filtering::generic_view::{generic_view_spec, is_generic_view_product};

#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    specs: HashMap<String, ColumnarAttributesSpec>,
    generic_view_products: Vec<String>,
}

impl SchemaRegistry {
    pub fn new(generic_view_products: Vec<String>) -> Self {
        Self {
            specs: HashMap::new(),
            generic_view_products,
        }
    }

    /// Register a loaded spec under its data-product name.
    pub fn register(&mut self, product: impl Into<String>, spec: ColumnarAttributesSpec) {
        self.specs.insert(product.into(), spec);
    }

    /// Resolve a product/collection pair to its schema. Generic-view
    /// products always win over a registered spec, matching the original's
    /// "generic view" early-exit (spec §9 Open Question).
    pub fn resolve(&self, product: &str, collection_id: &str) -> Result<ColumnarAttributesSpec, FilterError> {
        if is_generic_view_product(product, &self.generic_view_products) {
            return Ok(generic_view_spec(collection_id));
        }
        self.specs
            .get(product)
            .cloned()
            .ok_or_else(|| FilterError::illegal(format!("No column spec registered for product: {product}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::column_spec::{AttributesColumn, AttributesColumnSpec, ColumnType};

    #[test]
    fn resolves_registered_spec() {
        let mut registry = SchemaRegistry::new(vec![]);
        let spec = ColumnarAttributesSpec::new(
            "coll1",
            vec![AttributesColumn::new(
                AttributesColumnSpec::new("count", ColumnType::Int).with_non_visible(true),
            )],
        );
        registry.register("widgets", spec);
        let resolved = registry.resolve("widgets", "coll1").unwrap();
        assert!(resolved.get("count").is_some());
    }

    #[test]
    fn generic_view_product_overrides_registered_spec() {
        let mut registry = SchemaRegistry::new(vec!["widgets".to_string()]);
        registry.register("widgets", ColumnarAttributesSpec::new("coll1", vec![]));
        let resolved = registry.resolve("widgets", "coll1").unwrap();
        assert!(resolved.get("kbase_display_name").is_some());
    }

    #[test]
    fn unknown_product_is_an_illegal_parameter() {
        let registry = SchemaRegistry::new(vec![]);
        let err = registry.resolve("bogus", "coll1").unwrap_err();
        assert!(err.is_user_facing());
    }
}
