//! Reserved document field names referenced verbatim by the emission backends.
//!
//! Grounded on `original_source`'s `src.common.storage.collection_and_field_names`
//! module (imported as `names` in `filters.py`/`filtering_processing.py`): a flat
//! module of `FLD_*` string constants every data-product document carries
//! regardless of its own columns. These are part of the storage schema, not
//! user-controlled input, so the emission backends splice them directly into
//! AQL rather than routing them through bind variables.
//!
//! The module itself wasn't present in the retrieved source pack, but its
//! three values are pinned by `filters_test.py`'s literal AQL assertions
//! (`doc.coll`, `doc.load_ver`, `doc._mtchsel`), so they're copied from there
//! rather than invented.

/// The field holding the KBase collection ID every document belongs to.
pub const FLD_COLLECTION_ID: &str = "coll";

/// The field holding the load version tag of the snapshot a document came from.
pub const FLD_LOAD_VERSION: &str = "load_ver";

/// The field holding the list of subset (match/selection) IDs a document is a
/// member of.
pub const FLD_MATCHES_SELECTIONS: &str = "_mtchsel";
