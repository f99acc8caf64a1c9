//! The filter-compile endpoint: a thin stand-in for "opaque execution of the
//! emitted query program" (spec §1) that returns the compiled `(query,
//! bind_vars)` pair instead of actually running it against ArangoDB (spec
//! `SPEC_FULL.md` §A.5). Everything the compiler itself needs is in scope;
//! everything else here — routing, query-param extraction — is the thin HTTP
//! shell the spec calls "external collaborator, treated as out of scope"
//! beyond consuming the parameter map.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};

use crate::api::types::ApiError;
use crate::core::app::CoreApp;
use crate::filtering::{populate_filter_set, FilterSet, FilterSetOptions, RequestAdapterOptions, FILTER_PARAM_PREFIX};

/// `GET /collections/:collection_id/products/:product/filter?load_version=...&filter_<field>=...`
pub async fn compile_filter(
    State(app): State<Arc<CoreApp>>,
    Path((collection_id, product)): Path<(String, String)>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let schema = app.schemas.resolve(&product, &collection_id)?;

    let load_version = params
        .iter()
        .find(|(k, _)| k == "load_version")
        .map(|(_, v)| v.clone())
        .ok_or_else(|| ApiError::bad_request("MISSING_LOAD_VERSION", "load_version query parameter is required"))?;

    let has_filters = params.iter().any(|(k, _)| k.starts_with(FILTER_PARAM_PREFIX));

    let view_name = format!("{product}_view");
    let collection_name = format!("{product}_coll");

    let mut opts = FilterSetOptions::new(collection_id.clone(), load_version);
    if has_filters {
        if !app.storage.has_search_view(&view_name).await? {
            return Err(ApiError::bad_request(
                "NO_SEARCH_VIEW",
                format!("Search view {view_name} does not exist for product {product}"),
            ));
        }
        opts = opts.with_view(view_name);
    } else {
        opts = opts.with_collection(collection_name);
    }

    let mut filter_set = FilterSet::new(opts)?;
    populate_filter_set(&params, &schema, &mut filter_set, &RequestAdapterOptions::default())?;

    let (query, bind_vars) = filter_set.to_query()?;
    Ok(Json(serde_json::json!({ "query": query, "bind_vars": bind_vars })))
}
