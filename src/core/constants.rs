//! Environment variable names and defaults, one constant per variable, in
//! the teacher's `core::constants` style (a flat list of `ENV_*`/`DEFAULT_*`
//! constants rather than a struct of magic strings scattered through `cli.rs`
//! and `config.rs`).

// =============================================================================
// Application identity
// =============================================================================

pub const APP_NAME: &str = "Collections Filter Service";
pub const APP_NAME_LOWER: &str = "filtersvc";

// =============================================================================
// Configuration file
// =============================================================================

pub const CONFIG_FILE_NAME: &str = "filtersvc.json";

/// Environment variable for an explicit config file path.
pub const ENV_CONFIG: &str = "FILTERSVC_CONFIG";

// =============================================================================
// Server
// =============================================================================

pub const ENV_HOST: &str = "FILTERSVC_HOST";
pub const ENV_PORT: &str = "FILTERSVC_PORT";
pub const ENV_LOG: &str = "FILTERSVC_LOG";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

// =============================================================================
// ArangoDB collaborator
// =============================================================================

pub const ENV_ARANGO_URL: &str = "FILTERSVC_ARANGO_URL";
pub const ENV_ARANGO_DATABASE: &str = "FILTERSVC_ARANGO_DATABASE";
pub const ENV_ARANGO_USER: &str = "FILTERSVC_ARANGO_USER";
/// Read only from the environment, never from the config file (core/config.rs
/// keeps secrets out of `AppConfig`'s file-backed layer entirely).
pub const ENV_ARANGO_PASSWORD: &str = "FILTERSVC_ARANGO_PASSWORD";
pub const ENV_ARANGO_PROBE_TIMEOUT_MS: &str = "FILTERSVC_ARANGO_PROBE_TIMEOUT_MS";

pub const DEFAULT_ARANGO_URL: &str = "http://localhost:8529";
pub const DEFAULT_ARANGO_DATABASE: &str = "kbase_collections";
pub const DEFAULT_ARANGO_PROBE_TIMEOUT_MS: u64 = 5000;

// =============================================================================
// Generic-view product list (spec §9 Open Question)
// =============================================================================

/// Comma-separated list of data-product names that resolve to the
/// generic-view schema fallback instead of a loaded attributes spec.
pub const ENV_GENERIC_VIEW_PRODUCTS: &str = "FILTERSVC_GENERIC_VIEW_PRODUCTS";
