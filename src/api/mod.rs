//! HTTP surface: routes, the shared error envelope, and router assembly.

pub mod routes;
mod server;
pub mod types;

pub use server::build_router;
pub use types::ApiError;
