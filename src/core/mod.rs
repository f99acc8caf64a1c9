//! Process bootstrap: CLI parsing, layered configuration, the startup
//! banner, and the in-memory column-schema registry the HTTP surface reads
//! from. Mirrors the teacher's `core::{cli, config, banner, app}` split.

pub mod app;
pub mod banner;
pub mod cli;
pub mod config;
pub mod constants;
pub mod schema_registry;

pub use app::CoreApp;
pub use config::AppConfig;
pub use schema_registry::SchemaRegistry;
