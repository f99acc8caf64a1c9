//! The ArangoDB collaborator boundary: a storage trait, its stub, and the
//! backend's error type.

pub mod arango;
pub mod error;

pub use arango::{ArangoStorage, StubArangoStorage};
pub use error::ArangoError;
