//! rolegraph - authorization graph for an embedded SQL engine
//!
//! This is the root crate that re-exports all components.

pub use rolegraph_ast as ast;
pub use rolegraph_catalog as catalog;
pub use rolegraph_executor as executor;
pub use rolegraph_storage as storage;
