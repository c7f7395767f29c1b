//! Renderings of the directive tree
//!
//! These are debugging views: they show how a document was parsed, not what it evaluates to.
//!
//!     - treeviz: one line per node, nesting shown with box-drawing connectors
//!     - json: the tree serialized with serde_json

pub mod json;
pub mod treeviz;

pub use json::to_json_str;
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_linum};
