//! JSON rendering of the directive tree

use crate::condtext::ast::Document;

/// Pretty-printed JSON for a parsed document
pub fn to_json_str(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}
