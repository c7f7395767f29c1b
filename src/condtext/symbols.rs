//! Defined symbols
//!
//!     The only input besides the document text. A condition identifier is true when its name
//!     is in the set; symbols have no values. The set is built once by the caller and only read
//!     by the pipeline.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Names accepted as condition identifiers
static SYMBOL_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("symbol name regex is valid"));

/// Returns true if `name` can appear as an identifier in a condition.
///
/// Names that fail this check can still be defined, but no condition can ever refer to them.
pub fn is_valid_symbol_name(name: &str) -> bool {
    SYMBOL_NAME_REGEX.is_match(name)
}

/// The set of symbol names that make identifier conditions true
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinedSymbols {
    names: BTreeSet<String>,
}

impl DefinedSymbols {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a symbol. Returns false if it was already defined.
    pub fn define(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn undefine(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Defined names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names that no condition could reference
    pub fn invalid_names(&self) -> Vec<&str> {
        self.iter().filter(|name| !is_valid_symbol_name(name)).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for DefinedSymbols {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for DefinedSymbols {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}
