//! End-of-line handling
//!
//!     The EOL marker is detected once, from the last bytes of the document, and used for
//!     every line join in the output. Mixed line endings are not preserved; the whole output
//!     follows the document's final terminator.
//!
//!     When the document does not end with a line feed there is nothing to detect and the
//!     fallback applies (the host platform's convention unless configured otherwise).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eol {
    Lf,
    CrLf,
}

impl Eol {
    pub fn as_str(self) -> &'static str {
        match self {
            Eol::Lf => "\n",
            Eol::CrLf => "\r\n",
        }
    }

    /// The host platform's line terminator
    pub fn platform() -> Self {
        if cfg!(windows) {
            Eol::CrLf
        } else {
            Eol::Lf
        }
    }

    /// Detect the terminator from the trailing bytes, if there is one
    pub fn detect(source: &str) -> Option<Self> {
        if source.ends_with("\r\n") {
            Some(Eol::CrLf)
        } else if source.ends_with('\n') {
            Some(Eol::Lf)
        } else {
            None
        }
    }
}

impl fmt::Display for Eol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eol::Lf => write!(f, "lf"),
            Eol::CrLf => write!(f, "crlf"),
        }
    }
}

/// Marker used when the document has no trailing line feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackEol {
    #[default]
    Platform,
    Lf,
    CrLf,
}

impl FallbackEol {
    pub fn resolve(self) -> Eol {
        match self {
            FallbackEol::Platform => Eol::platform(),
            FallbackEol::Lf => Eol::Lf,
            FallbackEol::CrLf => Eol::CrLf,
        }
    }
}

/// Remove exactly one trailing terminator, if present
pub fn strip_trailing_eol(source: &str) -> &str {
    source
        .strip_suffix("\r\n")
        .or_else(|| source.strip_suffix('\n'))
        .unwrap_or(source)
}
