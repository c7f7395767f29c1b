//! Preprocessing entry point
//!
//! [`preprocess`] runs the whole pipeline with default options:
//!
//! ```rust,ignore
//! use condtext::{preprocess, DefinedSymbols};
//!
//! let symbols = DefinedSymbols::from_iter(["A"]);
//! let out = preprocess("/*#if A*/\nyes\n/*#else*/\nno\n/*#endif*/\n", &symbols)?;
//! assert_eq!(out, "yes\n");
//! ```
//!
//! [`Preprocessor`] carries [`PreprocessOptions`] and returns a [`Processed`] value with the
//! diagnostics and the EOL marker that was used. Options and symbols are per call; nothing is
//! shared between runs.

use crate::condtext::ast::Document;
use crate::condtext::building::build_document;
use crate::condtext::diagnostics::Diagnostic;
use crate::condtext::error::PreprocessError;
use crate::condtext::generation::{Generator, UnsupportedOperatorPolicy};
use crate::condtext::lexing::{split_statements, strip_trailing_eol, Eol, FallbackEol};
use crate::condtext::symbols::DefinedSymbols;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreprocessOptions {
    pub unsupported_operators: UnsupportedOperatorPolicy,
    pub fallback_eol: FallbackEol,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Processed {
    pub text: String,
    pub eol: Eol,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    options: PreprocessOptions,
}

impl Preprocessor {
    pub fn new(options: PreprocessOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PreprocessOptions {
        &self.options
    }

    /// Transform a document
    pub fn process(
        &self,
        source: &str,
        symbols: &DefinedSymbols,
    ) -> Result<Processed, PreprocessError> {
        let eol = Eol::detect(source).unwrap_or_else(|| self.options.fallback_eol.resolve());

        if source.is_empty() {
            return Ok(Processed {
                text: String::new(),
                eol,
                diagnostics: Vec::new(),
            });
        }

        let document = self.parse(source)?;
        let generated =
            Generator::new(symbols, self.options.unsupported_operators).generate(&document)?;
        debug!(
            lines = generated.lines.len(),
            diagnostics = generated.diagnostics.len(),
            %eol,
            "generated output"
        );

        Ok(Processed {
            text: generated.render(eol),
            eol,
            diagnostics: generated.diagnostics,
        })
    }

    /// Parse a document into its directive tree without evaluating it
    pub fn parse(&self, source: &str) -> Result<Document, PreprocessError> {
        let body = strip_trailing_eol(source);
        let statements = split_statements(body)?;
        debug!(statements = statements.len(), "split statements");
        build_document(statements)
    }
}

/// Transform `source`, keeping only the branches selected by `symbols`
pub fn preprocess(source: &str, symbols: &DefinedSymbols) -> Result<String, PreprocessError> {
    Preprocessor::default()
        .process(source, symbols)
        .map(|processed| processed.text)
}
