//! # condtext
//!
//! Conditional text preprocessing driven by directives embedded in comments.
//!
//! A document carries `/*#if EXPR*/`, `/*#elif EXPR*/`, `/*#else*/` and
//! `/*#endif*/` markers (or their `<!--#if EXPR-->` markup-comment forms). Given
//! the set of defined symbols, only the text of the selected branches is kept
//! and all directive lines are removed.
//!
//! File Layout
//!
//!     src/condtext
//!       ├── lexing       Line splitter: core tokens, lines, statements, EOL
//!       ├── expression   Condition tokens, parser and evaluator
//!       ├── ast          Directive tree
//!       ├── building     Statements to tree
//!       ├── generation   Tree to text
//!       ├── processor    Entry point tying the stages together
//!       ├── symbols      Defined symbol set
//!       ├── error        Error types; diagnostics for recovered problems
//!       ├── config       Layered configuration with embedded defaults
//!       └── formats      treeviz and JSON views of the directive tree
//!
//! The usual entry point is [`preprocess`]:
//!
//! ```rust,ignore
//! use condtext::{preprocess, DefinedSymbols};
//!
//! let symbols = DefinedSymbols::from_iter(["A"]);
//! let out = preprocess("/*#if A*/\nhello\n/*#endif*/\n", &symbols)?;
//! assert_eq!(out, "hello\n");
//! ```

pub mod condtext;

pub use condtext::error::PreprocessError;
pub use condtext::processor::{preprocess, PreprocessOptions, Preprocessor, Processed};
pub use condtext::symbols::DefinedSymbols;
