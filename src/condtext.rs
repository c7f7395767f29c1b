//! Main module for condtext library functionality
//!
//! The pipeline runs in four stages, each in its own module:
//!
//!     1. lexing: the document is tokenized with logos, grouped into physical lines and each
//!        line classified as plain content or a directive marker (a `Statement`).
//!     2. expression: the condition text of every `if`/`elif` head is parsed into an `Expr`.
//!     3. building: statements are nested into a tree of `DirectiveBlock`s.
//!     4. generation: the tree is walked, one branch per block is selected and the kept lines
//!        are joined with the document's EOL marker.
//!
//! Nothing here holds state between calls. The symbol set and the options are passed to every
//! invocation, so documents can be processed concurrently.

pub mod ast;
pub mod building;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod expression;
pub mod formats;
pub mod generation;
pub mod lexing;
pub mod processor;
pub mod symbols;
