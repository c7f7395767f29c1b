//! Line splitter
//!
//! This module turns raw document text into the ordered sequence of statements the tree
//! builder consumes.
//!
//! Structure:
//!     The tokenization is done through the logos lexer library. Tokens are deliberately
//! small (single punctuation characters, whitespace runs, text runs) so that no lexer rule
//! has to backtrack; comment openers and closers are recognized afterwards, over the token
//! stream of each line.
//!
//! The pipeline consists of:
//! 1. Core tokenization using logos lexer ./tokens.rs
//! 2. Line grouping: tokens split at Newline tokens ./line_grouping.rs
//! 3. Line classification: each line becomes plain content or a directive marker
//!    ./line_classification.rs
//!
//! Directive Recognition
//!
//!     A directive head is a comment opener immediately followed by `#` and a keyword:
//!     `/*#`, `/**#` (any number of stars) or `<!--#`, then `if`, `elif`, `elseif`, `else` or
//!     `endif`. `if`/`elif`/`else` heads need the closer of their comment style (`*/` or
//!     `-->`), which may sit on a later line. `endif` needs no closer at all.
//!
//!     Directives are line scoped: the physical line holding the opener (through the line
//!     holding the closer) becomes the directive statement. Everything else, including plain
//!     comments that don't start with `#`, is content and is kept verbatim.
//!
//! EOL handling lives in ./eol.rs and runs before splitting.

pub mod eol;
pub mod line_classification;
pub mod line_grouping;
pub mod tokens;

pub use eol::{strip_trailing_eol, Eol, FallbackEol};
pub use line_classification::{classify, CommentStyle, DirectiveKind, DirectiveMarker, Statement};
pub use line_grouping::{group_lines, Line};
pub use tokens::{tokenize, Token};

use crate::condtext::error::PreprocessError;

/// Split a document (already stripped of its trailing EOL) into statements
pub fn split_statements(source: &str) -> Result<Vec<Statement>, PreprocessError> {
    let tokens = tokenize(source);
    let lines = group_lines(tokens, source.len());
    classify(source, &lines)
}
