//! Condition expressions
//!
//!     The text after `#if`/`#elif` is a boolean expression over symbol names:
//!
//!         expr    := or
//!         or      := and ('||' and)*
//!         and     := unary ('&&' unary)*
//!         unary   := '!' unary | '(' expr ')' | identifier
//!
//!     `!` binds tightest, then `&&`, then `||`; both binary operators are left associative.
//!
//!     Conditions are tokenized with logos (./tokens.rs) and parsed with chumsky over the token
//!     stream (./parser.rs) into the closed [`Expr`] tree (./expr.rs).
//!
//!     Literals, comparisons and arithmetic are syntax errors. The unary operators `-`, `+`
//!     and `~` are accepted by the parser but kept as [`Expr::Unsupported`] nodes, which
//!     evaluate to false and are reported as diagnostics.

pub mod expr;
pub mod parser;
pub mod tokens;

pub use expr::Expr;
pub use parser::parse_condition;
pub use tokens::ExprToken;
