//! Directive tree
//!
//!     A parsed document is an ordered sequence of [`ContentNode`]s. A node is either a
//!     [`Leaf`] holding one line of content, or a [`DirectiveBlock`] holding the alternative
//!     [`Branch`]es of one `if` ... `endif` construct. Branch bodies are again content
//!     sequences, which is how blocks nest.
//!
//!     Block invariants (established by the builder):
//!         - at least one branch, the first being `if`
//!         - at most one `else`, and only as the last branch
//!         - branches in source order
//!
//!     The tree is built fresh for every run and owns all of its text.

pub mod block;
pub mod content;
pub mod document;

pub use block::{Branch, BranchKind, DirectiveBlock};
pub use content::{ContentNode, Leaf};
pub use document::Document;
