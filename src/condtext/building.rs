//! Directive tree builder
//!
//!     Consumes the statement sequence and nests directive blocks. The tree is built bottom-up
//!     with an explicit stack of open blocks:
//!
//!         - `if` parses its condition and pushes a new open block whose current branch
//!           becomes the insertion target.
//!         - `elif`/`else` close the current branch of the innermost open block and start a
//!           sibling branch in the same block.
//!         - `endif` pops the innermost block, finishes it and appends it to the enclosing
//!           target (the parent branch body, or the document root).
//!         - plain text goes to the current target as a leaf.
//!
//!     Every malformed sequence ends in a specific error: `endif`/`elif`/`else` with an empty
//!     stack, a branch after `else`, or a non-empty stack at end of input.
//!
//!     Blocks may nest at most [`MAX_NESTING_DEPTH`] levels deep. Deeper documents fail with
//!     `NestingTooDeep`, which keeps every recursive walk over the finished tree (drop, serde,
//!     the treeviz renderer) within a fixed stack budget.

use crate::condtext::ast::{Branch, BranchKind, ContentNode, DirectiveBlock, Document, Leaf};
use crate::condtext::error::{ExpressionError, PreprocessError};
use crate::condtext::expression::parse_condition;
use crate::condtext::lexing::{DirectiveKind, DirectiveMarker, Statement};
use tracing::debug;

/// Deepest allowed block nesting
pub const MAX_NESTING_DEPTH: usize = 256;

/// A block whose `endif` has not been seen yet
#[derive(Debug)]
struct OpenBlock {
    finished: Vec<Branch>,
    current: Branch,
}

impl OpenBlock {
    fn start_branch(&mut self, branch: Branch) -> Result<(), PreprocessError> {
        if self.current.kind == BranchKind::Else {
            return Err(PreprocessError::BranchAfterElse {
                kind: branch.kind,
                line: branch.line,
            });
        }
        let previous = std::mem::replace(&mut self.current, branch);
        self.finished.push(previous);
        Ok(())
    }

    fn finish(mut self) -> DirectiveBlock {
        self.finished.push(self.current);
        DirectiveBlock::new(self.finished)
    }
}

/// Build the directive tree from a statement sequence
pub fn build_document(statements: Vec<Statement>) -> Result<Document, PreprocessError> {
    let mut root: Vec<ContentNode> = Vec::new();
    let mut stack: Vec<OpenBlock> = Vec::new();

    for statement in statements {
        match statement {
            Statement::PlainText { content, line } => {
                target(&mut root, &mut stack).push(ContentNode::Leaf(Leaf::new(content, line)));
            }
            Statement::Directive(marker) => match marker.kind {
                DirectiveKind::If => {
                    if stack.len() >= MAX_NESTING_DEPTH {
                        return Err(PreprocessError::NestingTooDeep {
                            line: marker.line,
                            limit: MAX_NESTING_DEPTH,
                        });
                    }
                    let branch = conditional_branch(BranchKind::If, &marker)?;
                    stack.push(OpenBlock {
                        finished: Vec::new(),
                        current: branch,
                    });
                }
                DirectiveKind::Elif => {
                    let open = stack.last_mut().ok_or(PreprocessError::OrphanBranch {
                        kind: BranchKind::Elif,
                        line: marker.line,
                    })?;
                    let branch = conditional_branch(BranchKind::Elif, &marker)?;
                    open.start_branch(branch)?;
                }
                DirectiveKind::Else => {
                    let open = stack.last_mut().ok_or(PreprocessError::OrphanBranch {
                        kind: BranchKind::Else,
                        line: marker.line,
                    })?;
                    open.start_branch(Branch::otherwise(marker.line))?;
                }
                DirectiveKind::End => {
                    let open = stack
                        .pop()
                        .ok_or(PreprocessError::UnmatchedEnd { line: marker.line })?;
                    let block = open.finish();
                    target(&mut root, &mut stack).push(ContentNode::Block(block));
                }
            },
        }
    }

    if let Some(open) = stack.first() {
        // Report the outermost unclosed `if`
        return Err(PreprocessError::UnterminatedBlock {
            line: open.finished.first().unwrap_or(&open.current).line,
        });
    }

    let document = Document::new(root);
    debug!(
        blocks = document.block_count(),
        depth = document.max_depth(),
        "built directive tree"
    );
    Ok(document)
}

/// The body new content goes into: the innermost open branch, or the root
fn target<'a>(
    root: &'a mut Vec<ContentNode>,
    stack: &'a mut [OpenBlock],
) -> &'a mut Vec<ContentNode> {
    match stack.last_mut() {
        Some(open) => &mut open.current.body,
        None => root,
    }
}

fn conditional_branch(
    kind: BranchKind,
    marker: &DirectiveMarker,
) -> Result<Branch, PreprocessError> {
    let condition = marker
        .expression
        .as_deref()
        .ok_or(ExpressionError::Empty)
        .and_then(parse_condition)
        .map_err(|source| PreprocessError::Expression {
            line: marker.line,
            source,
        })?;
    Ok(Branch::conditional(kind, condition, marker.line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condtext::expression::Expr;
    use crate::condtext::lexing::split_statements;

    fn build(source: &str) -> Result<Document, PreprocessError> {
        build_document(split_statements(source)?)
    }

    fn leaf_texts(nodes: &[ContentNode]) -> Vec<&str> {
        nodes
            .iter()
            .filter_map(ContentNode::as_leaf)
            .map(|leaf| leaf.text.as_str())
            .collect()
    }

    #[test]
    fn test_plain_document_is_all_leaves() {
        let doc = build("a\nb").unwrap();
        assert_eq!(leaf_texts(&doc.content), vec!["a", "b"]);
        assert_eq!(doc.block_count(), 0);
    }

    #[test]
    fn test_if_elif_else_share_one_block() {
        let doc = build("before\n/*#if A*/\na\n/*#elif B*/\nb\n/*#else*/\nc\n/*#endif*/\nafter")
            .unwrap();

        assert_eq!(doc.content.len(), 3);
        assert_eq!(doc.block_count(), 1);

        let block = doc.content[1].as_block().unwrap();
        let kinds: Vec<BranchKind> = block.branches().iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![BranchKind::If, BranchKind::Elif, BranchKind::Else]);
        assert_eq!(block.branches()[0].condition, Some(Expr::identifier("A")));
        assert_eq!(block.branches()[2].condition, None);
        assert_eq!(leaf_texts(&block.branches()[0].body), vec!["a"]);
        assert_eq!(leaf_texts(&block.branches()[1].body), vec!["b"]);
        assert_eq!(leaf_texts(&block.branches()[2].body), vec!["c"]);
        assert_eq!(block.branches()[1].line, 4);
    }

    #[test]
    fn test_nested_blocks() {
        let source = "/*#if A*/\n/*#if B*/\nab\n/*#else*/\na\n/*#endif*/\ntail\n/*#endif*/";
        let doc = build(source).unwrap();

        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.max_depth(), 2);

        let outer = doc.content[0].as_block().unwrap();
        assert_eq!(outer.branches().len(), 1);
        let body = &outer.branches()[0].body;
        assert_eq!(body.len(), 2);
        let inner = body[0].as_block().unwrap();
        assert_eq!(inner.branches().len(), 2);
        assert_eq!(inner.line(), 2);
        assert_eq!(leaf_texts(body), vec!["tail"]);
    }

    #[test]
    fn test_empty_branches() {
        let doc = build("/*#if A*/\n/*#else*/\n/*#endif*/").unwrap();
        let block = doc.content[0].as_block().unwrap();
        assert!(block.branches().iter().all(|b| b.body.is_empty()));
    }

    #[test]
    fn test_unmatched_endif() {
        assert_eq!(
            build("a\n/*#endif*/").unwrap_err(),
            PreprocessError::UnmatchedEnd { line: 2 }
        );
        assert_eq!(
            build("/*#if A*/\n/*#endif*/\n/*#endif*/").unwrap_err(),
            PreprocessError::UnmatchedEnd { line: 3 }
        );
    }

    #[test]
    fn test_orphan_branches() {
        assert_eq!(
            build("/*#else*/").unwrap_err(),
            PreprocessError::OrphanBranch {
                kind: BranchKind::Else,
                line: 1
            }
        );
        assert_eq!(
            build("x\n<!--#elif A-->").unwrap_err(),
            PreprocessError::OrphanBranch {
                kind: BranchKind::Elif,
                line: 2
            }
        );
    }

    #[test]
    fn test_unterminated_block_reports_outermost_if() {
        assert_eq!(
            build("x\n/*#if A*/\n/*#if B*/\n/*#endif*/").unwrap_err(),
            PreprocessError::UnterminatedBlock { line: 2 }
        );
        assert_eq!(
            build("/*#if A*/\n/*#else*/\nno").unwrap_err(),
            PreprocessError::UnterminatedBlock { line: 1 }
        );
    }

    #[test]
    fn test_branch_after_else() {
        assert_eq!(
            build("/*#if A*/\n/*#else*/\n/*#elif B*/\n/*#endif*/").unwrap_err(),
            PreprocessError::BranchAfterElse {
                kind: BranchKind::Elif,
                line: 3
            }
        );
        assert_eq!(
            build("/*#if A*/\n/*#else*/\n/*#else*/\n/*#endif*/").unwrap_err(),
            PreprocessError::BranchAfterElse {
                kind: BranchKind::Else,
                line: 3
            }
        );
    }

    #[test]
    fn test_missing_condition() {
        assert_eq!(
            build("/*#if*/\n/*#endif*/").unwrap_err(),
            PreprocessError::Expression {
                line: 1,
                source: ExpressionError::Empty
            }
        );
    }

    #[test]
    fn test_malformed_condition_aborts() {
        let err = build("/*#if A*/\n/*#elif B ==*/\n/*#endif*/").unwrap_err();
        assert!(matches!(
            err,
            PreprocessError::Expression {
                line: 2,
                source: ExpressionError::Syntax { .. }
            }
        ));
    }

    fn nested(depth: usize) -> String {
        format!("{}x\n{}", "/*#if A*/\n".repeat(depth), "/*#endif*/\n".repeat(depth))
    }

    #[test]
    fn test_nesting_at_limit_is_accepted() {
        let doc = build(&nested(MAX_NESTING_DEPTH)).unwrap();
        assert_eq!(doc.max_depth(), MAX_NESTING_DEPTH);
    }

    #[test]
    fn test_nesting_beyond_limit_is_rejected() {
        assert_eq!(
            build(&nested(MAX_NESTING_DEPTH + 1)).unwrap_err(),
            PreprocessError::NestingTooDeep {
                line: MAX_NESTING_DEPTH + 1,
                limit: MAX_NESTING_DEPTH
            }
        );

        let err = build(&nested(10_000)).unwrap_err();
        assert_eq!(err.line(), MAX_NESTING_DEPTH + 1);
        assert!(err.is_structural());
    }
}
