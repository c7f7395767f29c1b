//! Evaluator and code generator
//!
//!     Walks the directive tree and collects the lines that survive. For each block the
//!     branches are tried in source order and the first whose condition holds (or the `else`)
//!     is expanded; the others are skipped without looking inside them, so blocks nested in an
//!     untaken branch are never evaluated. A block with no matching branch and no `else`
//!     contributes nothing.
//!
//!     The kept lines are joined with the document's EOL marker and the marker is appended
//!     once more at the end. An output without lines is the empty string.

use crate::condtext::ast::{Branch, ContentNode, DirectiveBlock, Document};
use crate::condtext::diagnostics::Diagnostic;
use crate::condtext::error::PreprocessError;
use crate::condtext::lexing::Eol;
use crate::condtext::symbols::DefinedSymbols;
use serde::Deserialize;
use tracing::debug;

/// What to do when a condition uses a unary operator other than `!`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedOperatorPolicy {
    /// Treat the subexpression as false and record a warning
    #[default]
    Warn,
    /// Abort the run
    Deny,
}

/// Lines kept by the generator, borrowed from the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated<'d> {
    pub lines: Vec<&'d str>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Generated<'_> {
    pub fn render(&self, eol: Eol) -> String {
        render_lines(&self.lines, eol)
    }
}

pub struct Generator<'a> {
    symbols: &'a DefinedSymbols,
    policy: UnsupportedOperatorPolicy,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Generator<'a> {
    pub fn new(symbols: &'a DefinedSymbols, policy: UnsupportedOperatorPolicy) -> Self {
        Self {
            symbols,
            policy,
            diagnostics: Vec::new(),
        }
    }

    pub fn generate<'d>(
        mut self,
        document: &'d Document,
    ) -> Result<Generated<'d>, PreprocessError> {
        let lines = self.collect(&document.content)?;
        Ok(Generated {
            lines,
            diagnostics: self.diagnostics,
        })
    }

    /// Depth-first walk over the selected branches with an explicit stack of open bodies
    fn collect<'d>(
        &mut self,
        nodes: &'d [ContentNode],
    ) -> Result<Vec<&'d str>, PreprocessError> {
        let mut lines = Vec::new();
        let mut stack = vec![nodes.iter()];

        while let Some(frame) = stack.last_mut() {
            let Some(node) = frame.next() else {
                stack.pop();
                continue;
            };
            match node {
                ContentNode::Leaf(leaf) => lines.push(leaf.text.as_str()),
                ContentNode::Block(block) => {
                    if let Some(branch) = self.select(block)? {
                        stack.push(branch.body.iter());
                    }
                }
            }
        }

        Ok(lines)
    }

    /// First branch that matches, in source order
    fn select<'d>(
        &mut self,
        block: &'d DirectiveBlock,
    ) -> Result<Option<&'d Branch>, PreprocessError> {
        for branch in block.branches() {
            let mut unsupported = Vec::new();
            let taken = branch.matches(self.symbols, &mut unsupported);
            for operator in unsupported {
                self.report_unsupported(branch.line, operator)?;
            }
            if taken {
                debug!(line = branch.line, kind = %branch.kind, "selected branch");
                return Ok(Some(branch));
            }
        }
        debug!(line = block.line(), "no branch selected");
        Ok(None)
    }

    fn report_unsupported(
        &mut self,
        line: usize,
        operator: String,
    ) -> Result<(), PreprocessError> {
        match self.policy {
            UnsupportedOperatorPolicy::Deny => {
                Err(PreprocessError::UnsupportedOperator { line, operator })
            }
            UnsupportedOperatorPolicy::Warn => {
                debug!(
                    line,
                    operator = %operator,
                    "unsupported unary operator evaluated as false"
                );
                self.diagnostics.push(Diagnostic::warning(
                    line,
                    format!(
                        "unsupported unary operator `{}`, only `!` is supported; evaluated as false",
                        operator
                    ),
                ));
                Ok(())
            }
        }
    }
}

/// Join lines with the EOL marker and terminate the last one
pub fn render_lines(lines: &[&str], eol: Eol) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut output = lines.join(eol.as_str());
    output.push_str(eol.as_str());
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condtext::building::build_document;
    use crate::condtext::lexing::split_statements;

    fn generate(source: &str, names: &[&str]) -> Vec<String> {
        let document = build_document(split_statements(source).unwrap()).unwrap();
        let symbols = DefinedSymbols::from_iter(names.iter().copied());
        let generated = Generator::new(&symbols, UnsupportedOperatorPolicy::Warn)
            .generate(&document)
            .unwrap();
        generated.lines.iter().map(|line| line.to_string()).collect()
    }

    const CHAIN: &str = "/*#if A*/\na\n/*#elif B*/\nb\n/*#elif C*/\nc\n/*#else*/\nz\n/*#endif*/";

    #[test]
    fn test_first_matching_branch_wins() {
        assert_eq!(generate(CHAIN, &["A", "B", "C"]), vec!["a"]);
        assert_eq!(generate(CHAIN, &["B", "C"]), vec!["b"]);
        assert_eq!(generate(CHAIN, &["C"]), vec!["c"]);
        assert_eq!(generate(CHAIN, &[]), vec!["z"]);
    }

    #[test]
    fn test_no_match_without_else_is_empty() {
        assert!(generate("/*#if A*/\na\n/*#elif B*/\nb\n/*#endif*/", &[]).is_empty());
    }

    #[test]
    fn test_nested_block_in_untaken_branch_is_skipped() {
        let source = "/*#if A*/\n/*#if B*/\nab\n/*#endif*/\n/*#else*/\nnot a\n/*#endif*/";
        assert_eq!(generate(source, &["B"]), vec!["not a"]);
        assert_eq!(generate(source, &["A", "B"]), vec!["ab"]);
        assert!(generate(source, &["A"]).is_empty());
    }

    #[test]
    fn test_nested_output_keeps_source_order() {
        let source = "a\n/*#if A*/\nb\n/*#if A*/\nc\n/*#endif*/\nd\n/*#endif*/\ne";
        assert_eq!(generate(source, &["A"]), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_untaken_branch_conditions_are_not_evaluated() {
        let source = "/*#if A*/\na\n/*#elif -B*/\nb\n/*#endif*/";
        let document = build_document(split_statements(source).unwrap()).unwrap();
        let symbols = DefinedSymbols::from_iter(["A"]);
        let generated = Generator::new(&symbols, UnsupportedOperatorPolicy::Deny)
            .generate(&document)
            .unwrap();
        assert_eq!(generated.lines, vec!["a"]);
    }

    #[test]
    fn test_unsupported_operator_warns() {
        let source = "/*#if -A*/\na\n/*#else*/\nb\n/*#endif*/";
        let document = build_document(split_statements(source).unwrap()).unwrap();
        let symbols = DefinedSymbols::from_iter(["A"]);
        let generated = Generator::new(&symbols, UnsupportedOperatorPolicy::Warn)
            .generate(&document)
            .unwrap();

        assert_eq!(generated.lines, vec!["b"]);
        assert_eq!(generated.diagnostics.len(), 1);
        assert_eq!(generated.diagnostics[0].line, 1);
        assert!(generated.diagnostics[0].message.contains("`-`"));
    }

    #[test]
    fn test_unsupported_operator_denied() {
        let source = "a\n/*#if ~A*/\na\n/*#endif*/";
        let document = build_document(split_statements(source).unwrap()).unwrap();
        let symbols = DefinedSymbols::new();
        let err = Generator::new(&symbols, UnsupportedOperatorPolicy::Deny)
            .generate(&document)
            .unwrap_err();
        assert_eq!(
            err,
            PreprocessError::UnsupportedOperator {
                line: 2,
                operator: "~".to_string()
            }
        );
    }

    #[test]
    fn test_render_lines() {
        assert_eq!(render_lines(&["a", "b"], Eol::Lf), "a\nb\n");
        assert_eq!(render_lines(&["a", ""], Eol::CrLf), "a\r\n\r\n");
        assert_eq!(render_lines(&[""], Eol::Lf), "\n");
        assert_eq!(render_lines(&[], Eol::Lf), "");
    }
}
