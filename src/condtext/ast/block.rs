//! Directive blocks and their branches

use super::content::ContentNode;
use crate::condtext::expression::Expr;
use crate::condtext::symbols::DefinedSymbols;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchKind {
    If,
    Elif,
    Else,
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            BranchKind::If => "if",
            BranchKind::Elif => "elif",
            BranchKind::Else => "else",
        };
        write!(f, "{}", keyword)
    }
}

/// One condition + body pair of a block. `else` branches have no condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub kind: BranchKind,
    pub condition: Option<Expr>,
    pub body: Vec<ContentNode>,
    /// 1-based line of the branch's directive
    pub line: usize,
}

impl Branch {
    pub fn conditional(kind: BranchKind, condition: Expr, line: usize) -> Self {
        Self {
            kind,
            condition: Some(condition),
            body: Vec::new(),
            line,
        }
    }

    pub fn otherwise(line: usize) -> Self {
        Self {
            kind: BranchKind::Else,
            condition: None,
            body: Vec::new(),
            line,
        }
    }

    /// Whether this branch is taken. `else` always matches.
    pub fn matches(&self, symbols: &DefinedSymbols, unsupported: &mut Vec<String>) -> bool {
        match &self.condition {
            Some(condition) => condition.evaluate(symbols, unsupported),
            None => true,
        }
    }
}

/// An `if` ... `endif` construct
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveBlock {
    branches: Vec<Branch>,
}

impl DirectiveBlock {
    /// Build a block from branches in source order.
    ///
    /// Callers guarantee the block invariants; see the module docs of `ast`.
    pub(crate) fn new(branches: Vec<Branch>) -> Self {
        debug_assert!(branches
            .first()
            .is_some_and(|branch| branch.kind == BranchKind::If));
        debug_assert!(branches
            .iter()
            .rev()
            .skip(1)
            .all(|branch| branch.kind != BranchKind::Else));
        Self { branches }
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Line of the opening `if`
    pub fn line(&self) -> usize {
        self.branches.first().map_or(0, |branch| branch.line)
    }

    pub fn has_else(&self) -> bool {
        self.branches
            .last()
            .is_some_and(|branch| branch.kind == BranchKind::Else)
    }
}
