//! Error types for preprocessing

use crate::condtext::ast::BranchKind;
use thiserror::Error;

/// Errors raised while parsing a single condition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("missing condition")]
    Empty,

    #[error("`else` does not take a condition, found `{0}`")]
    UnexpectedCondition(String),

    #[error("invalid condition `{condition}` at offset {offset}: {message}")]
    Syntax {
        condition: String,
        offset: usize,
        message: String,
    },
}

/// Errors that abort a preprocessing run. No partial output is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreprocessError {
    #[error("line {line}: `endif` without a matching `if`")]
    UnmatchedEnd { line: usize },

    #[error("line {line}: `{kind}` without a matching `if`")]
    OrphanBranch { kind: BranchKind, line: usize },

    #[error("line {line}: `{kind}` after `else` in the same block")]
    BranchAfterElse { kind: BranchKind, line: usize },

    #[error("line {line}: `if` is never closed by `endif`")]
    UnterminatedBlock { line: usize },

    #[error("line {line}: directive comment is never closed")]
    UnterminatedDirective { line: usize },

    #[error("line {line}: blocks nested deeper than {limit} levels")]
    NestingTooDeep { line: usize, limit: usize },

    #[error("line {line}: {source}")]
    Expression {
        line: usize,
        #[source]
        source: ExpressionError,
    },

    #[error("line {line}: unsupported unary operator `{operator}`")]
    UnsupportedOperator { line: usize, operator: String },
}

impl PreprocessError {
    /// 1-based line of the directive that caused the error
    pub fn line(&self) -> usize {
        match self {
            PreprocessError::UnmatchedEnd { line }
            | PreprocessError::OrphanBranch { line, .. }
            | PreprocessError::BranchAfterElse { line, .. }
            | PreprocessError::UnterminatedBlock { line }
            | PreprocessError::UnterminatedDirective { line }
            | PreprocessError::NestingTooDeep { line, .. }
            | PreprocessError::Expression { line, .. }
            | PreprocessError::UnsupportedOperator { line, .. } => *line,
        }
    }

    /// True for nesting errors, false for condition errors
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            PreprocessError::Expression { .. } | PreprocessError::UnsupportedOperator { .. }
        )
    }
}
