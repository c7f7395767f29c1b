//! Line classification
//!
//!     Turns grouped lines into statements. A line is a directive when its tokens contain a
//!     comment opener immediately followed by `#` and a directive keyword. Everything else is
//!     plain content.
//!
//!     Openers:
//!         Block:  `/` `*`+ `#`
//!         Markup: `<` `!` `-` `-` `#`
//!     Closers:
//!         Block:  `*` `/`
//!         Markup: `-` `-` `>`
//!
//!     The keyword must end at a non-identifier character, so `#ifdef` or `#endifx` are not
//!     directives. Unknown keywords leave the line as content.

use super::line_grouping::Line;
use super::tokens::Token;
use crate::condtext::error::{ExpressionError, PreprocessError};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Which comment syntax a directive was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStyle {
    /// `/*# ... */`
    Block,
    /// `<!--# ... -->`
    Markup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveKind {
    If,
    Elif,
    Else,
    End,
}

impl DirectiveKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "if" => Some(DirectiveKind::If),
            "elif" | "elseif" => Some(DirectiveKind::Elif),
            "else" => Some(DirectiveKind::Else),
            "endif" => Some(DirectiveKind::End),
            _ => None,
        }
    }

    pub fn takes_condition(&self) -> bool {
        matches!(self, DirectiveKind::If | DirectiveKind::Elif)
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            DirectiveKind::If => "if",
            DirectiveKind::Elif => "elif",
            DirectiveKind::Else => "else",
            DirectiveKind::End => "endif",
        };
        write!(f, "{}", keyword)
    }
}

/// A recognized directive head or terminator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveMarker {
    pub kind: DirectiveKind,
    /// Condition text; only `if`/`elif` carry one
    pub expression: Option<String>,
    /// The full source text of the line(s) the directive occupies
    pub source_line: String,
    /// 1-based line of the opener
    pub line: usize,
    pub style: CommentStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Statement {
    PlainText { content: String, line: usize },
    Directive(DirectiveMarker),
}

impl Statement {
    pub fn line(&self) -> usize {
        match self {
            Statement::PlainText { line, .. } => *line,
            Statement::Directive(marker) => marker.line,
        }
    }

    /// Condition text of an `if`/`elif` statement
    pub fn expression(&self) -> Option<&str> {
        match self {
            Statement::Directive(marker) => marker.expression.as_deref(),
            Statement::PlainText { .. } => None,
        }
    }
}

/// Where a directive head was found within its line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DirectiveHead {
    style: CommentStyle,
    kind: DirectiveKind,
    /// Byte offset right after the keyword
    body_start: usize,
}

pub fn classify(source: &str, lines: &[Line]) -> Result<Vec<Statement>, PreprocessError> {
    let mut statements = Vec::with_capacity(lines.len());
    let mut index = 0;

    while index < lines.len() {
        let line = &lines[index];

        let Some(head) = find_directive_head(source, line) else {
            statements.push(Statement::PlainText {
                content: line.text(source).to_string(),
                line: line.number,
            });
            index += 1;
            continue;
        };

        if head.kind == DirectiveKind::End {
            statements.push(Statement::Directive(DirectiveMarker {
                kind: DirectiveKind::End,
                expression: None,
                source_line: line.text(source).to_string(),
                line: line.number,
                style: head.style,
            }));
            index += 1;
            continue;
        }

        let (closing_index, closer_start) =
            find_closer(source, lines, index, head.body_start, head.style).ok_or(
                PreprocessError::UnterminatedDirective { line: line.number },
            )?;

        let raw = condition_text(&source[head.body_start..closer_start], head.style);
        let expression = match (head.kind.takes_condition(), raw.is_empty()) {
            (true, true) => None,
            (true, false) => Some(raw.to_string()),
            (false, true) => None,
            (false, false) => {
                return Err(PreprocessError::Expression {
                    line: line.number,
                    source: ExpressionError::UnexpectedCondition(raw.to_string()),
                })
            }
        };

        statements.push(Statement::Directive(DirectiveMarker {
            kind: head.kind,
            expression,
            source_line: source[line.range.start..lines[closing_index].range.end].to_string(),
            line: line.number,
            style: head.style,
        }));
        index = closing_index + 1;
    }

    Ok(statements)
}

/// Trim the text between keyword and closer down to the condition
fn condition_text(raw: &str, style: CommentStyle) -> &str {
    match style {
        // `/**#if A**/` leaves a run of stars before the closer
        CommentStyle::Block => raw.trim().trim_end_matches('*').trim_end(),
        CommentStyle::Markup => raw.trim(),
    }
}

fn find_directive_head(source: &str, line: &Line) -> Option<DirectiveHead> {
    let tokens = &line.tokens;

    for start in 0..tokens.len() {
        let Some((style, hash_end)) = match_opener(tokens, start) else {
            continue;
        };

        let rest = &source[hash_end..line.range.end];
        let keyword_len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let keyword = &rest[..keyword_len];
        let boundary = rest[keyword_len..]
            .chars()
            .next()
            .map_or(true, |c| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'));

        if let (Some(kind), true) = (DirectiveKind::from_keyword(keyword), boundary) {
            return Some(DirectiveHead {
                style,
                kind,
                body_start: hash_end + keyword_len,
            });
        }
    }

    None
}

/// Match an opener starting at `start`, returning its style and the byte offset after `#`
fn match_opener(tokens: &[(Token, Range<usize>)], start: usize) -> Option<(CommentStyle, usize)> {
    let kind_at = |i: usize| tokens.get(i).map(|(t, _)| *t);

    match kind_at(start)? {
        Token::Slash => {
            let mut i = start + 1;
            while kind_at(i) == Some(Token::Star) {
                i += 1;
            }
            if i > start + 1 && kind_at(i) == Some(Token::Hash) {
                return Some((CommentStyle::Block, tokens[i].1.end));
            }
            None
        }
        Token::LessThan => {
            let expected = [Token::Bang, Token::Dash, Token::Dash, Token::Hash];
            let matches = expected
                .iter()
                .enumerate()
                .all(|(offset, t)| kind_at(start + 1 + offset) == Some(*t));
            matches.then(|| (CommentStyle::Markup, tokens[start + 4].1.end))
        }
        _ => None,
    }
}

/// Find the closer for a head, searching the rest of its line and then the following lines.
/// Returns the index of the closing line and the byte offset where the closer starts.
///
/// The search gives up at the next line holding a directive head of its own, so a head with a
/// missing or mismatched closer never swallows the directive after it.
fn find_closer(
    source: &str,
    lines: &[Line],
    line_index: usize,
    body_start: usize,
    style: CommentStyle,
) -> Option<(usize, usize)> {
    let pattern: &[Token] = match style {
        CommentStyle::Block => &[Token::Star, Token::Slash],
        CommentStyle::Markup => &[Token::Dash, Token::Dash, Token::GreaterThan],
    };

    for (index, line) in lines.iter().enumerate().skip(line_index) {
        if index > line_index && find_directive_head(source, line).is_some() {
            return None;
        }
        let tokens = &line.tokens;
        for start in 0..tokens.len() {
            if tokens[start].1.start < body_start {
                continue;
            }
            let found = pattern
                .iter()
                .enumerate()
                .all(|(offset, t)| tokens.get(start + offset).map(|(k, _)| k) == Some(t));
            if found {
                return Some((index, tokens[start].1.start));
            }
        }
    }

    None
}
