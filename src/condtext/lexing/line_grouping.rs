//! Line grouping
//!
//! Groups the flat token stream into physical lines. Newline tokens end a line and are not
//! part of it. A document always has at least one line (possibly empty), and a trailing
//! Newline produces a final empty line.

use super::tokens::Token;
use std::ops::Range;

/// A physical line of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number
    pub number: usize,
    /// Byte range of the line content, terminator excluded
    pub range: Range<usize>,
    pub tokens: Vec<(Token, Range<usize>)>,
}

impl Line {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }
}

pub fn group_lines(tokens: Vec<(Token, Range<usize>)>, source_len: usize) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = Vec::new();
    let mut start = 0;

    for (token, span) in tokens {
        if token.is_newline() {
            lines.push(Line {
                number: lines.len() + 1,
                range: start..span.start,
                tokens: std::mem::take(&mut current),
            });
            start = span.end;
        } else {
            current.push((token, span));
        }
    }

    lines.push(Line {
        number: lines.len() + 1,
        range: start..source_len,
        tokens: current,
    });

    lines
}
