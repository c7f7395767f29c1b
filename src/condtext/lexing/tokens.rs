//! Core token definitions for the line splitter
//!
//! The tokens are defined using the logos derive macro. Punctuation that can start or end a
//! comment is a token of its own; everything else collapses into `Whitespace` or `Text` runs.
//! Every input byte belongs to some token, so the token spans tile the source exactly.
use logos::Logos;
use serde::Serialize;
use std::ops::Range;

/// All tokens the line splitter works with
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Token {
    #[token("/")]
    Slash,
    #[token("*")]
    Star,
    #[token("#")]
    Hash,
    #[token("<")]
    LessThan,
    #[token(">")]
    GreaterThan,
    #[token("!")]
    Bang,
    #[token("-")]
    Dash,

    // Line breaks; a lone carriage return is ordinary text
    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"[^/*#<>!\- \t\r\n]+")]
    #[token("\r")]
    Text,
}

impl Token {
    pub fn is_newline(&self) -> bool {
        matches!(self, Token::Newline)
    }
}

/// Tokenize a whole document, keeping the byte range of every token
pub fn tokenize(source: &str) -> Vec<(Token, Range<usize>)> {
    Token::lexer(source)
        .spanned()
        .map(|(token, span)| (token.unwrap_or(Token::Text), span))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_block_directive_tokens() {
        assert_eq!(
            kinds("/*#if A*/"),
            vec![
                Token::Slash,
                Token::Star,
                Token::Hash,
                Token::Text,
                Token::Whitespace,
                Token::Text,
                Token::Star,
                Token::Slash,
            ]
        );
    }

    #[test]
    fn test_markup_directive_tokens() {
        assert_eq!(
            kinds("<!--#else-->"),
            vec![
                Token::LessThan,
                Token::Bang,
                Token::Dash,
                Token::Dash,
                Token::Hash,
                Token::Text,
                Token::Dash,
                Token::Dash,
                Token::GreaterThan,
            ]
        );
    }

    #[test]
    fn test_newlines() {
        assert_eq!(
            kinds("a\nb\r\nc"),
            vec![
                Token::Text,
                Token::Newline,
                Token::Text,
                Token::Newline,
                Token::Text,
            ]
        );
        let tokens = tokenize("a\r\nb");
        assert_eq!(tokens[1], (Token::Newline, 1..3));
    }

    #[test]
    fn test_lone_carriage_return_is_text() {
        assert_eq!(kinds("a\rb"), vec![Token::Text, Token::Text, Token::Text]);
    }

    #[test]
    fn test_spans_tile_source() {
        let source = "let x = a && !b; // <tag> « ünïcode »\n\t/** doc */";
        let tokens = tokenize(source);
        let mut expected_start = 0;
        for (_, span) in &tokens {
            assert_eq!(span.start, expected_start);
            expected_start = span.end;
        }
        assert_eq!(expected_start, source.len());
    }
}
