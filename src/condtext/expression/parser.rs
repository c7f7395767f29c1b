//! Condition parser
//!
//! The condition is tokenized with logos and the `(token, byte span)` pairs are fed to a
//! chumsky parser as a stream, so parser errors point at byte offsets in the condition text.

use chumsky::error::SimpleReason;
use chumsky::prelude::*;
use chumsky::Stream;
use logos::Logos;

use super::expr::Expr;
use super::tokens::ExprToken;
use crate::condtext::error::ExpressionError;

/// Type alias for parser error
type ParserError = Simple<ExprToken>;

/// Unary operators that parse but are not supported
const UNSUPPORTED_UNARY_OPERATORS: &[&str] = &["-", "+", "~"];

/// Parse the text of an `if`/`elif` condition
pub fn parse_condition(condition: &str) -> Result<Expr, ExpressionError> {
    if condition.trim().is_empty() {
        return Err(ExpressionError::Empty);
    }

    let mut tokens = Vec::new();
    for (token, span) in ExprToken::lexer(condition).spanned() {
        match token {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                return Err(ExpressionError::Syntax {
                    condition: condition.to_string(),
                    offset: span.start,
                    message: format!("unexpected character `{}`", &condition[span]),
                })
            }
        }
    }

    let eoi = condition.len()..condition.len();
    condition_parser()
        .parse(Stream::from_iter(eoi, tokens.into_iter()))
        .map_err(|errors| match errors.into_iter().next() {
            Some(error) => syntax_error(condition, error),
            None => ExpressionError::Syntax {
                condition: condition.to_string(),
                offset: 0,
                message: "invalid condition".to_string(),
            },
        })
}

fn condition_parser() -> impl Parser<ExprToken, Expr, Error = ParserError> {
    recursive(|expr| {
        let identifier = filter_map(|span, token: ExprToken| match token {
            ExprToken::Identifier(name) => Ok(Expr::identifier(name)),
            other => Err(ParserError::custom(
                span,
                format!("expected a symbol name, found {}", other),
            )),
        });

        let group = expr.delimited_by(just(ExprToken::OpenParen), just(ExprToken::CloseParen));

        // `None` is `!`, `Some(op)` an unsupported operator
        let prefix = filter_map(|span, token: ExprToken| match token {
            ExprToken::Bang => Ok(None),
            ExprToken::Operator(op) if UNSUPPORTED_UNARY_OPERATORS.contains(&op.as_str()) => {
                Ok(Some(op))
            }
            other => Err(ParserError::custom(
                span,
                format!("expected a unary operator, found {}", other),
            )),
        });

        let unary = prefix
            .repeated()
            .then(identifier.or(group))
            .foldr(|operator, operand| match operator {
                None => Expr::not(operand),
                Some(operator) => Expr::unsupported(operator, operand),
            });

        let and = unary
            .clone()
            .then(just(ExprToken::And).ignore_then(unary).repeated())
            .foldl(Expr::and);

        and.clone()
            .then(just(ExprToken::Or).ignore_then(and).repeated())
            .foldl(Expr::or)
    })
    .then_ignore(end())
}

fn syntax_error(condition: &str, error: ParserError) -> ExpressionError {
    let message = match error.reason() {
        SimpleReason::Custom(message) => message.clone(),
        SimpleReason::Unclosed { delimiter, .. } => format!("unclosed {}", delimiter),
        SimpleReason::Unexpected => match error.found() {
            Some(token) => format!("unexpected {}", token),
            None => "unexpected end of condition".to_string(),
        },
    };

    ExpressionError::Syntax {
        condition: condition.to_string(),
        offset: error.span().start.min(condition.len()),
        message,
    }
}
