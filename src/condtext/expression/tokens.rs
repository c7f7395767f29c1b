//! Condition tokens
//!
//! Besides the tokens the grammar accepts, the lexer recognizes literals and the usual
//! operator spellings so that a condition like `A == 1` fails with a precise message instead
//! of an "unexpected character" at the first `=`.
use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum ExprToken {
    #[token("!")]
    Bang,
    #[token("&&")]
    And,
    #[token("||")]
    Or,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Not part of the grammar
    #[regex(r"[0-9][A-Za-z0-9_.]*", |lex| lex.slice().to_string())]
    Number(String),
    #[regex(r#""[^"]*""#, |lex| lex.slice().to_string())]
    #[regex(r#"'[^']*'"#, |lex| lex.slice().to_string())]
    Str(String),
    #[regex(r"===|!==|==|!=|<=|>=|<<|>>|[<>=+\-*/%&|^~?:,.\[\]{}]", |lex| lex.slice().to_string())]
    Operator(String),
}

impl fmt::Display for ExprToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprToken::Bang => write!(f, "`!`"),
            ExprToken::And => write!(f, "`&&`"),
            ExprToken::Or => write!(f, "`||`"),
            ExprToken::OpenParen => write!(f, "`(`"),
            ExprToken::CloseParen => write!(f, "`)`"),
            ExprToken::Identifier(name) => write!(f, "symbol `{}`", name),
            ExprToken::Number(text) | ExprToken::Str(text) => write!(f, "literal `{}`", text),
            ExprToken::Operator(op) => write!(f, "operator `{}`", op),
        }
    }
}
