//! Condition expression tree and its evaluator

use crate::condtext::symbols::DefinedSymbols;
use serde::Serialize;
use std::fmt;

/// A parsed condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Expr {
    Identifier {
        name: String,
    },
    Not {
        operand: Box<Expr>,
    },
    And {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Or {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// A unary operator other than `!`; always evaluates to false
    Unsupported {
        operator: String,
        operand: Box<Expr>,
    },
}

impl Expr {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier { name: name.into() }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Expr) -> Self {
        Expr::Not {
            operand: Box::new(operand),
        }
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unsupported(operator: impl Into<String>, operand: Expr) -> Self {
        Expr::Unsupported {
            operator: operator.into(),
            operand: Box::new(operand),
        }
    }

    /// Evaluate against the defined symbols.
    ///
    /// Both sides of `&&`/`||` are always evaluated so that every unsupported operator in the
    /// condition is reported. Each one met is pushed onto `unsupported`.
    pub fn evaluate(&self, symbols: &DefinedSymbols, unsupported: &mut Vec<String>) -> bool {
        match self {
            Expr::Identifier { name } => symbols.is_defined(name),
            Expr::Not { operand } => !operand.evaluate(symbols, unsupported),
            Expr::And { left, right } => {
                let left = left.evaluate(symbols, unsupported);
                let right = right.evaluate(symbols, unsupported);
                left && right
            }
            Expr::Or { left, right } => {
                let left = left.evaluate(symbols, unsupported);
                let right = right.evaluate(symbols, unsupported);
                left || right
            }
            Expr::Unsupported { operator, .. } => {
                unsupported.push(operator.clone());
                false
            }
        }
    }

    /// Symbol names referenced anywhere in the condition, in source order
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_identifiers(&mut names);
        names
    }

    fn collect_identifiers<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Identifier { name } => names.push(name),
            Expr::Not { operand } | Expr::Unsupported { operand, .. } => {
                operand.collect_identifiers(names)
            }
            Expr::And { left, right } | Expr::Or { left, right } => {
                left.collect_identifiers(names);
                right.collect_identifiers(names);
            }
        }
    }

    /// Binding strength used to decide where parentheses are needed when printing
    fn precedence(&self) -> u8 {
        match self {
            Expr::Or { .. } => 1,
            Expr::And { .. } => 2,
            Expr::Not { .. } | Expr::Unsupported { .. } => 3,
            Expr::Identifier { .. } => 4,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        if self.precedence() < min_precedence {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier { name } => write!(f, "{}", name),
            Expr::Not { operand } => {
                write!(f, "!")?;
                operand.fmt_operand(f, 3)
            }
            Expr::Unsupported { operator, operand } => {
                write!(f, "{}", operator)?;
                operand.fmt_operand(f, 3)
            }
            Expr::And { left, right } => {
                left.fmt_operand(f, 2)?;
                write!(f, " && ")?;
                // left associative: a right operand at the same level needs parentheses
                right.fmt_operand(f, 3)
            }
            Expr::Or { left, right } => {
                left.fmt_operand(f, 1)?;
                write!(f, " || ")?;
                right.fmt_operand(f, 2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expr: &Expr, names: &[&str]) -> bool {
        let symbols = DefinedSymbols::from_iter(names.iter().copied());
        let mut unsupported = Vec::new();
        expr.evaluate(&symbols, &mut unsupported)
    }

    #[test]
    fn test_identifier_is_presence() {
        let expr = Expr::identifier("A");
        assert!(eval(&expr, &["A"]));
        assert!(!eval(&expr, &[]));
    }

    #[test]
    fn test_boolean_connectives() {
        let expr = Expr::and(Expr::identifier("A"), Expr::not(Expr::identifier("B")));
        assert!(eval(&expr, &["A"]));
        assert!(!eval(&expr, &["A", "B"]));
        assert!(!eval(&expr, &[]));

        let expr = Expr::or(Expr::identifier("A"), Expr::identifier("B"));
        assert!(eval(&expr, &["B"]));
        assert!(!eval(&expr, &["C"]));
    }

    #[test]
    fn test_unsupported_is_false_and_reported() {
        let expr = Expr::or(
            Expr::unsupported("-", Expr::identifier("A")),
            Expr::unsupported("~", Expr::identifier("B")),
        );
        let symbols = DefinedSymbols::from_iter(["A", "B"]);
        let mut unsupported = Vec::new();

        assert!(!expr.evaluate(&symbols, &mut unsupported));
        assert_eq!(unsupported, vec!["-".to_string(), "~".to_string()]);
    }

    #[test]
    fn test_negated_unsupported_is_true() {
        let expr = Expr::not(Expr::unsupported("+", Expr::identifier("A")));
        assert!(eval(&expr, &["A"]));
    }

    #[test]
    fn test_identifiers() {
        let expr = Expr::or(
            Expr::and(Expr::identifier("A"), Expr::not(Expr::identifier("B"))),
            Expr::identifier("C"),
        );
        assert_eq!(expr.identifiers(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_display_minimal_parentheses() {
        let expr = Expr::and(
            Expr::or(Expr::identifier("A"), Expr::identifier("B")),
            Expr::not(Expr::and(Expr::identifier("C"), Expr::identifier("D"))),
        );
        assert_eq!(expr.to_string(), "(A || B) && !(C && D)");

        let expr = Expr::or(
            Expr::identifier("A"),
            Expr::or(Expr::identifier("B"), Expr::identifier("C")),
        );
        assert_eq!(expr.to_string(), "A || (B || C)");
    }

    #[test]
    fn test_serializes_tagged() {
        let json = serde_json::to_value(Expr::not(Expr::identifier("A"))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "not", "operand": {"type": "identifier", "name": "A"}})
        );
    }
}
