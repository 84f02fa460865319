//! Recursive-descent parser for dimension arithmetic.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary ('*' unary)*
//! unary := ('+' | '-') unary | atom
//! atom  := INT | NAME | NAME '(' expr (',' expr)* ')' | '(' expr ')'
//! ```
//!
//! Anything else, including juxtaposition such as `2c`, is rejected.

use super::lexer::{tokenize, Token};
use super::{BinaryOp, Builtin, Expr, UnaryOp};
use crate::error::{DimCheckError, Result};

/// Parses `source` into an expression tree.
pub fn parse(source: &str) -> Result<Expr> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
    };
    let expr = parser.parse_expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(parser.unexpected(token.clone())),
    }
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        match self.next() {
            Some(ref t) if *t == expected => Ok(()),
            Some(other) => Err(self.unexpected(other)),
            None => Err(self.error(format!("expected '{}' but reached the end", expected))),
        }
    }

    fn error(&self, reason: impl Into<String>) -> DimCheckError {
        DimCheckError::invalid_expression(self.source, reason)
    }

    fn unexpected(&self, token: Token) -> DimCheckError {
        self.error(format!("unexpected token '{}'", token))
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.parse_term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;
        while self.eat(&Token::Star) {
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary(BinaryOp::Mul, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if self.eat(&Token::Minus) {
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary(UnaryOp::Neg, Box::new(operand)));
        }
        if self.eat(&Token::Plus) {
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary(UnaryOp::Pos, Box::new(operand)));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr> {
        match self.next() {
            Some(Token::Int(value)) => Ok(Expr::Int(value)),
            Some(Token::Ident(name)) => {
                if self.eat(&Token::LParen) {
                    self.parse_call(&name)
                } else {
                    Ok(Expr::Var(name))
                }
            }
            Some(Token::LParen) => {
                let inner = self.parse_expr()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(other) => Err(self.unexpected(other)),
            None => Err(self.error("unexpected end of expression")),
        }
    }

    fn parse_call(&mut self, name: &str) -> Result<Expr> {
        let builtin = Builtin::from_name(name)
            .ok_or_else(|| self.error(format!("function '{}' is not allowed", name)))?;

        let mut args = vec![self.parse_expr()?];
        while self.eat(&Token::Comma) {
            args.push(self.parse_expr()?);
        }
        self.expect(Token::RParen)?;

        if !builtin.accepts(args.len()) {
            return Err(self.error(format!(
                "function '{}' does not accept {} argument(s)",
                name,
                args.len()
            )));
        }
        Ok(Expr::Call(builtin, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Box<Expr> {
        Box::new(Expr::Var(name.to_string()))
    }

    #[test]
    fn test_precedence() {
        let expr = parse("2*c+1").unwrap();
        assert_eq!(
            expr,
            Expr::Binary(
                BinaryOp::Add,
                Box::new(Expr::Binary(BinaryOp::Mul, Box::new(Expr::Int(2)), var("c"))),
                Box::new(Expr::Int(1)),
            )
        );
    }

    #[test]
    fn test_left_associative_subtraction() {
        let expr = parse("a-b-c").unwrap();
        assert_eq!(
            expr,
            Expr::Binary(
                BinaryOp::Sub,
                Box::new(Expr::Binary(BinaryOp::Sub, var("a"), var("b"))),
                var("c"),
            )
        );
    }

    #[test]
    fn test_unary_and_parentheses() {
        let expr = parse("-(a+1)").unwrap();
        assert_eq!(
            expr,
            Expr::Unary(
                UnaryOp::Neg,
                Box::new(Expr::Binary(BinaryOp::Add, var("a"), Box::new(Expr::Int(1)))),
            )
        );
    }

    #[test]
    fn test_allowed_call() {
        let expr = parse("max(h, w)").unwrap();
        assert_eq!(
            expr,
            Expr::Call(Builtin::Max, vec![Expr::Var("h".into()), Expr::Var("w".into())])
        );
    }

    #[test]
    fn test_rejected_syntax() {
        for source in [
            "2c", "", "()", "a+", "*a", "(a", "a)", "a b", "a**2", "open(a)", "abs(a,b)", "max(a)",
            "a,b",
        ] {
            assert!(
                matches!(parse(source), Err(DimCheckError::InvalidExpression { .. })),
                "{:?} should be rejected",
                source
            );
        }
    }
}
