//! Tokenizer for dimension arithmetic.

use crate::error::{DimCheckError, Result};
use std::fmt;

/// A lexical token of a dimension expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Int(i64),
    Ident(String),
    Plus,
    Minus,
    Star,
    LParen,
    RParen,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Int(n) => write!(f, "{}", n),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
        }
    }
}

/// Splits `source` into tokens. Whitespace separates tokens and is
/// otherwise ignored; any character outside the grammar is rejected.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c.is_ascii_digit() {
            let mut end = start;
            while let Some(&(i, d)) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                end = i + d.len_utf8();
                chars.next();
            }
            let literal = &source[start..end];
            let value = literal.parse::<i64>().map_err(|_| {
                DimCheckError::invalid_expression(source, format!("integer literal {} is too large", literal))
            })?;
            tokens.push(Token::Int(value));
            continue;
        }

        if c.is_alphabetic() {
            let mut name = String::new();
            while let Some(&(_, l)) = chars.peek() {
                if !l.is_alphabetic() {
                    break;
                }
                name.push(l);
                chars.next();
            }
            tokens.push(Token::Ident(name));
            continue;
        }

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            other => {
                return Err(DimCheckError::invalid_expression(
                    source,
                    format!("unsupported character '{}'", other),
                ))
            }
        };
        tokens.push(token);
        chars.next();
    }

    Ok(tokens)
}
