//! Token definitions for the goon grammar
//!
//! Tokens are produced by the logos derive macro. Spaces, tabs and carriage returns are
//! skipped; newlines and `;` terminate statements.

use logos::Logos;
use std::fmt;

/// All tokens of the goon expression language.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")]
pub enum Token<'src> {
    #[token("==")]
    Equals,
    #[token("!=")]
    NotEquals,
    #[token("=")]
    Assign,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("nil")]
    Nil,

    // Literals that overflow i64 fail to lex.
    #[regex("[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Number(i64),

    #[regex("[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice())]
    Ident(&'src str),

    #[token("\n")]
    #[token(";")]
    Terminator,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Equals => f.write_str("=="),
            Token::NotEquals => f.write_str("!="),
            Token::Assign => f.write_str("="),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::True => f.write_str("true"),
            Token::False => f.write_str("false"),
            Token::Nil => f.write_str("nil"),
            Token::Number(value) => write!(f, "{}", value),
            Token::Ident(name) => f.write_str(name),
            Token::Terminator => f.write_str("EOL"),
        }
    }
}

/// A byte range the lexer could not turn into a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected input {text:?} at byte {}", .span.start)]
pub struct LexError {
    pub span: logos::Span,
    pub text: String,
}

/// Tokenizes `source`, stopping at the first unlexable input.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(LexError {
                    span: lexer.span(),
                    text: lexer.slice().to_string(),
                })
            }
        }
    }

    Ok(tokens)
}
