//! Token definitions for the tiny language

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token with location information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Variable name: any alphabetic word that is not reserved
    Name(String),
    /// Integer literal, sign included when written as `-7`
    Int(i64),
    Bool(bool),
    Keyword(Keyword),
}

/// Reserved words and punctuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    LeftParen,
    RightParen,
    Plus,
    Minus,
    Star,
    Slash,
    Less,
    AndAnd,
    OrOr,
    Bang,
    Equal,
    If,
    Then,
    Else,
    Let,
    In,
}

impl Keyword {
    /// Source text of the keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::LeftParen => "(",
            Keyword::RightParen => ")",
            Keyword::Plus => "+",
            Keyword::Minus => "-",
            Keyword::Star => "*",
            Keyword::Slash => "/",
            Keyword::Less => "<",
            Keyword::AndAnd => "&&",
            Keyword::OrOr => "||",
            Keyword::Bang => "!",
            Keyword::Equal => "=",
            Keyword::If => "if",
            Keyword::Then => "then",
            Keyword::Else => "else",
            Keyword::Let => "let",
            Keyword::In => "in",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Name(name) => write!(f, "{}", name),
            TokenKind::Int(value) => write!(f, "{}", value),
            TokenKind::Bool(value) => write!(f, "{}", value),
            TokenKind::Keyword(keyword) => write!(f, "{}", keyword),
        }
    }
}

/// Classify an alphabetic word. Reserved words never become names.
pub fn word_to_token(word: &str) -> TokenKind {
    match word {
        "true" => TokenKind::Bool(true),
        "false" => TokenKind::Bool(false),
        "if" => TokenKind::Keyword(Keyword::If),
        "then" => TokenKind::Keyword(Keyword::Then),
        "else" => TokenKind::Keyword(Keyword::Else),
        "let" => TokenKind::Keyword(Keyword::Let),
        "in" => TokenKind::Keyword(Keyword::In),
        _ => TokenKind::Name(word.to_string()),
    }
}
