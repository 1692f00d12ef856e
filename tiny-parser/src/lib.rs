//! tiny Language Parser
//!
//! This crate provides lexical analysis and parsing for the tiny expression
//! language: one line of text becomes a token sequence and then a single
//! expression tree.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod span;
pub mod token;

// Re-export core types
pub use ast::*;
pub use error::{format_span_context, ParseError, Result};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, Parser, MAX_NESTING};
pub use span::Span;
pub use token::{Keyword, Token, TokenKind};

/// Lex and parse one line of source text
pub fn parse_source(source: &str) -> Result<Expr> {
    Parser::from_source(source)?.parse()
}
