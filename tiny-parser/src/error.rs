//! Lexer and parser error types

use crate::span::Span;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Lexer error: unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("Lexer error: digit '{ch}' at position {position} where none is expected")]
    UnexpectedDigit { ch: char, position: usize },

    #[error("Lexer error: letter '{ch}' at position {position} directly after a number")]
    UnexpectedLetter { ch: char, position: usize },

    #[error("Lexer error: integer literal {literal} is out of range")]
    IntegerOutOfRange { literal: String, span: Span },

    #[error("Syntax error: unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String, position: usize },

    #[error("Syntax error: expected {expected}, found '{found}'")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Syntax error: let must bind a variable name, found '{found}'")]
    LetRequiresName { found: String, span: Span },

    #[error("Syntax error: expression nested more than {limit} levels deep")]
    NestingTooDeep { limit: usize, span: Span },

    #[error("Syntax error: unexpected '{found}' after a complete expression")]
    TrailingInput { found: String, span: Span },
}

impl ParseError {
    pub fn unexpected_token(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    pub fn unexpected_eof(expected: impl Into<String>, position: usize) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
            position,
        }
    }

    /// Get the span associated with this error
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedChar { ch, position }
            | Self::UnexpectedDigit { ch, position }
            | Self::UnexpectedLetter { ch, position } => {
                Span::new(*position, position + ch.len_utf8())
            }
            Self::UnexpectedEof { position, .. } => Span::point(*position),
            Self::IntegerOutOfRange { span, .. }
            | Self::UnexpectedToken { span, .. }
            | Self::LetRequiresName { span, .. }
            | Self::NestingTooDeep { span, .. }
            | Self::TrailingInput { span, .. } => *span,
        }
    }

    /// True for errors raised while tokenizing, false for grammar errors
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedChar { .. }
                | Self::UnexpectedDigit { .. }
                | Self::UnexpectedLetter { .. }
                | Self::IntegerOutOfRange { .. }
        )
    }
}

/// Render `source` with a caret line pointing at `span`
pub fn format_span_context(source: &str, span: Span) -> String {
    let column = source
        .get(..span.start.min(source.len()))
        .map(|prefix| prefix.chars().count())
        .unwrap_or(0);
    let width = source
        .get(span.start.min(source.len())..span.end.min(source.len()))
        .map(|text| text.chars().count())
        .unwrap_or(0)
        .max(1);

    format!("  {}\n  {}{}", source, " ".repeat(column), "^".repeat(width))
}
