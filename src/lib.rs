//! tiny Language
//!
//! Line-at-a-time front end for the tiny expression language. Each line is
//! lexed, parsed into one expression, type checked by constraint solving
//! and, optionally, evaluated.

pub mod pipeline;

pub use pipeline::{LineOutput, Pipeline, PipelineOptions, PipelineStage, StageTimings};

pub use tiny_checker::{InferenceResult, Type, TypeError, VarBinding};
pub use tiny_eval::{EvalError, Value};
pub use tiny_parser::{Expr, ParseError, Span};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Process one line of input with the given options
pub fn process_line(line: &str, options: &PipelineOptions) -> Result<LineOutput> {
    Pipeline::new(options.clone()).run(line)
}

/// Any failure of a single line. None of them end the session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Type(#[from] TypeError),

    #[error("{0}")]
    Eval(#[from] EvalError),
}

/// Diagnostic category of a pipeline error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Type,
    Evaluation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Type => write!(f, "type error"),
            ErrorKind::Evaluation => write!(f, "evaluation error"),
        }
    }
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Parse(error) if error.is_lexical() => ErrorKind::Lexical,
            PipelineError::Parse(_) => ErrorKind::Syntax,
            PipelineError::Type(_) => ErrorKind::Type,
            PipelineError::Eval(_) => ErrorKind::Evaluation,
        }
    }

    /// Source location the error points at
    pub fn span(&self) -> Span {
        match self {
            PipelineError::Parse(error) => error.span(),
            PipelineError::Type(error) => error.span(),
            PipelineError::Eval(error) => error.span(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let options = PipelineOptions::default();
        let kind = |line: &str| process_line(line, &options).unwrap_err().kind();

        assert_eq!(kind("(- x @)"), ErrorKind::Lexical);
        assert_eq!(kind("(- x"), ErrorKind::Syntax);
        assert_eq!(kind("(! 1)"), ErrorKind::Type);
        assert_eq!(kind("(/ 1 0)"), ErrorKind::Evaluation);
    }

    #[test]
    fn test_error_span_points_into_line() {
        let error = process_line("(+ 1 $)", &PipelineOptions::default()).unwrap_err();
        assert_eq!(error.span(), Span::new(5, 6));
        assert_eq!(error.kind().to_string(), "lexical error");
    }
}
