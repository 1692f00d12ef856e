//! Evaluation errors

use thiserror::Error;
use tiny_parser::Span;

pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Evaluation error: unbound variable '{name}'")]
    UnboundVariable { name: String, span: Span },

    #[error("Evaluation error: division by zero")]
    DivisionByZero { span: Span },

    #[error("Evaluation error: integer overflow in '{operator}'")]
    Overflow { operator: &'static str, span: Span },

    #[error("Evaluation error: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },
}

impl EvalError {
    pub fn span(&self) -> Span {
        match self {
            EvalError::UnboundVariable { span, .. }
            | EvalError::DivisionByZero { span }
            | EvalError::Overflow { span, .. }
            | EvalError::TypeMismatch { span, .. } => *span,
        }
    }
}
