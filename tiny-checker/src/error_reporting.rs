//! Type errors reported by inference

use crate::{constraints::Origin, types::GroundType};
use thiserror::Error;
use tiny_parser::Span;

pub type Result<T> = std::result::Result<T, TypeError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Two different ground types were forced into one class
    #[error("Type error: cannot unify {left} and {right} ({origin})")]
    Mismatch {
        left: GroundType,
        right: GroundType,
        origin: Origin,
        span: Span,
    },

    /// A node reached constraint generation without a type variable
    #[error("Internal error: expression at {span} was never numbered")]
    Unnumbered { span: Span },
}

impl TypeError {
    pub fn span(&self) -> Span {
        match self {
            TypeError::Mismatch { span, .. } | TypeError::Unnumbered { span } => *span,
        }
    }

    /// Both ground types of a mismatch, in the order they met
    pub fn conflicting_types(&self) -> Option<(GroundType, GroundType)> {
        match self {
            TypeError::Mismatch { left, right, .. } => Some((*left, *right)),
            TypeError::Unnumbered { .. } => None,
        }
    }
}
