//! Fully parenthesized rendering of expressions
//!
//! The output is valid parser input, so printing a parsed tree and parsing
//! it again reproduces the same tree shape.

use crate::ast::{Expr, ExprKind};
use std::fmt;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Var(name) => write!(f, "{}", name),
            ExprKind::Int(value) => write!(f, "{}", value),
            ExprKind::Bool(value) => write!(f, "{}", value),
            ExprKind::Binary { op, left, right } => {
                write!(f, "({} {} {})", op.symbol(), left, right)
            }
            ExprKind::Not(operand) => write!(f, "(! {})", operand),
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => write!(
                f,
                "(if {} then {} else {})",
                condition, then_branch, else_branch
            ),
            ExprKind::Let { name, value, body } => {
                write!(f, "(let {} = {} in {})", name, value, body)
            }
        }
    }
}
