//! tiny Language Type Checker
//!
//! This crate infers the types of tiny expressions: nodes are numbered into
//! type variables, each construct contributes equality constraints, and a
//! union-find solver unifies them against the ground types INT and BOOL.

pub mod constraints;
pub mod error_reporting;
pub mod inference;
pub mod types;
pub mod union_find;

// Re-export core types
pub use constraints::{Constraint, ConstraintSet, ConstraintSolver, Origin, Term};
pub use error_reporting::{Result, TypeError};
pub use inference::{InferenceContext, InferenceResult, VarBinding};
pub use types::{GroundType, Type};
pub use union_find::UnionFind;

use tiny_parser::Expr;

/// Type check an expression, numbering its nodes in place
pub fn type_check(expr: &mut Expr) -> Result<InferenceResult> {
    InferenceContext::new().infer(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_parser::parse_source;

    #[test]
    fn test_basic_type_checking() {
        let mut expr = parse_source("(* x (- y 2))").unwrap();
        let result = type_check(&mut expr).unwrap();
        assert_eq!(result.type_of("x"), Some(Type::INT));
        assert_eq!(result.type_of("y"), Some(Type::INT));
        assert!(expr.type_var.is_some());
    }

    #[test]
    fn test_type_error_is_returned_not_raised() {
        let mut expr = parse_source("(+ true 1)").unwrap();
        let error = type_check(&mut expr).unwrap_err();
        assert_eq!(error.conflicting_types(), Some((GroundType::Bool, GroundType::Int)));
    }
}
