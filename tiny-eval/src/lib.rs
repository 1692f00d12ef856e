//! tiny Language Evaluator
//!
//! Evaluates type-checked expression trees to integer or boolean values.

pub mod error;
pub mod evaluator;
pub mod value;

pub use error::{EvalError, Result};
pub use evaluator::Evaluator;
pub use value::Value;

use tiny_parser::Expr;

/// Evaluate a type-checked expression
pub fn evaluate(expr: &Expr) -> Result<Value> {
    Evaluator::new().evaluate(expr)
}
