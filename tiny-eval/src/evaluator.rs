//! Structural evaluation of expression trees
//!
//! Assumes the tree already passed type checking. Ill-typed input is still
//! reported as an error rather than a panic.

use crate::{
    error::{EvalError, Result},
    value::Value,
};
use tiny_parser::{BinaryOp, Expr, ExprKind, Span};
use tracing::trace;

/// Tree-walking evaluator with a stack of `let` bindings
#[derive(Debug, Default)]
pub struct Evaluator {
    bindings: Vec<(String, Value)>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match &expr.kind {
            ExprKind::Var(name) => self.lookup(name).ok_or_else(|| EvalError::UnboundVariable {
                name: name.clone(),
                span: expr.span,
            }),
            ExprKind::Int(value) => Ok(Value::Int(*value)),
            ExprKind::Bool(value) => Ok(Value::Bool(*value)),
            ExprKind::Binary { op, left, right } => match op {
                BinaryOp::And => {
                    if !self.evaluate_bool(left)? {
                        return Ok(Value::Bool(false));
                    }
                    self.evaluate_bool(right).map(Value::Bool)
                }
                BinaryOp::Or => {
                    if self.evaluate_bool(left)? {
                        return Ok(Value::Bool(true));
                    }
                    self.evaluate_bool(right).map(Value::Bool)
                }
                _ => {
                    let lhs = self.evaluate_int(left)?;
                    let rhs = self.evaluate_int(right)?;
                    arithmetic(*op, lhs, rhs, expr.span)
                }
            },
            ExprKind::Not(operand) => Ok(Value::Bool(!self.evaluate_bool(operand)?)),
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate_bool(condition)? {
                    self.evaluate(then_branch)
                } else {
                    self.evaluate(else_branch)
                }
            }
            ExprKind::Let { name, value, body } => {
                let name = name.as_var().ok_or(EvalError::TypeMismatch {
                    expected: "variable name",
                    found: "expression",
                    span: name.span,
                })?;
                let bound = self.evaluate(value)?;
                trace!(name, value = %bound, "bind");

                self.bindings.push((name.to_string(), bound));
                let result = self.evaluate(body);
                self.bindings.pop();
                result
            }
        }
    }

    /// Innermost binding of `name`
    fn lookup(&self, name: &str) -> Option<Value> {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| bound == name)
            .map(|(_, value)| *value)
    }

    fn evaluate_int(&mut self, expr: &Expr) -> Result<i64> {
        let value = self.evaluate(expr)?;
        value.as_int().ok_or(EvalError::TypeMismatch {
            expected: "INT",
            found: value.type_name(),
            span: expr.span,
        })
    }

    fn evaluate_bool(&mut self, expr: &Expr) -> Result<bool> {
        let value = self.evaluate(expr)?;
        value.as_bool().ok_or(EvalError::TypeMismatch {
            expected: "BOOL",
            found: value.type_name(),
            span: expr.span,
        })
    }
}

fn arithmetic(op: BinaryOp, lhs: i64, rhs: i64, span: Span) -> Result<Value> {
    let overflow = || EvalError::Overflow {
        operator: op.symbol(),
        span,
    };

    match op {
        BinaryOp::Add => lhs.checked_add(rhs).map(Value::Int).ok_or_else(overflow),
        BinaryOp::Sub => lhs.checked_sub(rhs).map(Value::Int).ok_or_else(overflow),
        BinaryOp::Mul => lhs.checked_mul(rhs).map(Value::Int).ok_or_else(overflow),
        BinaryOp::Div if rhs == 0 => Err(EvalError::DivisionByZero { span }),
        BinaryOp::Div => lhs.checked_div(rhs).map(Value::Int).ok_or_else(overflow),
        BinaryOp::Lt => Ok(Value::Bool(lhs < rhs)),
        BinaryOp::And | BinaryOp::Or => Err(EvalError::TypeMismatch {
            expected: "INT",
            found: "BOOL",
            span,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_parser::parse_source;

    fn eval(source: &str) -> Result<Value> {
        let expr = parse_source(source).expect("parse should succeed");
        Evaluator::new().evaluate(&expr)
    }

    #[test]
    fn test_literals() {
        assert_eq!(eval("3"), Ok(Value::Int(3)));
        assert_eq!(eval("-3"), Ok(Value::Int(-3)));
        assert_eq!(eval("true"), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("(- 10 4)"), Ok(Value::Int(6)));
        assert_eq!(eval("(+ 10 4)"), Ok(Value::Int(14)));
        assert_eq!(eval("(* -3 4)"), Ok(Value::Int(-12)));
        assert_eq!(eval("(/ 7 2)"), Ok(Value::Int(3)));
        assert_eq!(eval("(/ -7 2)"), Ok(Value::Int(-3)));
        assert_eq!(eval("(< 1 2)"), Ok(Value::Bool(true)));
        assert_eq!(eval("(< 2 2)"), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_let_and_if() {
        assert_eq!(eval("( let x = 1 in ( < x 2 ) )"), Ok(Value::Bool(true)));
        assert_eq!(
            eval("(let n = 5 in (if (< n 0) then (- 0 n) else n))"),
            Ok(Value::Int(5))
        );
    }

    #[test]
    fn test_inner_binding_wins_and_is_released() {
        assert_eq!(
            eval("(let x = 1 in (+ (let x = 10 in x) x))"),
            Ok(Value::Int(11))
        );
    }

    #[test]
    fn test_logic_short_circuits() {
        assert_eq!(eval("(&& false (< (/ 1 0) 1))"), Ok(Value::Bool(false)));
        assert_eq!(eval("(|| true (< (/ 1 0) 1))"), Ok(Value::Bool(true)));
        assert_eq!(eval("(! (|| false false))"), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_only_chosen_branch_runs() {
        assert_eq!(eval("(if true then 1 else (/ 1 0))"), Ok(Value::Int(1)));
    }

    #[test]
    fn test_runtime_errors() {
        assert!(matches!(eval("(/ 1 0)"), Err(EvalError::DivisionByZero { .. })));
        assert!(matches!(
            eval("(* 9223372036854775807 2)"),
            Err(EvalError::Overflow { operator: "*", .. })
        ));
        assert!(matches!(
            eval("(/ -9223372036854775808 -1)"),
            Err(EvalError::Overflow { operator: "/", .. })
        ));
        assert_eq!(
            eval("(- y 1)"),
            Err(EvalError::UnboundVariable {
                name: "y".to_string(),
                span: Span::new(3, 4),
            })
        );
    }

    #[test]
    fn test_ill_typed_tree_is_an_error() {
        assert!(matches!(
            eval("(+ true 1)"),
            Err(EvalError::TypeMismatch { expected: "INT", found: "BOOL", .. })
        ));
    }
}
