//! Hindley-Milner style inference for the tiny language
//!
//! Inference runs in four passes over one expression:
//! 1. numbering: every node gets a type variable in pre-order, with all
//!    occurrences of a name sharing the variable of its first occurrence
//! 2. constraint generation: the equalities of each construct's typing rule
//! 3. solving: union-find unification against INT and BOOL
//! 4. reporting: every distinct name resolved to a type

use crate::{
    constraints::{ConstraintSet, ConstraintSolver, Origin},
    error_reporting::{Result, TypeError},
    types::{GroundType, Type},
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tiny_parser::{Expr, ExprKind, TypeVar};
use tracing::debug;

/// Resolved type of one variable name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarBinding {
    pub name: String,
    pub ty: Type,
    /// Every use of the name sits inside the body of a `let` binding it
    pub bound: bool,
}

/// Outcome of a successful inference run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceResult {
    /// Every distinct name in first-occurrence pre-order
    pub bindings: Vec<VarBinding>,
    /// Type of the whole expression
    pub expression_type: Type,
    pub var_count: usize,
    pub constraint_count: usize,
}

impl InferenceResult {
    /// Names with at least one use outside any `let` binding them, in
    /// first-occurrence order
    pub fn free_variables(&self) -> impl Iterator<Item = &VarBinding> {
        self.bindings.iter().filter(|binding| !binding.bound)
    }

    pub fn type_of(&self, name: &str) -> Option<Type> {
        self.bindings
            .iter()
            .find(|binding| binding.name == name)
            .map(|binding| binding.ty)
    }
}

/// Inference engine. Holds the per-run numbering state, which is reset at
/// the start of every `infer` call.
#[derive(Debug, Default)]
pub struct InferenceContext {
    next_var: usize,
    names: HashMap<String, TypeVar>,
}

impl InferenceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Infer types for `expr`, numbering its nodes in place
    pub fn infer(&mut self, expr: &mut Expr) -> Result<InferenceResult> {
        self.next_var = 0;
        self.names.clear();

        self.number(expr);

        let mut constraints = ConstraintSet::new();
        self.generate(expr, &mut constraints)?;

        let mut solver = ConstraintSolver::new(self.next_var);
        solver.solve(&constraints)?;

        let result = self.report(expr, &mut solver, constraints.len())?;
        debug!(
            vars = result.var_count,
            names = result.bindings.len(),
            ty = %result.expression_type,
            "inference finished"
        );
        Ok(result)
    }

    fn fresh_var(&mut self) -> TypeVar {
        let var = TypeVar(self.next_var);
        self.next_var += 1;
        var
    }

    /// Pre-order numbering. Names share one variable across the whole
    /// expression regardless of enclosing `let`s.
    fn number(&mut self, expr: &mut Expr) {
        let var = match &expr.kind {
            ExprKind::Var(name) => match self.names.get(name) {
                Some(var) => *var,
                None => {
                    let var = self.fresh_var();
                    self.names.insert(name.clone(), var);
                    var
                }
            },
            _ => self.fresh_var(),
        };
        expr.type_var = Some(var);

        for child in expr.children_mut() {
            self.number(child);
        }
    }

    /// Emit the typing rule of every node, children before their parent,
    /// so a conflict between subexpressions surfaces at the construct
    /// that joins them
    fn generate(&self, expr: &Expr, constraints: &mut ConstraintSet) -> Result<()> {
        for child in expr.children() {
            self.generate(child, constraints)?;
        }

        let this = var_of(expr)?;
        let span = expr.span;

        match &expr.kind {
            ExprKind::Var(_) => {}
            ExprKind::Int(_) => constraints.equal(this, GroundType::Int, Origin::Literal, span),
            ExprKind::Bool(_) => constraints.equal(this, GroundType::Bool, Origin::Literal, span),
            ExprKind::Binary { op, left, right } => {
                let operand = if op.takes_integers() {
                    GroundType::Int
                } else {
                    GroundType::Bool
                };
                let result = if op.yields_integer() {
                    GroundType::Int
                } else {
                    GroundType::Bool
                };
                constraints.equal(this, result, Origin::OperatorResult(*op), span);
                constraints.equal(var_of(left)?, operand, Origin::Operand(*op), left.span);
                constraints.equal(var_of(right)?, operand, Origin::Operand(*op), right.span);
            }
            ExprKind::Not(operand) => {
                constraints.equal(this, GroundType::Bool, Origin::NotResult, span);
                constraints.equal(var_of(operand)?, GroundType::Bool, Origin::NotOperand, operand.span);
            }
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                constraints.equal(this, var_of(then_branch)?, Origin::IfResult, span);
                constraints.equal(var_of(condition)?, GroundType::Bool, Origin::IfCondition, condition.span);
                constraints.equal(var_of(then_branch)?, var_of(else_branch)?, Origin::IfBranches, span);
            }
            ExprKind::Let { name, value, body } => {
                constraints.equal(this, var_of(body)?, Origin::LetResult, span);
                constraints.equal(var_of(name)?, var_of(value)?, Origin::LetBinding, value.span);
            }
        }
        Ok(())
    }

    /// Resolve every distinct name in first-occurrence pre-order
    fn report(
        &self,
        expr: &Expr,
        solver: &mut ConstraintSolver,
        constraint_count: usize,
    ) -> Result<InferenceResult> {
        let mut free = HashSet::new();
        collect_free(expr, &mut Vec::new(), &mut free);

        let mut bindings = Vec::new();
        let mut seen = HashSet::new();
        self.collect_bindings(expr, solver, &free, &mut seen, &mut bindings)?;

        Ok(InferenceResult {
            bindings,
            expression_type: solver.resolve(var_of(expr)?),
            var_count: solver.var_count(),
            constraint_count,
        })
    }

    fn collect_bindings(
        &self,
        expr: &Expr,
        solver: &mut ConstraintSolver,
        free: &HashSet<String>,
        seen: &mut HashSet<String>,
        bindings: &mut Vec<VarBinding>,
    ) -> Result<()> {
        if let ExprKind::Var(name) = &expr.kind {
            if seen.insert(name.clone()) {
                bindings.push(VarBinding {
                    name: name.clone(),
                    ty: solver.resolve(var_of(expr)?),
                    bound: !free.contains(name),
                });
            }
        }

        for child in expr.children() {
            self.collect_bindings(child, solver, free, seen, bindings)?;
        }
        Ok(())
    }
}

/// Names used outside the scope of every `let` binding them. A `let` scopes
/// its name over the body only, so `(let x = x in x)` uses `x` freely.
fn collect_free(expr: &Expr, scope: &mut Vec<String>, free: &mut HashSet<String>) {
    match &expr.kind {
        ExprKind::Var(name) => {
            if !scope.contains(name) {
                free.insert(name.clone());
            }
        }
        ExprKind::Let { name, value, body } => {
            collect_free(value, scope, free);
            match name.as_var() {
                Some(name) => {
                    scope.push(name.to_string());
                    collect_free(body, scope, free);
                    scope.pop();
                }
                None => collect_free(body, scope, free),
            }
        }
        _ => {
            for child in expr.children() {
                collect_free(child, scope, free);
            }
        }
    }
}

fn var_of(expr: &Expr) -> Result<TypeVar> {
    expr.type_var
        .ok_or(TypeError::Unnumbered { span: expr.span })
}
