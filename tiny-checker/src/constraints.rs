//! Constraint generation targets and the union-find constraint solver
//!
//! Type variables occupy ids `0..K`; the ground types are two extra ids
//! appended after them, INT at `K` and BOOL at `K + 1`.

use crate::{
    error_reporting::{Result, TypeError},
    types::{GroundType, Type},
    union_find::UnionFind,
};
use std::fmt;
use tiny_parser::{BinaryOp, Span, TypeVar};
use tracing::{debug, trace};

/// One side of an equality constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    Var(TypeVar),
    Ground(GroundType),
}

impl From<TypeVar> for Term {
    fn from(var: TypeVar) -> Self {
        Term::Var(var)
    }
}

impl From<GroundType> for Term {
    fn from(ground: GroundType) -> Self {
        Term::Ground(ground)
    }
}

/// Typing rule a constraint was emitted for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Literal,
    OperatorResult(BinaryOp),
    Operand(BinaryOp),
    NotResult,
    NotOperand,
    IfResult,
    IfCondition,
    IfBranches,
    LetResult,
    LetBinding,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Literal => write!(f, "literal"),
            Origin::OperatorResult(op) => write!(f, "result of '{}'", op.symbol()),
            Origin::Operand(op) => write!(f, "operand of '{}'", op.symbol()),
            Origin::NotResult => write!(f, "result of '!'"),
            Origin::NotOperand => write!(f, "operand of '!'"),
            Origin::IfResult => write!(f, "result of 'if'"),
            Origin::IfCondition => write!(f, "condition of 'if'"),
            Origin::IfBranches => write!(f, "branches of 'if'"),
            Origin::LetResult => write!(f, "result of 'let'"),
            Origin::LetBinding => write!(f, "binding of 'let'"),
        }
    }
}

/// Unordered equality between two terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub left: Term,
    pub right: Term,
    pub origin: Origin,
    pub span: Span,
}

/// Constraints of one inference run, in emission order
#[derive(Debug, Default)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add equality constraint between two terms
    pub fn equal(&mut self, left: impl Into<Term>, right: impl Into<Term>, origin: Origin, span: Span) {
        self.constraints.push(Constraint {
            left: left.into(),
            right: right.into(),
            origin,
            span,
        });
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }
}

/// Solves equality constraints over `K` type variables plus the ground types
#[derive(Debug, Clone)]
pub struct ConstraintSolver {
    var_count: usize,
    sets: UnionFind,
}

impl ConstraintSolver {
    pub fn new(var_count: usize) -> Self {
        ConstraintSolver {
            var_count,
            sets: UnionFind::new(var_count + GroundType::ALL.len()),
        }
    }

    pub fn var_count(&self) -> usize {
        self.var_count
    }

    /// Union-find id of a term
    pub fn index(&self, term: Term) -> usize {
        match term {
            Term::Var(TypeVar(id)) => id,
            Term::Ground(GroundType::Int) => self.var_count,
            Term::Ground(GroundType::Bool) => self.var_count + 1,
        }
    }

    /// Ground type sitting at union-find id `id`, if any
    pub fn ground_at(&self, id: usize) -> Option<GroundType> {
        match id.checked_sub(self.var_count) {
            Some(0) => Some(GroundType::Int),
            Some(1) => Some(GroundType::Bool),
            _ => None,
        }
    }

    /// Solve all constraints in emission order
    pub fn solve(&mut self, constraints: &ConstraintSet) -> Result<()> {
        debug!(
            vars = self.var_count,
            constraints = constraints.len(),
            "solving constraints"
        );
        for constraint in constraints.iter() {
            self.unify(constraint)?;
        }
        Ok(())
    }

    /// Merge the classes of both sides. A ground type always ends up as
    /// the root of the merged class.
    pub fn unify(&mut self, constraint: &Constraint) -> Result<()> {
        let (left, right) = (self.index(constraint.left), self.index(constraint.right));
        let root_left = self.sets.find(left);
        let root_right = self.sets.find(right);
        trace!(root_left, root_right, origin = %constraint.origin, "unify");

        match (self.ground_at(root_left), self.ground_at(root_right)) {
            (None, None) => self.sets.join(root_left, root_right),
            (Some(_), None) => self.sets.join(root_right, root_left),
            (None, Some(_)) => self.sets.join(root_left, root_right),
            (Some(left), Some(right)) if left == right => {}
            (Some(left), Some(right)) => {
                return Err(TypeError::Mismatch {
                    left,
                    right,
                    origin: constraint.origin,
                    span: constraint.span,
                })
            }
        }
        Ok(())
    }

    /// Solved type of a type variable
    pub fn resolve(&mut self, var: TypeVar) -> Type {
        let id = self.index(Term::Var(var));
        let root = self.sets.find(id);
        match self.ground_at(root) {
            Some(ground) => Type::Ground(ground),
            None => Type::Generic(root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INT: GroundType = GroundType::Int;
    const BOOL: GroundType = GroundType::Bool;

    fn span() -> Span {
        Span::new(0, 1)
    }

    fn solve(var_count: usize, pairs: &[(Term, Term)]) -> Result<ConstraintSolver> {
        let mut set = ConstraintSet::new();
        for (left, right) in pairs {
            set.equal(*left, *right, Origin::Literal, span());
        }
        let mut solver = ConstraintSolver::new(var_count);
        solver.solve(&set)?;
        Ok(solver)
    }

    fn var(id: usize) -> Term {
        Term::Var(TypeVar(id))
    }

    fn int() -> Term {
        Term::Ground(INT)
    }

    fn boolean() -> Term {
        Term::Ground(BOOL)
    }

    #[test]
    fn test_ground_ids_follow_variables() {
        let solver = ConstraintSolver::new(3);
        assert_eq!(solver.index(int()), 3);
        assert_eq!(solver.index(boolean()), 4);
        assert_eq!(solver.ground_at(3), Some(INT));
        assert_eq!(solver.ground_at(4), Some(BOOL));
        assert_eq!(solver.ground_at(2), None);
    }

    #[test]
    fn test_ground_wins_on_either_side() {
        let mut solver = solve(2, &[(int(), var(0)), (var(1), boolean())]).unwrap();
        assert_eq!(solver.resolve(TypeVar(0)), Type::INT);
        assert_eq!(solver.resolve(TypeVar(1)), Type::BOOL);
    }

    #[test]
    fn test_ground_survives_variable_chains() {
        let mut solver = solve(
            3,
            &[(var(0), var(1)), (int(), var(1)), (var(2), var(0))],
        )
        .unwrap();
        for id in 0..3 {
            assert_eq!(solver.resolve(TypeVar(id)), Type::INT);
        }
    }

    #[test]
    fn test_unconstrained_class_is_generic() {
        let mut solver = solve(3, &[(var(0), var(2))]).unwrap();
        let first = solver.resolve(TypeVar(0));
        assert!(first.is_generic());
        assert_eq!(solver.resolve(TypeVar(2)), first);
        assert_ne!(solver.resolve(TypeVar(1)), first);
    }

    #[test]
    fn test_same_ground_is_noop() {
        let mut solver = solve(1, &[(var(0), int()), (int(), var(0))]).unwrap();
        assert_eq!(solver.resolve(TypeVar(0)), Type::INT);
    }

    #[test]
    fn test_conflict_names_both_types_in_any_order() {
        let orders: [Vec<(Term, Term)>; 4] = [
            vec![(var(0), int()), (var(0), boolean())],
            vec![(boolean(), var(0)), (int(), var(0))],
            vec![(var(0), boolean()), (int(), var(0))],
            vec![(int(), var(0)), (var(0), boolean())],
        ];

        for pairs in orders {
            let error = solve(1, &pairs).unwrap_err();
            let (left, right) = error.conflicting_types().unwrap();
            assert_ne!(left, right);
            let message = error.to_string();
            assert!(message.contains("INT") && message.contains("BOOL"), "{}", message);
        }
    }

    #[test]
    fn test_conflict_through_variables() {
        let error = solve(
            2,
            &[(var(0), int()), (var(1), boolean()), (var(0), var(1))],
        )
        .unwrap_err();
        assert_eq!(error.conflicting_types(), Some((INT, BOOL)));
    }
}
