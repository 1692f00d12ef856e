//! Abstract Syntax Tree definitions for the tiny language
//!
//! Every node owns its children outright, so a parsed line is a strict
//! tree that is released as a whole when the root goes out of scope.

use crate::span::Span;
use serde::{Deserialize, Serialize};

/// Type variable id attached to a node by inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeVar(pub usize);

/// Expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Unassigned until the type checker numbers the tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_var: Option<TypeVar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    Var(String),
    Int(i64),
    Bool(bool),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Not(Box<Expr>),
    If {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// `name` is always a `Var` node; the parser rejects anything else
    Let {
        name: Box<Expr>,
        value: Box<Expr>,
        body: Box<Expr>,
    },
}

/// Two-operand operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Lt => "<",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// Operators taking two integers
    pub fn takes_integers(&self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Lt
        )
    }

    /// Operators producing an integer
    pub fn yields_integer(&self) -> bool {
        matches!(self, BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div)
    }
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span,
            type_var: None,
        }
    }

    pub fn var(name: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::Var(name.into()), span)
    }

    pub fn int(value: i64, span: Span) -> Self {
        Self::new(ExprKind::Int(value), span)
    }

    pub fn bool(value: bool, span: Span) -> Self {
        Self::new(ExprKind::Bool(value), span)
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }

    pub fn not(operand: Expr, span: Span) -> Self {
        Self::new(ExprKind::Not(Box::new(operand)), span)
    }

    pub fn if_then_else(condition: Expr, then_branch: Expr, else_branch: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::If {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            span,
        )
    }

    pub fn let_in(name: Expr, value: Expr, body: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::Let {
                name: Box::new(name),
                value: Box::new(value),
                body: Box::new(body),
            },
            span,
        )
    }

    /// Name carried by a `Var` node
    pub fn as_var(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Var(name) => Some(name),
            _ => None,
        }
    }

    /// Direct children in source order
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Var(_) | ExprKind::Int(_) | ExprKind::Bool(_) => Vec::new(),
            ExprKind::Binary { left, right, .. } => vec![&**left, &**right],
            ExprKind::Not(operand) => vec![&**operand],
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => vec![&**condition, &**then_branch, &**else_branch],
            ExprKind::Let { name, value, body } => vec![&**name, &**value, &**body],
        }
    }

    pub fn children_mut(&mut self) -> Vec<&mut Expr> {
        match &mut self.kind {
            ExprKind::Var(_) | ExprKind::Int(_) | ExprKind::Bool(_) => Vec::new(),
            ExprKind::Binary { left, right, .. } => vec![&mut **left, &mut **right],
            ExprKind::Not(operand) => vec![&mut **operand],
            ExprKind::If {
                condition,
                then_branch,
                else_branch,
            } => vec![&mut **condition, &mut **then_branch, &mut **else_branch],
            ExprKind::Let { name, value, body } => vec![&mut **name, &mut **value, &mut **body],
        }
    }

    /// Number of nodes in the tree rooted here
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Expr::node_count)
            .sum::<usize>()
    }
}
