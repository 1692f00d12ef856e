//! Type representation for the tiny language

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two concrete types of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroundType {
    Int,
    Bool,
}

impl GroundType {
    pub const ALL: [GroundType; 2] = [GroundType::Int, GroundType::Bool];
}

impl fmt::Display for GroundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroundType::Int => write!(f, "INT"),
            GroundType::Bool => write!(f, "BOOL"),
        }
    }
}

/// Solved type of a variable or expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Ground(GroundType),
    /// Unconstrained; tagged with the representative id of its class
    Generic(usize),
}

impl Type {
    pub const INT: Type = Type::Ground(GroundType::Int);
    pub const BOOL: Type = Type::Ground(GroundType::Bool);

    pub fn is_generic(&self) -> bool {
        matches!(self, Type::Generic(_))
    }
}

impl From<GroundType> for Type {
    fn from(ground: GroundType) -> Self {
        Type::Ground(ground)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Ground(ground) => write!(f, "{}", ground),
            Type::Generic(id) => write!(f, "GENERIC-{}", id),
        }
    }
}
