use crate::symbolic::expr::Expr;
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The result of a statement of a kernel script.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// Nothing, returned by declarations.
    Unit,

    /// A number computed by `eval(...)`.
    Number(f64),

    /// A symbolic expression.
    Expr(Expr),

    /// A tuple of expressions: a point, a vector, or a set of kernels.
    Tuple(Vec<Expr>),
}

impl Value {
    /// Returns the typename of this value.
    pub fn typename(&self) -> &'static str {
        match self {
            Value::Unit => "Unit",
            Value::Number(_) => "Number",
            Value::Expr(_) => "Expression",
            Value::Tuple(_) => "Tuple",
        }
    }

    /// Converts the value to a scalar expression, if it is one.
    pub fn into_expr(self) -> Option<Expr> {
        match self {
            Value::Number(n) => Some(Expr::number(n)),
            Value::Expr(expr) => Some(expr),
            Value::Unit | Value::Tuple(_) => None,
        }
    }

    /// Converts the value to the components of a vector. A scalar is a vector of one component.
    pub fn into_components(self) -> Option<Vec<Expr>> {
        match self {
            Value::Tuple(items) => Some(items),
            other => other.into_expr().map(|expr| vec![expr]),
        }
    }
}

impl From<Expr> for Value {
    fn from(expr: Expr) -> Self {
        Value::Expr(expr)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Expr(expr) => write!(f, "{}", expr),
            Value::Tuple(items) => {
                let items = items.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "({})", items.join(", "))
            },
        }
    }
}
