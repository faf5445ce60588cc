//! Abstract operators that can be left unevaluated inside an expression.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A partial-derivative operator along one coordinate.
///
/// Each variant is bound to a coordinate name and a gradient index: the position of that
/// coordinate among the spatial coordinates of an evaluation point. [`Partial::Dt`] has no
/// gradient index, since time is never part of a spatial gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Partial {
    /// `dx`, the derivative along the first spatial coordinate.
    Dx,

    /// `dy`, the derivative along the second spatial coordinate.
    Dy,

    /// `dz`, the derivative along the third spatial coordinate.
    Dz,

    /// `dt`, the derivative along the time coordinate.
    Dt,
}

impl Partial {
    /// All partial-derivative operators.
    pub const ALL: [Partial; 4] = [Partial::Dx, Partial::Dy, Partial::Dz, Partial::Dt];

    /// The spatial partial-derivative operators, ordered by gradient index.
    pub const SPATIAL: [Partial; 3] = [Partial::Dx, Partial::Dy, Partial::Dz];

    /// Returns the name of the operator, as written in kernel scripts.
    pub fn name(self) -> &'static str {
        match self {
            Partial::Dx => "dx",
            Partial::Dy => "dy",
            Partial::Dz => "dz",
            Partial::Dt => "dt",
        }
    }

    /// Returns the operator with the given name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Returns the name of the coordinate this operator differentiates along.
    pub fn coordinate(self) -> &'static str {
        match self {
            Partial::Dx => "x",
            Partial::Dy => "y",
            Partial::Dz => "z",
            Partial::Dt => "t",
        }
    }

    /// Returns the gradient index of the operator.
    pub fn grad_index(self) -> Option<usize> {
        match self {
            Partial::Dx => Some(0),
            Partial::Dy => Some(1),
            Partial::Dz => Some(2),
            Partial::Dt => None,
        }
    }
}

/// An abstract linear operator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operator {
    /// A differential operator: linear, and obeys the two-factor Leibniz rule.
    Partial(Partial),

    /// A named operator that is only known to be linear.
    Linear(String),
}

impl Operator {
    /// Returns the name of the operator.
    pub fn name(&self) -> &str {
        match self {
            Operator::Partial(partial) => partial.name(),
            Operator::Linear(name) => name,
        }
    }

    /// Returns true if the operator obeys the Leibniz rule.
    pub fn is_differential(&self) -> bool {
        matches!(self, Operator::Partial(_))
    }
}

impl From<Partial> for Operator {
    fn from(partial: Partial) -> Self {
        Operator::Partial(partial)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
