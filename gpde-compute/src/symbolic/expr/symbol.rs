#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named leaf of an expression, tagged with the role it plays in an operator expression.
///
/// The role decides how the operator algebra treats the symbol:
///
/// | Variant      | Pulled out of operators | Differentiated        |
/// | ------------ | ----------------------- | --------------------- |
/// | `Plain`      | no                      | as a coordinate       |
/// | `Constant`   | yes                     | never (derivative 0)  |
/// | `Field`      | no                      | only abstractly       |
/// | `Unknown`    | no                      | resolved by `derive`  |
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Symbol {
    /// An ordinary symbol, such as a coordinate `xi` or a kernel hyperparameter `theta`.
    Plain(String),

    /// A scalar coefficient of the operator, such as `alpha` in `alpha * u + dx(u)`.
    Constant(String),

    /// A known coefficient field, such as a measured conductivity `F` in `dx(F * u)`.
    Field(String),

    /// The latent solution field of the PDE.
    Unknown(String),
}

impl Symbol {
    /// Creates a [`Symbol::Plain`].
    pub fn plain(name: impl Into<String>) -> Self {
        Self::Plain(name.into())
    }

    /// Creates a [`Symbol::Constant`].
    pub fn constant(name: impl Into<String>) -> Self {
        Self::Constant(name.into())
    }

    /// Creates a [`Symbol::Field`].
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    /// Creates a [`Symbol::Unknown`].
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::Unknown(name.into())
    }

    /// Returns the name of the symbol.
    pub fn name(&self) -> &str {
        match self {
            Self::Plain(name)
            | Self::Constant(name)
            | Self::Field(name)
            | Self::Unknown(name) => name,
        }
    }

    /// Returns a short description of the kind of symbol, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Plain(_) => "symbol",
            Self::Constant(_) => "constant",
            Self::Field(_) => "field",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
