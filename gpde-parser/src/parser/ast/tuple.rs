use std::ops::Range;
use crate::parser::ast::expr::Expr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A tuple of expressions, such as the point `(xi, yi)` or the vector field `(dx(u), dy(u))`.
///
/// A tuple has at least one comma, which distinguishes `(x,)` from the parenthesized `(x)`.
/// Tuples are parsed by [`parse_paren_or_tuple`](super::paren::parse_paren_or_tuple).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tuple {
    /// The elements of the tuple.
    pub values: Vec<Expr>,

    /// The region of the source code that this tuple was parsed from.
    pub span: Range<usize>,
}

impl Tuple {
    /// Returns the span of the tuple.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}
