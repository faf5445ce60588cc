use std::ops::Range;
use crate::parser::{
    ast::{expr::Expr, literal::LitSym},
    error::Error,
    token::Assign as AssignToken,
    Parse,
    Parser,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An assignment of a value to a symbol, such as `L = alpha * u + dx(u)`.
///
/// Inside the arguments of `eval`, assignments bind coordinates to numbers instead.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assign {
    /// The symbol being assigned to.
    pub target: LitSym,

    /// The assigned expression.
    pub value: Box<Expr>,

    /// The region of the source code that this assignment was parsed from.
    pub span: Range<usize>,
}

impl Assign {
    /// Returns the span of the assignment.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Assign {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let target = input.try_parse::<LitSym>()?;
        input.try_parse::<AssignToken>()?;
        // once the `=` is seen, this can only be an assignment
        let value = input.try_parse::<Expr>().map_err(|mut err| {
            err.fatal = true;
            err
        })?;
        let span = target.span.start..value.span().end;
        Ok(Self {
            target,
            value: Box::new(value),
            span,
        })
    }
}
