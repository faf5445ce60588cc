use std::ops::Range;
use crate::{
    parser::{
        ast::{binary::Binary, expr::{Expr, Primary}},
        error::Error,
        token::op::UnaryOp,
        Parse,
        Parser,
    },
    try_parse_catch_fatal,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-u`. Unary expressions can include nested expressions.
///
/// All unary operators of kernel scripts are right-associative prefix operators.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or lower precedence expressions.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let _ = try_parse_catch_fatal!(input.try_parse::<Unary>().map(Expr::Unary));
        input.try_parse::<Primary>().map(Into::into)
    }
}

impl Parse for Unary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let op = input.try_parse::<UnaryOp>()?;
        let operand = {
            let lhs = input.try_parse_with_fn(Unary::parse_or_lower)?;
            Binary::parse_expr(input, lhs, op.precedence())?
        };
        let span = op.span.start..operand.span().end;
        Ok(Self {
            operand: Box::new(operand),
            op,
            span,
        })
    }
}
