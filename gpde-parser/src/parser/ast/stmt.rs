use std::ops::Range;
use crate::parser::{ast::expr::Expr, error::Error, Parse, Parser};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single statement of a kernel script. Statements are separated by newlines or semicolons.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stmt {
    /// The expression of the statement.
    pub expr: Expr,

    /// The region of the source code that this statement was parsed from.
    pub span: Range<usize>,
}

impl Parse for Stmt {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let expr = input.try_parse::<Expr>()?;
        let span = expr.span();
        Ok(Self { expr, span })
    }
}
