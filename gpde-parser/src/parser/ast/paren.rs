use std::ops::Range;
use crate::{
    parser::{
        ast::{expr::Expr, parse_comma_list, tuple::Tuple},
        error::{kind, Error},
        token::{CloseParen, Comma, OpenParen},
        Parser,
    },
    tokenizer::TokenKind,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// Parses a parenthesized expression, or a [`Tuple`] if a comma follows the first element.
///
/// Both start the same way, so they are parsed together to avoid parsing the first element twice.
pub(crate) fn parse_paren_or_tuple(input: &mut Parser) -> Result<Expr, Error> {
    let open_paren = input.try_parse::<OpenParen>()?;
    let first = input.try_parse::<Expr>()?;
    let is_tuple = input.peek_kind() == Some(TokenKind::Comma);

    let mut values = vec![first];
    if is_tuple {
        input.try_parse::<Comma>()?;
        values.extend(parse_comma_list(input)?);
    }

    let close_paren = input.try_parse::<CloseParen>()
        .map_err(|_| Error::new_fatal(vec![open_paren.span.clone()], kind::UnclosedParenthesis { opening: true }))?;
    let span = open_paren.span.start..close_paren.span.end;

    if is_tuple {
        Ok(Expr::Tuple(Tuple { values, span }))
    } else {
        let expr = values.remove(0);
        Ok(Expr::Paren(Paren { expr: Box::new(expr), span }))
    }
}
