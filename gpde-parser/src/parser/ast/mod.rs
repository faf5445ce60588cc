//! Abstract syntax tree of kernel scripts.

pub mod assign;
pub mod binary;
pub mod call;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod stmt;
pub mod tuple;
pub mod unary;

pub use expr::Expr;
pub use stmt::Stmt;

use crate::{
    parser::{token::Comma, Error, Parse, Parser},
    tokenizer::TokenKind,
};

/// Parses a comma-separated list of expressions up to (but not including) the next closing
/// parenthesis. A trailing comma is allowed.
pub(crate) fn parse_comma_list(input: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut values = Vec::new();

    while !matches!(input.peek_kind(), Some(TokenKind::CloseParen) | None) {
        values.push(Expr::parse(input)?);
        if input.peek_kind() == Some(TokenKind::Comma) {
            input.try_parse::<Comma>()?;
        } else {
            break;
        }
    }

    Ok(values)
}
