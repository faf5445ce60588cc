use std::ops::Range;
use crate::{
    parser::{
        ast::{
            assign::Assign,
            binary::Binary,
            call::Call,
            literal::Literal,
            paren::{parse_paren_or_tuple, Paren},
            tuple::Tuple,
            unary::Unary,
        },
        error::{kind, Error},
        token::CloseParen,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
    try_parse_catch_fatal,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a general expression in a kernel script.
///
/// An expression is any valid piece of code that can be evaluated to produce a value, such as an
/// operator expression `alpha * u + dx(u)`, a base kernel, or a command like `derive(L, xi)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A tuple, such as `(xi, yi)`.
    Tuple(Tuple),

    /// A function call, such as `dx(u)`.
    Call(Call),

    /// A unary operation, such as `-u`.
    Unary(Unary),

    /// A binary operation, such as `alpha * u`.
    Binary(Binary),

    /// An assignment, such as `L = dx(u)`.
    Assign(Assign),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Tuple(tuple) => tuple.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
            Expr::Assign(assign) => assign.span(),
        }
    }

    /// If this expression is a [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if let Ok(close_paren) = input.clone().try_parse::<CloseParen>() {
            return Err(Error::new_fatal(vec![close_paren.span], kind::UnclosedParenthesis { opening: false }));
        }

        let _ = try_parse_catch_fatal!(input.try_parse::<Assign>().map(Self::Assign));
        let lhs = input.try_parse_with_fn(Unary::parse_or_lower)?;
        let expr = Binary::parse_expr(input, lhs, Precedence::Any)?;

        if input.peek_kind() == Some(TokenKind::Assign) {
            return Err(Error::new_fatal(vec![expr.span()], kind::InvalidAssignmentLhs));
        }

        Ok(expr)
    }
}

/// Represents a primary expression in a kernel script.
///
/// Primary expressions are the simplest expressions, and are the building blocks of more complex
/// expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A tuple, such as `(xi, yi)`.
    Tuple(Tuple),

    /// A function call, such as `dx(u)`.
    Call(Call),
}

impl Primary {
    /// Returns the span of the primary expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Primary::Literal(literal) => literal.span(),
            Primary::Paren(paren) => paren.span(),
            Primary::Tuple(tuple) => tuple.span(),
            Primary::Call(call) => call.span(),
        }
    }
}

impl Parse for Primary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        // function calls can overlap with literals, so we need to try parsing a function call
        // first
        let _ = try_parse_catch_fatal!(input.try_parse::<Call>().map(Self::Call));
        let _ = try_parse_catch_fatal!(input.try_parse::<Literal>().map(Self::Literal));

        match input.try_parse_with_fn(parse_paren_or_tuple)? {
            Expr::Tuple(tuple) => Ok(Self::Tuple(tuple)),
            Expr::Paren(paren) => Ok(Self::Paren(paren)),
            other => Ok(Self::Paren(Paren { span: other.span(), expr: Box::new(other) })),
        }
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
            Primary::Tuple(tuple) => Self::Tuple(tuple),
            Primary::Call(call) => Self::Call(call),
        }
    }
}
