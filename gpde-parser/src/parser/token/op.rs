//! Unary and binary operators of kernel scripts.

use crate::{
    parser::{
        error::{kind, Error},
        Associativity,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unary operators. Only negation exists; `dx(..)` and friends are ordinary calls.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOpKind {
    Neg,
}

impl UnaryOpKind {
    const TOKENS: &'static [TokenKind] = &[TokenKind::Sub];

    fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Sub => Some(Self::Neg),
            _ => None,
        }
    }

    /// Returns the symbol of the operator, as written in scripts.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
        }
    }

    pub fn precedence(self) -> Precedence {
        Precedence::Neg
    }

    pub fn associativity(self) -> Associativity {
        Associativity::Right
    }
}

/// Binary operators, from highest to lowest precedence.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Add,
    Sub,
}

impl BinOpKind {
    const TOKENS: &'static [TokenKind] = &[
        TokenKind::Exp,
        TokenKind::Mul,
        TokenKind::Div,
        TokenKind::Add,
        TokenKind::Sub,
    ];

    fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Exp => Self::Exp,
            TokenKind::Mul => Self::Mul,
            TokenKind::Div => Self::Div,
            TokenKind::Add => Self::Add,
            TokenKind::Sub => Self::Sub,
            _ => return None,
        })
    }

    /// Returns the symbol of the operator, as written in scripts.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Exp => "^",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Add => "+",
            Self::Sub => "-",
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    /// Exponentiation groups to the right (`a^b^c` is `a^(b^c)`); everything else to the left.
    pub fn associativity(self) -> Associativity {
        if self == Self::Exp {
            Associativity::Right
        } else {
            Associativity::Left
        }
    }
}

/// Generates the operator struct wrapping an operator kind and its span, and its [`Parse`]
/// implementation.
macro_rules! operator {
    ($(#[$meta:meta])* $name:ident($kind:ident)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name {
            pub kind: $kind,

            /// The region of the source code that this operator was parsed from.
            pub span: Range<usize>,
        }

        impl $name {
            pub fn precedence(&self) -> Precedence {
                self.kind.precedence()
            }

            pub fn associativity(&self) -> Associativity {
                self.kind.associativity()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.kind.symbol())
            }
        }

        impl Parse for $name {
            fn parse(input: &mut Parser) -> Result<Self, Error> {
                let token = input.next_token()?;
                match $kind::from_token(token.kind) {
                    Some(kind) => Ok(Self { kind, span: token.span }),
                    None => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                        expected: $kind::TOKENS,
                        found: token.kind,
                    })),
                }
            }
        }
    };
}

operator!(
    /// A prefix operator applied to one operand.
    UnaryOp(UnaryOpKind)
);

operator!(
    /// An infix operator between two operands.
    BinOp(BinOpKind)
);
