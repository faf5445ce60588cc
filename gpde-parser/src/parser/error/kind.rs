use ariadne::Fmt;
use gpde_attrs::ErrorKind;
use gpde_error::EXPR;
use crate::tokenizer::TokenKind;

pub use gpde_error::ErrorKind;

/// An intentionally useless error. This should only be used for non-fatal errors, as it contains
/// no useful information.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an internal non-fatal error occurred while parsing",
    labels = ["here"],
    help = "you should never see this error; please report this as a bug"
)]
pub struct NonFatal;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of file",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of a statement was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of statement",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = "separate statements with a newline or `;`",
)]
pub struct ExpectedEndOfStmt;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", self.expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", self.found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A number literal could not be represented.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number `{}`", self.lexeme),
    labels = ["this number"],
)]
pub struct InvalidNumber {
    /// The raw text of the literal.
    pub lexeme: String,
}

/// A parenthesis was not closed, or a closing parenthesis has no opening partner.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis"],
    help = if self.opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the unclosed parenthesis is an opening parenthesis.
    pub opening: bool,
}

/// The left-hand side of an assignment was not a symbol.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid assignment target",
    labels = ["this expression cannot be assigned to"],
    help = format!("only symbols can be assigned to, like {}", "L = dx(u)".fg(EXPR)),
)]
pub struct InvalidAssignmentLhs;
