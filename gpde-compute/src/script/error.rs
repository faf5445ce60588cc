//! Errors specific to running kernel scripts.
//!
//! Errors from the derivation engine ([`KernelError`](crate::kernel::KernelError)) and from
//! numerical evaluation ([`EvalError`](crate::numerical::EvalError)) are reported as they are,
//! highlighting the command that caused them.

use ariadne::Fmt;
use gpde_attrs::ErrorKind;
use gpde_error::EXPR;

/// A declaration was given something other than a name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` expects names as arguments", self.command),
    labels = ["this argument"],
    help = format!("for example: {}", format!("{}(a, b)", self.command).fg(EXPR)),
)]
pub struct ExpectedName {
    /// The declaration command.
    pub command: String,
}

/// An operation was given a value of the wrong type.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` expects {}, found a value of type `{}`", self.op, self.expected, self.found),
    labels = ["this value"],
)]
pub struct InvalidOperand {
    /// The operation, such as `+` or `dx`.
    pub op: String,

    /// A description of what was expected.
    pub expected: &'static str,

    /// The typename of the value that was found.
    pub found: &'static str,
}

/// An argument of `eval` that should give a value to a symbol is something else.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected an assignment",
    labels = ["this argument"],
    help = format!("give values to symbols like this: eval(..., {})", "x = 1.5".fg(EXPR)),
)]
pub struct ExpectedAssignment;

/// A declared symbol or a builtin was the target of an assignment, or a builtin was declared.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot {} `{}`", self.action, self.name),
    labels = ["this name"],
    help = format!("`{}` is {}; choose another name", (&self.name).fg(EXPR), self.kind),
)]
pub struct ReservedName {
    /// What was attempted: `assign to` or `declare`.
    pub action: &'static str,

    /// The name that was assigned to or declared.
    pub name: String,

    /// What the name refers to, such as `a builtin command`.
    pub kind: String,
}
