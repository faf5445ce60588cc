//! Errors that can occur while numerically evaluating an expression.

use ariadne::Fmt;
use gpde_attrs::ErrorKind;
use gpde_error::{ErrorKind, EXPR};
use std::ops::Range;

/// The variable is undefined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no value", self.name),
    labels = ["this expression"],
    help = format!("give it one, for example: eval(..., {} = {})", (&self.name).fg(EXPR), "1.5".fg(EXPR)),
)]
pub struct UndefinedVariable {
    /// The name of the variable that was undefined.
    pub name: String,
}

/// The function is undefined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function does not exist", self.name),
    labels = ["this function"],
    help = if self.suggestions.is_empty() {
        "see the documentation for a list of available functions".to_string()
    } else if self.suggestions.len() == 1 {
        format!("did you mean the `{}` function?", (&*self.suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            self.suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
)]
pub struct UndefinedFunction {
    /// The name of the function that was undefined.
    pub name: String,

    /// A list of similarly named functions, if any.
    pub suggestions: Vec<String>,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("wrong number of arguments given to the `{}` function", self.name),
    labels = ["this function call"],
    help = format!(
        "the `{}` function takes {} argument(s); there are {} argument(s) provided here",
        (&self.name).fg(EXPR),
        self.expected,
        self.given
    )
)]
pub struct WrongArgumentCount {
    /// The name of the function that was called.
    pub name: String,

    /// A description of the number of arguments that were expected, such as `1` or `2 or 3`.
    pub expected: String,

    /// The number of arguments that were given.
    pub given: usize,
}

/// The expression still contains a node that has no numerical value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` cannot be evaluated numerically", self.expr),
    labels = ["this expression"],
    help = "abstract operators and derivatives of undefined functions must be resolved with `kernel(...)` first",
)]
pub struct Unevaluated {
    /// The offending subexpression, printed.
    pub expr: String,
}

/// The result of the evaluation is not a finite number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` does not evaluate to a finite number", self.expr),
    labels = ["this expression"],
)]
pub struct NonFinite {
    /// The offending subexpression, printed.
    pub expr: String,
}

/// Any error that can occur while numerically evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A symbol has no value.
    UndefinedVariable(UndefinedVariable),

    /// A function does not exist.
    UndefinedFunction(UndefinedFunction),

    /// A function was called with the wrong number of arguments.
    WrongArgumentCount(WrongArgumentCount),

    /// An abstract operator or pending derivative was found.
    Unevaluated(Unevaluated),

    /// The value is infinite or not a number.
    NonFinite(NonFinite),
}

impl EvalError {
    /// Returns the inner error kind.
    fn kind(&self) -> &dyn ErrorKind {
        match self {
            EvalError::UndefinedVariable(e) => e,
            EvalError::UndefinedFunction(e) => e,
            EvalError::WrongArgumentCount(e) => e,
            EvalError::Unevaluated(e) => e,
            EvalError::NonFinite(e) => e,
        }
    }

    /// Convert the [`EvalError`] into an [`Error`](gpde_error::Error), highlighting the given
    /// spans.
    pub fn into_error(self, spans: Vec<Range<usize>>) -> gpde_error::Error {
        gpde_error::Error::new(spans, self)
    }
}

impl ErrorKind for EvalError {
    fn message(&self) -> String {
        self.kind().message()
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> ariadne::Report<(&'a str, Range<usize>)> {
        self.kind().build_report(src_id, spans)
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for EvalError {}
