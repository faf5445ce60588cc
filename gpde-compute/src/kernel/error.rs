//! Errors raised while deriving kernels.

use ariadne::Fmt;
use gpde_attrs::ErrorKind;
use gpde_error::{ErrorKind, EXPR};
use std::ops::Range;

/// A differential operator is applied to a product of three or more operands, which the
/// two-factor Leibniz rule cannot expand.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is applied to a product of {} operands", self.op, self.operands),
    labels = ["this expression"],
    help = format!(
        "the product rule is only expanded for two operands; rewrite `{}` so that each product has at most two",
        (&self.term).fg(EXPR),
    ),
)]
pub struct MalformedOperator {
    /// The name of the operator.
    pub op: String,

    /// The number of non-coefficient operands in the product.
    pub operands: usize,

    /// The offending term, printed.
    pub term: String,
}

/// An operator is applied to something that is neither the unknown, a field, nor a product of
/// them, such as a coordinate or a nonlinear function of the unknown.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` cannot be applied to `{}`", self.op, self.operand),
    labels = ["this expression"],
    help = format!(
        "operators act on the {} and on {}s; declare symbols with `unknown(...)` or `field(...)`",
        "unknown".fg(EXPR),
        "field".fg(EXPR),
    ),
)]
pub struct UnsupportedOperand {
    /// The name of the operator.
    pub op: String,

    /// The operand, printed.
    pub operand: String,
}

/// The operator expression does not contain exactly one unknown.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = if self.found.is_empty() {
        "the operator expression contains no unknown".to_string()
    } else {
        format!("the operator expression contains {} unknowns: {}", self.found.len(), self.found.join(", "))
    },
    labels = ["this expression"],
    help = format!("an operator expression must act on exactly one {}", "unknown(...)".fg(EXPR)),
)]
pub struct UnknownCardinality {
    /// The names of the distinct unknowns that were found.
    pub found: Vec<String>,
}

/// The operator expression is over a different unknown than the one requested.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected an operator expression over `{}`, found one over `{}`", self.expected, self.found),
    labels = ["this expression"],
)]
pub struct WrongUnknown {
    /// The name of the requested unknown.
    pub expected: String,

    /// The name of the unknown found in the expression.
    pub found: String,
}

/// The evaluation point is not a coordinate, a tuple of coordinates, or a pair of them.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid evaluation point: {}", self.reason),
    labels = ["this point"],
    help = format!("a point is a coordinate name or a tuple of names, such as {}", "(xi, yi)".fg(EXPR)),
)]
pub struct TypeMismatch {
    /// Why the point was rejected.
    pub reason: String,
}

/// A partial derivative refers to a coordinate the evaluation point does not have.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` needs a `{}` coordinate, but the point `{}` has none", self.op, self.coordinate, self.point),
    labels = ["this point"],
    help = if self.coordinate == "t" {
        format!("mark the time coordinate with {}", "time(...)".fg(EXPR))
    } else {
        "add more spatial coordinates to the point".to_string()
    },
)]
pub struct MissingCoordinate {
    /// The name of the operator.
    pub op: String,

    /// The coordinate the operator differentiates along.
    pub coordinate: String,

    /// The point, printed.
    pub point: String,
}

/// An abstract operator survived the derivation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the operator in `{}` could not be resolved", self.term),
    labels = ["this expression"],
    help = "only `dx`, `dy`, `dz` and `dt` applied to the unknown can be resolved into derivatives of the kernel",
)]
pub struct ResidualOperator {
    /// The unresolved term, printed.
    pub term: String,
}

/// A derivative of the base kernel could not be computed symbolically.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot differentiate `{}` symbolically", self.expr),
    labels = ["this expression"],
    help = format!("base kernels may use {} and the builtin math functions", "+ - * / ^".fg(EXPR)),
)]
pub struct NotDifferentiable {
    /// The subexpression that could not be differentiated, printed.
    pub expr: String,
}

/// Vector operands have a dimension the operation does not support.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` does not support {}", self.op, self.given),
    labels = ["this expression"],
    help = format!("`{}` expects {}", self.op, self.expected),
)]
pub struct DimensionMismatch {
    /// The name of the operation.
    pub op: String,

    /// A description of the supported dimensions.
    pub expected: String,

    /// A description of what was given.
    pub given: String,
}

/// Any error that can occur while deriving or specializing a kernel.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// A differential operator applied to a product of three or more operands.
    MalformedOperator(MalformedOperator),

    /// An operator applied to an unsupported operand.
    UnsupportedOperand(UnsupportedOperand),

    /// Zero or several distinct unknowns.
    UnknownCardinality(UnknownCardinality),

    /// An unknown other than the requested one.
    WrongUnknown(WrongUnknown),

    /// A malformed evaluation point.
    TypeMismatch(TypeMismatch),

    /// An operator referring to a coordinate the point does not have.
    MissingCoordinate(MissingCoordinate),

    /// An operator left after derivation.
    ResidualOperator(ResidualOperator),

    /// A derivative of the base kernel that cannot be computed.
    NotDifferentiable(NotDifferentiable),

    /// Vector operands of the wrong dimension.
    DimensionMismatch(DimensionMismatch),
}

impl KernelError {
    /// Creates a [`KernelError::TypeMismatch`] with the given reason.
    pub fn type_mismatch(reason: impl Into<String>) -> Self {
        KernelError::TypeMismatch(TypeMismatch { reason: reason.into() })
    }

    /// Returns the inner error kind.
    fn kind(&self) -> &dyn ErrorKind {
        match self {
            KernelError::MalformedOperator(e) => e,
            KernelError::UnsupportedOperand(e) => e,
            KernelError::UnknownCardinality(e) => e,
            KernelError::WrongUnknown(e) => e,
            KernelError::TypeMismatch(e) => e,
            KernelError::MissingCoordinate(e) => e,
            KernelError::ResidualOperator(e) => e,
            KernelError::NotDifferentiable(e) => e,
            KernelError::DimensionMismatch(e) => e,
        }
    }

    /// Convert the [`KernelError`] into an [`Error`](gpde_error::Error), highlighting the given
    /// spans.
    pub fn into_error(self, spans: Vec<Range<usize>>) -> gpde_error::Error {
        gpde_error::Error::new(spans, self)
    }
}

impl ErrorKind for KernelError {
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

impl std::fmt::Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for KernelError {}
