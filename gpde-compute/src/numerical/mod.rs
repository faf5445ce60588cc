//! Numerical evaluation of expressions to [`f64`].
//!
//! Derived kernels are evaluated pointwise by the consumers of this crate; the same evaluator is
//! used by the `eval(...)` script command and by the tests of the derivation engine.

pub mod ctxt;
pub mod error;
pub mod eval;

pub use ctxt::Ctxt;
pub use error::EvalError;
pub use eval::Eval;
