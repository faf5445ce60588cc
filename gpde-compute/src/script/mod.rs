//! Kernel scripts: a small language for declaring operators and deriving their kernels.
//!
//! A script is a sequence of statements parsed by [`gpde_parser`]. Symbols are declared with
//! `constant`, `field` and `unknown`; abstract linear operators with `linear`; time coordinates
//! with `time`. Operators are built with `dx`, `dy`, `dz`, `dt` and the vector commands, and
//! kernels are derived with `derive`, `kernel` and `kernels`:
//!
//! ```
//! use gpde_compute::script::{Session, Value};
//!
//! let mut session = Session::new();
//! let values = session.run("
//!     unknown(u); constant(alpha)
//!     L = alpha * u + dx(u)
//!     kernel(L, exp(-(xi - xj)^2 / 2), xi)
//! ").unwrap();
//! assert!(matches!(values.last(), Some(Value::Expr(_))));
//! ```

pub mod error;
mod interpret;
mod session;
mod value;

pub use interpret::Interpret;
pub use session::Session;
pub use value::Value;
