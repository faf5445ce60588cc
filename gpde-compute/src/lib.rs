//! Symbolic derivation of Gaussian-process kernels for linear partial differential operators.
//!
//! Given a linear operator `L` expressed over a single unknown field `u` (for example
//! `alpha * u + dx(u)`), and a base covariance kernel `k(xi, xj)`, this crate derives the closed
//! form of the kernels `L_i k`, `L_j k` and `L_j L_i k` that a Gaussian-process layer needs to
//! estimate the coefficients of the PDE `L[u] = f`.
//!
//! The crate is organized in layers:
//!
//! - [`symbolic`]: the expression tree, smart builders, symbolic differentiation.
//! - [`numerical`]: evaluation of expressions to `f64`.
//! - [`kernel`]: the operator algebra and the derivation / specialization algorithm.
//! - [`script`]: an interpreter for kernel scripts parsed by [`gpde_parser`].
//!
//! ```
//! use gpde_compute::kernel::{point::{Point, Points}, specialize};
//! use gpde_compute::symbolic::expr::{Expr, Symbol};
//! use gpde_compute::symbolic::expr::op::{Operator, Partial};
//! use gpde_compute::kernel::operator::apply;
//!
//! let u = Expr::symbol(Symbol::unknown("u"));
//! let alpha = Expr::symbol(Symbol::constant("alpha"));
//! let op = alpha * u.clone() + apply(&Operator::Partial(Partial::Dx), &u);
//!
//! let r = Expr::symbol(Symbol::plain("xi")) - Expr::symbol(Symbol::plain("xj"));
//! let k = Expr::call("exp", vec![Expr::float(-0.5) * r.pow(Expr::int(2))]);
//!
//! let points = Points::Pair(Point::scalar("xi"), Point::scalar("xj"));
//! let kff = specialize(&op, &k, &points).unwrap();
//! println!("k_ff = {}", kff);
//! ```

pub mod funcs;
pub mod kernel;
pub mod numerical;
pub mod primitive;
pub mod script;
pub mod symbolic;
