//! Derivation of Gaussian-process kernels from linear differential operators.
//!
//! An operator expression `L` is an ordinary [`Expr`](crate::symbolic::expr::Expr) built over a
//! single [`Symbol::Unknown`](crate::symbolic::expr::Symbol::Unknown) `u`, in which partial
//! derivatives are abstract [`Expr::Apply`](crate::symbolic::expr::Expr::Apply) nodes created by
//! [`operator::apply`]. For example, the 1D heat equation `dt(u) - kappa * dx(dx(u))`.
//!
//! - [`derive()`] rewrites `L` into derivatives of `u(args)` at one point, or composes it at a pair
//! of points.
//! - [`specialize()`] substitutes a concrete base kernel for `u(args)` and computes the
//! derivatives, producing a closed-form kernel.
//! - [`Kernels::derive`] computes the four covariance blocks `k_uu`, `k_fu`, `k_uf` and `k_ff` at
//! once.

pub mod derive;
pub mod error;
pub mod operator;
pub mod point;
pub mod specialize;
pub mod vector;

pub use derive::{derive, derive_over};
pub use error::KernelError;
pub use specialize::{specialize, Kernels};
