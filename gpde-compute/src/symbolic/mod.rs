//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Expressions in this module are represented as a tree of [`Expr`] nodes. It's similar to the
//! [`gpde_parser::parser::ast::Expr`] nodes produced by [`gpde_parser`], with the main difference
//! being that [`Expr`] nodes **flatten** out sums and products, and know which role each symbol
//! plays (a [`Symbol`] is a plain coordinate, a constant, a field, or the unknown).
//!
//! ```
//! use gpde_compute::symbolic::expr::{Expr, Symbol};
//!
//! let x = Expr::symbol(Symbol::plain("x"));
//! let expr = x.clone() + (x.clone() + Expr::int(1));
//! assert_eq!(expr, Expr::Add(vec![x.clone(), x, Expr::int(1)]));
//! ```
//!
//! # Differentiation
//!
//! The [`derivative()`] function computes partial derivatives with respect to a plain symbol.
//! Derivatives of undefined functions (such as the unknown `u(xi, xj)` once it is bound to a
//! point) cannot be computed, and are kept as pending [`Expr::Derivative`] nodes. [`doit()`]
//! forces every pending derivative that can be computed.
//!
//! This crate performs no general simplification: expressions are only cleaned up by the
//! [`builder`]s, which fold numbers and drop trivial zeros and ones.

pub mod builder;
pub mod derivative;
pub mod expr;

pub use derivative::{derivative, doit};
pub use expr::{Expr, Symbol};
