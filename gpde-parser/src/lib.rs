//! Tokenizer and parser for gpde kernel scripts.
//!
//! A kernel script is a list of statements separated by newlines or semicolons. Each statement is
//! an expression or an assignment:
//!
//! ```text
//! constant(alpha); unknown(u)
//! L = alpha * u + dx(u)
//! k = theta * exp(-(xi - xj)^2 / 2)
//! kernel(L, k, xi, xj)
//! ```
//!
//! Use [`parser::Parser`] to turn source code into an abstract syntax tree.

pub mod parser;
pub mod tokenizer;
