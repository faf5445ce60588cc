//! Builders for sums and products that apply basic cleanup rules.
//!
//! These are the only places where expressions are normalized. Nested sums / products are
//! flattened, numeric literals are folded together, and trivial zeros / ones are dropped. Nothing
//! else is simplified: `x * x` stays a product of two factors.

use crate::primitive;
use super::expr::{Expr, Primary};

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Debug, Default)]
pub struct SumBuilder {
    terms: Vec<Expr>,
    constant: Option<Primary>,
}

impl SumBuilder {
    /// Adds a term to the sum.
    pub fn add(&mut self, e: Expr) {
        match e {
            Expr::Add(terms) => terms.into_iter().for_each(|term| self.add(term)),
            Expr::Primary(number @ (Primary::Integer(_) | Primary::Float(_))) => {
                self.constant = match self.constant.take() {
                    Some(constant) => match primitive::add(&constant, &number) {
                        Some(sum) => Some(sum),
                        None => {
                            self.terms.push(Expr::Primary(constant));
                            Some(number)
                        },
                    },
                    None => Some(number),
                };
            },
            e if e.is_zero() => {},
            e => self.terms.push(e),
        }
    }
}

impl From<SumBuilder> for Expr {
    fn from(mut value: SumBuilder) -> Self {
        if let Some(constant) = value.constant {
            let constant = Expr::Primary(constant);
            if !constant.is_zero() {
                value.terms.push(constant);
            }
        }
        Expr::Add(value.terms).downgrade()
    }
}

impl FromIterator<Expr> for SumBuilder {
    fn from_iter<I: IntoIterator<Item = Expr>>(iter: I) -> Self {
        let mut builder = SumBuilder::default();
        iter.into_iter().for_each(|term| builder.add(term));
        builder
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Debug)]
pub struct MultBuilder {
    factors: Vec<Expr>,
    coefficient: Primary,
    zero: bool,
}

impl Default for MultBuilder {
    fn default() -> Self {
        Self {
            factors: Vec::new(),
            coefficient: Primary::Integer(1),
            zero: false,
        }
    }
}

impl MultBuilder {
    /// Multiplies the product by a factor.
    pub fn mult(&mut self, e: Expr) {
        if self.zero {
            return;
        }

        match e {
            Expr::Mul(factors) => factors.into_iter().for_each(|factor| self.mult(factor)),
            e if e.is_zero() => {
                self.zero = true;
                self.factors.clear();
            },
            Expr::Primary(number @ (Primary::Integer(_) | Primary::Float(_))) => {
                match primitive::mul(&self.coefficient, &number) {
                    Some(product) => self.coefficient = product,
                    None => self.factors.push(Expr::Primary(number)),
                }
            },
            e if e.is_one() => {},
            e => self.factors.push(e),
        }
    }
}

impl From<MultBuilder> for Expr {
    fn from(mut value: MultBuilder) -> Self {
        if value.zero {
            return Expr::int(0);
        }
        let coefficient = Expr::Primary(value.coefficient);
        if !coefficient.is_one() {
            value.factors.insert(0, coefficient);
        }
        Expr::Mul(value.factors).downgrade()
    }
}

impl FromIterator<Expr> for MultBuilder {
    fn from_iter<I: IntoIterator<Item = Expr>>(iter: I) -> Self {
        let mut builder = MultBuilder::default();
        iter.into_iter().for_each(|factor| builder.mult(factor));
        builder
    }
}
