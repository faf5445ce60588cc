//! The algebra of abstract linear operators.
//!
//! [`apply`] pushes an operator as far into an expression as linearity allows:
//!
//! - over a sum, the operator is applied to each term;
//! - over a product, coefficients (numbers, constants, and powers of them) are pulled out, and
//! the operator is applied to the product of the remaining operands. A differential operator
//! expands a product of exactly two operands with the Leibniz rule, `d(ab) = a d(b) + d(a) b`;
//! - anything else is wrapped in an unevaluated [`Expr::Apply`] node, to be resolved by
//! [`derive`](super::derive()).
//!
//! Products of three or more operands are wrapped as they are. The derivation rejects them under
//! a differential operator rather than guessing an expansion.

use crate::symbolic::expr::{op::Operator, Expr, Primary, Symbol};

/// Returns true if the expression is a coefficient: a number, a [`Symbol::Constant`], or a
/// product or power made only of coefficients.
pub fn is_coefficient(expr: &Expr) -> bool {
    match expr {
        Expr::Primary(Primary::Integer(_) | Primary::Float(_)) => true,
        Expr::Primary(Primary::Symbol(Symbol::Constant(_))) => true,
        Expr::Mul(factors) => factors.iter().all(is_coefficient),
        Expr::Exp(base, exp) => is_coefficient(base) && is_coefficient(exp),
        _ => false,
    }
}

/// Applies `op` to `expr`.
pub fn apply(op: &Operator, expr: &Expr) -> Expr {
    match expr {
        Expr::Add(terms) => Expr::sum(terms.iter().map(|term| apply(op, term))),
        Expr::Mul(factors) => {
            let (coefficients, operands): (Vec<_>, Vec<_>) = factors
                .iter()
                .cloned()
                .partition(is_coefficient);
            let coefficient = Expr::product(coefficients);

            let applied = match operands.as_slice() {
                [] => return coefficient,
                [operand] => apply(op, operand),
                [a, b] if op.is_differential() => {
                    a.clone() * apply(op, b) + apply(op, a) * b.clone()
                },
                _ => wrap(op, Expr::Mul(operands)),
            };
            coefficient * applied
        },
        _ if is_coefficient(expr) => expr.clone(),
        _ => wrap(op, expr.clone()),
    }
}

/// Leaves `op` applied to `operand`, unevaluated.
fn wrap(op: &Operator, operand: Expr) -> Expr {
    Expr::Apply(op.clone(), Box::new(operand))
}
