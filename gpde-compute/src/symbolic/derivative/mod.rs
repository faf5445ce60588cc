//! Symbolic partial differentiation.

mod function;

use super::builder::{MultBuilder, SumBuilder};
use super::expr::{Expr, Primary, Symbol};

/// The reason a derivative could not be computed symbolically.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolicDerivativeError {
    /// The function may be differentiable, but we do not support symbolically computing it yet.
    Unsupported(Expr),

    /// The provided sub-expression is not differentiable, such as an abstract operator.
    Undifferentiable(Expr),
}

impl SymbolicDerivativeError {
    /// Returns the sub-expression that could not be differentiated.
    pub fn expr(&self) -> &Expr {
        match self {
            Self::Unsupported(expr) | Self::Undifferentiable(expr) => expr,
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[Expr], var: &str) -> Result<Expr, SymbolicDerivativeError> {
    let mut sum = SumBuilder::default();
    for term in terms {
        sum.add(derivative(term, var)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[Expr], var: &str) -> Result<Expr, SymbolicDerivativeError> {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..product.len() {
        // factors that do not depend on `var` contribute nothing
        if !product[derivative_index].depends_on(var) {
            continue;
        }

        let mut inner_mult = MultBuilder::default();
        for (term_index, term) in product.iter().enumerate() {
            if derivative_index == term_index {
                inner_mult.mult(derivative(term, var)?);
            } else {
                inner_mult.mult(term.clone());
            }
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// Differentiates `base^exp`.
fn power_rule(base: &Expr, exp: &Expr, var: &str) -> Result<Expr, SymbolicDerivativeError> {
    let power = base.clone().pow(exp.clone());
    let ln_base = || Expr::call("ln", vec![base.clone()]);

    if !exp.depends_on(var) {
        // (f^n)' = n * f^(n - 1) * f'
        Ok(Expr::product([
            exp.clone(),
            base.clone().pow(exp.clone() + Expr::int(-1)),
            derivative(base, var)?,
        ]))
    } else if !base.depends_on(var) {
        // (a^g)' = a^g * ln(a) * g'
        Ok(Expr::product([power, ln_base(), derivative(exp, var)?]))
    } else {
        // (f^g)' = f^g * (g' * ln(f) + g * f' / f)
        let inner = Expr::product([derivative(exp, var)?, ln_base()])
            + Expr::product([exp.clone(), derivative(base, var)?, base.clone().pow(Expr::int(-1))]);
        Ok(power * inner)
    }
}

/// Computes the partial derivative of the given expression with respect to the plain symbol
/// `var`. Returns [`Err`] if the derivative could not be symbolically computed.
///
/// Constants, fields and the unknown are independent of every coordinate. Calls to undefined
/// functions of plain symbols, such as `u(xi, xj)`, become pending [`Expr::Derivative`]s, and
/// pending derivatives are extended by one more variable.
pub fn derivative(f: &Expr, var: &str) -> Result<Expr, SymbolicDerivativeError> {
    match f {
        Expr::Apply(..) => Err(SymbolicDerivativeError::Undifferentiable(f.clone())),
        _ if !f.depends_on(var) => Ok(Expr::int(0)),
        Expr::Primary(Primary::Integer(_) | Primary::Float(_)) => Ok(Expr::int(0)),
        Expr::Primary(Primary::Symbol(sym)) => match sym {
            Symbol::Plain(name) if name == var => Ok(Expr::int(1)),
            _ => Ok(Expr::int(0)),
        },
        Expr::Primary(Primary::Call(func, args)) => function::call_derivative(f, func, args, var),
        Expr::Add(terms) => sum_rule(terms, var),
        Expr::Mul(factors) => product_rule(factors, var),
        Expr::Exp(base, exp) => power_rule(base, exp, var),
        Expr::Derivative(..) => Ok(Expr::pending_derivative(f.clone(), [var.to_string()])),
    }
}

/// Returns true if the expression is a call to a function that is not a builtin, such as the
/// unknown `u(xi, xj)`. Derivatives of these can only be left pending.
pub fn is_undefined_call(expr: &Expr) -> bool {
    expr.as_call().is_some_and(|(name, _)| !crate::funcs::is_builtin(name))
}

/// Forces evaluation of every pending [`Expr::Derivative`] in the expression, except those of
/// undefined functions.
pub fn doit(expr: &Expr) -> Result<Expr, SymbolicDerivativeError> {
    expr.try_transform(&mut |node| -> Result<Expr, SymbolicDerivativeError> {
        match node {
            Expr::Derivative(operand, vars) if !is_undefined_call(&operand) => {
                let mut result = *operand;
                for var in &vars {
                    result = derivative(&result, var)?;
                }
                Ok(result)
            },
            other => Ok(other),
        }
    })
}
