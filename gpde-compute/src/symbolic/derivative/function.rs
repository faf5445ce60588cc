//! Symbolic derivatives of the functions supported in [`crate::funcs`].

use crate::symbolic::expr::{Expr, Symbol};
use super::{derivative, SymbolicDerivativeError};

/// Computes the derivative of a function call and performs the chain rule.
///
/// `call` is the whole call expression, used for pending derivatives and error reporting.
pub(super) fn call_derivative(
    call: &Expr,
    func: &str,
    args: &[Expr],
    var: &str,
) -> Result<Expr, SymbolicDerivativeError> {
    if !crate::funcs::is_builtin(func) {
        // an undefined function of coordinates, such as `u(xi, xj)`
        let all_plain = args.iter().all(|arg| matches!(arg.as_symbol(), Some(Symbol::Plain(_))));
        if all_plain {
            return Ok(Expr::pending_derivative(call.clone(), [var.to_string()]));
        }
        return Err(SymbolicDerivativeError::Unsupported(call.clone()));
    }

    let [arg] = args else {
        return Err(SymbolicDerivativeError::Unsupported(call.clone()));
    };
    let g = || arg.clone();
    let f = |name: &str| Expr::call(name, vec![arg.clone()]);

    let outer = match func {
        "exp" => call.clone(),
        "ln" => g().pow(Expr::int(-1)),
        "sin" => f("cos"),
        "cos" => -f("sin"),
        "tan" => f("cos").pow(Expr::int(-2)),
        "sqrt" => Expr::float(0.5) * g().pow(Expr::float(-0.5)),
        "sinh" => f("cosh"),
        "cosh" => f("sinh"),
        "tanh" => f("cosh").pow(Expr::int(-2)),
        _ => return Err(SymbolicDerivativeError::Unsupported(call.clone())),
    };

    Ok(outer * derivative(arg, var)?)
}
