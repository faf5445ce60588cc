mod assign;
mod binary;
mod call;
mod command;
mod literal;
mod unary;

use gpde_error::Error;
use gpde_parser::parser::ast::{expr::Expr as AstExpr, stmt::Stmt, tuple::Tuple};
use std::ops::Range;
use super::{error::InvalidOperand, session::Session, value::Value};
use crate::symbolic::expr::Expr;

/// Any node of the syntax tree that can be interpreted to produce a [`Value`].
pub trait Interpret {
    /// Interpret the node in the given session.
    fn interpret(&self, session: &mut Session) -> Result<Value, Error>;
}

impl Interpret for Stmt {
    fn interpret(&self, session: &mut Session) -> Result<Value, Error> {
        self.expr.interpret(session)
    }
}

impl Interpret for AstExpr {
    fn interpret(&self, session: &mut Session) -> Result<Value, Error> {
        match self {
            AstExpr::Literal(literal) => literal.interpret(session),
            AstExpr::Paren(paren) => paren.expr.interpret(session),
            AstExpr::Tuple(tuple) => tuple.interpret(session),
            AstExpr::Call(call) => call.interpret(session),
            AstExpr::Unary(unary) => unary.interpret(session),
            AstExpr::Binary(binary) => binary.interpret(session),
            AstExpr::Assign(assign) => assign.interpret(session),
        }
    }
}

impl Interpret for Tuple {
    fn interpret(&self, session: &mut Session) -> Result<Value, Error> {
        let items = self.values
            .iter()
            .map(|value| scalar(value, session, "a tuple"))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Tuple(items))
    }
}

/// Interprets `expr`, which must produce a scalar expression.
pub(crate) fn scalar(expr: &AstExpr, session: &mut Session, op: &str) -> Result<Expr, Error> {
    let value = expr.interpret(session)?;
    expect_scalar(value, op, expr.span())
}

/// Checks that `value` is a scalar expression.
pub(crate) fn expect_scalar(value: Value, op: &str, span: Range<usize>) -> Result<Expr, Error> {
    let found = value.typename();
    value.into_expr().ok_or_else(|| Error::new(vec![span], InvalidOperand {
        op: op.to_string(),
        expected: "an expression",
        found,
    }))
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use crate::kernel::KernelError;
    use crate::numerical::error::{EvalError, UndefinedFunction};
    use crate::symbolic::expr::{Primary, Symbol};
    use gpde_error::ErrorKind;
    use pretty_assertions::assert_eq;
    use super::*;

    fn run(source: &str) -> Vec<Value> {
        Session::new().run(source).unwrap()
    }

    fn last(source: &str) -> Value {
        run(source).pop().unwrap()
    }

    fn number(value: Value) -> f64 {
        match value {
            Value::Number(n) => n,
            other => panic!("expected a number, got {}", other),
        }
    }

    fn error(source: &str) -> Error {
        Session::new().run(source).unwrap_err()
    }

    #[test]
    fn arithmetic_builds_expressions() {
        assert_eq!(last("x = 2\n3 * x ^ 2 - 1").to_string(), "11");
        assert_eq!(last("a + b / 2").to_string(), "a + b * 2^(-1)");
        assert_eq!(last("-(x + 1)").to_string(), "-(x + 1)");
    }

    #[test]
    fn declarations_tag_symbols() {
        let value = last("constant(alpha); field(F); unknown(u)\nalpha * F * u");
        let Value::Expr(Expr::Mul(factors)) = value else {
            panic!("expected a product");
        };
        let symbols = factors.iter().filter_map(Expr::as_symbol).cloned().collect::<Vec<_>>();
        assert_eq!(symbols, [Symbol::constant("alpha"), Symbol::field("F"), Symbol::unknown("u")]);
    }

    #[test]
    fn operators() {
        assert_eq!(last("unknown(u)\ndx(dy(u))").to_string(), "dx(dy(u))");
        assert_eq!(last("unknown(u); constant(a)\ndx(a * u + 2)").to_string(), "a * dx(u) + 2");
        assert_eq!(last("unknown(u); linear(L)\nL(u)").to_string(), "L(u)");
        assert_eq!(last("unknown(u)\ndiv(grad(u, 2))").to_string(), "dx(dx(u)) + dy(dy(u))");
    }

    #[test]
    fn derive_and_kernel() {
        let source = "
            unknown(u); constant(alpha)
            L = alpha * u + dx(u)
            derive(L, xi, xj)
        ";
        assert_eq!(
            last(source).to_string(),
            "alpha * (alpha * u(xi, xj) + Derivative(u(xi, xj), xi)) + alpha * Derivative(u(xi, xj), xj) + Derivative(u(xi, xj), xi, xj)",
        );

        let source = "
            unknown(u); constant(alpha)
            L = alpha * u + dx(u)
            k = exp(-(xi - xj)^2 / 2)
            kff = kernel(L, k, xi, xj)
            eval(kff, alpha = 0.5, xi = 0.3, xj = -0.1)
        ";
        let r: f64 = 0.4;
        let expected = (-r * r / 2.0).exp() * (0.25 + 1.0 - r * r);
        assert_float_absolute_eq!(number(last(source)), expected, 1e-12);
    }

    #[test]
    fn kernels_and_points() {
        let source = "
            unknown(u); time(ti, tj)
            L = dt(u) - dx(dx(u))
            derive(L, (ti, xi))
        ";
        assert_eq!(
            last(source).to_string(),
            "Derivative(u(ti, xi), ti) - Derivative(u(ti, xi), xi, xi)",
        );

        let source = "
            unknown(u)
            ks = kernels(dx(u), exp(-(xi - xj)^2 / 2), xi, xj)
            eval(ks, xi = 1, xj = 1)
        ";
        let Value::Tuple(values) = last(source) else {
            panic!("expected a tuple");
        };
        let values = values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
        assert_eq!(values, ["1", "0", "0", "1"]);
    }

    #[test]
    fn eval_uses_constants_and_functions() {
        assert_float_absolute_eq!(number(last("eval(cos(pi) + x, x = 2)")), 1.0, 1e-12);
        assert_float_absolute_eq!(number(last("y = 3\neval(y * z, z = y + 1)")), 12.0, 1e-12);
    }

    #[test]
    fn kernel_errors_are_reported() {
        let err = error("unknown(u); unknown(v)\nderive(u + v, xi)");
        assert!(err.kind.message().contains("2 unknowns"));
        assert_eq!(err.spans, [23..40]);

        let err = error("unknown(u)\nderive(u, 2)");
        assert_eq!(
            err.kind.message(),
            KernelError::type_mismatch("expected a coordinate name or a tuple of names, found `2`").message(),
        );
    }

    #[test]
    fn undefined_functions_have_suggestions() {
        let err = error("unknown(u)\ndirive(u, xi)");
        let expected = UndefinedFunction {
            name: "dirive".to_string(),
            suggestions: vec!["derive".to_string()],
        };
        assert_eq!(err.kind.message(), expected.message());
        assert_eq!(err.spans, [11..17]);
    }

    #[test]
    fn evaluation_errors_are_reported() {
        let err = error("eval(x + 1)");
        let expected = EvalError::UndefinedVariable(crate::numerical::error::UndefinedVariable {
            name: "x".to_string(),
        });
        assert_eq!(err.kind.message(), expected.message());
    }

    #[test]
    fn invalid_operands() {
        let err = error("(a, b) + 1");
        assert!(err.kind.message().contains("found a value of type `Tuple`"));

        let err = error("constant(2)");
        assert!(err.kind.message().contains("expects names"));

        let err = error("unknown(u)\nu = 2");
        assert!(err.kind.message().contains("cannot assign to `u`"));
    }

    #[test]
    fn declarations_reject_builtins() {
        let err = error("unknown(exp)\nkernel(dx(exp), exp(-(xi - xj)^2 / 2), xi)");
        assert_eq!(err.kind.message(), "cannot declare `exp`");
        assert_eq!(err.spans, [8..11]);

        for source in ["field(dx)", "constant(kernel)", "time(sin)", "linear(derive)", "linear(L); unknown(L)"] {
            let err = error(source);
            assert!(err.kind.message().starts_with("cannot declare"), "{}", source);
        }

        // declared names can be declared again
        let value = last("field(u); unknown(u); linear(L); linear(L)\nL(u)");
        assert_eq!(value.to_string(), "L(u)");
    }

    #[test]
    fn assignments_return_their_value() {
        let values = run("k = 2 * x; k");
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], values[1]);
        let Value::Expr(Expr::Mul(factors)) = &values[1] else {
            panic!("expected a product");
        };
        assert_eq!(factors[0], Expr::Primary(Primary::Integer(2)));
    }
}
