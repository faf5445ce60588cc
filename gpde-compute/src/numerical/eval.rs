use crate::symbolic::expr::{Expr, Primary};
use super::{
    ctxt::Ctxt,
    error::{
        EvalError,
        NonFinite,
        UndefinedFunction,
        UndefinedVariable,
        Unevaluated,
        WrongArgumentCount,
    },
};

/// Any type that can be evaluated to produce a number.
pub trait Eval {
    /// Evaluate the expression to produce a number, using the given context.
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, EvalError>;

    /// Evaluate the expression to produce a number, using the default context.
    fn eval_default(&self) -> Result<f64, EvalError> {
        self.eval(&Default::default())
    }
}

impl Eval for Primary {
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, EvalError> {
        match self {
            Primary::Integer(int) => Ok(*int as f64),
            Primary::Float(float) => Ok(*float),
            Primary::Symbol(sym) => ctxt.get_var(sym.name())
                .ok_or_else(|| EvalError::UndefinedVariable(UndefinedVariable {
                    name: sym.name().to_string(),
                })),
            Primary::Call(name, args) => {
                let func = ctxt.get_func(name)
                    .ok_or_else(|| EvalError::UndefinedFunction(UndefinedFunction {
                        name: name.clone(),
                        suggestions: ctxt.get_similar_funcs(name)
                            .into_iter()
                            .map(str::to_string)
                            .collect(),
                    }))?;
                let [arg] = args.as_slice() else {
                    return Err(EvalError::WrongArgumentCount(WrongArgumentCount {
                        name: name.clone(),
                        expected: "1".to_string(),
                        given: args.len(),
                    }));
                };
                Ok(func(arg.eval(ctxt)?))
            },
        }
    }
}

impl Eval for Expr {
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, EvalError> {
        let value = match self {
            Expr::Primary(primary) => primary.eval(ctxt)?,
            Expr::Add(terms) => terms.iter().try_fold(0.0, |sum, term| Ok::<_, EvalError>(sum + term.eval(ctxt)?))?,
            Expr::Mul(factors) => factors.iter().try_fold(1.0, |product, factor| Ok::<_, EvalError>(product * factor.eval(ctxt)?))?,
            Expr::Exp(base, exp) => base.eval(ctxt)?.powf(exp.eval(ctxt)?),
            Expr::Apply(..) | Expr::Derivative(..) => {
                return Err(EvalError::Unevaluated(Unevaluated { expr: self.to_string() }));
            },
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite(NonFinite { expr: self.to_string() }))
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use crate::symbolic::expr::{op::Partial, Symbol};
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(Symbol::plain(name))
    }

    #[test]
    fn arithmetic() {
        let mut ctxt = Ctxt::default();
        ctxt.add_var("x", 3.0);

        // (x + 1) / 2 - x^2
        let expr = (sym("x") + Expr::int(1)) * Expr::int(2).pow(Expr::int(-1))
            - sym("x").pow(Expr::int(2));
        assert_float_absolute_eq!(expr.eval(&ctxt).unwrap(), -7.0, 1e-12);
    }

    #[test]
    fn builtin_functions_and_constants() {
        let expr = Expr::call("cos", vec![sym("pi")]) + Expr::call("ln", vec![sym("e")]);
        assert_float_absolute_eq!(expr.eval_default().unwrap(), 0.0, 1e-12);
    }

    #[test]
    fn every_symbol_kind_is_looked_up_by_name() {
        let mut ctxt = Ctxt::new();
        ctxt.add_var("alpha", 2.0);
        ctxt.add_var("F", 5.0);
        let expr = Expr::symbol(Symbol::constant("alpha")) * Expr::symbol(Symbol::field("F"));
        assert_eq!(expr.eval(&ctxt), Ok(10.0));
    }

    #[test]
    fn undefined_variable() {
        let err = sym("theta").eval_default().unwrap_err();
        assert_eq!(err, EvalError::UndefinedVariable(UndefinedVariable { name: "theta".to_string() }));
    }

    #[test]
    fn undefined_function_suggestions() {
        let expr = Expr::call("cosj", vec![Expr::int(1)]);
        match expr.eval_default() {
            Err(EvalError::UndefinedFunction(e)) => assert_eq!(e.suggestions, ["cos", "cosh"]),
            other => panic!("expected an undefined function, got {:?}", other),
        }
    }

    #[test]
    fn wrong_argument_count() {
        let expr = Expr::call("exp", vec![Expr::int(1), Expr::int(2)]);
        assert!(matches!(expr.eval_default(), Err(EvalError::WrongArgumentCount(_))));
    }

    #[test]
    fn operators_have_no_value() {
        let expr = Expr::Apply(Partial::Dx.into(), Box::new(Expr::symbol(Symbol::unknown("u"))));
        assert_eq!(
            expr.eval_default(),
            Err(EvalError::Unevaluated(Unevaluated { expr: "dx(u)".to_string() })),
        );
    }

    #[test]
    fn non_finite() {
        let expr = Expr::int(0).pow(Expr::int(-1));
        assert!(matches!(expr.eval_default(), Err(EvalError::NonFinite(_))));
    }
}
