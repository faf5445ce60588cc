//! The builtin commands of kernel scripts.

use crate::{
    funcs,
    kernel::{
        self,
        operator::apply,
        point::{Point, Points},
        vector,
        KernelError,
        Kernels,
    },
    numerical::{error::WrongArgumentCount, Ctxt, Eval},
    primitive,
    script::error::{ExpectedAssignment, ExpectedName, InvalidOperand, ReservedName},
    symbolic::expr::{op::{Operator, Partial}, Expr, Symbol},
};
use gpde_error::Error;
use gpde_parser::parser::ast::{call::Call, expr::Expr as AstExpr, literal::Literal};
use log::debug;
use std::ops::Range;
use super::{expect_scalar, scalar, Interpret, Session, Value};

/// The names of all builtin commands, other than the partial-derivative operators and the math
/// functions.
pub const COMMANDS: [&str; 15] = [
    "constant", "field", "unknown", "linear", "time",
    "grad", "div", "curl", "rot", "dot", "cross",
    "derive", "kernel", "kernels", "eval",
];

/// If `name` is a builtin, returns a description of what it refers to.
fn builtin(name: &str) -> Option<&'static str> {
    if COMMANDS.contains(&name) || Partial::from_name(name).is_some() {
        Some("a builtin command")
    } else if funcs::is_builtin(name) {
        Some("a builtin function")
    } else {
        None
    }
}

/// If `name` cannot be assigned to, returns a description of what it refers to.
pub fn reserved(name: &str, session: &Session) -> Option<String> {
    if let Some(kind) = builtin(name) {
        Some(kind.to_string())
    } else if session.is_operator(name) {
        Some("a declared operator".to_string())
    } else {
        session.get_symbol(name).map(|symbol| format!("a declared {}", symbol.kind()))
    }
}

/// Checks that the call has one of the `expected` numbers of arguments.
fn check_args(call: &Call, expected: &[usize]) -> Result<(), Error> {
    if expected.contains(&call.args.len()) {
        return Ok(());
    }
    let expected = expected.iter().map(ToString::to_string).collect::<Vec<_>>();
    Err(Error::new(call.outer_span().to_vec(), WrongArgumentCount {
        name: call.name.name.clone(),
        expected: expected.join(" or "),
        given: call.args.len(),
    }))
}

/// Converts a kernel error into an error highlighting the whole call.
fn kernel_error(call: &Call) -> impl FnOnce(KernelError) -> Error + '_ {
    move |err| err.into_error(vec![call.span()])
}

/// Interprets an argument that must be a vector (a scalar is a vector of one component).
fn components(arg: &AstExpr, session: &mut Session, op: &str) -> Result<Vec<Expr>, Error> {
    let value = arg.interpret(session)?;
    let found = value.typename();
    value.into_components().ok_or_else(|| Error::new(vec![arg.span()], InvalidOperand {
        op: op.to_string(),
        expected: "a vector",
        found,
    }))
}

/// Returns a single component as a scalar, and anything else as a tuple.
fn vector_value(mut components: Vec<Expr>) -> Value {
    if components.len() == 1 {
        Value::Expr(components.remove(0))
    } else {
        Value::Tuple(components)
    }
}

/// `constant(a, ..)`, `field(F, ..)`, `unknown(u)`, `linear(L, ..)` and `time(t, ..)`.
pub fn declare(call: &Call, session: &mut Session) -> Result<Value, Error> {
    let command = call.name.name.as_str();
    if call.args.is_empty() {
        return Err(Error::new(call.outer_span().to_vec(), WrongArgumentCount {
            name: command.to_string(),
            expected: "at least 1".to_string(),
            given: 0,
        }));
    }

    for arg in &call.args {
        let AstExpr::Literal(Literal::Symbol(sym)) = arg.innermost() else {
            return Err(Error::new(vec![arg.span()], ExpectedName { command: command.to_string() }));
        };

        // declared names may be declared again, but builtins and operators keep their meaning
        let kind = builtin(&sym.name)
            .or_else(|| (command != "linear" && session.is_operator(&sym.name)).then_some("a declared operator"));
        if let Some(kind) = kind {
            return Err(Error::new(vec![sym.span.clone()], ReservedName {
                action: "declare",
                name: sym.name.clone(),
                kind: kind.to_string(),
            }));
        }
        debug!("declaring {} `{}`", command, sym.name);
        match command {
            "constant" => session.declare(Symbol::constant(&sym.name)),
            "field" => session.declare(Symbol::field(&sym.name)),
            "unknown" => session.declare(Symbol::unknown(&sym.name)),
            "linear" => session.declare_operator(&sym.name),
            _ => session.declare_time(&sym.name),
        }
    }
    Ok(Value::Unit)
}

/// `dx(e)`, `dy(e)`, `dz(e)`, `dt(e)` and declared linear operators.
pub fn operator(call: &Call, session: &mut Session, op: Operator) -> Result<Value, Error> {
    check_args(call, &[1])?;
    let operand = scalar(&call.args[0], session, op.name())?;
    Ok(Value::Expr(apply(&op, &operand)))
}

/// Builtin math functions, left as calls.
pub fn function(call: &Call, session: &mut Session) -> Result<Value, Error> {
    check_args(call, &[1])?;
    let arg = scalar(&call.args[0], session, &call.name.name)?;
    Ok(Value::Expr(Expr::call(call.name.name.clone(), vec![arg])))
}

/// `grad(e, dim)`.
pub fn grad(call: &Call, session: &mut Session) -> Result<Value, Error> {
    check_args(call, &[2])?;
    let expr = scalar(&call.args[0], session, "grad")?;
    let dim = scalar(&call.args[1], session, "grad")?;
    let dim = match dim.as_number().and_then(primitive::as_f64) {
        Some(n) if n >= 0.0 && n.fract() == 0.0 => n as usize,
        _ => return Err(Error::new(vec![call.args[1].span()], InvalidOperand {
            op: "grad".to_string(),
            expected: "a whole number of dimensions",
            found: "Expression",
        })),
    };
    let components = vector::grad(&expr, dim).map_err(kernel_error(call))?;
    Ok(Value::Tuple(components))
}

/// `div(v)`, `curl(v)` and `rot(v)`.
pub fn vector(call: &Call, session: &mut Session) -> Result<Value, Error> {
    check_args(call, &[1])?;
    let name = call.name.name.as_str();
    let v = components(&call.args[0], session, name)?;
    let result = match name {
        "div" => vector::div(&v).map(Value::Expr),
        "curl" => vector::curl(&v).map(Value::Tuple),
        _ => vector::rot(&v).map(Value::Expr),
    };
    result.map_err(kernel_error(call))
}

/// `dot(a, b)` and `cross(a, b)`.
pub fn product(call: &Call, session: &mut Session) -> Result<Value, Error> {
    check_args(call, &[2])?;
    let name = call.name.name.as_str();
    let a = components(&call.args[0], session, name)?;
    let b = components(&call.args[1], session, name)?;
    let result = match name {
        "dot" => vector::dot(&a, &b).map(Value::Expr),
        _ => vector::cross(&a, &b).map(vector_value),
    };
    result.map_err(kernel_error(call))
}

/// Interprets an argument that must be an evaluation point: a coordinate name, or a tuple of them.
fn point(arg: &AstExpr, session: &mut Session) -> Result<Point, Error> {
    fn coordinate_name(expr: &Expr) -> Option<&str> {
        match expr.as_symbol() {
            Some(Symbol::Plain(name)) => Some(name),
            _ => None,
        }
    }

    let value = arg.interpret(session)?;
    match &value {
        Value::Expr(expr) => {
            if let Some(name) = coordinate_name(expr) {
                return Ok(Point::Scalar(session.coordinate(name)));
            }
        },
        Value::Tuple(items) => {
            let names = items.iter().map(coordinate_name).collect::<Option<Vec<_>>>();
            if let Some(names) = names {
                return Ok(Point::Tuple(names.into_iter().map(|name| session.coordinate(name)).collect()));
            }
        },
        Value::Unit | Value::Number(_) => {},
    }

    Err(KernelError::type_mismatch(format!(
        "expected a coordinate name or a tuple of names, found `{}`",
        value,
    )).into_error(vec![arg.span()]))
}

/// Interprets the trailing point arguments of `derive` and `kernel`.
fn points(args: &[AstExpr], session: &mut Session) -> Result<Points, Error> {
    let i = point(&args[0], session)?;
    match args.get(1) {
        Some(j) => Ok(Points::Pair(i, point(j, session)?)),
        None => Ok(Points::Single(i)),
    }
}

/// `derive(L, p)` and `derive(L, p, q)`.
pub fn derive(call: &Call, session: &mut Session) -> Result<Value, Error> {
    check_args(call, &[2, 3])?;
    let expr = scalar(&call.args[0], session, "derive")?;
    let points = points(&call.args[1..], session)?;
    let derived = kernel::derive(&expr, &points).map_err(kernel_error(call))?;
    Ok(Value::Expr(derived))
}

/// `kernel(L, k, p)` and `kernel(L, k, p, q)`.
pub fn kernel(call: &Call, session: &mut Session) -> Result<Value, Error> {
    check_args(call, &[3, 4])?;
    let expr = scalar(&call.args[0], session, "kernel")?;
    let base = scalar(&call.args[1], session, "kernel")?;
    let points = points(&call.args[2..], session)?;
    let specialized = kernel::specialize(&expr, &base, &points).map_err(kernel_error(call))?;
    Ok(Value::Expr(specialized))
}

/// `kernels(L, k, p, q)`, returning the tuple `(k_uu, k_fu, k_uf, k_ff)`.
pub fn kernels(call: &Call, session: &mut Session) -> Result<Value, Error> {
    check_args(call, &[4])?;
    let expr = scalar(&call.args[0], session, "kernels")?;
    let base = scalar(&call.args[1], session, "kernels")?;
    let i = point(&call.args[2], session)?;
    let j = point(&call.args[3], session)?;
    let Kernels { uu, fu, uf, ff } = Kernels::derive(&expr, &base, &i, &j)
        .map_err(kernel_error(call))?;
    Ok(Value::Tuple(vec![uu, fu, uf, ff]))
}

/// Evaluates `expr` numerically, reporting errors at `span`.
fn evaluate(expr: &Expr, ctxt: &Ctxt, span: Range<usize>) -> Result<f64, Error> {
    expr.eval(ctxt).map_err(|err| err.into_error(vec![span]))
}

/// `eval(e, x = 1.5, ..)`.
pub fn eval(call: &Call, session: &mut Session) -> Result<Value, Error> {
    let Some((target, assignments)) = call.args.split_first() else {
        return Err(Error::new(call.outer_span().to_vec(), WrongArgumentCount {
            name: "eval".to_string(),
            expected: "at least 1".to_string(),
            given: 0,
        }));
    };

    let mut ctxt = Ctxt::default();
    for arg in assignments {
        let AstExpr::Assign(assign) = arg else {
            return Err(Error::new(vec![arg.span()], ExpectedAssignment));
        };
        let value = scalar(&assign.value, session, "eval")?;
        let value = evaluate(&value, &ctxt, assign.value.span())?;
        ctxt.add_var(&assign.target.name, value);
    }

    match target.interpret(session)? {
        Value::Tuple(items) => {
            let values = items.iter()
                .map(|item| evaluate(item, &ctxt, target.span()).map(Expr::number))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Tuple(values))
        },
        other => {
            let expr = expect_scalar(other, "eval", target.span())?;
            Ok(Value::Number(evaluate(&expr, &ctxt, target.span())?))
        },
    }
}
