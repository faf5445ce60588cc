//! Rewriting an operator expression into derivatives of the unknown at one or two points.
//!
//! The unknown `u` of an operator expression `L` is replaced by a function of the coordinates,
//! `u(args)`, and every abstract partial-derivative operator acting on it is resolved into a
//! [`Expr::Derivative`] along the coordinate of the point that the operator refers to.
//!
//! For a pair of points `(i, j)`, the operator is first resolved at point `i`. The result is then
//! substituted for `u` in `L` and resolved again at point `j`, producing `L_j L_i u`.

use crate::symbolic::expr::{op::{Operator, Partial}, Expr, Primary, Symbol};
use log::{debug, trace};
use super::{
    error::{
        KernelError,
        MalformedOperator,
        MissingCoordinate,
        ResidualOperator,
        UnknownCardinality,
        UnsupportedOperand,
        WrongUnknown,
    },
    operator::{apply, is_coefficient},
    point::{Point, Points},
};

/// Derives the operator expression `expr` at the given points.
///
/// The expression must contain exactly one distinct [`Symbol::Unknown`]. The result is expressed
/// in terms of the unknown called with the coordinates of the points, and its partial
/// derivatives, with no abstract operator acting on the unknown left.
pub fn derive(expr: &Expr, points: &Points) -> Result<Expr, KernelError> {
    points.validate()?;
    let unknown = find_unknown(expr)?;
    derive_at(expr, &unknown, points)
}

/// Derives the operator expression `expr` at the given points, checking that `unknown` is the
/// unknown it is expressed over.
pub fn derive_over(expr: &Expr, unknown: &Symbol, points: &Points) -> Result<Expr, KernelError> {
    points.validate()?;
    let found = find_unknown(expr)?;
    if found != *unknown {
        return Err(KernelError::WrongUnknown(WrongUnknown {
            expected: unknown.name().to_string(),
            found: found.name().to_string(),
        }));
    }
    derive_at(expr, &found, points)
}

fn derive_at(expr: &Expr, unknown: &Symbol, points: &Points) -> Result<Expr, KernelError> {
    let unknown_expr = Expr::symbol(unknown.clone());
    let call = Expr::call(unknown.name(), points.args());
    debug!("deriving `{}` over `{}` at {}", expr, unknown, points);

    let mut acc = unknown_expr.clone();
    for point in points.iter() {
        let lifted = lift(expr, &unknown_expr, &acc);
        trace!("lifted: {}", lifted);
        acc = resolve(&lifted, &unknown_expr, &call, point)?;
        debug!("resolved at {}: {}", point, acc);
    }

    check_residual(&acc, unknown, &call)?;
    Ok(acc)
}

/// Finds the unique unknown of the expression.
pub fn find_unknown(expr: &Expr) -> Result<Symbol, KernelError> {
    let mut unknowns = expr.free_symbols()
        .into_iter()
        .filter(|sym| matches!(sym, Symbol::Unknown(_)))
        .collect::<Vec<_>>();

    if unknowns.len() == 1 {
        Ok(unknowns.remove(0))
    } else {
        Err(KernelError::UnknownCardinality(UnknownCardinality {
            found: unknowns.iter().map(|sym| sym.name().to_string()).collect(),
        }))
    }
}

/// Substitutes `acc` for the unknown in `expr`, re-applying every operator to its new operand.
fn lift(expr: &Expr, unknown: &Expr, acc: &Expr) -> Expr {
    expr.transform(&mut |node| match node {
        ref sym if sym == unknown => acc.clone(),
        Expr::Apply(op, operand) => apply(&op, &operand),
        other => other,
    })
}

/// If `expr` is a chain of partial-derivative operators applied directly to `unknown`, such as
/// `dx(dy(u))`, returns the operators from the outermost to the innermost.
fn partial_chain(expr: &Expr, unknown: &Expr) -> Option<Vec<Partial>> {
    let mut chain = Vec::new();
    let mut current = expr;
    while let Expr::Apply(Operator::Partial(op), operand) = current {
        chain.push(*op);
        current = &**operand;
    }
    (!chain.is_empty() && current == unknown).then_some(chain)
}

/// Returns the name of the coordinate that `op` refers to at `point`.
fn coordinate(op: Partial, point: &Point) -> Result<String, KernelError> {
    point.coordinate_for(op)
        .map(|coord| coord.name.clone())
        .ok_or_else(|| KernelError::MissingCoordinate(MissingCoordinate {
            op: op.name().to_string(),
            coordinate: op.coordinate().to_string(),
            point: point.to_string(),
        }))
}

/// Returns true if `expr` is the unknown called at the points, or a derivative of it.
fn is_unknown_term(expr: &Expr, call: &Expr) -> bool {
    match expr {
        Expr::Derivative(operand, _) => **operand == *call,
        _ => expr == call,
    }
}

/// Resolves the partial-derivative operators acting on the unknown at a single point.
fn resolve(expr: &Expr, unknown: &Expr, call: &Expr, point: &Point) -> Result<Expr, KernelError> {
    // operators directly wrapping the unknown, highest order first, so that `dx(u)` is never
    // substituted inside a `dx(dx(u))` that is still waiting for its turn
    let mut chains: Vec<(Expr, Vec<Partial>)> = Vec::new();
    for node in expr.post_order_iter() {
        if let Some(ops) = partial_chain(node, unknown) {
            if chains.iter().all(|(seen, _)| seen != node) {
                chains.push((node.clone(), ops));
            }
        }
    }
    chains.sort_by(|(_, a), (_, b)| b.len().cmp(&a.len()));

    let mut resolved = expr.clone();
    for (pattern, ops) in chains {
        let vars = ops.into_iter()
            .map(|op| coordinate(op, point))
            .collect::<Result<Vec<_>, _>>()?;
        let replacement = Expr::pending_derivative(call.clone(), vars);
        trace!("{} -> {}", pattern, replacement);
        resolved = resolved.subs(&pattern, &replacement);
    }

    // operators that were not adjacent to the unknown, such as those distributed by the Leibniz
    // rule, or applied to the result of a previous point
    let resolved = resolved.try_transform(&mut |node| -> Result<Expr, KernelError> {
        match node {
            Expr::Apply(Operator::Partial(op), operand) if is_unknown_term(&operand, call) => {
                let var = coordinate(op, point)?;
                trace!("extending {} along {}", operand, var);
                Ok(Expr::pending_derivative(*operand, [var]))
            },
            other => Ok(other),
        }
    })?;

    Ok(resolved.subs(unknown, call))
}

/// Returns true if `expr` only involves known fields and coefficients, such as `dx(F)` or
/// `alpha * F * G`.
fn is_field_term(expr: &Expr) -> bool {
    match expr {
        Expr::Primary(Primary::Symbol(Symbol::Field(_))) => true,
        Expr::Apply(_, operand) => is_field_term(operand),
        Expr::Add(items) | Expr::Mul(items) => items.iter()
            .all(|item| is_coefficient(item) || is_field_term(item)),
        Expr::Exp(base, exp) => is_field_term(base) && is_coefficient(exp),
        _ => false,
    }
}

/// Checks that every operator left in the derived expression acts on known fields only.
///
/// A partial derivative still wrapping the unknown, or an abstract linear operator acting on it,
/// is a residual operator. A partial derivative of a nonlinear function of the unknown, such as
/// `dx(u^2)`, is an unsupported operand.
fn check_residual(expr: &Expr, unknown: &Symbol, call: &Expr) -> Result<(), KernelError> {
    for node in expr.post_order_iter() {
        let Expr::Apply(op, operand) = node else {
            continue;
        };

        if let (true, Expr::Mul(factors)) = (op.is_differential(), &**operand) {
            return Err(KernelError::MalformedOperator(MalformedOperator {
                op: op.name().to_string(),
                operands: factors.iter().filter(|f| !is_coefficient(f)).count(),
                term: node.to_string(),
            }));
        }

        if is_field_term(operand) {
            continue;
        }

        let mentions_unknown = operand.mentions_function(unknown.name())
            || operand.free_symbols().contains(unknown);
        if mentions_unknown && (!op.is_differential() || is_unknown_term(operand, call)) {
            return Err(KernelError::ResidualOperator(ResidualOperator {
                term: node.to_string(),
            }));
        }

        return Err(KernelError::UnsupportedOperand(UnsupportedOperand {
            op: op.name().to_string(),
            operand: operand.to_string(),
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use crate::numerical::{Ctxt, Eval};
    use pretty_assertions::assert_eq;
    use super::*;
    use super::super::point::Coordinate;

    fn u() -> Expr {
        Expr::symbol(Symbol::unknown("u"))
    }

    fn sym(name: &str) -> Expr {
        Expr::symbol(Symbol::plain(name))
    }

    fn constant(name: &str) -> Expr {
        Expr::symbol(Symbol::constant(name))
    }

    fn field(name: &str) -> Expr {
        Expr::symbol(Symbol::field(name))
    }

    fn d(op: Partial, expr: &Expr) -> Expr {
        apply(&op.into(), expr)
    }

    fn call(args: &[&str]) -> Expr {
        Expr::call("u", args.iter().map(|arg| sym(arg)).collect())
    }

    fn derivative(args: &[&str], vars: &[&str]) -> Expr {
        Expr::Derivative(Box::new(call(args)), vars.iter().map(|v| v.to_string()).collect())
    }

    fn pair() -> Points {
        Points::Pair(Point::scalar("xi"), Point::scalar("xj"))
    }

    #[test]
    fn identity_on_bare_unknown() {
        let single = derive(&u(), &Points::Single(Point::scalar("xi"))).unwrap();
        assert_eq!(single, call(&["xi"]));

        let pair = derive(&u(), &pair()).unwrap();
        assert_eq!(pair, call(&["xi", "xj"]));
    }

    #[test]
    fn order_preservation() {
        let expr = d(Partial::Dx, &d(Partial::Dx, &u()));

        let single = derive(&expr, &Points::Single(Point::scalar("xi"))).unwrap();
        assert_eq!(single, derivative(&["xi"], &["xi", "xi"]));

        let pair = derive(&expr, &pair()).unwrap();
        assert_eq!(pair, derivative(&["xi", "xj"], &["xi", "xi", "xj", "xj"]));
        assert_eq!(pair.to_string(), "Derivative(u(xi, xj), xi, xi, xj, xj)");
    }

    #[test]
    fn lower_orders_do_not_corrupt_higher_orders() {
        let expr = d(Partial::Dx, &d(Partial::Dx, &u())) + d(Partial::Dx, &u()) + u();
        let derived = derive(&expr, &Points::Single(Point::scalar("xi"))).unwrap();
        let expected = derivative(&["xi"], &["xi", "xi"])
            + derivative(&["xi"], &["xi"])
            + call(&["xi"]);
        assert_eq!(derived, expected);
    }

    #[test]
    fn gradient_index_selects_coordinate() {
        let point = Point::spatial(["xi", "yi", "zi"]);
        let derived = derive(&d(Partial::Dy, &u()), &Points::Single(point)).unwrap();
        assert_eq!(derived, derivative(&["xi", "yi", "zi"], &["yi"]));

        let mixed = d(Partial::Dx, &d(Partial::Dz, &u()));
        let point = Point::spatial(["xi", "yi", "zi"]);
        let derived = derive(&mixed, &Points::Single(point)).unwrap();
        assert_eq!(derived, derivative(&["xi", "yi", "zi"], &["xi", "zi"]));
    }

    #[test]
    fn leibniz_with_a_field() {
        let expr = d(Partial::Dx, &(field("F") * u()));
        let derived = derive(&expr, &Points::Single(Point::scalar("x"))).unwrap();
        let expected = field("F") * derivative(&["x"], &["x"])
            + d(Partial::Dx, &field("F")) * call(&["x"]);
        assert_eq!(derived, expected);
    }

    #[test]
    fn linearity() {
        let p = d(Partial::Dx, &d(Partial::Dx, &u()));
        let q = constant("mu") * u() + d(Partial::Dx, &u());
        let (a, b) = (constant("a"), constant("b"));
        let point = Points::Single(Point::scalar("xi"));

        let combined = derive(&(a.clone() * p.clone() + b.clone() * q.clone()), &point).unwrap();
        let separate = a * derive(&p, &point).unwrap() + b * derive(&q, &point).unwrap();

        // give each derivative term a value, highest order first so that the call inside the
        // derivatives is still intact when they are replaced
        let terms = [
            derivative(&["xi"], &["xi", "xi"]),
            derivative(&["xi"], &["xi"]),
            call(&["xi"]),
        ];
        let valued = |expr: &Expr| terms.iter()
            .enumerate()
            .fold(expr.clone(), |acc, (i, term)| acc.subs(term, &Expr::float(1.5 + i as f64)));

        let mut ctxt = Ctxt::default();
        for (name, value) in [("a", 0.7), ("b", -1.3), ("mu", 2.1)] {
            ctxt.add_var(name, value);
        }
        let lhs = valued(&combined).eval(&ctxt).unwrap();
        let rhs = valued(&separate).eval(&ctxt).unwrap();
        assert_float_absolute_eq!(lhs, rhs, 1e-12);
        assert_float_absolute_eq!(lhs, 0.7 * 1.5 - 1.3 * (2.1 * 3.5 + 2.5), 1e-12);
    }

    #[test]
    fn pairs_compose_the_operator() {
        // L = mu * u + dx(u), so L_j L_i u = mu^2 u + mu u_xi + mu u_xj + u_xixj
        let expr = constant("mu") * u() + d(Partial::Dx, &u());
        let derived = derive(&expr, &pair()).unwrap();

        let terms = [
            derivative(&["xi", "xj"], &["xi", "xj"]),
            derivative(&["xi", "xj"], &["xi"]),
            derivative(&["xi", "xj"], &["xj"]),
            call(&["xi", "xj"]),
        ];
        let valued = terms.iter()
            .zip([2.0, 3.0, 5.0, 7.0])
            .fold(derived, |acc, (term, value)| acc.subs(term, &Expr::float(value)));

        let mut ctxt = Ctxt::default();
        ctxt.add_var("mu", 0.5);
        let expected = 0.25 * 7.0 + 0.5 * 3.0 + 0.5 * 5.0 + 2.0;
        assert_float_absolute_eq!(valued.eval(&ctxt).unwrap(), expected, 1e-12);
    }

    #[test]
    fn cardinality_guard() {
        let two = u() + Expr::symbol(Symbol::unknown("v"));
        let err = derive(&two, &pair()).unwrap_err();
        assert_eq!(err, KernelError::UnknownCardinality(UnknownCardinality {
            found: vec!["u".to_string(), "v".to_string()],
        }));

        let none = constant("a") * field("F");
        let err = derive(&none, &pair()).unwrap_err();
        assert_eq!(err, KernelError::UnknownCardinality(UnknownCardinality { found: vec![] }));
    }

    #[test]
    fn three_operand_products_are_rejected() {
        let expr = d(Partial::Dx, &(field("F") * field("G") * u()));
        let err = derive(&expr, &Points::Single(Point::scalar("x"))).unwrap_err();
        assert!(matches!(err, KernelError::MalformedOperator(MalformedOperator { operands: 3, .. })));
    }

    #[test]
    fn abstract_linear_operators_are_residual() {
        let expr = apply(&Operator::Linear("L".to_string()), &u());
        let err = derive(&expr, &Points::Single(Point::scalar("x"))).unwrap_err();
        assert!(matches!(err, KernelError::ResidualOperator(_)));
    }

    #[test]
    fn operators_on_coordinates_are_unsupported() {
        let expr = u() + d(Partial::Dx, &sym("x"));
        let err = derive(&expr, &Points::Single(Point::scalar("x"))).unwrap_err();
        assert!(matches!(err, KernelError::UnsupportedOperand(_)));
    }

    #[test]
    fn nonlinear_operands_are_unsupported() {
        let point = Points::Single(Point::scalar("x"));
        let squared = d(Partial::Dx, &u().pow(Expr::int(2)));
        let err = derive(&squared, &point).unwrap_err();
        assert_eq!(err, KernelError::UnsupportedOperand(UnsupportedOperand {
            op: "dx".to_string(),
            operand: "u(x)^2".to_string(),
        }));

        let exp = d(Partial::Dx, &Expr::call("exp", vec![u()]));
        let err = derive(&exp, &point).unwrap_err();
        assert!(matches!(err, KernelError::UnsupportedOperand(_)));
    }

    #[test]
    fn explicit_unknown_must_match() {
        let expr = d(Partial::Dx, &u());
        let point = Points::Single(Point::scalar("x"));
        assert_eq!(derive_over(&expr, &Symbol::unknown("u"), &point), derive(&expr, &point));

        let err = derive_over(&expr, &Symbol::unknown("v"), &point).unwrap_err();
        assert_eq!(err, KernelError::WrongUnknown(WrongUnknown {
            expected: "v".to_string(),
            found: "u".to_string(),
        }));
    }

    #[test]
    fn time_derivatives() {
        // heat equation: dt(u) - kappa * dx(dx(u))
        let expr = d(Partial::Dt, &u()) - constant("kappa") * d(Partial::Dx, &d(Partial::Dx, &u()));
        let point = Point::Tuple(vec![Coordinate::time("ti"), Coordinate::space("xi")]);
        let derived = derive(&expr, &Points::Single(point)).unwrap();
        let expected = derivative(&["ti", "xi"], &["ti"])
            - constant("kappa") * derivative(&["ti", "xi"], &["xi", "xi"]);
        assert_eq!(derived, expected);
    }

    #[test]
    fn missing_coordinate() {
        let err = derive(&d(Partial::Dt, &u()), &Points::Single(Point::scalar("xi"))).unwrap_err();
        assert_eq!(err, KernelError::MissingCoordinate(MissingCoordinate {
            op: "dt".to_string(),
            coordinate: "t".to_string(),
            point: "xi".to_string(),
        }));

        let err = derive(&d(Partial::Dy, &u()), &pair()).unwrap_err();
        assert!(matches!(err, KernelError::MissingCoordinate(_)));
    }
}
