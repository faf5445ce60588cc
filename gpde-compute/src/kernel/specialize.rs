//! Specializing a derived operator expression against a concrete base kernel.

use crate::symbolic::{derivative, doit, expr::{Expr, Symbol}};
use log::{debug, trace};
use super::{
    derive::{derive, find_unknown},
    error::{KernelError, NotDifferentiable, ResidualOperator},
    point::{Point, Points},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Derives the closed form of the operator expression `expr` applied to the base kernel `kernel`
/// at the given points.
///
/// `kernel` is an expression in the coordinates of both points (and any hyperparameters), such as
/// `theta * exp(-(xi - xj)^2 / 2)`. The result contains no unknown, no abstract operator acting
/// on it, and no pending derivative.
pub fn specialize(expr: &Expr, kernel: &Expr, points: &Points) -> Result<Expr, KernelError> {
    points.validate()?;
    let unknown = find_unknown(expr)?;
    let derived = derive(expr, points)?;
    let call = Expr::call(unknown.name(), points.args());

    let substituted = derived.subs(&call, kernel);
    trace!("substituted base kernel: {}", substituted);

    // literal derivatives of the kernel, highest order first
    let mut pending: Vec<(Expr, Vec<String>)> = Vec::new();
    for node in substituted.post_order_iter() {
        if let Expr::Derivative(operand, vars) = node {
            if **operand == *kernel && pending.iter().all(|(seen, _)| seen != node) {
                pending.push((node.clone(), vars.clone()));
            }
        }
    }
    pending.sort_by(|(_, a), (_, b)| b.len().cmp(&a.len()));

    let mut result = substituted;
    for (pattern, vars) in pending {
        let computed = differentiate(kernel, &vars)?;
        trace!("{} -> {}", pattern, computed);
        result = result.subs(&pattern, &computed);
    }

    let result = doit(&result).map_err(|err| KernelError::NotDifferentiable(NotDifferentiable {
        expr: err.expr().to_string(),
    }))?;

    check_closure(&result, &unknown)?;
    debug!("specialized kernel at {}: {}", points, result);
    Ok(result)
}

/// Differentiates `kernel` along each of `vars` in turn.
fn differentiate(kernel: &Expr, vars: &[String]) -> Result<Expr, KernelError> {
    vars.iter().try_fold(kernel.clone(), |acc, var| {
        derivative(&acc, var).map_err(|err| KernelError::NotDifferentiable(NotDifferentiable {
            expr: err.expr().to_string(),
        }))
    })
}

/// Checks that the specialized kernel is closed: no unknown, no operator other than those on known
/// fields, and no pending derivative.
fn check_closure(expr: &Expr, unknown: &Symbol) -> Result<(), KernelError> {
    for node in expr.post_order_iter() {
        match node {
            Expr::Derivative(..) => {
                return Err(KernelError::NotDifferentiable(NotDifferentiable {
                    expr: node.to_string(),
                }));
            },
            Expr::Apply(_, operand) if operand.mentions_function(unknown.name()) => {
                return Err(KernelError::ResidualOperator(ResidualOperator {
                    term: node.to_string(),
                }));
            },
            _ if node.as_symbol() == Some(unknown)
                || node.as_call().is_some_and(|(name, _)| name == unknown.name()) => {
                return Err(KernelError::ResidualOperator(ResidualOperator {
                    term: node.to_string(),
                }));
            },
            _ => {},
        }
    }
    Ok(())
}

/// The four covariance blocks of the joint Gaussian process of `u` and `f = L[u]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Kernels {
    /// `k_uu`, the base kernel.
    pub uu: Expr,

    /// `k_fu`, the operator applied at point `i`.
    pub fu: Expr,

    /// `k_uf`, the operator applied at point `j`.
    pub uf: Expr,

    /// `k_ff`, the operator applied at both points.
    pub ff: Expr,
}

impl Kernels {
    /// Derives the four kernels of the operator expression `expr` with the base kernel `kernel`,
    /// a function of the coordinates of `point_i` and `point_j`.
    pub fn derive(
        expr: &Expr,
        kernel: &Expr,
        point_i: &Point,
        point_j: &Point,
    ) -> Result<Self, KernelError> {
        Points::Pair(point_i.clone(), point_j.clone()).validate()?;
        Ok(Self {
            uu: kernel.clone(),
            fu: specialize(expr, kernel, &Points::Single(point_i.clone()))?,
            uf: specialize(expr, kernel, &Points::Single(point_j.clone()))?,
            ff: specialize(expr, kernel, &Points::Pair(point_i.clone(), point_j.clone()))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use crate::{
        kernel::operator::apply,
        numerical::{Ctxt, Eval},
        symbolic::expr::op::Partial,
    };
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

    fn dx(expr: &Expr) -> Expr {
        apply(&Partial::Dx.into(), expr)
    }

    /// `theta * exp(-(xi - xj)^2 / 2)`
    fn squared_exponential(i: &str, j: &str) -> Expr {
        let r = sym(i) - sym(j);
        sym("theta") * Expr::call("exp", vec![Expr::float(-0.5) * r.pow(Expr::int(2))])
    }

    fn ctxt(values: &[(&str, f64)]) -> Ctxt {
        let mut ctxt = Ctxt::default();
        for (name, value) in values {
            ctxt.add_var(name, *value);
        }
        ctxt
    }

    #[test]
    fn closed_form_of_first_order_operator() {
        // L = alpha * u + dx(u), with r = xi - xj:
        // k_fu = k (alpha - r), k_uf = k (alpha + r), k_ff = k (alpha^2 + 1 - r^2)
        let op = constant("alpha") * u() + dx(&u());
        let kernel = squared_exponential("xi", "xj");
        let kernels = Kernels::derive(&op, &kernel, &Point::scalar("xi"), &Point::scalar("xj")).unwrap();

        for (xi, xj) in [(0.3, -0.4), (1.2, 1.0), (-2.0, 0.5)] {
            let ctxt = ctxt(&[("xi", xi), ("xj", xj), ("theta", 1.7), ("alpha", 0.6)]);
            let r: f64 = xi - xj;
            let k = 1.7 * (-0.5 * r * r).exp();

            assert_float_absolute_eq!(kernels.uu.eval(&ctxt).unwrap(), k, 1e-12);
            assert_float_absolute_eq!(kernels.fu.eval(&ctxt).unwrap(), k * (0.6 - r), 1e-12);
            assert_float_absolute_eq!(kernels.uf.eval(&ctxt).unwrap(), k * (0.6 + r), 1e-12);
            assert_float_absolute_eq!(kernels.ff.eval(&ctxt).unwrap(), k * (0.36 + 1.0 - r * r), 1e-12);
        }
    }

    #[test]
    fn closure() {
        let op = constant("alpha") * u() + dx(&u());
        let points = Points::Pair(Point::scalar("xi"), Point::scalar("xj"));
        let kff = specialize(&op, &squared_exponential("xi", "xj"), &points).unwrap();

        let names = kff.free_symbols()
            .into_iter()
            .map(|sym| sym.name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, ["theta", "xi", "xj", "alpha"]);
        assert!(kff.post_order_iter().all(|node| !matches!(node, Expr::Apply(..) | Expr::Derivative(..))));
        assert!(!kff.mentions_function("u"));
    }

    #[test]
    fn second_order_operator_is_symmetric() {
        // L = mu * u + alpha * dx(u) + beta * dx(dx(u))
        let op = constant("mu") * u()
            + constant("alpha") * dx(&u())
            + constant("beta") * dx(&dx(&u()));
        let kernels = Kernels::derive(
            &op,
            &squared_exponential("xi", "xj"),
            &Point::scalar("xi"),
            &Point::scalar("xj"),
        ).unwrap();

        let values = [("theta", 1.1), ("mu", 0.4), ("alpha", -0.8), ("beta", 0.25)];
        for (a, b) in [(0.3, -0.4), (1.5, 0.2)] {
            let mut forward = ctxt(&values);
            forward.add_var("xi", a);
            forward.add_var("xj", b);
            let mut backward = ctxt(&values);
            backward.add_var("xi", b);
            backward.add_var("xj", a);

            // k_ff(a, b) = k_ff(b, a)
            assert_float_absolute_eq!(
                kernels.ff.eval(&forward).unwrap(),
                kernels.ff.eval(&backward).unwrap(),
                1e-9
            );

            // k_fu(a, b) = k_uf(b, a)
            assert_float_absolute_eq!(
                kernels.fu.eval(&forward).unwrap(),
                kernels.uf.eval(&backward).unwrap(),
                1e-9
            );

            // flipping the sign of alpha is the same as swapping the arguments of k_fu
            let mut flipped = forward.clone();
            flipped.add_var("alpha", 0.8);
            assert_float_absolute_eq!(
                kernels.fu.eval(&flipped).unwrap(),
                kernels.fu.eval(&backward).unwrap(),
                1e-9
            );
        }
    }

    #[test]
    fn matches_finite_differences() {
        // L = dx(dx(u)) at point i, checked against a central second difference of the kernel
        let op = dx(&dx(&u()));
        let kernel = squared_exponential("xi", "xj");
        let kfu = specialize(&op, &kernel, &Points::Single(Point::scalar("xi"))).unwrap();

        let h = 1e-4;
        let (xi, xj) = (0.7, -0.2);
        let at = |x: f64| kernel.eval(&ctxt(&[("xi", x), ("xj", xj), ("theta", 1.3)])).unwrap();
        let expected = (at(xi + h) - 2.0 * at(xi) + at(xi - h)) / (h * h);
        let actual = kfu.eval(&ctxt(&[("xi", xi), ("xj", xj), ("theta", 1.3)])).unwrap();
        assert_float_absolute_eq!(actual, expected, 1e-5);
    }

    #[test]
    fn heat_equation() {
        // L = dt(u) - kappa * dx(dx(u)) over space-time points, with a separable kernel
        let op = apply(&Partial::Dt.into(), &u()) - constant("kappa") * dx(&dx(&u()));
        let kernel = Expr::call("exp", vec![
            Expr::float(-0.5) * (sym("ti") - sym("tj")).pow(Expr::int(2))
                + Expr::float(-0.5) * (sym("xi") - sym("xj")).pow(Expr::int(2)),
        ]);
        let point_i = Point::Tuple(vec![Coordinate::time("ti"), Coordinate::space("xi")]);
        let kfu = specialize(&op, &kernel, &Points::Single(point_i)).unwrap();

        // k = exp(-s^2/2 - r^2/2), dt k = -s k, dxx k = (r^2 - 1) k
        let (ti, xi, tj, xj, kappa): (f64, f64, f64, f64, f64) = (0.5, 0.1, -0.3, 0.9, 0.2);
        let (s, r) = (ti - tj, xi - xj);
        let k = (-0.5 * s * s - 0.5 * r * r).exp();
        let expected = -s * k - kappa * (r * r - 1.0) * k;

        let ctxt = ctxt(&[("ti", ti), ("xi", xi), ("tj", tj), ("xj", xj), ("kappa", kappa)]);
        assert_float_absolute_eq!(kfu.eval(&ctxt).unwrap(), expected, 1e-12);
    }

    #[test]
    fn heat_equation_at_two_points() {
        let op = apply(&Partial::Dt.into(), &u()) - constant("kappa") * dx(&dx(&u()));
        let kernel = Expr::call("exp", vec![
            Expr::float(-0.5) * (sym("ti") - sym("tj")).pow(Expr::int(2))
                + Expr::float(-0.5) * (sym("xi") - sym("xj")).pow(Expr::int(2)),
        ]);
        let point_i = Point::Tuple(vec![Coordinate::time("ti"), Coordinate::space("xi")]);
        let point_j = Point::Tuple(vec![Coordinate::time("tj"), Coordinate::space("xj")]);
        let kernels = Kernels::derive(&op, &kernel, &point_i, &point_j).unwrap();

        let (ti, xi, tj, xj, kappa): (f64, f64, f64, f64, f64) = (0.5, 0.1, -0.3, 0.9, 0.2);
        let at = |tj: f64, xj: f64| ctxt(&[("ti", ti), ("xi", xi), ("tj", tj), ("xj", xj), ("kappa", kappa)]);

        // k_ff = k (1 - s^2 + kappa^2 (r^4 - 6 r^2 + 3))
        let (s, r) = (ti - tj, xi - xj);
        let k = (-0.5 * s * s - 0.5 * r * r).exp();
        let expected = k * (1.0 - s * s + kappa * kappa * (r.powi(4) - 6.0 * r * r + 3.0));
        assert_float_absolute_eq!(kernels.ff.eval(&at(tj, xj)).unwrap(), expected, 1e-12);

        // applying L at point j to k_fu by central differences
        let h = 1e-4;
        let fu = |tj: f64, xj: f64| kernels.fu.eval(&at(tj, xj)).unwrap();
        let dt = (fu(tj + h, xj) - fu(tj - h, xj)) / (2.0 * h);
        let dxx = (fu(tj, xj + h) - 2.0 * fu(tj, xj) + fu(tj, xj - h)) / (h * h);
        assert_float_absolute_eq!(kernels.ff.eval(&at(tj, xj)).unwrap(), dt - kappa * dxx, 1e-5);
    }

    #[test]
    fn mixed_partial_in_two_dimensions() {
        // L = dx(dy(u)) over (x, y) points, with k = exp(-r^2/2 - s^2/2):
        // k_ff = (1 - r^2) (1 - s^2) k
        let op = dx(&apply(&Partial::Dy.into(), &u()));
        let kernel = Expr::call("exp", vec![
            Expr::float(-0.5) * (sym("xi") - sym("xj")).pow(Expr::int(2))
                + Expr::float(-0.5) * (sym("yi") - sym("yj")).pow(Expr::int(2)),
        ]);
        let points = Points::Pair(
            Point::spatial(["xi", "yi"]),
            Point::spatial(["xj", "yj"]),
        );
        let kff = specialize(&op, &kernel, &points).unwrap();

        for (xi, yi, xj, yj) in [(0.3, -0.2, 1.1, 0.4), (-0.5, 0.9, 0.2, 0.1)] {
            let (r, s): (f64, f64) = (xi - xj, yi - yj);
            let k = (-0.5 * r * r - 0.5 * s * s).exp();
            let expected = (1.0 - r * r) * (1.0 - s * s) * k;
            let ctxt = ctxt(&[("xi", xi), ("yi", yi), ("xj", xj), ("yj", yj)]);
            assert_float_absolute_eq!(kff.eval(&ctxt).unwrap(), expected, 1e-12);
        }
    }

    #[test]
    fn points_are_validated_first() {
        let two = u() + Expr::symbol(Symbol::unknown("v"));
        let same = Points::Pair(Point::scalar("x"), Point::scalar("x"));
        let err = specialize(&two, &sym("k"), &same).unwrap_err();
        assert!(matches!(err, KernelError::TypeMismatch(_)));
    }

    #[test]
    fn undefined_base_kernel_is_not_differentiable() {
        let kernel = Expr::call("g", vec![sym("xi"), sym("xj")]);
        let err = specialize(&dx(&u()), &kernel, &Points::Single(Point::scalar("xi"))).unwrap_err();
        assert!(matches!(err, KernelError::NotDifferentiable(_)));
    }

    #[test]
    fn kernel_set_validates_points() {
        let err = Kernels::derive(&u(), &sym("k"), &Point::scalar("x"), &Point::scalar("x")).unwrap_err();
        assert!(matches!(err, KernelError::TypeMismatch(_)));
    }
}
