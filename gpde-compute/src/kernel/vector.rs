//! Vector calculus built from the partial-derivative operators.
//!
//! Vectors are plain slices of expressions, one component per spatial dimension. Every operator is
//! applied with [`apply`], so the results can be passed straight to
//! [`derive`](super::derive()).

use crate::symbolic::expr::{op::{Operator, Partial}, Expr};
use super::{
    error::{DimensionMismatch, KernelError},
    operator::apply,
};

fn d(op: Partial, expr: &Expr) -> Expr {
    apply(&Operator::Partial(op), expr)
}

fn mismatch(op: &str, expected: &str, given: String) -> KernelError {
    KernelError::DimensionMismatch(DimensionMismatch {
        op: op.to_string(),
        expected: expected.to_string(),
        given,
    })
}

/// The gradient of a scalar expression in `dim` dimensions.
pub fn grad(expr: &Expr, dim: usize) -> Result<Vec<Expr>, KernelError> {
    if !(1..=3).contains(&dim) {
        return Err(mismatch("grad", "1, 2 or 3 dimensions", format!("{} dimensions", dim)));
    }
    Ok(Partial::SPATIAL[..dim].iter().map(|op| d(*op, expr)).collect())
}

/// The divergence of a vector, `dx(v_0) + dy(v_1) + dz(v_2)`.
pub fn div(v: &[Expr]) -> Result<Expr, KernelError> {
    if !(1..=3).contains(&v.len()) {
        return Err(mismatch("div", "a vector of 1, 2 or 3 components", format!("{} components", v.len())));
    }
    Ok(Expr::sum(Partial::SPATIAL.iter().zip(v).map(|(op, component)| d(*op, component))))
}

/// The curl.
///
/// A single component is treated as a 2D stream function `psi`, whose curl is the vector
/// `(dy(psi), -dx(psi))`. Three components give the usual 3D curl.
pub fn curl(v: &[Expr]) -> Result<Vec<Expr>, KernelError> {
    match v {
        [psi] => Ok(vec![d(Partial::Dy, psi), -d(Partial::Dx, psi)]),
        [a, b, c] => Ok(vec![
            d(Partial::Dy, c) - d(Partial::Dz, b),
            d(Partial::Dz, a) - d(Partial::Dx, c),
            d(Partial::Dx, b) - d(Partial::Dy, a),
        ]),
        _ => Err(mismatch(
            "curl",
            "a scalar (2D) or a vector of 3 components",
            format!("{} components", v.len()),
        )),
    }
}

/// The scalar rotation of a 2D vector, `dy(v_0) - dx(v_1)`.
pub fn rot(v: &[Expr]) -> Result<Expr, KernelError> {
    match v {
        [a, b] => Ok(d(Partial::Dy, a) - d(Partial::Dx, b)),
        _ => Err(mismatch("rot", "a vector of 2 components", format!("{} components", v.len()))),
    }
}

/// The dot product of two vectors of the same dimension.
pub fn dot(a: &[Expr], b: &[Expr]) -> Result<Expr, KernelError> {
    if a.len() != b.len() || a.is_empty() {
        return Err(mismatch(
            "dot",
            "two non-empty vectors of the same dimension",
            format!("vectors of {} and {} components", a.len(), b.len()),
        ));
    }
    Ok(Expr::sum(a.iter().zip(b).map(|(a, b)| a.clone() * b.clone())))
}

/// The cross product. In 2D, this is the scalar `a_0 b_1 - a_1 b_0`, returned as a single
/// component.
pub fn cross(a: &[Expr], b: &[Expr]) -> Result<Vec<Expr>, KernelError> {
    let term = |i: usize, j: usize| a[i].clone() * b[j].clone() - a[j].clone() * b[i].clone();
    match (a.len(), b.len()) {
        (2, 2) => Ok(vec![term(0, 1)]),
        (3, 3) => Ok(vec![term(1, 2), term(2, 0), term(0, 1)]),
        (m, n) => Err(mismatch(
            "cross",
            "two vectors of 2 or 3 components",
            format!("vectors of {} and {} components", m, n),
        )),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::expr::Symbol;
    use super::*;

    fn field(name: &str) -> Expr {
        Expr::symbol(Symbol::field(name))
    }

    fn show(v: &[Expr]) -> Vec<String> {
        v.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn gradient_and_divergence() {
        let u = Expr::symbol(Symbol::unknown("u"));
        assert_eq!(show(&grad(&u, 3).unwrap()), ["dx(u)", "dy(u)", "dz(u)"]);

        // div(grad(u)) is the laplacian
        let laplacian = div(&grad(&u, 2).unwrap()).unwrap();
        assert_eq!(laplacian.to_string(), "dx(dx(u)) + dy(dy(u))");

        assert!(matches!(grad(&u, 4), Err(KernelError::DimensionMismatch(_))));
    }

    #[test]
    fn curl_and_rotation() {
        let psi = field("psi");
        assert_eq!(show(&curl(&[psi]).unwrap()), ["dy(psi)", "-dx(psi)"]);

        let v = [field("A"), field("B"), field("C")];
        assert_eq!(show(&curl(&v).unwrap()), [
            "dy(C) - dz(B)",
            "dz(A) - dx(C)",
            "dx(B) - dy(A)",
        ]);

        // rot(curl(psi)) = dy(dy(psi)) + dx(dx(psi))
        let psi = field("psi");
        assert_eq!(rot(&curl(&[psi]).unwrap()).unwrap().to_string(), "dy(dy(psi)) + dx(dx(psi))");

        assert!(matches!(rot(&v), Err(KernelError::DimensionMismatch(_))));
    }

    #[test]
    fn products() {
        let a = [field("A"), field("B")];
        let b = [field("C"), field("D")];
        assert_eq!(dot(&a, &b).unwrap().to_string(), "A * C + B * D");
        assert_eq!(show(&cross(&a, &b).unwrap()), ["A * D - B * C"]);

        let a3 = [field("A"), field("B"), field("E")];
        assert!(matches!(cross(&a3, &b), Err(KernelError::DimensionMismatch(_))));
        assert!(matches!(dot(&a3, &b), Err(KernelError::DimensionMismatch(_))));
    }
}
