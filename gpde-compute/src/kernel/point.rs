//! Evaluation points of a kernel.

use crate::symbolic::expr::{op::Partial, Expr, Symbol};
use super::error::KernelError;
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named coordinate of an evaluation point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    /// The name of the coordinate symbol, such as `xi`.
    pub name: String,

    /// Whether this is the time coordinate of the point.
    pub time: bool,
}

impl Coordinate {
    /// Creates a spatial coordinate.
    pub fn space(name: impl Into<String>) -> Self {
        Self { name: name.into(), time: false }
    }

    /// Creates a time coordinate.
    pub fn time(name: impl Into<String>) -> Self {
        Self { name: name.into(), time: true }
    }

    /// Returns the coordinate as a symbol.
    pub fn to_expr(&self) -> Expr {
        Expr::symbol(Symbol::plain(self.name.clone()))
    }
}

/// A single evaluation point: one coordinate, or an ordered tuple of them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Point {
    /// A one-dimensional point, such as `xi`.
    Scalar(Coordinate),

    /// A multi-dimensional point, such as `(xi, yi)` or `(ti, xi)`.
    Tuple(Vec<Coordinate>),
}

impl Point {
    /// Creates a one-dimensional spatial point.
    pub fn scalar(name: impl Into<String>) -> Self {
        Point::Scalar(Coordinate::space(name))
    }

    /// Creates a point made of spatial coordinates only.
    pub fn spatial<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Point::Tuple(names.into_iter().map(Coordinate::space).collect())
    }

    /// Returns the coordinates of the point, in order.
    pub fn coords(&self) -> &[Coordinate] {
        match self {
            Point::Scalar(coord) => std::slice::from_ref(coord),
            Point::Tuple(coords) => coords,
        }
    }

    /// Returns the coordinate that `op` differentiates along at this point.
    ///
    /// `dx`, `dy` and `dz` select a spatial coordinate by gradient index, skipping the time
    /// coordinate; `dt` selects the time coordinate.
    pub fn coordinate_for(&self, op: Partial) -> Option<&Coordinate> {
        match op.grad_index() {
            Some(index) => self.coords().iter().filter(|c| !c.time).nth(index),
            None => self.coords().iter().find(|c| c.time),
        }
    }

    /// Checks that the point is non-empty and has at most one time coordinate.
    fn validate(&self) -> Result<(), KernelError> {
        let coords = self.coords();
        if coords.is_empty() {
            return Err(KernelError::type_mismatch("a point needs at least one coordinate"));
        }
        if coords.iter().filter(|c| c.time).count() > 1 {
            return Err(KernelError::type_mismatch(format!("`{}` has more than one time coordinate", self)));
        }
        Ok(())
    }

    /// Returns true if both points have the same dimension, with the time coordinate (if any) in
    /// the same position.
    fn same_shape(&self, other: &Point) -> bool {
        let lhs = self.coords();
        let rhs = other.coords();
        lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(l, r)| l.time == r.time)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Point::Scalar(coord) => write!(f, "{}", coord.name),
            Point::Tuple(coords) => {
                let names = coords.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
                write!(f, "({})", names.join(", "))
            },
        }
    }
}

/// The points a kernel is derived at: one point, or the two arguments of a two-point kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Points {
    /// Derive at a single point.
    Single(Point),

    /// Derive at point `i`, then at point `j`.
    Pair(Point, Point),
}

impl Points {
    /// Returns the points, in the order the operator is applied at them.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        let (first, second) = match self {
            Points::Single(point) => (point, None),
            Points::Pair(i, j) => (i, Some(j)),
        };
        std::iter::once(first).chain(second)
    }

    /// Checks that the points are well-formed: every point is non-empty with at most one time
    /// coordinate, coordinate names are unique, and both points of a pair have the same shape.
    pub fn validate(&self) -> Result<(), KernelError> {
        for point in self.iter() {
            point.validate()?;
        }

        if let Points::Pair(i, j) = self {
            if !i.same_shape(j) {
                return Err(KernelError::type_mismatch(format!(
                    "the points `{}` and `{}` have different shapes",
                    i,
                    j,
                )));
            }
        }

        let mut seen = HashSet::new();
        for coord in self.iter().flat_map(Point::coords) {
            if !seen.insert(coord.name.as_str()) {
                return Err(KernelError::type_mismatch(format!(
                    "the coordinate `{}` appears more than once",
                    coord.name,
                )));
            }
        }
        Ok(())
    }

    /// Returns the argument list of the unknown: the coordinates of point `i`, followed by those
    /// of point `j`.
    pub fn args(&self) -> Vec<Expr> {
        self.iter()
            .flat_map(Point::coords)
            .map(Coordinate::to_expr)
            .collect()
    }
}

impl std::fmt::Display for Points {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Points::Single(point) => write!(f, "{}", point),
            Points::Pair(i, j) => write!(f, "{}, {}", i, j),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space_time(t: &str, x: &str) -> Point {
        Point::Tuple(vec![Coordinate::time(t), Coordinate::space(x)])
    }

    #[test]
    fn gradient_index_skips_time() {
        let point = space_time("ti", "xi");
        assert_eq!(point.coordinate_for(Partial::Dx).map(|c| c.name.as_str()), Some("xi"));
        assert_eq!(point.coordinate_for(Partial::Dt).map(|c| c.name.as_str()), Some("ti"));
        assert_eq!(point.coordinate_for(Partial::Dy), None);

        let point = Point::spatial(["xi", "yi", "zi"]);
        assert_eq!(point.coordinate_for(Partial::Dz).map(|c| c.name.as_str()), Some("zi"));
        assert_eq!(point.coordinate_for(Partial::Dt), None);
    }

    #[test]
    fn arguments_follow_point_order() {
        let points = Points::Pair(space_time("ti", "xi"), space_time("tj", "xj"));
        assert!(points.validate().is_ok());
        let args = points.args().iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(args, ["ti", "xi", "tj", "xj"]);
        assert_eq!(points.to_string(), "(ti, xi), (tj, xj)");
    }

    #[test]
    fn malformed_points() {
        let empty = Points::Single(Point::Tuple(vec![]));
        assert!(matches!(empty.validate(), Err(KernelError::TypeMismatch(_))));

        let two_times = Points::Single(Point::Tuple(vec![Coordinate::time("s"), Coordinate::time("t")]));
        assert!(matches!(two_times.validate(), Err(KernelError::TypeMismatch(_))));

        let shapes = Points::Pair(Point::scalar("xi"), Point::spatial(["xj", "yj"]));
        assert!(matches!(shapes.validate(), Err(KernelError::TypeMismatch(_))));

        let time_position = Points::Pair(space_time("ti", "xi"), Point::Tuple(vec![
            Coordinate::space("xj"),
            Coordinate::time("tj"),
        ]));
        assert!(matches!(time_position.validate(), Err(KernelError::TypeMismatch(_))));

        let shared = Points::Pair(Point::scalar("x"), Point::scalar("x"));
        assert!(matches!(shared.validate(), Err(KernelError::TypeMismatch(_))));
    }
}
