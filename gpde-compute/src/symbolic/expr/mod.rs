//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](gpde_parser::parser::ast::expr::Expr) type from `gpde_parser` is a recursive
//! `enum` that represents the AST of a kernel script. It's convenient for parsing, but not so much
//! for algebraic manipulation.
//!
//! This module defines a separate [`Expr`], which **flattens** the tree into lists of terms and
//! factors, tags every symbol with its role ([`Symbol`]), and adds two node kinds the derivation
//! engine needs:
//!
//! - [`Expr::Apply`], an abstract operator such as `dx(u)` left unevaluated, and
//! - [`Expr::Derivative`], a pending partial derivative such as `Derivative(u(xi), xi)`.
//!
//! # Strict equality
//!
//! Determining whether two expressions are mathematically equal is hard in general (consider
//! `x^2 + 2x + 1` and `(x + 1)^2`), and this crate deliberately does no general simplification.
//! Instead, the [`PartialEq`] and [`Eq`] implementations for [`Expr`] implement **strict
//! equality**. Two expressions are strictly equal if:
//!
//! - They are the same type of expression (i.e. both [`Expr::Primary`], both [`Expr::Add`], etc.).
//! - If both are [`Expr::Primary`], both expressions must have strictly equal values. An integer is
//! never strictly equal to a float.
//! - If both are [`Expr::Add`] or [`Expr::Mul`], both expressions must have strictly equal terms /
//! factors, in any order.
//! - If both are [`Expr::Exp`], both expressions must have strictly equal base and exponent.
//! - If both are [`Expr::Apply`], both must apply the same operator to strictly equal operands.
//! - If both are [`Expr::Derivative`], both must differentiate strictly equal operands with respect
//! to the same variables, in any order (mixed partial derivatives commute).
//!
//! Strict equality can never report false positives: strictly equal expressions are always
//! mathematically equal. The converse does not hold; numerical evaluation is used where that
//! matters.

mod iter;
pub mod op;
mod symbol;

use crate::{
    primitive,
    symbolic::builder::{MultBuilder, SumBuilder},
};
use gpde_parser::parser::{
    token::op::{BinOpKind, UnaryOpKind},
    Precedence,
};
use iter::ExprIter;
use op::Operator;
use std::{
    cmp::Ordering,
    collections::BTreeSet,
    convert::Infallible,
    ops::{Add, Mul, Neg, Sub},
};

pub use symbol::Symbol;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single term / factor, such as a number, symbol, or function call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// An integer, such as `2` or `-1`.
    Integer(i64),

    /// A floating-point number, such as `0.5`.
    Float(f64),

    /// A symbol, such as the coordinate `xi` or the unknown `u`.
    Symbol(Symbol),

    /// A function call, such as `exp(x)` or the unknown evaluated at a point, `u(xi, xj)`.
    Call(String, Vec<Expr>),
}

/// [`Eq`] is implemented manually to allow comparing [`Primary::Float`]s. This module **must
/// never** produce non-finite floats! Report any bugs that cause this to happen.
impl Eq for Primary {}

impl std::fmt::Display for Primary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Float(num) => write!(f, "{}", num),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                write_list(f, args)?;
                write!(f, ")")
            },
        }
    }
}

/// Writes a comma-separated list of items.
fn write_list<T: std::fmt::Display>(f: &mut std::fmt::Formatter<'_>, items: &[T]) -> std::fmt::Result {
    let mut iter = items.iter();
    if let Some(item) = iter.next() {
        write!(f, "{}", item)?;
        for item in iter {
            write!(f, ", {}", item)?;
        }
    }
    Ok(())
}

/// A mathematical expression with information about its terms and factors.
///
/// This type should be distinguished from the [`gpde_parser::parser::ast::Expr`] type, which is
/// produced by [`gpde_parser`]. The main difference is that this type **flattens** out the tree
/// structure. For example, the expression `x + (y + z)` is represented as a single [`Expr::Add`]
/// node with _three_ children, `x`, `y`, and `z`.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<Expr>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// An expression raised to a power.
    Exp(Box<Expr>, Box<Expr>),

    /// An abstract operator applied to an operand, left unevaluated.
    Apply(Operator, Box<Expr>),

    /// A pending partial derivative of an expression with respect to the listed variables. A
    /// variable is repeated once per order of differentiation.
    Derivative(Box<Expr>, Vec<String>),
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        match term.split_negation() {
                            Some(positive) => write!(f, " - {}", positive)?,
                            None => write!(f, " + {}", term)?,
                        }
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let mut factors = factors.as_slice();
                if factors.len() > 1 && matches!(factors[0], Self::Primary(Primary::Integer(-1))) {
                    write!(f, "-")?;
                    factors = &factors[1..];
                }
                for (i, factor) in factors.iter().enumerate() {
                    if i > 0 {
                        write!(f, " * ")?;
                    }
                    if matches!(factor.cmp_precedence(self), Ordering::Less) {
                        write!(f, "({})", factor)?;
                    } else {
                        write!(f, "{}", factor)?;
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                // `^` is right-associative, so a power as the base needs parentheses too
                if matches!(base.cmp_precedence(self), Ordering::Greater) {
                    write!(f, "{}", base)?;
                } else {
                    write!(f, "({})", base)?;
                }
                write!(f, "^")?;
                if matches!(exp.cmp_precedence(self), Ordering::Less) {
                    write!(f, "({})", exp)
                } else {
                    write!(f, "{}", exp)
                }
            },
            Self::Apply(op, operand) => write!(f, "{}({})", op, operand),
            Self::Derivative(operand, vars) => {
                write!(f, "Derivative({}, ", operand)?;
                write_list(f, vars)?;
                write!(f, ")")
            },
        }
    }
}

impl Expr {
    /// Creates a [`Primary::Integer`].
    pub fn int(n: i64) -> Self {
        Self::Primary(Primary::Integer(n))
    }

    /// Creates a [`Primary::Float`].
    pub fn float(n: f64) -> Self {
        Self::Primary(Primary::Float(n))
    }

    /// Creates a number, preferring [`Primary::Integer`] for integral values.
    pub fn number(n: f64) -> Self {
        Self::Primary(primitive::number(n))
    }

    /// Creates a [`Primary::Symbol`].
    pub fn symbol(sym: Symbol) -> Self {
        Self::Primary(Primary::Symbol(sym))
    }

    /// Creates a [`Primary::Call`].
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Creates the sum of the given terms, flattening nested sums, folding numbers, and dropping
    /// zeros.
    pub fn sum(terms: impl IntoIterator<Item = Expr>) -> Self {
        terms.into_iter().collect::<SumBuilder>().into()
    }

    /// Creates the product of the given factors, flattening nested products, folding numbers, and
    /// dropping ones. The product is zero if any factor is trivially zero.
    pub fn product(factors: impl IntoIterator<Item = Expr>) -> Self {
        factors.into_iter().collect::<MultBuilder>().into()
    }

    /// Raises this expression to the given power, folding numbers where that is exact.
    pub fn pow(self, exp: Expr) -> Self {
        if exp.is_zero() {
            return Self::int(1);
        }
        if exp.is_one() || self.is_one() {
            return self;
        }
        if let (Self::Primary(base), Self::Primary(power)) = (&self, &exp) {
            if let Some(result) = primitive::pow(base, power) {
                return Self::Primary(result);
            }
        }
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// Creates a pending derivative of `expr` with respect to `vars`.
    ///
    /// Differentiating a pending derivative extends its list of variables instead of nesting. If
    /// the operand is a call such as `u(xi, xj)`, the variables are kept in argument order, so that
    /// `Derivative(u(xi, xj), xj, xi)` and `Derivative(u(xi, xj), xi, xj)` build the same node.
    pub fn pending_derivative(expr: Expr, vars: impl IntoIterator<Item = String>) -> Self {
        let mut vars = vars.into_iter().collect::<Vec<_>>();
        if vars.is_empty() {
            return expr;
        }

        let (operand, mut all) = match expr {
            Self::Derivative(operand, existing) => (*operand, existing),
            other => (other, Vec::new()),
        };
        all.append(&mut vars);

        if let Self::Primary(Primary::Call(_, args)) = &operand {
            all.sort_by_key(|var| {
                args.iter()
                    .position(|arg| matches!(arg.as_symbol(), Some(Symbol::Plain(name)) if name == var))
                    .unwrap_or(args.len())
            });
        }

        Self::Derivative(Box::new(operand), all)
    }

    /// Returns the precedence of the expression, or [`None`] if it is printed as an atom.
    fn precedence(&self) -> Option<Precedence> {
        match self {
            Self::Primary(Primary::Integer(n)) if *n < 0 => Some(UnaryOpKind::Neg.precedence()),
            Self::Primary(Primary::Float(n)) if n.is_sign_negative() => Some(UnaryOpKind::Neg.precedence()),
            Self::Primary(_) | Self::Apply(..) | Self::Derivative(..) => None,
            Self::Add(_) => Some(BinOpKind::Add.precedence()),
            Self::Mul(_) => Some(BinOpKind::Mul.precedence()),
            Self::Exp(..) => Some(BinOpKind::Exp.precedence()),
        }
    }

    /// Compares the precedence of this expression with the precedence of `other`.
    ///
    /// This is used to determine if parentheses are needed around this expression when it is
    /// printed inside `other`.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        match (self.precedence(), other.precedence()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
        }
    }

    /// If the expression is negative on its face (a negative number, or a product with a negative
    /// numeric coefficient), returns its negation.
    fn split_negation(&self) -> Option<Self> {
        match self {
            Self::Primary(primary @ (Primary::Integer(_) | Primary::Float(_))) => {
                let value = primitive::as_f64(primary)?;
                if value < 0.0 {
                    primitive::neg(primary).map(Self::Primary)
                } else {
                    None
                }
            },
            Self::Mul(factors) => {
                let (first, rest) = factors.split_first()?;
                let positive = first.split_negation()?;
                Some(Self::product(std::iter::once(positive).chain(rest.iter().cloned())))
            },
            _ => None,
        }
    }

    /// If the expression is a number, returns it.
    pub fn as_number(&self) -> Option<&Primary> {
        match self {
            Self::Primary(primary @ (Primary::Integer(_) | Primary::Float(_))) => Some(primary),
            _ => None,
        }
    }

    /// Returns true if the expression is a number.
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Call`], returns the name and arguments of the call.
    pub fn as_call(&self) -> Option<(&str, &[Expr])> {
        match self {
            Self::Primary(Primary::Call(name, args)) => Some((name, args)),
            _ => None,
        }
    }

    /// Returns `true` if the expression is "clearly" zero. This is intended to clean up
    /// expressions and is not mathematically rigorous.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Primary(Primary::Integer(n)) => *n == 0,
            Self::Primary(Primary::Float(n)) => *n == 0.0,
            Self::Add(terms) => terms.iter().all(Self::is_zero),
            Self::Mul(factors) => factors.iter().any(Self::is_zero),
            Self::Exp(base, exp) => {
                base.is_zero() && exp.as_number().and_then(primitive::as_f64).is_some_and(|e| e > 0.0)
            },
            _ => false,
        }
    }

    /// Returns `true` if the expression is "clearly" one. This is intended to clean up expressions
    /// and is not mathematically rigorous.
    pub fn is_one(&self) -> bool {
        match self {
            Self::Primary(Primary::Integer(n)) => *n == 1,
            Self::Primary(Primary::Float(n)) => *n == 1.0,
            Self::Mul(factors) => factors.iter().all(Self::is_one),
            Self::Exp(base, exp) => exp.is_zero() || base.is_one(),
            Self::Add(terms) => terms.len() == 1 && terms[0].is_one(),
            _ => false,
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Add`] with zero / one term, or an [`Expr::Mul`]
    /// with zero / one factor. This function checks for these cases and simplifies the expression
    /// into the single term / factor, or an [`Expr::Primary`] containing the integer 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::int(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::int(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the set of symbols that appear in the expression.
    pub fn free_symbols(&self) -> BTreeSet<Symbol> {
        self.post_order_iter()
            .filter_map(Self::as_symbol)
            .cloned()
            .collect()
    }

    /// Returns true if the expression contains the plain symbol `var`.
    pub fn depends_on(&self, var: &str) -> bool {
        self.post_order_iter()
            .filter_map(Self::as_symbol)
            .any(|sym| matches!(sym, Symbol::Plain(name) if name == var))
    }

    /// Returns true if the expression contains a call to the function `name`.
    pub fn mentions_function(&self, name: &str) -> bool {
        self.post_order_iter()
            .filter_map(Self::as_call)
            .any(|(func, _)| func == name)
    }

    /// Rebuilds this node with each direct child replaced by `f(child)`.
    fn try_map_children<E>(
        &self,
        mut f: impl FnMut(&Expr) -> Result<Expr, E>,
    ) -> Result<Expr, E> {
        Ok(match self {
            Self::Primary(Primary::Call(name, args)) => {
                let args = args.iter().map(&mut f).collect::<Result<Vec<_>, _>>()?;
                Self::call(name.clone(), args)
            },
            Self::Primary(_) => self.clone(),
            Self::Add(terms) => {
                let terms = terms.iter().map(&mut f).collect::<Result<Vec<_>, _>>()?;
                Self::sum(terms)
            },
            Self::Mul(factors) => {
                let factors = factors.iter().map(&mut f).collect::<Result<Vec<_>, _>>()?;
                Self::product(factors)
            },
            Self::Exp(base, exp) => {
                let base = f(base)?;
                base.pow(f(exp)?)
            },
            Self::Apply(op, operand) => Self::Apply(op.clone(), Box::new(f(operand)?)),
            Self::Derivative(operand, vars) => Self::pending_derivative(f(operand)?, vars.clone()),
        })
    }

    /// Rebuilds the expression bottom-up: every node is rebuilt from its transformed children,
    /// then passed to `f`. Sums and products are re-flattened on the way up.
    pub fn try_transform<E>(
        &self,
        f: &mut impl FnMut(Expr) -> Result<Expr, E>,
    ) -> Result<Expr, E> {
        let rebuilt = self.try_map_children(|child| child.try_transform(&mut *f))?;
        f(rebuilt)
    }

    /// Infallible version of [`Expr::try_transform`].
    pub fn transform(&self, f: &mut impl FnMut(Expr) -> Expr) -> Expr {
        let result = self.try_transform(&mut |expr| Ok::<_, Infallible>(f(expr)));
        match result {
            Ok(expr) => expr,
            Err(never) => match never {},
        }
    }

    /// Replaces every subexpression strictly equal to `from` with `to`.
    pub fn subs(&self, from: &Expr, to: &Expr) -> Self {
        if self == from {
            return to.clone();
        }
        let result = self.try_map_children(|child| Ok::<_, Infallible>(child.subs(from, to)));
        match result {
            Ok(expr) => expr,
            Err(never) => match never {},
        }
    }
}

/// Returns true if `lhs` and `rhs` contain strictly equal elements with the same multiplicities,
/// in any order.
fn same_multiset(lhs: &[Expr], rhs: &[Expr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }
    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|l| {
        let found = rhs.iter()
            .enumerate()
            .position(|(i, r)| !used[i] && l == r);
        match found {
            Some(i) => {
                used[i] = true;
                true
            },
            None => false,
        }
    })
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                same_multiset(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            (Self::Apply(lhs_op, lhs), Self::Apply(rhs_op, rhs)) => lhs_op == rhs_op && lhs == rhs,
            (Self::Derivative(lhs, lhs_vars), Self::Derivative(rhs, rhs_vars)) => {
                let mut lhs_vars = lhs_vars.clone();
                let mut rhs_vars = rhs_vars.clone();
                lhs_vars.sort();
                rhs_vars.sort();
                lhs == rhs && lhs_vars == rhs_vars
            },
            _ => false,
        }
    }
}

impl Eq for Expr {}

/// Adds two [`Expr`]s together with a [`SumBuilder`]: sums are flattened, numbers are folded, and
/// zeros are dropped. No other simplification is done.
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::sum([self, rhs])
    }
}

/// Subtracts `rhs` from `self`, as `self + -rhs`.
impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::sum([self, -rhs])
    }
}

/// Multiplies two [`Expr`]s together with a [`MultBuilder`]: products are flattened, numbers are
/// folded, and ones are dropped. No other simplification is done.
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::product([self, rhs])
    }
}

/// Negates an [`Expr`] by multiplying it by `-1`.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::product([Self::int(-1), self])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(Symbol::plain(name))
    }

    #[test]
    fn operators_flatten() {
        let expr = sym("x") + (sym("y") + sym("z"));
        assert_eq!(expr, Expr::Add(vec![sym("x"), sym("y"), sym("z")]));

        let expr = Expr::int(2) * sym("x") * Expr::int(3);
        assert_eq!(expr, Expr::Mul(vec![Expr::int(6), sym("x")]));
    }

    #[test]
    fn strict_equality_ignores_order() {
        let lhs = Expr::Add(vec![sym("x"), sym("y"), sym("x")]);
        let rhs = Expr::Add(vec![sym("x"), sym("x"), sym("y")]);
        assert_eq!(lhs, rhs);

        // multiplicities matter
        let rhs = Expr::Add(vec![sym("x"), sym("y"), sym("y")]);
        assert_ne!(lhs, rhs);

        assert_ne!(Expr::int(2), Expr::float(2.0));
    }

    #[test]
    fn zero_and_one_are_dropped() {
        assert_eq!(sym("x") * Expr::int(1), sym("x"));
        assert_eq!(sym("x") + Expr::int(0), sym("x"));
        assert_eq!(sym("x") * Expr::int(0), Expr::int(0));
        assert_eq!(sym("x") - sym("x") + Expr::int(1) - Expr::int(1), Expr::Add(vec![
            sym("x"),
            Expr::Mul(vec![Expr::int(-1), sym("x")]),
        ]));
    }

    #[test]
    fn pending_derivative_orders_by_argument() {
        let u = Expr::call("u", vec![sym("xi"), sym("xj")]);
        let d = Expr::pending_derivative(u.clone(), ["xj".to_string()]);
        let d = Expr::pending_derivative(d, ["xi".to_string()]);
        match &d {
            Expr::Derivative(operand, vars) => {
                assert_eq!(**operand, u);
                assert_eq!(vars, &["xi", "xj"]);
            },
            other => panic!("expected a derivative, got {}", other),
        }
        assert_eq!(d.to_string(), "Derivative(u(xi, xj), xi, xj)");
    }

    #[test]
    fn display() {
        let x = sym("x");
        let expr = Expr::int(2) * x.clone().pow(Expr::int(2)) - x.clone() + Expr::int(1);
        assert_eq!(expr.to_string(), "2 * x^2 - x + 1");

        let expr = (x.clone() + Expr::int(1)).pow(Expr::int(-1));
        assert_eq!(expr.to_string(), "(x + 1)^(-1)");

        let expr = -(Expr::symbol(Symbol::constant("alpha")) * (x.clone() + Expr::int(1)));
        assert_eq!(expr.to_string(), "-alpha * (x + 1)");

        let expr = Expr::Apply(op::Partial::Dx.into(), Box::new(Expr::symbol(Symbol::unknown("u"))));
        assert_eq!(expr.to_string(), "dx(u)");
    }

    #[test]
    fn substitution() {
        let u = Expr::symbol(Symbol::unknown("u"));
        let expr = Expr::symbol(Symbol::constant("alpha")) * u.clone() + Expr::call("exp", vec![u.clone()]);
        // `alpha * 0` vanishes, but calls are never evaluated
        let replaced = expr.subs(&u, &Expr::int(0));
        assert_eq!(replaced, Expr::call("exp", vec![Expr::int(0)]));
    }

    #[test]
    fn symbols() {
        let expr = Expr::symbol(Symbol::constant("alpha")) * sym("xi")
            + Expr::call("u", vec![sym("xi"), sym("xj")]);
        let symbols = expr.free_symbols();
        assert_eq!(symbols.len(), 3);
        assert!(expr.depends_on("xj"));
        assert!(!expr.depends_on("alpha"));
        assert!(expr.mentions_function("u"));
    }
}
