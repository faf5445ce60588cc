//! Builtin mathematical functions shared by the differentiator and the numerical evaluator.
//!
//! Every builtin takes exactly one argument. A call to any other name is treated as an undefined
//! function, such as the unknown field `u(xi, xj)`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A builtin function of one real argument.
pub type UnaryFn = fn(f64) -> f64;

static BUILTINS: Lazy<HashMap<&'static str, UnaryFn>> = Lazy::new(|| {
    macro_rules! build {
        ($($name:literal $func:path),* $(,)?) => {
            [
                $(
                    ($name, $func as UnaryFn),
                )*
            ]
                .into_iter()
                .collect()
        };
    }

    build! {
        "exp" f64::exp,
        "ln" f64::ln,
        "sin" f64::sin,
        "cos" f64::cos,
        "tan" f64::tan,
        "sqrt" f64::sqrt,
        "sinh" f64::sinh,
        "cosh" f64::cosh,
        "tanh" f64::tanh,
    }
});

/// Returns the builtin function with the given name.
pub fn get(name: &str) -> Option<UnaryFn> {
    BUILTINS.get(name).copied()
}

/// Returns true if the given name is a builtin function.
pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains_key(name)
}

/// Returns a list of all builtin functions.
pub fn all() -> &'static HashMap<&'static str, UnaryFn> {
    &BUILTINS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        assert!(is_builtin("tanh"));
        assert!(!is_builtin("u"));
        assert_eq!(get("exp").map(|f| f(0.0)), Some(1.0));
        assert_eq!(all().len(), 9);
    }
}
