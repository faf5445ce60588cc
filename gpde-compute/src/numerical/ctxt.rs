use crate::funcs::{self, UnaryFn};
use levenshtein::levenshtein;
use std::collections::HashMap;

/// A context to use when evaluating an expression, containing the values of symbols and the
/// functions that can be called.
#[derive(Debug, Clone)]
pub struct Ctxt {
    /// The values of the symbols in the context, by name.
    vars: HashMap<String, f64>,

    /// The functions in the context.
    funcs: HashMap<String, UnaryFn>,
}

impl Default for Ctxt {
    fn default() -> Self {
        let mut ctxt = Self::new();
        ctxt.add_var("pi", std::f64::consts::PI);
        ctxt.add_var("e", std::f64::consts::E);
        ctxt
    }
}

impl Ctxt {
    /// Creates a new context with the builtin functions, but no variables. Consider using the
    /// [`Default`] implementation instead, which also defines `pi` and `e`.
    pub fn new() -> Ctxt {
        Ctxt {
            vars: HashMap::new(),
            funcs: funcs::all()
                .iter()
                .map(|(name, func)| (name.to_string(), *func))
                .collect(),
        }
    }

    /// Add a variable to the context.
    pub fn add_var(&mut self, name: &str, value: f64) {
        self.vars.insert(name.to_string(), value);
    }

    /// Get the value of a variable in the context.
    pub fn get_var(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    /// Returns the variables in the context.
    pub fn get_vars(&self) -> &HashMap<String, f64> {
        &self.vars
    }

    /// Get a function in the context.
    pub fn get_func(&self, name: &str) -> Option<UnaryFn> {
        self.funcs.get(name).copied()
    }

    /// Returns all functions in the context with a name similar to the given name.
    pub fn get_similar_funcs(&self, name: &str) -> Vec<&str> {
        let mut similar = self.funcs
            .keys()
            .filter(|n| levenshtein(n, name) < 2)
            .map(String::as_str)
            .collect::<Vec<_>>();
        similar.sort_unstable();
        similar
    }
}
