use crate::{
    kernel::point::Coordinate,
    symbolic::expr::{Expr, Symbol},
};
use gpde_error::Error;
use gpde_parser::parser::{ast::stmt::Stmt, Parser};
use log::debug;
use std::collections::{HashMap, HashSet};
use super::{interpret::Interpret, value::Value};

/// The state of a kernel script: declared symbols, declared operators and time coordinates, and
/// the values of assigned names.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Symbols declared with `constant`, `field` or `unknown`, by name.
    symbols: HashMap<String, Symbol>,

    /// Names of abstract linear operators declared with `linear`.
    operators: HashSet<String>,

    /// Names of coordinates declared with `time`.
    times: HashSet<String>,

    /// Values of assigned names.
    vars: HashMap<String, Value>,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and runs the given source, returning the value of each statement.
    ///
    /// The session keeps its state between calls, so that a REPL can run one line at a time.
    pub fn run(&mut self, source: &str) -> Result<Vec<Value>, Error> {
        let stmts = Parser::new(source).try_parse_full_many::<Stmt>()?;
        debug!("parsed {} statement(s)", stmts.len());
        stmts.iter()
            .map(|stmt| stmt.interpret(self))
            .collect()
    }

    /// Declares a symbol, replacing any value assigned to its name.
    pub fn declare(&mut self, symbol: Symbol) {
        self.vars.remove(symbol.name());
        self.symbols.insert(symbol.name().to_string(), symbol);
    }

    /// Declares an abstract linear operator.
    pub fn declare_operator(&mut self, name: &str) {
        self.operators.insert(name.to_string());
    }

    /// Declares a time coordinate.
    pub fn declare_time(&mut self, name: &str) {
        self.times.insert(name.to_string());
    }

    /// Returns the symbol declared with the given name, if any.
    pub fn get_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Returns true if `name` is a declared linear operator.
    pub fn is_operator(&self, name: &str) -> bool {
        self.operators.contains(name)
    }

    /// Returns the declared linear operators.
    pub fn operators(&self) -> impl Iterator<Item = &str> {
        self.operators.iter().map(String::as_str)
    }

    /// Assigns a value to a name.
    pub fn add_var(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_string(), value);
    }

    /// Returns the value assigned to a name.
    pub fn get_var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Resolves a name: an assigned value, a declared symbol, or a plain symbol.
    pub fn resolve(&self, name: &str) -> Value {
        if let Some(value) = self.vars.get(name) {
            return value.clone();
        }
        let symbol = self.symbols
            .get(name)
            .cloned()
            .unwrap_or_else(|| Symbol::plain(name));
        Value::Expr(Expr::symbol(symbol))
    }

    /// Returns the coordinate with the given name.
    pub fn coordinate(&self, name: &str) -> Coordinate {
        if self.times.contains(name) {
            Coordinate::time(name)
        } else {
            Coordinate::space(name)
        }
    }
}
