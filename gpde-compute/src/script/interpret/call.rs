use crate::{
    funcs,
    numerical::error::UndefinedFunction,
    symbolic::expr::op::{Operator, Partial},
};
use gpde_error::Error;
use gpde_parser::parser::ast::call::Call;
use levenshtein::levenshtein;
use super::{command, Interpret, Session, Value};

impl Interpret for Call {
    fn interpret(&self, session: &mut Session) -> Result<Value, Error> {
        let name = self.name.name.as_str();
        if let Some(partial) = Partial::from_name(name) {
            return command::operator(self, session, Operator::Partial(partial));
        }
        if session.is_operator(name) {
            return command::operator(self, session, Operator::Linear(name.to_string()));
        }
        if funcs::is_builtin(name) {
            return command::function(self, session);
        }

        match name {
            "constant" | "field" | "unknown" | "linear" | "time" => command::declare(self, session),
            "grad" => command::grad(self, session),
            "div" | "curl" | "rot" => command::vector(self, session),
            "dot" | "cross" => command::product(self, session),
            "derive" => command::derive(self, session),
            "kernel" => command::kernel(self, session),
            "kernels" => command::kernels(self, session),
            "eval" => command::eval(self, session),
            _ => Err(Error::new(vec![self.name.span.clone()], UndefinedFunction {
                name: name.to_string(),
                suggestions: similar_names(name, session),
            })),
        }
    }
}

/// Returns every callable name similar to `name`.
fn similar_names(name: &str, session: &Session) -> Vec<String> {
    let mut similar = command::COMMANDS
        .iter()
        .copied()
        .chain(Partial::ALL.iter().map(|op| op.name()))
        .chain(funcs::all().keys().copied())
        .chain(session.operators())
        .filter(|candidate| levenshtein(candidate, name) < 2)
        .map(str::to_string)
        .collect::<Vec<_>>();
    similar.sort_unstable();
    similar.dedup();
    similar
}
