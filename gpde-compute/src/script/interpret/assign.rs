use gpde_error::Error;
use gpde_parser::parser::ast::assign::Assign;
use log::debug;
use super::{command::reserved, Interpret, Session, Value};
use crate::script::error::ReservedName;

impl Interpret for Assign {
    fn interpret(&self, session: &mut Session) -> Result<Value, Error> {
        let name = &self.target.name;
        if let Some(kind) = reserved(name, session) {
            return Err(Error::new(vec![self.target.span.clone()], ReservedName {
                action: "assign to",
                name: name.clone(),
                kind,
            }));
        }

        let value = self.value.interpret(session)?;
        debug!("{} = {}", name, value);
        session.add_var(name, value.clone());
        Ok(value)
    }
}
