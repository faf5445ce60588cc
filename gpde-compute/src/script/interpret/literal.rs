use crate::symbolic::expr::Expr;
use gpde_error::Error;
use gpde_parser::parser::ast::literal::Literal;
use super::{Interpret, Session, Value};

impl Interpret for Literal {
    fn interpret(&self, session: &mut Session) -> Result<Value, Error> {
        match self {
            Literal::Number(num) => Ok(Value::Expr(Expr::number(num.value))),
            Literal::Symbol(sym) => Ok(session.resolve(&sym.name)),
        }
    }
}
