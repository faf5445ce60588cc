use gpde_error::Error;
use gpde_parser::parser::{ast::unary::Unary, token::op::UnaryOpKind};
use super::{scalar, Interpret, Session, Value};

impl Interpret for Unary {
    fn interpret(&self, session: &mut Session) -> Result<Value, Error> {
        let operand = scalar(&self.operand, session, self.op.kind.symbol())?;
        match self.op.kind {
            UnaryOpKind::Neg => Ok(Value::Expr(-operand)),
        }
    }
}
