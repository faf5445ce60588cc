use crate::symbolic::expr::Expr;
use gpde_error::Error;
use gpde_parser::parser::{ast::binary::Binary, token::op::BinOpKind};
use super::{scalar, Interpret, Session, Value};

impl Interpret for Binary {
    fn interpret(&self, session: &mut Session) -> Result<Value, Error> {
        let op = self.op.kind.symbol();
        let lhs = scalar(&self.lhs, session, op)?;
        let rhs = scalar(&self.rhs, session, op)?;

        Ok(Value::Expr(match self.op.kind {
            BinOpKind::Exp => lhs.pow(rhs),
            BinOpKind::Mul => lhs * rhs,
            BinOpKind::Div => lhs * rhs.pow(Expr::int(-1)),
            BinOpKind::Add => lhs + rhs,
            BinOpKind::Sub => lhs - rhs,
        }))
    }
}
