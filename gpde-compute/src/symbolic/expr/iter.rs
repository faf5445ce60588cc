use super::{Expr, Primary};

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// Arguments of function calls, operands of abstract operators, and operands of pending
/// derivatives are all visited before the node that contains them.
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }

    /// Visits the node on top of the stack if all of its children were visited, otherwise pushes
    /// the children so that the leftmost one is visited next.
    fn descend(&mut self, children: &'a [Expr]) -> Option<Option<&'a Expr>> {
        match children.last() {
            Some(last) if !self.is_last_visited(last) => {
                self.stack.extend(children.iter().rev());
                None
            },
            _ => Some(self.visit()),
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                Expr::Primary(Primary::Call(_, args)) => {
                    if let Some(visited) = self.descend(args) {
                        return visited;
                    }
                },
                Expr::Primary(_) => return self.visit(),
                Expr::Add(terms) | Expr::Mul(terms) => {
                    if let Some(visited) = self.descend(terms) {
                        return visited;
                    }
                },
                Expr::Exp(lhs, rhs) => {
                    if self.is_last_visited(rhs) {
                        return self.visit();
                    }
                    self.stack.push(rhs);
                    self.stack.push(lhs);
                },
                Expr::Apply(_, operand) | Expr::Derivative(operand, _) => {
                    if self.is_last_visited(operand) {
                        return self.visit();
                    }
                    self.stack.push(operand);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::{op::Partial, Symbol};
    use super::*;

    #[test]
    fn visits_children_first() {
        let u = Expr::symbol(Symbol::unknown("u"));
        let expr = Expr::Mul(vec![
            Expr::symbol(Symbol::constant("alpha")),
            Expr::Apply(Partial::Dx.into(), Box::new(u.clone())),
        ]);

        let names = expr.post_order_iter()
            .map(|e| match e {
                Expr::Primary(Primary::Symbol(sym)) => sym.name().to_string(),
                Expr::Apply(op, _) => op.name().to_string(),
                Expr::Mul(_) => "*".to_string(),
                _ => "?".to_string(),
            })
            .collect::<Vec<_>>();
        assert_eq!(names, ["alpha", "u", "dx", "*"]);
    }

    #[test]
    fn visits_call_arguments() {
        let call = Expr::call("u", vec![Expr::symbol(Symbol::plain("xi")), Expr::int(2)]);
        assert_eq!(call.post_order_iter().count(), 3);
    }
}
