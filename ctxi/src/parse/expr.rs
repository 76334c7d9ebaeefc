use std::fmt::Display;

use super::token;
use crate::interp::interner::{Interner, Key};
use crate::util::{Location, TokLoc};

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal {
        value: TokLoc<token::Literal>,
    },
    Grouping {
        expr: Box<Expr>,
        loc: Location,
    },
    Unary {
        operator: TokLoc<token::UnaryOp>,
        right: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: TokLoc<token::BinaryOp>,
        right: Box<Expr>,
    },
    Logical {
        left: Box<Expr>,
        operator: TokLoc<token::LogicalOp>,
        right: Box<Expr>,
    },
    Variable {
        var: TokLoc<Key>,
    },
    Assignment {
        var: TokLoc<Key>,
        value: Box<Expr>,
    },
}

pub struct DisplayedExpr<'a, 'b> {
    expr: &'a Expr,
    interner: &'b Interner,
}

impl Expr {
    pub fn literal(value: TokLoc<token::Literal>) -> Self {
        Expr::Literal { value }
    }

    pub fn group(expr: Box<Expr>, loc: Location) -> Self {
        Expr::Grouping { expr, loc }
    }

    pub fn unary(operator: TokLoc<token::UnaryOp>, right: Box<Expr>) -> Self {
        Expr::Unary { operator, right }
    }

    pub fn binary(left: Box<Expr>, operator: TokLoc<token::BinaryOp>, right: Box<Expr>) -> Self {
        Expr::Binary {
            left,
            operator,
            right,
        }
    }

    pub fn logical(left: Box<Expr>, operator: TokLoc<token::LogicalOp>, right: Box<Expr>) -> Self {
        Expr::Logical {
            left,
            operator,
            right,
        }
    }

    pub fn variable(var: TokLoc<Key>) -> Self {
        Expr::Variable { var }
    }

    pub fn assignment(var: TokLoc<Key>, value: Box<Expr>) -> Self {
        Expr::Assignment { var, value }
    }

    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn loc(&self) -> Location {
        match self {
            Expr::Literal { value } => value.loc,
            Expr::Grouping { loc, .. } => *loc,
            Expr::Unary { operator, .. } => operator.loc,
            Expr::Binary { left, .. } => left.loc(),
            Expr::Logical { left, .. } => left.loc(),
            Expr::Variable { var } => var.loc,
            Expr::Assignment { var, .. } => var.loc,
        }
    }

    pub fn display<'a, 'b>(&'a self, interner: &'b Interner) -> DisplayedExpr<'a, 'b> {
        DisplayedExpr {
            expr: self,
            interner,
        }
    }
}

impl Display for DisplayedExpr<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let interner = self.interner;
        match self.expr {
            Expr::Literal { value } => match &value.tok {
                token::Literal::Number(num) => write!(f, "{num}"),
                token::Literal::String(key) => write!(f, "\"{}\"", interner.resolve(*key)),
                token::Literal::True => write!(f, "true"),
                token::Literal::False => write!(f, "false"),
                token::Literal::Nil => write!(f, "nil"),
            },
            Expr::Grouping { expr, .. } => write!(f, "(group {})", expr.display(interner)),
            Expr::Unary { operator, right } => {
                write!(f, "({} {})", operator.tok, right.display(interner))
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => write!(
                f,
                "({} {} {})",
                operator.tok,
                left.display(interner),
                right.display(interner)
            ),
            Expr::Logical {
                left,
                operator,
                right,
            } => write!(
                f,
                "({} {} {})",
                operator.tok.as_str(),
                left.display(interner),
                right.display(interner)
            ),
            Expr::Variable { var } => write!(f, "{}", interner.resolve(var.tok)),
            Expr::Assignment { var, value } => write!(
                f,
                "(= {} {})",
                interner.resolve(var.tok),
                value.display(interner)
            ),
        }
    }
}
