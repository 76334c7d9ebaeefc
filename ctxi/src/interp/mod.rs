use std::cell::{RefCell, RefMut};
use std::io::{self, Write};

use ctxbind::{BindingError, InvalidOp, Value, VariableBinding};
use thiserror::Error;

use crate::parse::expr::Expr;
use crate::parse::{stmt::Stmt, token, Program};
use crate::util::{Location, TokLoc};

use self::env::Env;
use self::interner::{Interner, Key};

pub mod env;
pub mod interner;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{0} RuntimeError: Invalid binary operation '{1}' between '{2}' and '{3}'")]
    InvalidBinaryOp(Location, token::BinaryOp, &'static str, &'static str),

    #[error("{0} RuntimeError: Invalid unary operation '{1}' on '{2}'")]
    InvalidUnaryOp(Location, token::UnaryOp, &'static str),

    #[error("{0} RuntimeError: Trying to access undefined variable: '{1}'")]
    UndefinedVariable(Location, String),

    #[error("RuntimeError: Unable to write output: {0}")]
    Output(#[from] io::Error),
}

impl RuntimeError {
    pub fn loc(&self) -> Option<Location> {
        match self {
            RuntimeError::InvalidBinaryOp(loc, _, _, _) => Some(*loc),
            RuntimeError::InvalidUnaryOp(loc, _, _) => Some(*loc),
            RuntimeError::UndefinedVariable(loc, _) => Some(*loc),
            RuntimeError::Output(_) => None,
        }
    }
}

/// Tree-walk interpreter.
///
/// Local `var` declarations live in the interpreter's own scopes. Every other name is
/// resolved through the binding: reads call [`VariableBinding::get`], and an assignment to
/// an undeclared name is written to the binding only if [`VariableBinding::has`] agrees.
pub struct Interpreter<W: Write> {
    env: Env,
    binding: Box<dyn VariableBinding>,
    out: RefCell<W>,
}

impl<W: Write> Interpreter<W> {
    pub fn new(binding: Box<dyn VariableBinding>, out: W) -> Self {
        Self {
            env: Env::new(),
            binding,
            out: RefCell::new(out),
        }
    }

    pub fn binding(&self) -> &dyn VariableBinding {
        self.binding.as_ref()
    }

    pub fn output(&self) -> RefMut<'_, W> {
        self.out.borrow_mut()
    }

    pub fn into_output(self) -> W {
        self.out.into_inner()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.statements.len()))]
    pub fn interpret(&self, program: &Program, interner: &Interner) -> Result<(), RuntimeError> {
        for stmt in program.statements.iter() {
            self.execute(stmt, interner)?;
        }
        self.out.borrow_mut().flush()?;
        Ok(())
    }

    fn execute(&self, stmt: &Stmt, interner: &Interner) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Expr { expr } => {
                self.eval(expr, interner)?;
            }
            Stmt::Print { expr, .. } => {
                let value = self.eval(expr, interner)?;
                writeln!(self.out.borrow_mut(), "{value}")?;
            }
            Stmt::Var { name, init, .. } => {
                let value = match init {
                    Some(expr) => self.eval(expr, interner)?,
                    None => Value::nil(),
                };
                self.env.define(*name, value);
            }
            Stmt::Block { statements } => {
                let _local = self.env.create_scope();
                for stmt in statements {
                    self.execute(stmt, interner)?;
                }
            }
            Stmt::If {
                condition,
                then,
                otherwise,
                ..
            } => match self.eval(condition, interner)?.truthiness() {
                true => self.execute(then, interner)?,
                false => {
                    if let Some(stmt) = otherwise {
                        self.execute(stmt, interner)?
                    }
                }
            },
            Stmt::While {
                condition, body, ..
            } => {
                while self.eval(condition, interner)?.truthiness() {
                    self.execute(body, interner)?;
                }
            }
        }
        Ok(())
    }

    pub fn eval(&self, expr: &Expr, interner: &Interner) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal { value } => Ok(match &value.tok {
                token::Literal::Number(num) => Value::number(*num),
                token::Literal::String(key) => Value::string(interner.resolve(*key)),
                token::Literal::True => Value::bool(true),
                token::Literal::False => Value::bool(false),
                token::Literal::Nil => Value::nil(),
            }),
            Expr::Grouping { expr, .. } => self.eval(expr, interner),
            Expr::Unary { operator, right } => {
                let value = self.eval(right, interner)?;
                match operator.tok {
                    token::UnaryOp::Minus => value.minus(),
                    token::UnaryOp::Not => Ok(value.not()),
                }
                .map_err(|err| match err {
                    InvalidOp::Unary(s) | InvalidOp::Binary(s, _) => {
                        RuntimeError::InvalidUnaryOp(operator.loc, operator.tok, s)
                    }
                })
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let lhs = self.eval(left, interner)?;
                let rhs = self.eval(right, interner)?;

                match operator.tok {
                    token::BinaryOp::Add => lhs.add(&rhs),
                    token::BinaryOp::Sub => lhs.sub(&rhs),
                    token::BinaryOp::Mul => lhs.mul(&rhs),
                    token::BinaryOp::Div => lhs.div(&rhs),
                    token::BinaryOp::Equal => Ok(lhs.eq(&rhs)),
                    token::BinaryOp::NotEqual => Ok(lhs.neq(&rhs)),
                    token::BinaryOp::Less => lhs.lt(&rhs),
                    token::BinaryOp::LessEq => lhs.le(&rhs),
                    token::BinaryOp::Greater => lhs.gt(&rhs),
                    token::BinaryOp::GreaterEq => lhs.ge(&rhs),
                }
                .map_err(|_| {
                    RuntimeError::InvalidBinaryOp(operator.loc, operator.tok, lhs.name(), rhs.name())
                })
            }
            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let lhs = self.eval(left, interner)?;
                match (operator.tok, lhs.truthiness()) {
                    (token::LogicalOp::And, false) => Ok(lhs),
                    (token::LogicalOp::Or, true) => Ok(lhs),
                    _ => self.eval(right, interner),
                }
            }
            Expr::Variable { var } => self.lookup(var, interner),
            Expr::Assignment { var, value } => {
                let value = self.eval(value, interner)?;
                self.assign(var, value, interner)
            }
        }
    }

    fn lookup(&self, var: &TokLoc<Key>, interner: &Interner) -> Result<Value, RuntimeError> {
        if let Some(value) = self.env.get(var.tok) {
            return Ok(value);
        }

        let name = interner.resolve(var.tok);
        self.binding.get(name).map_err(|err| match err {
            BindingError::MissingVariable(name) => RuntimeError::UndefinedVariable(var.loc, name),
        })
    }

    fn assign(
        &self,
        var: &TokLoc<Key>,
        value: Value,
        interner: &Interner,
    ) -> Result<Value, RuntimeError> {
        if self.env.assign(var.tok, value.clone()) {
            return Ok(value);
        }

        let name = interner.resolve(var.tok);
        match self.binding.has(name) {
            true => {
                self.binding.set(name, value.clone());
                Ok(value)
            }
            false => Err(RuntimeError::UndefinedVariable(var.loc, name.to_string())),
        }
    }
}
