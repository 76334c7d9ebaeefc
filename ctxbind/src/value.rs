use std::fmt::{Debug, Display};
use std::rc::Rc;

/// A value held by a [`VariableStore`](crate::VariableStore).
///
/// `Nil` doubles as the absent marker returned by a permissive lookup, so a name bound to
/// `Nil` and a name that is not bound at all read the same.
#[derive(Clone, Default, PartialEq, PartialOrd)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidOp {
    Unary(&'static str),
    Binary(&'static str, &'static str),
}

pub type OpResult = Result<Value, InvalidOp>;

impl Value {
    pub fn nil() -> Self {
        Value::Nil
    }

    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    pub fn number(num: f64) -> Self {
        Value::Number(num)
    }

    pub fn string<S: AsRef<str>>(str: S) -> Self {
        Value::String(Rc::from(str.as_ref()))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// follows Ruby's simple rule: `false` and `nil` are falsy, everything else truthy
    pub fn truthiness(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            _ => true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Value::Nil => "<nil>",
            Value::Bool(_) => "<bool>",
            Value::Number(_) => "<number>",
            Value::String(_) => "<string>",
        }
    }

    pub fn not(&self) -> Value {
        Value::Bool(!self.truthiness())
    }

    pub fn minus(&self) -> OpResult {
        match self {
            Value::Number(num) => Ok(Value::Number(-num)),
            v => Err(InvalidOp::Unary(v.name())),
        }
    }

    pub fn add(&self, other: &Self) -> OpResult {
        match (self, other) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
            (Value::String(l), Value::String(r)) => {
                let mut new_str = String::with_capacity(l.len() + r.len());
                new_str.push_str(l);
                new_str.push_str(r);
                Ok(Value::string(new_str))
            }
            (l, r) => Err(InvalidOp::Binary(l.name(), r.name())),
        }
    }

    pub fn sub(&self, other: &Self) -> OpResult {
        self.arith(other, |l, r| Value::Number(l - r))
    }

    pub fn mul(&self, other: &Self) -> OpResult {
        self.arith(other, |l, r| Value::Number(l * r))
    }

    pub fn div(&self, other: &Self) -> OpResult {
        self.arith(other, |l, r| Value::Number(l / r))
    }

    pub fn lt(&self, other: &Self) -> OpResult {
        self.arith(other, |l, r| Value::Bool(l < r))
    }

    pub fn le(&self, other: &Self) -> OpResult {
        self.arith(other, |l, r| Value::Bool(l <= r))
    }

    pub fn gt(&self, other: &Self) -> OpResult {
        self.arith(other, |l, r| Value::Bool(l > r))
    }

    pub fn ge(&self, other: &Self) -> OpResult {
        self.arith(other, |l, r| Value::Bool(l >= r))
    }

    /// values of different kinds are never equal
    pub fn eq(&self, other: &Self) -> Value {
        Value::Bool(self == other)
    }

    pub fn neq(&self, other: &Self) -> Value {
        Value::Bool(self != other)
    }

    fn arith<F>(&self, other: &Self, op: F) -> OpResult
    where
        F: Fn(f64, f64) -> Value,
    {
        match (self, other) {
            (Value::Number(l), Value::Number(r)) => Ok(op(*l, *r)),
            (l, r) => Err(InvalidOp::Binary(l.name(), r.name())),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(Rc::from(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(num) => write!(f, "Number({num})"),
            Value::String(str) => write!(f, "String({str:?})"),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(num) => write!(f, "{num}"),
            Value::String(str) => write!(f, "{str}"),
        }
    }
}
