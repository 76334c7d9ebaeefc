use std::str::FromStr;

use ctxbind::{BindingKind, Value, VariableStore};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    DumpLex,
    DumpParse,
}

/// Everything that decides how a source is run, independent of where it comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub mode: Mode,
    pub binding: BindingKind,
    pub dump_vars: bool,
}

/// A `NAME=VALUE` pair given on the command line, kept raw until the store is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarArg {
    pub name: String,
    pub raw: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VarArgError {
    #[error("expected NAME=VALUE, got '{0}'")]
    MissingEquals(String),

    #[error("variable name must not be empty")]
    EmptyName,
}

impl FromStr for VarArg {
    type Err = VarArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, raw) = s
            .split_once('=')
            .ok_or_else(|| VarArgError::MissingEquals(s.to_string()))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(VarArgError::EmptyName);
        }

        Ok(Self {
            name: name.to_string(),
            raw: raw.to_string(),
        })
    }
}

impl VarArg {
    pub fn value(&self) -> Value {
        parse_literal(&self.raw)
    }
}

/// `nil`, `true`, `false` and numbers are read as such, anything else is a string.
/// Surrounding double quotes force a string.
pub fn parse_literal(raw: &str) -> Value {
    match raw {
        "nil" => Value::nil(),
        "true" => Value::bool(true),
        "false" => Value::bool(false),
        s if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') => {
            Value::string(&s[1..s.len() - 1])
        }
        s => match s.parse::<f64>() {
            Ok(num) if num.is_finite() => Value::number(num),
            _ => Value::string(s),
        },
    }
}

/// Later occurrences of a name overwrite earlier ones.
pub fn build_store<'a, I>(vars: I) -> VariableStore
where
    I: IntoIterator<Item = &'a VarArg>,
{
    vars.into_iter().map(|var| (var.name.clone(), var.value())).collect()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn var_args() {
        assert_eq!(
            "x=5".parse::<VarArg>(),
            Ok(VarArg {
                name: "x".to_string(),
                raw: "5".to_string()
            })
        );
        assert_eq!(
            "msg=a=b".parse::<VarArg>().map(|v| v.raw),
            Ok("a=b".to_string())
        );
        assert_eq!(
            "novalue".parse::<VarArg>(),
            Err(VarArgError::MissingEquals("novalue".to_string()))
        );
        assert_eq!(" =1".parse::<VarArg>(), Err(VarArgError::EmptyName));
    }

    #[test]
    fn literals() {
        assert_eq!(parse_literal("nil"), Value::Nil);
        assert_eq!(parse_literal("true"), Value::bool(true));
        assert_eq!(parse_literal("-2.5"), Value::number(-2.5));
        assert_eq!(parse_literal("\"42\""), Value::string("42"));
        assert_eq!(parse_literal("hello"), Value::string("hello"));
        assert_eq!(parse_literal("inf"), Value::string("inf"));
        assert_eq!(parse_literal(""), Value::string(""));
    }

    #[test]
    fn store_from_args() {
        let args = ["a=1", "b=two", "a=3"]
            .iter()
            .map(|s| s.parse::<VarArg>())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        let store = build_store(&args);
        assert_eq!(
            store.snapshot(),
            vec![
                ("a".to_string(), Value::number(3.0)),
                ("b".to_string(), Value::string("two")),
            ]
        );
    }
}
