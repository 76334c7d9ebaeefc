use thiserror::Error;

use crate::store::VariableStore;
use crate::value::Value;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("No such variable: '{0}'")]
    MissingVariable(String),
}

/// Name resolution capability consulted by a script evaluator.
///
/// `get` and `has` carry the policy; `set` and `remove` write straight through to the
/// underlying store for every implementation.
pub trait VariableBinding {
    fn get(&self, name: &str) -> Result<Value, BindingError>;

    /// Evaluators ask this before assigning to a name they have not declared locally.
    fn has(&self, name: &str) -> bool;

    fn variables(&self) -> &VariableStore;

    fn set(&self, name: &str, value: Value) {
        tracing::debug!(name, ?value, "binding write");
        self.variables().insert(name, value);
    }

    fn remove(&self, name: &str) -> Option<Value> {
        self.variables().remove(name)
    }
}

/// Permissive binding: unknown names read as [`Value::Nil`] and always "exist".
#[derive(Debug, Clone)]
pub struct ContextBinding {
    variables: VariableStore,
}

impl ContextBinding {
    pub fn new(variables: VariableStore) -> Self {
        Self { variables }
    }
}

impl VariableBinding for ContextBinding {
    fn get(&self, name: &str) -> Result<Value, BindingError> {
        Ok(self.variables.get(name).unwrap_or_else(|| {
            tracing::trace!(name, "unbound variable read as nil");
            Value::Nil
        }))
    }

    fn has(&self, _name: &str) -> bool {
        true
    }

    fn variables(&self) -> &VariableStore {
        &self.variables
    }
}

/// Binding that refuses to read names the store does not hold.
#[derive(Debug, Clone)]
pub struct StrictBinding {
    variables: VariableStore,
}

impl StrictBinding {
    pub fn new(variables: VariableStore) -> Self {
        Self { variables }
    }
}

impl VariableBinding for StrictBinding {
    fn get(&self, name: &str) -> Result<Value, BindingError> {
        self.variables.get(name).ok_or_else(|| {
            tracing::debug!(name, "missing variable");
            BindingError::MissingVariable(name.to_owned())
        })
    }

    fn has(&self, name: &str) -> bool {
        self.variables.contains(name)
    }

    fn variables(&self) -> &VariableStore {
        &self.variables
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BindingKind {
    #[default]
    Context,
    Strict,
}

impl BindingKind {
    pub fn bind(self, variables: VariableStore) -> Box<dyn VariableBinding> {
        match self {
            BindingKind::Context => Box::new(ContextBinding::new(variables)),
            BindingKind::Strict => Box::new(StrictBinding::new(variables)),
        }
    }
}
