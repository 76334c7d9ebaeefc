use std::cell::{RefCell, RefMut};

use ctxbind::Value;
use rustc_hash::FxHashMap;

use super::interner::Key;

/// Stack of local scopes. The bottom scope lives as long as the `Env` and holds the script's
/// top-level `var` declarations; names that are not found here go to the binding.
#[derive(Debug)]
pub struct Env {
    stack: RefCell<Vec<FxHashMap<Key, Value>>>,
}

#[must_use = "EnvGuard lifetime defines the lifetime of the scope, it will immediately drop if not used"]
pub struct EnvGuard<'a> {
    env: &'a Env,
    index: usize,
}

impl Env {
    pub fn new() -> Self {
        Self {
            stack: RefCell::new(vec![FxHashMap::default()]),
        }
    }

    pub fn len(&self) -> usize {
        self.stack.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn create_scope(&self) -> EnvGuard<'_> {
        self.stack.borrow_mut().push(FxHashMap::default());
        EnvGuard {
            env: self,
            index: self.len() - 1,
        }
    }

    /// Declare in the innermost scope, shadowing anything outside it.
    pub fn define(&self, key: Key, value: Value) {
        let mut stack = self.stack.borrow_mut();
        if let Some(map) = stack.last_mut() {
            map.insert(key, value);
        }
    }

    pub fn get(&self, key: Key) -> Option<Value> {
        let stack = self.stack.borrow();
        stack.iter().rev().find_map(|map| map.get(&key).cloned())
    }

    /// Update the innermost declaration of `key`, returns `false` if it was never declared.
    pub fn assign(&self, key: Key, value: Value) -> bool {
        match self.get_mut(key) {
            Some(mut slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn get_mut(&self, key: Key) -> Option<RefMut<'_, Value>> {
        let stack = self.stack.borrow_mut();
        RefMut::filter_map(stack, |stack| {
            stack.iter_mut().rev().find_map(|map| map.get_mut(&key))
        })
        .ok()
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EnvGuard<'_> {
    fn drop(&mut self) {
        // parent scope dropped before child scope
        debug_assert_eq!(
            self.index,
            self.env.len() - 1,
            "invalid scope drop order (index: {}, len: {})",
            self.index,
            self.env.len()
        );
        self.env.stack.borrow_mut().pop();
    }
}
