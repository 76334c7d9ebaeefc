use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::value::Value;

/// A shared map from variable name to [`Value`].
///
/// Cloning the store clones the handle, not the map: every clone observes every mutation.
/// The store is single-threaded; callers serialize access themselves.
#[derive(Clone, Default)]
pub struct VariableStore {
    inner: Rc<RefCell<FxHashMap<String, Value>>>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absent names are `None`, never an error.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.inner.borrow().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.borrow().contains_key(name)
    }

    pub fn insert<K>(&self, name: K, value: Value) -> Option<Value>
    where
        K: Into<String>,
    {
        self.inner.borrow_mut().insert(name.into(), value)
    }

    pub fn remove(&self, name: &str) -> Option<Value> {
        self.inner.borrow_mut().remove(name)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> Vec<String> {
        let mut names = self.inner.borrow().keys().cloned().collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    /// Sorted copy of the current contents.
    pub fn snapshot(&self) -> Vec<(String, Value)> {
        let mut pairs = self
            .inner
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<Vec<_>>();
        pairs.sort_unstable_by(|(l, _), (r, _)| l.cmp(r));
        pairs
    }

    /// Whether both handles point to the same map.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for VariableStore {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let map = iter.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            inner: Rc::new(RefCell::new(map)),
        }
    }
}

impl Debug for VariableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.snapshot()).finish()
    }
}
