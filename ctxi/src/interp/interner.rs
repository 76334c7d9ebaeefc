use lasso::{Rodeo, Spur};

pub type Key = Spur;

/// Owns every identifier and string literal seen by the lexer.
#[derive(Debug, Default)]
pub struct Interner {
    rodeo: Rodeo,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, key: Key) -> &str {
        self.rodeo.resolve(&key)
    }

    pub fn get_or_intern<T>(&mut self, string: T) -> Key
    where
        T: AsRef<str>,
    {
        self.rodeo.get_or_intern(string)
    }

    pub fn get<T>(&self, string: T) -> Option<Key>
    where
        T: AsRef<str>,
    {
        self.rodeo.get(string)
    }
}
