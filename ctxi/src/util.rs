use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct TokLoc<T> {
    pub tok: T,
    pub loc: Location,
}

impl<T> TokLoc<T> {
    pub fn new(tok: T, loc: Location) -> Self {
        Self { tok, loc }
    }
}

/// 1-indexed line and byte column
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}]", self.line, self.column)
    }
}
