use std::fmt::Display;

use strum::{EnumIter, IntoEnumIterator};

use crate::interp::interner::{Interner, Key};
use crate::util::{Location, TokLoc};

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Punctuation(TokLoc<Punctuation>),
    Operator(TokLoc<Operator>),
    Keyword(TokLoc<Keyword>),
    Literal(TokLoc<Literal>),
    Eof(Location),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Punctuation {
    ParenLeft,
    ParenRight,
    BraceLeft,
    BraceRight,
    Semicolon,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operator {
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Plus,
    Minus,
    Star,
    Slash,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter)]
pub enum Keyword {
    And,
    Else,
    False,
    If,
    Nil,
    Or,
    Print,
    True,
    Var,
    While,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    String(Key),
    Identifier(Key),
    Number(f64),
}

/// A wrapper for `Token` that can be displayed, the interner is needed to resolve names.
pub struct DisplayedToken<'a, 'b> {
    token: &'a Token,
    interner: &'b Interner,
}

impl Token {
    pub fn loc(&self) -> Location {
        match self {
            Token::Punctuation(TokLoc { loc, .. }) => *loc,
            Token::Operator(TokLoc { loc, .. }) => *loc,
            Token::Keyword(TokLoc { loc, .. }) => *loc,
            Token::Literal(TokLoc { loc, .. }) => *loc,
            Token::Eof(loc) => *loc,
        }
    }

    pub fn static_str(&self) -> &'static str {
        match self {
            Token::Punctuation(TokLoc { tok, .. }) => tok.as_str(),
            Token::Operator(TokLoc { tok, .. }) => tok.as_str(),
            Token::Keyword(TokLoc { tok, .. }) => tok.as_str(),
            Token::Literal(TokLoc { tok, .. }) => match tok {
                Literal::String(_) => "<string>",
                Literal::Identifier(_) => "<identifier>",
                Literal::Number(_) => "<number>",
            },
            Token::Eof(_) => "<eof>",
        }
    }

    pub fn display<'a, 'b>(&'a self, interner: &'b Interner) -> DisplayedToken<'a, 'b> {
        DisplayedToken {
            token: self,
            interner,
        }
    }
}

impl Display for DisplayedToken<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let loc = self.token.loc();
        match self.token {
            Token::Literal(TokLoc { tok, .. }) => match tok {
                Literal::String(key) => {
                    write!(f, "{loc} String \"{}\"", self.interner.resolve(*key))
                }
                Literal::Identifier(key) => {
                    write!(f, "{loc} Identifier {}", self.interner.resolve(*key))
                }
                Literal::Number(num) => write!(f, "{loc} Number {num}"),
            },
            Token::Punctuation(_) => write!(f, "{loc} Punctuation {}", self.token.static_str()),
            Token::Operator(_) => write!(f, "{loc} Operator {}", self.token.static_str()),
            Token::Keyword(_) => write!(f, "{loc} Keyword {}", self.token.static_str()),
            Token::Eof(_) => write!(f, "{loc} Eof"),
        }
    }
}

impl Punctuation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Punctuation::ParenLeft => "(",
            Punctuation::ParenRight => ")",
            Punctuation::BraceLeft => "{",
            Punctuation::BraceRight => "}",
            Punctuation::Semicolon => ";",
        }
    }
}

impl TryFrom<char> for Punctuation {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '(' => Ok(Punctuation::ParenLeft),
            ')' => Ok(Punctuation::ParenRight),
            '{' => Ok(Punctuation::BraceLeft),
            '}' => Ok(Punctuation::BraceRight),
            ';' => Ok(Punctuation::Semicolon),
            _ => Err(()),
        }
    }
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Bang => "!",
            Operator::BangEqual => "!=",
            Operator::Equal => "=",
            Operator::EqualEqual => "==",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Minus => "-",
            Operator::Plus => "+",
            Operator::Slash => "/",
            Operator::Star => "*",
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "!" => Ok(Operator::Bang),
            "!=" => Ok(Operator::BangEqual),
            "=" => Ok(Operator::Equal),
            "==" => Ok(Operator::EqualEqual),
            ">" => Ok(Operator::Greater),
            ">=" => Ok(Operator::GreaterEqual),
            "<" => Ok(Operator::Less),
            "<=" => Ok(Operator::LessEqual),
            "-" => Ok(Operator::Minus),
            "+" => Ok(Operator::Plus),
            "/" => Ok(Operator::Slash),
            "*" => Ok(Operator::Star),
            _ => Err(()),
        }
    }
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::And => "and",
            Keyword::Else => "else",
            Keyword::False => "false",
            Keyword::If => "if",
            Keyword::Nil => "nil",
            Keyword::Or => "or",
            Keyword::Print => "print",
            Keyword::True => "true",
            Keyword::Var => "var",
            Keyword::While => "while",
        }
    }
}

impl TryFrom<&str> for Keyword {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Keyword::iter().find(|k| k.as_str() == value).ok_or(())
    }
}

pub mod macros {
    /// Shorthand for building a located token.
    ///
    /// ```ignore
    /// tok! { [loc] -> Keyword::Var }
    /// tok! { [loc] -> Literal::Number = 1.0 }
    /// tok! { [loc] -> Keyword = keyword }
    /// ```
    macro_rules! tok {
        {[$loc:expr] -> $type:ident::$name:ident} => {
            $crate::lex::token::Token::$type($crate::util::TokLoc {
                tok: $crate::lex::token::$type::$name,
                loc: $loc,
            })
        };
        {[$loc:expr] -> $type:ident::$name:ident = $value:expr} => {
            $crate::lex::token::Token::$type($crate::util::TokLoc {
                tok: $crate::lex::token::$type::$name($value),
                loc: $loc,
            })
        };
        {[$loc:expr] -> $type:ident = $value:expr} => {
            $crate::lex::token::Token::$type($crate::util::TokLoc {
                tok: $value,
                loc: $loc,
            })
        };
    }

    pub(crate) use tok;
}
