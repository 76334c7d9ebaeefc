use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

use self::token::{macros::tok, Keyword, Operator, Punctuation, Token};
use crate::interp::interner::Interner;
use crate::util::Location;

mod test;
pub mod token;

#[derive(Debug, Error, PartialEq)]
pub enum LexError {
    #[error("{0} Unknown token ({1}) [{2:#x}]")]
    UnknownToken(Location, char, u32),

    #[error("{0} Unterminated string")]
    UnterminatedString(Location),

    #[error("{0} Unable to parse Number {1}")]
    UnableToParseNumber(Location, String),
}

impl LexError {
    pub fn loc(&self) -> Location {
        match self {
            LexError::UnknownToken(loc, _, _) => *loc,
            LexError::UnterminatedString(loc) => *loc,
            LexError::UnableToParseNumber(loc, _) => *loc,
        }
    }
}

pub struct Lexer<'a, 'b> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    interner: &'b mut Interner,
    lines: Vec<&'a str>,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
    line: LineLocation,
}

#[derive(Debug)]
pub struct ScanResult<'a> {
    pub lines: Vec<&'a str>,
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl<'a, 'b> Lexer<'a, 'b> {
    pub fn new(program: &'a str, interner: &'b mut Interner) -> Self {
        Lexer {
            source: program,
            chars: program.char_indices().peekable(),
            interner,
            lines: Vec::new(),
            tokens: Vec::new(),
            errors: Vec::new(),
            line: LineLocation { index: 1, start: 0 },
        }
    }

    pub fn scan(mut self) -> ScanResult<'a> {
        while let Some((i, ch)) = self.advance() {
            self.scan_token(i, ch);
        }

        // a last line without trailing newline still counts
        if self.line.start < self.source.len() {
            self.lines.push(&self.source[self.line.start..]);
        }
        let eof = self.loc_rel(self.source.len());
        self.tokens.push(Token::Eof(eof));

        ScanResult {
            lines: self.lines,
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    #[rustfmt::skip]
    #[cfg(feature = "unicode")]
    fn scan_token(&mut self, current: usize, single: char) {
        match single.is_ascii() {
            true => match single {
                '\n'                        => self.newline_handler(current),
                '/'                         => self.slash_handler(current),
                '"'                         => self.string_handler(current),
                c if c.is_ascii_digit()     => self.number_handler(current),
                c if c.is_whitespace()      => self.whitespace_handler(),
                c if is_ascii_identifier(c) => self.identifier_handler(current, single),
                _                           => self.other_handler(current, single),
            },
            false => match single {
                c if c.is_whitespace()      => self.whitespace_handler(),
                _                           => self.identifier_handler(current, single),
            },
        }
    }

    #[rustfmt::skip]
    #[cfg(not(feature = "unicode"))]
    fn scan_token(&mut self, current: usize, single: char) {
        match single {
            '\n'                        => self.newline_handler(current),
            '/'                         => self.slash_handler(current),
            '"'                         => self.string_handler(current),
            c if c.is_ascii_digit()     => self.number_handler(current),
            c if c.is_whitespace()      => self.whitespace_handler(),
            c if is_ascii_identifier(c) => self.identifier_handler(current, single),
            _                           => self.other_handler(current, single),
        }
    }

    fn newline_handler(&mut self, current: usize) {
        self.lines.push(&self.source[self.line.start..current]);

        self.line.index += 1;
        self.line.start = current + 1;
    }

    fn slash_handler(&mut self, current: usize) {
        // might be comment
        if self.if_next_is('/') {
            while let Some((i, ch)) = self.advance() {
                if ch == '\n' {
                    self.newline_handler(i);
                    break;
                }
            }
            return;
        }

        self.add_token(tok! { [self.loc_rel(current)] -> Operator::Slash });
    }

    fn string_handler(&mut self, current: usize) {
        let start = self.loc_rel(current);

        let mut index = None;
        while let Some((i, ch)) = self.advance() {
            if ch == '"' {
                index = Some(i);
                break;
            } else if ch == '\n' {
                self.newline_handler(i);
            }
        }

        match index {
            Some(idx) => {
                let key = self.interner.get_or_intern(&self.source[current + 1..idx]);
                self.add_token(tok! { [start] -> Literal::String = key });
            }
            None => self.add_error(LexError::UnterminatedString(start)),
        }
    }

    fn number_handler(&mut self, current: usize) {
        let mut end = current + 1 + self.advance_while(|ch| ch.is_ascii_digit());

        // only take the dot when a digit follows it
        if self.if_next_is('.') {
            let mut ahead = self.chars.clone();
            ahead.next();
            if matches!(ahead.peek(), Some((_, ch)) if ch.is_ascii_digit()) {
                self.advance();
                end += 1 + self.advance_while(|ch| ch.is_ascii_digit());
            }
        }

        let slice = &self.source[current..end];
        match slice.parse::<f64>() {
            Ok(value) => {
                self.add_token(tok! { [self.loc_rel(current)] -> Literal::Number = value });
            }
            Err(_) => self.add_error(LexError::UnableToParseNumber(
                self.loc_rel(current),
                slice.to_string(),
            )),
        }
    }

    fn whitespace_handler(&mut self) {
        self.advance_while(|ch| ch.is_whitespace() && ch != '\n');
    }

    // NOTE: with the unicode feature any non-whitespace non-ascii char is part of an identifier
    fn identifier_handler(&mut self, current: usize, single: char) {
        let count = self.advance_while(|ch| match ch.is_ascii() {
            true => is_ascii_identifier(ch),
            false => cfg!(feature = "unicode") && !ch.is_whitespace(),
        });
        let end = current + single.len_utf8() + count;
        let value = &self.source[current..end];
        let loc = self.loc_rel(current);

        let token = match Keyword::try_from(value) {
            Ok(keyword) => tok! { [loc] -> Keyword = keyword },
            Err(_) => {
                let key = self.interner.get_or_intern(value);
                tok! { [loc] -> Literal::Identifier = key }
            }
        };

        self.add_token(token);
    }

    fn other_handler(&mut self, current: usize, single: char) {
        let loc = self.loc_rel(current);

        if let Ok(punct) = Punctuation::try_from(single) {
            self.add_token(tok! { [loc] -> Punctuation = punct });
            return;
        }

        let mut buf = [0u8; 8];

        // for double chars operators
        if let Some(&(_, next)) = self.peek() {
            let len = single.encode_utf8(&mut buf).len();
            let len = len + next.encode_utf8(&mut buf[len..]).len();
            let double = std::str::from_utf8(&buf[..len]).unwrap_or_default();
            if let Ok(op) = Operator::try_from(double) {
                self.add_token(tok! { [loc] -> Operator = op });
                self.advance();
                return;
            }
        }

        // for single chars operators
        if let Ok(op) = Operator::try_from(&*single.encode_utf8(&mut buf)) {
            self.add_token(tok! { [loc] -> Operator = op });
            return;
        }

        self.add_error(LexError::UnknownToken(loc, single, single as u32));
    }

    fn add_token(&mut self, token: Token) {
        self.tokens.push(token)
    }

    fn add_error(&mut self, err: LexError) {
        self.errors.push(err)
    }

    fn peek(&mut self) -> Option<&(usize, char)> {
        self.chars.peek()
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    /// returns the number of bytes consumed
    fn advance_while<F>(&mut self, pred: F) -> usize
    where
        F: Fn(char) -> bool,
    {
        let mut count = 0;
        while let Some(ch) = self.chars.next_if(|(_, ch)| pred(*ch)).map(|(_, ch)| ch) {
            count += ch.len_utf8();
        }
        count
    }

    fn if_next_is(&mut self, ch: char) -> bool {
        matches!(self.peek(), Some((_, c)) if *c == ch)
    }

    fn loc_rel(&self, index: usize) -> Location {
        self.line.loc_rel(index)
    }
}

#[derive(Debug, Clone)]
struct LineLocation {
    pub index: usize,
    pub start: usize,
}

impl LineLocation {
    fn loc_rel(&self, index: usize) -> Location {
        // 1-indexed, saturating keeps a bogus index from underflowing
        Location {
            line: self.index,
            column: index.saturating_sub(self.start) + 1,
        }
    }
}

fn is_ascii_identifier(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
