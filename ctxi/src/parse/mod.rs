use std::iter::Peekable;
use std::slice::Iter;

use thiserror::Error;

use crate::interp::interner::Interner;
use crate::lex::token::{self as ltok, Token};
use crate::util::{Location, TokLoc};

use expr::Expr;
use stmt::Stmt;

use macros::{consume, syntax_error};

pub mod expr;
pub mod stmt;
mod test;
pub mod token;

// Grammar
// -------
// program     -> declaration* EOF ;
// declaration -> var_decl | statement ;
// var_decl    -> "var" IDENTIFIER ( "=" expression )? ";" ;
// statement   -> expr_stmt | print_stmt | if_stmt | while_stmt | block ;
// if_stmt     -> "if" "(" expression ")" statement ( "else" statement )? ;
// while_stmt  -> "while" "(" expression ")" statement ;
// block       -> "{" declaration* "}" ;
// expr_stmt   -> expression ";" ;
// print_stmt  -> "print" expression ";" ;
// expression  -> assignment ;
// assignment  -> IDENTIFIER "=" assignment | logic_or ;
// logic_or    -> logic_and ( "or" logic_and )* ;
// logic_and   -> equality ( "and" equality )* ;
// equality    -> comparison ( ( "!=" | "==" ) comparison )* ;
// comparison  -> term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
// term        -> factor ( ( "-" | "+" ) factor )* ;
// factor      -> unary ( ( "/" | "*" ) unary )* ;
// unary       -> ( "!" | "-" ) unary | primary ;
// primary     -> NUMBER | STRING | "true" | "false" | "nil" | grouping | IDENTIFIER ;
// grouping    -> "(" expression ")" ;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("{loc} SyntaxError: Expect '{expect}', got '{real}'")]
    SyntaxError {
        expect: &'static str,
        real: &'static str,
        loc: Location,
    },

    #[error("{0} SyntaxError: Invalid assignment target")]
    InvalidAssignmentTarget(Location),
}

impl ParseError {
    pub fn loc(&self) -> Location {
        match self {
            ParseError::SyntaxError { loc, .. } => *loc,
            ParseError::InvalidAssignmentTarget(loc) => *loc,
        }
    }
}

pub struct Program {
    pub statements: Vec<Stmt>,
}

pub struct DisplayedProgram<'a, 'b> {
    program: &'a Program,
    interner: &'b Interner,
}

impl Program {
    pub fn display<'a, 'b>(&'a self, interner: &'b Interner) -> DisplayedProgram<'a, 'b> {
        DisplayedProgram {
            program: self,
            interner,
        }
    }
}

impl std::fmt::Display for DisplayedProgram<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.program.statements {
            writeln!(f, "{}", stmt.display(self.interner))?;
        }
        Ok(())
    }
}

pub type ExprResult = Result<Box<Expr>, ParseError>;
pub type StmtResult = Result<Stmt, ParseError>;

static EOF: Token = Token::Eof(Location::new(1, 1));

pub struct Parser<'a> {
    tokens: Peekable<Iter<'a, Token>>,
    eof: &'a Token,
    consumed: usize,
}

impl<'a> Parser<'a> {
    /// `tokens` is expected to end with `Token::Eof` as produced by the lexer.
    pub fn new(tokens: &'a [Token]) -> Self {
        let eof = match tokens.last() {
            Some(tok @ Token::Eof(_)) => tok,
            _ => &EOF,
        };
        Self {
            tokens: tokens.iter().peekable(),
            eof,
            consumed: 0,
        }
    }

    pub fn parse(mut self) -> Result<Program, Vec<ParseError>> {
        let mut statements = Vec::new();
        let mut errors = Vec::new();

        while !self.is_at_end() {
            let before = self.consumed;
            match self.declaration() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => {
                    errors.push(err);
                    // always make progress, even when the error was the very first token
                    if self.consumed == before {
                        self.advance();
                    }
                    self.synchronize();
                }
            }
        }

        match errors.is_empty() {
            true => Ok(Program { statements }),
            false => Err(errors),
        }
    }

    fn synchronize(&mut self) {
        loop {
            match self.peek() {
                Token::Eof(_) => return,
                Token::Punctuation(TokLoc {
                    tok: ltok::Punctuation::Semicolon,
                    ..
                }) => {
                    self.advance();
                    return;
                }
                Token::Keyword(TokLoc { tok, .. }) => match tok {
                    ltok::Keyword::If => return,
                    ltok::Keyword::While => return,
                    ltok::Keyword::Print => return,
                    ltok::Keyword::Var => return,
                    _ => (),
                },
                _ => (),
            }
            self.advance();
        }
    }

    fn declaration(&mut self) -> StmtResult {
        match self.peek() {
            Token::Keyword(TokLoc {
                tok: ltok::Keyword::Var,
                loc,
            }) => {
                let loc = *loc;
                self.advance();
                self.var_declaration(loc)
            }
            _ => self.statement(),
        }
    }

    fn var_declaration(&mut self, loc: Location) -> StmtResult {
        let name = consume! {
            self as ["<identifier>"]
            if   Token::Literal(TokLoc { tok: ltok::Literal::Identifier(name), .. }),
            then *name,
        }?;

        let init = match self.peek() {
            Token::Operator(TokLoc {
                tok: ltok::Operator::Equal,
                ..
            }) => {
                self.advance();
                Some(*self.expression()?)
            }
            _ => None,
        };

        self.semicolon()?;
        Ok(Stmt::Var { loc, name, init })
    }

    fn statement(&mut self) -> StmtResult {
        let (keyword, loc) = match self.peek() {
            Token::Keyword(TokLoc { tok, loc }) => (Some(*tok), *loc),
            Token::Punctuation(TokLoc {
                tok: ltok::Punctuation::BraceLeft,
                ..
            }) => {
                self.advance();
                return Ok(Stmt::Block {
                    statements: self.block()?,
                });
            }
            tok => (None, tok.loc()),
        };

        match keyword {
            Some(ltok::Keyword::Print) => {
                self.advance();
                let expr = *self.expression()?;
                self.semicolon()?;
                Ok(Stmt::Print { loc, expr })
            }
            Some(ltok::Keyword::If) => {
                self.advance();
                self.if_statement(loc)
            }
            Some(ltok::Keyword::While) => {
                self.advance();
                self.while_statement(loc)
            }
            _ => self.expression_statement(),
        }
    }

    fn block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        loop {
            match self.peek() {
                Token::Punctuation(TokLoc {
                    tok: ltok::Punctuation::BraceRight,
                    ..
                }) => {
                    self.advance();
                    return Ok(statements);
                }
                Token::Eof(loc) => return Err(syntax_error!("}", "<eof>", *loc)),
                _ => statements.push(self.declaration()?),
            }
        }
    }

    fn if_statement(&mut self, loc: Location) -> StmtResult {
        let condition = self.condition()?;
        let then = Box::new(self.statement()?);

        let otherwise = match self.peek() {
            Token::Keyword(TokLoc {
                tok: ltok::Keyword::Else,
                ..
            }) => {
                self.advance();
                Some(Box::new(self.statement()?))
            }
            _ => None,
        };

        Ok(Stmt::If {
            loc,
            condition,
            then,
            otherwise,
        })
    }

    fn while_statement(&mut self, loc: Location) -> StmtResult {
        let condition = self.condition()?;
        let body = Box::new(self.statement()?);
        Ok(Stmt::While {
            loc,
            condition,
            body,
        })
    }

    /// `"(" expression ")"` after `if` and `while`
    fn condition(&mut self) -> Result<Expr, ParseError> {
        consume! {
            self as ["("]
            if   Token::Punctuation(TokLoc { tok: ltok::Punctuation::ParenLeft, .. }),
            then (),
        }?;
        let condition = *self.expression()?;
        consume! {
            self as [")"]
            if   Token::Punctuation(TokLoc { tok: ltok::Punctuation::ParenRight, .. }),
            then (),
        }?;
        Ok(condition)
    }

    fn expression_statement(&mut self) -> StmtResult {
        let expr = *self.expression()?;
        self.semicolon()?;
        Ok(Stmt::Expr { expr })
    }

    fn semicolon(&mut self) -> Result<(), ParseError> {
        consume! {
            self as [";"]
            if   Token::Punctuation(TokLoc { tok: ltok::Punctuation::Semicolon, .. }),
            then (),
        }
    }

    fn expression(&mut self) -> ExprResult {
        self.assignment()
    }

    fn assignment(&mut self) -> ExprResult {
        let expr = self.logic_or()?;

        if let Token::Operator(TokLoc {
            tok: ltok::Operator::Equal,
            loc,
        }) = self.peek()
        {
            let loc = *loc;
            self.advance();
            let value = self.assignment()?;

            return match *expr {
                Expr::Variable { var } => Ok(Expr::assignment(var, value).boxed()),
                _ => Err(ParseError::InvalidAssignmentTarget(loc)),
            };
        }

        Ok(expr)
    }

    fn logic_or(&mut self) -> ExprResult {
        self.logical(ltok::Keyword::Or, token::LogicalOp::Or, Self::logic_and)
    }

    fn logic_and(&mut self) -> ExprResult {
        self.logical(ltok::Keyword::And, token::LogicalOp::And, Self::equality)
    }

    fn logical<F>(&mut self, keyword: ltok::Keyword, op: token::LogicalOp, inner: F) -> ExprResult
    where
        F: Fn(&mut Self) -> ExprResult,
    {
        let mut expr = inner(self)?;

        while let Token::Keyword(TokLoc { tok, loc }) = self.peek() {
            if *tok != keyword {
                break;
            }
            let operator = TokLoc::new(op, *loc);
            self.advance();
            expr = Expr::logical(expr, operator, inner(self)?).boxed();
        }

        Ok(expr)
    }

    fn binary<F1, F2>(&mut self, curr: F1, inner: F2) -> ExprResult
    where
        F1: Fn(&Token) -> Option<TokLoc<token::BinaryOp>>,
        F2: Fn(&mut Self) -> ExprResult,
    {
        let mut expr = inner(self)?;

        while let Some(op) = curr(self.peek()) {
            self.advance();
            expr = Expr::binary(expr, op, inner(self)?).boxed();
        }

        Ok(expr)
    }

    fn equality(&mut self) -> ExprResult {
        self.binary(conv::to_equality, Self::comparison)
    }

    fn comparison(&mut self) -> ExprResult {
        self.binary(conv::to_comparison, Self::term)
    }

    fn term(&mut self) -> ExprResult {
        self.binary(conv::to_term, Self::factor)
    }

    fn factor(&mut self) -> ExprResult {
        self.binary(conv::to_factor, Self::unary)
    }

    fn unary(&mut self) -> ExprResult {
        if let Some(op) = conv::to_unary(self.peek()) {
            self.advance();
            Ok(Expr::unary(op, self.unary()?).boxed())
        } else {
            self.primary()
        }
    }

    fn primary(&mut self) -> ExprResult {
        let curr = self.advance();
        let loc = curr.loc();

        let lit = match curr {
            Token::Keyword(TokLoc { tok, .. }) => match tok {
                ltok::Keyword::True => token::Literal::True,
                ltok::Keyword::False => token::Literal::False,
                ltok::Keyword::Nil => token::Literal::Nil,
                _ => return Err(syntax_error!("<expression>", curr.static_str(), loc)),
            },
            Token::Literal(TokLoc { tok, .. }) => match tok {
                ltok::Literal::Number(num) => token::Literal::Number(*num),
                ltok::Literal::String(key) => token::Literal::String(*key),
                ltok::Literal::Identifier(name) => {
                    return Ok(Expr::variable(TokLoc::new(*name, loc)).boxed())
                }
            },
            Token::Punctuation(TokLoc {
                tok: ltok::Punctuation::ParenLeft,
                ..
            }) => {
                let expr = self.expression()?;
                consume! {
                    self as [")"]
                    if   Token::Punctuation(TokLoc { tok: ltok::Punctuation::ParenRight, .. }),
                    then (),
                }?;
                return Ok(Expr::group(expr, loc).boxed());
            }
            _ => return Err(syntax_error!("<expression>", curr.static_str(), loc)),
        };

        Ok(Expr::literal(TokLoc::new(lit, loc)).boxed())
    }

    fn is_at_end(&mut self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    fn peek(&mut self) -> &'a Token {
        self.tokens.peek().copied().unwrap_or(self.eof)
    }

    /// never moves past `Eof`
    fn advance(&mut self) -> &'a Token {
        match self.peek() {
            tok @ Token::Eof(_) => tok,
            _ => {
                self.consumed += 1;
                self.tokens.next().unwrap_or(self.eof)
            }
        }
    }
}

mod conv {
    use super::*;

    fn op<T>(tok: &Token, conv: impl Fn(ltok::Operator) -> Option<T>) -> Option<TokLoc<T>> {
        match tok {
            Token::Operator(TokLoc { tok, loc }) => conv(*tok).map(|t| TokLoc::new(t, *loc)),
            _ => None,
        }
    }

    pub fn to_equality(tok: &Token) -> Option<TokLoc<token::BinaryOp>> {
        op(tok, |o| match o {
            ltok::Operator::BangEqual => Some(token::BinaryOp::NotEqual),
            ltok::Operator::EqualEqual => Some(token::BinaryOp::Equal),
            _ => None,
        })
    }

    pub fn to_comparison(tok: &Token) -> Option<TokLoc<token::BinaryOp>> {
        op(tok, |o| match o {
            ltok::Operator::Greater => Some(token::BinaryOp::Greater),
            ltok::Operator::GreaterEqual => Some(token::BinaryOp::GreaterEq),
            ltok::Operator::Less => Some(token::BinaryOp::Less),
            ltok::Operator::LessEqual => Some(token::BinaryOp::LessEq),
            _ => None,
        })
    }

    pub fn to_term(tok: &Token) -> Option<TokLoc<token::BinaryOp>> {
        op(tok, |o| match o {
            ltok::Operator::Plus => Some(token::BinaryOp::Add),
            ltok::Operator::Minus => Some(token::BinaryOp::Sub),
            _ => None,
        })
    }

    pub fn to_factor(tok: &Token) -> Option<TokLoc<token::BinaryOp>> {
        op(tok, |o| match o {
            ltok::Operator::Star => Some(token::BinaryOp::Mul),
            ltok::Operator::Slash => Some(token::BinaryOp::Div),
            _ => None,
        })
    }

    pub fn to_unary(tok: &Token) -> Option<TokLoc<token::UnaryOp>> {
        op(tok, |o| match o {
            ltok::Operator::Bang => Some(token::UnaryOp::Not),
            ltok::Operator::Minus => Some(token::UnaryOp::Minus),
            _ => None,
        })
    }
}

mod macros {
    macro_rules! syntax_error {
        ($expect:expr, $real:expr, $loc:expr) => {
            ParseError::SyntaxError {
                expect: $expect,
                real: $real,
                loc: $loc,
            }
        };
    }

    /// Consume the next token if it matches `$tok`, yielding `$xpr`; otherwise a syntax error
    /// naming `$name` as the expected token. The token is not consumed on mismatch.
    macro_rules! consume {
        ($self:ident as [$name:expr] if $tok:pat, then $xpr:expr,) => {
            match $self.peek() {
                $tok => {
                    let value = $xpr;
                    $self.advance();
                    Ok(value)
                }
                tok => Err(syntax_error!($name, tok.static_str(), tok.loc())),
            }
        };
    }

    pub(crate) use consume;
    pub(crate) use syntax_error;
}
