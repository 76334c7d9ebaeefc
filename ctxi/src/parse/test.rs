#![cfg(test)]

use indoc::indoc;
use pretty_assertions::assert_eq;

use crate::interp::interner::Interner;
use crate::lex::Lexer;
use crate::util::{Location, TokLoc};

use super::{expr::*, stmt::*, token, ParseError, Parser, Program};

static EXPRESSION: &str = indoc! { r#"
    1 * (2 - 3) < 4 == false;
"# };

fn parse(source: &str, interner: &mut Interner) -> Result<Program, Vec<ParseError>> {
    let result = Lexer::new(source, interner).scan();
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    Parser::new(&result.tokens).parse()
}

fn get_reference_ast() -> Expr {
    // given an expression below
    //      1 * (2 - 3) < 4 == false
    //      1 3 56  8 0  3 5 7  0
    // it should produce
    //      (== (< (* 1 (group (- 2 3))) 4) false)

    let loc = Location::new;

    let lit1 = Expr::literal(TokLoc::new(token::Literal::Number(1.0), loc(1, 1)));
    let lit2 = Expr::literal(TokLoc::new(token::Literal::Number(2.0), loc(1, 6)));
    let lit3 = Expr::literal(TokLoc::new(token::Literal::Number(3.0), loc(1, 10)));
    let lit4 = Expr::literal(TokLoc::new(token::Literal::Number(4.0), loc(1, 15)));
    let litf = Expr::literal(TokLoc::new(token::Literal::False, loc(1, 20)));

    let star = TokLoc::new(token::BinaryOp::Mul, loc(1, 3));
    let min = TokLoc::new(token::BinaryOp::Sub, loc(1, 8));
    let lt = TokLoc::new(token::BinaryOp::Less, loc(1, 13));
    let eqeq = TokLoc::new(token::BinaryOp::Equal, loc(1, 17));

    let bin_min = Expr::binary(lit2.boxed(), min, lit3.boxed());
    let grp1 = Expr::group(bin_min.boxed(), loc(1, 5));
    let bin_1_grp1 = Expr::binary(lit1.boxed(), star, grp1.boxed());
    let bin_lt = Expr::binary(bin_1_grp1.boxed(), lt, lit4.boxed());

    Expr::binary(bin_lt.boxed(), eqeq, litf.boxed())
}

#[test]
fn print_expr_tree() {
    let expr = get_reference_ast();

    // the tokens inside the AST should not need interner here, so an empty one suffice
    let interner = Interner::new();

    let result = "(== (< (* 1 (group (- 2 3))) 4) false)";
    assert_eq!(result, format!("{}", expr.display(&interner)))
}

#[test]
fn parse_to_a_correct_ast() {
    let mut interner = Interner::new();
    let program = parse(EXPRESSION, &mut interner).unwrap_or_else(|e| panic!("{e:?}"));

    assert_eq!(
        program.statements,
        vec![Stmt::Expr {
            expr: get_reference_ast()
        }]
    );
}

#[test]
fn parse_statements() {
    let source = indoc! { r#"
        var a = 1;
        var b;
        { a = b = 2; }
        if (a) print a; else print "no";
        while (a < 3 and !done or nil) a = a + -1;
    "# };

    let mut interner = Interner::new();
    let program = parse(source, &mut interner).unwrap_or_else(|e| panic!("{e:?}"));

    let expect = indoc! { r#"
        (var a 1)
        (var b nil)
        (block (= a (= b 2)))
        (if-else a (print a) (print "no"))
        (while (or (and (< a 3) (! done)) nil) (= a (+ a (- 1))))
    "# };
    assert_eq!(expect, program.display(&interner).to_string());
}

#[test]
fn errors_are_collected_and_parsing_recovers() {
    let source = indoc! { r#"
        print ;
        var = 1;
        1 = 2;
        print 3;
    "# };

    let mut interner = Interner::new();
    let Err(errors) = parse(source, &mut interner) else {
        panic!("parsing should fail");
    };

    assert_eq!(
        errors,
        vec![
            ParseError::SyntaxError {
                expect: "<expression>",
                real: ";",
                loc: Location::new(1, 7),
            },
            ParseError::SyntaxError {
                expect: "<identifier>",
                real: "=",
                loc: Location::new(2, 5),
            },
            ParseError::InvalidAssignmentTarget(Location::new(3, 3)),
        ]
    );
}

#[test]
fn unclosed_block_reports_eof() {
    let mut interner = Interner::new();
    let Err(errors) = parse("{ print 1;", &mut interner) else {
        panic!("parsing should fail");
    };

    assert_eq!(
        errors,
        vec![ParseError::SyntaxError {
            expect: "}",
            real: "<eof>",
            loc: Location::new(1, 11),
        }]
    );
}

#[test]
fn empty_program() {
    let mut interner = Interner::new();
    let program = parse("// nothing here\n", &mut interner).unwrap_or_else(|e| panic!("{e:?}"));
    assert!(program.statements.is_empty());
}
