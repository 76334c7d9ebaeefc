#![cfg(test)]

use indoc::indoc;
use pretty_assertions::assert_eq;

use super::*;

static HELLO_WORLD: &str = indoc! { r#"
    var hello = "Hello world!";
    print hello;
"# };

#[test]
fn hello_test() {
    let mut interner = Interner::new();
    let result = Lexer::new(HELLO_WORLD, &mut interner).scan();

    assert!(result.errors.is_empty());
    assert_eq!(result.lines, vec![r#"var hello = "Hello world!";"#, "print hello;"]);
    assert_eq!(result.tokens.len(), 9);

    let loc = Location::new;
    let mut intern = |str| interner.get_or_intern(str);

    let tokens = vec![
        tok! { [loc(1,1)]  -> Keyword::Var },
        tok! { [loc(1,5)]  -> Literal::Identifier = intern("hello") },
        tok! { [loc(1,11)] -> Operator::Equal },
        tok! { [loc(1,13)] -> Literal::String = intern("Hello world!") },
        tok! { [loc(1,27)] -> Punctuation::Semicolon },
        tok! { [loc(2,1)]  -> Keyword::Print },
        tok! { [loc(2,7)]  -> Literal::Identifier = intern("hello") },
        tok! { [loc(2,12)] -> Punctuation::Semicolon },
        Token::Eof(loc(3, 1)),
    ];

    assert_eq!(result.tokens, tokens);
}

#[test]
fn numbers_operators_and_comments() {
    let source = indoc! { r#"
        1.5 >= 20 != !x // ignored == "
        a/b
    "# };
    let mut interner = Interner::new();
    let result = Lexer::new(source, &mut interner).scan();

    assert!(result.errors.is_empty());

    let loc = Location::new;
    let x = interner.get("x").unwrap();
    let a = interner.get("a").unwrap();
    let b = interner.get("b").unwrap();

    let tokens = vec![
        tok! { [loc(1,1)]  -> Literal::Number = 1.5 },
        tok! { [loc(1,5)]  -> Operator::GreaterEqual },
        tok! { [loc(1,8)]  -> Literal::Number = 20.0 },
        tok! { [loc(1,11)] -> Operator::BangEqual },
        tok! { [loc(1,14)] -> Operator::Bang },
        tok! { [loc(1,15)] -> Literal::Identifier = x },
        tok! { [loc(2,1)]  -> Literal::Identifier = a },
        tok! { [loc(2,2)]  -> Operator::Slash },
        tok! { [loc(2,3)]  -> Literal::Identifier = b },
        Token::Eof(loc(3, 1)),
    ];

    assert_eq!(result.tokens, tokens);
}

#[test]
fn errors_are_collected() {
    let source = "x = 1.;\ny @ \"open";
    let mut interner = Interner::new();
    let result = Lexer::new(source, &mut interner).scan();

    assert_eq!(
        result.errors,
        vec![
            LexError::UnknownToken(Location::new(1, 6), '.', 0x2e),
            LexError::UnknownToken(Location::new(2, 3), '@', 0x40),
            LexError::UnterminatedString(Location::new(2, 5)),
        ]
    );

    // everything else still lexes
    let kinds = result
        .tokens
        .iter()
        .map(|t| t.static_str())
        .collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec!["<identifier>", "=", "<number>", ";", "<identifier>", "<eof>"]
    );
    assert_eq!(result.lines, vec!["x = 1.;", "y @ \"open"]);
}

#[test]
fn keywords_are_not_identifiers() {
    let mut interner = Interner::new();
    let result = Lexer::new("while whilst and_ or", &mut interner).scan();

    let whilst = interner.get("whilst").unwrap();
    let and_ = interner.get("and_").unwrap();

    assert_eq!(
        result.tokens,
        vec![
            tok! { [Location::new(1,1)]  -> Keyword::While },
            tok! { [Location::new(1,7)]  -> Literal::Identifier = whilst },
            tok! { [Location::new(1,14)] -> Literal::Identifier = and_ },
            tok! { [Location::new(1,19)] -> Keyword::Or },
            Token::Eof(Location::new(1, 21)),
        ]
    );
}

#[cfg(feature = "unicode")]
#[test]
fn unicode_identifier() {
    use crate::util::TokLoc;

    let mut interner = Interner::new();
    let result = Lexer::new("var café = 1;", &mut interner).scan();

    assert!(result.errors.is_empty());
    let cafe = interner.get("café").unwrap();
    assert_eq!(
        result.tokens[1],
        Token::Literal(TokLoc::new(token::Literal::Identifier(cafe), Location::new(1, 5)))
    );
}
