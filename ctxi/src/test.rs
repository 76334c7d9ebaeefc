#![cfg(test)]

use ctxbind::{BindingKind, Value, VariableStore};
use indoc::indoc;
use pretty_assertions::assert_eq;

use super::*;

fn session(variables: VariableStore, config: RunConfig) -> Session<Vec<u8>> {
    Session::new(variables, config, Vec::new())
}

fn output(session: Session<Vec<u8>>) -> String {
    String::from_utf8(session.into_output()).unwrap()
}

#[test]
fn permissive_session_writes_back_to_the_host() {
    let vars: VariableStore = [("user", Value::string("ana"))].into_iter().collect();
    let config = RunConfig {
        dump_vars: true,
        ..Default::default()
    };
    let mut session = session(vars.clone(), config);

    session
        .run(indoc! { r#"
            if (discount == nil) discount = 0.1;
            message = "hello " + user;
        "# })
        .unwrap();

    assert!(session.variables().ptr_eq(&vars));
    assert_eq!(vars.get("discount"), Some(Value::number(0.1)));
    assert_eq!(
        output(session),
        indoc! { r#"
            discount = 0.1
            message = "hello ana"
            user = "ana"
        "# }
    );
}

#[test]
fn strict_session_reports_runtime_error() {
    let config = RunConfig {
        binding: BindingKind::Strict,
        dump_vars: true,
        ..Default::default()
    };
    let mut session = session(VariableStore::new(), config);

    let err = session.run("print discount;\n").unwrap_err();
    assert!(matches!(err, CtxError::RuntimeError));
    assert_eq!(output(session), "");
}

#[test]
fn dump_lex() {
    let config = RunConfig {
        mode: Mode::DumpLex,
        ..Default::default()
    };
    let mut session = session(VariableStore::new(), config);
    session.run("x = \"s\";\n").unwrap();

    let expect = indoc! { r#"
        [1:1] Identifier x
        [1:3] Operator =
        [1:5] String "s"
        [1:8] Punctuation ;
        [2:1] Eof
    "# };
    assert_eq!(output(session), expect);
}

#[test]
fn dump_parse_does_not_run() {
    let vars = VariableStore::new();
    let config = RunConfig {
        mode: Mode::DumpParse,
        ..Default::default()
    };
    let mut session = session(vars.clone(), config);
    session.run("x = 1 + 2;\nprint x;\n").unwrap();

    assert_eq!(output(session), "(= x (+ 1 2))\n(print x)\n");
    assert!(vars.is_empty());
}

#[test]
fn error_kinds() {
    let mut session = session(VariableStore::new(), RunConfig::default());

    assert!(matches!(session.run("// only a comment\n"), Err(CtxError::EmptyError)));
    assert!(matches!(session.run("@ # ;"), Err(CtxError::LexError(2))));
    assert!(matches!(session.run("print ;"), Err(CtxError::ParseError)));
    assert!(matches!(session.run("print -\"a\";"), Err(CtxError::RuntimeError)));

    // a failed run leaves the session usable
    session.run("print 1;").unwrap();
    assert_eq!(output(session), "1\n");
}

#[test]
fn missing_file() {
    let err = run_file(
        "/definitely/not/a/real/path.ctx",
        VariableStore::new(),
        RunConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, CtxError::IoError(_)));
}
