use std::fs::File;
use std::io::{self, stdin, stdout, BufRead, Read, Write};
use std::path::Path;

use ctxbind::VariableStore;
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

use self::config::{Mode, RunConfig};
use self::interp::interner::Interner;
use self::interp::Interpreter;
use self::lex::Lexer;
use self::parse::Parser;
use self::util::Location;

pub mod config;
pub mod interp;
pub mod lex;
pub mod parse;
pub mod util;

mod test;

#[derive(Debug, Error)]
pub enum CtxError {
    #[error("Could not read: {0}")]
    IoError(#[from] io::Error),

    #[error("Lexing error: {0} error(s)")]
    LexError(usize),

    #[error("Parsing error")]
    ParseError,

    #[error("Runtime error")]
    RuntimeError,

    #[error("Empty")]
    EmptyError,
}

#[macro_export]
macro_rules! eprintln_red {
    ($($arg:tt)*) => {
        eprintln!("\x1b[1;31m{}\x1b[00m", format_args!($($arg)*))
    };
}

/// Print the offending line with a caret under the column, to stderr.
pub fn eprint_context(lines: &[&str], loc: Location) {
    let Some(line) = loc.line.checked_sub(1).and_then(|i| lines.get(i)) else {
        return;
    };

    let prefix = line
        .char_indices()
        .take_while(|(i, _)| *i < loc.column.saturating_sub(1))
        .map(|(_, ch)| ch)
        .collect::<String>();

    let number = format!("{} | ", loc.line);
    eprintln!("{number}{line}");
    eprintln!("{}^", " ".repeat(number.len() + prefix.width()));
}

/// One script-execution context: a binding over a store, plus the interpreter state that
/// survives between sources (local declarations and interned names).
pub struct Session<W: Write> {
    interner: Interner,
    interp: Interpreter<W>,
    config: RunConfig,
}

impl<W: Write> Session<W> {
    pub fn new(variables: VariableStore, config: RunConfig, out: W) -> Self {
        let binding = config.binding.bind(variables);
        Self {
            interner: Interner::new(),
            interp: Interpreter::new(binding, out),
            config,
        }
    }

    pub fn variables(&self) -> &VariableStore {
        self.interp.binding().variables()
    }

    pub fn into_output(self) -> W {
        self.interp.into_output()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(mode = ?self.config.mode))]
    pub fn run(&mut self, program: &str) -> Result<(), CtxError> {
        // lexing
        let lex::ScanResult {
            lines,
            tokens,
            errors,
        } = Lexer::new(program, &mut self.interner).scan();

        if !errors.is_empty() {
            errors.iter().for_each(|err| {
                eprint_context(&lines, err.loc());
                eprintln_red!("{}", err);
            });
            return Err(CtxError::LexError(errors.len()));
        }

        if self.config.mode == Mode::DumpLex {
            let mut out = self.interp.output();
            for tok in tokens.iter() {
                writeln!(out, "{}", tok.display(&self.interner))?;
            }
            return Ok(());
        }

        // only <eof> exist
        if tokens.len() == 1 {
            return Err(CtxError::EmptyError);
        }

        // parsing
        let program = Parser::new(&tokens).parse().map_err(|errors| {
            errors.iter().for_each(|e| {
                eprint_context(&lines, e.loc());
                eprintln_red!("{}", e);
            });
            CtxError::ParseError
        })?;

        if self.config.mode == Mode::DumpParse {
            write!(self.interp.output(), "{}", program.display(&self.interner))?;
            return Ok(());
        }

        // interpret
        self.interp
            .interpret(&program, &self.interner)
            .map_err(|err| {
                if let Some(loc) = err.loc() {
                    eprint_context(&lines, loc);
                }
                eprintln_red!("{}", err);
                CtxError::RuntimeError
            })?;

        if self.config.dump_vars {
            self.dump_vars()?;
        }
        Ok(())
    }

    fn dump_vars(&self) -> io::Result<()> {
        let mut out = self.interp.output();
        for (name, value) in self.variables().snapshot() {
            match value {
                ctxbind::Value::String(str) => writeln!(out, "{name} = \"{str}\"")?,
                value => writeln!(out, "{name} = {value}")?,
            }
        }
        Ok(())
    }
}

pub fn run_file<P: AsRef<Path>>(
    path: P,
    variables: VariableStore,
    config: RunConfig,
) -> Result<(), CtxError> {
    let contents = {
        let mut string = String::new();
        let mut file = File::open(path)?;
        file.read_to_string(&mut string)?;

        if string.is_empty() {
            return Err(CtxError::EmptyError);
        }

        // make sure the content of the file ends with newline
        if !string.ends_with('\n') {
            string.push('\n');
        }
        string
    };

    let mut session = Session::new(variables, config, stdout().lock());
    session.run(&contents)
}

pub fn run_prompt(variables: VariableStore, config: RunConfig) -> Result<(), CtxError> {
    println!("ctxi: scripts over a shared variable binding ({:?})", config.binding);

    let mut session = Session::new(variables, config, stdout());
    let mut input = stdin().lock();
    let mut line = String::new();
    loop {
        print!(">>> ");
        stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break; // EOF reached
        }

        // errors were already reported, the session stays usable
        match session.run(&line) {
            Ok(()) | Err(CtxError::EmptyError) => (),
            Err(err) => tracing::debug!(%err, "line failed"),
        }
    }

    println!("\nExiting ctxi...");
    Ok(())
}
