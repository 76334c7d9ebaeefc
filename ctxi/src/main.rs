use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ctxbind::BindingKind;
use ctxi::config::{build_store, Mode, RunConfig, VarArg};
use ctxi::{run_file, run_prompt, CtxError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[clap(
    name = "ctxi",
    about = "Run scripts against a shared variable binding where unknown names read as nil"
)]
struct Args {
    pub source: Option<PathBuf>,

    /// Seed the binding with a variable, may be repeated
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<VarArg>,

    /// Unknown names are errors instead of nil
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    #[arg(long, default_value_t = false, requires = "source", group = "dump")]
    pub dump_lex: bool,

    #[arg(long, default_value_t = false, requires = "source", group = "dump")]
    pub dump_parse: bool,

    /// Print the binding's variables after a successful run
    #[arg(long, default_value_t = false)]
    pub dump_vars: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    if let Err(err) = coredump::register_panic_handler() {
        eprintln!("Unable to register panic handler: {err:?}");
    }
    init_tracing();

    let args = Args::parse();

    let config = RunConfig {
        mode: match (args.dump_lex, args.dump_parse) {
            (true, false) => Mode::DumpLex,
            (false, true) => Mode::DumpParse,
            _ => Mode::Normal,
        },
        binding: match args.strict {
            true => BindingKind::Strict,
            false => BindingKind::Context,
        },
        dump_vars: args.dump_vars,
    };
    let variables = build_store(&args.vars);
    tracing::debug!(?config, vars = variables.len(), "starting");

    match args.source {
        Some(path) => {
            if !path.exists() {
                eprintln!("File not found: {:?}", path);
                return ExitCode::FAILURE;
            } else if !path.is_file() {
                eprintln!("Not a file: {:?}", path);
                return ExitCode::FAILURE;
            }

            match run_file(path, variables, config) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("{err}");
                    match err {
                        CtxError::IoError(_) => ExitCode::FAILURE,
                        CtxError::LexError(_) => ExitCode::from(65),
                        CtxError::ParseError => ExitCode::from(65),
                        CtxError::RuntimeError => ExitCode::from(70),
                        CtxError::EmptyError => ExitCode::SUCCESS,
                    }
                }
            }
        }
        None => match run_prompt(variables, config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        },
    }
}
