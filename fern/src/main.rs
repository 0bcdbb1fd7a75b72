mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::{print_checked, print_checking, print_error, print_running};
use fern_core::{
    environment::prelude::{Environment, Object},
    eval::Evaluator,
    pipeline
};

#[derive(Parser)]
#[command(name = "fern", version, about = "Interpreter for the Fern scripting language")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Runs a source file and prints its final value
    Run {
        /// Path of source file
        path: PathBuf,
    },
    /// Starts the interactive interpreter (default)
    Repl,
    /// Runs Read Lex Print Loop
    Lex,
    /// Runs Read Parse Print Loop
    Parse,
    /// Performs lexical and syntactical analysis without running
    Check {
        /// Path of source file
        path: PathBuf,
        /// Print ast instead of parsed source code
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
}

fn main() {
    init_tracing();

    let code = match Args::parse().command.unwrap_or(Command::Repl) {
        Command::Run { path } => run(path),
        Command::Repl => exit_code(repl::start()),
        Command::Lex => exit_code(rlpl::start()),
        Command::Parse => exit_code(rppl::start()),
        Command::Check { path, print_ast } => check(path, print_ast),
    };

    std::process::exit(code);
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn run(path: PathBuf) -> i32 {
    print_running(&path.display().to_string());

    let env = Environment::new();
    let evaluator = Evaluator::console();

    match pipeline::run_file(path, &env, &evaluator) {
        Ok(result @ Object::Error(_)) => {
            println!("{result}");
            1
        },
        Ok(result) => {
            if !result.is_null() {
                println!("{result}");
            }
            0
        },
        Err(err) => {
            print_error(&err);
            1
        }
    }
}

fn check(path: PathBuf, print_ast: bool) -> i32 {
    print_checking(&path.display().to_string());
    let start = std::time::Instant::now();

    let checked = pipeline::read_source(&path)
        .and_then(|src| pipeline::check(path, src));

    match checked {
        Ok(program) => {
            if print_ast {
                println!("{program:#?}");
            } else {
                println!("{program}");
            }

            print_checked(start.elapsed());
            0
        },
        Err(err) => {
            print_error(&err);
            1
        }
    }
}

fn exit_code(result: std::io::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!(%err, "interactive loop failed");
            eprintln!("error: {err}");
            1
        }
    }
}
