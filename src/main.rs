use std::{fs, io, process};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use xlang::{
    Gate, InterpretError, get_result_with,
    error::Diagnostics,
    interpreter::{lexer::tokenize, parser::core::build},
};

/// xlang runs programs written in a tiny line-oriented arithmetic language
/// with variables and traced print statements.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells xlang to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Stop after tokenizing and print every token as `row:column kind text`.
    #[arg(short, long)]
    tokens: bool,

    /// Stop after building and print every statement fully parenthesized.
    #[arg(short, long, conflicts_with = "tokens")]
    ast: bool,

    /// Carry on past a phase that reported diagnostics.
    #[arg(short, long)]
    keep_going: bool,

    /// Log more about what each phase does. Repeat for more detail;
    /// `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    contents: String,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "warn",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("xlang={level}")));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr).with_target(true))
                                  .with(filter)
                                  .init();
}

fn report(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        eprintln!("{diagnostic}");
    }
}

/// Prints the tokens, or the statements with `--ast`, instead of running.
///
/// Returns whether every phase that ran was free of diagnostics.
fn dump(script: &str, args: &Args) -> bool {
    let (tokens, lex_diagnostics) = tokenize(script);
    report(&lex_diagnostics);

    if args.tokens {
        for token in &tokens {
            println!("{token}");
        }
        return lex_diagnostics.is_empty();
    }
    if !lex_diagnostics.is_empty() && !args.keep_going {
        return false;
    }

    let (statements, syntax_diagnostics) = build(&tokens);
    report(&syntax_diagnostics);

    for statement in &statements {
        match statement {
            Some(statement) => println!("{statement}"),
            None => println!("<absent>"),
        }
    }

    lex_diagnostics.is_empty() && syntax_diagnostics.is_empty()
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    } else {
        args.contents.clone()
    };

    if args.tokens || args.ast {
        if !dump(&script, &args) {
            process::exit(1);
        }
        return;
    }

    let gate = if args.keep_going { Gate::KeepGoing } else { Gate::Strict };

    match get_result_with(&script, &mut io::stdout().lock(), gate) {
        Ok(outcome) => report(&outcome.diagnostics),
        Err(InterpretError::Lex(diagnostics) | InterpretError::Syntax(diagnostics)) => {
            report(&diagnostics);
            process::exit(1);
        },
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        },
    }
}
