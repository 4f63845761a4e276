use std::{
    fs::read_to_string,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use pylex::{analyze, display_error};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const DEMO_SOURCE: &str = "
def example():
    x = 42
    print(\"Hello, World!\")
";

/// Tokenize a Python-like source file and print the token stream.
#[derive(Parser, Debug)]
#[command(name = "pylex", version)]
struct Args {
    /// Source file to tokenize. Reads stdin when given `-`, and runs a
    /// built-in example when omitted.
    file: Option<PathBuf>,

    /// Check the lexical shape of every emitted token.
    #[arg(long)]
    validate: bool,

    /// Only report errors, do not list tokens.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let (file_name, source) = match read_source(args.file.as_ref()) {
        Ok(loaded) => loaded,
        Err(error) => {
            eprintln!("Failed to read input: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let result = analyze(&source);
    debug!(elapsed = ?start.elapsed(), "tokenized");

    let (tokens, errors) = match result {
        Ok(tokens) => (tokens, vec![]),
        Err(failure) => (failure.partial, failure.errors),
    };

    if !args.quiet {
        for token in tokens.iter() {
            println!("{}", token);
        }
    }

    let mut failed = !errors.is_empty();

    for error in errors.iter() {
        display_error(error, &source, &file_name);
    }

    if args.validate {
        for token in tokens.iter().filter(|token| !token.validate()) {
            warn!(%token, "token failed shape validation");
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn read_source(file: Option<&PathBuf>) -> io::Result<(String, String)> {
    match file {
        None => Ok((String::from("<example>"), String::from(DEMO_SOURCE))),
        Some(path) if path.as_os_str() == "-" => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok((String::from("<stdin>"), source))
        }
        Some(path) => {
            let source = read_to_string(path)?;
            Ok((path.to_string_lossy().into_owned(), source))
        }
    }
}
