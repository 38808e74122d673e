use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use lish::{repl, session::Session};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// lish is a small shell where every line is an S-expression: calls resolve
/// to functions when one is bound and run programs otherwise.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells lish to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode automatically prints the value of the script.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Working directory to start in.
    #[arg(short = 'C', long)]
    cwd: Option<PathBuf>,

    /// Log evaluation details to stderr (overridden by `RUST_LOG`).
    #[arg(short, long)]
    verbose: bool,

    /// The script to run. Starts the REPL when omitted.
    contents: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "lish=debug" } else { "lish=warn" };
    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr))
                                  .with(EnvFilter::try_from_default_env()
                                            .unwrap_or_else(|_| EnvFilter::new(default_level)))
                                  .init();

    let cwd = match args.cwd.map_or_else(std::env::current_dir, Ok) {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("Failed to determine the working directory: {e}");
            return ExitCode::FAILURE;
        },
    };
    let session = Session::with_process_shell(cwd);

    let Some(contents) = args.contents else {
        return match repl::run(session) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            },
        };
    };

    let script = if args.file {
        match fs::read_to_string(&contents) {
            Ok(script) => script,
            Err(_) => {
                eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
                return ExitCode::FAILURE;
            },
        }
    } else {
        contents
    };

    match session.eval(&script) {
        Ok(value) => {
            if args.pipe_mode && !value.is_nil() {
                println!("{value}");
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
