use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

use micalang::driver::SourceState;
use micalang::lexer::{Token, TokenType};

/// Exit code for source files with lexical errors, per sysexits EX_DATAERR.
const EXIT_DATA_ERROR: i32 = 65;

#[derive(Parser)]
#[command(name = "micalang")]
#[command(author, version, about = "The Mica language front end", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a Mica source file and print the token stream
    Tokenize {
        /// The source file to tokenize
        input: PathBuf,

        /// Print the token stream as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a Mica source file for lexical errors
    Check {
        /// The source file to check
        input: PathBuf,
    },

    /// Start an interactive prompt
    Repl,
}

fn main() -> Result<()> {
    // Initialize logger before parsing CLI args
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let result = match cli.command {
        Commands::Tokenize { input, json } => tokenize(input, json),
        Commands::Check { input } => check(input),
        Commands::Repl => repl(),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn tokenize(input: PathBuf, json: bool) -> Result<()> {
    log::info!("Tokenizing {:?}", input);

    let mut state = SourceState::new(&input)
        .with_context(|| format!("failed to open source file {:?}", input))?;
    let tokens = state.tokenize();

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        print_tokens(&tokens);
    }

    state.report_diagnostics()?;
    if state.has_errors() {
        std::process::exit(EXIT_DATA_ERROR);
    }

    Ok(())
}

fn check(input: PathBuf) -> Result<()> {
    log::info!("Checking {:?}", input);

    let mut state = SourceState::new(&input)
        .with_context(|| format!("failed to open source file {:?}", input))?;
    state.tokenize();

    state.report_diagnostics()?;
    if state.has_errors() {
        eprintln!(
            "\n{}: {} lexical error(s) found",
            "failure".red().bold(),
            state.error_count()
        );
        std::process::exit(EXIT_DATA_ERROR);
    }

    println!("{}: No errors found", "success".green().bold());
    Ok(())
}

fn repl() -> Result<()> {
    println!("{}", "Mica REPL".blue().bold());
    println!("Type ':quit' or ':q' to exit, ':help' for help\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("mica> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            // EOF on stdin ends the session.
            println!();
            break;
        }
        let input = input.trim();

        match input {
            ":quit" | ":q" => {
                println!("Goodbye!");
                break;
            }
            ":help" | ":h" => {
                println!("REPL commands:");
                println!("  :quit, :q    Exit the REPL");
                println!("  :help, :h    Show this help message");
                println!("\nEnter Mica source text to see its token stream.");
                continue;
            }
            "" => continue,
            _ => {}
        }

        // Each line gets a fresh scan state, so an error on one line does
        // not poison the next.
        let mut state = SourceState::new_from_string("<repl>", input.to_string());
        let tokens = state.tokenize();
        print_tokens(&tokens);
        state.report_diagnostics()?;
    }

    Ok(())
}

fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        if token.kind == TokenType::Eof {
            println!("{:>4}: {:?}", token.line, token.kind);
        } else {
            println!("{:>4}: {}", token.line, token);
        }
    }
}
