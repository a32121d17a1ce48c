// marmoset: tokenizer and parser front end for a small interpreted language

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as _;
use crossterm::style::Stylize;

use marmoset::parser::parse::parse;
use marmoset::repl::{Mode, Repl};

/// Tokenize and parse marmoset source, from a file or an interactive prompt.
#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to parse. Starts the interactive prompt when omitted.
    file: Option<PathBuf>,

    /// What the interactive prompt prints for each line
    #[arg(short, long, value_enum, default_value_t = Mode::Tokens)]
    mode: Mode,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Maximum level of log events written to stderr
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .init();

    match &args.file {
        Some(path) => parse_file(path, !args.no_color),
        None => start_repl(args.mode, !args.no_color),
    }
}

fn parse_file(path: &Path, color: bool) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;

    tracing::info!(path = %path.display(), "parsing");
    let (program, errors) = parse(&source);

    if errors.is_empty() {
        tracing::info!(statements = program.statements.len(), "parsed successfully");
        println!("{}", program);
        return Ok(());
    }

    eprintln!("{} parser error(s) in {}:", errors.len(), path.display());
    for error in &errors {
        if color {
            eprintln!("\t{}", error.to_string().red());
        } else {
            eprintln!("\t{}", error);
        }
    }
    std::process::exit(1);
}

fn start_repl(mode: Mode, color: bool) -> Result<()> {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "there".to_string());

    println!("Hello {}! This is the marmoset programming language!", user);
    println!("Feel free to type in commands");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    Repl::new(mode, color).run(stdin.lock(), &mut stdout)?;
    Ok(())
}
