mod logger;

use lex::{LexError, Scanner};
use parser::{Parser, SourceFile};

use anyhow::{Context, Result};
use clap::{Args, Parser as ClapParser, Subcommand};

use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Scanner and syntax checker for MC programs.
#[derive(ClapParser, Debug)]
#[command(name = "mc", version)]
struct Mc {
    #[command(subcommand)]
    command: Command,

    /// Verbosity of the diagnostic log written to stderr
    #[arg(long, value_enum, global = true, default_value_t = logger::LogLevel::Warn)]
    log_level: logger::LogLevel,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every token of a source file
    Lex(LexArgs),
    /// Check that a source file is a well-formed program
    Parse(ParseArgs),
}

#[derive(Args, Debug)]
struct LexArgs {
    source: PathBuf,
}

#[derive(Args, Debug)]
struct ParseArgs {
    source: PathBuf,
}

fn main() -> ExitCode {
    let mc = Mc::parse();
    logger::init_with_level(mc.log_level);

    match &mc.command {
        Command::Lex(args) => lex(args),
        Command::Parse(args) => parse(args),
    }
}

fn read(path: &Path) -> Result<SourceFile> {
    SourceFile::load(path).with_context(|| format!("failed to read {}", path.display()))
}

// An unreadable file is reported and then treated as an empty buffer, so the rest of the pass
// still runs and reports what it sees.
fn load(path: &Path) -> (SourceFile, bool) {
    match read(path) {
        Ok(source_file) => (source_file, true),
        Err(err) => {
            println!("error: {:#}", err);
            (SourceFile::new(String::new()), false)
        }
    }
}

fn lex(args: &LexArgs) -> ExitCode {
    let (source_file, loaded) = load(&args.source);
    tracing::info!(path = %args.source.display(), "scanning");

    let mut scanner = Scanner::new(source_file.content());
    for token in scanner.by_ref() {
        println!("{}", token);
    }

    report_lex_errors(scanner.errors());
    println!("lexical analysis finished");

    if loaded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn parse(args: &ParseArgs) -> ExitCode {
    let (source_file, _) = load(&args.source);
    tracing::info!(path = %args.source.display(), "parsing");

    let mut parser = Parser::new(&source_file);
    let result = parser.parse();

    report_lex_errors(parser.lex_errors());

    match result {
        Ok(()) => {
            println!("syntax analysis finished: no errors found");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("syntax error: {}", err);
            println!("syntax analysis failed");
            ExitCode::FAILURE
        }
    }
}

fn report_lex_errors(errors: &[LexError]) {
    for error in errors {
        println!("lexical error: {}", error);
    }
}
