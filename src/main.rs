use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use colored::Colorize;
use log::{error, warn};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use rocks_lang::config::Config;
use rocks_lang::Rocks;

#[derive(ClapParser, Debug)]
#[command(author, version, about = "A tree-walking interpreter for Lox.")]
struct Cli {
    /// Script to run. Omit to start an interactive REPL.
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    simple_logger::init_with_level(log::Level::Warn).ok();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(code) => return code,
    };
    let config = Config::load();

    match cli.script {
        Some(path) => run_file(&path),
        None => run_repl(&config),
    }
}

/// Thin wrapper around `Cli::try_parse` that remaps clap's own usage-error
/// exit code (2) to 64, matching every other command-line usage failure this
/// interpreter reports.
fn parse_args() -> Result<Cli, ExitCode> {
    use clap::error::ErrorKind;

    Cli::try_parse().map_err(|err| {
        err.print().ok();
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
            _ => ExitCode::from(64),
        }
    })
}

fn run_file(path: &PathBuf) -> ExitCode {
    let mut rocks = Rocks::new(Box::new(std::io::stdout()));

    if let Err(error) = rocks.run_file(path) {
        eprintln!("Could not read '{}': {error}", path.display());
        return ExitCode::from(64);
    }

    if rocks.had_error() {
        ExitCode::from(65)
    } else if rocks.had_runtime_error() {
        ExitCode::from(70)
    } else {
        ExitCode::SUCCESS
    }
}

fn run_repl(config: &Config) -> ExitCode {
    let mut rocks = Rocks::new(Box::new(std::io::stdout()));
    let history_path = config.history_path();

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            error!("could not start line editor: {err}");
            return ExitCode::FAILURE;
        },
    };

    if editor.load_history(&history_path).is_err() {
        warn!("no REPL history at {}, starting fresh", history_path.display());
    }

    let prompt = if config.color { "> ".cyan().to_string() } else { "> ".to_string() };

    loop {
        match editor.readline(&prompt) {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                rocks.run(&line);
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => {
                error!("readline error: {err}");
                break;
            },
        }
    }

    if editor.save_history(&history_path).is_err() {
        warn!("could not persist REPL history to {}", history_path.display());
    }

    ExitCode::SUCCESS
}
