//! aocli - Command-line client for Advent of Code: download puzzles, submit answers

mod cli;
mod config;
mod context;
mod download;
mod error;
mod output;
mod scaffold;
mod submit;

use aoc_puzzle::{Level, Outcome};
use clap::Parser;
use cli::{Args, Command, DownloadArgs, PuzzleArgs, Selection, SubmitArgs};
use context::Context;
use error::CliError;
use std::io::{BufRead, IsTerminal};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit code for a recognized submission outcome other than a correct answer
const NOT_CORRECT: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<ExitCode, CliError> {
    let context = Context::from_args(&args)?;

    match args.command {
        Command::Download(download) => run_download(&context, &download),
        Command::Submit(submit) => run_submit(&context, &submit),
        Command::New(puzzle) => run_new(&context, puzzle),
    }
}

fn run_download(context: &Context, args: &DownloadArgs) -> Result<ExitCode, CliError> {
    let puzzle = context.puzzle(args.puzzle)?;
    let selection = args.selection();
    let session = if selection.input {
        Some(context.require_session("to download the input")?)
    } else {
        context.session()
    };

    download::write_puzzle(
        &context.client,
        puzzle,
        selection,
        session.as_deref().map(String::as_str),
        &args.output,
    )?;
    Ok(ExitCode::SUCCESS)
}

fn run_submit(context: &Context, args: &SubmitArgs) -> Result<ExitCode, CliError> {
    let mut stdin = std::io::stdin().lock();
    let piped = !stdin.is_terminal();
    let answer = submit::read_answer(
        args.answer.as_deref(),
        args.file.as_deref(),
        if piped {
            Some(&mut stdin as &mut dyn BufRead)
        } else {
            None
        },
    )?;

    let puzzle = context.puzzle(args.puzzle)?;
    let level = Level::from_token(&args.level);
    let session = context.require_session("to submit an answer")?;

    eprintln!("Submitting {} for {} level {}...", answer, puzzle, level);
    let submission = context
        .client
        .submit_answer(puzzle, level, &answer, &session)?;

    if let Outcome::Unrecognized { status, text } = submission.outcome {
        return Err(CliError::Unrecognized { status, text });
    }

    println!("{}", output::format_submission(&submission));
    Ok(if submission.outcome.is_correct() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(NOT_CORRECT)
    })
}

fn run_new(context: &Context, args: PuzzleArgs) -> Result<ExitCode, CliError> {
    let puzzle = context.puzzle(args)?;
    let session = context.require_session("to download the input")?;
    let cwd = std::env::current_dir()?;

    let target = scaffold::day_dir(&cwd, puzzle, context.config.structure());
    std::fs::create_dir_all(&target)?;

    let template = cwd.join(scaffold::TEMPLATE_DIR);
    if template.is_dir() {
        eprintln!("Copying template files...");
        scaffold::copy_template(&template, &target)?;
    }

    eprintln!("Downloading puzzle data...");
    download::write_puzzle(
        &context.client,
        puzzle,
        Selection::ALL,
        Some(session.as_str()),
        &target,
    )?;

    println!("Created {}", target.display());
    Ok(ExitCode::SUCCESS)
}
