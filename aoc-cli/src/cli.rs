//! CLI argument parsing using clap

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Convenient Advent of Code client: fetch puzzles and submit answers without leaving the editor
#[derive(Parser, Debug)]
#[command(name = "aocli", version)]
pub struct Args {
    /// Config file, merged over the discovered ones
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Session cookie from adventofcode.com (overrides AOC_SESSION and config)
    #[arg(short, long, global = true)]
    pub session: Option<String>,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download the puzzle description, examples and input
    Download(DownloadArgs),
    /// Submit a puzzle answer
    Submit(SubmitArgs),
    /// Create a folder for a day, copy the template and download the puzzle
    New(PuzzleArgs),
}

/// Puzzle selection shared by all commands
#[derive(ClapArgs, Debug, Clone, Copy, Default)]
pub struct PuzzleArgs {
    /// Puzzle year; two-digit years mean 20xx (default: config, folder name, or latest event)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Puzzle day (default: folder name, or latest unlocked day)
    #[arg(short, long)]
    pub day: Option<i32>,
}

#[derive(ClapArgs, Debug, Default)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub puzzle: PuzzleArgs,

    /// Download the description
    #[arg(short = 'D', long)]
    pub description: bool,

    /// Download the examples
    #[arg(short = 'E', long)]
    pub examples: bool,

    /// Download the input
    #[arg(short = 'I', long)]
    pub input: bool,

    /// Output folder (default: current folder)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

impl DownloadArgs {
    /// Content to fetch; nothing selected means everything
    pub fn selection(&self) -> Selection {
        if !(self.description || self.examples || self.input) {
            return Selection::ALL;
        }
        Selection {
            description: self.description,
            examples: self.examples,
            input: self.input,
        }
    }
}

/// Which puzzle files to write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub description: bool,
    pub examples: bool,
    pub input: bool,
}

impl Selection {
    pub const ALL: Selection = Selection {
        description: true,
        examples: true,
        input: true,
    };
}

#[derive(ClapArgs, Debug, Default)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub puzzle: PuzzleArgs,

    /// Puzzle level; "2" selects level two, anything else level one
    #[arg(short, long, default_value = "1")]
    pub level: String,

    /// File whose first line is the answer
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Answer (read from stdin when piped and omitted)
    pub answer: Option<String>,
}
