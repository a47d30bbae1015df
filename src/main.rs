//! `doclint` — documentation quality checks for markdown trees.

mod checker;
mod code;
mod commands;
mod config;
mod content;
mod corpus;
mod error;
mod existence;
mod format;
mod links;
mod markdown;
mod python;
mod report;
mod structure;
mod terminology;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands::Selection;

#[derive(Parser)]
#[command(name = "doclint", about = "Documentation quality checks for markdown trees")]
struct Cli {
    /// Project root containing the docs tree and optional .doclint.toml
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run checks and exit nonzero if any produced errors
    Check {
        /// Validate fenced code examples
        #[arg(long)]
        code: bool,
        /// Validate required sections and content length
        #[arg(long)]
        content: bool,
        /// Validate required directories and documents
        #[arg(long)]
        existence: bool,
        /// Validate heading, list, and fence formatting
        #[arg(long)]
        format: bool,
        /// Validate internal, anchor, and external links
        #[arg(long)]
        links: bool,
        /// Validate cross-document structural consistency
        #[arg(long)]
        structure: bool,
        /// Validate glossary term usage
        #[arg(long)]
        terminology: bool,
    },
    /// Run all checks and write markdown + JSON reports
    Report {
        /// Directory to write the report files into
        #[arg(long, default_value = "reports")]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { code, content, existence, format, links, structure, terminology } => {
            let selection = Selection {
                code,
                content,
                existence,
                format,
                links,
                structure,
                terminology,
            };
            commands::check(&cli.root, selection)
        },
        Commands::Report { out } => commands::report(&cli.root, &out),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            report::print_error(&e);
            ExitCode::FAILURE
        },
    }
}
