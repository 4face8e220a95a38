//! groot CLI - command-line front end for the groot version-control engine.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use groot::{CommitDiff, FileChange, InitStatus, LineDiff, LineKind, LogOptions, Repository};

/// groot - a minimal local version-control engine
#[derive(Parser, Debug)]
#[command(name = "groot", author, version, about)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Working directory holding the .groot repository
    #[arg(short, long, env = "GROOT_DIR", default_value = ".", global = true)]
    repo: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty repository (safe to run again)
    Init,

    /// Stage a file for the next commit
    Add {
        /// The file to stage
        file: PathBuf,
    },

    /// Record the staged files as a new commit
    Commit {
        /// The commit message
        message: String,
    },

    /// Show the commit history, newest first
    Log {
        /// Show at most this many commits
        #[arg(short = 'n', long)]
        max_count: Option<usize>,
    },

    /// Show what a commit changed relative to its parent
    Show {
        /// Commit id (full or an unambiguous prefix)
        commit: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let repo = Repository::init(&args.repo)
        .with_context(|| format!("cannot initialize repository in {}", args.repo.display()))?;

    match args.command {
        Command::Init => match repo.init_status() {
            InitStatus::Created => println!(
                "Initialized empty groot repository in {}",
                repo.repo_dir().display()
            ),
            InitStatus::AlreadyInitialized => println!("Already initialized the .groot folder"),
        },
        Command::Add { file } => {
            let oid = repo
                .add(&file)
                .with_context(|| format!("cannot add {}", file.display()))?;
            println!("{}", oid);
            println!("Added {}", file.display());
        }
        Command::Commit { message } => {
            let oid = repo.commit(&message).context("cannot create commit")?;
            println!("Commit successfully created: {}", oid);
        }
        Command::Log { max_count } => {
            let mut options = LogOptions::new();
            if let Some(n) = max_count {
                options = options.max_count(n);
            }
            for commit in repo.log_with_options(options)? {
                let commit = commit.context("cannot read commit history")?;
                println!("--------------");
                println!("Commit: {}", commit.oid().to_string().yellow());
                println!("Date: {}", commit.timestamp());
                println!();
                println!("    {}", commit.message().replace('\n', "\n    "));
                println!();
            }
        }
        Command::Show { commit } => match repo.show_commit(&commit)? {
            Some(diff) => print_commit_diff(&diff),
            None => println!("Commit not found"),
        },
    }

    Ok(())
}

fn print_commit_diff(diff: &CommitDiff) {
    println!("Changes in commit {}:", diff.commit().oid().short());
    println!();

    for file in diff.files() {
        println!("File: {}", file.path().bold());
        if file.change() != &FileChange::Missing(*file.oid()) {
            println!("{}", file.content().trim_end_matches('\n'));
        }

        match file.change() {
            FileChange::FirstCommit => println!("First commit"),
            FileChange::NewFile => println!("New file in this commit"),
            FileChange::Missing(oid) => {
                println!("{}", format!("Object {} not found", oid.short()).yellow())
            }
            FileChange::Modified(lines) => {
                println!();
                println!("Diff:");
                print_line_diff(lines);
            }
        }
        println!();
    }
}

fn print_line_diff(diff: &LineDiff) {
    for change in diff.iter() {
        match change.kind() {
            LineKind::Added => println!("{}", format!("++{}", change.line()).green()),
            LineKind::Removed => println!("{}", format!("--{}", change.line()).red()),
            LineKind::Unchanged => println!("{}", format!("  {}", change.line()).bright_black()),
        }
    }
}
