//! kickstart CLI - Scaffold TypeScript packages and release them

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use kickstart_core::descriptor::ReleaseKind;
use kickstart_core::release::DirtyTreeChoice;
use kickstart_core::tui::{BumpArgs, InitArgs, ReleaseArgs};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "kickstart")]
#[command(about = "Scaffold TypeScript packages and run their release flow")]
#[command(version)]
pub struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scaffold the current package (default)
    Init(CliInitArgs),
    /// Bump, build, commit, tag, push and publish a release
    Release(CliReleaseArgs),
    /// Bump the package.json version only
    Bump(CliBumpArgs),
}

#[derive(Parser, Debug, Default)]
pub struct CliInitArgs {
    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long = "dir")]
    pub directory: Option<PathBuf>,

    /// Overwrite generated files that already exist
    #[arg(long)]
    pub force: bool,

    /// Do not generate README.md
    #[arg(long = "skip-readme")]
    pub skip_readme: bool,

    /// Do not install dev dependencies
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Accept package manager defaults and skip confirmations
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliInitArgs> for InitArgs {
    fn from(args: CliInitArgs) -> Self {
        InitArgs {
            directory: args.directory,
            force: args.force,
            skip_readme: args.skip_readme,
            skip_install: args.skip_install,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CliReleaseArgs {
    /// Release kind: patch, minor or major (prompted when omitted)
    pub kind: Option<String>,

    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long = "dir")]
    pub directory: Option<PathBuf>,

    /// What to do with uncommitted changes instead of asking
    #[arg(long = "on-dirty", value_enum)]
    pub on_dirty: Option<DirtyTreeChoice>,

    /// Commit message when committing uncommitted changes
    #[arg(short, long)]
    pub message: Option<String>,

    /// Pop the pre-release stash after publishing without asking
    #[arg(long = "pop-stash")]
    pub pop_stash: bool,

    /// Never prompt; fall back to prompt defaults
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliReleaseArgs> for ReleaseArgs {
    fn from(args: CliReleaseArgs) -> Self {
        ReleaseArgs {
            directory: args.directory,
            kind: args.kind,
            on_dirty: args.on_dirty,
            message: args.message,
            pop_stash: args.pop_stash,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CliBumpArgs {
    /// Release kind: patch, minor or major
    #[arg(default_value_t = ReleaseKind::Patch.to_string())]
    pub kind: String,

    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long = "dir")]
    pub directory: Option<PathBuf>,
}

impl From<CliBumpArgs> for BumpArgs {
    fn from(args: CliBumpArgs) -> Self {
        BumpArgs {
            directory: args.directory,
            kind: args.kind,
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

async fn run(command: Option<Command>) -> Result<()> {
    match command {
        Some(Command::Init(args)) => kickstart_core::tui::run_init(args.into()).await,
        Some(Command::Release(args)) => kickstart_core::tui::run_release(args.into()).await,
        Some(Command::Bump(args)) => kickstart_core::tui::run_bump(args.into()).await,
        // No subcommand provided, default to init
        None => kickstart_core::tui::run_init(CliInitArgs::default().into()).await,
    }
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    let result = run(args.command).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(err) = result {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}
