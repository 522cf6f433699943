//! Charm-style CLI prompts using cliclack

use crate::config::Settings;
use crate::context::ProjectContext;
use crate::descriptor::{DescriptorEditor, ReleaseKind};
use crate::error::Error;
use crate::release::{
    bump_version_str, DirtyTreeChoice, PresetAnswers, Release, ReleaseInteraction, ReleaseReport,
    ReleaseState,
};
use crate::runtime::{check_tools, ProcessRunner, Tool};
use crate::templates::{ScaffoldOptions, ScaffoldReport, Scaffolder, WriteOutcome};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Arguments for `kickstart init`
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Project directory (defaults to the current directory)
    pub directory: Option<PathBuf>,
    pub force: bool,
    pub skip_readme: bool,
    pub skip_install: bool,
    /// Accept package manager defaults and skip confirmations
    pub yes: bool,
}

/// Arguments for `kickstart release`
#[derive(Debug, Clone, Default)]
pub struct ReleaseArgs {
    pub directory: Option<PathBuf>,
    /// Release kind given on the command line, validated by the flow
    pub kind: Option<String>,
    /// Dirty-tree answer given on the command line
    pub on_dirty: Option<DirtyTreeChoice>,
    pub message: Option<String>,
    pub pop_stash: bool,
    /// Never prompt; use flags and prompt defaults
    pub yes: bool,
}

/// Arguments for `kickstart bump`
#[derive(Debug, Clone, Default)]
pub struct BumpArgs {
    pub directory: Option<PathBuf>,
    pub kind: String,
}

fn project_context(directory: &Option<PathBuf>) -> Result<ProjectContext> {
    let current_dir = std::env::current_dir().context("Failed to read current directory")?;
    let root = match directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };
    if !root.is_dir() {
        anyhow::bail!("Project directory does not exist: {}", root.display());
    }
    Ok(ProjectContext::from_process(root))
}

/// Preflight tool check with a spinner, as the flows need these on PATH
fn check_required_tools(tools: &[Tool]) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    match check_tools(tools) {
        Ok(found) => {
            let info: Vec<String> = found
                .iter()
                .map(|t| format!("{} ({})", t.tool, t.version.as_deref().unwrap_or("unknown")))
                .collect();
            spinner.stop(format!("Detected tools: {}", info.join(", ")));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Missing tools");
            Err(e.into())
        }
    }
}

/// Run `kickstart init` with interactive output
pub async fn run_init(args: InitArgs) -> Result<()> {
    cliclack::intro("kickstart init")?;

    let ctx = project_context(&args.directory)?;
    let settings = Settings::load(&ctx)?;
    cliclack::log::info(format!(
        "Project: {} (package manager: {})",
        ctx.root().display(),
        settings.package_manager
    ))?;

    check_required_tools(&[Tool::Node, Tool::PackageManager(settings.package_manager)])?;

    if args.force && !args.yes {
        let confirm: bool = cliclack::confirm("--force overwrites existing scaffold files. Continue?")
            .initial_value(false)
            .interact()?;
        if !confirm {
            return Err(Error::Cancelled.into());
        }
    }

    let runner = ProcessRunner::new(&ctx);
    let scaffolder = Scaffolder::new(&ctx, &settings, &runner);
    let options = ScaffoldOptions {
        force: args.force,
        skip_readme: args.skip_readme,
        skip_install: args.skip_install,
        yes: args.yes,
    };

    let report = scaffolder
        .run(options, |step| {
            let _ = cliclack::log::step(step.label());
        })
        .await?;

    print_scaffold_report(&report)?;
    print_next_steps(&settings)?;

    Ok(())
}

fn print_scaffold_report(report: &ScaffoldReport) -> Result<()> {
    if report.descriptor_created {
        cliclack::log::success("Created package.json")?;
    }
    for (path, outcome) in &report.files {
        let line = format!("{} ({})", path.display(), outcome);
        match outcome {
            WriteOutcome::Created => cliclack::log::success(line)?,
            WriteOutcome::Overwritten => cliclack::log::warning(line)?,
            WriteOutcome::Skipped => cliclack::log::remark(line)?,
        }
    }
    if report.descriptor_changed {
        cliclack::log::success("Registered default scripts in package.json")?;
    } else {
        cliclack::log::remark("package.json already has every default field")?;
    }

    cliclack::log::info(format!(
        "{} created, {} overwritten, {} skipped",
        report.count(WriteOutcome::Created),
        report.count(WriteOutcome::Overwritten),
        report.count(WriteOutcome::Skipped)
    ))?;
    Ok(())
}

fn print_next_steps(settings: &Settings) -> Result<()> {
    let pm = settings.package_manager;
    let steps = [
        format!("{} run build", pm),
        format!("{} start", pm),
        format!("{} run release", pm),
    ];

    println!();
    println!("  {}", "Next steps".bold());
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", (i + 1).to_string().dimmed(), step.cyan());
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

/// Interactive answers for the release flow
///
/// Answers already given as flags are taken from `preset` instead of asking.
pub struct ClackInteraction {
    preset: PresetAnswers,
}

impl ClackInteraction {
    pub fn new(preset: PresetAnswers) -> Self {
        Self { preset }
    }
}

impl ReleaseInteraction for ClackInteraction {
    fn release_kind(&mut self, default: ReleaseKind) -> crate::error::Result<String> {
        let kind: String = cliclack::input("Release type? (patch/minor/major)")
            .placeholder(default.as_str())
            .default_input(default.as_str())
            .validate(|input: &String| match input.parse::<ReleaseKind>() {
                Ok(_) => Ok(()),
                Err(_) => Err("Enter patch, minor or major"),
            })
            .interact()?;
        Ok(kind)
    }

    fn dirty_tree_choice(&mut self, pending: &str) -> crate::error::Result<String> {
        cliclack::note("Uncommitted changes", pending)?;
        if self.preset.dirty_tree.is_some() {
            return self.preset.dirty_tree_choice(pending);
        }
        let choice: String = cliclack::input("(c)ommit/(s)tash/(a)bort")
            .placeholder("a")
            .default_input("a")
            .validate(|input: &String| match input.parse::<DirtyTreeChoice>() {
                Ok(_) => Ok(()),
                Err(_) => Err("Enter c, s or a"),
            })
            .interact()?;
        Ok(choice)
    }

    fn commit_message(&mut self, default: &str) -> crate::error::Result<String> {
        if self.preset.message.is_some() {
            return self.preset.commit_message(default);
        }
        let message: String = cliclack::input("Commit message")
            .placeholder(default)
            .default_input(default)
            .interact()?;
        Ok(message)
    }

    fn pop_stash(&mut self) -> crate::error::Result<bool> {
        if self.preset.pop_stash {
            return Ok(true);
        }
        let pop: bool = cliclack::confirm("Pop stash now? (y/N)")
            .initial_value(false)
            .interact()?;
        Ok(pop)
    }

    fn on_state(&mut self, state: &ReleaseState) {
        let line = state.describe();
        let _ = match state {
            ReleaseState::Clean | ReleaseState::Done => cliclack::log::success(line),
            ReleaseState::AwaitingUserChoice | ReleaseState::OfferingUnstash => {
                cliclack::log::warning(line)
            }
            ReleaseState::Building { script: None } => cliclack::log::remark(line),
            _ => cliclack::log::step(line),
        };
    }
}

/// Non-interactive answers that still report progress
struct QuietInteraction(PresetAnswers);

impl ReleaseInteraction for QuietInteraction {
    fn release_kind(&mut self, default: ReleaseKind) -> crate::error::Result<String> {
        self.0.release_kind(default)
    }

    fn dirty_tree_choice(&mut self, pending: &str) -> crate::error::Result<String> {
        cliclack::note("Uncommitted changes", pending)?;
        self.0.dirty_tree_choice(pending)
    }

    fn commit_message(&mut self, default: &str) -> crate::error::Result<String> {
        self.0.commit_message(default)
    }

    fn pop_stash(&mut self) -> crate::error::Result<bool> {
        self.0.pop_stash()
    }

    fn on_state(&mut self, state: &ReleaseState) {
        let _ = cliclack::log::step(state.describe());
    }
}

/// Run `kickstart release`
pub async fn run_release(args: ReleaseArgs) -> Result<()> {
    cliclack::intro("kickstart release")?;

    let ctx = project_context(&args.directory)?;
    let settings = Settings::load(&ctx)?;

    let mut preset = PresetAnswers::new().with_pop_stash(args.pop_stash);
    if let Some(choice) = args.on_dirty {
        preset = preset.on_dirty(choice.as_str());
    }
    if let Some(message) = &args.message {
        preset = preset.message(message.clone());
    }

    // A bad kind must fail before the tool check spawns anything
    if let Some(kind) = &args.kind {
        kind.parse::<ReleaseKind>()?;
    }

    check_required_tools(&[Tool::Git, Tool::PackageManager(settings.package_manager)])?;

    let runner = ProcessRunner::new(&ctx);
    let release = Release::new(&ctx, &settings, &runner);

    let report = if args.yes {
        let mut ui = QuietInteraction(preset);
        release.run(args.kind.as_deref(), &mut ui).await?
    } else {
        let mut ui = ClackInteraction::new(preset);
        release.run(args.kind.as_deref(), &mut ui).await?
    };

    print_release_report(&report)?;
    Ok(())
}

fn print_release_report(report: &ReleaseReport) -> Result<()> {
    if report.stashed && !report.stash_popped {
        cliclack::log::warning(
            "Your pre-release changes are still stashed. Run `git stash pop` to restore them.",
        )?;
    }
    cliclack::outro(format!(
        "Released {} ({} -> {})",
        report.tag, report.previous, report.version
    ))?;
    Ok(())
}

/// Run `kickstart bump`
pub async fn run_bump(args: BumpArgs) -> Result<()> {
    let ctx = project_context(&args.directory)?;
    let editor = DescriptorEditor::new(ctx.descriptor_path());
    let result = bump_version_str(&editor, &args.kind).await?;
    cliclack::log::success(format!("version {} -> {}", result.previous, result.version))?;
    Ok(())
}
