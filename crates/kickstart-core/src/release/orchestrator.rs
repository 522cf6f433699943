//! The release state machine
//!
//! ```text
//! CheckingTree -> Clean ---------------------------+
//!              -> AwaitingUserChoice -> commit ----+-> Bumping -> Building
//!                                    -> stash -----+       -> Committing -> Tagging
//!                                    -> abort (stop)       -> Pushing -> Publishing
//!                                                          -> OfferingUnstash -> Done
//! ```
//!
//! Every step either succeeds or stops the run. Nothing is retried and nothing
//! already done is undone: a failed push after a successful tag leaves the
//! local repository ahead of the remote. A failure after the stash push comes
//! back as [`Error::StillStashed`] so the caller can point at the stash.

use super::interaction::{DirtyTreeChoice, ReleaseInteraction};
use crate::config::Settings;
use crate::context::ProjectContext;
use crate::descriptor::{bump, DescriptorEditor, ReleaseKind};
use crate::error::{Error, Result};
use crate::runtime::CommandRunner;
use semver::Version;

const GIT: &str = "git";

/// Where the release currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseState {
    CheckingTree,
    Clean,
    AwaitingUserChoice,
    /// Committing pending changes chosen at the dirty-tree prompt
    CommittingChanges,
    Stashing,
    Bumping { from: Version, to: Version },
    /// `None` when the descriptor has no build script
    Building { script: Option<String> },
    Committing,
    Tagging { tag: String },
    Pushing,
    Publishing,
    OfferingUnstash,
    PoppingStash,
    Done,
}

impl ReleaseState {
    pub fn describe(&self) -> String {
        match self {
            ReleaseState::CheckingTree => "Checking working tree".to_string(),
            ReleaseState::Clean => "Working tree clean".to_string(),
            ReleaseState::AwaitingUserChoice => "Working tree has uncommitted changes".to_string(),
            ReleaseState::CommittingChanges => "Committing pending changes".to_string(),
            ReleaseState::Stashing => "Stashing pending changes".to_string(),
            ReleaseState::Bumping { from, to } => format!("Bumping version {} -> {}", from, to),
            ReleaseState::Building { script: Some(script) } => format!("Running {} script", script),
            ReleaseState::Building { script: None } => "No build script, skipping build".to_string(),
            ReleaseState::Committing => "Committing release".to_string(),
            ReleaseState::Tagging { tag } => format!("Tagging {}", tag),
            ReleaseState::Pushing => "Pushing with tags".to_string(),
            ReleaseState::Publishing => "Publishing package".to_string(),
            ReleaseState::OfferingUnstash => "Pre-release changes are stashed".to_string(),
            ReleaseState::PoppingStash => "Restoring stashed changes".to_string(),
            ReleaseState::Done => "Release complete".to_string(),
        }
    }
}

/// Outcome of a completed release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseReport {
    pub previous: Version,
    pub version: Version,
    pub tag: String,
    pub built: bool,
    pub stashed: bool,
    pub stash_popped: bool,
}

/// Drives one release of the project in a context
pub struct Release<'a, R: CommandRunner> {
    settings: &'a Settings,
    runner: &'a R,
    editor: DescriptorEditor,
}

impl<'a, R: CommandRunner> Release<'a, R> {
    pub fn new(ctx: &ProjectContext, settings: &'a Settings, runner: &'a R) -> Self {
        Self {
            settings,
            runner,
            editor: DescriptorEditor::new(ctx.descriptor_path()),
        }
    }

    /// Run the full release.
    ///
    /// `kind` comes from the command line; when `None` the interaction is
    /// asked. It is validated before the working tree is even inspected.
    pub async fn run<I: ReleaseInteraction>(
        &self,
        kind: Option<&str>,
        ui: &mut I,
    ) -> Result<ReleaseReport> {
        let raw_kind = match kind {
            Some(kind) => kind.to_string(),
            None => ui.release_kind(ReleaseKind::default())?,
        };
        let kind: ReleaseKind = raw_kind.parse()?;
        tracing::debug!(%kind, "starting release");

        let stashed = self.resolve_working_tree(ui).await?;

        match self.cut_release(kind, stashed, ui).await {
            Err(err) if stashed => Err(Error::StillStashed(Box::new(err))),
            result => result,
        }
    }

    /// Everything from the bump to the stash offer, on a clean tree.
    async fn cut_release<I: ReleaseInteraction>(
        &self,
        kind: ReleaseKind,
        stashed: bool,
        ui: &mut I,
    ) -> Result<ReleaseReport> {
        let mut descriptor = self.editor.load().await?;
        let previous = descriptor.version();
        let version = bump(&previous, kind)?;
        enter(
            ui,
            ReleaseState::Bumping {
                from: previous.clone(),
                to: version.clone(),
            },
        );
        descriptor.set_version(&version);
        self.editor.save(&descriptor).await?;

        let built = self.build(ui).await?;

        enter(ui, ReleaseState::Committing);
        self.git(&["add", "-A"]).await?;
        let message = self.settings.release_message_for(&version);
        self.git(&["commit", "-m", message.as_str()]).await?;

        let tag = self.settings.tag_for(&version);
        enter(ui, ReleaseState::Tagging { tag: tag.clone() });
        self.git(&["tag", tag.as_str()]).await?;

        enter(ui, ReleaseState::Pushing);
        self.git(&["push", "--follow-tags"]).await?;

        enter(ui, ReleaseState::Publishing);
        let pm = self.settings.package_manager;
        self.runner
            .run_interactive(pm.program(), &pm.publish_args())
            .await?;

        let mut stash_popped = false;
        if stashed {
            enter(ui, ReleaseState::OfferingUnstash);
            if ui.pop_stash()? {
                enter(ui, ReleaseState::PoppingStash);
                self.git(&["stash", "pop"]).await?;
                stash_popped = true;
            }
        }

        enter(ui, ReleaseState::Done);
        Ok(ReleaseReport {
            previous,
            version,
            tag,
            built,
            stashed,
            stash_popped,
        })
    }

    /// Get to a clean tree. Returns whether changes were stashed.
    async fn resolve_working_tree<I: ReleaseInteraction>(&self, ui: &mut I) -> Result<bool> {
        enter(ui, ReleaseState::CheckingTree);
        let status = self
            .runner
            .run_captured(GIT, &["status", "--porcelain"])
            .await?;
        let pending = status.stdout.trim_end();
        if pending.trim().is_empty() {
            enter(ui, ReleaseState::Clean);
            return Ok(false);
        }

        enter(ui, ReleaseState::AwaitingUserChoice);
        let choice: DirtyTreeChoice = ui.dirty_tree_choice(pending)?.parse()?;
        tracing::debug!(%choice, "dirty tree choice");

        match choice {
            DirtyTreeChoice::Commit => {
                let message = ui.commit_message(&self.settings.commit_message)?;
                let message = if message.trim().is_empty() {
                    self.settings.commit_message.clone()
                } else {
                    message
                };
                enter(ui, ReleaseState::CommittingChanges);
                self.git(&["add", "-A"]).await?;
                self.git(&["commit", "-m", message.as_str()]).await?;
                Ok(false)
            }
            DirtyTreeChoice::Stash => {
                enter(ui, ReleaseState::Stashing);
                self.git(&[
                    "stash",
                    "push",
                    "--include-untracked",
                    "-m",
                    self.settings.stash_message.as_str(),
                ])
                .await?;
                Ok(true)
            }
            DirtyTreeChoice::Abort => Err(Error::AbortedDirtyTree),
        }
    }

    /// Run the build script if the descriptor defines one.
    async fn build<I: ReleaseInteraction>(&self, ui: &mut I) -> Result<bool> {
        let descriptor = self.editor.load().await?;
        let script = &self.settings.build_script;
        if descriptor.script(script).is_none() {
            enter(ui, ReleaseState::Building { script: None });
            return Ok(false);
        }

        enter(
            ui,
            ReleaseState::Building {
                script: Some(script.clone()),
            },
        );
        let pm = self.settings.package_manager;
        self.runner
            .run_interactive(pm.program(), &pm.run_script_args(script))
            .await?;
        Ok(true)
    }

    async fn git(&self, args: &[&str]) -> Result<()> {
        self.runner.run_interactive(GIT, args).await
    }
}

fn enter<I: ReleaseInteraction>(ui: &mut I, state: ReleaseState) {
    tracing::debug!(?state, "release state");
    ui.on_state(&state);
}
