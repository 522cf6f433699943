//! The `init` sequence: lay down starter files and register defaults
//!
//! Every step checks before it acts, so running the whole sequence again on a
//! scaffolded project creates nothing and leaves `package.json` untouched.

use super::assets::{AssetKind, AssetProvider, BuiltinAssets, TemplateVars};
use super::readme::template_vars;
use super::writer::{ScaffoldWriter, WriteOutcome};
use crate::config::Settings;
use crate::context::ProjectContext;
use crate::descriptor::{DefaultFields, DescriptorEditor};
use crate::error::{Error, Result};
use crate::runtime::CommandRunner;
use std::path::PathBuf;

/// Dev dependencies installed into a fresh project
pub const DEV_DEPENDENCIES: &[&str] = &["typescript", "@types/node"];

/// Flags controlling an `init` run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaffoldOptions {
    /// Overwrite files that already exist
    pub force: bool,
    pub skip_readme: bool,
    pub skip_install: bool,
    /// Accept package manager defaults when creating the descriptor
    pub yes: bool,
}

/// A step the driver is about to run, for progress display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldStep {
    Descriptor,
    ConfigFiles,
    SourceFiles,
    Readme,
    ReleaseScripts,
    DescriptorFields,
    Install,
}

impl ScaffoldStep {
    pub fn label(&self) -> &'static str {
        match self {
            ScaffoldStep::Descriptor => "Checking package.json",
            ScaffoldStep::ConfigFiles => "Writing config files",
            ScaffoldStep::SourceFiles => "Writing source placeholders",
            ScaffoldStep::Readme => "Writing README",
            ScaffoldStep::ReleaseScripts => "Writing release scripts",
            ScaffoldStep::DescriptorFields => "Registering scripts and entry points",
            ScaffoldStep::Install => "Installing dev dependencies",
        }
    }
}

/// What an `init` run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Project-relative path and outcome, in write order
    pub files: Vec<(PathBuf, WriteOutcome)>,
    pub descriptor_created: bool,
    pub descriptor_changed: bool,
    pub installed: bool,
}

impl ScaffoldReport {
    pub fn count(&self, outcome: WriteOutcome) -> usize {
        self.files.iter().filter(|(_, o)| *o == outcome).count()
    }
}

/// Sequences the scaffold steps against one project
pub struct Scaffolder<'a, R: CommandRunner, A: AssetProvider = BuiltinAssets> {
    ctx: &'a ProjectContext,
    settings: &'a Settings,
    runner: &'a R,
    assets: A,
    writer: ScaffoldWriter,
    editor: DescriptorEditor,
}

impl<'a, R: CommandRunner> Scaffolder<'a, R, BuiltinAssets> {
    pub fn new(ctx: &'a ProjectContext, settings: &'a Settings, runner: &'a R) -> Self {
        Self::with_assets(ctx, settings, runner, BuiltinAssets)
    }
}

impl<'a, R: CommandRunner, A: AssetProvider> Scaffolder<'a, R, A> {
    pub fn with_assets(
        ctx: &'a ProjectContext,
        settings: &'a Settings,
        runner: &'a R,
        assets: A,
    ) -> Self {
        Self {
            ctx,
            settings,
            runner,
            assets,
            writer: ScaffoldWriter::new(ctx.root()),
            editor: DescriptorEditor::new(ctx.descriptor_path()),
        }
    }

    /// Run every step in order, reporting each one to `on_step` first.
    pub async fn run<F>(&self, options: ScaffoldOptions, mut on_step: F) -> Result<ScaffoldReport>
    where
        F: FnMut(ScaffoldStep),
    {
        let mut report = ScaffoldReport::default();

        on_step(ScaffoldStep::Descriptor);
        report.descriptor_created = self.ensure_descriptor(options.yes).await?;

        let descriptor = self.editor.load().await?;
        let vars = template_vars(&descriptor, self.settings);

        on_step(ScaffoldStep::ConfigFiles);
        self.write_kind(AssetKind::Config, &vars, options.force, &mut report)
            .await?;

        on_step(ScaffoldStep::SourceFiles);
        self.write_kind(AssetKind::Source, &vars, options.force, &mut report)
            .await?;

        if !options.skip_readme {
            on_step(ScaffoldStep::Readme);
            self.write_kind(AssetKind::Docs, &vars, options.force, &mut report)
                .await?;
        }

        on_step(ScaffoldStep::ReleaseScripts);
        self.write_kind(AssetKind::Script, &vars, options.force, &mut report)
            .await?;

        on_step(ScaffoldStep::DescriptorFields);
        report.descriptor_changed = self.ensure_descriptor_fields().await?;

        if !options.skip_install {
            on_step(ScaffoldStep::Install);
            report.installed = self.ensure_dependencies().await?;
        }

        Ok(report)
    }

    /// Create `package.json` through the package manager if it is missing.
    async fn ensure_descriptor(&self, accept_defaults: bool) -> Result<bool> {
        if self.editor.exists() {
            return Ok(false);
        }

        let pm = self.settings.package_manager;
        tracing::debug!(%pm, "no package.json, running init");
        self.runner
            .run_interactive(pm.program(), &pm.init_args(accept_defaults))
            .await?;

        if !self.editor.exists() {
            return Err(Error::DescriptorRead {
                path: self.editor.path().to_path_buf(),
                reason: format!("`{} init` finished without creating it", pm),
            });
        }
        Ok(true)
    }

    async fn write_kind(
        &self,
        kind: AssetKind,
        vars: &TemplateVars,
        force: bool,
        report: &mut ScaffoldReport,
    ) -> Result<()> {
        for file in self.assets.files(kind, vars) {
            let outcome = self.writer.write(&file.path, &file.content, force).await?;
            report.files.push((PathBuf::from(file.path), outcome));
        }
        Ok(())
    }

    async fn ensure_descriptor_fields(&self) -> Result<bool> {
        let pm = self.settings.package_manager;
        let defaults = DefaultFields::standard(
            &self.settings.out_dir,
            &pm.run_script_command(&self.settings.build_script),
        );
        self.editor
            .edit(|descriptor| {
                defaults.apply(descriptor);
            })
            .await
    }

    /// Install TypeScript tooling unless it is already declared and present.
    async fn ensure_dependencies(&self) -> Result<bool> {
        let descriptor = self.editor.load().await?;
        let declared = DEV_DEPENDENCIES
            .iter()
            .all(|dep| descriptor.has_dev_dependency(dep));
        let installed = self.ctx.path("node_modules").is_dir();
        if declared && installed {
            return Ok(false);
        }

        let pm = self.settings.package_manager;
        self.runner
            .run_interactive(pm.program(), &pm.add_dev_args(DEV_DEPENDENCIES))
            .await?;
        Ok(true)
    }
}
