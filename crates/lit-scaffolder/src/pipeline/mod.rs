//! The scaffold pipeline
//!
//! A fixed sequence of steps turns a freshly generated open-wc project into a
//! publish-ready component. Steps run strictly in order and each may depend on
//! what earlier steps stored in the [`ScaffoldContext`]. There is no retry and
//! no rollback: the first fatal failure ends the run with a [`StepFailure`].
//! Failures of the generator, install and audit commands are reported and the
//! run continues.

pub mod context;
pub mod progress;

use crate::color::{generate_contrasting_pair, Rgb};
use crate::manifest::{
    self, identity_rules, patch, provenance_rule, resolve_group, DependencyGroup, Provenance,
    Registry, MANIFEST_FILE,
};
use crate::naming::{self, main_file, styles_file};
use crate::product::ProductConfig;
use crate::project::newest_directory;
use crate::runtime::{CommandExecutor, ShellCommand};
use crate::templates::{
    render_editor_settings, render_license, render_style, rewire_main_module, TemplateStore,
};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

pub use context::{Choices, ScaffoldContext};
pub use progress::{ConsoleProgress, PipelineStep, Progress, RecordedProgress};

/// Directory holding the component sources in a generated project
const SOURCE_DIR: &str = "src";
/// Editor configuration directory and file
const EDITOR_DIR: &str = ".vscode";
const EDITOR_SETTINGS: &str = "settings.json";

/// Pipeline steps in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    GenerateProject,
    EnterProjectDirectory,
    ReadManifest,
    ExtractComponentName,
    UpdateManifestInfo,
    UpdateDependencyVersions,
    AddProjectLinks,
    WriteManifest,
    InstallDependencies,
    FixVulnerabilities,
    DeriveTypeName,
    GenerateStyleModule,
    RewireMainModule,
    WriteLicense,
    ConfigureEditor,
}

impl Step {
    pub const ALL: [Step; 15] = [
        Step::GenerateProject,
        Step::EnterProjectDirectory,
        Step::ReadManifest,
        Step::ExtractComponentName,
        Step::UpdateManifestInfo,
        Step::UpdateDependencyVersions,
        Step::AddProjectLinks,
        Step::WriteManifest,
        Step::InstallDependencies,
        Step::FixVulnerabilities,
        Step::DeriveTypeName,
        Step::GenerateStyleModule,
        Step::RewireMainModule,
        Step::WriteLicense,
        Step::ConfigureEditor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Step::GenerateProject => "Generate base web component",
            Step::EnterProjectDirectory => "Move to component directory",
            Step::ReadManifest => "Read package.json",
            Step::ExtractComponentName => "Get component name from package.json",
            Step::UpdateManifestInfo => "Update package.json information",
            Step::UpdateDependencyVersions => "Update dependency versions",
            Step::AddProjectLinks => "Add project links to package.json",
            Step::WriteManifest => "Write new package.json",
            Step::InstallDependencies => "Install dependencies",
            Step::FixVulnerabilities => "Fix package.json vulnerabilities",
            Step::DeriveTypeName => "Get component class name",
            Step::GenerateStyleModule => "Generate styles module from template",
            Step::RewireMainModule => "Use styles module in component",
            Step::WriteLicense => "Write LICENSE file",
            Step::ConfigureEditor => "Configure .vscode directory",
        }
    }

    /// Whether a failing command in this step is reported instead of ending the run
    pub fn is_recoverable(self) -> bool {
        matches!(
            self,
            Step::GenerateProject | Step::InstallDependencies | Step::FixVulnerabilities
        )
    }
}

/// Result of a step that did not fail fatally
enum StepStatus {
    Done,
    /// A recoverable command failed; the message is reported and the run goes on
    Degraded(String),
}

/// A fatal step failure, carrying the step's position for reporting
#[derive(Debug, Error)]
#[error("step {ordinal} ({label}) failed: {cause:#}")]
pub struct StepFailure {
    pub ordinal: usize,
    pub label: &'static str,
    pub cause: anyhow::Error,
}

/// What a finished run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffolded {
    pub project_dir: PathBuf,
    pub component: String,
    pub type_name: String,
    /// Messages from recoverable steps that failed
    pub warnings: Vec<String>,
}

/// Terminal states of a run that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(Scaffolded),
    /// The user declined before anything ran
    Aborted,
}

/// Product-specific inputs to the pipeline
#[derive(Debug, Clone)]
pub struct ScaffoldSettings {
    /// Directory the generator runs in; the project is created beneath it
    pub base_dir: PathBuf,
    pub generator: ShellCommand,
    pub package_manager: String,
    pub repository_host: String,
}

impl ScaffoldSettings {
    pub fn from_config<C: ProductConfig>(config: &C, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            generator: config.generator(),
            package_manager: config.package_manager().to_string(),
            repository_host: config.repository_host().to_string(),
        }
    }
}

/// Runs the pipeline against injected collaborators
pub struct Scaffolder<'a> {
    executor: &'a dyn CommandExecutor,
    registry: &'a dyn Registry,
    templates: &'a TemplateStore,
    settings: ScaffoldSettings,
    rng: Box<dyn RngCore + 'a>,
}

impl<'a> Scaffolder<'a> {
    pub fn new(
        executor: &'a dyn CommandExecutor,
        registry: &'a dyn Registry,
        templates: &'a TemplateStore,
        settings: ScaffoldSettings,
    ) -> Self {
        Self {
            executor,
            registry,
            templates,
            settings,
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    /// Replace the random source used for editor colors
    pub fn with_rng(mut self, rng: impl RngCore + 'a) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Run every step in order, or nothing at all if the user declined
    pub fn run(
        &mut self,
        choices: Choices,
        progress: &mut dyn Progress,
    ) -> Result<Outcome, StepFailure> {
        if !choices.start {
            info!("scaffold cancelled before any step ran");
            return Ok(Outcome::Aborted);
        }

        let mut ctx = ScaffoldContext::new(choices);
        let mut warnings = Vec::new();

        for step in Step::ALL {
            ctx.step += 1;
            let current = PipelineStep {
                ordinal: ctx.step,
                label: step.label(),
            };
            progress.step(&current);
            info!(step = current.ordinal, label = current.label, "running step");

            match self.execute(step, &mut ctx) {
                Ok(StepStatus::Done) => {}
                Ok(StepStatus::Degraded(message)) => {
                    debug_assert!(step.is_recoverable());
                    progress.warn(&current, &message);
                    warnings.push(message);
                }
                Err(cause) => {
                    debug!(
                        step = current.ordinal,
                        label = current.label,
                        "step failed: {:#}",
                        cause
                    );
                    return Err(StepFailure {
                        ordinal: current.ordinal,
                        label: current.label,
                        cause,
                    });
                }
            }
        }

        Ok(Outcome::Completed(Scaffolded {
            project_dir: ctx.project_dir.unwrap_or_default(),
            component: ctx.component.unwrap_or_default(),
            type_name: ctx.type_name.unwrap_or_default(),
            warnings,
        }))
    }

    fn execute(&mut self, step: Step, ctx: &mut ScaffoldContext) -> Result<StepStatus> {
        match step {
            Step::GenerateProject => return Ok(self.generate_project()),
            Step::EnterProjectDirectory => self.enter_project_directory(ctx)?,
            Step::ReadManifest => read_manifest(ctx)?,
            Step::ExtractComponentName => extract_component_name(ctx)?,
            Step::UpdateManifestInfo => update_manifest_info(ctx)?,
            Step::UpdateDependencyVersions => self.update_dependency_versions(ctx)?,
            Step::AddProjectLinks => self.add_project_links(ctx)?,
            Step::WriteManifest => write_manifest(ctx)?,
            Step::InstallDependencies => {
                let command = ShellCommand::new(&self.settings.package_manager).arg("install");
                return self.run_in_project(command, ctx);
            }
            Step::FixVulnerabilities => {
                let command =
                    ShellCommand::new(&self.settings.package_manager).args(["audit", "fix"]);
                return self.run_in_project(command, ctx);
            }
            Step::DeriveTypeName => derive_type_name(ctx)?,
            Step::GenerateStyleModule => self.generate_style_module(ctx)?,
            Step::RewireMainModule => rewire_component(ctx)?,
            Step::WriteLicense => self.write_license(ctx)?,
            Step::ConfigureEditor => self.configure_editor(ctx)?,
        }
        Ok(StepStatus::Done)
    }

    /// Run an interactive command whose failure is reported, not fatal
    fn run_recoverable(&self, command: ShellCommand) -> StepStatus {
        match self.executor.execute(&command.interactive()) {
            Ok(_) => StepStatus::Done,
            Err(e) => {
                debug!(error = %e, "continuing after command failure");
                StepStatus::Degraded(e.to_string())
            }
        }
    }

    fn run_in_project(&self, command: ShellCommand, ctx: &ScaffoldContext) -> Result<StepStatus> {
        let dir = ctx.project_dir()?;
        Ok(self.run_recoverable(command.current_dir(dir)))
    }

    fn generate_project(&self) -> StepStatus {
        let command = self
            .settings
            .generator
            .clone()
            .current_dir(&self.settings.base_dir);
        self.run_recoverable(command)
    }

    fn enter_project_directory(&self, ctx: &mut ScaffoldContext) -> Result<()> {
        let base = &self.settings.base_dir;
        let dir = newest_directory(base)
            .with_context(|| format!("Failed to list {}", base.display()))?
            .with_context(|| format!("No generated project directory found in {}", base.display()))?;

        info!(dir = %dir.display(), "entering project directory");
        ctx.project_dir = Some(dir);
        Ok(())
    }

    fn update_dependency_versions(&self, ctx: &mut ScaffoldContext) -> Result<()> {
        let project_dir = ctx.project_dir()?.to_path_buf();
        for group in DependencyGroup::ALL {
            ctx.manifest = resolve_group(&ctx.manifest, group, self.registry, &project_dir)
                .with_context(|| format!("Failed to update {} versions", group))?;
        }
        Ok(())
    }

    fn add_project_links(&self, ctx: &mut ScaffoldContext) -> Result<()> {
        let links = Provenance::new(
            &self.settings.repository_host,
            &ctx.choices.author,
            ctx.component()?,
        );
        ctx.manifest = patch(&ctx.manifest, &[provenance_rule(&links)]);
        Ok(())
    }

    fn generate_style_module(&self, ctx: &ScaffoldContext) -> Result<()> {
        let type_name = ctx.type_name()?;
        let template = self.templates.style()?;
        let path = ctx
            .project_dir()?
            .join(SOURCE_DIR)
            .join(styles_file(type_name));

        debug!(path = %path.display(), "writing styles module");
        fs::write(&path, render_style(&template, type_name))
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    fn write_license(&self, ctx: &ScaffoldContext) -> Result<()> {
        let template = self.templates.license(ctx.choices.license)?;
        let path = ctx.project_dir()?.join("LICENSE");
        fs::write(&path, render_license(&template, &ctx.choices.author))
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    fn configure_editor(&mut self, ctx: &ScaffoldContext) -> Result<()> {
        let template = self.templates.editor_settings()?;
        let accent = Rgb::random(self.rng.as_mut());
        let title = generate_contrasting_pair(self.rng.as_mut());
        debug!(%accent, background = %title.background, foreground = %title.foreground, "editor colors");

        let dir = ctx.project_dir()?.join(EDITOR_DIR);
        if !dir.is_dir() {
            fs::create_dir(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            debug!(dir = %dir.display(), "created editor directory");
        }

        let path = dir.join(EDITOR_SETTINGS);
        fs::write(&path, render_editor_settings(&template, accent, title))
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

fn read_manifest(ctx: &mut ScaffoldContext) -> Result<()> {
    let path = ctx.project_dir()?.join(MANIFEST_FILE);
    ctx.manifest = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(())
}

fn extract_component_name(ctx: &mut ScaffoldContext) -> Result<()> {
    let name = manifest::component_name(&ctx.manifest)?;
    info!(component = %name, "component name");
    ctx.component = Some(name);
    Ok(())
}

fn update_manifest_info(ctx: &mut ScaffoldContext) -> Result<()> {
    let rules = identity_rules(ctx.component()?, &ctx.choices.author, ctx.choices.license);
    ctx.manifest = patch(&ctx.manifest, &rules);
    Ok(())
}

fn write_manifest(ctx: &ScaffoldContext) -> Result<()> {
    let path = ctx.project_dir()?.join(MANIFEST_FILE);
    fs::write(&path, &ctx.manifest).with_context(|| format!("Failed to write {}", path.display()))
}

fn derive_type_name(ctx: &mut ScaffoldContext) -> Result<()> {
    let type_name = naming::derive_type_name(ctx.component()?);
    info!(type_name = %type_name, "component class name");
    ctx.type_name = Some(type_name);
    Ok(())
}

fn rewire_component(ctx: &ScaffoldContext) -> Result<()> {
    let type_name = ctx.type_name()?;
    let path = ctx.project_dir()?.join(SOURCE_DIR).join(main_file(type_name));
    let source = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    fs::write(&path, rewire_main_module(&source, type_name))
        .with_context(|| format!("Failed to write {}", path.display()))
}
