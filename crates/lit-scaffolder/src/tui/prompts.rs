//! Charm-style CLI prompts using cliclack

use crate::license::LicenseKind;
use crate::manifest::{HttpRegistry, NpmRegistry, Registry};
use crate::pipeline::{
    Choices, ConsoleProgress, Outcome, ScaffoldSettings, Scaffolded, Scaffolder,
};
use crate::product::ProductConfig;
use crate::runtime::{self, SystemExecutor};
use crate::templates::TemplateStore;
use anyhow::Result;
use std::path::PathBuf;

/// Author used when nothing better is known
const FALLBACK_AUTHOR: &str = "author";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// GitHub user or author name (skips the prompt)
    pub author: Option<String>,

    /// License for the component (skips the prompt)
    pub license: Option<LicenseKind>,

    /// Directory the generator runs in
    pub directory: Option<PathBuf>,

    /// Local directory to use for templates instead of the embedded ones
    pub template_dir: Option<PathBuf>,

    /// npm-compatible registry to query over HTTP instead of `npm view`
    pub registry_url: Option<String>,

    /// Skip the Node.js/npm availability check
    pub skip_runtime_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Current OS user, the default author
pub fn default_author() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .map(|user| user.trim().to_string())
        .ok()
        .filter(|user| !user.is_empty())
        .unwrap_or_else(|| FALLBACK_AUTHOR.to_string())
}

/// Run the CLI with interactive prompts
pub fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Collect choices; declining stops before anything runs
    let choices = collect_choices(&args)?;
    if !choices.start {
        cliclack::outro_cancel("Stopped by user, nothing was generated")?;
        return Ok(());
    }

    // Step 2: Check runtimes (advisory)
    let executor = SystemExecutor;
    if args.skip_runtime_check {
        cliclack::log::info("Skipping runtime check")?;
    } else {
        check_runtimes(config, &executor)?;
    }

    // Step 3: Resolve where the generator runs
    let base_dir = select_base_dir(&args)?;

    // Step 4: Templates and registry
    let templates = setup_templates(config, &args)?;
    let registry = setup_registry(config, &executor, &args)?;

    // Step 5: Run the pipeline
    let settings = ScaffoldSettings::from_config(config, base_dir);
    let mut scaffolder = Scaffolder::new(&executor, registry.as_ref(), &templates, settings);

    match scaffolder.run(choices, &mut ConsoleProgress)? {
        Outcome::Completed(scaffolded) => print_next_steps(config, &scaffolded)?,
        Outcome::Aborted => cliclack::outro_cancel("Stopped by user")?,
    }

    Ok(())
}

fn collect_choices(args: &CreateArgs) -> Result<Choices> {
    let author = match &args.author {
        Some(author) => {
            cliclack::log::info(format!("Author: {}", author))?;
            author.clone()
        }
        None if args.yes => default_author(),
        None => {
            let default = default_author();
            cliclack::input("Github user or author's name")
                .placeholder(&default)
                .default_input(&default)
                .interact()?
        }
    };

    let license = match args.license {
        Some(license) => {
            cliclack::log::info(format!("License: {}", license))?;
            license
        }
        None if args.yes => LicenseKind::default(),
        None => {
            let mut select =
                cliclack::select("LICENSE type").initial_value(LicenseKind::default());
            for kind in LicenseKind::ALL {
                select = select.item(kind, kind.id(), "");
            }
            select.interact()?
        }
    };

    let start = if args.yes {
        true
    } else {
        cliclack::confirm("Would you like to create a Lit web component?")
            .initial_value(false)
            .interact()?
    };

    Ok(Choices {
        author,
        license,
        start,
    })
}

fn check_runtimes<C: ProductConfig>(config: &C, executor: &SystemExecutor) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    match runtime::check_runtimes(executor, config.package_manager()) {
        Ok(runtimes) => {
            let runtime_info: Vec<String> = runtimes
                .iter()
                .map(|r| format!("{} ({})", r.name, r.version.as_deref().unwrap_or("unknown")))
                .collect();
            spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));
        }
        Err(e) => {
            // The generator step reports its own failure, so keep going
            spinner.stop("Missing runtimes");
            cliclack::log::warning(format!("{}", e))?;
        }
    }

    Ok(())
}

fn select_base_dir(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.is_dir() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }

    cliclack::log::info(format!("Generating component in {}", path.display()))?;
    Ok(path)
}

fn setup_templates<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<TemplateStore> {
    let store = TemplateStore::resolve(config, args.template_dir.clone());
    if let TemplateStore::Local(path) = &store {
        cliclack::log::info(format!("Using local templates from {}", path.display()))?;
    }

    // Fail before the generator runs rather than halfway through the pipeline
    store.manifest()?;
    Ok(store)
}

fn setup_registry<'e, C: ProductConfig>(
    config: &C,
    executor: &'e SystemExecutor,
    args: &CreateArgs,
) -> Result<Box<dyn Registry + 'e>> {
    let url = args
        .registry_url
        .clone()
        .or_else(|| std::env::var(config.registry_url_env()).ok());

    match url {
        Some(url) => {
            cliclack::log::info(format!("Using registry {}", url))?;
            Ok(Box::new(HttpRegistry::new(&url, config.user_agent())?))
        }
        None => Ok(Box::new(NpmRegistry::new(
            executor,
            config.package_manager(),
        ))),
    }
}

fn print_next_steps<C: ProductConfig>(config: &C, scaffolded: &Scaffolded) -> Result<()> {
    if !scaffolded.warnings.is_empty() {
        cliclack::log::warning(format!(
            "{} step(s) reported problems, review the output above",
            scaffolded.warnings.len()
        ))?;
    }

    let steps = config.next_steps(scaffolded);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!("{} is ready", scaffolded.component))?;

    Ok(())
}
