//! install-lit CLI - Scaffolding for Lit web components

use anyhow::Result;
use clap::{Parser, Subcommand};
use lit_scaffolder::pipeline::Scaffolded;
use lit_scaffolder::tui::CreateArgs;
use lit_scaffolder::{LicenseKind, ProductConfig, ShellCommand};
use std::path::PathBuf;

/// install-lit product configuration
#[derive(Clone)]
pub struct InstallLitConfig;

impl ProductConfig for InstallLitConfig {
    fn name(&self) -> &'static str {
        "install-lit"
    }

    fn display_name(&self) -> &'static str {
        "Welcome to install-lit!"
    }

    fn generator(&self) -> ShellCommand {
        ShellCommand::new("npm").args(["init", "@open-wc"])
    }

    fn package_manager(&self) -> &'static str {
        "npm"
    }

    fn repository_host(&self) -> &'static str {
        "https://github.com"
    }

    fn registry_url_env(&self) -> &'static str {
        "INSTALL_LIT_REGISTRY_URL"
    }

    fn template_dir_env(&self) -> &'static str {
        "INSTALL_LIT_TEMPLATE_DIR"
    }

    fn next_steps(&self, scaffolded: &Scaffolded) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(scaffolded.project_dir.as_path()) {
            steps.push(format!("cd {}", scaffolded.project_dir.display()));
        }

        steps.push(format!("Edit src/{}.js to build your component", scaffolded.type_name));
        steps.push("npm start".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "install-lit")]
#[command(about = "CLI for scaffolding publish-ready Lit web components")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Show debug logs on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a Lit web component and prepare it for publishing
    Create(CliCreateArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// GitHub user or author name
    #[arg(short, long)]
    pub author: Option<String>,

    /// License for the component
    #[arg(short, long, value_enum)]
    pub license: Option<LicenseKind>,

    /// Directory to run the generator in
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// npm-compatible registry to query for latest versions over HTTP
    #[arg(long = "registry-url")]
    pub registry_url: Option<String>,

    /// Skip Node.js and npm installation check
    #[arg(long = "skip-runtime-check")]
    pub skip_runtime_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            author: args.author,
            license: args.license,
            directory: args.directory,
            template_dir: args.template_dir,
            registry_url: args.registry_url,
            skip_runtime_check: args.skip_runtime_check,
            yes: args.yes,
        }
    }
}

fn main() -> Result<()> {
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
    lit_scaffolder::init_logging(args.verbose);
    let config = InstallLitConfig;

    // No subcommand defaults to create behavior (interactive mode)
    let create_args = match args.command {
        Some(Command::Create(create_args)) => create_args.into(),
        None => CreateArgs::default(),
    };

    let result = lit_scaffolder::run(&config, create_args);

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
