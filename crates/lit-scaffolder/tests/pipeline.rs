//! End-to-end runs of the scaffold pipeline against a fake generator output

use lit_scaffolder::color::{ColorPair, Rgb};
use lit_scaffolder::logging::default_filter;
use lit_scaffolder::manifest::RegistryError;
use lit_scaffolder::pipeline::{
    Choices, Outcome, RecordedProgress, ScaffoldSettings, Scaffolded, Scaffolder,
};
use lit_scaffolder::runtime::{CommandExecutor, ExecError, ShellCommand};
use lit_scaffolder::{LicenseKind, Registry, TemplateStore};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use semver::Version;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

const GENERATED_MANIFEST: &str = r#"{
  "name": "my-wc",
  "description": "Webcomponent my-wc following open-wc recommendations",
  "license": "MIT",
  "author": "my-wc",
  "version": "0.0.0",
  "type": "module",
  "main": "index.js",
  "module": "index.js",
  "customElements": "custom-elements.json",
  "scripts": {
    "start": "web-dev-server"
  },
  "dependencies": {
    "lit": "^2.0.2"
  },
  "devDependencies": {
    "@custom-elements-manifest/analyzer": "^0.4.17",
    "@web/dev-server": "^0.1.28"
  }
}
"#;

const SCAFFOLDED_MANIFEST: &str = r#"{
  "name": "my-wc",
  "description": "Webcomponent my-wc following open-wc recommendations",
  "license": "MIT",
  "author": "octocat",
  "version": "1.0.0",
  "type": "module",
  "main": "my-wc.js",
  "module": "index.js",
  "customElements": "custom-elements.json",
  "home": "https://github.com/octocat/my-wc",
  "repository": "git+https://github.com/octocat/my-wc.git",
  "bugs": "https://github.com/octocat/my-wc/issues",
  "scripts": {
    "start": "web-dev-server"
  },
  "dependencies": {
    "lit": "^3.1.0"
  },
  "devDependencies": {
    "@custom-elements-manifest/analyzer": "^0.9.0",
    "@web/dev-server": "^0.4.1"
  }
}
"#;

const GENERATED_MAIN: &str = "import { html, css, LitElement } from 'lit';

export class MyWc extends LitElement {
  static styles = css`
    :host {
      display: block;
    }
  `;

  render() {
    return html`<slot></slot>`;
  }
}
";

/// Records every command and optionally fails all of them
#[derive(Default)]
struct RecordingExecutor {
    commands: RefCell<Vec<ShellCommand>>,
    fail: bool,
}

impl RecordingExecutor {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn command_lines(&self) -> Vec<String> {
        self.commands
            .borrow()
            .iter()
            .map(ShellCommand::command_line)
            .collect()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&self, command: &ShellCommand) -> Result<String, ExecError> {
        self.commands.borrow_mut().push(command.clone());
        if self.fail {
            Err(ExecError::Failed {
                command: command.command_line(),
                status: "exit status: 1".to_string(),
                detail: String::new(),
            })
        } else {
            Ok(String::new())
        }
    }
}

/// Answers from a fixed table and records every query with its directory
struct FakeRegistry {
    versions: HashMap<&'static str, &'static str>,
    queries: RefCell<Vec<(String, PathBuf)>>,
}

impl FakeRegistry {
    fn published() -> Self {
        Self {
            versions: HashMap::from([
                ("lit", "3.1.0"),
                ("@custom-elements-manifest/analyzer", "0.9.0"),
                ("@web/dev-server", "0.4.1"),
            ]),
            queries: RefCell::default(),
        }
    }

    fn empty() -> Self {
        Self {
            versions: HashMap::new(),
            queries: RefCell::default(),
        }
    }

    fn queried_packages(&self) -> Vec<String> {
        self.queries.borrow().iter().map(|(p, _)| p.clone()).collect()
    }
}

impl Registry for FakeRegistry {
    fn latest_version(&self, package: &str, project_dir: &Path) -> Result<Version, RegistryError> {
        self.queries
            .borrow_mut()
            .push((package.to_string(), project_dir.to_path_buf()));
        match self.versions.get(package) {
            Some(version) => Ok(Version::parse(version).unwrap()),
            None => Err(RegistryError::Command(ExecError::Failed {
                command: format!("npm view {} version", package),
                status: "exit status: 1".to_string(),
                detail: ": 404 Not Found".to_string(),
            })),
        }
    }
}

/// A base directory holding what the generator would have produced
struct Fixture {
    _root: TempDir,
    base: PathBuf,
    project: PathBuf,
}

impl Fixture {
    fn generated() -> Self {
        let root = TempDir::new().unwrap();
        let base = root.path().join("base");
        let project = base.join("my-wc");
        fs::create_dir_all(project.join("src")).unwrap();
        fs::write(project.join("package.json"), GENERATED_MANIFEST).unwrap();
        fs::write(project.join("src").join("MyWc.js"), GENERATED_MAIN).unwrap();
        // Hidden directories never count as the generated project
        fs::create_dir(base.join(".npm")).unwrap();

        Self {
            _root: root,
            base,
            project,
        }
    }

    fn empty() -> Self {
        let root = TempDir::new().unwrap();
        let base = root.path().join("base");
        fs::create_dir_all(&base).unwrap();
        let project = base.join("missing");

        Self {
            _root: root,
            base,
            project,
        }
    }

    fn read(&self, relative: impl AsRef<Path>) -> String {
        fs::read_to_string(self.project.join(relative)).unwrap()
    }
}

fn settings(base: &Path) -> ScaffoldSettings {
    ScaffoldSettings {
        base_dir: base.to_path_buf(),
        generator: ShellCommand::new("npm").args(["init", "@open-wc"]),
        package_manager: "npm".to_string(),
        repository_host: "https://github.com".to_string(),
    }
}

fn choices(start: bool) -> Choices {
    Choices {
        author: "octocat".to_string(),
        license: LicenseKind::Mit,
        start,
    }
}

fn parse_hex(color: &str) -> Rgb {
    let digits = color.strip_prefix('#').unwrap();
    assert_eq!(digits.len(), 6, "color {} is not zero-padded", color);
    Rgb::from_u24(u32::from_str_radix(digits, 16).unwrap())
}

#[test]
fn test_full_run_produces_publishable_component() {
    let fixture = Fixture::generated();
    let executor = RecordingExecutor::default();
    let registry = FakeRegistry::published();
    let templates = TemplateStore::Embedded;
    let mut progress = RecordedProgress::default();

    let outcome = Scaffolder::new(&executor, &registry, &templates, settings(&fixture.base))
        .with_rng(StdRng::seed_from_u64(7))
        .run(choices(true), &mut progress)
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Completed(Scaffolded {
            project_dir: fixture.project.clone(),
            component: "my-wc".to_string(),
            type_name: "MyWc".to_string(),
            warnings: Vec::new(),
        })
    );

    let ordinals: Vec<usize> = progress.steps.iter().map(|s| s.ordinal).collect();
    assert_eq!(ordinals, (1..=15).collect::<Vec<_>>());
    assert!(progress.warnings.is_empty());

    assert_eq!(
        executor.command_lines(),
        ["npm init @open-wc", "npm install", "npm audit fix"]
    );
    let commands = executor.commands.borrow();
    assert!(commands.iter().all(|c| c.interactive));
    assert_eq!(commands[0].cwd.as_deref(), Some(fixture.base.as_path()));
    assert_eq!(commands[1].cwd.as_deref(), Some(fixture.project.as_path()));
    assert_eq!(commands[2].cwd.as_deref(), Some(fixture.project.as_path()));

    assert_eq!(
        registry.queried_packages(),
        ["lit", "@custom-elements-manifest/analyzer", "@web/dev-server"]
    );
    assert!(registry
        .queries
        .borrow()
        .iter()
        .all(|(_, dir)| dir == &fixture.project));

    assert_eq!(fixture.read("package.json"), SCAFFOLDED_MANIFEST);

    let styles = fixture.read("src/MyWcStyles.js");
    assert!(styles.contains("export const MyWcStyles = css`"));
    assert!(!styles.contains("wcName"));

    let main = fixture.read("src/MyWc.js");
    assert!(main.starts_with(
        "import { html, LitElement } from 'lit';\nimport { MyWcStyles } from './MyWcStyles.js';\n"
    ));
    assert!(main.contains("static styles = [MyWcStyles];"));
    assert!(!main.contains("css`"));

    let license = fixture.read("LICENSE");
    assert!(license.starts_with("MIT License"));
    assert!(license.contains("Copyright (c) octocat"));
    assert!(!license.contains("{{author}}"));
}

#[test]
fn test_editor_colors_are_legible() {
    let fixture = Fixture::generated();
    let executor = RecordingExecutor::default();
    let registry = FakeRegistry::published();
    let templates = TemplateStore::Embedded;

    Scaffolder::new(&executor, &registry, &templates, settings(&fixture.base))
        .with_rng(StdRng::seed_from_u64(42))
        .run(choices(true), &mut RecordedProgress::default())
        .unwrap();

    let settings: serde_json::Value =
        serde_json::from_str(&fixture.read(".vscode/settings.json")).unwrap();
    let colors = &settings["workbench.colorCustomizations"];

    parse_hex(colors["activityBar.background"].as_str().unwrap());
    let title = ColorPair {
        background: parse_hex(colors["titleBar.activeBackground"].as_str().unwrap()),
        foreground: parse_hex(colors["titleBar.activeForeground"].as_str().unwrap()),
    };
    assert!(
        title.is_legible(),
        "luma difference {} is too small",
        title.luma_difference()
    );
}

#[test]
fn test_existing_editor_directory_is_reused() {
    let fixture = Fixture::generated();
    let editor_dir = fixture.project.join(".vscode");
    fs::create_dir(&editor_dir).unwrap();
    fs::write(editor_dir.join("extensions.json"), "{}").unwrap();

    let executor = RecordingExecutor::default();
    let registry = FakeRegistry::published();
    let templates = TemplateStore::Embedded;

    let outcome = Scaffolder::new(&executor, &registry, &templates, settings(&fixture.base))
        .run(choices(true), &mut RecordedProgress::default())
        .unwrap();

    assert!(matches!(outcome, Outcome::Completed(_)));
    assert_eq!(fixture.read(".vscode/extensions.json"), "{}");
    assert!(editor_dir.join("settings.json").is_file());
}

#[test]
fn test_declined_run_touches_nothing() {
    let fixture = Fixture::generated();
    let executor = RecordingExecutor::default();
    let registry = FakeRegistry::published();
    let templates = TemplateStore::Embedded;
    let mut progress = RecordedProgress::default();

    let outcome = Scaffolder::new(&executor, &registry, &templates, settings(&fixture.base))
        .run(choices(false), &mut progress)
        .unwrap();

    assert_eq!(outcome, Outcome::Aborted);
    assert!(executor.commands.borrow().is_empty());
    assert!(progress.steps.is_empty());
    assert_eq!(fixture.read("package.json"), GENERATED_MANIFEST);
    assert_eq!(fixture.read("src/MyWc.js"), GENERATED_MAIN);
    assert!(!fixture.project.join("LICENSE").exists());
}

#[test]
fn test_registry_failure_stops_before_manifest_is_written() {
    let fixture = Fixture::generated();
    let executor = RecordingExecutor::default();
    let registry = FakeRegistry::empty();
    let templates = TemplateStore::Embedded;
    let mut progress = RecordedProgress::default();

    let failure = Scaffolder::new(&executor, &registry, &templates, settings(&fixture.base))
        .run(choices(true), &mut progress)
        .unwrap_err();

    assert_eq!(failure.ordinal, 6);
    assert_eq!(failure.label, "Update dependency versions");
    assert!(failure.to_string().contains("npm view lit version"));

    assert_eq!(registry.queried_packages(), ["lit"]);
    assert_eq!(progress.steps.len(), 6);
    assert_eq!(executor.command_lines(), ["npm init @open-wc"]);
    assert_eq!(fixture.read("package.json"), GENERATED_MANIFEST);
    assert!(!fixture.project.join("src/MyWcStyles.js").exists());
}

#[test]
fn test_failed_commands_are_reported_and_run_continues() {
    let fixture = Fixture::generated();
    let executor = RecordingExecutor::failing();
    let registry = FakeRegistry::published();
    let templates = TemplateStore::Embedded;
    let mut progress = RecordedProgress::default();

    let outcome = Scaffolder::new(&executor, &registry, &templates, settings(&fixture.base))
        .run(choices(true), &mut progress)
        .unwrap();

    let Outcome::Completed(scaffolded) = outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(scaffolded.warnings.len(), 3);
    assert!(scaffolded.warnings[0].contains("npm init @open-wc"));

    let degraded: Vec<usize> = progress.warnings.iter().map(|(s, _)| s.ordinal).collect();
    assert_eq!(degraded, [1, 9, 10]);
    assert_eq!(progress.steps.len(), 15);
    assert_eq!(fixture.read("package.json"), SCAFFOLDED_MANIFEST);
}

#[test]
fn test_missing_project_directory_is_fatal() {
    let fixture = Fixture::empty();
    let executor = RecordingExecutor::default();
    let registry = FakeRegistry::published();
    let templates = TemplateStore::Embedded;

    let failure = Scaffolder::new(&executor, &registry, &templates, settings(&fixture.base))
        .run(choices(true), &mut RecordedProgress::default())
        .unwrap_err();

    assert_eq!(failure.ordinal, 2);
    assert!(failure.to_string().contains("No generated project directory"));
    assert!(!fixture.project.exists());
}

#[test]
fn test_missing_main_module_is_fatal() {
    let fixture = Fixture::generated();
    fs::remove_file(fixture.project.join("src/MyWc.js")).unwrap();

    let executor = RecordingExecutor::default();
    let registry = FakeRegistry::published();
    let templates = TemplateStore::Embedded;

    let failure = Scaffolder::new(&executor, &registry, &templates, settings(&fixture.base))
        .run(choices(true), &mut RecordedProgress::default())
        .unwrap_err();

    assert_eq!(failure.ordinal, 13);
    assert_eq!(failure.label, "Use styles module in component");
    // Earlier steps already wrote their output; nothing is rolled back
    assert_eq!(fixture.read("package.json"), SCAFFOLDED_MANIFEST);
    assert!(fixture.project.join("src/MyWcStyles.js").is_file());
}

#[test]
fn test_local_templates_override_embedded() {
    let fixture = Fixture::generated();
    let template_dir = fixture.base.join(".templates");
    fs::create_dir(&template_dir).unwrap();
    fs::write(
        template_dir.join("template.yaml"),
        "style: style.js\neditor_settings: settings.json\nlicenses:\n  ISC: isc.txt\n",
    )
    .unwrap();
    fs::write(template_dir.join("style.js"), "export const wcNameStyles = css``;\n").unwrap();
    fs::write(
        template_dir.join("settings.json"),
        r#"{"a": "BGCOLOR", "b": "TITLEBGCOLOR", "c": "TITLEFGCOLOR"}"#,
    )
    .unwrap();
    fs::write(template_dir.join("isc.txt"), "ISC (c) {{author}}\n").unwrap();

    let executor = RecordingExecutor::default();
    let registry = FakeRegistry::published();
    let templates = TemplateStore::Local(template_dir);
    let choices = Choices {
        license: LicenseKind::Isc,
        ..choices(true)
    };

    Scaffolder::new(&executor, &registry, &templates, settings(&fixture.base))
        .run(choices, &mut RecordedProgress::default())
        .unwrap();

    assert_eq!(fixture.read("LICENSE"), "ISC (c) octocat\n");
    assert_eq!(
        fixture.read("src/MyWcStyles.js"),
        "export const MyWcStyles = css``;\n"
    );
    assert!(fixture.read("package.json").contains(r#""license": "ISC""#));
}

/// `io::Write` sink shared with the test so log output can be inspected
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_failures_are_not_logged_twice_at_default_level() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(default_filter(false)))
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let fixture = Fixture::generated();
        let executor = RecordingExecutor::failing();
        let registry = FakeRegistry::empty();
        let templates = TemplateStore::Embedded;
        let mut progress = RecordedProgress::default();

        let failure = Scaffolder::new(&executor, &registry, &templates, settings(&fixture.base))
            .run(choices(true), &mut progress)
            .unwrap_err();

        // The recovered generator failure goes through progress, the fatal one to the caller
        assert_eq!(progress.warnings.len(), 1);
        assert_eq!(failure.ordinal, 6);
    });

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert_eq!(output, "");
}
