use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use plugingen::{GenerationContext, GenerationSession, JsonDirEmitter, TaskValidator};
use plugingen_cli::{init_tracing, PluginGenConfig};
use plugingen_descriptor::{DirJavadocStore, JavadocStore, MemoryDescriptors, MemoryJavadocStore};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "plugingen",
    version,
    about = "Generate Gradle and Maven plugin sources from plugin task descriptors"
)]
struct Cli {
    /// Config file (defaults to `plugingen.toml` in the working directory, when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check plugin task types and record their javadoc
    Validate(ValidateArgs),
    /// Generate Gradle plugin sources for `GenerateGradlePlugin` triggers
    Gradle(GenerateArgs),
    /// Generate Maven mojos for `GenerateMavenMojo` triggers
    Maven(GenerateArgs),
}

#[derive(Args)]
struct ValidateArgs {
    /// JSON descriptor manifest (`{ "types": [...] }`)
    manifest: PathBuf,
    /// Qualified names of the task types to check
    #[arg(required = true)]
    types: Vec<String>,
    /// Javadoc metadata root (overrides `output.javadoc_directory`)
    #[arg(long)]
    javadoc_dir: Option<PathBuf>,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct GenerateArgs {
    /// JSON descriptor manifest (`{ "types": [...] }`)
    manifest: PathBuf,
    /// Qualified names of the trigger types
    #[arg(required = true)]
    triggers: Vec<String>,
    /// Output directory (overrides `output.directory`)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Javadoc metadata root (overrides `output.javadoc_directory`)
    #[arg(long)]
    javadoc_dir: Option<PathBuf>,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ValidateReport {
    validated: Vec<String>,
    javadoc_directory: Option<PathBuf>,
}

#[derive(Serialize)]
struct GenerateReport {
    written: usize,
    directory: PathBuf,
    triggers: Vec<TriggerReport>,
}

#[derive(Serialize)]
struct TriggerReport {
    trigger: String,
    written: usize,
}

#[derive(Clone, Copy)]
enum Target {
    Gradle,
    Maven,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    let cwd = std::env::current_dir().context("failed to determine the working directory")?;
    let config = PluginGenConfig::discover(cli.config.as_deref(), &cwd)?;
    init_tracing(&config.logging);

    match cli.command {
        Command::Validate(args) => validate(&config, args),
        Command::Gradle(args) => generate(&config, Target::Gradle, args),
        Command::Maven(args) => generate(&config, Target::Maven, args),
    }
}

fn load_manifest(path: &Path) -> Result<MemoryDescriptors> {
    MemoryDescriptors::from_manifest_path(path)
        .with_context(|| format!("failed to load descriptor manifest {}", path.display()))
}

fn javadoc_store(dir: Option<PathBuf>) -> Box<dyn JavadocStore> {
    match dir {
        Some(dir) => Box::new(DirJavadocStore::new(dir)),
        None => Box::new(MemoryJavadocStore::new()),
    }
}

fn validate(config: &PluginGenConfig, args: ValidateArgs) -> Result<i32> {
    let descriptors = load_manifest(&args.manifest)?;
    let javadoc_directory = args
        .javadoc_dir
        .or_else(|| config.output.javadoc_directory.clone());
    let mut store = javadoc_store(javadoc_directory.clone());
    let mut validator = TaskValidator::new();

    for name in &args.types {
        validator.validate(&descriptors, store.as_mut(), name)?;
        tracing::info!(type_name = %name, "validated plugin task");
    }

    let report = ValidateReport {
        validated: args.types,
        javadoc_directory,
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for name in &report.validated {
            println!("valid: {name}");
        }
    }
    Ok(0)
}

fn generate(config: &PluginGenConfig, target: Target, args: GenerateArgs) -> Result<i32> {
    let descriptors = load_manifest(&args.manifest)?;
    let store = javadoc_store(
        args.javadoc_dir
            .or_else(|| config.output.javadoc_directory.clone()),
    );
    let directory = args.out.unwrap_or_else(|| config.output.directory.clone());

    let cx = GenerationContext::new(&descriptors, store.as_ref());
    let mut session = GenerationSession::new();
    let mut emitter = JsonDirEmitter::new(directory.clone());
    session.start();

    let mut triggers = Vec::with_capacity(args.triggers.len());
    for trigger in args.triggers {
        let written = match target {
            Target::Gradle => session.generate_gradle(cx, &trigger, &mut emitter)?,
            Target::Maven => session.generate_maven(cx, &trigger, &mut emitter)?,
        };
        tracing::info!(trigger = %trigger, written, "generated plugin sources");
        triggers.push(TriggerReport { trigger, written });
    }

    let report = GenerateReport {
        written: emitter.written(),
        directory,
        triggers,
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for trigger in &report.triggers {
            println!("{}: {} types", trigger.trigger, trigger.written);
        }
        println!(
            "wrote {} types to {}",
            report.written,
            report.directory.display()
        );
    }
    Ok(0)
}
