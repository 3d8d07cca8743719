//! buildrules CLI — toolchain resolution and module build rules for the project.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use buildrules_targets::EngineVersion;
use commands::OutputFormat;
use config::{ProjectConfig, Settings};

#[derive(Parser)]
#[command(name = "buildrules", version, about = "Toolchain resolution and module build rules")]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project directory (default: search upward from the current directory)
    #[arg(long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter buildrules.toml
    Init {
        /// Project name
        name: String,
        /// Engine version (e.g., 5.3)
        #[arg(long)]
        engine_version: Option<String>,
    },
    /// Check toolchain and project status
    Doctor,
    /// Locate the toolchain and resolve the ATL SDK path
    Resolve {
        /// Fail if any part of the resolution was degraded
        #[arg(long)]
        strict: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show a module's native link plan
    Plan {
        /// Target platform (e.g., win64, linux)
        #[arg(long)]
        platform: Option<String>,
        /// Module whose plan to show
        #[arg(long, default_value = "ZipUtility")]
        module: String,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Inspect module rules
    Module {
        #[command(subcommand)]
        action: ModuleAction,
    },
    /// Inspect build targets
    Target {
        #[command(subcommand)]
        action: TargetAction,
    },
}

#[derive(Subcommand)]
enum ModuleAction {
    /// List modules in the catalog
    List,
    /// Show a module's rules for a platform
    Describe {
        /// Module name
        name: String,
        /// Target platform (e.g., win64, linux)
        #[arg(long)]
        platform: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
enum TargetAction {
    /// List built-in targets
    List,
    /// Show details of a target
    Describe {
        /// Target name
        name: String,
        /// Output format (default: human-readable, "toml" for TOML)
        #[arg(long)]
        format: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let start_dir = cli.project.clone().unwrap_or(cwd);

    match cli.command {
        Commands::Init {
            name,
            engine_version,
        } => {
            let engine_version = match engine_version {
                Some(v) => v.parse()?,
                None => EngineVersion::default(),
            };
            commands::init::run(&start_dir, &name, engine_version)
        }

        Commands::Doctor => commands::doctor::run(&start_dir),

        Commands::Resolve { strict, format } => {
            let settings = load_settings(&start_dir)?;
            commands::resolve::run(&settings, strict, format)
        }

        Commands::Plan {
            platform,
            module,
            format,
        } => {
            let settings = load_settings(&start_dir)?;
            commands::plan::run(&settings, &module, platform.as_deref(), format)
        }

        Commands::Module { action } => match action {
            ModuleAction::List => commands::module::list(),
            ModuleAction::Describe {
                name,
                platform,
                format,
            } => {
                let settings = load_settings(&start_dir)?;
                commands::module::describe(&settings, &name, platform.as_deref(), format)
            }
        },

        Commands::Target { action } => match action {
            TargetAction::List => commands::target::list(),
            TargetAction::Describe { name, format } => {
                commands::target::describe(&name, format.as_deref())
            }
        },
    }
}

/// Load `buildrules.toml` if present and apply environment overrides.
fn load_settings(start_dir: &std::path::Path) -> anyhow::Result<Settings> {
    let loaded = ProjectConfig::find_and_load(start_dir)?;
    Ok(Settings::from_config(loaded, start_dir))
}
