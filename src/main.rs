//! wrk - workflow helpers on top of git
//!
//! Run with `wrk --help` for usage.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use wrk::{
    APP_NAME, VERSION,
    clipboard::{ClipboardSink, SystemClipboard},
    config::Config,
    error::ConfigError,
    git::{Git, GitExecutor},
    workflow,
};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(about = "Manage work: branches, sessions and staging on top of git")]
#[command(long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Switch to a branch, creating it if it does not exist
    #[command(visible_alias = "br")]
    Branch {
        /// Branch name
        name: String,
    },

    /// Commit staged changes and push
    #[command(visible_alias = "cm")]
    Commit {
        /// Commit message words, joined with spaces
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },

    /// Stage and unstage changed files interactively, then optionally commit
    #[command(visible_alias = "fl")]
    ListFiles,

    /// Restore or delete saved sessions interactively
    #[command(visible_alias = "sl")]
    ListSessions,

    /// Save all uncommitted work, untracked files included, as a session
    #[command(visible_alias = "sv")]
    SaveSession {
        /// Session name
        name: String,
    },

    /// Show configuration
    Config {
        /// Write the current configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

impl Commands {
    /// Commands that take over the terminal
    fn is_interactive(&self) -> bool {
        matches!(self, Commands::ListFiles | Commands::ListSessions)
    }
}

/// Log level used when `RUST_LOG` is not set
fn default_level(debug: bool, to_file: bool) -> &'static str {
    match (debug, to_file) {
        (true, _) => "debug",
        (false, true) => "info",
        // Failures are already reported once on stderr by `main`
        (false, false) => "error",
    }
}

fn setup_logging(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let level = default_level(debug, log_file.is_some());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = log_file {
        // Log to file while a picker owns the screen
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(file).with_ansi(false).with_target(false))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(filter)
            .init();
    }

    Ok(())
}

fn git(config: &Config) -> wrk::Result<Git<GitExecutor>> {
    Ok(Git::new(GitExecutor::locate(&config.git_program)?))
}

fn show_config(config: &Config, config_path: Option<&Path>, init: bool) -> wrk::Result<()> {
    if init {
        let path = match config_path {
            Some(path) => {
                config.save_to(path)?;
                path.to_path_buf()
            }
            None => config.save()?,
        };
        println!("Configuration initialized at {:?}", path);
        return Ok(());
    }

    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => Config::config_file_path()?,
    };

    let toml =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
    println!("Configuration:");
    println!("{}", toml);
    println!("Config file: {:?}", path);
    println!("Log file: {:?}", config.log_file_path()?);

    Ok(())
}

async fn run(cli: Cli, config: &Config) -> wrk::Result<()> {
    match cli.command {
        Commands::Branch { name } => workflow::branch(&git(config)?, &name).await,

        Commands::Commit { message } => {
            workflow::commit(&git(config)?, &message, config.push_after_commit).await
        }

        Commands::ListFiles => {
            let git = git(config)?;
            // Opened up front so a missing clipboard fails before any picking
            let mut clipboard = if config.copy_to_clipboard {
                Some(SystemClipboard::open()?)
            } else {
                None
            };
            let sink = clipboard.as_mut().map(|c| c as &mut dyn ClipboardSink);
            workflow::list_files(&git, config, sink).await
        }

        Commands::ListSessions => workflow::list_sessions(&git(config)?).await,

        Commands::SaveSession { name } => workflow::save_session(&git(config)?, &name).await,

        Commands::Config { init } => show_config(config, cli.config.as_deref(), init),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Install color-eyre error hooks
    color_eyre::install()?;

    let cli = Cli::parse();

    // Load configuration
    let loaded = match cli.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = loaded.unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config, using defaults: {}", e);
        Config::default()
    });

    let debug = cli.debug || config.debug;
    if cli.command.is_interactive() {
        if let Err(e) = config.ensure_directories() {
            eprintln!("Warning: Failed to create directories: {}", e);
        }
        setup_logging(debug, Some(&config.log_file_path()?))?;
    } else {
        setup_logging(debug, None)?;
    }

    info!("Starting {} v{}", APP_NAME, VERSION);

    match run(cli, &config).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is_benign() => {
            println!("{}", e);
            Ok(ExitCode::from(e.exit_code()))
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
