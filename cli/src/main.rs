//! IdeaForge CLI - Binary entry point.
//!
//! ```text
//! main() -> Cli::parse() -> load config -> init_tracing() -> Forge -> execute()
//! ```
//!
//! Only command output goes to stdout. Logs go to `~/.ideaforge/logs/ideaforge.log`
//! when it can be opened, stderr otherwise.

use std::{
    env,
    fs::{self, OpenOptions},
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ideaforge_config::{IdeaForgeConfig, resolve_credential_from_env};
use ideaforge_core::Forge;

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(name = "ideaforge")]
#[command(about = "Expand a raw idea into a specification and critique it")]
struct Cli {
    /// Credential for the generative service
    #[arg(long, global = true, env = "IDEAFORGE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Config file to load instead of ~/.ideaforge/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a raw idea
    Expand {
        /// Raw idea text; read from stdin when omitted or "-"
        idea: Option<String>,
    },
    /// Critique an already expanded idea
    Critique {
        /// Expanded idea text; read from stdin when omitted or "-"
        idea: Option<String>,
    },
    /// Expand a raw idea, then critique the result
    Run {
        /// Raw idea text; read from stdin when omitted or "-"
        idea: Option<String>,
        /// Print every stage as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    fn idea_arg(&self) -> Option<&str> {
        match self {
            Commands::Expand { idea } | Commands::Critique { idea } | Commands::Run { idea, .. } => {
                idea.as_deref()
            }
        }
    }
}

/// Pick the log filter: `RUST_LOG`, then `[logging] filter`, then `warn`.
///
/// Directives that fail to parse are skipped and reported in the returned warnings.
fn build_env_filter(
    env_directive: Option<&str>,
    config_filter: Option<&str>,
) -> (EnvFilter, Vec<String>) {
    let mut warnings = Vec::new();
    let sources = [
        (EnvFilter::DEFAULT_ENV, env_directive),
        ("[logging] filter", config_filter),
    ];

    for (origin, directive) in sources {
        let Some(directive) = directive.map(str::trim).filter(|d| !d.is_empty()) else {
            continue;
        };
        match EnvFilter::try_new(directive) {
            Ok(filter) => return (filter, warnings),
            Err(e) => warnings.push(format!("Ignoring invalid {origin} {directive:?}: {e}")),
        }
    }

    (EnvFilter::new(DEFAULT_LOG_FILTER), warnings)
}

fn init_tracing(config_filter: Option<&str>) {
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
    let (env_filter, mut init_warnings) = build_env_filter(rust_log.as_deref(), config_filter);

    let (log_file, log_warnings) = open_log_file(log_file_candidates());
    init_warnings.extend(log_warnings);

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();
        tracing::info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(env_filter)
            .init();
    }

    for warning in init_warnings {
        tracing::warn!("{warning}");
    }
}

/// Open the first candidate that accepts appends, noting every one skipped.
fn open_log_file(candidates: Vec<PathBuf>) -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut skipped = Vec::new();

    for path in candidates {
        let opened = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| OpenOptions::new().create(true).append(true).open(&path));
        match opened {
            Ok(file) => return (Some((path, file)), skipped),
            Err(e) => skipped.push(format!("Skipping log file {}: {e}", path.display())),
        }
    }

    (None, skipped)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.ideaforge/logs/ideaforge.log
    if let Some(config_path) = IdeaForgeConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("ideaforge.log"));
    }

    candidates.push(PathBuf::from(".ideaforge").join("logs").join("ideaforge.log"));

    candidates
}

/// An explicit `--config` must load; a broken default file only warns.
fn load_config(explicit: Option<&Path>) -> Result<(Option<IdeaForgeConfig>, Option<String>)> {
    match explicit {
        Some(path) => {
            let config = IdeaForgeConfig::load_from(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            Ok((Some(config), None))
        }
        None => match IdeaForgeConfig::load() {
            Ok(config) => Ok((config, None)),
            Err(err) => Ok((None, Some(err.to_string()))),
        },
    }
}

/// Take the idea from the argument, or from `input` when absent or `-`.
///
/// A single trailing newline is dropped from piped input.
fn read_idea(arg: Option<&str>, mut input: impl Read) -> Result<String> {
    match arg {
        Some(idea) if idea != "-" => Ok(idea.to_string()),
        _ => {
            let mut idea = String::new();
            input
                .read_to_string(&mut idea)
                .context("reading idea from stdin")?;
            if idea.ends_with('\n') {
                idea.pop();
                if idea.ends_with('\r') {
                    idea.pop();
                }
            }
            Ok(idea)
        }
    }
}

fn execute(command: &Commands, forge: &Forge, idea: &str, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Expand { .. } => writeln!(out, "{}", forge.expander().expand(idea))?,
        Commands::Critique { .. } => writeln!(out, "{}", forge.critic().critique(idea))?,
        Commands::Run { json, .. } => {
            let report = forge.run(idea);
            if *json {
                serde_json::to_writer_pretty(&mut *out, &report)
                    .context("serializing forge report")?;
                writeln!(out)?;
            } else {
                writeln!(out, "{}", report.critique)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_warning) = load_config(cli.config.as_deref())?;
    init_tracing(config.as_ref().and_then(IdeaForgeConfig::log_filter));
    if let Some(warning) = config_warning {
        tracing::warn!("Ignoring config: {warning}");
    }

    let (credential, source) = resolve_credential_from_env(cli.api_key.as_deref(), config.as_ref());
    tracing::debug!(source = source.as_str(), "Credential resolved");
    let forge = Forge::new(credential);

    let idea = read_idea(cli.command.idea_arg(), io::stdin().lock())?;
    let mut out = BufWriter::new(io::stdout().lock());
    execute(&cli.command, &forge, &idea, &mut out)
}
