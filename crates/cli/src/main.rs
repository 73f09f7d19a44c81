use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use progress_provider_core::helpers::{
    report, report_error, report_progress, report_progress_with_state, report_state,
};
use progress_provider_core::progress::ProgressSink;
use progress_provider_core::state::ProgressState;

mod config;
mod sinks;

use config::{config_path, load_config, load_config_from, set_config_key, AppConfig};
use sinks::{BarSink, JsonLinesSink, TextSink};

type CliResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "progress-report")]
#[command(about = "Publish structured progress reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON lines
    #[arg(long, global = true)]
    json: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a single progress report
    Emit {
        /// Report message
        #[arg(short, long)]
        message: String,

        /// Current progress value
        #[arg(long, requires = "max", allow_negative_numbers = true)]
        value: Option<f64>,

        /// Maximum progress value
        #[arg(long, requires = "value", allow_negative_numbers = true)]
        max: Option<f64>,

        /// State (none, indeterminate, normal, paused, error)
        #[arg(long)]
        state: Option<ProgressState>,
    },

    /// Publish an error report without a message
    Error,

    /// Run a simulated long operation that reports its progress
    Simulate {
        /// Message attached to each step
        #[arg(short, long, default_value = "Working")]
        message: String,

        /// Number of steps (defaults to config)
        #[arg(long)]
        steps: Option<u64>,

        /// Delay between steps in milliseconds (defaults to config)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Fail with an error report at this step
        #[arg(long)]
        fail_at: Option<u64>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Initialize default config file
    Init,
    /// Show current configuration
    Show,
    /// Print the config file path
    Path,
    /// Set a configuration value
    Set {
        /// Key (dot-separated path)
        key: String,
        /// Value
        value: String,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> CliResult {
    match &cli.command {
        Commands::Emit {
            message,
            value,
            max,
            state,
        } => {
            let cfg = resolve_config(cli)?;
            let sink = stdout_sink(cli.json || cfg.display.json);
            run_emit(&*sink, message, value.zip(*max), *state);
            Ok(())
        }
        Commands::Error => {
            let cfg = resolve_config(cli)?;
            let sink = stdout_sink(cli.json || cfg.display.json);
            report_error(&*sink);
            Ok(())
        }
        Commands::Simulate {
            message,
            steps,
            delay_ms,
            fail_at,
        } => {
            let cfg = resolve_config(cli)?;
            let json = cli.json || cfg.display.json;
            let steps = steps.unwrap_or(cfg.simulate.steps);
            let delay = Duration::from_millis(delay_ms.unwrap_or(cfg.simulate.delay_ms));
            let sink: Box<dyn ProgressSink<String>> =
                if !json && cfg.display.progress_bar && std::io::stderr().is_terminal() {
                    let bar = ProgressBar::new(steps);
                    bar.set_style(ProgressStyle::with_template(&cfg.display.bar_template)?);
                    Box::new(BarSink::new(bar))
                } else {
                    stdout_sink(json)
                };
            run_simulate(&*sink, message, steps, delay, *fail_at)
        }
        Commands::Config { action } => run_config(action, cli.config.as_deref(), cli.json),
    }
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, config::ConfigError> {
    match &cli.config {
        Some(path) => load_config_from(path),
        None => Ok(load_config()),
    }
}

fn stdout_sink(json: bool) -> Box<dyn ProgressSink<String>> {
    if json {
        Box::new(JsonLinesSink::new(std::io::stdout()))
    } else {
        Box::new(TextSink::new(std::io::stdout()))
    }
}

/// Pick the reporting helper matching the options that were supplied.
fn run_emit(
    sink: &dyn ProgressSink<String>,
    message: &str,
    bounds: Option<(f64, f64)>,
    state: Option<ProgressState>,
) {
    let message = message.to_string();
    match (bounds, state) {
        (Some((value, max)), Some(state)) => {
            report_progress_with_state(sink, message, value, max, state)
        }
        (Some((value, max)), None) => report_progress(sink, message, value, max),
        (None, Some(state)) => report_state(sink, message, state),
        (None, None) => report(sink, message),
    }
}

fn run_simulate(
    sink: &dyn ProgressSink<String>,
    message: &str,
    steps: u64,
    delay: Duration,
    fail_at: Option<u64>,
) -> CliResult {
    tracing::debug!(steps, ?fail_at, "starting simulated operation");
    report_state(
        sink,
        format!("{}: starting", message),
        ProgressState::Indeterminate,
    );
    for step in 1..=steps {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        if fail_at == Some(step) {
            report_error(sink);
            return Err(format!("{} failed at step {}", message, step).into());
        }
        report_progress(sink, message.to_string(), step as f64, steps as f64);
    }
    report_progress_with_state(
        sink,
        format!("{}: done", message),
        steps as f64,
        steps as f64,
        ProgressState::Normal,
    );
    Ok(())
}

fn run_config(action: &ConfigAction, explicit: Option<&Path>, json: bool) -> CliResult {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config_path().ok_or("Could not determine config directory")?,
    };
    match action {
        ConfigAction::Init => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let toml = toml::to_string_pretty(&AppConfig::default())?;
            std::fs::write(&path, toml)?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigAction::Show => {
            let cfg = match explicit {
                Some(p) => load_config_from(p)?,
                None => load_config(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else {
                println!("{}", toml::to_string_pretty(&cfg)?);
            }
        }
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Set { key, value } => {
            let mut cfg = if path.exists() {
                load_config_from(&path)?
            } else {
                AppConfig::default()
            };
            set_config_key(&mut cfg, key, value)?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, toml::to_string_pretty(&cfg)?)?;
            if !json {
                println!("Updated {}", key);
            }
        }
    }
    Ok(())
}
