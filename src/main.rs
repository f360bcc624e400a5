// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{error, warn, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use gesture_planner::app_config::{self, Config};
use gesture_planner::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Train a gesture classifier from a dataset
    Train(TrainArgs),

    /// Build an animation plan from a transcript
    Timeline(TimelineArgs),

    /// Play an animation plan on the virtual robot
    Simulate(SimulateArgs),

    /// Generate shell completions for gesture-planner
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct TrainArgs {
    /// Path to the gesture dataset JSON
    #[arg(long)]
    data: PathBuf,

    /// Where to save the trained model
    #[arg(long)]
    model: PathBuf,
}

#[derive(Args, Debug)]
struct TimelineArgs {
    /// Path to the transcript (JSON segment list or .srt)
    #[arg(long)]
    transcript: PathBuf,

    /// Path to the gesture dataset JSON
    #[arg(long)]
    data: PathBuf,

    /// Path to a trained model (optional)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Where to save the animation plan
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Path to the animation plan JSON
    #[arg(long)]
    plan: PathBuf,

    /// Pace gestures to the wall clock
    #[arg(long)]
    realtime: bool,
}

/// gesture-planner - speech-synchronized robot gestures
#[derive(Parser, Debug)]
#[command(name = "gesture-planner")]
#[command(version)]
#[command(about = "Turn timed transcripts into robot gesture timelines")]
#[command(long_about = "gesture-planner maps spoken words to robot gestures and plays the result.

EXAMPLES:
    gesture-planner train --data gestures.json --model model.json
    gesture-planner timeline --transcript talk.json --data gestures.json --out plan.json
    gesture-planner timeline --transcript talk.srt --data gestures.json --model model.json --out plan.json
    gesture-planner simulate --plan plan.json --realtime
    gesture-planner completions bash > gesture-planner.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Tag and ANSI colour for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "1;31"),
            Level::Warn => ("WARN ", "1;33"),
            Level::Info => ("INFO ", "1;32"),
            Level::Debug => ("DEBUG", "1;36"),
            Level::Trace => ("TRACE", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (tag, colour) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, tag, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set via set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "gesture-planner", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli.config_path, cli.log_level.clone())?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;

    if let Err(e) = run_command(&controller, cli.command).await {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

// Dispatch one subcommand to the controller
async fn run_command(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Train(args) => {
            controller.run_train(&args.data, &args.model)?;
        }
        Commands::Timeline(args) => {
            controller.run_timeline(&args.transcript, &args.data, args.model.as_deref(), &args.out)?;
        }
        Commands::Simulate(args) => {
            controller.run_simulate(&args.plan, args.realtime).await?;
        }
        Commands::Completions { .. } => {}
    }
    Ok(())
}

// Load the config file, or write a default one when it is missing
fn load_config(config_path: &str, cli_log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;
        debug!("Loaded config from {}", config_path);
        config
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Command line log level wins over the file
    if let Some(log_level) = cli_log_level {
        config.log_level = log_level.into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}
